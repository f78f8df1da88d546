//! Fuzzy name resolution over a fixed set of display names.
//!
//! Scores are weighted ratios in the `0.0..=100.0` range. The weighted ratio
//! combines a plain similarity ratio with partial (substring) and token-based
//! ratios, so `"albed"` finds `Albedo` and `"tao hu"` finds `Hu Tao`.

use std::collections::BTreeSet;

use thiserror::Error;

/// Default number of suggestions offered to autocomplete.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

const TOKEN_SCALE: f64 = 0.95;
const PARTIAL_SCALE: f64 = 0.9;
const LONG_PARTIAL_SCALE: f64 = 0.6;

/// Errors raised by [`NameResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The index holds no names at all.
    #[error("no names are indexed")]
    NotFound,
}

#[derive(Debug, Clone)]
struct IndexedName {
    display: String,
    normalized: String,
}

/// Read-only fuzzy index over display names.
///
/// Built once at startup and shared behind an `Arc`; queries never mutate it.
#[derive(Debug, Clone, Default)]
pub struct NameResolver {
    names: Vec<IndexedName>,
}

impl NameResolver {
    /// Index `names` in the given order. Repeated names are indexed once.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = BTreeSet::new();
        let names = names
            .into_iter()
            .map(Into::into)
            .filter(|display| seen.insert(display.clone()))
            .map(|display| IndexedName {
                normalized: normalize(&display),
                display,
            })
            .collect();

        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Rank every indexed name against `query` and keep the best `limit`.
    ///
    /// Ties keep index order. An empty query scores everything at zero and
    /// therefore returns the first `limit` names.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<(&str, f64)> {
        let query = normalize(query);

        let mut scored: Vec<(&str, f64)> = self
            .names
            .iter()
            .map(|name| (name.display.as_str(), weighted_ratio(&query, &name.normalized)))
            .collect();

        scored.sort_by(|left, right| right.1.total_cmp(&left.1));
        scored.truncate(limit);
        scored
    }

    /// Return the single best-matching name, however weak the match.
    ///
    /// Callers decide on confidence; this only fails when nothing is indexed.
    pub fn resolve(&self, query: &str) -> Result<&str, ResolveError> {
        if let Some(exact) = self.names.iter().find(|name| name.display == query) {
            return Ok(&exact.display);
        }

        self.suggest(query, 1)
            .into_iter()
            .next()
            .map(|(name, _score)| name)
            .ok_or(ResolveError::NotFound)
    }
}

/// Case-fold and strip punctuation so index keys and queries compare alike.
pub fn normalize(raw: &str) -> String {
    let spaced: String = raw
        .chars()
        .flat_map(|ch| {
            if ch.is_alphanumeric() {
                ch.to_lowercase().collect::<Vec<_>>()
            } else {
                vec![' ']
            }
        })
        .collect();

    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Token-order independent weighted similarity of two normalized strings.
pub fn weighted_ratio(left: &str, right: &str) -> f64 {
    let left_len = left.chars().count();
    let right_len = right.chars().count();
    if left_len == 0 || right_len == 0 {
        return 0.0;
    }

    let shorter = left_len.min(right_len) as f64;
    let longer = left_len.max(right_len) as f64;
    let len_ratio = longer / shorter;

    let plain = ratio(left, right);
    if len_ratio < 1.5 {
        return plain.max(token_ratio(left, right) * TOKEN_SCALE);
    }

    let partial_scale = if len_ratio < 8.0 {
        PARTIAL_SCALE
    } else {
        LONG_PARTIAL_SCALE
    };

    plain
        .max(partial_ratio(left, right) * partial_scale)
        .max(partial_token_ratio(left, right) * TOKEN_SCALE * partial_scale)
}

fn ratio(left: &str, right: &str) -> f64 {
    if left.is_empty() && right.is_empty() {
        return 100.0;
    }
    rapidfuzz::fuzz::ratio(left.chars(), right.chars()) * 100.0
}

fn slice_ratio(left: &[char], right: &[char]) -> f64 {
    rapidfuzz::fuzz::ratio(left.iter().copied(), right.iter().copied()) * 100.0
}

/// Best ratio of the shorter string against any same-length window of the longer.
fn partial_ratio(left: &str, right: &str) -> f64 {
    let left: Vec<char> = left.chars().collect();
    let right: Vec<char> = right.chars().collect();
    let (needle, haystack) = if left.len() <= right.len() {
        (left, right)
    } else {
        (right, left)
    };

    if needle.is_empty() {
        return 0.0;
    }

    let width = needle.len();
    let mut best = 0.0_f64;

    // Windows hanging off either end catch prefixes and suffixes of the needle.
    for end in 1..width {
        best = best.max(slice_ratio(&needle, &haystack[..end]));
        best = best.max(slice_ratio(&needle, &haystack[haystack.len() - end..]));
    }

    for window in haystack.windows(width) {
        best = best.max(slice_ratio(&needle, window));
        if best >= 100.0 {
            break;
        }
    }

    best
}

struct TokenSplit {
    sorted_left: String,
    sorted_right: String,
    intersection: String,
    only_left: String,
    only_right: String,
}

impl TokenSplit {
    fn new(left: &str, right: &str) -> Self {
        let left_tokens: BTreeSet<&str> = left.split_whitespace().collect();
        let right_tokens: BTreeSet<&str> = right.split_whitespace().collect();

        Self {
            sorted_left: sorted_tokens(left),
            sorted_right: sorted_tokens(right),
            intersection: join(left_tokens.intersection(&right_tokens)),
            only_left: join(left_tokens.difference(&right_tokens)),
            only_right: join(right_tokens.difference(&left_tokens)),
        }
    }

    fn one_side_contained(&self) -> bool {
        !self.intersection.is_empty() && (self.only_left.is_empty() || self.only_right.is_empty())
    }
}

fn sorted_tokens(raw: &str) -> String {
    let mut tokens: Vec<&str> = raw.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn join<'a: 'b, 'b>(tokens: impl Iterator<Item = &'b &'a str>) -> String {
    tokens.copied().collect::<Vec<_>>().join(" ")
}

fn token_ratio(left: &str, right: &str) -> f64 {
    let split = TokenSplit::new(left, right);
    if split.one_side_contained() {
        return 100.0;
    }

    let sorted = ratio(&split.sorted_left, &split.sorted_right);
    let differences = ratio(&split.only_left, &split.only_right);
    if split.intersection.is_empty() {
        return sorted.max(differences);
    }

    let with_left = format!("{} {}", split.intersection, split.only_left);
    let with_right = format!("{} {}", split.intersection, split.only_right);

    sorted
        .max(differences)
        .max(ratio(&split.intersection, &with_left))
        .max(ratio(&split.intersection, &with_right))
}

fn partial_token_ratio(left: &str, right: &str) -> f64 {
    let split = TokenSplit::new(left, right);
    if split.one_side_contained() {
        return 100.0;
    }

    let sorted = partial_ratio(&split.sorted_left, &split.sorted_right);
    if split.only_left.is_empty() || split.only_right.is_empty() {
        return sorted;
    }

    sorted.max(partial_ratio(&split.only_left, &split.only_right))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genshin() -> NameResolver {
        NameResolver::new([
            "Albedo",
            "Amber",
            "Hu Tao",
            "Kamisato Ayaka",
            "Kamisato Ayato",
            "Raiden Shogun",
            "Traveler (Anemo)",
            "Xiangling",
        ])
    }

    #[test]
    fn normalize_folds_case_and_punctuation() {
        assert_eq!(normalize("  Traveler (Anemo) "), "traveler anemo");
        assert_eq!(normalize("Hu-Tao"), "hu tao");
        assert_eq!(normalize("!!!"), "");
    }

    #[test]
    fn resolve_prefers_partial_input() {
        let resolver = NameResolver::new(["Albedo", "Amber"]);
        assert_eq!(resolver.resolve("albed"), Ok("Albedo"));
    }

    #[test]
    fn suggest_prefix_ranks_first() {
        let resolver = NameResolver::new(["Albedo", "Amber"]);
        let top = resolver.suggest("am", 1);

        assert_eq!(top.len(), 1);
        assert_eq!(top[0].0, "Amber");
    }

    #[test]
    fn exact_names_always_resolve_to_themselves() {
        let resolver = genshin();
        for name in [
            "Albedo",
            "Amber",
            "Hu Tao",
            "Kamisato Ayaka",
            "Kamisato Ayato",
            "Raiden Shogun",
            "Traveler (Anemo)",
            "Xiangling",
        ] {
            assert_eq!(resolver.resolve(name), Ok(name));
        }
    }

    #[test]
    fn token_order_does_not_matter() {
        assert_eq!(genshin().resolve("tao hu"), Ok("Hu Tao"));
        assert_eq!(genshin().resolve("shogun raiden"), Ok("Raiden Shogun"));
    }

    #[test]
    fn tolerates_typos() {
        assert_eq!(genshin().resolve("xiangliing"), Ok("Xiangling"));
        assert_eq!(genshin().resolve("ayatto"), Ok("Kamisato Ayato"));
    }

    #[test]
    fn suggestions_are_bounded_sorted_and_unique() {
        let resolver = genshin();
        for query in ["", "a", "kami", "traveller", "zzz"] {
            for limit in [0, 1, 3, 5, 20] {
                let results = resolver.suggest(query, limit);
                assert!(results.len() <= limit);
                assert!(results.len() <= resolver.len());
                assert!(results.windows(2).all(|pair| pair[0].1 >= pair[1].1));

                let unique: BTreeSet<&str> = results.iter().map(|(name, _)| *name).collect();
                assert_eq!(unique.len(), results.len());
            }
        }
    }

    #[test]
    fn empty_query_falls_back_to_index_order() {
        let resolver = genshin();
        let names: Vec<&str> = resolver.suggest("", 3).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["Albedo", "Amber", "Hu Tao"]);
    }

    #[test]
    fn empty_index_has_nothing_to_offer() {
        let resolver = NameResolver::new(Vec::<String>::new());
        assert!(resolver.suggest("amber", 5).is_empty());
        assert_eq!(resolver.resolve("amber"), Err(ResolveError::NotFound));
        assert_eq!(resolver.resolve(""), Err(ResolveError::NotFound));
    }

    #[test]
    fn repeated_names_are_indexed_once() {
        let resolver = NameResolver::new(["Amber", "Amber", "Albedo"]);
        assert_eq!(resolver.len(), 2);
    }

    #[test]
    fn weighted_ratio_bounds() {
        assert_eq!(weighted_ratio("", "amber"), 0.0);
        assert!(weighted_ratio("amber", "amber") > weighted_ratio("amber", "albedo"));
    }
}
