use std::{collections::HashMap, fs, path::Path};

use thiserror::Error;
use tracing::info;

use noelle_utils::fuzzy::{NameResolver, ResolveError};

use crate::CharacterInfo;

/// Failures while loading the guide data file.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read character data from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed character data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("character `{0}` appears more than once")]
    DuplicateName(String),
}

/// Read-only guide index, sorted case-insensitively by name.
///
/// Built once at startup and shared by every handler.
#[derive(Debug)]
pub struct CharacterIndex {
    characters: Vec<CharacterInfo>,
    by_name: HashMap<String, usize>,
    resolver: NameResolver,
}

impl CharacterIndex {
    /// Load the data file at `path` (a JSON array of guide entries).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let index = Self::from_json(&raw)?;
        info!(path = %path.display(), characters = index.len(), "character data loaded");
        Ok(index)
    }

    pub fn from_json(raw: &str) -> Result<Self, DataError> {
        let characters: Vec<CharacterInfo> = serde_json::from_str(raw)?;
        Self::from_characters(characters)
    }

    pub fn from_characters(mut characters: Vec<CharacterInfo>) -> Result<Self, DataError> {
        characters.sort_by_cached_key(|character| character.character_name.to_lowercase());

        let mut by_name = HashMap::with_capacity(characters.len());
        for (position, character) in characters.iter().enumerate() {
            if by_name
                .insert(character.character_name.clone(), position)
                .is_some()
            {
                return Err(DataError::DuplicateName(character.character_name.clone()));
            }
        }

        let resolver = NameResolver::new(
            characters
                .iter()
                .map(|character| character.character_name.clone()),
        );

        Ok(Self {
            characters,
            by_name,
            resolver,
        })
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, name: &str) -> Option<&CharacterInfo> {
        self.by_name
            .get(name)
            .map(|position| &self.characters[*position])
    }

    /// Guide names in display order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.characters
            .iter()
            .map(|character| character.character_name.as_str())
    }

    pub fn resolver(&self) -> &NameResolver {
        &self.resolver
    }

    /// Best-matching guide name for free-text input.
    pub fn resolve(&self, query: &str) -> Result<&str, ResolveError> {
        self.resolver.resolve(query)
    }

    /// Ranked guide names for autocomplete.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<(&str, f64)> {
        self.resolver.suggest(query, limit)
    }
}
