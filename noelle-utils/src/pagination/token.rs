//! Custom ID encoding for pagination components.

use super::view::Navigation;

pub(crate) const TOKEN_PREFIX: &str = "pg";

/// Action carried by a pagination component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentAction {
    Navigate(Navigation),
    /// The disabled page-indicator button.
    Indicator,
    /// The current page's select menu.
    Pick,
}

impl ComponentAction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Navigate(Navigation::First) => "first",
            Self::Navigate(Navigation::Previous) => "prev",
            Self::Navigate(Navigation::Next) => "next",
            Self::Navigate(Navigation::Last) => "last",
            Self::Indicator => "page",
            Self::Pick => "pick",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        let action = match raw {
            "first" => Self::Navigate(Navigation::First),
            "prev" => Self::Navigate(Navigation::Previous),
            "next" => Self::Navigate(Navigation::Next),
            "last" => Self::Navigate(Navigation::Last),
            "page" => Self::Indicator,
            "pick" => Self::Pick,
            _ => return None,
        };
        Some(action)
    }
}

/// Parsed pagination component custom ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationToken {
    pub session_id: u64,
    pub action: ComponentAction,
}

/// Build `pg:{session_id}:{action}`.
pub fn build_custom_id(session_id: u64, action: ComponentAction) -> String {
    format!("{TOKEN_PREFIX}:{session_id}:{}", action.as_str())
}

/// Parse a pagination custom ID, rejecting anything with extra segments.
pub fn parse_custom_id(custom_id: &str) -> Option<PaginationToken> {
    let mut parts = custom_id.split(':');

    if parts.next()? != TOKEN_PREFIX {
        return None;
    }

    let session_id = parts.next()?.parse::<u64>().ok()?;
    let action = ComponentAction::parse(parts.next()?)?;

    if parts.next().is_some() {
        return None;
    }

    Some(PaginationToken { session_id, action })
}
