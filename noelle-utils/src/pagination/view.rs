//! Cursor state machine over a fixed sequence of pre-rendered pages.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use thiserror::Error;
use tokio::time::Instant;

/// Navigation requested through one of the view's buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Navigation {
    First,
    Previous,
    Next,
    Last,
}

/// Lifecycle state of a [`PageView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Active,
    Closed,
}

/// Why a navigation attempt left the cursor where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Somebody other than the invoking user pressed a button.
    Unauthorized,
    /// The view already timed out or was stopped.
    Closed,
    /// Single-page views have nothing to navigate.
    Static,
}

/// Result of a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { cursor: usize },
    Rejected(Rejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("a paginated view needs at least one page")]
    NoPages,
}

/// Pages, cursor, owner and deadline of one paginated message.
///
/// The deadline is fixed at construction: navigating does not extend it.
#[derive(Debug)]
pub struct PageView<P> {
    pages: Vec<P>,
    cursor: usize,
    owner_user_id: u64,
    deadline: Instant,
    expires_at_unix: u64,
    state: ViewState,
}

impl<P> PageView<P> {
    pub fn new(pages: Vec<P>, owner_user_id: u64, timeout: Duration) -> Result<Self, PaginationError> {
        if pages.is_empty() {
            return Err(PaginationError::NoPages);
        }

        let expires_at_unix = SystemTime::now()
            .checked_add(timeout)
            .and_then(|at| at.duration_since(UNIX_EPOCH).ok())
            .map_or(0, |since_epoch| since_epoch.as_secs());

        Ok(Self {
            pages,
            cursor: 0,
            owner_user_id,
            deadline: Instant::now() + timeout,
            expires_at_unix,
            state: ViewState::Active,
        })
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always false; construction rejects empty page lists.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == ViewState::Closed
    }

    pub fn owner_user_id(&self) -> u64 {
        self.owner_user_id
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Whether navigation controls are rendered at all.
    pub fn is_navigable(&self) -> bool {
        self.pages.len() > 1
    }

    pub fn current_page(&self) -> &P {
        &self.pages[self.cursor]
    }

    /// Page indicator shown between the navigation buttons.
    pub fn page_label(&self) -> String {
        format!("{}/{}", self.cursor + 1, self.pages.len())
    }

    /// Status line shown above the page while the view is active.
    pub fn status_line(&self) -> String {
        format!("This command will time out <t:{}:R>", self.expires_at_unix)
    }

    /// Whether `actor_user_id` may interact with the view right now.
    pub fn authorize(&self, actor_user_id: u64) -> Result<(), Rejection> {
        if self.state == ViewState::Closed {
            return Err(Rejection::Closed);
        }
        if actor_user_id != self.owner_user_id {
            return Err(Rejection::Unauthorized);
        }
        Ok(())
    }

    /// Apply `navigation` on behalf of `actor_user_id`.
    pub fn navigate(&mut self, actor_user_id: u64, navigation: Navigation) -> Transition {
        if let Err(reason) = self.authorize(actor_user_id) {
            return Transition::Rejected(reason);
        }
        if !self.is_navigable() {
            return Transition::Rejected(Rejection::Static);
        }

        let total = self.pages.len();
        self.cursor = match navigation {
            Navigation::First => 0,
            Navigation::Previous => (self.cursor + total - 1) % total,
            Navigation::Next => (self.cursor + 1) % total,
            Navigation::Last => total - 1,
        };

        Transition::Moved {
            cursor: self.cursor,
        }
    }

    /// Close the view. Returns `false` when it was already closed.
    pub fn close(&mut self) -> bool {
        if self.state == ViewState::Closed {
            return false;
        }
        self.state = ViewState::Closed;
        true
    }
}
