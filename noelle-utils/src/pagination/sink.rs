//! Output seam between a paginated session and whatever displays it.

use async_trait::async_trait;
use thiserror::Error;

use super::view::Rejection;

/// A page failed to reach the user.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error(transparent)]
    Http(#[from] twilight_http::Error),
    #[error(transparent)]
    Body(#[from] twilight_http::response::DeserializeBodyError),
    #[error("page sink unavailable: {0}")]
    Unavailable(String),
}

/// One render of a session: the current page plus its surroundings.
#[derive(Debug)]
pub struct Frame<'a, P> {
    pub page: &'a P,
    /// Message content above the page (the expiry notice).
    pub status: Option<String>,
    /// Session the render's components route back to; `None` once closed.
    pub session_id: Option<u64>,
    /// Page indicator, e.g. `2/5`. Navigation buttons are drawn only with it.
    pub page_label: Option<String>,
}

/// Destination for the renders of a paginated session.
///
/// `Event` is whatever the transport hands over when a button is pressed;
/// replies to that press go through it.
#[async_trait]
pub trait PageSink: Send + Sync + 'static {
    type Page: Send + Sync + 'static;
    type Event: Send + Sync;

    /// Show the first render.
    async fn present(&self, frame: Frame<'_, Self::Page>) -> Result<(), DeliveryError>;

    /// Answer a navigation event with a new render.
    async fn replace(
        &self,
        event: &Self::Event,
        frame: Frame<'_, Self::Page>,
    ) -> Result<(), DeliveryError>;

    /// Final render after the session closed, without controls.
    async fn detach(&self, frame: Frame<'_, Self::Page>) -> Result<(), DeliveryError>;

    /// Acknowledge an event that did not change anything.
    async fn refuse(&self, event: &Self::Event, reason: Rejection) -> Result<(), DeliveryError>;
}
