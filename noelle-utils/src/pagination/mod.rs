//! Stable facade for pagination helpers used by command handlers.

/// Default lifetime of a paginated message, counted from when it was sent.
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

mod components;
pub mod interaction;
mod page;
mod registry;
pub mod respond;
mod session;
mod sink;
#[cfg(test)]
mod testing;
pub mod token;
mod view;

pub use components::{MAX_SELECT_OPTIONS, PageSelect};
pub use interaction::{PaginationOutcome, handle_pagination_interaction};
pub use page::{chunk_pages, page_window, total_pages};
pub use registry::SessionRegistry;
pub use respond::{DiscordPage, DiscordSink};
pub use session::PageSession;
pub use sink::{DeliveryError, Frame, PageSink};
pub use view::{Navigation, PageView, PaginationError, Rejection, Transition, ViewState};
