use std::{sync::Arc, time::Duration};

use twilight_http::Client;
use twilight_model::id::{Id, marker::ApplicationMarker};

use noelle_data::CharacterIndex;
use noelle_utils::pagination::{DiscordSink, SessionRegistry};

/// Environment-driven startup configuration.
pub mod config;
/// Registered application command scopes.
pub mod tree;

pub use config::Config;
pub use tree::CommandTree;

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub http: Arc<Client>,
    pub application_id: Id<ApplicationMarker>,
    pub characters: Arc<CharacterIndex>,
    pub sessions: Arc<SessionRegistry<DiscordSink>>,
    pub commands: Arc<CommandTree>,
    pub owner_ids: Arc<[u64]>,
    pub page_timeout: Duration,
}

impl Context {
    /// Create a new application context with an empty session table.
    pub fn new(
        http: Arc<Client>,
        application_id: Id<ApplicationMarker>,
        characters: Arc<CharacterIndex>,
        commands: Arc<CommandTree>,
        owner_ids: Vec<u64>,
        page_timeout: Duration,
    ) -> Self {
        Self {
            http,
            application_id,
            characters,
            sessions: Arc::new(SessionRegistry::new()),
            commands,
            owner_ids: owner_ids.into(),
            page_timeout,
        }
    }

    /// Whether `user_id` may run owner-only housekeeping commands.
    pub fn is_owner(&self, user_id: u64) -> bool {
        self.owner_ids.contains(&user_id)
    }
}
