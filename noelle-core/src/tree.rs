use std::collections::HashMap;

use tokio::sync::RwLock;
use twilight_model::{
    application::command::Command,
    id::{Id, marker::GuildMarker},
};

/// The bot's application commands, globally and per guild.
///
/// Guild scopes start empty; owners fill them by copying the global set and
/// push them to Discord with `!sync`. Copies live in memory only.
#[derive(Debug)]
pub struct CommandTree {
    global: Vec<Command>,
    guilds: RwLock<HashMap<Id<GuildMarker>, Vec<Command>>>,
}

impl CommandTree {
    pub fn new(global: Vec<Command>) -> Self {
        Self {
            global,
            guilds: RwLock::new(HashMap::new()),
        }
    }

    pub fn global(&self) -> &[Command] {
        &self.global
    }

    /// Commands scoped to `guild_id`.
    pub async fn guild(&self, guild_id: Id<GuildMarker>) -> Vec<Command> {
        self.guilds
            .read()
            .await
            .get(&guild_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn copy_global_to(&self, guild_id: Id<GuildMarker>) {
        self.guilds
            .write()
            .await
            .insert(guild_id, self.global.clone());
    }

    pub async fn clear(&self, guild_id: Id<GuildMarker>) {
        self.guilds.write().await.remove(&guild_id);
    }
}
