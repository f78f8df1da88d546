use std::sync::Arc;

use anyhow::Context as _;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client;
use twilight_model::gateway::event::Event;

use rustls::crypto::ring::default_provider;

use noelle_commands::{application_commands, handle_interaction, handle_message};
use noelle_core::{CommandTree, Config, Context};
use noelle_data::CharacterIndex;

const DEFAULT_LOG_FILTER: &str = "info,twilight_gateway=warn,twilight_http=warn";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    // Guides are loaded once; a bad data file is fatal
    let characters = CharacterIndex::load(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;

    // Create a single shared HTTP Client
    let http = Arc::new(Client::new(config.token.clone()));

    let application = http.current_user_application().await?.model().await?;
    let mut owner_ids = config.owner_ids.clone();
    if let Some(owner) = application.owner.as_ref()
        && !owner_ids.contains(&owner.id.get())
    {
        owner_ids.push(owner.id.get());
    }

    let commands = CommandTree::new(application_commands()?);
    let ctx = Context::new(
        Arc::clone(&http),
        application.id,
        Arc::new(characters),
        Arc::new(commands),
        owner_ids,
        config.page_timeout,
    );

    let intents = Intents::GUILDS | Intents::GUILD_MESSAGES | Intents::MESSAGE_CONTENT;
    let mut shard = Shard::new(ShardId::new(0, 1), config.token, intents);

    info!("Noelle is connecting...");

    let events = EventTypeFlags::READY
        | EventTypeFlags::MESSAGE_CREATE
        | EventTypeFlags::INTERACTION_CREATE;

    while let Some(item) = shard.next_event(events).await {
        let event = match item {
            Ok(event) => event,
            Err(source) => {
                error!(?source, "gateway event stream error");
                continue;
            }
        };

        match event {
            Event::Ready(ready) => {
                info!(user = %ready.user.name, guilds = ready.guilds.len(), "Noelle is ready");
            }
            Event::MessageCreate(msg) => {
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    if let Err(source) = handle_message(ctx, msg).await {
                        error!(?source, "message handler failed");
                    }
                });
            }
            Event::InteractionCreate(interaction) => {
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    if let Err(source) = handle_interaction(ctx, interaction).await {
                        error!(?source, "interaction handler failed");
                    }
                });
            }
            _ => {}
        }
    }

    Ok(())
}
