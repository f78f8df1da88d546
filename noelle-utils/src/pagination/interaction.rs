//! Routing of raw pagination component presses to their sessions.

use twilight_http::Client;
use twilight_model::{
    application::interaction::{InteractionData, message_component::MessageComponentInteractionData},
    gateway::payload::incoming::InteractionCreate,
};

use super::registry::SessionRegistry;
use super::respond::{
    DiscordSink, PAGINATION_UNKNOWN_USER_MESSAGE, defer_component_update, respond_ephemeral_message,
    respond_expired,
};
use super::token::{ComponentAction, parse_custom_id};

/// What became of a component interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationOutcome {
    /// Not a pagination component; nothing was sent.
    Ignored,
    /// Fully answered here.
    Handled,
    /// The session owner picked `value` from the page's select menu. The
    /// caller still has to answer the interaction.
    Picked(String),
}

fn component_data(interaction: &InteractionCreate) -> Option<&MessageComponentInteractionData> {
    match interaction.data.as_ref() {
        Some(InteractionData::MessageComponent(data)) => Some(data.as_ref()),
        _ => None,
    }
}

fn picked_value(data: &MessageComponentInteractionData) -> Option<&str> {
    data.values.first().map(String::as_str)
}

/// Handle a pagination button press or select-menu pick.
pub async fn handle_pagination_interaction(
    http: &Client,
    sessions: &SessionRegistry<DiscordSink>,
    interaction: &InteractionCreate,
) -> anyhow::Result<PaginationOutcome> {
    let Some(data) = component_data(interaction) else {
        return Ok(PaginationOutcome::Ignored);
    };
    let Some(token) = parse_custom_id(&data.custom_id) else {
        return Ok(PaginationOutcome::Ignored);
    };

    if token.action == ComponentAction::Indicator {
        defer_component_update(http, interaction).await?;
        return Ok(PaginationOutcome::Handled);
    }

    let Some(actor_user_id) = interaction.author_id().map(|id| id.get()) else {
        respond_ephemeral_message(http, interaction, PAGINATION_UNKNOWN_USER_MESSAGE).await?;
        return Ok(PaginationOutcome::Handled);
    };

    match token.action {
        ComponentAction::Navigate(navigation) => {
            let transition = sessions
                .dispatch(token.session_id, actor_user_id, navigation, interaction)
                .await?;
            if transition.is_none() {
                respond_expired(http, interaction).await?;
            }
            Ok(PaginationOutcome::Handled)
        }
        ComponentAction::Pick => {
            let Some(value) = picked_value(data) else {
                defer_component_update(http, interaction).await?;
                return Ok(PaginationOutcome::Handled);
            };

            match sessions.select(token.session_id, actor_user_id, interaction).await? {
                Some(true) => Ok(PaginationOutcome::Picked(value.to_owned())),
                Some(false) => Ok(PaginationOutcome::Handled),
                None => {
                    respond_expired(http, interaction).await?;
                    Ok(PaginationOutcome::Handled)
                }
            }
        }
        ComponentAction::Indicator => Ok(PaginationOutcome::Handled),
    }
}
