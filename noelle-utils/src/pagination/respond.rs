//! Discord-backed page sink and shared interaction response helpers.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use twilight_http::Client;
use twilight_model::{
    channel::message::{MessageFlags, component::Component, embed::Embed},
    gateway::payload::incoming::InteractionCreate,
    http::interaction::{InteractionResponse, InteractionResponseType},
    id::{
        Id,
        marker::{ApplicationMarker, ChannelMarker, InteractionMarker, MessageMarker},
    },
};
use twilight_util::builder::InteractionResponseDataBuilder;

use super::components::{PageSelect, build_page_components};
use super::sink::{DeliveryError, Frame, PageSink};
use super::view::Rejection;

/// Shown when a pagination button is pressed by someone else.
pub const PAGINATION_WRONG_USER_MESSAGE: &str = "Esta paginação pertence a outra pessoa.";
/// Shown when a pagination button outlived its session.
pub const PAGINATION_EXPIRED_MESSAGE: &str = "Esta paginação expirou. Use o comando novamente.";
/// Shown when the pressing user cannot be determined.
pub const PAGINATION_UNKNOWN_USER_MESSAGE: &str =
    "Não foi possível identificar quem usou este botão.";

/// Where a paginated message was first shown.
#[derive(Debug)]
enum PageOrigin {
    /// Reply to a slash command; closed through its interaction token.
    Interaction {
        interaction_id: Id<InteractionMarker>,
        token: String,
    },
    /// Message sent to a channel for a text command.
    Channel {
        channel_id: Id<ChannelMarker>,
        message_id: OnceLock<Id<MessageMarker>>,
    },
}

/// One page as shown on Discord: an embed plus an optional select menu.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscordPage {
    pub embed: Embed,
    pub select: Option<PageSelect>,
}

impl DiscordPage {
    pub fn new(embed: Embed) -> Self {
        Self { embed, select: None }
    }

    pub fn with_select(mut self, select: PageSelect) -> Self {
        self.select = Some(select);
        self
    }
}

fn frame_components(frame: &Frame<'_, DiscordPage>) -> Vec<Component> {
    build_page_components(
        frame.session_id,
        frame.page_label.as_deref(),
        frame.page.select.as_ref(),
    )
}

/// Page sink rendering embeds on Discord.
pub struct DiscordSink {
    http: Arc<Client>,
    application_id: Id<ApplicationMarker>,
    origin: PageOrigin,
}

impl DiscordSink {
    /// Paginate as the response to `interaction`.
    pub fn for_interaction(http: Arc<Client>, interaction: &InteractionCreate) -> Self {
        Self {
            http,
            application_id: interaction.application_id,
            origin: PageOrigin::Interaction {
                interaction_id: interaction.id,
                token: interaction.token.clone(),
            },
        }
    }

    /// Paginate in a fresh message in `channel_id`.
    pub fn for_channel(
        http: Arc<Client>,
        application_id: Id<ApplicationMarker>,
        channel_id: Id<ChannelMarker>,
    ) -> Self {
        Self {
            http,
            application_id,
            origin: PageOrigin::Channel {
                channel_id,
                message_id: OnceLock::new(),
            },
        }
    }
}

#[async_trait]
impl PageSink for DiscordSink {
    type Page = DiscordPage;
    type Event = InteractionCreate;

    async fn present(&self, frame: Frame<'_, DiscordPage>) -> Result<(), DeliveryError> {
        let components = frame_components(&frame);
        let content = frame.status.clone().unwrap_or_default();

        match &self.origin {
            PageOrigin::Interaction {
                interaction_id,
                token,
            } => {
                let response = InteractionResponse {
                    kind: InteractionResponseType::ChannelMessageWithSource,
                    data: Some(
                        InteractionResponseDataBuilder::new()
                            .content(content)
                            .embeds([frame.page.embed.clone()])
                            .components(components)
                            .build(),
                    ),
                };

                self.http
                    .interaction(self.application_id)
                    .create_response(*interaction_id, token, &response)
                    .await?;
            }
            PageOrigin::Channel {
                channel_id,
                message_id,
            } => {
                let created_message = self
                    .http
                    .create_message(*channel_id)
                    .content(&content)
                    .embeds(std::slice::from_ref(&frame.page.embed))
                    .components(&components)
                    .await?
                    .model()
                    .await?;

                // Presented once per session, so the cell is always empty here.
                let _ = message_id.set(created_message.id);
            }
        }

        Ok(())
    }

    async fn replace(
        &self,
        event: &InteractionCreate,
        frame: Frame<'_, DiscordPage>,
    ) -> Result<(), DeliveryError> {
        let components = frame_components(&frame);
        let content = frame.status.clone().unwrap_or_default();

        let response = InteractionResponse {
            kind: InteractionResponseType::UpdateMessage,
            data: Some(
                InteractionResponseDataBuilder::new()
                    .content(content)
                    .embeds([frame.page.embed.clone()])
                    .components(components)
                    .build(),
            ),
        };

        self.http
            .interaction(event.application_id)
            .create_response(event.id, &event.token, &response)
            .await?;

        Ok(())
    }

    async fn detach(&self, frame: Frame<'_, DiscordPage>) -> Result<(), DeliveryError> {
        let empty_components: [Component; 0] = [];
        let embeds = std::slice::from_ref(&frame.page.embed);

        match &self.origin {
            PageOrigin::Interaction { token, .. } => {
                self.http
                    .interaction(self.application_id)
                    .update_response(token)
                    .content(None)
                    .embeds(Some(embeds))
                    .components(Some(&empty_components))
                    .await?;
            }
            PageOrigin::Channel {
                channel_id,
                message_id,
            } => {
                let Some(message_id) = message_id.get() else {
                    return Err(DeliveryError::Unavailable(
                        "paginated message was never sent".to_owned(),
                    ));
                };

                self.http
                    .update_message(*channel_id, *message_id)
                    .content(None)
                    .embeds(Some(embeds))
                    .components(Some(&empty_components))
                    .await?;
            }
        }

        Ok(())
    }

    async fn refuse(
        &self,
        event: &InteractionCreate,
        reason: Rejection,
    ) -> Result<(), DeliveryError> {
        match reason {
            Rejection::Unauthorized => respond_wrong_user(&self.http, event).await,
            Rejection::Closed => respond_expired(&self.http, event).await,
            Rejection::Static => defer_component_update(&self.http, event).await,
        }
    }
}

/// Respond to a component interaction with an ephemeral message.
pub async fn respond_ephemeral_message(
    http: &Client,
    interaction: &InteractionCreate,
    content: &str,
) -> Result<(), DeliveryError> {
    let response = InteractionResponse {
        kind: InteractionResponseType::ChannelMessageWithSource,
        data: Some(
            InteractionResponseDataBuilder::new()
                .content(content)
                .flags(MessageFlags::EPHEMERAL)
                .build(),
        ),
    };

    http.interaction(interaction.application_id)
        .create_response(interaction.id, &interaction.token, &response)
        .await?;

    Ok(())
}

/// Respond with the standard wrong-owner pagination message.
pub async fn respond_wrong_user(
    http: &Client,
    interaction: &InteractionCreate,
) -> Result<(), DeliveryError> {
    respond_ephemeral_message(http, interaction, PAGINATION_WRONG_USER_MESSAGE).await
}

/// Respond with the standard expired pagination message.
pub async fn respond_expired(
    http: &Client,
    interaction: &InteractionCreate,
) -> Result<(), DeliveryError> {
    respond_ephemeral_message(http, interaction, PAGINATION_EXPIRED_MESSAGE).await
}

/// Acknowledge a component press without changing the message.
pub async fn defer_component_update(
    http: &Client,
    interaction: &InteractionCreate,
) -> Result<(), DeliveryError> {
    let response = InteractionResponse {
        kind: InteractionResponseType::DeferredUpdateMessage,
        data: None,
    };

    http.interaction(interaction.application_id)
        .create_response(interaction.id, &interaction.token, &response)
        .await?;

    Ok(())
}
