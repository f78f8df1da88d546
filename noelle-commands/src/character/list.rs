use std::{sync::Arc, time::Duration};

use twilight_model::gateway::payload::incoming::{InteractionCreate, MessageCreate};

use crate::CommandMeta;
use crate::character::build::respond_with_guide;
use crate::character::embeds::{build_list_pages, empty_list_message, not_found_message};
use noelle_core::Context;
use noelle_data::CharacterIndex;
use noelle_utils::pagination::{DiscordPage, DiscordSink, PageView, respond::respond_ephemeral_message};

pub const META: CommandMeta = CommandMeta {
    name: "list",
    desc: "Veja a lista dos personagens que já têm guia.",
};

/// Paginated view over every guide name, or `None` when there are no guides.
pub fn build_list_view(
    characters: &CharacterIndex,
    owner_user_id: u64,
    timeout: Duration,
) -> anyhow::Result<Option<PageView<DiscordPage>>> {
    if characters.is_empty() {
        return Ok(None);
    }

    let names: Vec<&str> = characters.names().collect();
    let pages = build_list_pages(&names)?;

    Ok(Some(PageView::new(pages, owner_user_id, timeout)?))
}

/// Paginate the guide list for `!list`.
pub async fn run(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    let Some(view) = build_list_view(&ctx.characters, msg.author.id.get(), ctx.page_timeout)?
    else {
        ctx.http
            .create_message(msg.channel_id)
            .content(empty_list_message())
            .await?;
        return Ok(());
    };

    let sink = DiscordSink::for_channel(Arc::clone(&ctx.http), ctx.application_id, msg.channel_id);
    ctx.sessions.open(view, sink).await?;

    Ok(())
}

/// Paginate the guide list for `/list`.
pub async fn run_slash(ctx: &Context, interaction: &InteractionCreate) -> anyhow::Result<()> {
    let Some(owner_user_id) = interaction.author_id().map(|id| id.get()) else {
        return Ok(());
    };

    let Some(view) = build_list_view(&ctx.characters, owner_user_id, ctx.page_timeout)? else {
        respond_ephemeral_message(&ctx.http, interaction, empty_list_message()).await?;
        return Ok(());
    };

    let sink = DiscordSink::for_interaction(Arc::clone(&ctx.http), interaction);
    ctx.sessions.open(view, sink).await?;

    Ok(())
}

/// Send the guide picked from a list page's select menu.
pub async fn answer_pick(
    ctx: &Context,
    interaction: &InteractionCreate,
    name: &str,
) -> anyhow::Result<()> {
    match ctx.characters.get(name) {
        Some(character) => respond_with_guide(ctx, interaction, character).await,
        None => {
            respond_ephemeral_message(&ctx.http, interaction, &not_found_message(name)).await?;
            Ok(())
        }
    }
}
