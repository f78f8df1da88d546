use twilight_model::{
    application::{
        command::{CommandOptionChoice, CommandOptionChoiceValue},
        interaction::application_command::CommandData,
    },
    gateway::payload::incoming::{InteractionCreate, MessageCreate},
    http::interaction::{InteractionResponse, InteractionResponseType},
};
use twilight_util::builder::InteractionResponseDataBuilder;

use crate::character::embeds::{build_character_guide, not_found_message};
use crate::{CommandMeta, string_option};
use noelle_core::Context;
use noelle_data::{CharacterIndex, CharacterInfo};
use noelle_utils::fuzzy::DEFAULT_SUGGESTION_LIMIT;
use noelle_utils::pagination::respond::respond_ephemeral_message;

pub const META: CommandMeta = CommandMeta {
    name: "build",
    desc: "Encontre um guia de build para um personagem.",
};

const USAGE: &str = "Uso: `!build <personagem>` ou `/build <personagem>`";

/// Name of the slash-command option holding the character name.
pub const CHARACTER_OPTION: &str = "personagem";

/// Resolve free text to a guide, or the message to show instead.
pub fn lookup<'a>(characters: &'a CharacterIndex, query: &str) -> Result<&'a CharacterInfo, String> {
    let name = characters
        .resolve(query)
        .map_err(|_| not_found_message(query))?;

    characters.get(name).ok_or_else(|| not_found_message(name))
}

/// Autocomplete choices for the partially typed `query`.
pub fn autocomplete_choices(characters: &CharacterIndex, query: &str) -> Vec<CommandOptionChoice> {
    characters
        .suggest(query, DEFAULT_SUGGESTION_LIMIT)
        .into_iter()
        .map(|(name, _score)| CommandOptionChoice {
            name: name.to_owned(),
            name_localizations: None,
            value: CommandOptionChoiceValue::String(name.to_owned()),
        })
        .collect()
}

/// Send a character guide for `!build <personagem>`.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, query: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;
    let Some(query) = query else {
        http.create_message(msg.channel_id).content(USAGE).await?;
        return Ok(());
    };

    match lookup(&ctx.characters, query) {
        Ok(character) => {
            let embed = build_character_guide(character)?;
            http.create_message(msg.channel_id)
                .embeds(&[embed])
                .await?;
        }
        Err(out) => {
            http.create_message(msg.channel_id).content(&out).await?;
        }
    }

    Ok(())
}

/// Answer `/build`.
pub async fn run_slash(
    ctx: &Context,
    interaction: &InteractionCreate,
    data: &CommandData,
) -> anyhow::Result<()> {
    let query = string_option(data, CHARACTER_OPTION).unwrap_or_default();

    match lookup(&ctx.characters, query) {
        Ok(character) => respond_with_guide(ctx, interaction, character).await,
        Err(out) => {
            respond_ephemeral_message(&ctx.http, interaction, &out).await?;
            Ok(())
        }
    }
}

/// Answer `interaction` with the guide card of `character`.
pub(crate) async fn respond_with_guide(
    ctx: &Context,
    interaction: &InteractionCreate,
    character: &CharacterInfo,
) -> anyhow::Result<()> {
    let response = InteractionResponse {
        kind: InteractionResponseType::ChannelMessageWithSource,
        data: Some(
            InteractionResponseDataBuilder::new()
                .embeds([build_character_guide(character)?])
                .build(),
        ),
    };

    ctx.http
        .interaction(interaction.application_id)
        .create_response(interaction.id, &interaction.token, &response)
        .await?;

    Ok(())
}

/// Answer `/build` autocomplete with the closest guide names.
pub async fn autocomplete(
    ctx: &Context,
    interaction: &InteractionCreate,
    data: &CommandData,
) -> anyhow::Result<()> {
    let query = string_option(data, CHARACTER_OPTION).unwrap_or_default();

    let response = InteractionResponse {
        kind: InteractionResponseType::ApplicationCommandAutocompleteResult,
        data: Some(
            InteractionResponseDataBuilder::new()
                .choices(autocomplete_choices(&ctx.characters, query))
                .build(),
        ),
    };

    ctx.http
        .interaction(interaction.application_id)
        .create_response(interaction.id, &interaction.token, &response)
        .await?;

    Ok(())
}
