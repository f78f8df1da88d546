pub mod character;
pub mod housekeeping;

use twilight_model::{
    application::{
        command::{Command, CommandType},
        interaction::{
            InteractionData, InteractionType,
            application_command::{CommandData, CommandOptionValue},
        },
    },
    gateway::payload::incoming::{InteractionCreate, MessageCreate},
};
use tracing::debug;
use twilight_util::builder::command::{CommandBuilder, StringBuilder};

use noelle_core::Context;
use noelle_utils::COMMAND_PREFIX;
use noelle_utils::pagination::{
    PaginationOutcome, handle_pagination_interaction, respond::defer_component_update,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InteractionRoute {
    Build,
    BuildAutocomplete,
    List,
    Pagination,
}

fn route_interaction(kind: InteractionType, command_name: Option<&str>) -> Option<InteractionRoute> {
    match (kind, command_name) {
        (InteractionType::MessageComponent, _) => Some(InteractionRoute::Pagination),
        (InteractionType::ApplicationCommand, Some("build")) => Some(InteractionRoute::Build),
        (InteractionType::ApplicationCommand, Some("list")) => Some(InteractionRoute::List),
        (InteractionType::ApplicationCommandAutocomplete, Some("build")) => {
            Some(InteractionRoute::BuildAutocomplete)
        }
        _ => None,
    }
}

/// What is still owed to Discord after the paginator saw a component press.
#[derive(Debug, PartialEq, Eq)]
enum ComponentFollowUp<'a> {
    Nothing,
    /// Not a paginator component; acknowledge it so the client stops waiting.
    Acknowledge,
    ShowGuide(&'a str),
}

fn component_follow_up(outcome: &PaginationOutcome) -> ComponentFollowUp<'_> {
    match outcome {
        PaginationOutcome::Handled => ComponentFollowUp::Nothing,
        PaginationOutcome::Ignored => ComponentFollowUp::Acknowledge,
        PaginationOutcome::Picked(name) => ComponentFollowUp::ShowGuide(name),
    }
}

// Slash command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
}

/// Slash commands registered by `!sync`.
pub fn application_commands() -> anyhow::Result<Vec<Command>> {
    let build = CommandBuilder::new(
        character::build::META.name,
        character::build::META.desc,
        CommandType::ChatInput,
    )
    .option(
        StringBuilder::new(
            character::build::CHARACTER_OPTION,
            "O nome do personagem que você quer.",
        )
        .required(true)
        .autocomplete(true),
    )
    .validate()?
    .build();

    let list = CommandBuilder::new(
        character::list::META.name,
        character::list::META.desc,
        CommandType::ChatInput,
    )
    .validate()?
    .build();

    Ok(vec![build, list])
}

/// Value of the string option `name`, including a partially typed one.
pub(crate) fn string_option<'a>(data: &'a CommandData, name: &str) -> Option<&'a str> {
    data.options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| match &option.value {
            CommandOptionValue::String(value) | CommandOptionValue::Focused(value, _) => {
                Some(value.as_str())
            }
            _ => None,
        })
}

pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    let content_owned = msg.content.clone();
    let content = content_owned.trim();

    let Some(content) = content.strip_prefix(COMMAND_PREFIX) else {
        return Ok(());
    };

    let mut command_and_rest = content.trim().splitn(2, char::is_whitespace);
    let cmd = command_and_rest.next().unwrap_or("").to_ascii_lowercase();
    let rest = command_and_rest
        .next()
        .map(str::trim)
        .filter(|value| !value.is_empty());

    match cmd.as_str() {
        "build" => character::build::run(ctx.clone(), msg, rest).await?,
        "list" => character::list::run(ctx.clone(), msg).await?,
        "sync" => housekeeping::sync::run(ctx.clone(), msg, rest).await?,
        "test" => housekeeping::selftest::run(ctx.clone(), msg).await?,
        _ => {}
    }

    Ok(())
}

pub async fn handle_interaction(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<()> {
    let command = match interaction.data.as_ref() {
        Some(InteractionData::ApplicationCommand(data)) => Some(data.as_ref()),
        _ => None,
    };

    let Some(route) = route_interaction(interaction.kind, command.map(|data| data.name.as_str()))
    else {
        return Ok(());
    };

    match (route, command) {
        (InteractionRoute::Pagination, _) => {
            let outcome =
                handle_pagination_interaction(&ctx.http, &ctx.sessions, &interaction).await?;

            match component_follow_up(&outcome) {
                ComponentFollowUp::Nothing => {}
                ComponentFollowUp::Acknowledge => {
                    debug!(interaction_id = interaction.id.get(), "unrouted component interaction");
                    defer_component_update(&ctx.http, &interaction).await?;
                }
                ComponentFollowUp::ShowGuide(name) => {
                    character::list::answer_pick(&ctx, &interaction, name).await?;
                }
            }
        }
        (InteractionRoute::Build, Some(data)) => {
            character::build::run_slash(&ctx, &interaction, data).await?;
        }
        (InteractionRoute::BuildAutocomplete, Some(data)) => {
            character::build::autocomplete(&ctx, &interaction, data).await?;
        }
        (InteractionRoute::List, _) => {
            character::list::run_slash(&ctx, &interaction).await?;
        }
        _ => {}
    }

    Ok(())
}
