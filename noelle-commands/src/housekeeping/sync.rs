use tracing::{info, warn};
use twilight_model::{
    application::command::Command,
    gateway::payload::incoming::MessageCreate,
    id::{Id, marker::GuildMarker},
};

use noelle_core::Context;

const USAGE: &str = "!sync [~|*|^|$|guild ids...]";

/// Which command scope `!sync` pushes to Discord.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncTarget {
    /// No argument: push the global commands.
    Global,
    /// `~`: push the current guild's scope.
    CurrentGuild,
    /// `*`: copy the global commands into the current guild, then push it.
    CopyGlobalToCurrentGuild,
    /// `^`: clear the current guild's scope, then push it.
    ClearCurrentGuild,
    /// `$`: remove every global command.
    ClearGlobal,
    /// Guild IDs: push each listed guild's scope.
    Guilds(Vec<Id<GuildMarker>>),
}

/// Parse the argument tail of `!sync`.
pub fn parse_sync_args(rest: Option<&str>) -> Option<SyncTarget> {
    let args: Vec<&str> = rest.unwrap_or_default().split_whitespace().collect();

    match args.as_slice() {
        [] => Some(SyncTarget::Global),
        ["~"] => Some(SyncTarget::CurrentGuild),
        ["*"] => Some(SyncTarget::CopyGlobalToCurrentGuild),
        ["^"] => Some(SyncTarget::ClearCurrentGuild),
        ["$"] => Some(SyncTarget::ClearGlobal),
        ids => ids
            .iter()
            .map(|raw| raw.parse::<u64>().ok().and_then(Id::new_checked))
            .collect::<Option<Vec<_>>>()
            .map(SyncTarget::Guilds),
    }
}

/// Summary posted after a scope sync.
pub fn sync_summary(synced: usize, target: &SyncTarget) -> String {
    match target {
        SyncTarget::Global | SyncTarget::ClearGlobal => {
            format!("Synced {synced} commands globally.")
        }
        SyncTarget::Guilds(guilds) => format!("Synced the tree to {synced}/{}.", guilds.len()),
        _ => format!("Synced {synced} commands to the current guild."),
    }
}

/// Register application commands with Discord.
///
/// Guild-only and owner-only; anyone else is ignored.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, rest: Option<&str>) -> anyhow::Result<()> {
    let Some(guild_id) = msg.guild_id else {
        return Ok(());
    };
    if !ctx.is_owner(msg.author.id.get()) {
        return Ok(());
    }

    let http = &ctx.http;
    let Some(target) = parse_sync_args(rest) else {
        let usage = format!("Usage: `{USAGE}`");
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let interaction = http.interaction(ctx.application_id);
    let no_commands: [Command; 0] = [];

    let synced = match &target {
        SyncTarget::Global => interaction
            .set_global_commands(ctx.commands.global())
            .await?
            .models()
            .await?
            .len(),
        SyncTarget::ClearGlobal => {
            interaction.set_global_commands(&no_commands).await?;
            0
        }
        SyncTarget::CurrentGuild
        | SyncTarget::CopyGlobalToCurrentGuild
        | SyncTarget::ClearCurrentGuild => {
            match &target {
                SyncTarget::CopyGlobalToCurrentGuild => ctx.commands.copy_global_to(guild_id).await,
                SyncTarget::ClearCurrentGuild => ctx.commands.clear(guild_id).await,
                _ => {}
            }

            let scoped = ctx.commands.guild(guild_id).await;
            interaction
                .set_guild_commands(guild_id, &scoped)
                .await?
                .models()
                .await?
                .len()
        }
        SyncTarget::Guilds(guilds) => {
            let mut synced_guilds = 0;
            for guild in guilds {
                let scoped = ctx.commands.guild(*guild).await;
                match interaction.set_guild_commands(*guild, &scoped).await {
                    Ok(_) => synced_guilds += 1,
                    Err(source) => warn!(guild_id = guild.get(), ?source, "guild command sync failed"),
                }
            }
            synced_guilds
        }
    };

    info!(?target, synced, "application commands synced");

    let out = sync_summary(synced, &target);
    http.create_message(msg.channel_id).content(&out).await?;

    Ok(())
}
