use twilight_model::gateway::payload::incoming::MessageCreate;

use noelle_core::Context;

/// Owner-only liveness check, ignored outside guilds.
pub async fn run(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.guild_id.is_none() || !ctx.is_owner(msg.author.id.get()) {
        return Ok(());
    }

    let http = &ctx.http;
    http.create_message(msg.channel_id)
        .content("Test complete!!! :)")
        .await?;

    Ok(())
}
