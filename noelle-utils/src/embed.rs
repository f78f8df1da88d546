use twilight_model::channel::message::embed::Embed;
use twilight_util::builder::embed::{EmbedBuilder, ImageSource};

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x90_54_30;

/// Build a titled listing embed with consistent styling.
pub fn build_listing_embed(
    title: &str,
    description: impl Into<String>,
    thumbnail_url: Option<&str>,
) -> anyhow::Result<Embed> {
    let mut builder = EmbedBuilder::new()
        .title(title)
        .color(DEFAULT_EMBED_COLOR)
        .description(description);

    if let Some(url) = thumbnail_url {
        builder = builder.thumbnail(ImageSource::url(url)?);
    }

    Ok(builder.validate()?.build())
}
