pub mod build;
pub mod embeds;
pub mod list;
