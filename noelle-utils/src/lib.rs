/// Generic embed builders shared across commands.
pub mod embed;
/// Fuzzy name resolution for free-text lookups.
pub mod fuzzy;
/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: char = '!';
/// Interactive pagination sessions and their Discord rendering.
pub mod pagination;
