//! Static character guide data loaded once at startup.

mod character;
mod index;

pub use character::{CharacterInfo, DisplayAttributes, Element};
pub use index::{CharacterIndex, DataError};
