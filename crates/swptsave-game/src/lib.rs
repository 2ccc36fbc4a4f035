//! Save files and save-game directories.
//!
//! A [`SaveGame`] is a directory; each regular file in it that decodes is a
//! [`SaveFile`]. Nothing is written back until `save` or `save_to` is called.

pub mod error;
pub mod file;
pub mod game;

pub use error::{GameError, Result};
pub use file::SaveFile;
pub use game::SaveGame;
