//! Read, edit and write SWPT save games.
//!
//! A save game is a directory of binary files, each an ordered list of
//! named, typed properties. The format must be reproduced byte for byte,
//! so every layer here round-trips exactly.
//!
//! # Crate Structure
//!
//! - [`types`]: value kinds, type IDs and the value model
//! - [`frame`]: the property wire format and stream reader/writer
//! - [`game`]: save files and save-game directories

/// Re-export value model types.
pub mod types {
    pub use swptsave_types::*;
}

/// Re-export property framing types.
pub mod frame {
    pub use swptsave_frame::*;
}

/// Re-export save file and save game types.
pub mod game {
    pub use swptsave_game::*;
}

pub use swptsave_frame::Property;
pub use swptsave_game::{SaveFile, SaveGame};
pub use swptsave_types::{Value, ValueKind};
