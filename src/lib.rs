#![warn(clippy::pedantic)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
)]

pub mod cursor;
pub mod encodings;
pub mod error;
pub mod player;
pub mod resources;
pub mod types;

pub use crate::cursor::{Count, Cursor};
pub use crate::error::{Error, Result};
pub use crate::player::{AnimationKind, AnimationRenderer, SpriteHandle};
pub use crate::resources::Animation;

#[must_use]
pub fn name(with_version: bool) -> String {
    let mut name = "Anemone".to_string();
    if with_version {
        name.push(' ');
        name.push_str(version());
    }
    name
}

#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
