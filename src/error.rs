use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything decoding and rendering can fail with, as tagged variants.
///
/// Decoder errors abort the decode and surface intact. Walker errors abort
/// the current render pass only; the walker mutates nothing but its own
/// canvas and frame reader, so the renderer stays usable.
#[derive(Debug, Error)]
pub enum Error {
    #[error("input truncated at byte {pos}: needed {needed} more bytes")]
    TruncatedInput { pos: usize, needed: usize },

    #[error("string at byte {pos} has no terminator")]
    UnterminatedString { pos: usize },

    #[error("unknown {what} tag {tag} at byte {pos}")]
    UnknownTag {
        what: &'static str,
        tag: i64,
        pos: usize,
    },

    #[error("animation declares no atlas texture")]
    MissingTexture,

    #[error("id {id} does not resolve to a sprite or shape")]
    UnresolvedId { id: i16 },

    #[error("unrecognised or missing frame opcode at stream position {pos}")]
    MissingTransform { pos: usize },

    #[error("frame stream addresses out-of-range data (offset {offset})")]
    InvalidOffset { offset: i64 },

    #[error("no sprite name matches a static sprite pattern")]
    NoStaticSprite,

    #[error("video encoder failed: {detail}")]
    EncoderFailure { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}
