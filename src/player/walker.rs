use std::convert::TryFrom;

use super::frame::FrameReader;
use super::sink::BlitSink;
use super::AnimationRenderer;
use crate::error::{Error, Result};
use crate::resources::sprite::frames_mult;
use crate::resources::{Payload, Sprite};
use crate::types::SpriteTransform;

/// Which renderers a walk may resolve ids against: the one being walked
/// and, one level up at most, its parent.
#[derive(Clone, Copy)]
pub(crate) struct Scope<'a> {
    pub(crate) current: &'a AnimationRenderer,
    pub(crate) parent: Option<&'a AnimationRenderer>,
}

/// Walks one sprite for one frame, feeding every shape reached to the
/// sink. The frame reader is consumed strictly in child order, so the
/// walk is single-threaded by construction.
pub(crate) fn render_sprite<S: BlitSink>(
    scope: Scope<'_>,
    sink: &mut S,
    sprite: &Sprite,
    parent_transform: &SpriteTransform,
    frame: usize,
) -> Result<()> {
    let mut reader = FrameReader::new(&sprite.frame_data, scope.current.animation().transforms());
    match &sprite.payload {
        Payload::Single { sprite_id, .. } | Payload::SingleNoAction { sprite_id } => {
            render_by_id(scope, sink, *sprite_id, parent_transform, &mut reader, frame)
        }
        Payload::SingleFrame { sprite_ids, .. } => {
            // The reader is shared: every child consumes one opcode.
            for id in sprite_ids {
                render_by_id(scope, sink, *id, parent_transform, &mut reader, frame)?;
            }
            Ok(())
        }
        Payload::Frames { frame_pos, sprite_info, action_info } => {
            let mult = frames_mult(action_info);
            let frame_count = frame_pos.len() / mult;
            if frame_count == 0 {
                return Ok(());
            }
            let at = (frame % frame_count) * mult;
            let offset = stream_index(frame_pos[at])?;
            let run = stream_index(frame_pos[at + 1])?;
            reader.seek(offset);

            let count = sprite_info
                .get(run)
                .copied()
                .ok_or(Error::InvalidOffset { offset: run as i64 })?;
            let count = stream_index(i32::from(count))?;
            let ids = sprite_info
                .get(run + 1..run + 1 + count)
                .ok_or(Error::InvalidOffset { offset: run as i64 })?;
            for id in ids {
                render_by_id(scope, sink, *id, parent_transform, &mut reader, frame)?;
            }
            Ok(())
        }
    }
}

fn stream_index(value: i32) -> Result<usize> {
    usize::try_from(value).map_err(|_| Error::InvalidOffset { offset: i64::from(value) })
}

/// Reads the next child transform off the shared reader, then resolves
/// `id` against the current animation's sprites, the parent animation's
/// sprites, and finally the current animation's shapes.
fn render_by_id<S: BlitSink>(
    scope: Scope<'_>,
    sink: &mut S,
    id: i16,
    parent_transform: &SpriteTransform,
    reader: &mut FrameReader<'_>,
    frame: usize,
) -> Result<()> {
    let child = reader.read()?;
    let transform = child.combine(parent_transform);

    if let Some(sprite) = scope.current.animation().sprite(id) {
        return render_sprite(scope, sink, sprite, &transform, frame);
    }
    if let Some(parent) = scope.parent {
        if let Some(sprite) = parent.animation().sprite(id) {
            // Resolution never ascends more than one level.
            let scope = Scope { current: parent, parent: None };
            return render_sprite(scope, sink, sprite, &transform, frame);
        }
    }
    if let Some(shape) = scope.current.animation().shape(id) {
        return sink.draw_shape(shape, &transform, scope.current.texture());
    }
    Err(Error::UnresolvedId { id })
}
