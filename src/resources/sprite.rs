use bitflags::bitflags;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive as _;

use crate::cursor::{Count, Cursor};
use crate::error::{Error, Result};

bitflags! {
    /// Sprite record flag byte.
    pub struct SpriteFlags: u8 {
        const HAS_NAME = 0x40;
    }
}

/// Payload selector stored as the sprite's leading tag byte.
#[derive(Clone, Copy, Debug, Eq, FromPrimitive, PartialEq)]
enum PayloadKind {
    Single = 1,
    SingleNoAction,
    SingleFrame,
    Frames,
}

/// What a sprite draws each frame.
#[derive(Clone, Debug)]
pub enum Payload {
    /// One sub-sprite plus an action table.
    Single { sprite_id: i16, action_info: Vec<i16> },
    /// One sub-sprite, no actions.
    SingleNoAction { sprite_id: i16 },
    /// Several sub-sprites drawn in order within every frame.
    SingleFrame { sprite_ids: Vec<i16>, action_info: Vec<i16> },
    /// A frame-indexed table of sub-sprite runs. `frame_pos` holds
    /// (stream offset, run index[, action]) tuples per frame; `sprite_info`
    /// holds run-length-prefixed id runs.
    Frames {
        frame_pos: Vec<i32>,
        sprite_info: Vec<i16>,
        action_info: Vec<i16>,
    },
}

impl Payload {
    fn read(input: &mut Cursor<'_>, kind: PayloadKind) -> Result<Self> {
        Ok(match kind {
            PayloadKind::Single => Payload::Single {
                sprite_id: input.read_i16()?,
                action_info: input.read_array(Count::U16, Cursor::read_i16)?,
            },
            PayloadKind::SingleNoAction => Payload::SingleNoAction {
                sprite_id: input.read_i16()?,
            },
            PayloadKind::SingleFrame => Payload::SingleFrame {
                sprite_ids: input.read_array(Count::U16, Cursor::read_i16)?,
                action_info: input.read_array(Count::U16, Cursor::read_i16)?,
            },
            PayloadKind::Frames => Payload::Frames {
                frame_pos: input.read_array(Count::U16, Cursor::read_i32)?,
                sprite_info: input.read_array(Count::U16, Cursor::read_i16)?,
                action_info: input.read_array(Count::U16, Cursor::read_i16)?,
            },
        })
    }
}

/// Width selector of a packed frame-opcode buffer.
#[derive(Clone, Copy, Debug, Eq, FromPrimitive, PartialEq)]
enum FrameDataKind {
    Bytes = 1,
    Shorts = 2,
    Ints = 4,
}

/// Packed frame opcodes; the stored tag selects the integer width.
#[derive(Clone, Debug)]
pub enum FrameData {
    Bytes(Vec<u8>),
    Shorts(Vec<u16>),
    Ints(Vec<u32>),
}

impl FrameData {
    fn read(input: &mut Cursor<'_>) -> Result<Self> {
        let pos = input.pos();
        let tag = input.read_u8()?;
        let kind = FrameDataKind::from_u8(tag).ok_or(Error::UnknownTag {
            what: "frame data",
            tag: i64::from(tag),
            pos,
        })?;
        Ok(match kind {
            FrameDataKind::Bytes => FrameData::Bytes(input.read_array(Count::U32, Cursor::read_u8)?),
            FrameDataKind::Shorts => {
                FrameData::Shorts(input.read_array(Count::U32, Cursor::read_u16)?)
            }
            FrameDataKind::Ints => FrameData::Ints(input.read_array(Count::U32, Cursor::read_u32)?),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            FrameData::Bytes(data) => data.len(),
            FrameData::Shorts(data) => data.len(),
            FrameData::Ints(data) => data.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The opcode integer at `pos`, widened.
    #[must_use]
    pub fn get(&self, pos: usize) -> Option<u32> {
        match self {
            FrameData::Bytes(data) => data.get(pos).copied().map(u32::from),
            FrameData::Shorts(data) => data.get(pos).copied().map(u32::from),
            FrameData::Ints(data) => data.get(pos).copied(),
        }
    }
}

/// A named, tagged record whose payload references shapes or other
/// sprites by id and whose frame data encodes per-child transforms.
#[derive(Clone, Debug)]
pub struct Sprite {
    pub id: i16,
    pub flags: SpriteFlags,
    pub name: Option<String>,
    pub name_crc: i32,
    pub base_name_crc: i32,
    pub payload: Payload,
    pub frame_data: FrameData,
}

impl Sprite {
    pub(crate) fn read(input: &mut Cursor<'_>) -> Result<Self> {
        let tag_pos = input.pos();
        let tag = input.read_i8()?;
        let id = input.read_i16()?;
        let flags = SpriteFlags::from_bits_truncate(input.read_u8()?);
        let name = input.read_if(flags.contains(SpriteFlags::HAS_NAME), Cursor::read_string)?;
        let name_crc = input.read_i32()?;
        let base_name_crc = input.read_i32()?;
        let kind = PayloadKind::from_i8(tag).ok_or(Error::UnknownTag {
            what: "sprite payload",
            tag: i64::from(tag),
            pos: tag_pos,
        })?;
        let payload = Payload::read(input, kind)?;
        let frame_data = FrameData::read(input)?;
        Ok(Self {
            id,
            flags,
            name,
            name_crc,
            base_name_crc,
            payload,
            frame_data,
        })
    }

    /// Frames per loop. Only `Frames` payloads animate; everything else
    /// renders as a single frame.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        if let Payload::Frames { frame_pos, action_info, .. } = &self.payload {
            let mult = frames_mult(action_info);
            frame_pos.len() / mult
        } else {
            1
        }
    }
}

/// Stride of the frame-position table: (offset, run) pairs, plus an
/// action slot when actions are present.
pub(crate) fn frames_mult(action_info: &[i16]) -> usize {
    if action_info.is_empty() {
        2
    } else {
        3
    }
}
