use bitflags::bitflags;
use std::collections::HashMap;

use crate::cursor::{Count, Cursor};
use crate::error::Result;

bitflags! {
    /// Gating byte ahead of the optional local-index sections, in stream
    /// order.
    pub struct IndexFlags: u8 {
        const SCALE              = 0x01;
        const RENDER_RADIUS      = 0x02;
        const FILE_NAMES         = 0x04;
        const PARTS_HIDDEN_BY    = 0x08;
        const PARTS_TO_BE_HIDDEN = 0x10;
        const EXTENSION          = 0x20;
    }
}

/// A part that hides another, both referenced by name CRC.
#[derive(Clone, Debug)]
pub struct HideablePart {
    pub crc_key: i32,
    pub crc_to_hide: i32,
}

impl HideablePart {
    fn read(input: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            crc_key: input.read_i32()?,
            crc_to_hide: input.read_i32()?,
        })
    }
}

/// A part hidden when the named item is equipped.
#[derive(Clone, Debug)]
pub struct HiddenPart {
    pub item_name: String,
    pub crc_key: i32,
}

impl HiddenPart {
    fn read(input: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            item_name: input.read_string()?,
            crc_key: input.read_i32()?,
        })
    }
}

#[derive(Clone, Debug)]
pub struct HighlightColor {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl HighlightColor {
    fn read(input: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            red: input.read_f32()?,
            green: input.read_f32()?,
            blue: input.read_f32()?,
        })
    }
}

/// Trailing extension block of the local index.
#[derive(Clone, Debug)]
pub struct Extension {
    /// Per-part height offsets. Stored values are raised by one on
    /// decode; widened so the raised value always fits.
    pub heights: Option<HashMap<i32, i16>>,
    pub highlight_color: Option<HighlightColor>,
}

impl Extension {
    fn read(input: &mut Cursor<'_>) -> Result<Self> {
        let flags = input.read_i32()?;
        let heights = input.read_if(flags & 0x1 == 0x1, |input| {
            input.read_map(Count::U16, Cursor::read_i32, |input| {
                Ok(i16::from(input.read_i8()?) + 1)
            })
        })?;
        let highlight_color = input.read_if(flags & 0x2 == 0x2, HighlightColor::read)?;
        Ok(Self { heights, highlight_color })
    }
}

/// A sibling animation file registered in the index.
#[derive(Clone, Debug)]
pub struct AnimationFile {
    pub name: String,
    pub crc: i32,
    pub file_index: i16,
}

impl AnimationFile {
    fn read(input: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            name: input.read_string()?,
            crc: input.read_i32()?,
            file_index: input.read_i16()?,
        })
    }
}

/// Optional per-file metadata: display scale, preload list, hidden-part
/// tables, and the extension block.
#[derive(Clone, Debug)]
pub struct LocalIndex {
    pub flags: IndexFlags,
    pub scale: Option<f32>,
    pub render_radius: Option<f32>,
    /// Sibling animation files to preload alongside this one.
    pub file_names: Vec<String>,
    pub parts_hidden_by: Vec<HideablePart>,
    pub parts_to_be_hidden: Vec<HiddenPart>,
    pub extension: Option<Extension>,
    pub animation_files: Vec<AnimationFile>,
}

impl LocalIndex {
    pub(crate) fn read(input: &mut Cursor<'_>) -> Result<Self> {
        let flags = IndexFlags::from_bits_truncate(input.read_u8()?);
        let scale = input.read_if(flags.contains(IndexFlags::SCALE), Cursor::read_f32)?;
        let render_radius =
            input.read_if(flags.contains(IndexFlags::RENDER_RADIUS), Cursor::read_f32)?;
        let file_names = if flags.contains(IndexFlags::FILE_NAMES) {
            input.read_array(Count::U16, Cursor::read_string)?
        } else {
            Vec::new()
        };
        let parts_hidden_by = if flags.contains(IndexFlags::PARTS_HIDDEN_BY) {
            input.read_array(Count::U8, HideablePart::read)?
        } else {
            Vec::new()
        };
        let parts_to_be_hidden = if flags.contains(IndexFlags::PARTS_TO_BE_HIDDEN) {
            input.read_array(Count::U8, HiddenPart::read)?
        } else {
            Vec::new()
        };
        let extension = input.read_if(flags.contains(IndexFlags::EXTENSION), Extension::read)?;
        let animation_files = input.read_array(Count::U16, AnimationFile::read)?;
        Ok(Self {
            flags,
            scale,
            render_radius,
            file_names,
            parts_hidden_by,
            parts_to_be_hidden,
            extension,
            animation_files,
        })
    }
}
