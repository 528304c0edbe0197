use bitflags::bitflags;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::cursor::{Count, Cursor};
use crate::error::Result;
use crate::resources::index::LocalIndex;
use crate::resources::shape::Shape;
use crate::resources::sprite::Sprite;
use crate::resources::transform::TransformTable;

bitflags! {
    /// Animation file feature bits.
    pub struct VersionFlags: u8 {
        const USE_ATLAS           = 0x01;
        const USE_LOCAL_INDEX     = 0x02;
        const PERFECT_HIT_TEST    = 0x04;
        const OPTIMIZED           = 0x08;
        const USE_TRANSFORM_INDEX = 0x10;
    }
}

/// Atlas descriptor.
#[derive(Clone, Debug)]
pub struct Texture {
    pub name: String,
    pub crc: i32,
}

impl Texture {
    fn read(input: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            name: input.read_string()?,
            crc: input.read_i32()?,
        })
    }
}

/// Declarative reference to a sprite exported by another file. Not
/// consulted by rendering.
#[derive(Clone, Debug)]
pub struct Import {
    pub id: i16,
    pub name: String,
    pub file_index: i32,
}

impl Import {
    fn read(input: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            id: input.read_i16()?,
            name: input.read_string()?,
            file_index: input.read_i32()?,
        })
    }
}

static EMPTY_TABLE: Lazy<TransformTable> = Lazy::new(TransformTable::default);

/// Root aggregate decoded from one `.anm` file. Immutable once decoded.
#[derive(Clone, Debug)]
pub struct Animation {
    pub version: VersionFlags,
    pub frame_rate: u8,
    pub index: Option<LocalIndex>,
    pub texture: Option<Texture>,
    pub shapes: Vec<Shape>,
    pub transform: Option<TransformTable>,
    pub sprites: Vec<Sprite>,
    pub imports: Vec<Import>,
    shapes_by_id: HashMap<i16, usize>,
    sprites_by_id: HashMap<i16, usize>,
}

impl Animation {
    /// Decodes a complete animation file. Trailing bytes are tolerated
    /// with a warning; every other malformation is an error.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut input = Cursor::new(bytes);
        let animation = Self::read(&mut input)?;
        if input.remaining() > 0 {
            tracing::warn!(
                residual = input.remaining(),
                "animation decoded with residual bytes"
            );
        }
        Ok(animation)
    }

    fn read(input: &mut Cursor<'_>) -> Result<Self> {
        let version = VersionFlags::from_bits_truncate(input.read_u8()?);
        // Unused word; always present ahead of the frame rate.
        input.read_i16()?;
        let frame_rate = input.read_u8()?;
        let index = input.read_if(
            version.contains(VersionFlags::USE_LOCAL_INDEX),
            LocalIndex::read,
        )?;
        let texture_count = input.read_u16()?;
        let texture = input.read_if(texture_count == 1, Texture::read)?;
        let shapes = input.read_array(Count::U16, Shape::read)?;
        let transform = input.read_if(
            version.contains(VersionFlags::USE_TRANSFORM_INDEX),
            TransformTable::read,
        )?;
        let sprites = input.read_array(Count::U16, Sprite::read)?;
        let imports = input.read_array(Count::U16, Import::read)?;

        tracing::debug!(
            shapes = shapes.len(),
            sprites = sprites.len(),
            imports = imports.len(),
            "decoded animation"
        );

        let shapes_by_id = shapes
            .iter()
            .enumerate()
            .map(|(at, shape)| (shape.id, at))
            .collect();
        let sprites_by_id = sprites
            .iter()
            .enumerate()
            .map(|(at, sprite)| (sprite.id, at))
            .collect();

        Ok(Self {
            version,
            frame_rate,
            index,
            texture,
            shapes,
            transform,
            sprites,
            imports,
            shapes_by_id,
            sprites_by_id,
        })
    }

    #[must_use]
    pub fn shape(&self, id: i16) -> Option<&Shape> {
        self.shapes_by_id.get(&id).map(|&at| &self.shapes[at])
    }

    #[must_use]
    pub fn sprite(&self, id: i16) -> Option<&Sprite> {
        self.sprites_by_id.get(&id).map(|&at| &self.sprites[at])
    }

    /// The transform table, or a shared empty one for files without a
    /// transform index.
    #[must_use]
    pub fn transforms(&self) -> &TransformTable {
        self.transform.as_ref().map_or(&*EMPTY_TABLE, |table| table)
    }
}
