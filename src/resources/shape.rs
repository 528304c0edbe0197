use crate::cursor::Cursor;
use crate::error::Result;

/// An atlas sub-rectangle plus its placement offset: the leaf of every
/// render.
#[derive(Clone, Debug)]
pub struct Shape {
    pub id: i16,
    pub texture_index: i16,
    /// Normalised texture-coordinate extents in `[0, 1]`.
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    /// Size in destination pixels.
    pub width: u16,
    pub height: u16,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Shape {
    pub(crate) fn read(input: &mut Cursor<'_>) -> Result<Self> {
        let id = input.read_i16()?;
        let texture_index = input.read_i16()?;
        // Extents are stored as u16 fractions of the atlas edge and
        // normalised here, so the model carries plain texture coordinates.
        let top = f32::from(input.read_u16()?) / 65535.0;
        let left = f32::from(input.read_u16()?) / 65535.0;
        let bottom = f32::from(input.read_u16()?) / 65535.0;
        let right = f32::from(input.read_u16()?) / 65535.0;
        let width = input.read_u16()?;
        let height = input.read_u16()?;
        let offset_x = input.read_f32()?;
        let offset_y = input.read_f32()?;
        Ok(Self {
            id,
            texture_index,
            top,
            left,
            bottom,
            right,
            width,
            height,
            offset_x,
            offset_y,
        })
    }
}
