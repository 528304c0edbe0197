use bitflags::bitflags;

use crate::error::{Error, Result};
use crate::resources::{FrameData, TransformTable};
use crate::types::{ColorTransform, SpriteTransform, Transform2D};

bitflags! {
    /// Component bits of a frame opcode. The low four bits select which
    /// transform-table reads follow, in the fixed order colour-multiply,
    /// colour-add, rotation, translation.
    struct Components: u32 {
        const ROTATION       = 0x1;
        const TRANSLATION    = 0x2;
        const COLOR_MULTIPLY = 0x4;
        const COLOR_ADD      = 0x8;
    }
}

/// Sequential interpreter over a sprite's packed frame opcodes.
///
/// The position advances across recursive child renders; the walker
/// passes it by exclusive reference, one walk at a time.
pub(crate) struct FrameReader<'a> {
    data: &'a FrameData,
    table: &'a TransformTable,
    pos: usize,
}

impl<'a> FrameReader<'a> {
    pub(crate) fn new(data: &'a FrameData, table: &'a TransformTable) -> Self {
        Self { data, table, pos: 0 }
    }

    pub(crate) fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    fn next_int(&mut self) -> Result<u32> {
        let value = self
            .data
            .get(self.pos)
            .ok_or(Error::MissingTransform { pos: self.pos })?;
        self.pos += 1;
        Ok(value)
    }

    fn rotation(&mut self) -> Result<Transform2D> {
        let offset = self.next_int()? as usize;
        let r = self
            .table
            .rotation(offset)
            .ok_or(Error::InvalidOffset { offset: offset as i64 })?;
        Ok(Transform2D::rotate(r[0], r[1], r[2], r[3]))
    }

    fn translation(&mut self) -> Result<Transform2D> {
        let offset = self.next_int()? as usize;
        let t = self
            .table
            .translation(offset)
            .ok_or(Error::InvalidOffset { offset: offset as i64 })?;
        Ok(Transform2D::translate(t[0], t[1]))
    }

    fn color(&mut self) -> Result<[f32; 4]> {
        let offset = self.next_int()? as usize;
        self.table
            .color(offset)
            .ok_or(Error::InvalidOffset { offset: offset as i64 })
    }

    /// Reads one opcode plus its table offsets and returns the composed
    /// transform for the next child. Opcode 0 is the identity; anything
    /// above 15 has no transform.
    pub(crate) fn read(&mut self) -> Result<SpriteTransform> {
        let at = self.pos;
        let tag = self.next_int()?;
        let components =
            Components::from_bits(tag).ok_or(Error::MissingTransform { pos: at })?;

        let mut parts = Vec::with_capacity(3);
        if components.contains(Components::COLOR_MULTIPLY) {
            parts.push(SpriteTransform::from_color(ColorTransform::Multiply(
                self.color()?,
            )));
        }
        if components.contains(Components::COLOR_ADD) {
            parts.push(SpriteTransform::from_color(ColorTransform::Add(
                self.color()?,
            )));
        }
        if components.contains(Components::ROTATION) {
            parts.push(SpriteTransform::from_position(self.rotation()?));
        }
        if components.contains(Components::TRANSLATION) {
            parts.push(SpriteTransform::from_position(self.translation()?));
        }

        let mut composed: Option<SpriteTransform> = None;
        for part in parts {
            composed = Some(match composed {
                None => part,
                Some(previous) => previous.combine(&part),
            });
        }
        Ok(composed.unwrap_or_else(SpriteTransform::identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TransformTable {
        TransformTable {
            colors: vec![0.5, 0.5, 0.5, 0.5, 0.1, 0.1, 0.1, 0.0],
            rotations: vec![0.0, 1.0, -1.0, 0.0],
            translations: vec![7.0, -3.0],
            actions: Vec::new(),
        }
    }

    #[test]
    fn opcode_zero_is_identity() {
        let data = FrameData::Shorts(vec![0]);
        let table = table();
        let mut reader = FrameReader::new(&data, &table);
        assert_eq!(reader.read().unwrap(), SpriteTransform::identity());
    }

    #[test]
    fn rotation_then_translation() {
        // Opcode 3 reads a rotation offset then a translation offset.
        let data = FrameData::Shorts(vec![3, 0, 0]);
        let table = table();
        let mut reader = FrameReader::new(&data, &table);
        let transform = reader.read().unwrap();
        let expected = Transform2D::rotate(0.0, 1.0, -1.0, 0.0)
            .mult(Transform2D::translate(7.0, -3.0));
        assert_eq!(transform.position, expected);
    }

    #[test]
    fn color_multiply_and_add() {
        // Opcode 12 reads a multiply colour then an add colour.
        let data = FrameData::Shorts(vec![12, 0, 4]);
        let table = table();
        let mut reader = FrameReader::new(&data, &table);
        let transform = reader.read().unwrap();
        let color = transform.color.to_color();
        for (got, want) in color.iter().zip(&[0.55, 0.55, 0.55, 0.5]) {
            assert!((got - want).abs() < 1e-6);
        }
    }

    #[test]
    fn unrecognised_opcode_has_no_transform() {
        let data = FrameData::Shorts(vec![99]);
        let table = table();
        let mut reader = FrameReader::new(&data, &table);
        match reader.read() {
            Err(Error::MissingTransform { pos: 0 }) => {}
            other => panic!("expected missing transform, got {:?}", other),
        }
    }

    #[test]
    fn exhausted_stream_has_no_transform() {
        let data = FrameData::Shorts(vec![]);
        let table = table();
        let mut reader = FrameReader::new(&data, &table);
        assert!(matches!(
            reader.read(),
            Err(Error::MissingTransform { pos: 0 })
        ));
    }
}
