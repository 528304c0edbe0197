use crate::cursor::{Count, Cursor};
use crate::error::Result;
use crate::resources::action::Action;

/// Flat per-animation tables of colour, rotation, and translation floats,
/// plus the parsed action list.
///
/// Frame streams address the float arrays by element offset, never by
/// record index: a rotation offset covers four consecutive floats, a
/// translation two, a colour four.
#[derive(Clone, Debug, Default)]
pub struct TransformTable {
    pub colors: Vec<f32>,
    pub rotations: Vec<f32>,
    pub translations: Vec<f32>,
    pub actions: Vec<Action>,
}

impl TransformTable {
    pub(crate) fn read(input: &mut Cursor<'_>) -> Result<Self> {
        let colors = input.read_array(Count::U32, Cursor::read_f32)?;
        let rotations = input.read_array(Count::U32, Cursor::read_f32)?;
        let translations = input.read_array(Count::U32, Cursor::read_f32)?;
        let actions = input.read_array(Count::U32, Action::read)?;
        Ok(Self { colors, rotations, translations, actions })
    }

    pub(crate) fn rotation(&self, offset: usize) -> Option<[f32; 4]> {
        let floats = self.rotations.get(offset..offset + 4)?;
        Some([floats[0], floats[1], floats[2], floats[3]])
    }

    pub(crate) fn translation(&self, offset: usize) -> Option<[f32; 2]> {
        let floats = self.translations.get(offset..offset + 2)?;
        Some([floats[0], floats[1]])
    }

    pub(crate) fn color(&self, offset: usize) -> Option<[f32; 4]> {
        let floats = self.colors.get(offset..offset + 4)?;
        Some([floats[0], floats[1], floats[2], floats[3]])
    }
}
