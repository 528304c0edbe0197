use crate::cursor::Cursor;
use crate::error::Result;

/// Sentinel name marking the percent-carrying form of `GoToRandom`.
const OPTIMIZED: &str = "#optimized";

/// Timeline side effects parsed out of the transform table.
///
/// Rendering preserves these for downstream consumers without
/// interpreting them.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    GoTo { name: String, percent: Option<u8> },
    GoToStatic,
    RunScript { name: String },
    GoToRandom { names: Vec<String>, percents: Option<Vec<u8>> },
    Hit,
    Delete,
    End,
    GoToIfPrevious {
        previous: Vec<String>,
        next: Vec<String>,
        default: Option<String>,
    },
    AddParticle {
        particle_id: i32,
        offset_x: Option<i16>,
        offset_y: Option<i16>,
        offset_z: Option<i16>,
    },
    SetRadius { radius: f32 },
}

impl Action {
    pub(crate) fn read(input: &mut Cursor<'_>) -> Result<Self> {
        let id = input.read_u8()?;
        let params = input.read_u8()?;
        Ok(match id {
            1 => Action::GoTo {
                name: input.read_string()?,
                percent: input.read_if(params == 2, Cursor::read_u8)?,
            },
            2 => Action::GoToStatic,
            3 => Action::RunScript { name: input.read_string()? },
            4 => read_go_to_random(input, params)?,
            5 => Action::Hit,
            6 => Action::Delete,
            7 => Action::End,
            8 => {
                let count = usize::from(params.saturating_sub(1) / 2);
                let mut previous = Vec::with_capacity(count);
                let mut next = Vec::with_capacity(count);
                for _ in 0..count {
                    previous.push(input.read_string()?);
                    next.push(input.read_string()?);
                }
                let default = input.read_if(params % 2 == 1, Cursor::read_string)?;
                Action::GoToIfPrevious { previous, next, default }
            }
            9 => Action::AddParticle {
                particle_id: input.read_i32()?,
                offset_x: input.read_if(params > 1, Cursor::read_i16)?,
                offset_y: input.read_if(params > 2, Cursor::read_i16)?,
                offset_z: input.read_if(params > 3, Cursor::read_i16)?,
            },
            // Id 10; also the fallthrough for ids this decoder does not
            // know. The stream carries a radius either way.
            _ => Action::SetRadius { radius: input.read_f32()? },
        })
    }
}

fn read_go_to_random(input: &mut Cursor<'_>, params: u8) -> Result<Action> {
    let first = input.read_string()?;
    if first == OPTIMIZED {
        let count = usize::from(params.saturating_sub(1) / 2);
        let mut names = Vec::with_capacity(count);
        for _ in 0..count {
            names.push(input.read_string()?);
        }
        let mut percents = Vec::with_capacity(count);
        for _ in 0..count {
            percents.push(input.read_u8()?);
        }
        Ok(Action::GoToRandom { names, percents: Some(percents) })
    } else {
        // The sentinel probe already consumed the first name.
        let count = usize::from(params.saturating_sub(1));
        let mut names = Vec::with_capacity(count.max(1));
        names.push(first);
        for _ in 1..count {
            names.push(input.read_string()?);
        }
        Ok(Action::GoToRandom { names, percents: None })
    }
}
