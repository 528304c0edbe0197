use byteorder::{ByteOrder, LittleEndian};
use std::collections::HashMap;
use std::hash::Hash;

use crate::encodings::{Decoder as _, LATIN_1};
use crate::error::{Error, Result};

/// Width of the count prefixing a serialised sequence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Count {
    U8,
    U16,
    U32,
}

/// Position-tracked little-endian reader over an in-memory animation file.
///
/// Knows nothing about the animation schema; the record types in
/// `resources` drive it.
#[derive(Debug)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, size: usize) -> Result<&'a [u8]> {
        if self.remaining() < size {
            return Err(Error::TruncatedInput {
                pos: self.pos,
                needed: size - self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + size];
        self.pos += size;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.take(1)?[0] as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(LittleEndian::read_i16(self.take(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(LittleEndian::read_f32(self.take(4)?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(LittleEndian::read_f64(self.take(8)?))
    }

    /// Reads bytes up to and including a zero terminator, decoding the
    /// bytes before it as Latin-1.
    pub fn read_string(&mut self) -> Result<String> {
        let start = self.pos;
        let len = self.data[self.pos..]
            .iter()
            .position(|&byte| byte == 0)
            .ok_or(Error::UnterminatedString { pos: start })?;
        let bytes = &self.data[start..start + len];
        self.pos += len + 1;
        Ok(LATIN_1.decode(bytes))
    }

    /// Invokes `read` only when `cond` holds; the position does not move
    /// otherwise.
    pub fn read_if<T>(
        &mut self,
        cond: bool,
        read: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<Option<T>> {
        if cond {
            read(self).map(Some)
        } else {
            Ok(None)
        }
    }

    fn read_count(&mut self, count: Count) -> Result<usize> {
        Ok(match count {
            Count::U8 => usize::from(self.read_u8()?),
            Count::U16 => usize::from(self.read_u16()?),
            Count::U32 => self.read_u32()? as usize,
        })
    }

    /// Reads a count-prefixed sequence in stream order.
    pub fn read_array<T>(
        &mut self,
        count: Count,
        mut read: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let len = self.read_count(count)?;
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(read(self)?);
        }
        Ok(items)
    }

    /// Reads a count-prefixed key/value mapping. Key uniqueness is not
    /// enforced; duplicate keys keep the last value.
    pub fn read_map<K: Eq + Hash, V>(
        &mut self,
        count: Count,
        mut read_key: impl FnMut(&mut Self) -> Result<K>,
        mut read_value: impl FnMut(&mut Self) -> Result<V>,
    ) -> Result<HashMap<K, V>> {
        let len = self.read_count(count)?;
        let mut map = HashMap::with_capacity(len);
        for _ in 0..len {
            let key = read_key(self)?;
            let value = read_value(self)?;
            map.insert(key, value);
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives() {
        let data = [0x01, 0xff, 0x02, 0x01, 0x00, 0x00, 0x80, 0x3f];
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.read_u8().unwrap(), 1);
        assert_eq!(cursor.read_i8().unwrap(), -1);
        assert_eq!(cursor.read_u16().unwrap(), 0x0102);
        assert!((cursor.read_f32().unwrap() - 1.0).abs() < f32::EPSILON);
        assert_eq!(cursor.pos(), 8);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn read_past_end() {
        let mut cursor = Cursor::new(&[0x01]);
        match cursor.read_u32() {
            Err(Error::TruncatedInput { pos: 0, needed: 3 }) => {}
            other => panic!("expected truncation, got {:?}", other),
        }
    }

    #[test]
    fn read_string_terminated() {
        let mut cursor = Cursor::new(b"ok\0x");
        assert_eq!(cursor.read_string().unwrap(), "ok");
        assert_eq!(cursor.pos(), 3);
    }

    #[test]
    fn read_string_latin_1() {
        let mut cursor = Cursor::new(b"\xc9t\xe9\0");
        assert_eq!(cursor.read_string().unwrap(), "\u{c9}t\u{e9}");
    }

    #[test]
    fn read_string_unterminated() {
        let mut cursor = Cursor::new(b"oops");
        match cursor.read_string() {
            Err(Error::UnterminatedString { pos: 0 }) => {}
            other => panic!("expected unterminated string, got {:?}", other),
        }
    }

    #[test]
    fn read_if_does_not_advance_when_false() {
        let mut cursor = Cursor::new(&[0x07]);
        let absent = cursor.read_if(false, Cursor::read_u8).unwrap();
        assert_eq!(absent, None);
        assert_eq!(cursor.pos(), 0);
        let present = cursor.read_if(true, Cursor::read_u8).unwrap();
        assert_eq!(present, Some(7));
    }

    #[test]
    fn read_array_prefixed() {
        let mut cursor = Cursor::new(&[0x03, 0x00, 0x0a, 0x0b, 0x0c]);
        let items = cursor.read_array(Count::U16, Cursor::read_u8).unwrap();
        assert_eq!(items, vec![0x0a, 0x0b, 0x0c]);
    }

    #[test]
    fn read_map_last_write_wins() {
        let mut cursor = Cursor::new(&[0x02, 0x01, 0x0a, 0x01, 0x0b]);
        let map = cursor
            .read_map(Count::U8, Cursor::read_u8, Cursor::read_u8)
            .unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map[&1], 0x0b);
    }
}
