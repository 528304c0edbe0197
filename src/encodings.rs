use encoding::{all as encodings, types::{DecoderTrap, Encoding as _}};

// Animation files predate any Unicode awareness; strings are stored as
// bare bytes and read back as Latin-1.

pub trait Decoder {
    /// Decodes a byte slice into a string. Invalid code sequences are
    /// replaced by the Unicode replacement character.
    fn decode(&self, text: &[u8]) -> String;
}

pub struct Latin1;
impl Decoder for Latin1 {
    fn decode(&self, text: &[u8]) -> String {
        encodings::ISO_8859_1.decode(text, DecoderTrap::Replace).unwrap()
    }
}
pub const LATIN_1: &Latin1 = &Latin1;
