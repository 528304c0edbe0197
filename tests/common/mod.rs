#![allow(dead_code)]

/// Little-endian byte-stream writer for authoring animation fixtures.
pub struct Writer {
    bytes: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    pub fn u8(&mut self, value: u8) -> &mut Self {
        self.bytes.push(value);
        self
    }

    pub fn i8(&mut self, value: i8) -> &mut Self {
        self.bytes.push(value as u8);
        self
    }

    pub fn u16(&mut self, value: u16) -> &mut Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn i16(&mut self, value: i16) -> &mut Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn u32(&mut self, value: u32) -> &mut Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn i32(&mut self, value: i32) -> &mut Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn f32(&mut self, value: f32) -> &mut Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// A zero-terminated string.
    pub fn c_str(&mut self, value: &str) -> &mut Self {
        self.bytes.extend_from_slice(value.as_bytes());
        self.bytes.push(0);
        self
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

/// `version`, the unused word, and the frame rate.
pub fn header(writer: &mut Writer, version: u8, frame_rate: u8) {
    writer.u8(version).i16(0).u8(frame_rate);
}

/// A square shape covering the full atlas, placed at the origin.
pub fn full_atlas_shape(writer: &mut Writer, id: i16, size: u16) {
    writer
        .i16(id)
        .i16(0) // texture index
        .u16(0) // top
        .u16(0) // left
        .u16(65535) // bottom
        .u16(65535) // right
        .u16(size)
        .u16(size)
        .f32(0.0)
        .f32(0.0);
}

/// Sprite prelude: tag, id, flag byte, optional name, CRCs.
pub fn sprite_prelude(writer: &mut Writer, tag: i8, id: i16, name: Option<&str>) {
    writer.i8(tag).i16(id);
    match name {
        Some(name) => {
            writer.u8(0x40);
            writer.c_str(name);
        }
        None => {
            writer.u8(0);
        }
    }
    writer.i32(0).i32(0);
}

/// A frame-data trailer of 16-bit opcodes.
pub fn frame_data_shorts(writer: &mut Writer, opcodes: &[u16]) {
    writer.u8(2).u32(opcodes.len() as u32);
    for &opcode in opcodes {
        writer.u16(opcode);
    }
}
