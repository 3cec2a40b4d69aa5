//! Test utilities for integration tests.
//!
//! This module provides builders for synthetic EXIF blocks: TIFF streams with
//! a root IFD chain, nested Exif/GPS/Interop directories, and a JPEG wrapper
//! that carries the block in an APP1 segment.

// =============================================================================
// Byte Order
// =============================================================================

#[derive(Clone, Copy, Debug)]
pub enum ByteOrderType {
    LittleEndian,
    BigEndian,
}

impl ByteOrderType {
    fn u16_bytes(self, value: u16) -> [u8; 2] {
        match self {
            ByteOrderType::LittleEndian => value.to_le_bytes(),
            ByteOrderType::BigEndian => value.to_be_bytes(),
        }
    }

    fn u32_bytes(self, value: u32) -> [u8; 4] {
        match self {
            ByteOrderType::LittleEndian => value.to_le_bytes(),
            ByteOrderType::BigEndian => value.to_be_bytes(),
        }
    }

    fn patch_u32(self, data: &mut [u8], pos: usize, value: u32) {
        data[pos..pos + 4].copy_from_slice(&self.u32_bytes(value));
    }
}

// =============================================================================
// Entry Values
// =============================================================================

/// Value of a test entry, encoded at build time in the file's byte order.
#[derive(Clone, Debug)]
pub enum TestValue {
    /// BYTE, ASCII, SBYTE or UNDEFINED data
    Bytes(Vec<u8>),
    Shorts(Vec<u16>),
    Longs(Vec<u32>),
    Rationals(Vec<(u32, u32)>),
    SRationals(Vec<(i32, i32)>),
    /// Arbitrary count and value field, written verbatim
    Raw { count: u32, value_field: u32 },
    /// Offset of a child directory, filled in at build time
    Pointer(usize),
}

#[derive(Clone, Debug)]
pub struct TestEntry {
    pub tag: u16,
    pub field_type: u16,
    pub value: TestValue,
}

impl TestEntry {
    fn count(&self) -> u32 {
        match &self.value {
            TestValue::Bytes(b) => b.len() as u32,
            TestValue::Shorts(v) => v.len() as u32,
            TestValue::Longs(v) => v.len() as u32,
            TestValue::Rationals(v) => v.len() as u32,
            TestValue::SRationals(v) => v.len() as u32,
            TestValue::Raw { count, .. } => *count,
            TestValue::Pointer(_) => 1,
        }
    }

    fn encode(&self, order: ByteOrderType) -> Vec<u8> {
        let mut out = Vec::new();
        match &self.value {
            TestValue::Bytes(b) => out.extend_from_slice(b),
            TestValue::Shorts(v) => v.iter().for_each(|x| out.extend(order.u16_bytes(*x))),
            TestValue::Longs(v) => v.iter().for_each(|x| out.extend(order.u32_bytes(*x))),
            TestValue::Rationals(v) => v.iter().for_each(|(n, d)| {
                out.extend(order.u32_bytes(*n));
                out.extend(order.u32_bytes(*d));
            }),
            TestValue::SRationals(v) => v.iter().for_each(|(n, d)| {
                out.extend(order.u32_bytes(*n as u32));
                out.extend(order.u32_bytes(*d as u32));
            }),
            TestValue::Raw { value_field, .. } => out.extend(order.u32_bytes(*value_field)),
            TestValue::Pointer(_) => out.extend([0u8; 4]),
        }
        out
    }
}

// =============================================================================
// IFD Builder
// =============================================================================

/// Builder for one directory and the directories it points to.
#[derive(Clone, Debug, Default)]
pub struct IfdBuilder {
    entries: Vec<TestEntry>,
    children: Vec<IfdBuilder>,
    next_offset: Option<u32>,
}

impl IfdBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(mut self, tag: u16, field_type: u16, value: TestValue) -> Self {
        self.entries.push(TestEntry {
            tag,
            field_type,
            value,
        });
        self
    }

    /// ASCII entry; the terminating NUL is added.
    pub fn ascii(self, tag: u16, text: &str) -> Self {
        let mut bytes = text.as_bytes().to_vec();
        bytes.push(0);
        self.entry(tag, 2, TestValue::Bytes(bytes))
    }

    pub fn bytes(self, tag: u16, values: &[u8]) -> Self {
        self.entry(tag, 1, TestValue::Bytes(values.to_vec()))
    }

    pub fn undefined(self, tag: u16, values: &[u8]) -> Self {
        self.entry(tag, 7, TestValue::Bytes(values.to_vec()))
    }

    pub fn short(self, tag: u16, values: &[u16]) -> Self {
        self.entry(tag, 3, TestValue::Shorts(values.to_vec()))
    }

    pub fn long(self, tag: u16, values: &[u32]) -> Self {
        self.entry(tag, 4, TestValue::Longs(values.to_vec()))
    }

    pub fn rational(self, tag: u16, values: &[(u32, u32)]) -> Self {
        self.entry(tag, 5, TestValue::Rationals(values.to_vec()))
    }

    pub fn srational(self, tag: u16, values: &[(i32, i32)]) -> Self {
        self.entry(tag, 10, TestValue::SRationals(values.to_vec()))
    }

    pub fn raw(self, tag: u16, field_type: u16, count: u32, value_field: u32) -> Self {
        self.entry(tag, field_type, TestValue::Raw { count, value_field })
    }

    /// Pointer entry (LONG) to a child directory.
    pub fn child(mut self, pointer_tag: u16, child: IfdBuilder) -> Self {
        let index = self.children.len();
        self.children.push(child);
        self.entry(pointer_tag, 4, TestValue::Pointer(index))
    }

    /// Force the "next IFD" field instead of linking the chain.
    pub fn with_next_offset(mut self, offset: u32) -> Self {
        self.next_offset = Some(offset);
        self
    }

    /// Append this directory, its out-of-line values and its children.
    ///
    /// Returns the position of the "next IFD" field.
    fn write_to(&self, data: &mut Vec<u8>, order: ByteOrderType) -> usize {
        let start = data.len();
        let dir_size = 2 + self.entries.len() * 12 + 4;
        let mut external = Vec::new();
        let mut pointers = Vec::new();

        data.extend(order.u16_bytes(self.entries.len() as u16));
        for entry in &self.entries {
            data.extend(order.u16_bytes(entry.tag));
            data.extend(order.u16_bytes(entry.field_type));
            data.extend(order.u32_bytes(entry.count()));

            let payload = entry.encode(order);
            if let TestValue::Pointer(index) = entry.value {
                pointers.push((data.len(), index));
            }
            if payload.len() <= 4 {
                let mut field = [0u8; 4];
                field[..payload.len()].copy_from_slice(&payload);
                data.extend(field);
            } else {
                let offset = start + dir_size + external.len();
                data.extend(order.u32_bytes(offset as u32));
                external.extend(payload);
            }
        }

        let next_pos = data.len();
        data.extend(order.u32_bytes(self.next_offset.unwrap_or(0)));
        data.extend(external);

        for (pos, index) in pointers {
            let child_offset = data.len() as u32;
            self.children[index].write_to(data, order);
            order.patch_u32(data, pos, child_offset);
        }

        next_pos
    }
}

// =============================================================================
// TIFF Builder
// =============================================================================

/// Builder for a classic TIFF stream holding an EXIF IFD tree.
pub struct TiffBuilder {
    byte_order: ByteOrderType,
    ifds: Vec<IfdBuilder>,
}

impl TiffBuilder {
    pub fn new() -> Self {
        Self {
            byte_order: ByteOrderType::BigEndian,
            ifds: Vec::new(),
        }
    }

    pub fn with_byte_order(mut self, order: ByteOrderType) -> Self {
        self.byte_order = order;
        self
    }

    /// Append a directory to the root chain (IFD0, IFD1, ...).
    pub fn add_ifd(mut self, ifd: IfdBuilder) -> Self {
        self.ifds.push(ifd);
        self
    }

    /// Build the TIFF stream. The first IFD always starts at offset 8.
    pub fn build(self) -> Vec<u8> {
        let order = self.byte_order;
        let mut data = match order {
            ByteOrderType::LittleEndian => b"II".to_vec(),
            ByteOrderType::BigEndian => b"MM".to_vec(),
        };
        data.extend(order.u16_bytes(42));
        data.extend(order.u32_bytes(8));

        let mut previous_next: Option<(usize, bool)> = None;
        for ifd in &self.ifds {
            let offset = data.len() as u32;
            if let Some((pos, forced)) = previous_next {
                if !forced {
                    order.patch_u32(&mut data, pos, offset);
                }
            }
            let next_pos = ifd.write_to(&mut data, order);
            previous_next = Some((next_pos, ifd.next_offset.is_some()));
        }

        data
    }
}

impl Default for TiffBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Containers
// =============================================================================

/// Wrap a TIFF stream in a minimal JPEG: SOI, APP0 (JFIF), APP1 (Exif), SOS, EOI.
pub fn wrap_in_jpeg(tiff: &[u8]) -> Vec<u8> {
    let mut jpeg = vec![0xFF, 0xD8];

    jpeg.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x10]);
    jpeg.extend_from_slice(b"JFIF\0");
    jpeg.extend_from_slice(&[0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00]);

    let app1_len = (2 + 6 + tiff.len()) as u16;
    jpeg.extend_from_slice(&[0xFF, 0xE1]);
    jpeg.extend_from_slice(&app1_len.to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(tiff);

    jpeg.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x02, 0x00, 0x3F, 0xFF, 0xD9]);
    jpeg
}

/// A JPEG with no metadata segments at all.
pub fn plain_jpeg() -> Vec<u8> {
    vec![0xFF, 0xD8, 0xFF, 0xDA, 0x00, 0x02, 0x00, 0x3F, 0xFF, 0xD9]
}

// =============================================================================
// Sample Files
// =============================================================================

/// The smallest useful EXIF block: big-endian, one root IFD with
/// ImageDescription "Test".
pub fn create_minimal_tiff() -> Vec<u8> {
    TiffBuilder::new()
        .add_ifd(IfdBuilder::new().ascii(0x010E, "Test"))
        .build()
}

/// A camera-like EXIF block: IFD0 with Exif (and Interop) and GPS children,
/// followed by a thumbnail IFD1.
pub fn create_camera_tiff(order: ByteOrderType) -> Vec<u8> {
    let interop = IfdBuilder::new()
        .ascii(0x0001, "R98")
        .undefined(0x0002, b"0100");

    let exif = IfdBuilder::new()
        .rational(0x829A, &[(1, 125)])
        .rational(0x829D, &[(28, 10)])
        .short(0x8827, &[400])
        .undefined(0x9000, b"0230")
        .ascii(0x9003, "2024:05:01 12:34:56")
        .srational(0x9204, &[(-1, 3)])
        .undefined(0x9101, &[1, 2, 3, 0])
        .child(0xA005, interop);

    let gps = IfdBuilder::new()
        .bytes(0x0000, &[2, 3, 0, 0])
        .ascii(0x0001, "N")
        .rational(0x0002, &[(48, 1), (51, 1), (2964, 100)])
        .ascii(0x0003, "E")
        .rational(0x0004, &[(2, 1), (17, 1), (4020, 100)]);

    let ifd0 = IfdBuilder::new()
        .ascii(0x010F, "Canon")
        .ascii(0x0110, "Canon EOS 5D")
        .short(0x0112, &[1])
        .rational(0x011A, &[(72, 1)])
        .rational(0x011B, &[(72, 1)])
        .short(0x0128, &[2])
        .child(0x8769, exif)
        .child(0x8825, gps);

    let ifd1 = IfdBuilder::new()
        .short(0x0103, &[6])
        .rational(0x011A, &[(180, 1)])
        .long(0x0201, &[4096])
        .long(0x0202, &[1024]);

    TiffBuilder::new()
        .with_byte_order(order)
        .add_ifd(ifd0)
        .add_ifd(ifd1)
        .build()
}
