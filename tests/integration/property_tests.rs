//! Property tests for value resolution and directory walking.
//!
//! Arbitrary entries and byte buffers must never panic: every failure is
//! reported as a `DecodeError` or `ExtractError`.

use proptest::prelude::*;

use exif_streamer::error::DecodeError;
use exif_streamer::exif::{extract_from_image, ExifRegistry, ExtractOptions};
use exif_streamer::format::tiff::{ByteOrder, IfdTagEntry, TagTypeRegistry, ValueResolver};

fn entry(tag_type: u16, unit_count: u32, value_field: [u8; 4], order: ByteOrder) -> IfdTagEntry {
    let value_offset = match order {
        ByteOrder::LittleEndian => u32::from_le_bytes(value_field),
        ByteOrder::BigEndian => u32::from_be_bytes(value_field),
    };
    IfdTagEntry {
        tag_id: 0x1234,
        tag_index: 0,
        tag_type,
        unit_count,
        value_offset,
        raw_value_offset: value_field,
        ifd_path: "IFD".to_string(),
        fq_ifd_path: "IFD0".to_string(),
        ifd_index: 0,
    }
}

fn byte_order_strategy() -> impl Strategy<Value = ByteOrder> {
    prop_oneof![Just(ByteOrder::LittleEndian), Just(ByteOrder::BigEndian)]
}

/// Field type ids with their element sizes.
fn sized_type_strategy() -> impl Strategy<Value = (u16, usize)> {
    prop_oneof![
        Just((1u16, 1usize)),
        Just((2, 1)),
        Just((3, 2)),
        Just((4, 4)),
        Just((5, 8)),
        Just((6, 1)),
        Just((7, 1)),
        Just((8, 2)),
        Just((9, 4)),
        Just((10, 8)),
    ]
}

proptest! {
    /// Property: values of at most 4 bytes come from the value field itself.
    #[test]
    fn prop_inline_values_use_value_field(
        (tag_type, size) in sized_type_strategy(),
        value_field in any::<[u8; 4]>(),
        order in byte_order_strategy(),
        count_seed in 0u32..=4,
    ) {
        let unit_count = count_seed.min((4 / size) as u32);
        let types = TagTypeRegistry::standard();
        // Empty addressable data: an inline read must never touch it
        let resolver = ValueResolver::new(&types, &[], order);

        let bytes = resolver
            .value_bytes(&entry(tag_type, unit_count, value_field, order))
            .unwrap();
        prop_assert_eq!(&bytes[..], &value_field[..unit_count as usize * size]);
    }

    /// Property: larger values are the exact slice at the value offset.
    #[test]
    fn prop_offset_values_match_slice(
        (tag_type, size) in sized_type_strategy(),
        data in prop::collection::vec(any::<u8>(), 64..256),
        order in byte_order_strategy(),
        offset_seed in any::<u16>(),
        count_seed in any::<u16>(),
    ) {
        let min_count = 4 / size + 1;
        let max_count = data.len() / size;
        let unit_count = min_count + count_seed as usize % (max_count - min_count + 1);
        let byte_count = unit_count * size;
        let offset = offset_seed as usize % (data.len() - byte_count + 1);

        let value_field = match order {
            ByteOrder::LittleEndian => (offset as u32).to_le_bytes(),
            ByteOrder::BigEndian => (offset as u32).to_be_bytes(),
        };
        let types = TagTypeRegistry::standard();
        let resolver = ValueResolver::new(&types, &data, order);

        let bytes = resolver
            .value_bytes(&entry(tag_type, unit_count as u32, value_field, order))
            .unwrap();
        prop_assert_eq!(&bytes[..], &data[offset..offset + byte_count]);
    }

    /// Property: arbitrary entries resolve or fail with TruncatedValue, never panic.
    #[test]
    fn prop_arbitrary_entries_never_panic(
        (tag_type, _size) in sized_type_strategy(),
        unit_count in any::<u32>(),
        value_field in any::<[u8; 4]>(),
        data in prop::collection::vec(any::<u8>(), 0..128),
        order in byte_order_strategy(),
    ) {
        let types = TagTypeRegistry::standard();
        let resolver = ValueResolver::new(&types, &data, order);
        let entry = entry(tag_type, unit_count, value_field, order);

        let value = resolver.value(&entry);
        let rendered = resolver.value_string(&entry, Some(8));
        prop_assert_eq!(value.is_ok(), rendered.is_ok());

        if let Err(e) = value {
            let is_truncated = matches!(e, DecodeError::TruncatedValue { .. });
            prop_assert!(is_truncated, "unexpected error: {}", e);
        }
    }

    /// Property: extraction over arbitrary bytes returns, it never panics or loops.
    #[test]
    fn prop_arbitrary_input_never_panics(
        data in prop::collection::vec(any::<u8>(), 0..512),
    ) {
        let registry = ExifRegistry::standard();
        let _ = extract_from_image(&registry, &data, &ExtractOptions::default());
    }

    /// Property: a valid header followed by garbage is decoded without panicking.
    #[test]
    fn prop_garbage_directories_never_panic(
        big_endian in any::<bool>(),
        body in prop::collection::vec(any::<u8>(), 0..512),
    ) {
        let mut data = if big_endian {
            b"MM\x00\x2a\x00\x00\x00\x08".to_vec()
        } else {
            b"II\x2a\x00\x08\x00\x00\x00".to_vec()
        };
        data.extend(body);

        let registry = ExifRegistry::standard();
        if let Ok(entries) = extract_from_image(&registry, &data, &ExtractOptions::default()) {
            for entry in entries {
                prop_assert!(entry.fq_ifd_path.starts_with("IFD"));
            }
        }
    }
}
