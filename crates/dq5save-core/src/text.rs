//! Display text for decoded fields.

use crate::error::{Error, Result};
use crate::field::FieldKind;
use crate::layout::party;
use crate::schema::SchemaEntry;
use crate::tables::Tables;

/// Text shown for an empty bag slot
pub const UNUSED_SLOT: &str = "unused";

/// First-byte values that render a name fragment as empty.
///
/// 0xD5 shows up in unused name slots; why is not understood.
const EMPTY_NAME_MARKERS: [u8; 2] = [0x00, 0xD5];

/// Decode a name fragment as UTF-8 from its low `width` bytes
pub fn decode_name_fragment(value: u32, width: usize) -> String {
    let bytes = value.to_le_bytes();
    if EMPTY_NAME_MARKERS.contains(&bytes[0]) {
        return String::new();
    }
    let len = width.min(bytes.len());
    let (decoded, _) = encoding_rs::UTF_8.decode_without_bom_handling(&bytes[..len]);
    decoded.trim_end_matches('\0').to_string()
}

/// Pack one character's UTF-8 bytes little-endian into a fragment value
pub fn encode_name_char(c: char) -> Result<u32> {
    let mut buf = [0u8; 4];
    let encoded = c.encode_utf8(&mut buf).as_bytes();
    if encoded.len() > party::NAME_FRAGMENT_WIDTH {
        return Err(Error::ValueOutOfRange {
            value: u64::from(u32::from(c)),
            width: party::NAME_FRAGMENT_WIDTH,
        });
    }
    Ok(encoded
        .iter()
        .enumerate()
        .fold(0u32, |acc, (i, &b)| acc | (u32::from(b) << (8 * i))))
}

/// Human-readable text for a schema field holding `value`
pub fn field_text(entry: &SchemaEntry, value: u32, tables: &Tables) -> String {
    match entry.kind {
        FieldKind::InventoryType if value == 0 => UNUSED_SLOT.to_string(),
        FieldKind::InventoryType => tables.items.get(value).unwrap_or_default().to_string(),
        FieldKind::RosterStat if entry.stat.is_some_and(|s| s.is_monster_code()) => {
            tables.monsters.get(value).unwrap_or_default().to_string()
        }
        FieldKind::RosterNameFragment => decode_name_fragment(value, entry.width),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Schema, Stat};
    use crate::tables::LabelTable;

    fn tables() -> Tables {
        Tables {
            items: LabelTable::parse("1\tやくそう\n"),
            monsters: LabelTable::parse("3\tスライム\n"),
            ..Tables::default()
        }
    }

    #[test]
    fn test_name_fragment_round_trip() {
        let value = encode_name_char('ア').unwrap();
        assert_eq!(value, 0xA2_82_E3);
        assert_eq!(decode_name_fragment(value, 3), "ア");

        let ascii = encode_name_char('A').unwrap();
        assert_eq!(ascii, 0x41);
        assert_eq!(decode_name_fragment(ascii, 3), "A");
    }

    #[test]
    fn test_name_fragment_empty_markers() {
        assert_eq!(decode_name_fragment(0, 3), "");
        assert_eq!(decode_name_fragment(0x00_41_D5, 3), "");
    }

    #[test]
    fn test_four_byte_char_rejected() {
        assert!(encode_name_char('😀').is_err());
    }

    #[test]
    fn test_field_text_by_kind() {
        let schema = Schema::standard();
        let tables = tables();

        let bag_type = schema.get(crate::layout::bag::type_address(0)).unwrap();
        assert_eq!(field_text(bag_type, 0, &tables), UNUSED_SLOT);
        assert_eq!(field_text(bag_type, 1, &tables), "やくそう");
        assert_eq!(field_text(bag_type, 99, &tables), "");

        let head = party::member_address(0);
        let species = schema.get(head + party::TYPE).unwrap();
        assert_eq!(species.stat, Some(Stat::Type));
        assert_eq!(field_text(species, 3, &tables), "スライム");

        let level = schema.get(head + party::LEVEL).unwrap();
        assert_eq!(field_text(level, 3, &tables), "");
    }
}
