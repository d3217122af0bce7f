//! Save file layout constants
//!
//! This module centralizes the fixed offsets of every known field in the
//! save blob. Constants are organized by region.

/// Gold carried by the party, stored as 4 independent single-byte fields
pub mod money {
    /// First money byte (least significant)
    pub const START: usize = 0x0014;
    /// Number of money bytes
    pub const BYTES: usize = 4;
}

/// Bag (inventory) slots
///
/// Item types and item counts live in two parallel arrays.
pub mod bag {
    /// Number of editable bag slots
    pub const SLOTS: usize = 150;

    /// Item type array start
    pub const TYPE_START: usize = 0x0034;
    /// Width of one item type
    pub const TYPE_WIDTH: usize = 2;

    /// Item count array start
    pub const COUNT_START: usize = 0x0258;
    /// Width of one item count
    pub const COUNT_WIDTH: usize = 1;

    /// Address of the item type for a slot
    pub const fn type_address(slot: usize) -> usize {
        TYPE_START + slot * TYPE_WIDTH
    }

    /// Address of the item count for a slot
    pub const fn count_address(slot: usize) -> usize {
        COUNT_START + slot * COUNT_WIDTH
    }
}

/// Party roster (humans and recruited monsters)
pub mod party {
    /// First member block (the hero)
    pub const START: usize = 0x0450;
    /// Number of editable members
    pub const MEMBERS: usize = 100;
    /// Size of one member block
    pub const MEMBER_SIZE: usize = 68;

    pub const EXP: usize = 0;

    // HP/MP pairs follow the experience counter
    pub const CUR_HP: usize = 4;
    pub const MAX_HP: usize = CUR_HP + 2;
    pub const CUR_MP: usize = CUR_HP + 4;
    pub const MAX_MP: usize = CUR_HP + 6;

    /// Monster species (unconfirmed)
    pub const TYPE: usize = CUR_HP + 8;
    /// 0 = human, 1 = monster (unconfirmed)
    pub const RACE: usize = CUR_HP + 34;
    /// Portrait (unconfirmed)
    pub const FACE: usize = CUR_HP + 35;

    /// Name characters, one UTF-8 character per 3-byte fragment
    pub const NAME: [usize; 4] = [CUR_HP + 36, CUR_HP + 39, CUR_HP + 42, CUR_HP + 45];
    pub const NAME_FRAGMENT_WIDTH: usize = 3;

    pub const STRENGTH: usize = CUR_HP + 56;
    pub const DEFENCE: usize = CUR_HP + 57;
    pub const AGILITY: usize = CUR_HP + 58;
    pub const WISDOM: usize = CUR_HP + 59;
    pub const LUCK: usize = CUR_HP + 60;

    pub const LEVEL: usize = EXP + MEMBER_SIZE - 3;

    /// One past the last member block
    pub const END: usize = START + MEMBERS * MEMBER_SIZE;

    /// Address of the first byte of a member block
    pub const fn member_address(member: usize) -> usize {
        START + member * MEMBER_SIZE
    }
}

/// Mask dump constants
pub mod dump {
    /// Reference byte assumed for an unmasked stream
    pub const REFERENCE_BYTE: u8 = 0xFF;
}
