//! ** ids module **
//! Named constant tables for the game ids that quest content refers to.
//! Content code uses these names rather than bare numbers.

/// Inventory item ids.
pub mod item {
    use questkit_data::ItemId;

    pub const CANDLE: ItemId = ItemId(36);
    pub const BLACK_CANDLE: ItemId = ItemId(38);
    pub const TINDERBOX: ItemId = ItemId(590);
    pub const SILK: ItemId = ItemId(950);
    pub const PAPYRUS: ItemId = ItemId(970);
    pub const LOGS: ItemId = ItemId(1511);
    pub const AMULET_OF_GLORY1: ItemId = ItemId(1706);
    pub const AMULET_OF_GLORY2: ItemId = ItemId(1708);
    pub const AMULET_OF_GLORY3: ItemId = ItemId(1710);
    pub const AMULET_OF_GLORY4: ItemId = ItemId(1712);
    pub const BALL_OF_WOOL: ItemId = ItemId(1759);
    pub const RED_DYE: ItemId = ItemId(1763);
    pub const YELLOW_DYE: ItemId = ItemId(1765);
    pub const BOWL: ItemId = ItemId(1923);
    pub const EMPTY_SACK: ItemId = ItemId(5418);
    pub const POTATOES10: ItemId = ItemId(5438);
    pub const WILLOW_BRANCH: ItemId = ItemId(5933);
    pub const BALLOON_STRUCTURE: ItemId = ItemId(9933);
    pub const ORIGAMI_BALLOON: ItemId = ItemId(9934);
    pub const SANDBAG: ItemId = ItemId(9943);
    pub const AMULET_OF_GLORY_T4: ItemId = ItemId(10354);
    pub const AMULET_OF_GLORY_T3: ItemId = ItemId(10356);
    pub const AMULET_OF_GLORY_T2: ItemId = ItemId(10358);
    pub const AMULET_OF_GLORY_T1: ItemId = ItemId(10360);
    pub const AMULET_OF_GLORY_T6: ItemId = ItemId(11964);
    pub const AMULET_OF_GLORY_T5: ItemId = ItemId(11966);
    pub const AMULET_OF_GLORY5: ItemId = ItemId(11976);
    pub const AMULET_OF_GLORY6: ItemId = ItemId(11978);
    pub const EXPLORERS_RING_3: ItemId = ItemId(13127);
    pub const EXPLORERS_RING_4: ItemId = ItemId(13128);
    pub const AMULET_OF_ETERNAL_GLORY: ItemId = ItemId(19707);
    pub const DRAYNOR_MANOR_TELEPORT: ItemId = ItemId(19615);
}

/// Non-player character ids.
pub mod npc {
    use questkit_data::NpcId;

    pub const MONK_OF_ENTRANA_1167: NpcId = NpcId(1167);
    pub const AUGUSTE: NpcId = NpcId(1176);
}

/// Scenery object ids.
pub mod object {
    use questkit_data::ObjectId;

    pub const SAND_PIT: ObjectId = ObjectId(9945);
    pub const BALLOON_BASKET: ObjectId = ObjectId(19133);
}

/// Varbits read by quest conditions.
pub mod varbit {
    /// Set to 1 once Auguste has been handed the sandbags.
    pub const SANDBAGS_GIVEN: u32 = 2875;
}

/// Widget `(group, child)` addresses read by quest conditions.
pub mod widget {
    pub const BALLOON_CONTROLS: (u32, u32) = (471, 1);
}

/// Groups of interchangeable items.
pub mod collections {
    use super::item;
    use questkit_data::ItemId;

    /// Every charged amulet of glory, most charges first.
    pub fn amulets_of_glory() -> Vec<ItemId> {
        vec![
            item::AMULET_OF_ETERNAL_GLORY,
            item::AMULET_OF_GLORY6,
            item::AMULET_OF_GLORY5,
            item::AMULET_OF_GLORY4,
            item::AMULET_OF_GLORY3,
            item::AMULET_OF_GLORY2,
            item::AMULET_OF_GLORY1,
            item::AMULET_OF_GLORY_T6,
            item::AMULET_OF_GLORY_T5,
            item::AMULET_OF_GLORY_T4,
            item::AMULET_OF_GLORY_T3,
            item::AMULET_OF_GLORY_T2,
            item::AMULET_OF_GLORY_T1,
        ]
    }
}
