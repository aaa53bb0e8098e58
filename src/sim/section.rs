//! Road surface sections
//!
//! Each section maps onto a block of columns in the road tile sheet:
//! a transition column, a start cap, the main column followed by its
//! decorative variants, an end cap and a base column used under the
//! cross-fade.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoadSection {
    #[default]
    White,
    Yellow,
    Dirt,
}

/// Tile-sheet column layout of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionTiles {
    pub transition_column: u32,
    pub start_column: u32,
    pub main_column: u32,
    /// Percent chance (0-100) that a lane tile uses a decorative variant
    pub variation: u32,
    pub end_column: u32,
    pub base_column: u32,
}

const WHITE: SectionTiles = SectionTiles {
    transition_column: 0,
    start_column: 1,
    main_column: 2,
    variation: 30,
    end_column: 5,
    base_column: 6,
};

const YELLOW: SectionTiles = SectionTiles {
    transition_column: 7,
    start_column: 8,
    main_column: 9,
    variation: 20,
    end_column: 12,
    base_column: 13,
};

const DIRT: SectionTiles = SectionTiles {
    transition_column: 14,
    start_column: 15,
    main_column: 16,
    variation: 40,
    end_column: 23,
    base_column: 24,
};

/// Total columns in the road tile sheet
pub const ROAD_SHEET_COLUMNS: u32 = 25;

impl RoadSection {
    pub const ALL: [RoadSection; 3] = [RoadSection::White, RoadSection::Yellow, RoadSection::Dirt];

    pub fn tiles(self) -> &'static SectionTiles {
        match self {
            RoadSection::White => &WHITE,
            RoadSection::Yellow => &YELLOW,
            RoadSection::Dirt => &DIRT,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoadSection::White => "white",
            RoadSection::Yellow => "yellow",
            RoadSection::Dirt => "dirt",
        }
    }
}

impl SectionTiles {
    /// Decorative variants sit strictly between the main column and the end cap
    pub fn variant_range(&self) -> std::ops::Range<u32> {
        (self.main_column + 1)..self.end_column
    }
}
