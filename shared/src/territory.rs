use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::coords::tile_to_group;

/// Normalized color channels as supplied by the host. Not clamped and not
/// guaranteed to hold exactly three entries.
pub type ColorChannels = Vec<f32>;

const CAPITAL_ACCENT: [f32; 3] = [1.0, 1.0, 0.0];
const DEFAULT_ACCENT: [f32; 3] = [1.0, 1.0, 1.0];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Territory {
    pub id: String,
    pub name: String,
    pub world: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub owner_color: ColorChannels,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<ColorChannels>,
    #[serde(default)]
    pub capital: bool,
    pub location: Region,
}

impl Territory {
    pub fn rect(&self) -> TileRect {
        self.location.rect()
    }

    /// Border color: the explicit accent if set, else yellow for capitals and
    /// white for everything else.
    pub fn accent_channels(&self) -> &[f32] {
        match &self.accent_color {
            Some(channels) => channels.as_slice(),
            None if self.capital => CAPITAL_ACCENT.as_slice(),
            None => DEFAULT_ACCENT.as_slice(),
        }
    }

    /// Owning faction name, or the territory name when no owner is known.
    pub fn owner_label(&self) -> &str {
        match self.owner.as_deref() {
            Some(owner) if !owner.is_empty() => owner,
            _ => &self.name,
        }
    }
}

/// Rectangle in tile coordinates as two opposite corners, in either order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub start: [i32; 2],
    pub end: [i32; 2],
}

impl Region {
    pub const fn min_x(&self) -> i32 {
        if self.start[0] < self.end[0] {
            self.start[0]
        } else {
            self.end[0]
        }
    }

    pub const fn max_x(&self) -> i32 {
        if self.start[0] > self.end[0] {
            self.start[0]
        } else {
            self.end[0]
        }
    }

    pub const fn min_z(&self) -> i32 {
        if self.start[1] < self.end[1] {
            self.start[1]
        } else {
            self.end[1]
        }
    }

    pub const fn max_z(&self) -> i32 {
        if self.start[1] > self.end[1] {
            self.start[1]
        } else {
            self.end[1]
        }
    }

    pub const fn rect(&self) -> TileRect {
        TileRect {
            min_x: self.min_x(),
            min_z: self.min_z(),
            max_x: self.max_x(),
            max_z: self.max_z(),
        }
    }
}

/// Inclusive axis-aligned rectangle; `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRect {
    pub min_x: i32,
    pub min_z: i32,
    pub max_x: i32,
    pub max_z: i32,
}

impl TileRect {
    pub const fn contains(&self, x: i32, z: i32) -> bool {
        self.min_x <= x && x <= self.max_x && self.min_z <= z && z <= self.max_z
    }

    pub const fn intersects(&self, other: &TileRect) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_z <= other.max_z
            && self.max_z >= other.min_z
    }

    /// True for tiles on the rectangle's outer ring.
    pub const fn is_edge(&self, x: i32, z: i32) -> bool {
        x == self.min_x || x == self.max_x || z == self.min_z || z == self.max_z
    }

    /// The range of groups this rectangle touches, in group coordinates.
    pub const fn group_bounds(&self) -> TileRect {
        TileRect {
            min_x: tile_to_group(self.min_x),
            min_z: tile_to_group(self.min_z),
            max_x: tile_to_group(self.max_x),
            max_z: tile_to_group(self.max_z),
        }
    }

    /// Number of cells covered, widened so huge rectangles cannot overflow.
    pub const fn area(&self) -> i64 {
        let w = self.max_x as i64 - self.min_x as i64 + 1;
        let h = self.max_z as i64 - self.min_z as i64 + 1;
        w * h
    }
}

/// Registry contents as produced by the external sync process.
/// Registry order is the order of `territories`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TerritorySnapshot {
    #[serde(default)]
    pub seq: u64,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub territories: Vec<Territory>,
}

impl TerritorySnapshot {
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
