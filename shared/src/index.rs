use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::coords::{group_rect, tile_to_group};
use crate::territory::{Territory, TerritorySnapshot, TileRect};

/// Territories covering more groups than this skip bucketing and are scanned
/// on every query instead.
const MAX_BUCKETED_GROUPS: i64 = 4096;

/// Territories of one world, bucketed by the groups they touch.
/// Buckets hold registry indices in ascending order.
#[derive(Debug, Default)]
struct WorldTerritories {
    territories: Vec<Territory>,
    rects: Vec<TileRect>,
    buckets: HashMap<(i32, i32), Vec<u32>>,
    oversized: Vec<u32>,
}

impl WorldTerritories {
    fn push(&mut self, territory: Territory) {
        let idx = self.territories.len() as u32;
        let rect = territory.rect();
        let groups = rect.group_bounds();

        if groups.area() > MAX_BUCKETED_GROUPS {
            warn!(
                territory = %territory.id,
                groups = groups.area(),
                "territory too large to bucket, scanning it on every query"
            );
            self.oversized.push(idx);
        } else {
            for gz in groups.min_z..=groups.max_z {
                for gx in groups.min_x..=groups.max_x {
                    self.buckets.entry((gx, gz)).or_default().push(idx);
                }
            }
        }

        self.rects.push(rect);
        self.territories.push(territory);
    }

    /// Lowest registry index whose rectangle contains the tile.
    fn first_containing(&self, x: i32, z: i32) -> Option<usize> {
        let hit = |&idx: &u32| self.rects[idx as usize].contains(x, z);
        let bucketed = self
            .buckets
            .get(&(tile_to_group(x), tile_to_group(z)))
            .and_then(|bucket| bucket.iter().copied().find(hit));
        let oversized = self.oversized.iter().copied().find(hit);

        match (bucketed, oversized) {
            (Some(a), Some(b)) => Some(a.min(b) as usize),
            (a, b) => a.or(b).map(|idx| idx as usize),
        }
    }

    fn touches_group(&self, group_x: i32, group_z: i32) -> bool {
        if self.buckets.contains_key(&(group_x, group_z)) {
            return true;
        }
        let rect = group_rect(group_x, group_z);
        self.oversized
            .iter()
            .any(|&idx| self.rects[idx as usize].intersects(&rect))
    }
}

/// Read-only view of the Territory Registry, answering point and rectangle
/// queries per world. Built once per registry snapshot.
#[derive(Debug, Default)]
pub struct TerritoryIndex {
    worlds: HashMap<String, WorldTerritories>,
    len: usize,
    seq: u64,
    timestamp: Option<DateTime<Utc>>,
}

impl TerritoryIndex {
    /// Build from territories in registry order.
    pub fn build(territories: impl IntoIterator<Item = Territory>) -> Self {
        let mut worlds: HashMap<String, WorldTerritories> = HashMap::new();
        let mut len = 0;
        for territory in territories {
            worlds
                .entry(territory.world.clone())
                .or_default()
                .push(territory);
            len += 1;
        }

        debug!(territories = len, worlds = worlds.len(), "built territory index");

        Self {
            worlds,
            len,
            seq: 0,
            timestamp: None,
        }
    }

    pub fn from_snapshot(snapshot: TerritorySnapshot) -> Self {
        let mut index = Self::build(snapshot.territories);
        index.seq = snapshot.seq;
        index.timestamp = snapshot.timestamp;
        index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn world_count(&self) -> usize {
        self.worlds.len()
    }

    /// Sequence number of the snapshot this index was built from.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// All territories of a world in registry order.
    pub fn territories_in(&self, world: &str) -> &[Territory] {
        self.worlds
            .get(world)
            .map(|entries| entries.territories.as_slice())
            .unwrap_or_default()
    }

    /// First territory in registry order whose rectangle contains the tile.
    pub fn territory_at(&self, world: &str, tile_x: i32, tile_z: i32) -> Option<&Territory> {
        let entries = self.worlds.get(world)?;
        let idx = entries.first_containing(tile_x, tile_z)?;
        Some(&entries.territories[idx])
    }

    /// Territories intersecting `rect`, in registry order. Lazy, so callers
    /// that only need a yes/no stop at the first match.
    pub fn territories_intersecting<'a>(
        &'a self,
        world: &str,
        rect: TileRect,
    ) -> impl Iterator<Item = &'a Territory> + use<'a> {
        self.worlds.get(world).into_iter().flat_map(move |entries| {
            entries
                .territories
                .iter()
                .zip(entries.rects.iter())
                .filter(move |(_, r)| r.intersects(&rect))
                .map(|(territory, _)| territory)
        })
    }

    /// Whether any territory intersects group `(group_x, group_z)`. Same answer
    /// as testing the group's tile rectangle with `territories_intersecting`,
    /// answered from the buckets.
    pub fn group_has_territory(&self, world: &str, group_x: i32, group_z: i32) -> bool {
        self.worlds
            .get(world)
            .is_some_and(|entries| entries.touches_group(group_x, group_z))
    }

    /// Change hash for a group: 0 when the world has no territories, otherwise a
    /// CRC32 over the group and every intersecting territory's id and origin.
    /// Hosts compare it across frames to decide when a cached group render is stale.
    pub fn group_hash(&self, world: &str, group_x: i32, group_z: i32) -> u32 {
        let Some(entries) = self.worlds.get(world) else {
            return 0;
        };
        if entries.territories.is_empty() {
            return 0;
        }

        let rect = group_rect(group_x, group_z);
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(world.as_bytes());
        hasher.update(&group_x.to_le_bytes());
        hasher.update(&group_z.to_le_bytes());
        for (territory, r) in entries.territories.iter().zip(entries.rects.iter()) {
            if r.intersects(&rect) {
                hasher.update(territory.id.as_bytes());
                hasher.update(&r.min_x.to_le_bytes());
                hasher.update(&r.min_z.to_le_bytes());
            }
        }
        hasher.finalize()
    }
}
