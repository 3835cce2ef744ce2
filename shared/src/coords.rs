//! Coordinate spaces: blocks (finest), tiles, and 32x32-tile groups.
//!
//! Every conversion is an arithmetic shift, so it floors toward negative
//! infinity and tile -1 lands in group -1, not group 0.

use crate::territory::TileRect;

/// log2 of the group edge length in tiles.
pub const GROUP_SHIFT: u32 = 5;
/// Tiles per group edge.
pub const GROUP_SIZE: i32 = 1 << GROUP_SHIFT;
/// log2 of the tile edge length in blocks.
pub const BLOCK_SHIFT: u32 = 4;

pub const fn tile_to_group(tile: i32) -> i32 {
    tile >> GROUP_SHIFT
}

pub const fn block_to_tile(block: i32) -> i32 {
    block >> BLOCK_SHIFT
}

/// Inclusive tile rectangle covered by group `(group_x, group_z)`.
///
/// Saturates instead of wrapping for group coordinates that no tile can map to.
pub const fn group_rect(group_x: i32, group_z: i32) -> TileRect {
    let min_x = group_x.saturating_mul(GROUP_SIZE);
    let min_z = group_z.saturating_mul(GROUP_SIZE);
    TileRect {
        min_x,
        min_z,
        max_x: min_x.saturating_add(GROUP_SIZE - 1),
        max_z: min_z.saturating_add(GROUP_SIZE - 1),
    }
}
