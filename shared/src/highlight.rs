use crate::coords::block_to_tile;
use crate::index::TerritoryIndex;

/// Per-tile claim lookup owned by the host. Only consulted to decide whether a
/// tooltip gets the "claimed" line.
pub trait ClaimsProvider {
    fn has_claim(&self, world: &str, tile_x: i32, tile_z: i32) -> bool;
}

impl<F> ClaimsProvider for F
where
    F: Fn(&str, i32, i32) -> bool,
{
    fn has_claim(&self, world: &str, tile_x: i32, tile_z: i32) -> bool {
        self(world, tile_x, tile_z)
    }
}

/// Claims provider for hosts without a claims system.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClaims;

impl ClaimsProvider for NoClaims {
    fn has_claim(&self, _world: &str, _tile_x: i32, _tile_z: i32) -> bool {
        false
    }
}

/// Adds territory highlights on top of whatever the host already highlights.
/// A `true` from the host is never turned into `false`.
#[derive(Debug, Clone, Copy)]
pub struct HighlightEvaluator<'a> {
    index: &'a TerritoryIndex,
}

impl<'a> HighlightEvaluator<'a> {
    pub fn new(index: &'a TerritoryIndex) -> Self {
        Self { index }
    }

    pub fn is_tile_highlighted(
        &self,
        world: &str,
        tile_x: i32,
        tile_z: i32,
        base_result: bool,
    ) -> bool {
        base_result || self.index.territory_at(world, tile_x, tile_z).is_some()
    }

    pub fn is_block_highlighted(
        &self,
        world: &str,
        block_x: i32,
        block_z: i32,
        base_result: bool,
    ) -> bool {
        self.is_tile_highlighted(world, block_to_tile(block_x), block_to_tile(block_z), base_result)
    }

    /// Coarse culling test for group `(group_x, group_z)`, covering tiles
    /// `group * 32 ..= group * 32 + 31` on each axis.
    pub fn does_group_have_highlights(
        &self,
        world: &str,
        group_x: i32,
        group_z: i32,
        base_result: bool,
    ) -> bool {
        base_result || self.index.group_has_territory(world, group_x, group_z)
    }
}

#[cfg(test)]
mod tests {
    use super::{ClaimsProvider, HighlightEvaluator, NoClaims};
    use crate::index::TerritoryIndex;
    use crate::index::tests::{WORLD, territory};

    fn ironhold() -> TerritoryIndex {
        TerritoryIndex::build([territory("Ironhold", [0, 0], [9, 9])])
    }

    #[test]
    fn tile_inside_territory_is_highlighted() {
        let index = ironhold();
        let eval = HighlightEvaluator::new(&index);
        assert!(eval.is_tile_highlighted(WORLD, 5, 5, false));
        assert!(eval.is_tile_highlighted(WORLD, 0, 9, false));
    }

    #[test]
    fn tile_just_outside_is_not_highlighted() {
        let index = ironhold();
        let eval = HighlightEvaluator::new(&index);
        assert!(!eval.is_tile_highlighted(WORLD, 10, 10, false));
    }

    #[test]
    fn host_highlight_is_never_removed() {
        let index = ironhold();
        let eval = HighlightEvaluator::new(&index);
        assert!(eval.is_tile_highlighted(WORLD, 500, 500, true));
        assert!(eval.does_group_have_highlights(WORLD, 40, 40, true));
        assert!(eval.is_tile_highlighted("minecraft:the_end", 5, 5, true));
    }

    #[test]
    fn block_queries_convert_to_tiles() {
        let index = ironhold();
        let eval = HighlightEvaluator::new(&index);
        assert!(eval.is_block_highlighted(WORLD, 159, 0, false));
        assert!(!eval.is_block_highlighted(WORLD, 160, 0, false));
        assert!(!eval.is_block_highlighted(WORLD, -1, 0, false));
    }

    #[test]
    fn group_zero_tracks_territory_intersection() {
        let index = ironhold();
        let eval = HighlightEvaluator::new(&index);
        assert!(eval.does_group_have_highlights(WORLD, 0, 0, false));
        assert!(!eval.does_group_have_highlights(WORLD, 1, 0, false));
        assert!(!eval.does_group_have_highlights(WORLD, -1, -1, false));

        let empty = TerritoryIndex::default();
        let eval = HighlightEvaluator::new(&empty);
        assert!(!eval.does_group_have_highlights(WORLD, 0, 0, false));
    }

    #[test]
    fn closures_act_as_claims_providers() {
        let claims = |world: &str, x: i32, z: i32| world == WORLD && x == 1 && z == 2;
        assert!(claims.has_claim(WORLD, 1, 2));
        assert!(!claims.has_claim(WORLD, 2, 1));
        assert!(!NoClaims.has_claim(WORLD, 1, 2));
    }
}
