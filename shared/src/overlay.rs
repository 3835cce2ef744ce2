use serde::Serialize;

use crate::colors::{pack_argb, tint_buffer};
use crate::coords::block_to_tile;
use crate::highlight::{ClaimsProvider, HighlightEvaluator};
use crate::index::TerritoryIndex;
use crate::territory::Territory;
use crate::tooltip::{
    StyledLine, TooltipCompiler, blunt_tooltip, subtle_tooltip, wilderness_tooltip,
};

pub const FILL_ALPHA: i32 = 0x80;
pub const CAPITAL_FILL_ALPHA: i32 = 0xB0;
pub const ACCENT_ALPHA: i32 = 0xFF;

/// What the renderer needs for one tile inside a territory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderAttributes {
    pub territory_id: String,
    /// Host buffer with the owner tint applied, alpha untouched.
    pub colors: Option<Vec<u32>>,
    pub lines: Vec<StyledLine>,
}

/// Colors for the standalone territory layer: entry 0 is the fill, entries
/// 1..=4 the outline, which switches to the accent on boundary tiles.
pub fn territory_colors(territory: &Territory, tile_x: i32, tile_z: i32) -> [u32; 5] {
    let fill_alpha = if territory.capital {
        CAPITAL_FILL_ALPHA
    } else {
        FILL_ALPHA
    };
    let fill = pack_argb(&territory.owner_color, fill_alpha);
    let outline = if territory.rect().is_edge(tile_x, tile_z) {
        pack_argb(territory.accent_channels(), ACCENT_ALPHA)
    } else {
        fill
    };
    [fill, outline, outline, outline, outline]
}

/// Glue between the index, the host's claims, and the tooltip compiler.
/// Every method answers `None` for tiles outside all territories so the host
/// falls back to its own behavior.
pub struct TerritoryOverlay<'a, C: ?Sized> {
    index: &'a TerritoryIndex,
    claims: &'a C,
    compiler: &'a TooltipCompiler,
}

impl<'a, C: ClaimsProvider + ?Sized> TerritoryOverlay<'a, C> {
    pub fn new(index: &'a TerritoryIndex, claims: &'a C, compiler: &'a TooltipCompiler) -> Self {
        Self {
            index,
            claims,
            compiler,
        }
    }

    pub fn highlighter(&self) -> HighlightEvaluator<'a> {
        HighlightEvaluator::new(self.index)
    }

    pub fn render_attributes(
        &self,
        world: &str,
        tile_x: i32,
        tile_z: i32,
        colors: Option<Vec<u32>>,
    ) -> Option<RenderAttributes> {
        let territory = self.index.territory_at(world, tile_x, tile_z)?;
        let has_claim = self.claims.has_claim(world, tile_x, tile_z);
        Some(RenderAttributes {
            territory_id: territory.id.clone(),
            colors: tint_buffer(colors, &territory.owner_color),
            lines: self.compiler.compile(tile_x, tile_z, has_claim, territory),
        })
    }

    pub fn colors(&self, world: &str, tile_x: i32, tile_z: i32) -> Option<[u32; 5]> {
        let territory = self.index.territory_at(world, tile_x, tile_z)?;
        Some(territory_colors(territory, tile_x, tile_z))
    }

    pub fn subtle_tooltip(&self, world: &str, tile_x: i32, tile_z: i32) -> Option<String> {
        self.index
            .territory_at(world, tile_x, tile_z)
            .map(subtle_tooltip)
    }

    pub fn blunt_tooltip(&self, world: &str, tile_x: i32, tile_z: i32) -> Option<String> {
        self.index
            .territory_at(world, tile_x, tile_z)
            .map(blunt_tooltip)
    }

    pub fn block_subtle_tooltip(&self, world: &str, block_x: i32, block_z: i32) -> Option<String> {
        self.subtle_tooltip(world, block_to_tile(block_x), block_to_tile(block_z))
    }

    pub fn block_blunt_tooltip(&self, world: &str, block_x: i32, block_z: i32) -> Option<String> {
        self.index
            .territory_at(world, block_to_tile(block_x), block_to_tile(block_z))
            .map(wilderness_tooltip)
    }

    /// Replace the minimap's block tooltip with name and wilderness lines.
    /// Leaves `tooltips` alone outside territories.
    pub fn minimap_block_tooltips(
        &self,
        tooltips: &mut Vec<StyledLine>,
        world: &str,
        block_x: i32,
        block_z: i32,
    ) {
        let Some(territory) =
            self.index
                .territory_at(world, block_to_tile(block_x), block_to_tile(block_z))
        else {
            return;
        };
        tooltips.clear();
        tooltips.push(StyledLine::plain(subtle_tooltip(territory)));
        tooltips.push(StyledLine::plain(wilderness_tooltip(territory)));
    }
}

#[cfg(test)]
mod tests {
    use super::{TerritoryOverlay, territory_colors};
    use crate::colors::pack_color;
    use crate::highlight::NoClaims;
    use crate::index::TerritoryIndex;
    use crate::index::tests::{WORLD, territory};
    use crate::tooltip::{StyledLine, TextColor, TooltipCompiler};

    fn ironhold_index() -> TerritoryIndex {
        TerritoryIndex::build([territory("Ironhold", [0, 0], [9, 9])])
    }

    #[test]
    fn ironhold_scenario_inside() {
        let index = ironhold_index();
        let compiler = TooltipCompiler::default();
        let overlay = TerritoryOverlay::new(&index, &NoClaims, &compiler);

        let found = index.territory_at(WORLD, 5, 5).expect("Ironhold covers (5, 5)");
        assert_eq!(found.name, "Ironhold");
        assert_eq!(pack_color(&found.owner_color), 0xFF0000);

        let attrs = overlay
            .render_attributes(WORLD, 5, 5, Some(vec![0xFF000000]))
            .expect("tile inside Ironhold has attributes");
        assert_eq!(attrs.territory_id, "Ironhold");
        assert_eq!(attrs.colors, Some(vec![0xFFFF0000]));
        assert_eq!(attrs.lines.len(), 2);
        assert_eq!(attrs.lines[0].text, "Ironhold");
        assert_eq!(attrs.lines[1].color, TextColor::DarkGray);
    }

    #[test]
    fn ironhold_scenario_just_outside() {
        let index = ironhold_index();
        let compiler = TooltipCompiler::default();
        let overlay = TerritoryOverlay::new(&index, &NoClaims, &compiler);

        assert!(index.territory_at(WORLD, 10, 10).is_none());
        assert!(!overlay.highlighter().is_tile_highlighted(WORLD, 10, 10, false));
        assert!(overlay.render_attributes(WORLD, 10, 10, Some(vec![0xFF000000])).is_none());
        assert!(overlay.colors(WORLD, 10, 10).is_none());
        assert!(overlay.subtle_tooltip(WORLD, 10, 10).is_none());
    }

    #[test]
    fn claims_add_the_claimed_line() {
        let index = ironhold_index();
        let compiler = TooltipCompiler::default();
        let claims = |_: &str, x: i32, z: i32| x == 3 && z == 4;
        let overlay = TerritoryOverlay::new(&index, &claims, &compiler);

        let claimed = overlay
            .render_attributes(WORLD, 3, 4, None)
            .expect("inside Ironhold");
        assert_eq!(claimed.colors, None);
        assert_eq!(claimed.lines.len(), 3);
        assert_eq!(claimed.lines[1].text, "Claimed");

        let unclaimed = overlay
            .render_attributes(WORLD, 4, 3, None)
            .expect("inside Ironhold");
        assert_eq!(unclaimed.lines.len(), 2);
    }

    #[test]
    fn standalone_colors_use_accent_on_edges() {
        let mut capital = territory("Crown", [0, 0], [4, 4]);
        capital.capital = true;
        capital.owner_color = vec![0.0, 0.0, 1.0];

        let inner = territory_colors(&capital, 2, 2);
        assert_eq!(inner, [0xB000_00FF_u32; 5]);

        let edge = territory_colors(&capital, 0, 2);
        assert_eq!(edge[0], 0xB00000FF);
        assert_eq!(&edge[1..], &[0xFFFF_FF00_u32; 4]);

        let plain = territory("Hamlet", [0, 0], [4, 4]);
        assert_eq!(territory_colors(&plain, 2, 2)[0], 0x80FF0000);
        assert_eq!(territory_colors(&plain, 4, 4)[1], 0xFFFFFFFF);
    }

    #[test]
    fn block_tooltips_resolve_through_tiles() {
        let mut t = territory("Ironhold", [0, 0], [9, 9]);
        t.owner = Some("Valdren".to_string());
        let index = TerritoryIndex::build([t]);
        let compiler = TooltipCompiler::default();
        let overlay = TerritoryOverlay::new(&index, &NoClaims, &compiler);

        assert_eq!(overlay.block_subtle_tooltip(WORLD, 100, 100).as_deref(), Some("Ironhold"));
        assert_eq!(
            overlay.block_blunt_tooltip(WORLD, 100, 100).as_deref(),
            Some("Valdren Wilderness")
        );
        assert_eq!(overlay.blunt_tooltip(WORLD, 1, 1).as_deref(), Some("Ironhold (Valdren)"));
        assert!(overlay.block_subtle_tooltip(WORLD, 160, 0).is_none());
    }

    #[test]
    fn minimap_tooltips_replace_only_inside_territories() {
        let index = ironhold_index();
        let compiler = TooltipCompiler::default();
        let overlay = TerritoryOverlay::new(&index, &NoClaims, &compiler);

        let mut tooltips = vec![StyledLine::plain("host")];
        overlay.minimap_block_tooltips(&mut tooltips, WORLD, 500, 500);
        assert_eq!(tooltips, vec![StyledLine::plain("host")]);

        overlay.minimap_block_tooltips(&mut tooltips, WORLD, 8, 8);
        let texts: Vec<&str> = tooltips.iter().map(|line| line.text.as_str()).collect();
        assert_eq!(texts, vec!["Ironhold", "Ironhold Wilderness"]);
    }
}
