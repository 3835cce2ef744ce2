pub mod colors;
pub mod coords;
pub mod highlight;
pub mod index;
pub mod overlay;
pub mod territory;
pub mod text_filter;
pub mod tooltip;

pub use colors::{apply_tint, pack_argb, pack_color, tint_buffer};
pub use coords::{block_to_tile, group_rect, tile_to_group};
pub use highlight::{ClaimsProvider, HighlightEvaluator, NoClaims};
pub use index::TerritoryIndex;
pub use overlay::{RenderAttributes, TerritoryOverlay, territory_colors};
pub use territory::*;
pub use text_filter::{TextFilter, UiChannel, UiText};
pub use tooltip::{StyledLine, TextColor, TooltipCompiler, TooltipLabels};
