use serde::{Deserialize, Serialize};

use crate::territory::Territory;

/// Chat-palette colors used by the overlay text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextColor {
    Gold,
    Green,
    DarkGray,
    White,
}

impl TextColor {
    /// Minecraft-style color as RGB bytes.
    pub fn color_rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Gold => (255, 170, 0),
            Self::Green => (85, 255, 85),
            Self::DarkGray => (85, 85, 85),
            Self::White => (255, 255, 255),
        }
    }
}

/// One tooltip line: already-localized text plus its style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledLine {
    pub text: String,
    pub color: TextColor,
    #[serde(default)]
    pub bold: bool,
}

impl StyledLine {
    pub fn new(text: impl Into<String>, color: TextColor) -> Self {
        Self {
            text: text.into(),
            color,
            bold: false,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, TextColor::White)
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Localized fragments supplied by the host. `coords` may contain `{x}` and
/// `{z}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipLabels {
    pub claimed: String,
    pub coords: String,
}

impl Default for TooltipLabels {
    fn default() -> Self {
        Self {
            claimed: "Claimed".to_string(),
            coords: "Tile {x}, {z}".to_string(),
        }
    }
}

impl TooltipLabels {
    pub fn coords_line(&self, tile_x: i32, tile_z: i32) -> String {
        self.coords
            .replace("{x}", &tile_x.to_string())
            .replace("{z}", &tile_z.to_string())
    }
}

/// Builds the per-tile ownership tooltip. Only call it for tiles that have a
/// territory; tiles without one keep the host's default tooltip.
#[derive(Debug, Clone, Default)]
pub struct TooltipCompiler {
    labels: TooltipLabels,
}

impl TooltipCompiler {
    pub fn new(labels: TooltipLabels) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &TooltipLabels {
        &self.labels
    }

    /// Lines in fixed order: name, claimed marker (only with a claim), coordinates.
    pub fn compile(
        &self,
        tile_x: i32,
        tile_z: i32,
        has_claim: bool,
        territory: &Territory,
    ) -> Vec<StyledLine> {
        let mut lines = Vec::with_capacity(3);
        self.compile_into(&mut lines, tile_x, tile_z, has_claim, territory);
        lines
    }

    /// Append the same lines to a host-owned, already-open sink.
    pub fn compile_into<S: Extend<StyledLine>>(
        &self,
        sink: &mut S,
        tile_x: i32,
        tile_z: i32,
        has_claim: bool,
        territory: &Territory,
    ) {
        sink.extend([StyledLine::new(territory.name.as_str(), TextColor::Gold).bold()]);
        if has_claim {
            sink.extend([StyledLine::new(self.labels.claimed.as_str(), TextColor::Green)]);
        }
        sink.extend([StyledLine::new(
            self.labels.coords_line(tile_x, tile_z),
            TextColor::DarkGray,
        )]);
    }
}

/// Short label: the territory name.
pub fn subtle_tooltip(territory: &Territory) -> String {
    territory.name.clone()
}

/// Long label: `"{name} ({owner})"`, or just the name without an owner.
pub fn blunt_tooltip(territory: &Territory) -> String {
    match territory.owner.as_deref() {
        Some(owner) if !owner.is_empty() => format!("{} ({owner})", territory.name),
        _ => territory.name.clone(),
    }
}

/// Block-level label for the land around a territory's owner.
pub fn wilderness_tooltip(territory: &Territory) -> String {
    format!("{} Wilderness", territory.owner_label())
}
