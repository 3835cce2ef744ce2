use std::path::PathBuf;
use std::time::Duration;

use kingdom_overlay_shared::TooltipLabels;

pub const DEFAULT_TERRITORIES_PATH: &str = "data/territories.json";
pub const DEFAULT_CLAIMS_PATH: &str = "data/claims.json";
pub const DEFAULT_REGISTRY_REFRESH_SECS: u64 = 5;
pub const DEFAULT_SERVER_PORT: u16 = 3000;

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

pub fn territories_path() -> PathBuf {
    non_empty_var("TERRITORIES_PATH")
        .unwrap_or_else(|| DEFAULT_TERRITORIES_PATH.to_owned())
        .into()
}

pub fn claims_path() -> PathBuf {
    non_empty_var("CLAIMS_PATH")
        .unwrap_or_else(|| DEFAULT_CLAIMS_PATH.to_owned())
        .into()
}

pub fn registry_refresh_interval() -> Duration {
    non_empty_var("REGISTRY_REFRESH_SECS")
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_REGISTRY_REFRESH_SECS))
}

pub fn server_port() -> u16 {
    non_empty_var("SERVER_PORT")
        .and_then(|value| value.parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SERVER_PORT)
}

/// Tooltip text is localized by whoever deploys the server, not by the engine.
pub fn tooltip_labels() -> TooltipLabels {
    let defaults = TooltipLabels::default();
    TooltipLabels {
        claimed: non_empty_var("CLAIMED_LABEL").unwrap_or(defaults.claimed),
        coords: non_empty_var("COORDS_LABEL").unwrap_or(defaults.coords),
    }
}
