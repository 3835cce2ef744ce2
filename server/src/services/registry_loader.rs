use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use kingdom_overlay_shared::{TerritoryIndex, TerritorySnapshot};
use tracing::{info, warn};

use crate::state::{AppState, ClaimsFile};

type LoadError = Box<dyn std::error::Error + Send + Sync>;

/// Content fingerprints of the last successfully applied files.
#[derive(Debug, Default)]
pub struct LoadedFiles {
    territories_crc: Option<u32>,
    claims_crc: Option<u32>,
}

pub async fn run(
    state: AppState,
    territories_path: PathBuf,
    claims_path: PathBuf,
    period: Duration,
) {
    let mut interval = tokio::time::interval(period);
    let mut loaded = LoadedFiles::default();

    // First tick fires immediately, so the registry is populated at startup.
    loop {
        interval.tick().await;

        match reload_territories(&state, &territories_path, &mut loaded).await {
            Ok(Some(count)) => {
                state.observability.record_registry_reload();
                info!(
                    territories = count,
                    path = %territories_path.display(),
                    "loaded territory registry"
                );
            }
            Ok(None) => {}
            Err(e) => {
                state.observability.record_registry_reload_failure();
                warn!(
                    error = %e,
                    path = %territories_path.display(),
                    "failed to load territory registry, keeping previous snapshot"
                );
            }
        }

        match reload_claims(&state, &claims_path, &mut loaded).await {
            Ok(Some(count)) => {
                info!(
                    claims = count,
                    path = %claims_path.display(),
                    "loaded claims table"
                );
            }
            Ok(None) => {}
            Err(e) => {
                warn!(
                    error = %e,
                    path = %claims_path.display(),
                    "failed to load claims table, keeping previous claims"
                );
            }
        }
    }
}

/// Reload the registry if the file changed. Returns the territory count when a
/// new snapshot was swapped in.
pub async fn reload_territories(
    state: &AppState,
    path: &Path,
    loaded: &mut LoadedFiles,
) -> Result<Option<usize>, LoadError> {
    let bytes = tokio::fs::read(path).await?;
    let crc = crc32fast::hash(&bytes);
    if loaded.territories_crc == Some(crc) {
        return Ok(None);
    }

    let snapshot = TerritorySnapshot::from_json(&bytes)?;
    let index =
        tokio::task::spawn_blocking(move || TerritoryIndex::from_snapshot(snapshot)).await?;
    let count = index.len();
    state.replace_index(index).await;
    loaded.territories_crc = Some(crc);
    Ok(Some(count))
}

/// Reload the claims table if the file changed. A missing file means no claims.
pub async fn reload_claims(
    state: &AppState,
    path: &Path,
    loaded: &mut LoadedFiles,
) -> Result<Option<usize>, LoadError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            if loaded.claims_crc.take().is_some() || !state.claims.is_empty() {
                state.claims.replace(Vec::new());
                return Ok(Some(0));
            }
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let crc = crc32fast::hash(&bytes);
    if loaded.claims_crc == Some(crc) {
        return Ok(None);
    }

    let file: ClaimsFile = serde_json::from_slice(&bytes)?;
    let count = file.claims.len();
    state.claims.replace(file.claims);
    loaded.claims_crc = Some(crc);
    Ok(Some(count))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use kingdom_overlay_shared::{ClaimsProvider, TooltipLabels};

    use super::{LoadedFiles, reload_claims, reload_territories};
    use crate::state::AppState;

    const TERRITORIES: &str = r#"{
        "seq": 3,
        "territories": [
            {
                "id": "ironhold",
                "name": "Ironhold",
                "world": "overworld",
                "owner_color": [1.0, 0.0, 0.0],
                "location": { "start": [0, 0], "end": [9, 9] }
            }
        ]
    }"#;

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "kingdom-overlay-{}-{name}.json",
            std::process::id()
        ))
    }

    #[tokio::test]
    async fn territories_reload_only_when_content_changes() {
        let path = scratch_file("territories-reload");
        tokio::fs::write(&path, TERRITORIES)
            .await
            .expect("write territories fixture");

        let state = AppState::new(TooltipLabels::default());
        let mut loaded = LoadedFiles::default();

        let first = reload_territories(&state, &path, &mut loaded)
            .await
            .expect("first load succeeds");
        assert_eq!(first, Some(1));
        let snapshot = state.snapshot().await;
        assert_eq!(snapshot.index.seq(), 3);
        assert!(snapshot.loaded_at.is_some());
        assert!(snapshot.index.territory_at("overworld", 5, 5).is_some());

        let second = reload_territories(&state, &path, &mut loaded)
            .await
            .expect("unchanged reload succeeds");
        assert_eq!(second, None);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn malformed_registry_keeps_previous_snapshot() {
        let path = scratch_file("territories-malformed");
        tokio::fs::write(&path, TERRITORIES)
            .await
            .expect("write territories fixture");

        let state = AppState::new(TooltipLabels::default());
        let mut loaded = LoadedFiles::default();
        reload_territories(&state, &path, &mut loaded)
            .await
            .expect("first load succeeds");

        tokio::fs::write(&path, "{ not json")
            .await
            .expect("overwrite fixture");
        assert!(reload_territories(&state, &path, &mut loaded).await.is_err());
        assert_eq!(state.snapshot().await.index.len(), 1);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn missing_claims_file_means_no_claims() {
        let path = scratch_file("claims-missing");
        let _ = tokio::fs::remove_file(&path).await;

        let state = AppState::new(TooltipLabels::default());
        let mut loaded = LoadedFiles::default();
        let result = reload_claims(&state, &path, &mut loaded)
            .await
            .expect("missing claims file is not an error");
        assert_eq!(result, None);
        assert!(state.claims.is_empty());
    }

    #[tokio::test]
    async fn claims_load_and_clear_when_file_disappears() {
        let path = scratch_file("claims-clear");
        tokio::fs::write(
            &path,
            r#"{"claims": [{"world": "overworld", "x": 3, "z": 4}]}"#,
        )
        .await
        .expect("write claims fixture");

        let state = AppState::new(TooltipLabels::default());
        let mut loaded = LoadedFiles::default();
        let count = reload_claims(&state, &path, &mut loaded)
            .await
            .expect("claims load");
        assert_eq!(count, Some(1));
        assert!(state.claims.has_claim("overworld", 3, 4));

        tokio::fs::remove_file(&path)
            .await
            .expect("remove claims fixture");
        let cleared = reload_claims(&state, &path, &mut loaded)
            .await
            .expect("missing file clears claims");
        assert_eq!(cleared, Some(0));
        assert!(!state.claims.has_claim("overworld", 3, 4));
    }
}
