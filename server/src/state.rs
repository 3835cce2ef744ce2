use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use kingdom_overlay_shared::{
    ClaimsProvider, TerritoryIndex, TerritoryOverlay, TextFilter, TooltipCompiler, TooltipLabels,
};
use serde::Deserialize;
use tokio::sync::RwLock;

/// Immutable registry view. Reloads build a new one and swap the `Arc`, so a
/// query keeps a consistent view for its whole duration.
#[derive(Debug)]
pub struct RegistrySnapshot {
    pub index: TerritoryIndex,
    pub loaded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClaimRecord {
    pub world: String,
    pub x: i32,
    pub z: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClaimsFile {
    #[serde(default)]
    pub claims: Vec<ClaimRecord>,
}

/// Claimed tiles per world.
#[derive(Debug, Default)]
pub struct ClaimTable {
    by_world: DashMap<String, HashSet<(i32, i32)>>,
}

impl ClaimTable {
    /// Swap in a new claim set. Each world's set is replaced whole; worlds
    /// absent from `records` are dropped.
    pub fn replace(&self, records: Vec<ClaimRecord>) {
        let mut fresh: HashMap<String, HashSet<(i32, i32)>> = HashMap::new();
        for record in records {
            fresh
                .entry(record.world)
                .or_default()
                .insert((record.x, record.z));
        }

        self.by_world.retain(|world, _| fresh.contains_key(world));
        for (world, tiles) in fresh {
            self.by_world.insert(world, tiles);
        }
    }

    pub fn len(&self) -> usize {
        self.by_world.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_world.iter().all(|entry| entry.value().is_empty())
    }
}

impl ClaimsProvider for ClaimTable {
    fn has_claim(&self, world: &str, tile_x: i32, tile_z: i32) -> bool {
        self.by_world
            .get(world)
            .is_some_and(|tiles| tiles.contains(&(tile_x, tile_z)))
    }
}

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RwLock<Arc<RegistrySnapshot>>>,
    pub claims: Arc<ClaimTable>,
    pub compiler: Arc<TooltipCompiler>,
    pub text_filter: Arc<TextFilter>,
    pub observability: Arc<ObservabilityCounters>,
}

impl AppState {
    pub fn new(labels: TooltipLabels) -> Self {
        Self {
            registry: Arc::new(RwLock::new(Arc::new(RegistrySnapshot {
                index: TerritoryIndex::default(),
                loaded_at: None,
            }))),
            claims: Arc::new(ClaimTable::default()),
            compiler: Arc::new(TooltipCompiler::new(labels)),
            text_filter: Arc::new(TextFilter::default()),
            observability: Arc::new(ObservabilityCounters::default()),
        }
    }

    /// Current registry view; cheap, holds the lock only to clone the `Arc`.
    pub async fn snapshot(&self) -> Arc<RegistrySnapshot> {
        Arc::clone(&*self.registry.read().await)
    }

    pub async fn replace_index(&self, index: TerritoryIndex) {
        let snapshot = Arc::new(RegistrySnapshot {
            index,
            loaded_at: Some(Utc::now()),
        });
        *self.registry.write().await = snapshot;
    }

    pub fn overlay<'a>(
        &'a self,
        snapshot: &'a RegistrySnapshot,
    ) -> TerritoryOverlay<'a, ClaimTable> {
        TerritoryOverlay::new(&snapshot.index, self.claims.as_ref(), self.compiler.as_ref())
    }
}

#[derive(Debug, Default)]
pub struct ObservabilityCounters {
    territory_queries_total: AtomicU64,
    tile_queries_total: AtomicU64,
    group_queries_total: AtomicU64,
    overlay_queries_total: AtomicU64,
    tint_requests_total: AtomicU64,
    text_filter_requests_total: AtomicU64,
    text_suppressed_total: AtomicU64,
    registry_reloads_total: AtomicU64,
    registry_reload_failures_total: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ObservabilitySnapshot {
    pub territory_queries_total: u64,
    pub tile_queries_total: u64,
    pub group_queries_total: u64,
    pub overlay_queries_total: u64,
    pub tint_requests_total: u64,
    pub text_filter_requests_total: u64,
    pub text_suppressed_total: u64,
    pub registry_reloads_total: u64,
    pub registry_reload_failures_total: u64,
}

impl ObservabilityCounters {
    pub fn snapshot(&self) -> ObservabilitySnapshot {
        ObservabilitySnapshot {
            territory_queries_total: self.territory_queries_total.load(Ordering::Relaxed),
            tile_queries_total: self.tile_queries_total.load(Ordering::Relaxed),
            group_queries_total: self.group_queries_total.load(Ordering::Relaxed),
            overlay_queries_total: self.overlay_queries_total.load(Ordering::Relaxed),
            tint_requests_total: self.tint_requests_total.load(Ordering::Relaxed),
            text_filter_requests_total: self.text_filter_requests_total.load(Ordering::Relaxed),
            text_suppressed_total: self.text_suppressed_total.load(Ordering::Relaxed),
            registry_reloads_total: self.registry_reloads_total.load(Ordering::Relaxed),
            registry_reload_failures_total: self
                .registry_reload_failures_total
                .load(Ordering::Relaxed),
        }
    }

    pub fn record_territory_query(&self) {
        self.territory_queries_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_tile_query(&self) {
        self.tile_queries_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_group_query(&self) {
        self.group_queries_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_overlay_query(&self) {
        self.overlay_queries_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_tint_request(&self) {
        self.tint_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_text_filter_request(&self, suppressed: bool) {
        self.text_filter_requests_total
            .fetch_add(1, Ordering::Relaxed);
        if suppressed {
            self.text_suppressed_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_registry_reload(&self) {
        self.registry_reloads_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_registry_reload_failure(&self) {
        self.registry_reload_failures_total
            .fetch_add(1, Ordering::Relaxed);
    }
}
