//! In-memory asset store — the single source of truth for the catalog.
//!
//! Owned state injected into handlers via `AppState`, never a global. All
//! access goes through a `parking_lot::RwLock`; the lock is held only for
//! the duration of a call, never across an await point.

use std::collections::HashMap;

use depot_core::random;
use depot_core::{Asset, AssetKind, DepotError};
use parking_lot::RwLock;
use rand::Rng;
use tracing::debug;

/// Mutable mapping from asset id to asset record.
pub struct AssetStore {
    assets: RwLock<HashMap<String, Asset>>,
}

impl AssetStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            assets: RwLock::new(HashMap::new()),
        }
    }

    /// Fill the store with `count` random assets.
    pub fn seed(&self, count: usize) {
        let mut rng = rand::rng();
        let mut assets = self.assets.write();
        for _ in 0..count {
            let asset = random::random_asset(&mut rng);
            let _ = assets.insert(asset.id.to_string(), asset);
        }
        debug!(count, "store seeded");
    }

    /// Look up an asset by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Asset> {
        self.assets.read().get(id).cloned()
    }

    /// All current assets. Order is arbitrary and not significant.
    #[must_use]
    pub fn list(&self) -> Vec<Asset> {
        self.assets.read().values().cloned().collect()
    }

    /// Insert a new asset. Fails if the id already exists.
    pub fn insert(&self, asset: Asset) -> Result<(), DepotError> {
        let mut assets = self.assets.write();
        if assets.contains_key(asset.id.as_str()) {
            return Err(DepotError::duplicate(asset.id.as_str()));
        }
        let _ = assets.insert(asset.id.to_string(), asset);
        Ok(())
    }

    /// Insert or replace, keyed by id.
    pub fn put(&self, asset: Asset) {
        let _ = self.assets.write().insert(asset.id.to_string(), asset);
    }

    /// Update an existing asset's name and/or kind.
    ///
    /// `last_modified` is always refreshed server-side; any client-supplied
    /// timestamp is ignored.
    pub fn update(
        &self,
        id: &str,
        name: Option<String>,
        kind: Option<AssetKind>,
    ) -> Result<Asset, DepotError> {
        let mut assets = self.assets.write();
        let asset = assets.get_mut(id).ok_or_else(|| DepotError::not_found(id))?;
        if let Some(name) = name {
            depot_core::asset::validate_name(&name)?;
            asset.name = name;
        }
        if let Some(kind) = kind {
            asset.kind = kind;
        }
        asset.touch();
        Ok(asset.clone())
    }

    /// Delete an asset by id. A second delete of the same id is a
    /// not-found failure, not a crash.
    pub fn remove(&self, id: &str) -> Result<(), DepotError> {
        match self.assets.write().remove(id) {
            Some(_) => Ok(()),
            None => Err(DepotError::not_found(id)),
        }
    }

    /// Number of assets currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.read().len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.read().is_empty()
    }

    /// Run one randomized mutation cycle.
    ///
    /// Replaces the name/kind of 1..=min(3, len) uniformly sampled records
    /// and refreshes their timestamps. An empty store skips the cycle
    /// entirely. Returns how many records were touched.
    pub fn mutate_random<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let mut assets = self.assets.write();
        let ids: Vec<String> = assets.keys().cloned().collect();
        let sample = random::mutation_sample(rng, ids.len());
        for &index in &sample {
            if let Some(asset) = assets.get_mut(&ids[index]) {
                asset.name = random::random_name(rng).to_string();
                asset.kind = random::random_kind(rng);
                asset.touch();
            }
        }
        sample.len()
    }
}

impl Default for AssetStore {
    fn default() -> Self {
        Self::new()
    }
}
