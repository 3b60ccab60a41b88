//! Randomized asset generation and mutation sampling.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::asset::{now_rfc3339, Asset, AssetKind};
use crate::ids::AssetId;

/// Display-name pool for generated assets.
pub const ASSET_NAMES: [&str; 13] = [
    "Character_Mesh",
    "Building_Structure",
    "Vehicle_Model",
    "Environment_Asset",
    "Prop_Item",
    "Weapon_3D",
    "Furniture_Piece",
    "Tree_Model",
    "Rock_Formation",
    "Architecture_Element",
    "Decorative_Object",
    "Animated_Character",
    "Static_Mesh",
];

/// At most this many assets are touched per mutation cycle.
pub const MAX_MUTATIONS_PER_CYCLE: usize = 3;

/// Pick a random name from the pool.
pub fn random_name<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    // The pool is non-empty, so choose never returns None.
    ASSET_NAMES.choose(rng).copied().unwrap_or(ASSET_NAMES[0])
}

/// Pick a random kind from the closed set.
pub fn random_kind<R: Rng + ?Sized>(rng: &mut R) -> AssetKind {
    AssetKind::ALL
        .choose(rng)
        .copied()
        .unwrap_or(AssetKind::Glb)
}

/// Generate a fresh asset with a new id and the current timestamp.
///
/// Pool names are within the validation bounds by construction, so this
/// builds the record directly.
pub fn random_asset<R: Rng + ?Sized>(rng: &mut R) -> Asset {
    Asset {
        id: AssetId::new(),
        name: random_name(rng).to_string(),
        kind: random_kind(rng),
        last_modified: now_rfc3339(),
    }
}

/// Sample the indices to mutate in one cycle over a store of `len` records.
///
/// Uniformly picks `k` in `1..=min(3, len)` distinct indices; an empty
/// store yields an empty sample (the cycle is skipped entirely).
pub fn mutation_sample<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let k = rng.random_range(1..=len.min(MAX_MUTATIONS_PER_CYCLE));
    rand::seq::index::sample(rng, len, k).into_vec()
}
