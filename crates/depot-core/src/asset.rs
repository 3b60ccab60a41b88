//! The `Asset` record and its closed kind set.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DepotError;
use crate::ids::AssetId;

/// Minimum display-name length.
pub const NAME_MIN: usize = 3;
/// Maximum display-name length.
pub const NAME_MAX: usize = 50;

/// File format of a catalog asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// Binary glTF container.
    Glb,
    /// JSON glTF document.
    Gltf,
}

impl AssetKind {
    /// Every kind in the closed set.
    pub const ALL: [AssetKind; 2] = [AssetKind::Glb, AssetKind::Gltf];

    /// Wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AssetKind::Glb => "glb",
            AssetKind::Gltf => "gltf",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = DepotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "glb" => Ok(AssetKind::Glb),
            "gltf" => Ok(AssetKind::Gltf),
            other => Err(DepotError::Validation {
                message: format!("unknown asset type '{other}' (expected 'glb' or 'gltf')"),
            }),
        }
    }
}

/// A catalog asset record.
///
/// The JSON field for [`Asset::kind`] is `type` to match the wire contract
/// consumed by existing clients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Opaque unique identifier. Immutable once created.
    pub id: AssetId,
    /// Display name, 3–50 characters.
    pub name: String,
    /// File format.
    #[serde(rename = "type")]
    pub kind: AssetKind,
    /// RFC 3339 timestamp of the last mutation of this record.
    pub last_modified: String,
}

impl Asset {
    /// Create an asset with the current timestamp.
    ///
    /// Returns a validation error if the name is out of bounds.
    pub fn new(id: AssetId, name: impl Into<String>, kind: AssetKind) -> Result<Self, DepotError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            id,
            name,
            kind,
            last_modified: now_rfc3339(),
        })
    }

    /// Refresh `last_modified` to the current server time.
    pub fn touch(&mut self) {
        self.last_modified = now_rfc3339();
    }
}

/// Current UTC time in RFC 3339 format.
#[must_use]
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// Validate a display name against the length constraints.
pub fn validate_name(name: &str) -> Result<(), DepotError> {
    let len = name.chars().count();
    if (NAME_MIN..=NAME_MAX).contains(&len) {
        Ok(())
    } else {
        Err(DepotError::Validation {
            message: format!("name must be {NAME_MIN}-{NAME_MAX} characters, got {len}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_str() {
        for kind in AssetKind::ALL {
            assert_eq!(kind.as_str().parse::<AssetKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = "fbx".parse::<AssetKind>().unwrap_err();
        assert!(matches!(err, DepotError::Validation { .. }));
    }

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AssetKind::Glb).unwrap(), "\"glb\"");
        assert_eq!(serde_json::to_string(&AssetKind::Gltf).unwrap(), "\"gltf\"");
    }

    #[test]
    fn asset_json_field_is_type() {
        let asset = Asset::new(AssetId::from("a1"), "Character_Mesh", AssetKind::Glb).unwrap();
        let json = serde_json::to_value(&asset).unwrap();
        assert_eq!(json["id"], "a1");
        assert_eq!(json["type"], "glb");
        assert!(json.get("kind").is_none());
        assert!(json["last_modified"].is_string());
    }

    #[test]
    fn asset_deserializes_from_wire_shape() {
        let json = r#"{"id":"a2","name":"Tree_Model","type":"gltf","last_modified":"2026-01-01T00:00:00+00:00"}"#;
        let asset: Asset = serde_json::from_str(json).unwrap();
        assert_eq!(asset.kind, AssetKind::Gltf);
        assert_eq!(asset.name, "Tree_Model");
    }

    #[test]
    fn short_name_rejected() {
        let err = Asset::new(AssetId::new(), "ab", AssetKind::Glb).unwrap_err();
        assert!(matches!(err, DepotError::Validation { .. }));
    }

    #[test]
    fn long_name_rejected() {
        let name = "x".repeat(51);
        assert!(validate_name(&name).is_err());
    }

    #[test]
    fn boundary_names_accepted() {
        assert!(validate_name("abc").is_ok());
        assert!(validate_name(&"x".repeat(50)).is_ok());
    }

    #[test]
    fn touch_updates_timestamp() {
        let mut asset = Asset::new(AssetId::new(), "Prop_Item", AssetKind::Glb).unwrap();
        let before = asset.last_modified.clone();
        std::thread::sleep(std::time::Duration::from_millis(5));
        asset.touch();
        assert!(asset.last_modified >= before);
    }

    #[test]
    fn timestamp_is_rfc3339() {
        let ts = now_rfc3339();
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
