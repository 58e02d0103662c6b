use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, InfoItem};

/// Current snapshot document version.
pub const SNAPSHOT_VERSION: &str = "2.0";

/// The full dataset at one instant: the unit of transfer to remote storage
/// and the format of local backup files.
///
/// Both collections are always replaced wholesale on sync; there is no
/// partial update and no merge. Last writer wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub categories: Vec<Category>,
    pub items: Vec<InfoItem>,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "Utc::now")]
    pub generated_at: DateTime<Utc>,
}

fn default_version() -> String {
    SNAPSHOT_VERSION.to_string()
}

impl Snapshot {
    /// Assembles the current collections into one serializable document.
    /// Pure: no side effects, no failure modes.
    pub fn build(categories: Vec<Category>, items: Vec<InfoItem>) -> Self {
        Self {
            categories,
            items,
            version: SNAPSHOT_VERSION.to_string(),
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Icon;
    use uuid::Uuid;

    #[test]
    fn test_snapshot_build() {
        let cat = Category::new("Hospitals").with_icon(Icon::Hospital);
        let item = InfoItem::new("Health Complex", cat.id);
        let snapshot = Snapshot::build(vec![cat], vec![item]);
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.categories.len(), 1);
        assert_eq!(snapshot.items.len(), 1);
    }

    #[test]
    fn test_snapshot_json_roundtrip() {
        let cat = Category::new("Transport");
        let items = vec![
            InfoItem::new("Bus Stand", cat.id).with_address("Bazar Road"),
            InfoItem::new("Launch Ghat", Uuid::new_v4()),
        ];
        let snapshot = Snapshot::build(vec![cat], items);

        let json = serde_json::to_string_pretty(&snapshot).unwrap();
        let parsed: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, parsed);
    }

    #[test]
    fn test_snapshot_parses_without_version_or_timestamp() {
        // Files hand-written or produced by other tooling only need the
        // two collections.
        let json = r#"{"categories":[],"items":[]}"#;
        let parsed: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.version, SNAPSHOT_VERSION);
        assert!(parsed.categories.is_empty());
    }

    #[test]
    fn test_snapshot_requires_both_collections() {
        let missing_items = r#"{"categories":[]}"#;
        assert!(serde_json::from_str::<Snapshot>(missing_items).is_err());

        let missing_categories = r#"{"items":[]}"#;
        assert!(serde_json::from_str::<Snapshot>(missing_categories).is_err());
    }
}
