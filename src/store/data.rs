/// Shared data structures for the catalog state
///
/// These structs represent the data model that flows between
/// the database layer and the gallery/view layer.

use serde::{Deserialize, Serialize};

/// A single image in the catalog.
///
/// Records are written once by the seeding pass and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Unique database ID (SQLite AUTOINCREMENT)
    pub id: i64,
    /// Display title, searched by the gallery
    pub title: String,
    /// Path fragment relative to the configured image root (e.g. "cats/whiskers.png")
    pub url: String,
    /// Shipping weight from the manifest, if the column was present and numeric
    pub weight: Option<f64>,
    /// Unix timestamp of the seeding pass that created this record
    pub added_at: i64,
}

/// One entry in the persisted selection basket.
///
/// Carries a full copy of the source image's fields plus the encoded payload,
/// so a basket entry is self-contained even if the image root moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Basket-local identity, assigned from a monotonic counter
    pub id: i64,
    /// Back-reference to the originating `ImageRecord::id`
    pub image_id: i64,
    pub title: String,
    pub url: String,
    pub weight: Option<f64>,
    /// Base64 of the raw image bytes, materialized when the item was added
    pub image_data: String,
    /// Byte length of the decoded image data
    pub file_size: u64,
    /// Unix timestamp of the add operation
    pub added_at: i64,
}
