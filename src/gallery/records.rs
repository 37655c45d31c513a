use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::session::model::GarmentKind;

/// A saved, flattened outfit raster. Append-only: once written to the gallery
/// a record is never mutated, only deleted wholesale.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OutfitRecord {
    /// Unique record id (`outfit_<uuid>`).
    pub id: String,
    /// Human-readable name shown in the gallery.
    pub display_name: String,
    /// PNG-encoded composite at the model image's native resolution.
    pub raster_png: Vec<u8>,
    /// When the record was minted.
    pub created_at: DateTime<Utc>,
}

impl OutfitRecord {
    /// Mint a record with a fresh unique id.
    pub fn new(display_name: impl Into<String>, raster_png: Vec<u8>) -> Self {
        Self {
            id: format!("outfit_{}", uuid::Uuid::new_v4()),
            display_name: display_name.into(),
            raster_png,
            created_at: Utc::now(),
        }
    }
}

/// An entry in a user's gallery. Uploaded clothing items and saved outfits
/// share one collection and one id namespace.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "item_type", rename_all = "snake_case")]
pub enum GalleryItem {
    /// An uploaded clothing item.
    Clothing(crate::session::model::ClothingItem),
    /// A saved, flattened outfit.
    Outfit(OutfitRecord),
}

impl GalleryItem {
    /// The item's id, regardless of variant.
    pub fn id(&self) -> &str {
        match self {
            Self::Clothing(item) => &item.id,
            Self::Outfit(record) => &record.id,
        }
    }
}

/// Category name to garment kind. User-defined categories extend the base
/// set; base names always win on collision.
pub type CategoryMap = BTreeMap<String, GarmentKind>;

/// The built-in category set and the slots their garments occupy.
pub fn base_categories() -> CategoryMap {
    CategoryMap::from([
        ("Tops".to_string(), GarmentKind::Top),
        ("Shirts".to_string(), GarmentKind::Top),
        ("Outerwear".to_string(), GarmentKind::Top),
        ("Dresses".to_string(), GarmentKind::Other),
        ("Bottoms".to_string(), GarmentKind::Bottom),
        ("Jeans".to_string(), GarmentKind::Bottom),
        ("Skirts".to_string(), GarmentKind::Bottom),
    ])
}

/// Resolve a category name to its garment kind, falling back to `Other` for
/// names absent from the map.
pub fn classify_category(categories: &CategoryMap, name: &str) -> GarmentKind {
    categories.get(name).copied().unwrap_or(GarmentKind::Other)
}

/// Whether a category names outerwear, which sizes up rather than down.
pub fn is_outerwear(name: &str) -> bool {
    name == "Outerwear"
}

#[cfg(test)]
#[path = "../../tests/unit/gallery/records.rs"]
mod tests;
