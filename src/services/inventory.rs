use std::sync::RwLock;

use crate::models::{InventoryItem, Position};

/// Append-only inventory feed the engine scans against
///
/// The feed is long-lived and lazy from the engine's point of view: items may
/// keep arriving after a search request was created, and each scan works on
/// the snapshot visible at that moment.
pub trait InventoryFeed: Send + Sync {
    fn snapshot(&self) -> Vec<InventoryItem>;
}

/// In-memory append-only feed
#[derive(Debug, Default)]
pub struct InMemoryFeed {
    items: RwLock<Vec<InventoryItem>>,
}

impl InMemoryFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<InventoryItem>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    /// Append a newly listed item
    pub fn push(&self, item: InventoryItem) {
        self.items
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(item);
    }

    pub fn len(&self) -> usize {
        self.items
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl InventoryFeed for InMemoryFeed {
    fn snapshot(&self) -> Vec<InventoryItem> {
        self.items
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

const NEIGHBORHOODS: &[(&str, f64, f64)] = &[
    ("Mission", 37.76, -122.42),
    ("Castro", 37.76, -122.435),
    ("Haight", 37.77, -122.44),
    ("Sunset", 37.75, -122.48),
    ("Richmond", 37.78, -122.47),
    ("Marina", 37.80, -122.44),
    ("Noe Valley", 37.75, -122.43),
    ("SoMa", 37.78, -122.40),
];

const CATEGORIES: &[&str] = &[
    "Furniture",
    "Electronics",
    "Clothing",
    "Toys",
    "Tools",
    "Antiques",
    "Books",
    "Music",
    "Sports",
];

const ADJECTIVES: &[&str] = &[
    "Vintage",
    "Mint Condition",
    "Rare",
    "Antique",
    "Retro",
    "Modern",
];

/// Deterministic demo feed for the simulation binary and tests
///
/// Each sale contributes a handful of items; positions spread across the
/// neighborhood centers. Generation is index-driven so repeated runs produce
/// the same inventory.
pub fn demo_feed(sale_count: usize) -> InMemoryFeed {
    let mut items = Vec::new();
    for sale_idx in 0..sale_count {
        let (_, lat, lon) = NEIGHBORHOODS[sale_idx % NEIGHBORHOODS.len()];
        let position = Position::new(
            lat + (sale_idx as f64 % 7.0) * 0.001,
            lon - (sale_idx as f64 % 5.0) * 0.001,
        );
        let sale_id = format!("sale-{}", sale_idx + 1);

        let item_count = 2 + sale_idx % 4;
        for item_idx in 0..item_count {
            let adjective = ADJECTIVES[(sale_idx + item_idx) % ADJECTIVES.len()];
            let category = CATEGORIES[(sale_idx * 3 + item_idx) % CATEGORIES.len()];
            items.push(InventoryItem {
                id: format!("item-{}-{}", sale_idx, item_idx),
                sale_id: sale_id.clone(),
                title: format!("{} {} Item", adjective, category),
                category: category.to_string(),
                price: 5.0 + ((sale_idx * 37 + item_idx * 13) % 200) as f64,
                position,
            });
        }
    }
    InMemoryFeed::with_items(items)
}
