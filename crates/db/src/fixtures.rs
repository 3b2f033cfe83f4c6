use serde::Serialize;
use sqlx::Row;

use menubot_core::domain::catalogue::{CatalogueId, CatalogueItem, PricingMode};

use crate::connection::DbPool;
use crate::repositories::{CatalogueRepository, RepositoryError};

struct SeedItem {
    selection: &'static str,
    item_menu_number: u32,
    name: &'static str,
    options: &'static [&'static str],
    pricing_mode: PricingMode,
}

const SEED_ITEMS: &[SeedItem] = &[
    SeedItem {
        selection: "Gardening:",
        item_menu_number: 1,
        name: "Denitrified fertilizer",
        options: &["5g @ R110 p.g.", "10g @ R90 p.g."],
        pricing_mode: PricingMode::TieredByWeight,
    },
    SeedItem {
        selection: "Gardening:",
        item_menu_number: 2,
        name: "Dehydrogenated water",
        options: &["5g @ R140 p.g.", "10g @ R120 p.g."],
        pricing_mode: PricingMode::TieredByWeight,
    },
    SeedItem {
        selection: "Gardening:",
        item_menu_number: 3,
        name: "Decarbonized soil",
        options: &["5g @ R150 p.g.", "10g @ R130 p.g."],
        pricing_mode: PricingMode::TieredByWeight,
    },
    SeedItem {
        selection: "Kitchen:",
        item_menu_number: 4,
        name: "DIY ready cake mix",
        options: &["5g @ R180 p.g.", "10g @ R160 p.g."],
        pricing_mode: PricingMode::TieredByWeight,
    },
    SeedItem {
        selection: "Kitchen:",
        item_menu_number: 5,
        name: "Sugarless Sugar",
        options: &["5g @ R210 p.g.", "10g @ R190 p.g."],
        pricing_mode: PricingMode::TieredByWeight,
    },
    SeedItem {
        selection: "Kitchen:",
        item_menu_number: 6,
        name: "Burnt bread crumbs",
        options: &["5g @ R250 p.g.", "10g @ R230 p.g."],
        pricing_mode: PricingMode::TieredByWeight,
    },
    SeedItem {
        selection: "DIY:",
        item_menu_number: 7,
        name: "Bristleless Broom",
        options: &[
            "Vacuumless roomba version @ R650",
            "Bristled handleless version @ R650",
            "Floppy handled kinetic version @ R650",
        ],
        pricing_mode: PricingMode::FlatRate,
    },
    SeedItem {
        selection: "Tech:",
        item_menu_number: 8,
        name: "Macless Apple @ R100 each",
        options: &[],
        pricing_mode: PricingMode::FlatRate,
    },
    SeedItem {
        selection: "Tech:",
        item_menu_number: 9,
        name: "Unchargeable cellphone @ R150 each",
        options: &[],
        pricing_mode: PricingMode::FlatRate,
    },
    SeedItem {
        selection: "Edibles:",
        item_menu_number: 10,
        name: "Fruit toffees - 400mg",
        options: &["10-Pack @ R200"],
        pricing_mode: PricingMode::FlatRate,
    },
    SeedItem {
        selection: "Edibles:",
        item_menu_number: 11,
        name: "Sour space strips - 400mg",
        options: &["10-Pack @ R180"],
        pricing_mode: PricingMode::FlatRate,
    },
    SeedItem {
        selection: "Edibles:",
        item_menu_number: 12,
        name: "Space bud treats - 240mg",
        options: &["3-Pack @ R200"],
        pricing_mode: PricingMode::FlatRate,
    },
];

/// Deterministic demo catalogue: five selections, twelve items, both pricing
/// modes and every option shape the pricing engine understands.
pub struct DemoCatalogue;

impl DemoCatalogue {
    pub fn items(catalogue_id: &str) -> Vec<CatalogueItem> {
        SEED_ITEMS
            .iter()
            .map(|seed| CatalogueItem {
                catalogue_id: CatalogueId(catalogue_id.to_string()),
                selection: seed.selection.to_string(),
                item_menu_number: seed.item_menu_number,
                name: seed.name.to_string(),
                options: seed.options.iter().map(|option| option.to_string()).collect(),
                pricing_mode: seed.pricing_mode,
            })
            .collect()
    }

    /// Writes the demo items under `catalogue_id`. Re-running replaces them.
    pub async fn load(
        repository: &dyn CatalogueRepository,
        catalogue_id: &str,
    ) -> Result<SeedResult, RepositoryError> {
        let items = Self::items(catalogue_id);
        let mut selections = Vec::<String>::new();
        for item in &items {
            if !selections.contains(&item.selection) {
                selections.push(item.selection.clone());
            }
        }
        let items_seeded = items.len();

        repository.save_items(items).await?;

        Ok(SeedResult { catalogue_id: catalogue_id.to_string(), items_seeded, selections })
    }

    /// Checks that every demo item is stored under `catalogue_id`.
    pub async fn verify(pool: &DbPool, catalogue_id: &str) -> Result<VerificationResult, RepositoryError> {
        let stored = sqlx::query(
            "SELECT COUNT(*) AS count FROM catalogue_item WHERE catalogue_id = ?",
        )
        .bind(catalogue_id)
        .fetch_one(pool)
        .await?
        .try_get::<i64, _>("count")
        .map_err(|e| RepositoryError::Decode(e.to_string()))?;

        let expected = i64::try_from(SEED_ITEMS.len())
            .map_err(|e| RepositoryError::Decode(e.to_string()))?;

        Ok(VerificationResult { catalogue_id: catalogue_id.to_string(), expected, stored })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeedResult {
    pub catalogue_id: String,
    pub items_seeded: usize,
    pub selections: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    pub catalogue_id: String,
    pub expected: i64,
    pub stored: i64,
}

impl VerificationResult {
    pub fn all_passed(&self) -> bool {
        self.stored >= self.expected
    }
}
