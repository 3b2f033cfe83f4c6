use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogueId(pub String);

impl fmt::Display for CatalogueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How an item's amount is converted into a price.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PricingMode {
    /// Amount is a count of the item's single price.
    FlatRate,
    /// Amount is a weight priced against the item's weight tiers.
    TieredByWeight,
}

impl PricingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FlatRate => "flat_rate",
            Self::TieredByWeight => "tiered_by_weight",
        }
    }
}

impl FromStr for PricingMode {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "flat_rate" | "singleitem" => Ok(Self::FlatRate),
            "tiered_by_weight" | "weightitem" => Ok(Self::TieredByWeight),
            other => Err(DomainError::InvariantViolation(format!("unknown pricing mode `{other}`"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueItem {
    pub catalogue_id: CatalogueId,
    pub selection: String,
    pub item_menu_number: u32,
    pub name: String,
    pub options: Vec<String>,
    pub pricing_mode: PricingMode,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueSelection {
    pub preamble: String,
    pub items: Vec<CatalogueItem>,
}

/// Every sellable item under one catalogue id, grouped into display selections.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalogue {
    pub id: String,
    pub preamble: String,
    pub selections: Vec<CatalogueSelection>,
}

impl Catalogue {
    pub fn new(
        id: impl Into<String>,
        preamble: impl Into<String>,
        selections: Vec<CatalogueSelection>,
    ) -> Self {
        Self { id: id.into(), preamble: preamble.into(), selections }
    }

    /// Groups a flat item list into selections, keeping the order in which each
    /// selection label is first seen.
    pub fn from_items(
        id: impl Into<String>,
        preamble: impl Into<String>,
        items: Vec<CatalogueItem>,
    ) -> Self {
        let mut selections: Vec<CatalogueSelection> = Vec::new();
        for item in items {
            match selections.iter_mut().find(|selection| selection.preamble == item.selection) {
                Some(selection) => selection.items.push(item),
                None => selections.push(CatalogueSelection {
                    preamble: item.selection.clone(),
                    items: vec![item],
                }),
            }
        }

        Self::new(id, preamble, selections)
    }

    pub fn items(&self) -> impl Iterator<Item = &CatalogueItem> {
        self.selections.iter().flat_map(|selection| selection.items.iter())
    }

    pub fn find(&self, item_menu_number: u32) -> Option<&CatalogueItem> {
        self.items().find(|item| item.item_menu_number == item_menu_number)
    }

    pub fn is_empty(&self) -> bool {
        self.items().next().is_none()
    }

    /// Rejects catalogues where two items share an item number.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = std::collections::BTreeSet::new();
        for item in self.items() {
            if !seen.insert(item.item_menu_number) {
                return Err(DomainError::InvariantViolation(format!(
                    "catalogue `{}` lists item number {} more than once",
                    self.id, item.item_menu_number
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Catalogue, CatalogueId, CatalogueItem, PricingMode};

    fn item(number: u32, selection: &str) -> CatalogueItem {
        CatalogueItem {
            catalogue_id: CatalogueId("Pig".to_string()),
            selection: selection.to_string(),
            item_menu_number: number,
            name: format!("item {number}"),
            options: Vec::new(),
            pricing_mode: PricingMode::FlatRate,
        }
    }

    #[test]
    fn from_items_groups_by_first_seen_selection() {
        let catalogue = Catalogue::from_items(
            "Pig",
            "",
            vec![item(1, "Gardening:"), item(4, "Kitchen:"), item(2, "Gardening:")],
        );

        assert_eq!(catalogue.selections.len(), 2);
        assert_eq!(catalogue.selections[0].preamble, "Gardening:");
        assert_eq!(catalogue.selections[0].items.len(), 2);
        assert_eq!(catalogue.selections[1].preamble, "Kitchen:");
        assert_eq!(catalogue.find(4).map(|item| item.name.as_str()), Some("item 4"));
        assert!(catalogue.find(99).is_none());
    }

    #[test]
    fn validate_rejects_duplicate_item_numbers() {
        let catalogue =
            Catalogue::from_items("Pig", "", vec![item(1, "Gardening:"), item(1, "Kitchen:")]);
        assert!(catalogue.validate().is_err());
    }

    #[test]
    fn pricing_mode_accepts_legacy_labels() {
        assert_eq!("WeightItem".parse::<PricingMode>().ok(), Some(PricingMode::TieredByWeight));
        assert_eq!("SingleItem".parse::<PricingMode>().ok(), Some(PricingMode::FlatRate));
        assert_eq!("flat_rate".parse::<PricingMode>().ok(), Some(PricingMode::FlatRate));
        assert!("per_hour".parse::<PricingMode>().is_err());
    }
}
