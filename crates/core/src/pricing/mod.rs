pub mod rules;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::catalogue::{Catalogue, CatalogueItem, PricingMode};
use crate::domain::order::{Amount, AmountError, MenuIndication, OptionSelection, OrderItems};

use self::rules::PriceRule;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("item {item_menu_number} is not on the price list")]
    UnknownItem { item_menu_number: u32 },
    #[error("item {item_menu_number}: {source}")]
    InvalidAmount {
        item_menu_number: u32,
        #[source]
        source: AmountError,
    },
    #[error("item {item_menu_number}: no price found in `{text}`")]
    MissingPrice { item_menu_number: u32, text: String },
    #[error("item {item_menu_number}: option {option} does not exist ({available} available)")]
    OptionOutOfRange { item_menu_number: u32, option: u32, available: usize },
    #[error("item {item_menu_number}: options are priced differently, pick one with <option>x<amount>")]
    AmbiguousOption { item_menu_number: u32 },
    #[error("item {item_menu_number}: option `{text}` does not declare a weight tier")]
    MissingTier { item_menu_number: u32, text: String },
    #[error("item {item_menu_number}: {remainder} of {requested} cannot be made up from the available tiers")]
    UnreachableWeight { item_menu_number: u32, requested: u64, remainder: u64 },
    #[error("item {item_menu_number}: price is too large")]
    Overflow { item_menu_number: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLine {
    pub item_menu_number: u32,
    pub description: String,
    pub amount: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub total: u64,
    /// Human-readable breakdown; empty when the order prices as a single line.
    pub summary: String,
    pub lines: Vec<PriceLine>,
}

pub trait PricingEngine: Send + Sync {
    fn price(&self, items: &OrderItems, catalogue: &Catalogue) -> Result<PriceQuote, PricingError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DeterministicPricingEngine;

impl PricingEngine for DeterministicPricingEngine {
    fn price(&self, items: &OrderItems, catalogue: &Catalogue) -> Result<PriceQuote, PricingError> {
        price_order(items, catalogue)
    }
}

pub fn price_order(items: &OrderItems, catalogue: &Catalogue) -> Result<PriceQuote, PricingError> {
    let mut lines = Vec::new();
    for indication in items.iter().filter(|indication| !indication.is_removal()) {
        let item = catalogue.find(indication.item_menu_number).ok_or(PricingError::UnknownItem {
            item_menu_number: indication.item_menu_number,
        })?;
        lines.extend(price_indication(item, indication)?);
    }

    let total = lines.iter().try_fold(0u64, |total, line| {
        total
            .checked_add(line.amount)
            .ok_or(PricingError::Overflow { item_menu_number: line.item_menu_number })
    })?;

    let summary = if lines.len() > 1 { render_summary(&lines, total) } else { String::new() };
    Ok(PriceQuote { total, summary, lines })
}

fn price_indication(
    item: &CatalogueItem,
    indication: &MenuIndication,
) -> Result<Vec<PriceLine>, PricingError> {
    let amount = indication.parsed_amount().map_err(|source| PricingError::InvalidAmount {
        item_menu_number: item.item_menu_number,
        source,
    })?;

    match (amount, item.pricing_mode) {
        (Amount::Options(selections), _) => price_selections(item, &selections),
        (Amount::Quantity(quantity), PricingMode::FlatRate) => {
            price_flat(item, u64::from(quantity)).map(|line| vec![line])
        }
        (Amount::Quantity(weight), PricingMode::TieredByWeight) => {
            price_tiered(item, u64::from(weight))
        }
    }
}

fn price_selections(
    item: &CatalogueItem,
    selections: &[OptionSelection],
) -> Result<Vec<PriceLine>, PricingError> {
    selections
        .iter()
        .filter(|selection| selection.quantity > 0)
        .map(|selection| {
            let text = usize::try_from(selection.option)
                .ok()
                .and_then(|option| option.checked_sub(1))
                .and_then(|index| item.options.get(index))
                .ok_or(PricingError::OptionOutOfRange {
                    item_menu_number: item.item_menu_number,
                    option: selection.option,
                    available: item.options.len(),
                })?;
            let rule = rule_for(item, text)?;
            let amount = rule
                .unit_cost()
                .and_then(|cost| cost.checked_mul(u64::from(selection.quantity)))
                .ok_or(PricingError::Overflow { item_menu_number: item.item_menu_number })?;

            Ok(PriceLine {
                item_menu_number: item.item_menu_number,
                description: format!("{} ({}) x{}", item.name, text, selection.quantity),
                amount,
            })
        })
        .collect()
}

fn price_flat(item: &CatalogueItem, quantity: u64) -> Result<PriceLine, PricingError> {
    let unit_price = match item.options.as_slice() {
        [] => rule_for(item, &item.name)?.price,
        [only] => rule_for(item, only)?.price,
        options => {
            let prices = options
                .iter()
                .map(|option| rule_for(item, option).map(|rule| rule.price))
                .collect::<Result<Vec<_>, _>>()?;
            if prices.windows(2).any(|pair| pair[0] != pair[1]) {
                return Err(PricingError::AmbiguousOption {
                    item_menu_number: item.item_menu_number,
                });
            }
            prices[0]
        }
    };

    let amount = unit_price
        .checked_mul(quantity)
        .ok_or(PricingError::Overflow { item_menu_number: item.item_menu_number })?;
    Ok(PriceLine {
        item_menu_number: item.item_menu_number,
        description: format!("{} x{}", item.name, quantity),
        amount,
    })
}

/// Prices a weight against the item's tiers. The largest tier that fits sets the
/// price: per-unit tiers price the whole weight at their rate, pack tiers are taken
/// greedily from largest to smallest until the weight is used up.
fn price_tiered(item: &CatalogueItem, weight: u64) -> Result<Vec<PriceLine>, PricingError> {
    let overflow = || PricingError::Overflow { item_menu_number: item.item_menu_number };

    let mut tiers = item
        .options
        .iter()
        .map(|text| {
            let rule = rule_for(item, text)?;
            let size = rule.size.ok_or_else(|| PricingError::MissingTier {
                item_menu_number: item.item_menu_number,
                text: text.clone(),
            })?;
            Ok((size, rule, text.as_str()))
        })
        .collect::<Result<Vec<_>, PricingError>>()?;
    tiers.sort_by(|left, right| right.0.cmp(&left.0));

    let unreachable_weight = |remainder| PricingError::UnreachableWeight {
        item_menu_number: item.item_menu_number,
        requested: weight,
        remainder,
    };

    let start = tiers
        .iter()
        .position(|(size, _, _)| *size <= weight)
        .ok_or_else(|| unreachable_weight(weight))?;
    let (_, rule, text) = tiers[start];
    if rule.per_unit {
        let amount = rule.price.checked_mul(weight).ok_or_else(overflow)?;
        return Ok(vec![PriceLine {
            item_menu_number: item.item_menu_number,
            description: format!("{} {} at {}", item.name, weight, text),
            amount,
        }]);
    }

    let mut remainder = weight;
    let mut lines = Vec::new();
    for &(size, rule, text) in &tiers[start..] {
        let count = remainder / size;
        if count == 0 {
            continue;
        }
        remainder %= size;
        lines.push(PriceLine {
            item_menu_number: item.item_menu_number,
            description: format!("{} ({}) x{}", item.name, text, count),
            amount: rule.price.checked_mul(count).ok_or_else(overflow)?,
        });
    }

    if remainder > 0 {
        return Err(unreachable_weight(remainder));
    }
    Ok(lines)
}

fn rule_for(item: &CatalogueItem, text: &str) -> Result<PriceRule, PricingError> {
    PriceRule::parse(text).ok_or_else(|| PricingError::MissingPrice {
        item_menu_number: item.item_menu_number,
        text: text.to_string(),
    })
}

fn render_summary(lines: &[PriceLine], total: u64) -> String {
    let mut summary = lines
        .iter()
        .map(|line| format!("{}: {} = R{}", line.item_menu_number, line.description, line.amount))
        .collect::<Vec<_>>();
    summary.push(format!("Total: R{total}"));
    summary.join("\n")
}

#[cfg(test)]
mod tests {
    use super::{price_order, DeterministicPricingEngine, PricingEngine, PricingError};
    use crate::domain::catalogue::{
        Catalogue, CatalogueId, CatalogueItem, CatalogueSelection, PricingMode,
    };
    use crate::domain::order::{MenuIndication, OrderItems};

    fn item(number: u32, name: &str, options: &[&str], pricing_mode: PricingMode) -> CatalogueItem {
        CatalogueItem {
            catalogue_id: CatalogueId("Pig".to_string()),
            selection: "Test:".to_string(),
            item_menu_number: number,
            name: name.to_string(),
            options: options.iter().map(|option| option.to_string()).collect(),
            pricing_mode,
        }
    }

    fn catalogue() -> Catalogue {
        Catalogue::new(
            "Pig",
            "",
            vec![CatalogueSelection {
                preamble: "Test:".to_string(),
                items: vec![
                    item(
                        1,
                        "Denitrified fertilizer",
                        &["5g @ R110 p.g.", "10g @ R90 p.g."],
                        PricingMode::TieredByWeight,
                    ),
                    item(
                        7,
                        "Bristleless Broom",
                        &[
                            "Vacuumless roomba version @ R650",
                            "Bristled handleless version @ R650",
                            "Floppy handled kinetic version @ R700",
                        ],
                        PricingMode::FlatRate,
                    ),
                    item(8, "Macless Apple @ R100 each", &[], PricingMode::FlatRate),
                    item(10, "Fruit toffees - 400mg", &["10-Pack @ R200"], PricingMode::FlatRate),
                    item(
                        13,
                        "Seed packs",
                        &["1-Pack @ R30", "5-Pack @ R120"],
                        PricingMode::TieredByWeight,
                    ),
                    item(
                        14,
                        "Crates",
                        &["5-Pack @ R120", "3-Pack @ R80"],
                        PricingMode::TieredByWeight,
                    ),
                    item(
                        15,
                        "Identical brooms",
                        &["Red @ R50", "Blue @ R50"],
                        PricingMode::FlatRate,
                    ),
                ],
            }],
        )
    }

    fn order(entries: &[(u32, &str)]) -> OrderItems {
        OrderItems::new(
            entries.iter().map(|(number, amount)| MenuIndication::new(*number, *amount)).collect(),
        )
    }

    #[test]
    fn weight_uses_the_largest_fitting_per_gram_tier() {
        let quote = price_order(&order(&[(1, "12")]), &catalogue()).expect("price");
        assert_eq!(quote.total, 1080);
        assert_eq!(quote.summary, "");
    }

    #[test]
    fn weight_between_tiers_uses_the_smaller_rate() {
        let quote = price_order(&order(&[(1, "7")]), &catalogue()).expect("price");
        assert_eq!(quote.total, 770);
    }

    #[test]
    fn weight_below_the_smallest_tier_is_unreachable() {
        let error = price_order(&order(&[(1, "3")]), &catalogue()).expect_err("must fail");
        assert_eq!(
            error,
            PricingError::UnreachableWeight { item_menu_number: 1, requested: 3, remainder: 3 }
        );
    }

    #[test]
    fn pack_tiers_are_taken_greedily() {
        let quote = price_order(&order(&[(13, "7")]), &catalogue()).expect("price");
        assert_eq!(quote.total, 120 + 2 * 30);
        assert_eq!(quote.lines.len(), 2);
        assert!(quote.summary.ends_with("Total: R180"));
    }

    #[test]
    fn pack_remainder_without_a_fitting_tier_fails() {
        let error = price_order(&order(&[(14, "7")]), &catalogue()).expect_err("must fail");
        assert!(matches!(
            error,
            PricingError::UnreachableWeight { item_menu_number: 14, requested: 7, remainder: 2 }
        ));
    }

    #[test]
    fn flat_item_prices_from_its_name_or_single_option() {
        let quote = price_order(&order(&[(8, "2")]), &catalogue()).expect("price");
        assert_eq!(quote.total, 200);

        let quote = price_order(&order(&[(10, "3")]), &catalogue()).expect("price");
        assert_eq!(quote.total, 600);
    }

    #[test]
    fn flat_item_with_uniformly_priced_options_accepts_plain_quantity() {
        let quote = price_order(&order(&[(15, "3")]), &catalogue()).expect("price");
        assert_eq!(quote.total, 150);
    }

    #[test]
    fn flat_item_with_differently_priced_options_needs_a_selection() {
        let error = price_order(&order(&[(7, "2")]), &catalogue()).expect_err("must fail");
        assert_eq!(error, PricingError::AmbiguousOption { item_menu_number: 7 });
    }

    #[test]
    fn option_pairs_are_priced_independently() {
        let quote = price_order(&order(&[(7, "1x3, 3x2, 2x1")]), &catalogue()).expect("price");
        assert_eq!(quote.total, 3 * 650 + 2 * 700 + 650);
        assert_eq!(quote.lines.len(), 3);
        assert!(quote.summary.contains("Floppy handled kinetic version @ R700"));
    }

    #[test]
    fn option_pair_on_a_per_gram_tier_buys_whole_tiers() {
        let quote = price_order(&order(&[(1, "2x1")]), &catalogue()).expect("price");
        assert_eq!(quote.total, 900);
    }

    #[test]
    fn option_index_outside_the_listing_is_rejected() {
        let error = price_order(&order(&[(10, "2x1")]), &catalogue()).expect_err("must fail");
        assert_eq!(
            error,
            PricingError::OptionOutOfRange { item_menu_number: 10, option: 2, available: 1 }
        );
    }

    #[test]
    fn unknown_item_is_a_resolution_failure() {
        let error = price_order(&order(&[(99, "1")]), &catalogue()).expect_err("must fail");
        assert_eq!(error, PricingError::UnknownItem { item_menu_number: 99 });
    }

    #[test]
    fn removals_are_skipped_and_multi_line_orders_get_a_summary() {
        let quote = DeterministicPricingEngine
            .price(&order(&[(1, "12"), (8, "1"), (10, "0")]), &catalogue())
            .expect("price");

        assert_eq!(quote.total, 1180);
        assert_eq!(
            quote.summary,
            "1: Denitrified fertilizer 12 at 10g @ R90 p.g. = R1080\n\
             8: Macless Apple @ R100 each x1 = R100\n\
             Total: R1180"
        );
    }

    #[test]
    fn malformed_amount_is_reported_against_the_item() {
        let error = price_order(&order(&[(8, "a few")]), &catalogue()).expect_err("must fail");
        assert!(matches!(error, PricingError::InvalidAmount { item_menu_number: 8, .. }));
    }
}
