use std::sync::LazyLock;

use regex::Regex;

static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)@\s*R\s*(\d+)").expect("price pattern is a valid regex")
});

static SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)").expect("size pattern is a valid regex"));

static PER_UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bp\.\s?g\b|\bper\s+(gram|g|unit)\b").expect("per-unit pattern is a valid regex")
});

/// Price rule read from a catalogue option such as `10g @ R90 p.g.` or
/// `3-Pack @ R200`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceRule {
    /// Leading tier size (`10` in `10g`, `3` in `3-Pack`), if any.
    pub size: Option<u64>,
    pub price: u64,
    /// The price applies per unit of size rather than to the whole tier.
    pub per_unit: bool,
}

impl PriceRule {
    pub fn parse(text: &str) -> Option<Self> {
        let price = PRICE_RE.captures(text)?.get(1)?.as_str().parse::<u64>().ok()?;
        let size = SIZE_RE
            .captures(text)
            .and_then(|captures| captures.get(1))
            .and_then(|size| size.as_str().parse::<u64>().ok())
            .filter(|size| *size > 0);
        let per_unit = PER_UNIT_RE.is_match(text);

        Some(Self { size, price, per_unit })
    }

    /// Cost of taking this option once: a whole tier for per-unit rules, the
    /// listed price otherwise.
    pub fn unit_cost(&self) -> Option<u64> {
        if self.per_unit {
            self.size.unwrap_or(1).checked_mul(self.price)
        } else {
            Some(self.price)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PriceRule;

    #[test]
    fn reads_per_gram_tier() {
        assert_eq!(
            PriceRule::parse("10g @ R90 p.g."),
            Some(PriceRule { size: Some(10), price: 90, per_unit: true })
        );
    }

    #[test]
    fn reads_pack_price() {
        assert_eq!(
            PriceRule::parse("10-Pack @ R200"),
            Some(PriceRule { size: Some(10), price: 200, per_unit: false })
        );
    }

    #[test]
    fn reads_price_embedded_in_a_name() {
        assert_eq!(
            PriceRule::parse("Macless Apple @ R100 each"),
            Some(PriceRule { size: None, price: 100, per_unit: false })
        );
        assert_eq!(
            PriceRule::parse("Vacuumless roomba version @ R650").map(|rule| rule.price),
            Some(650)
        );
    }

    #[test]
    fn option_without_price_is_rejected() {
        assert_eq!(PriceRule::parse("Fruit toffees - 400mg"), None);
    }

    #[test]
    fn unit_cost_spans_the_whole_tier_for_per_unit_rules() {
        let rule = PriceRule::parse("5g @ R110 p.g.").expect("rule");
        assert_eq!(rule.unit_cost(), Some(550));

        let rule = PriceRule::parse("3-Pack @ R200").expect("rule");
        assert_eq!(rule.unit_cost(), Some(200));
    }
}
