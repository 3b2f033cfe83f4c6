use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ordering::reconcile;

/// One `item number: amount` pair from an update-order command.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MenuIndication {
    pub item_menu_number: u32,
    pub amount: String,
}

impl MenuIndication {
    pub fn new(item_menu_number: u32, amount: impl Into<String>) -> Self {
        Self { item_menu_number, amount: amount.into() }
    }

    /// An amount that orders nothing (`0`, `00`, `1x0, 2x0`) deletes the item
    /// instead of pricing it. Unparseable amounts are never removals.
    pub fn is_removal(&self) -> bool {
        self.parsed_amount().is_ok_and(|amount| amount.is_zero())
    }

    pub fn parsed_amount(&self) -> Result<Amount, AmountError> {
        Amount::parse(&self.amount)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionSelection {
    /// 1-based position of the option in the catalogue listing.
    pub option: u32,
    pub quantity: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Amount {
    Quantity(u32),
    Options(Vec<OptionSelection>),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("amount `{0}` is neither a quantity nor a list of option x quantity pairs")]
    Malformed(String),
}

impl Amount {
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Quantity(quantity) => *quantity == 0,
            Self::Options(selections) => selections.iter().all(|selection| selection.quantity == 0),
        }
    }

    pub fn parse(text: &str) -> Result<Self, AmountError> {
        let trimmed = text.trim().trim_end_matches(',').trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }

        if let Ok(quantity) = trimmed.parse::<u32>() {
            return Ok(Self::Quantity(quantity));
        }

        trimmed
            .split(',')
            .map(|pair| {
                let (option, quantity) = pair
                    .trim()
                    .split_once(['x', 'X'])
                    .ok_or_else(|| AmountError::Malformed(trimmed.to_string()))?;
                let option = option.trim().parse::<u32>();
                let quantity = quantity.trim().parse::<u32>();
                match (option, quantity) {
                    (Ok(option), Ok(quantity)) => Ok(OptionSelection { option, quantity }),
                    _ => Err(AmountError::Malformed(trimmed.to_string())),
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::Options)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItems {
    pub indications: Vec<MenuIndication>,
}

impl OrderItems {
    pub fn new(indications: Vec<MenuIndication>) -> Self {
        Self { indications }
    }

    pub fn is_empty(&self) -> bool {
        self.indications.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indications.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MenuIndication> {
        self.indications.iter()
    }

    pub fn find(&self, item_menu_number: u32) -> Option<&MenuIndication> {
        self.indications.iter().find(|indication| indication.item_menu_number == item_menu_number)
    }

    pub fn reconcile(&self, update: &[MenuIndication]) -> Self {
        reconcile::reconcile(self, update)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Initialized,
    Updated,
    CheckoutStarted,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initialized => "initialized",
            Self::Updated => "updated",
            Self::CheckoutStarted => "checkout_started",
        }
    }

    pub fn parse_label(value: &str) -> Option<Self> {
        match value {
            "initialized" => Some(Self::Initialized),
            "updated" => Some(Self::Updated),
            "checkout_started" => Some(Self::CheckoutStarted),
            _ => None,
        }
    }
}

/// A customer's open order against one catalogue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerOrder {
    /// `None` until the order store assigns an id.
    pub order_id: Option<i64>,
    pub cell_number: String,
    pub catalogue_id: String,
    pub items: OrderItems,
    pub total: u64,
    pub status: OrderStatus,
    pub is_paid: bool,
    pub is_closed: bool,
    pub delivered_at: Option<DateTime<Utc>>,
}

impl CustomerOrder {
    pub fn new(cell_number: impl Into<String>, catalogue_id: impl Into<String>) -> Self {
        Self {
            order_id: None,
            cell_number: cell_number.into(),
            catalogue_id: catalogue_id.into(),
            items: OrderItems::default(),
            total: 0,
            status: OrderStatus::Initialized,
            is_paid: false,
            is_closed: false,
            delivered_at: None,
        }
    }

    pub fn is_open(&self) -> bool {
        !self.is_paid && !self.is_closed
    }

    /// Reconciles `update` into the order. The stored total is stale afterwards and
    /// is reset until the order is priced again.
    pub fn apply_update(&mut self, update: &[MenuIndication]) {
        self.items = self.items.reconcile(update);
        self.total = 0;
        self.status = OrderStatus::Updated;
    }

    /// Name of the line item handed to the payment page, e.g. `Order 12345`.
    pub fn checkout_item_name(&self, prefix: &str) -> String {
        match self.order_id {
            Some(order_id) => format!("{prefix} {order_id}"),
            None => format!("{prefix} {}", self.cell_number),
        }
    }
}
