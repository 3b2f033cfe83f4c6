//! Plain-text renderings sent back over the chat channel.

use crate::domain::catalogue::{Catalogue, CatalogueItem, CatalogueSelection};
use crate::domain::order::OrderItems;
use crate::domain::user::{ProfileField, UserInfo};

pub const NO_CURRENT_ORDER: &str = "You have no current order.";
const NOT_SET: &str = "not set";

/// `9: Peanut butter breath` followed by one indented, numbered line per option
/// and a blank line.
pub fn render_item(item: &CatalogueItem) -> String {
    let mut text = format!("{}: {}\n", item.item_menu_number, item.name);
    for (index, option) in item.options.iter().enumerate() {
        text.push_str(&format!("   {}. {}\n", index + 1, option));
    }
    text.push('\n');
    text
}

pub fn render_selection(selection: &CatalogueSelection) -> String {
    let mut text = format!("{}\n", selection.preamble);
    for item in &selection.items {
        text.push_str(&render_item(item));
    }
    text
}

/// The catalogue preamble, a blank line, then every selection separated by a
/// newline.
pub fn render_price_list(catalogue: &Catalogue) -> String {
    let selections =
        catalogue.selections.iter().map(render_selection).collect::<Vec<_>>().join("\n");
    format!("{}\n\n{}", catalogue.preamble, selections)
}

/// One `{item}: {name} - {amount}` line per indication. Items no longer in the
/// catalogue are listed by number only.
pub fn render_current_order(items: &OrderItems, catalogue: &Catalogue) -> String {
    if items.is_empty() {
        return NO_CURRENT_ORDER.to_owned();
    }

    items
        .iter()
        .map(|indication| match catalogue.find(indication.item_menu_number) {
            Some(item) => format!("{}: {} - {}", item.item_menu_number, item.name, indication.amount),
            None => format!("{}: - {}", indication.item_menu_number, indication.amount),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_user_info(user: &UserInfo) -> String {
    let mut lines = vec![format!("cell number: {}", user.cell_number)];
    lines.extend(
        ProfileField::ALL
            .iter()
            .map(|field| format!("{}: {}", field, user.field(*field).unwrap_or(NOT_SET))),
    );
    lines.join("\n")
}
