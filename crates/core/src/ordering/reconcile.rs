use std::collections::BTreeSet;

use crate::domain::order::{MenuIndication, OrderItems};

/// Merges `update` into `existing`, keyed by item number.
///
/// The result is laid out in three runs:
///
/// 1. existing items changed by the update, in update order;
/// 2. existing items the update does not mention, in their original order;
/// 3. items new to the order, in update order.
///
/// An amount of `0` deletes the item. If the same item appears more than once in
/// `update`, the latest entry wins and keeps the position of the first one.
pub fn reconcile(existing: &OrderItems, update: &[MenuIndication]) -> OrderItems {
    let collapsed = collapse(update);
    let touched = collapsed.iter().map(|(number, _)| *number).collect::<BTreeSet<_>>();

    let (changed, added): (Vec<_>, Vec<_>) = collapsed
        .into_iter()
        .filter_map(|(_, indication)| indication)
        .partition(|indication| existing.find(indication.item_menu_number).is_some());

    let untouched = existing
        .iter()
        .filter(|indication| !touched.contains(&indication.item_menu_number))
        .cloned();

    OrderItems::new(changed.into_iter().chain(untouched).chain(added).collect())
}

/// One slot per distinct item number, in first-seen order. `None` marks a removal.
fn collapse(update: &[MenuIndication]) -> Vec<(u32, Option<MenuIndication>)> {
    let mut slots: Vec<(u32, Option<MenuIndication>)> = Vec::with_capacity(update.len());

    for indication in update {
        let value = (!indication.is_removal()).then(|| indication.clone());
        match slots.iter_mut().find(|(number, _)| *number == indication.item_menu_number) {
            Some(slot) => slot.1 = value,
            None => slots.push((indication.item_menu_number, value)),
        }
    }

    slots
}
