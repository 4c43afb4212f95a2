//! Stack normalization: enforce per-item-type stack caps.

use crate::catalog::{ItemCatalog, effective_stack_limit};
use crate::item::ItemRecord;

/// Split every stack that exceeds its resolved cap into cap-sized
/// stacks plus a remainder, each split record with a fresh `item_id`.
///
/// Compliant stacks pass through untouched, so the operation is
/// idempotent; the unit total per base item is preserved.
pub fn split_stacks(items: Vec<ItemRecord>, catalog: &ItemCatalog) -> Vec<ItemRecord> {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let limit = catalog.stack_limit_for(&item.base_item_id);
        if item.amount <= limit {
            out.push(item);
            continue;
        }
        let mut remaining = item.amount;
        while remaining > 0 {
            let stack_amount = remaining.min(limit);
            out.push(item.with_fresh_id(stack_amount));
            remaining -= stack_amount;
        }
    }
    out
}

/// Add `quantity` units of a base item: top up existing non-full
/// stacks of that id in sequence order, then append new stacks at the
/// cap until the remainder fits in one final stack.
pub fn add_items(
    inventory: &mut Vec<ItemRecord>,
    base_item_id: &str,
    quantity: i64,
    catalog: &ItemCatalog,
) {
    let config = catalog.config_for(base_item_id);
    let limit = effective_stack_limit(config.max_stack_size);
    let mut remaining = quantity.max(1);

    for item in inventory.iter_mut() {
        if remaining <= 0 {
            break;
        }
        if item.base_item_id != base_item_id || item.amount >= limit {
            continue;
        }
        let take = remaining.min(limit - item.amount);
        item.amount += take;
        remaining -= take;
    }

    while remaining > 0 {
        let stack_amount = remaining.min(limit);
        inventory.push(ItemRecord::new_stack(base_item_id, stack_amount, &config));
        remaining -= stack_amount;
    }
}
