//! Filtering and sorting of the loaded collection.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::domain::{FilterConfig, Item, SortKey};

/// Produces the shown sequence for `config`.
///
/// Stages run in a fixed order: text, categories, generation, favorites,
/// then a stable sort. The input is never modified.
pub fn recompute<'a>(
    items: &'a [Item],
    config: &FilterConfig,
    favorites: &HashSet<u32>,
) -> Vec<&'a Item> {
    recompute_indices(items, config, favorites)
        .into_iter()
        .map(|i| &items[i])
        .collect()
}

/// Same as [`recompute`] but yields positions into `items`.
pub fn recompute_indices(
    items: &[Item],
    config: &FilterConfig,
    favorites: &HashSet<u32>,
) -> Vec<usize> {
    let mut shown: Vec<usize> = (0..items.len())
        .filter(|&i| matches(&items[i], config, favorites))
        .collect();

    shown.sort_by(|&a, &b| compare(&items[a], &items[b], config.sort_by));
    shown
}

fn matches(item: &Item, config: &FilterConfig, favorites: &HashSet<u32>) -> bool {
    if !config.text.is_empty() && !item.name.to_lowercase().contains(&config.text) {
        return false;
    }

    if !config
        .categories
        .iter()
        .all(|category| item.has_category(category))
    {
        return false;
    }

    if let Some(generation) = config.generation {
        if !generation.contains(item.id) {
            return false;
        }
    }

    !config.favorites_only || favorites.contains(&item.id)
}

pub fn compare(a: &Item, b: &Item, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Name => compare_names(&a.name, &b.name),
        SortKey::Height => a.height.total_cmp(&b.height),
        SortKey::Weight => a.weight.total_cmp(&b.weight),
    }
}

/// Case-insensitive first, then by code point so the order stays total.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
