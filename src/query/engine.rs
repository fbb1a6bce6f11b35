use std::cmp::Ordering;

use regex::{Regex, RegexBuilder};

use super::filter::{PAGE_SIZE, SortDir, SortField, ToyFilter, ToyPage};
use crate::core::Toy;

/// Filters, sorts and paginates `toys` without touching the source slice.
///
/// Steps run in a fixed order: name pattern, stock flag, labels (all must
/// match), sort, then the page window. `max_page` is computed from the
/// filtered count before slicing, so it does not depend on `page_idx`.
pub fn run_query(toys: &[Toy], filter: &ToyFilter) -> ToyPage {
    let matcher = name_matcher(&filter.txt);

    let mut filtered: Vec<&Toy> = toys
        .iter()
        .filter(|toy| matcher.as_ref().is_none_or(|re| re.is_match(&toy.name)))
        .filter(|toy| filter.in_stock.is_none_or(|wanted| toy.in_stock == wanted))
        .filter(|toy| filter.labels.iter().all(|label| toy.has_label(label)))
        .collect();

    if let Some(field) = filter.sort_by.field {
        let dir = filter.sort_by.dir;
        // sort_by is stable: equal keys keep their collection order.
        filtered.sort_by(|left, right| {
            let order = compare_by(field, left, right);
            match dir {
                SortDir::Asc => order,
                SortDir::Desc => order.reverse(),
            }
        });
    }

    let total = filtered.len();
    let start = filter.page_idx.saturating_mul(PAGE_SIZE);
    let items = filtered
        .into_iter()
        .skip(start)
        .take(PAGE_SIZE)
        .cloned()
        .collect();

    ToyPage {
        items,
        max_page: max_page(total),
    }
}

pub fn max_page(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE)
}

/// Case-insensitive pattern over the toy name. Text that is not a valid
/// pattern is matched literally.
fn name_matcher(txt: &str) -> Option<Regex> {
    if txt.is_empty() {
        return None;
    }

    RegexBuilder::new(txt)
        .case_insensitive(true)
        .build()
        .or_else(|_| {
            RegexBuilder::new(&regex::escape(txt))
                .case_insensitive(true)
                .build()
        })
        .ok()
}

fn compare_by(field: SortField, left: &Toy, right: &Toy) -> Ordering {
    match field {
        SortField::Name => compare_names(&left.name, &right.name),
        SortField::Price => left
            .price
            .partial_cmp(&right.price)
            .unwrap_or(Ordering::Equal),
        SortField::CreatedAt => left.created_at.cmp(&right.created_at),
    }
}

// Case-insensitive first; on ties lowercase sorts before uppercase.
fn compare_names(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| right.cmp(left))
}
