//! Ordering and slicing shared by the in-memory repositories.

use std::cmp::Ordering;

use crate::domain::foundation::{Page, PageRequest, SortDirection};

/// Sorts `items` by the requested keys and cuts out the requested page.
///
/// `compare` orders two items by one whitelisted field name. Without sort
/// keys the insertion order is kept.
pub(super) fn page_of<T>(
    mut items: Vec<T>,
    request: &PageRequest,
    compare: impl Fn(&T, &T, &str) -> Ordering,
) -> Page<T> {
    if !request.order.is_empty() {
        items.sort_by(|a, b| {
            for key in &request.order {
                let ordering = match key.direction {
                    SortDirection::Asc => compare(a, b, key.field),
                    SortDirection::Desc => compare(a, b, key.field).reverse(),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });
    }

    let total = items.len() as u64;
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);
    let items = items.into_iter().skip(offset).take(limit).collect();
    Page::new(items, total, request)
}
