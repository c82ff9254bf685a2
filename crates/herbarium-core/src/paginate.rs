//! Category pagination
//!
//! Cuts each category's joined item list into fixed-size pages. Page zero
//! sits at the category's bare slug; later pages append `/2`, `/3`, and so
//! on. Categories missing a name, identifier, or archival id are skipped
//! whole; an empty item list still yields one empty page so the category
//! renders.

use herbarium_commons::{FlatCollection, Page, PageSlugs};
use serde_json::Value;

/// Build the pages of every category in the collection
///
/// # Arguments
/// * `categories` - Joined categories carrying `"<item_type>_items"` lists
/// * `item_type` - Type the item lists were attached under
/// * `items_per_page` - Chunk size; only the last page may be shorter
pub fn paginate(categories: &FlatCollection, item_type: &str, items_per_page: usize) -> Vec<Page> {
    let per_page = items_per_page.max(1);
    let mut pages = Vec::new();

    for category in categories.records() {
        let (name, identifier, archival_id) = match (
            category.name(),
            category.identifier(),
            category.archival_id(),
        ) {
            (Some(name), Some(identifier), Some(archival_id)) => (name, identifier, archival_id),
            _ => {
                log::warn!(
                    "Skipping category '{}' during pagination, missing name or archival id",
                    category.identifier().unwrap_or("<no identifier>")
                );
                continue;
            }
        };

        let items = match category.items_of(item_type) {
            Some(items) => items,
            None => {
                log::warn!(
                    "Skipping category '{}' during pagination, no item list attached",
                    identifier
                );
                continue;
            }
        };

        let page_count = if items.is_empty() {
            1
        } else {
            items.len().div_ceil(per_page)
        };
        let slugs = page_slugs(identifier, page_count);

        for number in 0..page_count {
            let start = number * per_page;
            let end = usize::min(start + per_page, items.len());
            let chunk: Vec<Value> = items[start..end].to_vec();

            pages.push(Page {
                title: name.to_string(),
                slug: slugs[number].clone(),
                page_number: number,
                total_pages: page_count,
                archival_id,
                items: chunk,
                page_slugs: PageSlugs {
                    all: slugs.clone(),
                    next: slugs.get(number + 1).cloned(),
                    previous: if number == 0 {
                        None
                    } else {
                        slugs.get(number - 1).cloned()
                    },
                    first: slugs[0].clone(),
                    last: slugs[page_count - 1].clone(),
                },
            });
        }
    }
    pages
}

/// Slug of every page: the bare identifier first, then `<identifier>/2`,
/// `<identifier>/3`, ...
fn page_slugs(identifier: &str, count: usize) -> Vec<String> {
    (0..count)
        .map(|number| {
            if number == 0 {
                identifier.to_string()
            } else {
                format!("{}/{}", identifier, number + 1)
            }
        })
        .collect()
}
