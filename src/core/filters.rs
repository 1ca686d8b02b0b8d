use crate::models::{Category, Item, PetType};

/// Sub-filter values that disable sub-filtering
const ALL_SUB_FILTERS: [&str; 2] = ["all", "全部"];

/// Whether the sub-filter value means "no sub-filter"
#[inline]
pub fn is_all_sub_filter(sub_filter: &str) -> bool {
    let sub_filter = sub_filter.trim();
    sub_filter.is_empty()
        || ALL_SUB_FILTERS
            .iter()
            .any(|all| sub_filter.eq_ignore_ascii_case(all))
}

/// Stage 1: category
#[inline]
pub fn matches_category(item: &Item, category: Category) -> bool {
    item.category == category
}

/// Stage 2: sub-filter.
///
/// Pets match on the exact pet type; a sub-filter with no pet type mapping
/// matches no pet. Every other category matches the term anywhere in the
/// title or description, ignoring case.
#[inline]
pub fn matches_sub_filter(item: &Item, category: Category, sub_filter: &str) -> bool {
    if is_all_sub_filter(sub_filter) {
        return true;
    }

    let term = sub_filter.trim();
    if category == Category::Pet {
        return match PetType::from_label(term) {
            Some(pet_type) => item.pet_type == Some(pet_type),
            None => false,
        };
    }

    contains_ignore_case(&item.title, term) || contains_ignore_case(&item.description, term)
}

/// Stage 3: free-text search over title, description and place name
#[inline]
pub fn matches_search(item: &Item, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }

    contains_ignore_case(&item.title, query)
        || contains_ignore_case(&item.description, query)
        || contains_ignore_case(&item.last_seen.display_name, query)
}

/// Stage 4: hidden listings are only shown to administrators
#[inline]
pub fn is_visible_to(item: &Item, is_admin: bool) -> bool {
    is_admin || !item.admin_hidden
}

/// Stage 5: listings reported as fake too often are dropped for everyone
#[inline]
pub fn is_within_report_limit(item: &Item, fake_report_limit: u32) -> bool {
    item.fake_reports < fake_report_limit
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
