//! Filter engine: derives the visible books and the author choices

use std::collections::BTreeSet;

use crate::models::book::{Book, FilterCriteria};

/// Non-blank authors of user-added books, deduplicated and sorted
pub fn distinct_authors(books: &[Book]) -> Vec<String> {
    books
        .iter()
        .filter(|b| b.is_user_added)
        .map(|b| b.author.as_str())
        .filter(|author| !author.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// User-added books matching the author exactly, in their original order
pub fn apply_filter<'a>(books: &'a [Book], criteria: &FilterCriteria) -> Vec<&'a Book> {
    books
        .iter()
        .filter(|b| b.is_user_added)
        .filter(|b| criteria.author.is_empty() || b.author == criteria.author)
        .collect()
}
