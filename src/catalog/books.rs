//! Book store: the mutable collection of book records and selection state

use uuid::Uuid;

use crate::models::book::{Book, BookInput};

/// Ordered collection of books. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookStore {
    books: Vec<Book>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from persisted records, keeping their order.
    ///
    /// Persisted data may predate the exclusive-selection rule, so only the
    /// first selected record keeps its flag.
    pub fn from_books(mut books: Vec<Book>) -> Self {
        let mut seen_selected = false;
        for book in books.iter_mut().filter(|b| b.selected) {
            if seen_selected {
                book.selected = false;
            }
            seen_selected = true;
        }
        Self { books }
    }

    /// Append a new user-added book and return its id
    pub fn add(&mut self, input: &BookInput) -> String {
        let id = self.fresh_id();
        tracing::debug!("Adding book id={} title={:?}", id, input.title);
        self.books.push(Book::from_input(id.clone(), input));
        id
    }

    /// Replace the editable fields of `id`. Unknown ids are ignored.
    pub fn update(&mut self, id: &str, input: &BookInput) -> bool {
        match self.books.iter_mut().find(|b| b.id == id) {
            Some(book) => {
                book.apply_input(input);
                book.selected = false;
                true
            }
            None => {
                tracing::debug!("Update ignored, no book with id={}", id);
                false
            }
        }
    }

    /// Remove `id` if present and return the removed record
    pub fn delete(&mut self, id: &str) -> Option<Book> {
        let pos = self.books.iter().position(|b| b.id == id)?;
        Some(self.books.remove(pos))
    }

    /// Flip the selection of `id`; selecting deselects every other book
    pub fn toggle_select(&mut self, id: &str) {
        if !self.contains(id) {
            return;
        }
        for book in self.books.iter_mut() {
            book.selected = if book.id == id { !book.selected } else { false };
        }
    }

    pub fn list_user_added(&self) -> Vec<&Book> {
        self.books.iter().filter(|b| b.is_user_added).collect()
    }

    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn selected(&self) -> Option<&Book> {
        self.books.iter().find(|b| b.selected)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.books.iter().any(|b| b.id == id)
    }

    /// Every record, seeded ones included
    pub fn all(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.contains(&id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn input(title: &str, author: &str) -> BookInput {
        BookInput {
            title: title.to_string(),
            author: author.to_string(),
            ..Default::default()
        }
    }

    fn selected_count(store: &BookStore) -> usize {
        store.all().iter().filter(|b| b.selected).count()
    }

    #[test]
    fn test_add_assigns_distinct_ids() {
        let mut store = BookStore::new();
        let ids: HashSet<String> = (0..50)
            .map(|i| store.add(&input(&format!("Book {}", i), "X")))
            .collect();
        assert_eq!(ids.len(), 50);
        assert_eq!(store.len(), 50);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut store = BookStore::new();
        let a = store.add(&input("Dune", "X"));
        let b = store.add(&input("Foo", "X"));
        let listed: Vec<&str> = store.list_user_added().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(listed, vec![a.as_str(), b.as_str()]);
    }

    #[test]
    fn test_toggle_twice_deselects() {
        let mut store = BookStore::new();
        let id = store.add(&input("Dune", "X"));
        store.toggle_select(&id);
        assert!(store.get(&id).unwrap().selected);
        store.toggle_select(&id);
        assert!(!store.get(&id).unwrap().selected);
    }

    #[test]
    fn test_selection_is_exclusive() {
        let mut store = BookStore::new();
        let a = store.add(&input("A", "X"));
        let b = store.add(&input("B", "X"));
        let c = store.add(&input("C", "Y"));

        for id in [&a, &b, &c, &b, &b, &a] {
            store.toggle_select(id);
            assert!(selected_count(&store) <= 1);
        }
        assert_eq!(store.selected().map(|b| b.id.clone()), Some(a));
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let mut store = BookStore::new();
        let a = store.add(&input("A", "X"));
        store.toggle_select(&a);
        store.toggle_select("missing");
        assert!(store.get(&a).unwrap().selected);
    }

    #[test]
    fn test_update_replaces_fields_and_deselects() {
        let mut store = BookStore::new();
        let id = store.add(&input("Old", "X"));
        store.toggle_select(&id);

        let edited = BookInput {
            title: "New".to_string(),
            author: "Y".to_string(),
            publisher: "Ace".to_string(),
            ..Default::default()
        };
        assert!(store.update(&id, &edited));

        let book = store.get(&id).unwrap();
        assert_eq!(book.title, "New");
        assert_eq!(book.author, "Y");
        assert_eq!(book.publisher, "Ace");
        assert_eq!(book.language, "Unknown");
        assert!(!book.selected);
        assert!(book.is_user_added);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = BookStore::new();
        store.add(&input("A", "X"));
        let before = store.clone();
        assert!(!store.update("missing", &input("B", "Y")));
        assert_eq!(store, before);
    }

    #[test]
    fn test_delete() {
        let mut store = BookStore::new();
        let a = store.add(&input("A", "X"));
        let b = store.add(&input("B", "X"));
        assert_eq!(store.delete(&a).map(|b| b.title), Some("A".to_string()));
        assert!(store.delete(&a).is_none());
        assert_eq!(store.len(), 1);
        assert!(store.contains(&b));
    }

    #[test]
    fn test_list_user_added_skips_seeded() {
        let mut seeded = Book::from_input("seed".to_string(), &input("Seed", "Z"));
        seeded.is_user_added = false;
        let mut store = BookStore::from_books(vec![seeded]);
        let id = store.add(&input("Mine", "X"));

        let listed = store.list_user_added();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, id);
    }

    #[test]
    fn test_from_books_keeps_single_selection() {
        let mut a = Book::from_input("a".to_string(), &input("A", "X"));
        let mut b = Book::from_input("b".to_string(), &input("B", "X"));
        a.selected = true;
        b.selected = true;
        let store = BookStore::from_books(vec![a, b]);
        assert_eq!(selected_count(&store), 1);
        assert_eq!(store.selected().map(|b| b.id.as_str()), Some("a"));
    }
}
