//! Book (catalog record) model and related types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_PUBLISHER: &str = "Unknown Publisher";
pub const DEFAULT_UNKNOWN: &str = "Unknown";
pub const DEFAULT_IMAGE_URL: &str = "https://via.placeholder.com/200x300?text=No+Image";
pub const DEFAULT_EXTERNAL_URL: &str = "#";
pub const DEFAULT_PRICE: &str = "N/A";

/// Book record as held by the catalog and persisted in the blob store.
///
/// Aliases accept blobs written by the legacy front end, which keyed books
/// by `isbn13` and stored `image`/`url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(alias = "isbn13")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub publication_year: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub pages: String,
    #[serde(default, alias = "image")]
    pub image_url: String,
    #[serde(default, alias = "url")]
    pub external_url: String,
    #[serde(default)]
    pub price: String,
    /// Records without the flag are seeded/demo data and stay hidden
    #[serde(default)]
    pub is_user_added: bool,
    #[serde(default)]
    pub selected: bool,
}

impl Book {
    /// Build a fresh user-added record from form input
    pub fn from_input(id: String, input: &BookInput) -> Self {
        let mut book = Self {
            id,
            title: String::new(),
            author: String::new(),
            publisher: String::new(),
            publication_year: String::new(),
            language: String::new(),
            pages: String::new(),
            image_url: String::new(),
            external_url: DEFAULT_EXTERNAL_URL.to_string(),
            price: DEFAULT_PRICE.to_string(),
            is_user_added: true,
            selected: false,
        };
        book.apply_input(input);
        book
    }

    /// Overwrite the editable fields, substituting sentinels for empty optionals.
    /// Identity, price, external URL and the user-added flag are left alone.
    pub fn apply_input(&mut self, input: &BookInput) {
        self.title = input.title.clone();
        self.author = input.author.clone();
        self.publisher = or_default(&input.publisher, DEFAULT_PUBLISHER);
        self.publication_year = or_default(&input.publication_year, DEFAULT_UNKNOWN);
        self.language = or_default(&input.language, DEFAULT_UNKNOWN);
        self.pages = or_default(&input.pages, DEFAULT_UNKNOWN);
        self.image_url = or_default(&input.image_url, DEFAULT_IMAGE_URL);
    }
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

/// Add/edit form payload. Every field is free-form; empty means "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub publication_year: String,
    pub language: String,
    pub pages: String,
    pub image_url: String,
}

impl From<&Book> for BookInput {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            publisher: book.publisher.clone(),
            publication_year: book.publication_year.clone(),
            language: book.language.clone(),
            pages: book.pages.clone(),
            image_url: book.image_url.clone(),
        }
    }
}

/// Author filter; an empty author means no restriction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct FilterCriteria {
    pub author: String,
}

/// Book as shown on the catalog page, with derived loan status
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image_url: String,
    pub external_url: String,
    pub price: String,
    pub selected: bool,
    pub on_loan: bool,
}

impl BookSummary {
    pub fn new(book: &Book, on_loan: bool) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            image_url: book.image_url.clone(),
            external_url: book.external_url.clone(),
            price: book.price.clone(),
            selected: book.selected,
            on_loan,
        }
    }
}
