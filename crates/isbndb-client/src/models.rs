// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Serialize};

/// Book metadata from ISBNdb.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    /// Book title.
    pub title: String,
    /// Long-form title, when it differs from `title`.
    #[serde(default)]
    pub title_long: Option<String>,
    /// ISBN-10.
    pub isbn: String,
    /// ISBN-13.
    pub isbn13: String,
    #[serde(default)]
    pub dewey_decimal: Option<String>,
    /// Binding (e.g., "Hardcover", "Paperback").
    #[serde(default)]
    pub binding: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub date_published: Option<String>,
    #[serde(default)]
    pub pages: Option<u32>,
    /// Language code (e.g., "en").
    #[serde(default)]
    pub language: Option<String>,
    /// Cover image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Free-form dimension string (e.g., "Height: 9.2 Inches, ...").
    #[serde(default)]
    pub dimensions: Option<String>,
    #[serde(default)]
    pub dimensions_structured: Option<StructuredDimensions>,
    /// Manufacturer's suggested retail price.
    #[serde(default)]
    pub msrp: Option<f64>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub subjects: Option<Vec<String>>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub edition: Option<String>,
    /// Merchant price offers, present only when prices were requested.
    #[serde(default)]
    pub prices: Option<Vec<Price>>,
}

/// A merchant price offer for a book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Price {
    /// Item condition (e.g., "New", "Used").
    pub condition: String,
    pub merchant: String,
    #[serde(default)]
    pub merchant_logo: Option<String>,
    #[serde(default)]
    pub merchant_logo_offset: Option<MerchantLogoOffset>,
    #[serde(default)]
    pub shipping: Option<String>,
    pub price: String,
    pub total: String,
    /// Offer link at the merchant.
    pub link: String,
}

/// Pixel offset for rendering a merchant logo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MerchantLogoOffset {
    pub x: String,
    pub y: String,
}

/// A single physical dimension.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dimension {
    pub unit: String,
    pub value: f64,
}

/// Structured physical dimensions of a book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StructuredDimensions {
    pub length: Dimension,
    pub width: Dimension,
    pub height: Dimension,
    pub weight: Dimension,
}

/// Author with a page of their known books.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Author {
    /// Author name as known to the API.
    pub name: String,
    /// Total number of matching books across all pages.
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub books: Vec<Book>,
}

/// Publisher with the ISBNs of their known books.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Publisher {
    pub name: String,
    /// ISBNs of the publisher's books, per the upstream publisher schema.
    #[serde(default)]
    pub books: Vec<String>,
}

/// One page of search results, in the relevance order returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResults {
    /// Total number of matching books across all pages.
    pub total: u32,
    pub books: Vec<Book>,
}

/// Search query parameters for the book search endpoint.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Search query string.
    pub query: String,
    /// Page number, starting at 1 (server default 1).
    pub page: Option<u32>,
    /// Results per page (server default 20, upstream maximum 1000).
    pub page_size: Option<u32>,
    /// Language filter (e.g., "en").
    pub language: Option<String>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: None,
            page_size: None,
            language: None,
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Wire envelope for the single-book lookup payload.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BookEnvelope {
    pub book: Book,
}

/// One entry in a search or author book list.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BookEntry {
    pub book: Book,
}

/// Wire shape of the search payload.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchPage {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub books: Vec<BookEntry>,
}

/// Wire shape of the author lookup payload.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AuthorPage {
    pub author: String,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub books: Vec<BookEntry>,
}

/// Wire shape of the publisher lookup payload. Book entries here carry only
/// the ISBN.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PublisherPage {
    pub name: String,
    #[serde(default)]
    pub books: Vec<PublisherBookRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PublisherBookRef {
    pub isbn: String,
}
