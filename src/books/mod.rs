//! The book catalog - the protected resource behind the API

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: i32,
}

/// In-memory book catalog
pub struct Catalog {
    books: Arc<RwLock<Vec<Book>>>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            books: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// All books in the catalog
    pub async fn list(&self) -> Vec<Book> {
        self.books.read().await.clone()
    }

    /// Add a book
    pub async fn add(&self, book: Book) {
        self.books.write().await.push(book);
    }

    /// Number of books in the catalog
    pub async fn count(&self) -> usize {
        self.books.read().await.len()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Catalog {
    fn clone(&self) -> Self {
        Self {
            books: Arc::clone(&self.books),
        }
    }
}
