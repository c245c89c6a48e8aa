use serde::{Deserialize, Serialize};
use crate::books::domain::model::BookEntity;
use crate::core::library::{Category, LibraryError, LibraryResult};

// CreateBookRequest carries the metadata of a new book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub price: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "releaseDate")]
    pub release_date: String,
    #[serde(default, alias = "categoryList")]
    pub category_list: Vec<Category>,
}

impl CreateBookRequest {
    pub fn new(title: &str, author: &str, publisher: &str, price: i64) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            publisher: publisher.to_string(),
            price,
            description: String::new(),
            release_date: String::new(),
            category_list: vec![],
        }
    }

    pub fn validate(&self) -> LibraryResult<()> {
        require_text("title", self.title.as_str())?;
        require_text("author", self.author.as_str())?;
        require_text("publisher", self.publisher.as_str())?;
        require_price(self.price)
    }

    pub fn build_book(&self) -> BookEntity {
        let mut book = BookEntity::new(self.title.as_str(), self.author.as_str(),
                                       self.publisher.as_str(), self.price);
        book.description = self.description.to_string();
        book.release_date = self.release_date.to_string();
        book.category_list = Category::dedup(&self.category_list);
        book
    }
}

// UpdateBookRequest carries a partial update; absent fields keep their stored value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateBookRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "releaseDate")]
    pub release_date: Option<String>,
    #[serde(default, alias = "categoryList")]
    pub category_list: Option<Vec<Category>>,
}

impl UpdateBookRequest {
    // merge_into copies every present field onto the book. An empty category list is
    // treated like an absent one and leaves the stored categories untouched.
    pub fn merge_into(&self, book: &mut BookEntity) {
        if let Some(title) = &self.title {
            book.title = title.to_string();
        }
        if let Some(author) = &self.author {
            book.author = author.to_string();
        }
        if let Some(publisher) = &self.publisher {
            book.publisher = publisher.to_string();
        }
        if let Some(price) = self.price {
            book.price = price;
        }
        if let Some(description) = &self.description {
            book.description = description.to_string();
        }
        if let Some(release_date) = &self.release_date {
            book.release_date = release_date.to_string();
        }
        if let Some(categories) = &self.category_list {
            if !categories.is_empty() {
                book.category_list = Category::dedup(categories);
            }
        }
    }
}

fn require_text(field: &str, value: &str) -> LibraryResult<()> {
    if value.trim().is_empty() {
        return Err(LibraryError::validation(format!("{} must not be blank", field).as_str(),
                                            Some(field.to_string())));
    }
    Ok(())
}

fn require_price(price: i64) -> LibraryResult<()> {
    if price < 0 {
        return Err(LibraryError::validation("price must not be negative", Some("price".to_string())));
    }
    Ok(())
}
