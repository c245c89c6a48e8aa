use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::core::library::Category;

// BookDto is the representation of a book returned by the Catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub price: i64,
    pub description: String,
    pub release_date: String,
    pub category_list: Vec<Category>,
    pub image_urls: Vec<String>,
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            id: other.book_id,
            title: other.title.to_string(),
            author: other.author.to_string(),
            publisher: other.publisher.to_string(),
            price: other.price,
            description: other.description.to_string(),
            release_date: other.release_date.to_string(),
            category_list: other.category_list.clone(),
            image_urls: other.image_urls(),
        }
    }
}
