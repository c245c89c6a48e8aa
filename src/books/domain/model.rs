use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::books::domain::{Book, book_unique_key};
use crate::core::domain::Identifiable;
use crate::core::library::Category;
use crate::utils::date::serializer;

// BookEntity is the catalog record of a title together with the images it exclusively owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEntity {
    pub book_id: i64,
    pub version: i64,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub price: i64,
    pub description: String,
    pub release_date: String,
    pub category_list: Vec<Category>,
    pub images: Vec<BookImageEntity>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

// BookImageEntity points at a stored blob; it is embedded in the owning book's record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookImageEntity {
    pub image_id: String,
    pub book_id: i64,
    pub image_url: String,
}

impl BookImageEntity {
    pub fn new(book_id: i64, image_url: &str) -> Self {
        Self {
            image_id: Uuid::new_v4().to_string(),
            book_id,
            image_url: image_url.to_string(),
        }
    }
}

impl BookEntity {
    pub fn new(title: &str, author: &str, publisher: &str, price: i64) -> Self {
        Self {
            book_id: 0,
            version: 0,
            title: title.to_string(),
            author: author.to_string(),
            publisher: publisher.to_string(),
            price,
            description: String::new(),
            release_date: String::new(),
            category_list: vec![],
            images: vec![],
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    // replace_images swaps the owned image set, returning the images that were dropped
    pub fn replace_images(&mut self, urls: &[String]) -> Vec<BookImageEntity> {
        let replaced = urls.iter().map(|url| BookImageEntity::new(self.book_id, url)).collect();
        std::mem::replace(&mut self.images, replaced)
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> i64 {
        self.book_id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn unique_key(&self) -> String {
        book_unique_key(self.title.as_str(), self.author.as_str())
    }

    fn with_identity(&self, id: i64, version: i64) -> Self {
        let mut book = self.clone();
        book.book_id = id;
        book.version = version;
        book.updated_at = Utc::now().naive_utc();
        for image in book.images.iter_mut() {
            image.book_id = id;
        }
        book
    }
}

impl Book for BookEntity {
    fn title(&self) -> &str {
        self.title.as_str()
    }

    fn author(&self) -> &str {
        self.author.as_str()
    }

    fn image_urls(&self) -> Vec<String> {
        self.images.iter().map(|image| image.image_url.clone()).collect()
    }
}
