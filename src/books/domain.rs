use crate::core::domain::Identifiable;

pub mod model;

pub trait Book: Identifiable {
    fn title(&self) -> &str;
    fn author(&self) -> &str;
    // urls of every stored image, in upload order
    fn image_urls(&self) -> Vec<String>;
}

// book_unique_key is the natural key that no two books may share
pub(crate) fn book_unique_key(title: &str, author: &str) -> String {
    format!("book#{}\u{1f}{}", title, author)
}
