pub mod service;

use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::catalog::dto::{CreateBookRequest, UpdateBookRequest};
use crate::core::library::LibraryResult;
use crate::storage::client::{CleanupReport, UploadFile};

#[async_trait]
pub trait CatalogService: Sync + Send {
    async fn create_book(&self, req: &CreateBookRequest, images: &[UploadFile]) -> LibraryResult<BookDto>;
    async fn get_all_books(&self) -> LibraryResult<Vec<BookDto>>;
    async fn get_book(&self, id: i64) -> LibraryResult<BookDto>;
    // a non-empty image in new_images replaces the whole image set, otherwise images are kept
    async fn update_book(&self, id: i64, req: &UpdateBookRequest, new_images: &[UploadFile]) -> LibraryResult<BookDto>;
    async fn delete_book(&self, id: i64) -> LibraryResult<CleanupReport>;
}
