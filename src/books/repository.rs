pub mod ddb_book_repository;
pub mod memory_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;

#[async_trait]
pub(crate) trait BookRepository: Repository<BookEntity> {
    // replace the stored record when its version still matches
    async fn update(&self, entity: &BookEntity) -> LibraryResult<BookEntity>;

    // remove the record together with its image records
    async fn delete(&self, entity: &BookEntity) -> LibraryResult<()>;

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>>;

    async fn find_by_title_and_author(&self, title: &str, author: &str) -> LibraryResult<Option<BookEntity>>;
}
