use async_trait::async_trait;
use crate::books::domain::book_unique_key;
use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{ErrorCode, LibraryResult};
use crate::core::repository::Repository;
use crate::utils::memory::MemoryTable;

pub(crate) struct MemoryBookRepository {
    table: MemoryTable<BookEntity>,
}

impl MemoryBookRepository {
    pub(crate) fn new() -> Self {
        Self {
            table: MemoryTable::new("books", ErrorCode::BookNotFound, ErrorCode::BookAlreadyExists),
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        self.table.insert(entity)
    }

    async fn get(&self, id: i64) -> LibraryResult<BookEntity> {
        self.table.get(id)
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn update(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        self.table.update(entity)
    }

    async fn delete(&self, entity: &BookEntity) -> LibraryResult<()> {
        self.table.delete(entity.book_id).map(|_| ())
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        self.table.all()
    }

    async fn find_by_title_and_author(&self, title: &str, author: &str) -> LibraryResult<Option<BookEntity>> {
        self.table.find_by_unique_key(book_unique_key(title, author).as_str())
    }
}
