use std::sync::Arc;
use async_trait::async_trait;
use crate::books::domain::Book;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::catalog::dto::{CreateBookRequest, UpdateBookRequest};
use crate::core::domain::Configuration;
use crate::core::library::{ErrorCode, LibraryError, LibraryResult};
use crate::storage::client::{CleanupReport, purge_urls, StorageClient, UploadFile};
use crate::storage::PathName;

pub(crate) struct CatalogServiceImpl {
    book_repository: Box<dyn BookRepository>,
    storage_client: Arc<dyn StorageClient>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(_config: &Configuration, book_repository: Box<dyn BookRepository>,
                      storage_client: Arc<dyn StorageClient>) -> Self {
        Self {
            book_repository,
            storage_client,
        }
    }

    // upload_images stores every non-empty file; when one upload fails the ones already
    // stored by this call are removed before the error is returned
    async fn upload_images(&self, images: &[UploadFile]) -> LibraryResult<Vec<String>> {
        let mut urls = vec![];
        for image in images.iter().filter(|image| !image.is_empty()) {
            match self.storage_client.upload(PathName::BookImages, image).await {
                Ok(url) => urls.push(url),
                Err(err) => {
                    self.discard(&urls).await;
                    return Err(err);
                }
            }
        }
        Ok(urls)
    }

    async fn discard(&self, urls: &[String]) -> CleanupReport {
        let report = purge_urls(self.storage_client.as_ref(), urls).await;
        if !report.is_clean() {
            tracing::warn!(failed = report.failed.len(), "stored images left behind");
        }
        report
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn create_book(&self, req: &CreateBookRequest, images: &[UploadFile]) -> LibraryResult<BookDto> {
        req.validate()?;
        if self.book_repository.find_by_title_and_author(req.title.as_str(), req.author.as_str()).await?.is_some() {
            return Err(LibraryError::duplicate_key(
                ErrorCode::BookAlreadyExists,
                format!("book {} by {} already exists", req.title, req.author).as_str()));
        }
        let urls = self.upload_images(images).await?;
        let mut book = req.build_book();
        book.replace_images(&urls);
        match self.book_repository.create(&book).await {
            Ok(saved) => {
                tracing::info!(book_id = saved.book_id, images = urls.len(), "created book");
                Ok(BookDto::from(&saved))
            }
            Err(err) => {
                self.discard(&urls).await;
                Err(err)
            }
        }
    }

    async fn get_all_books(&self) -> LibraryResult<Vec<BookDto>> {
        let books = self.book_repository.find_all().await?;
        Ok(books.iter().map(BookDto::from).collect())
    }

    async fn get_book(&self, id: i64) -> LibraryResult<BookDto> {
        self.book_repository.get(id).await.map(|b| BookDto::from(&b))
    }

    async fn update_book(&self, id: i64, req: &UpdateBookRequest, new_images: &[UploadFile]) -> LibraryResult<BookDto> {
        let mut book = self.book_repository.get(id).await?;
        req.merge_into(&mut book);
        if !new_images.iter().any(|image| !image.is_empty()) {
            let saved = self.book_repository.update(&book).await?;
            return Ok(BookDto::from(&saved));
        }

        let urls = self.upload_images(new_images).await?;
        let old_urls = book.image_urls();
        book.replace_images(&urls);
        match self.book_repository.update(&book).await {
            Ok(saved) => {
                let report = self.discard(&old_urls).await;
                tracing::info!(book_id = saved.book_id, images = urls.len(),
                    purged = report.deleted.len(), "replaced book images");
                Ok(BookDto::from(&saved))
            }
            Err(err) => {
                self.discard(&urls).await;
                Err(err)
            }
        }
    }

    async fn delete_book(&self, id: i64) -> LibraryResult<CleanupReport> {
        let book = self.book_repository.get(id).await?;
        self.book_repository.delete(&book).await?;
        let report = self.discard(&book.image_urls()).await;
        tracing::info!(book_id = id, purged = report.deleted.len(), failed = report.failed.len(), "deleted book");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use async_once::AsyncOnce;
    use bytes::Bytes;
    use lazy_static::lazy_static;
    use crate::books::repository::memory_book_repository::MemoryBookRepository;
    use crate::catalog::domain::CatalogService;
    use crate::catalog::domain::service::CatalogServiceImpl;
    use crate::catalog::dto::{CreateBookRequest, UpdateBookRequest};
    use crate::catalog::factory;
    use crate::core::domain::Configuration;
    use crate::core::library::{Category, ErrorCode, LibraryError};
    use crate::storage::client::UploadFile;
    use crate::storage::memory::client::MemoryStorageClient;

    lazy_static! {
        static ref SUT_SVC: AsyncOnce<Arc<dyn CatalogService>> = AsyncOnce::new(async {
                factory::create_catalog_service(&Configuration::new("test")).await
            });
    }

    fn image(name: &str) -> UploadFile {
        UploadFile::new("images", Some(name), Some("image/png"), Bytes::from(name.to_string()))
    }

    fn blank() -> UploadFile {
        UploadFile::new("images", Some(""), None, Bytes::new())
    }

    fn sut() -> (CatalogServiceImpl, Arc<MemoryStorageClient>) {
        let storage = Arc::new(MemoryStorageClient::new("https://cdn.test"));
        let svc = CatalogServiceImpl::new(&Configuration::new("test"),
                                          Box::new(MemoryBookRepository::new()), storage.clone());
        (svc, storage)
    }

    fn dune() -> CreateBookRequest {
        let mut req = CreateBookRequest::new("Dune", "Herbert", "Chilton", 9900);
        req.description = "desert planet".to_string();
        req.release_date = "1965-08-01".to_string();
        req.category_list = vec![Category::Novel, Category::Science];
        req
    }

    #[tokio::test]
    async fn test_should_create_book() {
        let catalog_svc = SUT_SVC.get().await.clone();
        let req = CreateBookRequest::new("shared create", "Herbert", "Chilton", 100);
        let book = catalog_svc.create_book(&req, &[]).await.expect("should create book");

        let loaded = catalog_svc.get_book(book.id).await.expect("should return book");
        assert_eq!(book, loaded);
    }

    #[tokio::test]
    async fn test_should_assign_first_id_and_reject_duplicate() {
        let (catalog_svc, _) = sut();
        let first = catalog_svc.create_book(&dune(), &[]).await.expect("should create book");
        assert_eq!(1, first.id);

        let err = catalog_svc.create_book(&dune(), &[]).await.expect_err("should reject duplicate");
        assert!(matches!(err, LibraryError::DuplicateKey { code: ErrorCode::BookAlreadyExists, .. }));

        let books = catalog_svc.get_all_books().await.expect("should list books");
        assert_eq!(vec![first], books);
    }

    #[tokio::test]
    async fn test_should_not_upload_images_of_duplicate() {
        let (catalog_svc, storage) = sut();
        catalog_svc.create_book(&dune(), &[]).await.expect("should create book");
        let _ = catalog_svc.create_book(&dune(), &[image("a.png")]).await;
        assert_eq!(0, storage.object_count());
    }

    #[tokio::test]
    async fn test_should_skip_empty_images() {
        let (catalog_svc, storage) = sut();
        let book = catalog_svc.create_book(&dune(), &[image("a.png"), blank(), image("b.png"), blank()]).await
            .expect("should create book");
        assert_eq!(2, book.image_urls.len());
        assert!(book.image_urls.iter().all(|url| storage.contains(url)));
    }

    #[tokio::test]
    async fn test_should_fail_on_missing_book() {
        let (catalog_svc, _) = sut();
        let err = catalog_svc.get_book(42).await.expect_err("should fail");
        assert!(matches!(err, LibraryError::NotFound { code: ErrorCode::BookNotFound, .. }));
        let err = catalog_svc.update_book(42, &UpdateBookRequest::default(), &[]).await.expect_err("should fail");
        assert!(matches!(err, LibraryError::NotFound { code: ErrorCode::BookNotFound, .. }));
        let err = catalog_svc.delete_book(42).await.expect_err("should fail");
        assert!(matches!(err, LibraryError::NotFound { code: ErrorCode::BookNotFound, .. }));
    }

    #[tokio::test]
    async fn test_should_fail_on_deleted_book() {
        let (catalog_svc, _) = sut();
        let book = catalog_svc.create_book(&dune(), &[]).await.expect("should create book");
        catalog_svc.delete_book(book.id).await.expect("should delete book");
        let err = catalog_svc.get_book(book.id).await.expect_err("should fail");
        assert!(matches!(err, LibraryError::NotFound { code: ErrorCode::BookNotFound, .. }));
    }

    #[tokio::test]
    async fn test_should_update_only_price() {
        let (catalog_svc, _) = sut();
        let book = catalog_svc.create_book(&dune(), &[image("a.png")]).await.expect("should create book");
        let req = UpdateBookRequest { price: Some(12000), ..Default::default() };
        let updated = catalog_svc.update_book(book.id, &req, &[]).await.expect("should update book");
        assert_eq!(12000, updated.price);
        let mut expected = book.clone();
        expected.price = 12000;
        assert_eq!(expected, updated);
    }

    #[tokio::test]
    async fn test_should_keep_categories_on_empty_list() {
        let (catalog_svc, _) = sut();
        let book = catalog_svc.create_book(&dune(), &[]).await.expect("should create book");
        let req = UpdateBookRequest { category_list: Some(vec![]), ..Default::default() };
        let updated = catalog_svc.update_book(book.id, &req, &[]).await.expect("should update book");
        assert_eq!(vec![Category::Novel, Category::Science], updated.category_list);
    }

    #[tokio::test]
    async fn test_should_keep_images_without_new_content() {
        let (catalog_svc, storage) = sut();
        let book = catalog_svc.create_book(&dune(), &[image("a.png")]).await.expect("should create book");
        let updated = catalog_svc.update_book(book.id, &UpdateBookRequest::default(), &[blank()]).await
            .expect("should update book");
        assert_eq!(book.image_urls, updated.image_urls);
        assert!(storage.delete_attempts().is_empty());
    }

    #[tokio::test]
    async fn test_should_replace_images() {
        let (catalog_svc, storage) = sut();
        let book = catalog_svc.create_book(&dune(), &[image("a.png"), image("b.png")]).await
            .expect("should create book");
        let updated = catalog_svc.update_book(book.id, &UpdateBookRequest::default(), &[blank(), image("c.png")]).await
            .expect("should update book");
        assert_eq!(1, updated.image_urls.len());
        assert!(book.image_urls.iter().all(|url| !updated.image_urls.contains(url)));
        assert!(book.image_urls.iter().all(|url| !storage.contains(url)));
        assert!(storage.contains(updated.image_urls[0].as_str()));
        assert_eq!(book.image_urls, storage.delete_attempts());
    }

    #[tokio::test]
    async fn test_should_replace_images_when_old_deletes_fail() {
        let (catalog_svc, storage) = sut();
        let book = catalog_svc.create_book(&dune(), &[image("a.png")]).await.expect("should create book");
        storage.set_fail_deletes(true);
        let updated = catalog_svc.update_book(book.id, &UpdateBookRequest::default(), &[image("c.png")]).await
            .expect("should update book");
        assert_eq!(1, updated.image_urls.len());
        assert_ne!(book.image_urls, updated.image_urls);
        assert_eq!(book.image_urls, storage.delete_attempts());

        let loaded = catalog_svc.get_book(book.id).await.expect("should return book");
        assert_eq!(updated.image_urls, loaded.image_urls);
    }

    #[tokio::test]
    async fn test_should_leave_book_untouched_when_upload_fails() {
        let (catalog_svc, storage) = sut();
        let book = catalog_svc.create_book(&dune(), &[image("a.png")]).await.expect("should create book");
        storage.set_fail_uploads(true);
        let req = UpdateBookRequest { price: Some(1), ..Default::default() };
        let err = catalog_svc.update_book(book.id, &req, &[image("c.png")]).await.expect_err("should fail");
        assert!(matches!(err, LibraryError::Storage { .. }));
        assert_eq!(book, catalog_svc.get_book(book.id).await.expect("should return book"));
    }

    #[tokio::test]
    async fn test_should_persist_nothing_when_upload_fails() {
        let (catalog_svc, storage) = sut();
        storage.set_fail_uploads(true);
        let err = catalog_svc.create_book(&dune(), &[image("a.png")]).await.expect_err("should fail");
        assert!(matches!(err, LibraryError::Storage { .. }));
        assert!(catalog_svc.get_all_books().await.expect("should list books").is_empty());
    }

    #[tokio::test]
    async fn test_should_reject_rename_into_existing_book() {
        let (catalog_svc, _) = sut();
        catalog_svc.create_book(&dune(), &[]).await.expect("should create book");
        let other = catalog_svc.create_book(&CreateBookRequest::new("Emma", "Austen", "Murray", 500), &[]).await
            .expect("should create book");
        let req = UpdateBookRequest {
            title: Some("Dune".to_string()),
            author: Some("Herbert".to_string()),
            ..Default::default()
        };
        let err = catalog_svc.update_book(other.id, &req, &[]).await.expect_err("should reject duplicate");
        assert!(matches!(err, LibraryError::DuplicateKey { code: ErrorCode::BookAlreadyExists, .. }));
    }

    #[tokio::test]
    async fn test_should_overwrite_present_fields_as_given() {
        let (catalog_svc, _) = sut();
        let req = UpdateBookRequest { title: Some("".to_string()), ..Default::default() };
        let err = catalog_svc.update_book(9999, &req, &[]).await.expect_err("should fail");
        assert!(matches!(err, LibraryError::NotFound { code: ErrorCode::BookNotFound, .. }));

        let book = catalog_svc.create_book(&dune(), &[]).await.expect("should create book");
        let updated = catalog_svc.update_book(book.id, &req, &[]).await.expect("should update book");
        assert_eq!("", updated.title.as_str());
        assert_eq!("Herbert", updated.author.as_str());
    }

    #[tokio::test]
    async fn test_should_reject_invalid_requests() {
        let (catalog_svc, _) = sut();
        let err = catalog_svc.create_book(&CreateBookRequest::new("", "Herbert", "Chilton", 1), &[]).await
            .expect_err("should reject blank title");
        assert!(matches!(err, LibraryError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_should_delete_book_when_storage_deletes_fail() {
        let (catalog_svc, storage) = sut();
        let book = catalog_svc.create_book(&dune(), &[image("a.png"), image("b.png")]).await
            .expect("should create book");
        storage.set_fail_deletes(true);
        let report = catalog_svc.delete_book(book.id).await.expect("should delete book");
        assert_eq!(2, report.failed.len());
        assert_eq!(2, report.attempted());
        assert_eq!(book.image_urls, storage.delete_attempts());
        assert!(catalog_svc.get_book(book.id).await.is_err());
        assert!(catalog_svc.get_all_books().await.expect("should list books").is_empty());
    }

    #[tokio::test]
    async fn test_should_delete_book_images() {
        let (catalog_svc, storage) = sut();
        let book = catalog_svc.create_book(&dune(), &[image("a.png")]).await.expect("should create book");
        let report = catalog_svc.delete_book(book.id).await.expect("should delete book");
        assert!(report.is_clean());
        assert_eq!(book.image_urls, report.deleted);
        assert_eq!(0, storage.object_count());
    }
}
