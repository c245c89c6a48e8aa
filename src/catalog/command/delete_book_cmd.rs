use std::sync::Arc;
use async_trait::async_trait;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::storage::client::CleanupReport;

pub(crate) struct DeleteBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl DeleteBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct DeleteBookCommandRequest {
    pub(crate) book_id: i64,
}

impl DeleteBookCommandRequest {
    pub fn new(book_id: i64) -> Self {
        Self {
            book_id,
        }
    }
}

#[derive(Debug)]
pub(crate) struct DeleteBookCommandResponse {
    pub book_id: i64,
    pub cleanup: CleanupReport,
}

#[async_trait]
impl Command<DeleteBookCommandRequest, DeleteBookCommandResponse> for DeleteBookCommand {
    async fn execute(&self, req: DeleteBookCommandRequest) -> Result<DeleteBookCommandResponse, CommandError> {
        self.catalog_service.delete_book(req.book_id)
            .await.map_err(CommandError::from)
            .map(|cleanup| DeleteBookCommandResponse { book_id: req.book_id, cleanup })
    }
}
