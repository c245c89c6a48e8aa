use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::catalog::dto::UpdateBookRequest;
use crate::core::command::{Command, CommandError};
use crate::storage::client::UploadFile;

pub(crate) struct UpdateBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl UpdateBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct UpdateBookCommandRequest {
    pub(crate) book_id: i64,
    pub(crate) book: UpdateBookRequest,
    pub(crate) images: Vec<UploadFile>,
}

impl UpdateBookCommandRequest {
    pub fn new(book_id: i64, book: UpdateBookRequest, images: Vec<UploadFile>) -> Self {
        Self {
            book_id,
            book,
            images,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateBookCommandResponse {
    pub book: BookDto,
}

impl UpdateBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        self.catalog_service.update_book(req.book_id, &req.book, &req.images)
            .await.map_err(CommandError::from).map(UpdateBookCommandResponse::new)
    }
}
