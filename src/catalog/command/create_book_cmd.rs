use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::catalog::dto::CreateBookRequest;
use crate::core::command::{Command, CommandError};
use crate::storage::client::UploadFile;

pub(crate) struct CreateBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl CreateBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct CreateBookCommandRequest {
    pub(crate) book: CreateBookRequest,
    pub(crate) images: Vec<UploadFile>,
}

impl CreateBookCommandRequest {
    pub fn new(book: CreateBookRequest, images: Vec<UploadFile>) -> Self {
        Self {
            book,
            images,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateBookCommandResponse {
    pub book: BookDto,
}

impl CreateBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<CreateBookCommandRequest, CreateBookCommandResponse> for CreateBookCommand {
    async fn execute(&self, req: CreateBookCommandRequest) -> Result<CreateBookCommandResponse, CommandError> {
        self.catalog_service.create_book(&req.book, &req.images)
            .await.map_err(CommandError::from).map(CreateBookCommandResponse::new)
    }
}
