use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct GetAllBooksCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl GetAllBooksCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct GetAllBooksCommandRequest {}

#[derive(Debug, Serialize)]
pub(crate) struct GetAllBooksCommandResponse {
    pub books: Vec<BookDto>,
}

impl GetAllBooksCommandResponse {
    pub fn new(books: Vec<BookDto>) -> Self {
        Self {
            books,
        }
    }
}

#[async_trait]
impl Command<GetAllBooksCommandRequest, GetAllBooksCommandResponse> for GetAllBooksCommand {
    async fn execute(&self, _req: GetAllBooksCommandRequest) -> Result<GetAllBooksCommandResponse, CommandError> {
        self.catalog_service.get_all_books()
            .await.map_err(CommandError::from).map(GetAllBooksCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::command::get_all_books_cmd::{GetAllBooksCommand, GetAllBooksCommandRequest};
    use crate::catalog::dto::CreateBookRequest;
    use crate::catalog::factory;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;

    #[tokio::test]
    async fn test_should_run_get_all_books() {
        let svc = factory::create_catalog_service(&Configuration::new("test")).await;
        for title in ["first", "second", "third"] {
            svc.create_book(&CreateBookRequest::new(title, "Herbert", "Chilton", 100), &[])
                .await.expect("should create book");
        }
        let cmd = GetAllBooksCommand::new(svc);
        let res = cmd.execute(GetAllBooksCommandRequest::default()).await.expect("should list books");
        let titles: Vec<&str> = res.books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(vec!["first", "second", "third"], titles);
    }
}
