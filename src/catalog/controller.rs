use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    response::Json,
};
use serde::de::DeserializeOwned;
use crate::books::dto::BookDto;
use crate::catalog::command::create_book_cmd::{CreateBookCommand, CreateBookCommandRequest};
use crate::catalog::command::delete_book_cmd::{DeleteBookCommand, DeleteBookCommandRequest};
use crate::catalog::command::get_all_books_cmd::{GetAllBooksCommand, GetAllBooksCommandRequest};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
use crate::catalog::dto::{CreateBookRequest, UpdateBookRequest};
use crate::core::command::Command;
use crate::core::controller::{ApiResponse, ApiResult, AppState, json_to_server_error, ServerError};
use crate::storage::client::UploadFile;

const BOOK_PART: &str = "book";
const IMAGES_PART: &str = "images";

pub(crate) async fn create_book(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>) -> ApiResult<BookDto> {
    let (book, images) = read_book_parts::<CreateBookRequest>(multipart).await?;
    let req = CreateBookCommandRequest::new(book, images);
    let res = CreateBookCommand::new(state.catalog_service).execute(req).await?;
    Ok(Json(ApiResponse::success("Book created successfully.", res.book)))
}

pub(crate) async fn get_all_books(
    State(state): State<AppState>) -> ApiResult<Vec<BookDto>> {
    let res = GetAllBooksCommand::new(state.catalog_service).execute(GetAllBooksCommandRequest::default()).await?;
    Ok(Json(ApiResponse::success("Books retrieved successfully.", res.books)))
}

pub(crate) async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> ApiResult<BookDto> {
    let req = GetBookCommandRequest::new(parse_book_id(book_id.as_str())?);
    let res = GetBookCommand::new(state.catalog_service).execute(req).await?;
    Ok(Json(ApiResponse::success("Book retrieved successfully.", res.book)))
}

pub(crate) async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>) -> ApiResult<BookDto> {
    let book_id = parse_book_id(book_id.as_str())?;
    let (book, images) = read_book_parts::<UpdateBookRequest>(multipart).await?;
    let req = UpdateBookCommandRequest::new(book_id, book, images);
    let res = UpdateBookCommand::new(state.catalog_service).execute(req).await?;
    Ok(Json(ApiResponse::success("Book updated successfully.", res.book)))
}

pub(crate) async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> ApiResult<()> {
    let req = DeleteBookCommandRequest::new(parse_book_id(book_id.as_str())?);
    let res = DeleteBookCommand::new(state.catalog_service).execute(req).await?;
    if !res.cleanup.is_clean() {
        tracing::warn!(book_id = res.book_id, failed = res.cleanup.failed.len(), "book deleted with stored images left behind");
    }
    Ok(Json(ApiResponse::empty("Book deleted successfully.")))
}

fn parse_book_id(book_id: &str) -> Result<i64, ServerError> {
    book_id.parse::<i64>().map_err(|_| ServerError::invalid_request(
        format!("book id must be numeric but was {}", book_id).as_str()))
}

// read_book_parts splits a multipart body into the json `book` part and the `images` file parts
async fn read_book_parts<T: DeserializeOwned>(multipart: Result<Multipart, MultipartRejection>)
                                               -> Result<(T, Vec<UploadFile>), ServerError> {
    let mut multipart = multipart
        .map_err(|err| ServerError::invalid_request(format!("malformed multipart request: {}", err.body_text()).as_str()))?;
    let mut book: Option<T> = None;
    let mut images = vec![];
    while let Some(field) = multipart.next_field().await
        .map_err(|err| ServerError::invalid_request(format!("malformed multipart body: {}", err).as_str()))? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(|s| s.to_string());
        let content_type = field.content_type().map(|s| s.to_string());
        let bytes = field.bytes().await
            .map_err(|err| ServerError::invalid_request(format!("failed to read part {}: {}", name, err).as_str()))?;
        match name.as_str() {
            BOOK_PART => {
                book = Some(serde_json::from_slice(&bytes).map_err(json_to_server_error)?);
            }
            IMAGES_PART => {
                images.push(UploadFile::new(name.as_str(), file_name.as_deref(), content_type.as_deref(), bytes));
            }
            _ => {
                tracing::debug!(part = name.as_str(), "ignoring unknown multipart part");
            }
        }
    }
    match book {
        Some(book) => Ok((book, images)),
        None => Err(ServerError::invalid_request("multipart part `book` is required")),
    }
}
