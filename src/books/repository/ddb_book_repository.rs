use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, Delete, Put, TransactWriteItem};
use chrono::Utc;

use crate::books::domain::book_unique_key;
use crate::books::domain::model::{BookEntity, BookImageEntity};
use crate::books::repository::BookRepository;
use crate::core::domain::Identifiable;
use crate::core::library::{Category, ErrorCode, LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::utils::ddb::{cancellation_reasons, condition_failed, CONDITION_FAILED, find_unique_owner, next_sequence, parse_date_attribute, parse_item, parse_map_list_attribute, parse_number_attribute, parse_string_attribute, parse_string_list_attribute, unique_guard_item, UNIQUE_KEYS_TABLE};

#[derive(Debug)]
pub struct DDBBookRepository {
    client: Client,
    table_name: String,
}

impl DDBBookRepository {
    pub(crate) fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }

    fn put_book(&self, book: &BookEntity, condition: &str) -> LibraryResult<Put> {
        let val = serde_json::to_value(book)?;
        Ok(Put::builder()
            .table_name(self.table_name.as_str())
            .set_item(Some(parse_item(val)?))
            .condition_expression(condition)
            .build())
    }

    fn put_guard(&self, book: &BookEntity) -> Put {
        Put::builder()
            .table_name(UNIQUE_KEYS_TABLE)
            .set_item(Some(unique_guard_item(book.unique_key().as_str(), book.book_id)))
            .condition_expression("attribute_not_exists(unique_key)")
            .build()
    }

    fn delete_guard(&self, unique_key: &str, book_id: i64) -> Delete {
        Delete::builder()
            .table_name(UNIQUE_KEYS_TABLE)
            .key("unique_key", AttributeValue::S(unique_key.to_string()))
            .condition_expression("owner_id = :owner_id")
            .expression_attribute_values(":owner_id", AttributeValue::N(book_id.to_string()))
            .build()
    }

    async fn scan_page(&self, start: Option<HashMap<String, AttributeValue>>)
                       -> LibraryResult<(Vec<BookEntity>, Option<HashMap<String, AttributeValue>>)> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .scan()
            .table_name(table_name)
            .consistent_read(true)
            .set_exclusive_start_key(start)
            .send()
            .await.map_err(LibraryError::from).map(|req| {
            let records = req.items().unwrap_or_default().iter().map(map_to_book).collect();
            (records, req.last_evaluated_key().cloned())
        })
    }
}

#[async_trait]
impl Repository<BookEntity> for DDBBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let id = next_sequence(&self.client, self.table_name.as_str()).await?;
        let saved = entity.with_identity(id, 0);
        let res = self.client
            .transact_write_items()
            .transact_items(TransactWriteItem::builder()
                .put(self.put_book(&saved, "attribute_not_exists(book_id)")?).build())
            .transact_items(TransactWriteItem::builder()
                .put(self.put_guard(&saved)).build())
            .send()
            .await;
        match res {
            Ok(_) => Ok(saved),
            Err(err) => {
                let reasons = cancellation_reasons(&err);
                if condition_failed(&reasons, 1) {
                    return Err(LibraryError::duplicate_key(
                        ErrorCode::BookAlreadyExists,
                        format!("book {} by {} already exists", saved.title, saved.author).as_str()));
                }
                Err(LibraryError::from(err))
            }
        }
    }

    async fn get(&self, id: i64) -> LibraryResult<BookEntity> {
        let table_name: &str = self.table_name.as_ref();
        let out = self.client
            .get_item()
            .table_name(table_name)
            .key("book_id", AttributeValue::N(id.to_string()))
            .consistent_read(true)
            .send()
            .await?;
        match out.item() {
            Some(map) => Ok(map_to_book(map)),
            None => Err(LibraryError::not_found(ErrorCode::BookNotFound, format!("book not found for {}", id).as_str())),
        }
    }
}

#[async_trait]
impl BookRepository for DDBBookRepository {
    async fn update(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let stored = self.get(entity.book_id).await?;
        let saved = entity.with_identity(entity.book_id, entity.version + 1);
        let put = Put::builder()
            .table_name(self.table_name.as_str())
            .set_item(Some(parse_item(serde_json::to_value(&saved)?)?))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version.to_string()))
            .build();
        let mut request = self.client
            .transact_write_items()
            .transact_items(TransactWriteItem::builder().put(put).build());
        let rekeyed = stored.unique_key() != saved.unique_key();
        if rekeyed {
            request = request
                .transact_items(TransactWriteItem::builder()
                    .delete(self.delete_guard(stored.unique_key().as_str(), stored.book_id)).build())
                .transact_items(TransactWriteItem::builder()
                    .put(self.put_guard(&saved)).build());
        }
        match request.send().await {
            Ok(_) => Ok(saved),
            Err(err) => {
                let reasons = cancellation_reasons(&err);
                if rekeyed && condition_failed(&reasons, 2) {
                    return Err(LibraryError::duplicate_key(
                        ErrorCode::BookAlreadyExists,
                        format!("book {} by {} already exists", saved.title, saved.author).as_str()));
                }
                if condition_failed(&reasons, 0) {
                    return Err(LibraryError::database(
                        format!("stale version {} of book {}", entity.version, entity.book_id).as_str(),
                        Some(CONDITION_FAILED.to_string()), false));
                }
                Err(LibraryError::from(err))
            }
        }
    }

    async fn delete(&self, entity: &BookEntity) -> LibraryResult<()> {
        let delete_book = Delete::builder()
            .table_name(self.table_name.as_str())
            .key("book_id", AttributeValue::N(entity.book_id.to_string()))
            .condition_expression("attribute_exists(book_id)")
            .build();
        let res = self.client
            .transact_write_items()
            .transact_items(TransactWriteItem::builder().delete(delete_book).build())
            .transact_items(TransactWriteItem::builder()
                .delete(self.delete_guard(entity.unique_key().as_str(), entity.book_id)).build())
            .send()
            .await;
        match res {
            Ok(_) => Ok(()),
            Err(err) => {
                match delete_conflict(entity, &cancellation_reasons(&err)) {
                    Some(conflict) => Err(conflict),
                    None => Err(LibraryError::from(err)),
                }
            }
        }
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        let mut books = vec![];
        let mut start = None;
        loop {
            let (mut page, next) = self.scan_page(start).await?;
            books.append(&mut page);
            if next.is_none() {
                break;
            }
            start = next;
        }
        books.sort_by_key(|book| book.book_id);
        Ok(books)
    }

    async fn find_by_title_and_author(&self, title: &str, author: &str) -> LibraryResult<Option<BookEntity>> {
        let owner = find_unique_owner(&self.client, book_unique_key(title, author).as_str()).await?;
        match owner {
            Some(id) => {
                match self.get(id).await {
                    Ok(book) => Ok(Some(book)),
                    Err(LibraryError::NotFound { .. }) => Ok(None),
                    Err(err) => Err(err),
                }
            }
            None => Ok(None),
        }
    }
}

// delete_conflict names which item of a cancelled delete transaction failed its condition
fn delete_conflict(entity: &BookEntity, reasons: &[String]) -> Option<LibraryError> {
    if condition_failed(reasons, 0) {
        return Some(LibraryError::not_found(
            ErrorCode::BookNotFound, format!("book not found for {}", entity.book_id).as_str()));
    }
    if condition_failed(reasons, 1) {
        return Some(LibraryError::database(
            format!("unique key {} is not owned by book {}", entity.unique_key(), entity.book_id).as_str(),
            Some(CONDITION_FAILED.to_string()), false));
    }
    None
}

fn map_to_book(map: &HashMap<String, AttributeValue>) -> BookEntity {
    let book_id = parse_number_attribute("book_id", map);
    BookEntity {
        book_id,
        version: parse_number_attribute("version", map),
        title: parse_string_attribute("title", map).unwrap_or(String::from("")),
        author: parse_string_attribute("author", map).unwrap_or(String::from("")),
        publisher: parse_string_attribute("publisher", map).unwrap_or(String::from("")),
        price: parse_number_attribute("price", map),
        description: parse_string_attribute("description", map).unwrap_or(String::from("")),
        release_date: parse_string_attribute("release_date", map).unwrap_or(String::from("")),
        category_list: parse_string_list_attribute("category_list", map).iter()
            .filter_map(|c| Category::parse(c.as_str())).collect(),
        images: parse_map_list_attribute("images", map).into_iter().map(|image| {
            BookImageEntity {
                image_id: parse_string_attribute("image_id", image).unwrap_or(String::from("")),
                book_id,
                image_url: parse_string_attribute("image_url", image).unwrap_or(String::from("")),
            }
        }).collect(),
        created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
        updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
    }
}
