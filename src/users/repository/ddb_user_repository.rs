use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, Put, TransactWriteItem};
use chrono::Utc;

use crate::core::domain::Identifiable;
use crate::core::library::{ErrorCode, LibraryError, LibraryResult, Role};
use crate::core::repository::Repository;
use crate::users::domain::model::UserEntity;
use crate::users::domain::user_unique_key;
use crate::users::repository::UserRepository;
use crate::utils::ddb::{cancellation_reasons, condition_failed, find_unique_owner, next_sequence, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, unique_guard_item, UNIQUE_KEYS_TABLE};

#[derive(Debug)]
pub struct DDBUserRepository {
    client: Client,
    table_name: String,
}

impl DDBUserRepository {
    pub(crate) fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<UserEntity> for DDBUserRepository {
    async fn create(&self, entity: &UserEntity) -> LibraryResult<UserEntity> {
        let id = next_sequence(&self.client, self.table_name.as_str()).await?;
        let saved = entity.with_identity(id, 0);
        let put_user = Put::builder()
            .table_name(self.table_name.as_str())
            .set_item(Some(parse_item(serde_json::to_value(&saved)?)?))
            .condition_expression("attribute_not_exists(user_id)")
            .build();
        let put_guard = Put::builder()
            .table_name(UNIQUE_KEYS_TABLE)
            .set_item(Some(unique_guard_item(saved.unique_key().as_str(), id)))
            .condition_expression("attribute_not_exists(unique_key)")
            .build();
        let res = self.client
            .transact_write_items()
            .transact_items(TransactWriteItem::builder().put(put_user).build())
            .transact_items(TransactWriteItem::builder().put(put_guard).build())
            .send()
            .await;
        match res {
            Ok(_) => Ok(saved),
            Err(err) => {
                if condition_failed(&cancellation_reasons(&err), 1) {
                    return Err(LibraryError::duplicate_key(
                        ErrorCode::UserAlreadyExists,
                        format!("username {} is taken", saved.username).as_str()));
                }
                Err(LibraryError::from(err))
            }
        }
    }

    async fn get(&self, id: i64) -> LibraryResult<UserEntity> {
        let out = self.client
            .get_item()
            .table_name(self.table_name.as_str())
            .key("user_id", AttributeValue::N(id.to_string()))
            .consistent_read(true)
            .send()
            .await?;
        match out.item() {
            Some(map) => Ok(map_to_user(map)),
            None => Err(LibraryError::not_found(ErrorCode::UserNotFound, format!("user not found for {}", id).as_str())),
        }
    }
}

#[async_trait]
impl UserRepository for DDBUserRepository {
    async fn find_by_username(&self, username: &str) -> LibraryResult<Option<UserEntity>> {
        match find_unique_owner(&self.client, user_unique_key(username).as_str()).await? {
            Some(id) => {
                match self.get(id).await {
                    Ok(user) => Ok(Some(user)),
                    Err(LibraryError::NotFound { .. }) => Ok(None),
                    Err(err) => Err(err),
                }
            }
            None => Ok(None),
        }
    }
}

fn map_to_user(map: &HashMap<String, AttributeValue>) -> UserEntity {
    UserEntity {
        user_id: parse_number_attribute("user_id", map),
        version: parse_number_attribute("version", map),
        username: parse_string_attribute("username", map).unwrap_or(String::from("")),
        password: parse_string_attribute("password", map).unwrap_or(String::from("")),
        refresh_token: parse_string_attribute("refresh_token", map),
        role: Role::from(parse_string_attribute("role", map).unwrap_or(String::from(""))),
        created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
        updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
    }
}
