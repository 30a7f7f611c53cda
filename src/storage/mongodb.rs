//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides a `MongoReceiverRepository` backed by a single `receivers`
//! collection via `mongodb::Database`.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag:
//! ```toml
//! [dependencies]
//! pix-receivers = { version = "0.1", features = ["mongodb_backend"] }
//! ```
//!
//! # Storage model
//!
//! Receivers are stored one document each, with the Pix key embedded as a
//! sub-document so field patches can address `pix.key` and `pix.key_type`
//! directly. Soft deletion sets `deleted_at`; the field is omitted entirely
//! while a record is live, so reads filter on `deleted_at: {$exists: false}`.
//! Listing sorts by ascending `created_at`, giving the stable order the
//! pagination engine requires.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{DateTime as BsonDateTime, Document, doc};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ReceiverFilter, ReceiverRepository};
use crate::core::error::{NotFoundError, ReceiverError, StorageError};
use crate::core::pix::{Pix, PixKeyType};
use crate::core::receiver::{Receiver, Status};
use crate::core::update::UpdateField;

const BACKEND: &str = "MongoDB";

// ---------------------------------------------------------------------------
// Document model
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct PixDocument {
    key_type: PixKeyType,
    key: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ReceiverDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    identifier: String,
    name: String,
    email: String,
    pix: PixDocument,
    bank: Option<String>,
    agency: Option<String>,
    account: Option<String>,
    status: Status,
    created_at: BsonDateTime,
    updated_at: BsonDateTime,
    /// Omitted while the record is live so `$exists: false` filters apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    deleted_at: Option<BsonDateTime>,
}

impl ReceiverDocument {
    fn from_receiver(receiver: &Receiver, now: BsonDateTime) -> Self {
        Self {
            id: receiver.id,
            identifier: receiver.identifier.clone(),
            name: receiver.name.clone(),
            email: receiver.email.clone(),
            pix: PixDocument {
                key_type: receiver.pix.key_type,
                key: receiver.pix.key.clone(),
            },
            bank: receiver.bank.clone(),
            agency: receiver.agency.clone(),
            account: receiver.account.clone(),
            status: receiver.status,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn into_receiver(self) -> Receiver {
        Receiver {
            id: self.id,
            identifier: self.identifier,
            name: self.name,
            email: self.email,
            pix: Pix {
                key_type: self.pix.key_type,
                key: self.pix.key,
            },
            bank: self.bank,
            agency: self.agency,
            account: self.account,
            status: self.status,
        }
    }
}

// ---------------------------------------------------------------------------
// Query helpers
// ---------------------------------------------------------------------------

fn query_error(err: mongodb::error::Error) -> ReceiverError {
    StorageError::Query {
        backend: BACKEND,
        message: err.to_string(),
    }
    .into()
}

/// The document path a patch field writes to.
fn field_path(field: &UpdateField) -> &'static str {
    match field {
        UpdateField::Identifier(_) => "identifier",
        UpdateField::Name(_) => "name",
        UpdateField::Email(_) => "email",
        UpdateField::PixKey(_) => "pix.key",
        UpdateField::PixKeyType(_) => "pix.key_type",
    }
}

fn list_filter(filter: &ReceiverFilter) -> Document {
    let mut document = doc! { "deleted_at": { "$exists": false } };

    if let Some(status) = filter.status {
        document.insert("status", status.as_str());
    }
    if let Some(name) = &filter.name {
        document.insert("name", name);
    }
    if let Some(key_type) = filter.key_type {
        document.insert("pix.key_type", key_type.as_str());
    }
    if let Some(key) = &filter.key {
        document.insert("pix.key", key);
    }

    document
}

// ---------------------------------------------------------------------------
// MongoReceiverRepository
// ---------------------------------------------------------------------------

/// Receiver repository backed by MongoDB.
#[derive(Clone, Debug)]
pub struct MongoReceiverRepository {
    database: Database,
    collection_name: String,
}

impl MongoReceiverRepository {
    /// Default collection name.
    pub const COLLECTION: &'static str = "receivers";

    /// Create a repository over the default collection of `database`.
    pub fn new(database: &Database) -> Self {
        Self::with_collection(database, Self::COLLECTION)
    }

    /// Create a repository over a specific collection.
    pub fn with_collection(database: &Database, collection: &str) -> Self {
        Self {
            database: database.clone(),
            collection_name: collection.to_string(),
        }
    }

    fn collection(&self) -> Collection<ReceiverDocument> {
        self.database.collection(&self.collection_name)
    }
}

#[async_trait]
impl ReceiverRepository for MongoReceiverRepository {
    async fn create(&self, receiver: Receiver) -> Result<Receiver, ReceiverError> {
        let document = ReceiverDocument::from_receiver(&receiver, BsonDateTime::now());

        self.collection()
            .insert_one(&document)
            .await
            .map_err(query_error)?;

        Ok(document.into_receiver())
    }

    async fn list(&self, filter: &ReceiverFilter) -> Result<Vec<Receiver>, ReceiverError> {
        let cursor = self
            .collection()
            .find(list_filter(filter))
            .sort(doc! { "created_at": 1 })
            .await
            .map_err(query_error)?;

        let documents: Vec<ReceiverDocument> =
            cursor.try_collect().await.map_err(query_error)?;

        Ok(documents
            .into_iter()
            .map(ReceiverDocument::into_receiver)
            .collect())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Receiver, ReceiverError> {
        let document = self
            .collection()
            .find_one(doc! {
                "_id": id.to_string(),
                "deleted_at": { "$exists": false },
            })
            .await
            .map_err(query_error)?;

        document
            .map(ReceiverDocument::into_receiver)
            .ok_or_else(|| NotFoundError::Receiver { id: *id }.into())
    }

    async fn update(&self, id: &Uuid, fields: &[UpdateField]) -> Result<(), ReceiverError> {
        let mut set = Document::new();
        for field in fields {
            set.insert(field_path(field), field.value());
        }
        set.insert("updated_at", BsonDateTime::now());

        let result = self
            .collection()
            .update_one(doc! { "_id": id.to_string() }, doc! { "$set": set })
            .await
            .map_err(query_error)?;

        if result.matched_count == 0 {
            return Err(NotFoundError::NoneMatched.into());
        }

        Ok(())
    }

    async fn delete(&self, ids: &[Uuid]) -> Result<(), ReceiverError> {
        let id_filters: Vec<Document> = ids
            .iter()
            .map(|id| doc! { "_id": id.to_string() })
            .collect();

        let result = self
            .collection()
            .update_many(
                doc! { "$or": id_filters },
                doc! { "$set": { "deleted_at": BsonDateTime::now() } },
            )
            .await
            .map_err(query_error)?;

        if result.matched_count == 0 {
            return Err(NotFoundError::NoneMatched.into());
        }

        Ok(())
    }
}
