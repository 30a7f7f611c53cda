//! In-memory implementation of ReceiverRepository for testing and development
//!
//! Records are held in an insertion-ordered map behind an `RwLock`, so the
//! listing order is stable across calls — the order the pagination engine
//! relies on. Timestamps and the soft-delete marker are maintained here,
//! mirroring what the document store does in production.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use super::{ReceiverFilter, ReceiverRepository};
use crate::core::error::{NotFoundError, ReceiverError, StorageError};
use crate::core::receiver::Receiver;
use crate::core::update::UpdateField;

/// A receiver plus the persistence metadata the repository owns.
#[derive(Debug, Clone)]
struct StoredReceiver {
    receiver: Receiver,
    #[allow(dead_code)]
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// In-memory receiver repository.
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryReceiverRepository {
    records: Arc<RwLock<IndexMap<Uuid, StoredReceiver>>>,
}

impl InMemoryReceiverRepository {
    /// Create a new in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, IndexMap<Uuid, StoredReceiver>>, ReceiverError> {
        self.records.read().map_err(|e| {
            StorageError::LockPoisoned {
                message: e.to_string(),
            }
            .into()
        })
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, IndexMap<Uuid, StoredReceiver>>, ReceiverError>
    {
        self.records.write().map_err(|e| {
            StorageError::LockPoisoned {
                message: e.to_string(),
            }
            .into()
        })
    }
}

fn apply_patch(receiver: &mut Receiver, fields: &[UpdateField]) {
    for field in fields {
        match field {
            UpdateField::Identifier(value) => receiver.identifier = value.clone(),
            UpdateField::Name(value) => receiver.name = value.clone(),
            UpdateField::Email(value) => receiver.email = value.clone(),
            UpdateField::PixKey(value) => receiver.pix.key = value.clone(),
            UpdateField::PixKeyType(key_type) => receiver.pix.key_type = *key_type,
        }
    }
}

#[async_trait]
impl ReceiverRepository for InMemoryReceiverRepository {
    async fn create(&self, receiver: Receiver) -> Result<Receiver, ReceiverError> {
        let mut records = self.write()?;
        let now = Utc::now();

        records.insert(
            receiver.id,
            StoredReceiver {
                receiver: receiver.clone(),
                created_at: now,
                updated_at: now,
                deleted_at: None,
            },
        );

        Ok(receiver)
    }

    async fn list(&self, filter: &ReceiverFilter) -> Result<Vec<Receiver>, ReceiverError> {
        let records = self.read()?;

        Ok(records
            .values()
            .filter(|stored| stored.deleted_at.is_none())
            .map(|stored| &stored.receiver)
            .filter(|receiver| filter.matches(receiver))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Receiver, ReceiverError> {
        let records = self.read()?;

        records
            .get(id)
            .filter(|stored| stored.deleted_at.is_none())
            .map(|stored| stored.receiver.clone())
            .ok_or_else(|| NotFoundError::Receiver { id: *id }.into())
    }

    async fn update(&self, id: &Uuid, fields: &[UpdateField]) -> Result<(), ReceiverError> {
        let mut records = self.write()?;

        let stored = records
            .get_mut(id)
            .ok_or(ReceiverError::NotFound(NotFoundError::NoneMatched))?;

        apply_patch(&mut stored.receiver, fields);
        stored.updated_at = Utc::now();

        Ok(())
    }

    async fn delete(&self, ids: &[Uuid]) -> Result<(), ReceiverError> {
        let mut records = self.write()?;
        let now = Utc::now();
        let mut matched = 0usize;

        for id in ids {
            if let Some(stored) = records.get_mut(id) {
                stored.deleted_at = Some(now);
                matched += 1;
            }
        }

        if matched == 0 {
            return Err(NotFoundError::NoneMatched.into());
        }

        Ok(())
    }
}
