//! Storage implementations for different backends

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::ReceiverError;
use crate::core::pix::PixKeyType;
use crate::core::receiver::{Receiver, Status};
use crate::core::update::UpdateField;

pub mod in_memory;
#[cfg(feature = "mongodb_backend")]
pub mod mongodb;

pub use in_memory::InMemoryReceiverRepository;
#[cfg(feature = "mongodb_backend")]
pub use mongodb::MongoReceiverRepository;

/// Exact-match filter for listing receivers. All fields optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReceiverFilter {
    pub status: Option<Status>,
    pub name: Option<String>,
    pub key_type: Option<PixKeyType>,
    pub key: Option<String>,
}

impl ReceiverFilter {
    fn matches(&self, receiver: &Receiver) -> bool {
        self.status.is_none_or(|status| receiver.status == status)
            && self
                .name
                .as_deref()
                .is_none_or(|name| receiver.name == name)
            && self
                .key_type
                .is_none_or(|key_type| receiver.pix.key_type == key_type)
            && self.key.as_deref().is_none_or(|key| receiver.pix.key == key)
    }
}

/// Persistence contract for receivers.
///
/// Implementations own the timestamps and the soft-delete marker. `list`
/// must return records in a stable, deterministic order across repeated
/// calls with the same filter (insertion order / ascending creation time) —
/// the pagination engine depends on it and never sorts. Soft-deleted
/// records are excluded from `list` and `find_by_id`.
#[async_trait]
pub trait ReceiverRepository: Send + Sync {
    /// Persist a new receiver and return the stored version.
    async fn create(&self, receiver: Receiver) -> Result<Receiver, ReceiverError>;

    /// List receivers matching the filter, in stable order.
    async fn list(&self, filter: &ReceiverFilter) -> Result<Vec<Receiver>, ReceiverError>;

    /// Fetch one receiver by id. Missing or soft-deleted ids are NotFound.
    async fn find_by_id(&self, id: &Uuid) -> Result<Receiver, ReceiverError>;

    /// Apply a field patch to one receiver. Zero matched records is
    /// NotFound.
    async fn update(&self, id: &Uuid, fields: &[UpdateField]) -> Result<(), ReceiverError>;

    /// Soft-delete the given receivers. Zero matched records is NotFound.
    async fn delete(&self, ids: &[Uuid]) -> Result<(), ReceiverError>;
}
