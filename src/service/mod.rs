//! Receiver use cases over an injected repository
//!
//! `ReceiverService` owns field validation and the status-gated update
//! policy; persistence is delegated to whatever `ReceiverRepository`
//! implementation is injected. Every operation is a single read or a single
//! read-then-write — there is no optimistic concurrency token, so a
//! concurrent update between the fetch and the patch can lose a write.

use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{PolicyError, ReceiverError, ValidationError};
use crate::core::pix::{Pix, PixKeyType};
use crate::core::receiver::{Receiver, Status};
use crate::core::update::{self, UpdateReceiverInput};
use crate::core::validation::{
    ValidationOptions, is_valid_email, is_valid_identifier, is_valid_pix_key,
};
use crate::storage::{ReceiverFilter, ReceiverRepository};

/// Decoded create request.
#[derive(Debug, Clone)]
pub struct CreateReceiverInput {
    pub identifier: String,
    pub name: String,
    pub email: String,
    pub pix_key_type: String,
    pub pix_key: String,
    pub bank: Option<String>,
    pub agency: Option<String>,
    pub account: Option<String>,
}

/// Use cases for receiver management.
pub struct ReceiverService {
    repository: Arc<dyn ReceiverRepository>,
    validation: ValidationOptions,
}

impl ReceiverService {
    pub fn new(repository: Arc<dyn ReceiverRepository>) -> Self {
        Self {
            repository,
            validation: ValidationOptions::default(),
        }
    }

    pub fn with_validation(
        repository: Arc<dyn ReceiverRepository>,
        validation: ValidationOptions,
    ) -> Self {
        Self {
            repository,
            validation,
        }
    }

    /// Create a new receiver. Status always initializes to `Draft`.
    pub async fn create(&self, input: CreateReceiverInput) -> Result<Receiver, ReceiverError> {
        if input.name.is_empty() {
            return Err(ValidationError::MissingField { field: "name" }.into());
        }
        if !is_valid_identifier(&input.identifier) {
            return Err(ValidationError::InvalidIdentifier {
                value: input.identifier,
            }
            .into());
        }
        self.check_email(&input.email)?;

        let key_type = PixKeyType::parse(&input.pix_key_type)?;
        if !is_valid_pix_key(&input.pix_key, key_type) {
            return Err(ValidationError::InvalidPixKey { key_type }.into());
        }

        let receiver = Receiver {
            id: Uuid::new_v4(),
            identifier: input.identifier,
            name: input.name,
            email: input.email,
            pix: Pix::new(key_type, input.pix_key),
            bank: input.bank,
            agency: input.agency,
            account: input.account,
            status: Status::Draft,
        };

        let created = self.repository.create(receiver).await?;
        tracing::info!(receiver_id = %created.id, "Created receiver");

        Ok(created)
    }

    /// List receivers matching the filter, in repository order.
    pub async fn list(&self, filter: &ReceiverFilter) -> Result<Vec<Receiver>, ReceiverError> {
        self.repository.list(filter).await
    }

    /// Fetch one receiver by id.
    pub async fn find_by_id(&self, id: &Uuid) -> Result<Receiver, ReceiverError> {
        self.repository.find_by_id(id).await
    }

    /// Update a receiver under the status-gated field policy.
    ///
    /// Pix content is validated before the gate is applied, so a malformed
    /// Pix key fails the request even when the gate would have dropped the
    /// Pix fields anyway.
    pub async fn update(&self, input: UpdateReceiverInput) -> Result<(), ReceiverError> {
        let input = input.normalized();

        if let Some(identifier) = &input.identifier
            && !is_valid_identifier(identifier)
        {
            return Err(ValidationError::InvalidIdentifier {
                value: identifier.clone(),
            }
            .into());
        }
        if let Some(email) = &input.email {
            self.check_email(email)?;
        }

        let current = self.repository.find_by_id(&input.id).await?;

        update::validate_pix(&input, &current)?;

        let fields = update::fields_for_status(current.status, &input);
        if fields.is_empty() {
            return Err(PolicyError::NoFieldsToUpdate.into());
        }

        self.repository.update(&input.id, &fields).await?;
        tracing::info!(
            receiver_id = %input.id,
            fields = fields.len(),
            "Updated receiver"
        );

        Ok(())
    }

    /// Soft-delete one or more receivers.
    pub async fn delete(&self, ids: &[Uuid]) -> Result<(), ReceiverError> {
        if ids.is_empty() {
            return Err(PolicyError::EmptyIdList.into());
        }

        self.repository.delete(ids).await?;
        tracing::info!(count = ids.len(), "Deleted receivers");

        Ok(())
    }

    fn check_email(&self, email: &str) -> Result<(), ReceiverError> {
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail {
                value: email.to_string(),
            }
            .into());
        }
        if let Some(max) = self.validation.email_max_len
            && email.len() > max
        {
            return Err(ValidationError::EmailTooLong {
                length: email.len(),
                max,
            }
            .into());
        }
        Ok(())
    }
}
