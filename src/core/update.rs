//! Status-gated update policy
//!
//! Given a receiver's current status and the caller's requested field
//! changes, this module decides which changes are permitted, validates the
//! Pix-related constraints, and produces the minimal typed patch to persist.
//!
//! The Pix consistency check runs BEFORE the status gate: a malformed Pix
//! key fails the request even when the status gate would have dropped the
//! Pix fields anyway. The update path never changes the status itself.
//!
//! | Status    | identifier | name | email | pix.key_type | pix.key |
//! |-----------|------------|------|-------|--------------|---------|
//! | Draft     | yes        | yes  | yes   | yes          | yes     |
//! | Validated | no         | no   | yes   | no           | no      |

use uuid::Uuid;

use crate::core::error::{PolicyError, ReceiverError, ValidationError};
use crate::core::pix::PixKeyType;
use crate::core::receiver::{Receiver, Status};
use crate::core::validation::is_valid_pix_key;

/// Decoded update request. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateReceiverInput {
    pub id: Uuid,
    pub identifier: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub pix_key_type: Option<String>,
    pub pix_key: Option<String>,
}

impl UpdateReceiverInput {
    /// Treat empty strings as absent fields.
    pub fn normalized(self) -> Self {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        Self {
            id: self.id,
            identifier: non_empty(self.identifier),
            name: non_empty(self.name),
            email: non_empty(self.email),
            pix_key_type: non_empty(self.pix_key_type),
            pix_key: non_empty(self.pix_key),
        }
    }
}

/// One permitted field change, typed at construction.
///
/// `field_name` yields the storage patch key for each variant.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateField {
    Identifier(String),
    Name(String),
    Email(String),
    PixKey(String),
    PixKeyType(PixKeyType),
}

impl UpdateField {
    /// The patch key this field is persisted under.
    pub fn field_name(&self) -> &'static str {
        match self {
            UpdateField::Identifier(_) => "identifier",
            UpdateField::Name(_) => "name",
            UpdateField::Email(_) => "email",
            UpdateField::PixKey(_) => "key",
            UpdateField::PixKeyType(_) => "key_type",
        }
    }

    /// The new value as a string (wire token for key types).
    pub fn value(&self) -> &str {
        match self {
            UpdateField::Identifier(v) => v,
            UpdateField::Name(v) => v,
            UpdateField::Email(v) => v,
            UpdateField::PixKey(v) => v,
            UpdateField::PixKeyType(t) => t.as_str(),
        }
    }
}

/// Pix consistency check, evaluated before the status gate.
///
/// - key type and key together: the type must be registered and the key must
///   match that type's format rule
/// - key alone: validated against the record's existing key type
/// - key type alone: always rejected, a type change requires a new key
/// - neither: nothing to check
pub fn validate_pix(input: &UpdateReceiverInput, current: &Receiver) -> Result<(), ReceiverError> {
    match (input.pix_key_type.as_deref(), input.pix_key.as_deref()) {
        (Some(token), Some(key)) => {
            let key_type = PixKeyType::parse(token)?;
            if !is_valid_pix_key(key, key_type) {
                return Err(ValidationError::InvalidPixKey { key_type }.into());
            }
            Ok(())
        }
        (None, Some(key)) => {
            let key_type = current.pix.key_type;
            if !is_valid_pix_key(key, key_type) {
                return Err(ValidationError::InvalidPixKey { key_type }.into());
            }
            Ok(())
        }
        (Some(_), None) => Err(PolicyError::KeyTypeWithoutKey.into()),
        (None, None) => Ok(()),
    }
}

/// Apply the permitted-field table for the record's current status.
///
/// Disallowed fields are dropped silently; requesting one is not an error on
/// its own. An empty result means the caller has nothing left to update.
pub fn fields_for_status(status: Status, input: &UpdateReceiverInput) -> Vec<UpdateField> {
    let mut fields = Vec::new();

    match status {
        Status::Validated => {
            if let Some(email) = &input.email {
                fields.push(UpdateField::Email(email.clone()));
            }
        }
        Status::Draft => {
            if let Some(identifier) = &input.identifier {
                fields.push(UpdateField::Identifier(identifier.clone()));
            }
            if let Some(name) = &input.name {
                fields.push(UpdateField::Name(name.clone()));
            }
            if let Some(email) = &input.email {
                fields.push(UpdateField::Email(email.clone()));
            }
            if let Some(key) = &input.pix_key {
                fields.push(UpdateField::PixKey(key.clone()));
            }
            if let Some(token) = &input.pix_key_type
                && let Ok(key_type) = PixKeyType::parse(token)
            {
                fields.push(UpdateField::PixKeyType(key_type));
            }
        }
    }

    fields
}
