//! The receiver entity and its lifecycle status

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::core::pix::Pix;

/// Lifecycle status of a receiver.
///
/// The status gates which fields remain editable (see the update policy in
/// [`crate::core::update`]): a `Draft` receiver is fully editable, a
/// `Validated` one only accepts email changes. The update path never changes
/// the status itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "DRAFT")]
    Draft,
    #[serde(rename = "VALIDATED")]
    Validated,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "DRAFT",
            Status::Validated => "VALIDATED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payee record with a Pix key.
///
/// The id is assigned at creation and immutable. Persistence metadata
/// (timestamps, the soft-delete marker) lives on the storage models, not
/// here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receiver {
    pub id: Uuid,
    pub identifier: String,
    pub name: String,
    pub email: String,
    pub pix: Pix,
    pub bank: Option<String>,
    pub agency: Option<String>,
    pub account: Option<String>,
    pub status: Status,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pix::PixKeyType;

    fn sample() -> Receiver {
        Receiver {
            id: Uuid::new_v4(),
            identifier: "111.111.111-11".to_string(),
            name: "ACME Ltda".to_string(),
            email: "BILLING@ACME.COM".to_string(),
            pix: Pix::new(PixKeyType::Cpf, "111.111.111-11"),
            bank: None,
            agency: None,
            account: None,
            status: Status::Draft,
        }
    }

    #[test]
    fn test_status_wire_tokens() {
        assert_eq!(Status::Draft.as_str(), "DRAFT");
        assert_eq!(Status::Validated.as_str(), "VALIDATED");
    }

    #[test]
    fn test_serde_round_trip() {
        let receiver = sample();
        let json = serde_json::to_string(&receiver).unwrap();
        assert!(json.contains("\"DRAFT\""));
        assert!(json.contains("\"CPF\""));
        let back: Receiver = serde_json::from_str(&json).unwrap();
        assert_eq!(back, receiver);
    }

    #[test]
    fn test_optional_bank_fields_are_independent() {
        let mut receiver = sample();
        receiver.bank = Some("001".to_string());
        let json = serde_json::to_value(&receiver).unwrap();
        assert_eq!(json["bank"], "001");
        assert!(json["agency"].is_null());
        assert!(json["account"].is_null());
    }
}
