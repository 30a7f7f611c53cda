//! Pix key types and the wire-token registry
//!
//! A Pix key routes an instant payment to a receiver. The key's required
//! format depends on its type, so the type travels with the key everywhere
//! (see [`Pix`]). Wire tokens follow the Brazilian payment vocabulary
//! (`TELEFONE`, `CHAVE_ALEATORIA`).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::ValidationError;

/// The five recognized Pix key types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixKeyType {
    #[serde(rename = "CPF")]
    Cpf,
    #[serde(rename = "CNPJ")]
    Cnpj,
    #[serde(rename = "EMAIL")]
    Email,
    #[serde(rename = "TELEFONE")]
    Phone,
    #[serde(rename = "CHAVE_ALEATORIA")]
    RandomKey,
}

/// Every key type with its wire token, in registry order.
pub const PIX_KEY_TYPES: [(PixKeyType, &str); 5] = [
    (PixKeyType::Cpf, "CPF"),
    (PixKeyType::Cnpj, "CNPJ"),
    (PixKeyType::Email, "EMAIL"),
    (PixKeyType::Phone, "TELEFONE"),
    (PixKeyType::RandomKey, "CHAVE_ALEATORIA"),
];

impl PixKeyType {
    /// The canonical wire token for this key type.
    pub fn as_str(&self) -> &'static str {
        match self {
            PixKeyType::Cpf => "CPF",
            PixKeyType::Cnpj => "CNPJ",
            PixKeyType::Email => "EMAIL",
            PixKeyType::Phone => "TELEFONE",
            PixKeyType::RandomKey => "CHAVE_ALEATORIA",
        }
    }

    /// Look up a wire token in the registry. Case-sensitive exact match;
    /// anything else is a "type not found" error.
    pub fn parse(token: &str) -> Result<Self, ValidationError> {
        PIX_KEY_TYPES
            .iter()
            .find(|(_, wire)| *wire == token)
            .map(|(key_type, _)| *key_type)
            .ok_or_else(|| ValidationError::KeyTypeNotFound {
                value: token.to_string(),
            })
    }
}

impl fmt::Display for PixKeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Pix key together with its declared type.
///
/// Invariant: `key` validates against the format rule for `key_type`.
/// Enforced on create and on any update touching either field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pix {
    pub key_type: PixKeyType,
    pub key: String,
}

impl Pix {
    pub fn new(key_type: PixKeyType, key: impl Into<String>) -> Self {
        Self {
            key_type,
            key: key.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tokens() {
        assert_eq!(PixKeyType::parse("CPF").unwrap(), PixKeyType::Cpf);
        assert_eq!(PixKeyType::parse("CNPJ").unwrap(), PixKeyType::Cnpj);
        assert_eq!(PixKeyType::parse("EMAIL").unwrap(), PixKeyType::Email);
        assert_eq!(PixKeyType::parse("TELEFONE").unwrap(), PixKeyType::Phone);
        assert_eq!(
            PixKeyType::parse("CHAVE_ALEATORIA").unwrap(),
            PixKeyType::RandomKey
        );
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let err = PixKeyType::parse("cpf").unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert!(PixKeyType::parse("Telefone").is_err());
    }

    #[test]
    fn test_parse_unknown_token() {
        assert!(PixKeyType::parse("PHONE").is_err());
        assert!(PixKeyType::parse("").is_err());
    }

    #[test]
    fn test_round_trip_through_wire_token() {
        for (key_type, wire) in PIX_KEY_TYPES {
            assert_eq!(key_type.as_str(), wire);
            assert_eq!(PixKeyType::parse(wire).unwrap(), key_type);
        }
    }

    #[test]
    fn test_serde_uses_wire_tokens() {
        let json = serde_json::to_string(&PixKeyType::RandomKey).unwrap();
        assert_eq!(json, "\"CHAVE_ALEATORIA\"");
        let back: PixKeyType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PixKeyType::RandomKey);
    }
}
