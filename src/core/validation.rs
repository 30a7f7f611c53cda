//! Pure string predicates for receiver fields
//!
//! Each predicate is a total function of its input: no registry, no state,
//! no I/O. The create and update flows call these directly.
//!
//! The email pattern accepts uppercase addresses only and is matched
//! case-sensitively. Lowercase addresses are rejected.

use regex::Regex;
use std::sync::OnceLock;

use crate::core::pix::PixKeyType;

/// Tax identifier: 11-digit CPF shape or 14-digit CNPJ shape, punctuation
/// optional but positions fixed when present.
pub fn is_valid_identifier(identifier: &str) -> bool {
    static IDENTIFIER_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = IDENTIFIER_REGEX.get_or_init(|| {
        Regex::new(
            r"^(?:[0-9]{3}\.?[0-9]{3}\.?[0-9]{3}-?[0-9]{2}|[0-9]{2}\.?[0-9]{3}\.?[0-9]{3}/?[0-9]{4}-?[0-9]{2})$",
        )
        .unwrap()
    });
    regex.is_match(identifier)
}

pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| Regex::new(r"^[A-Z0-9+_.-]+@[A-Z0-9.-]+$").unwrap());
    regex.is_match(email)
}

/// Whether a wire token names a recognized Pix key type.
pub fn is_valid_pix_key_type(token: &str) -> bool {
    PixKeyType::parse(token).is_ok()
}

/// Validate a Pix key against the format rule for its key type.
pub fn is_valid_pix_key(key: &str, key_type: PixKeyType) -> bool {
    match key_type {
        PixKeyType::Cpf => {
            static CPF_REGEX: OnceLock<Regex> = OnceLock::new();
            let regex = CPF_REGEX.get_or_init(|| {
                Regex::new(r"^[0-9]{3}\.?[0-9]{3}\.?[0-9]{3}-?[0-9]{2}$").unwrap()
            });
            regex.is_match(key)
        }
        PixKeyType::Cnpj => {
            static CNPJ_REGEX: OnceLock<Regex> = OnceLock::new();
            let regex = CNPJ_REGEX.get_or_init(|| {
                Regex::new(r"^[0-9]{2}\.?[0-9]{3}\.?[0-9]{3}/?[0-9]{4}-?[0-9]{2}$").unwrap()
            });
            regex.is_match(key)
        }
        PixKeyType::Email => is_valid_email(key),
        PixKeyType::Phone => {
            // Optional +55 country code, two-digit area code, mandatory
            // leading 9, eight digits.
            static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
            let regex =
                PHONE_REGEX.get_or_init(|| Regex::new(r"^(?:\+?55)?[1-9][0-9]9[0-9]{8}$").unwrap());
            regex.is_match(key)
        }
        PixKeyType::RandomKey => {
            static RANDOM_KEY_REGEX: OnceLock<Regex> = OnceLock::new();
            let regex = RANDOM_KEY_REGEX.get_or_init(|| {
                Regex::new(
                    r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$",
                )
                .unwrap()
            });
            regex.is_match(key)
        }
    }
}

/// Knobs for validations that differ between deployments.
#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// Maximum accepted email length; `None` disables the check.
    pub email_max_len: Option<usize>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            email_max_len: Some(250),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === identifier ===

    #[test]
    fn test_identifier_cpf_with_punctuation() {
        assert!(is_valid_identifier("111.111.111-11"));
    }

    #[test]
    fn test_identifier_cpf_bare_digits() {
        assert!(is_valid_identifier("11111111111"));
    }

    #[test]
    fn test_identifier_cnpj_with_punctuation() {
        assert!(is_valid_identifier("12.345.678/0001-99"));
    }

    #[test]
    fn test_identifier_cnpj_bare_digits() {
        assert!(is_valid_identifier("12345678000199"));
    }

    #[test]
    fn test_identifier_wrong_length_rejected() {
        assert!(!is_valid_identifier("111.111.111-1"));
        assert!(!is_valid_identifier("1111111111"));
        assert!(!is_valid_identifier(""));
    }

    #[test]
    fn test_identifier_misplaced_punctuation_rejected() {
        assert!(!is_valid_identifier("11.1111.111-11"));
        assert!(!is_valid_identifier("111.111.111/11"));
    }

    // === email ===

    #[test]
    fn test_email_uppercase_accepted() {
        assert!(is_valid_email("BILLING@ACME.COM"));
        assert!(is_valid_email("A+B_C.D-E@HOST"));
    }

    #[test]
    fn test_email_lowercase_rejected() {
        assert!(!is_valid_email("billing@acme.com"));
        assert!(!is_valid_email("Billing@ACME.COM"));
    }

    #[test]
    fn test_email_missing_at_rejected() {
        assert!(!is_valid_email("BILLINGACME.COM"));
        assert!(!is_valid_email(""));
    }

    // === pix key type ===

    #[test]
    fn test_pix_key_type_tokens() {
        assert!(is_valid_pix_key_type("CPF"));
        assert!(is_valid_pix_key_type("CHAVE_ALEATORIA"));
        assert!(!is_valid_pix_key_type("cpf"));
        assert!(!is_valid_pix_key_type("RANDOM"));
    }

    // === pix key per type ===

    #[test]
    fn test_pix_key_cpf() {
        assert!(is_valid_pix_key("111.111.111-11", PixKeyType::Cpf));
        assert!(is_valid_pix_key("11111111111", PixKeyType::Cpf));
        assert!(!is_valid_pix_key("111.111.111-1", PixKeyType::Cpf));
    }

    #[test]
    fn test_pix_key_cnpj() {
        assert!(is_valid_pix_key("12.345.678/0001-99", PixKeyType::Cnpj));
        assert!(!is_valid_pix_key("11111111111", PixKeyType::Cnpj));
    }

    #[test]
    fn test_pix_key_email_follows_email_rule() {
        assert!(is_valid_pix_key("PAY@ACME.COM", PixKeyType::Email));
        assert!(!is_valid_pix_key("pay@acme.com", PixKeyType::Email));
    }

    #[test]
    fn test_pix_key_phone() {
        assert!(is_valid_pix_key("11987654321", PixKeyType::Phone));
        assert!(is_valid_pix_key("5511987654321", PixKeyType::Phone));
        assert!(is_valid_pix_key("+5511987654321", PixKeyType::Phone));
        // area code cannot start with 0, the 9 prefix is mandatory
        assert!(!is_valid_pix_key("01987654321", PixKeyType::Phone));
        assert!(!is_valid_pix_key("11887654321", PixKeyType::Phone));
        assert!(!is_valid_pix_key("119876543210", PixKeyType::Phone));
    }

    #[test]
    fn test_pix_key_random_key_case_insensitive() {
        assert!(is_valid_pix_key(
            "123e4567-e89b-12d3-a456-426614174000",
            PixKeyType::RandomKey
        ));
        assert!(is_valid_pix_key(
            "123E4567-E89B-12D3-A456-426614174000",
            PixKeyType::RandomKey
        ));
        assert!(!is_valid_pix_key(
            "123e4567-e89b-12d3-a456-42661417400",
            PixKeyType::RandomKey
        ));
        assert!(!is_valid_pix_key("not-a-uuid", PixKeyType::RandomKey));
    }

    #[test]
    fn test_default_options_cap_email_length() {
        let options = ValidationOptions::default();
        assert_eq!(options.email_max_len, Some(250));
    }
}
