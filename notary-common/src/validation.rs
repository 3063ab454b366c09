//! Address and content-hash format checks
//!
//! Both checks trim surrounding whitespace, then require a `0x` prefix
//! followed by an exact number of hex digits (either case). Nothing beyond
//! the format is checked: no EIP-55 checksum, no zero-address rejection.

use std::fmt;

use crate::ValidationError;

/// Hex digits in a 20-byte account address
pub const ADDRESS_HEX_LEN: usize = 40;

/// Hex digits in a 32-byte content hash
pub const HASH_HEX_LEN: usize = 64;

fn is_prefixed_hex(s: &str, digits: usize) -> bool {
    match s.trim().strip_prefix("0x") {
        Some(rest) => rest.len() == digits && rest.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// True iff `s` (trimmed) is `0x` followed by exactly 40 hex digits
pub fn is_valid_address(s: &str) -> bool {
    is_prefixed_hex(s, ADDRESS_HEX_LEN)
}

/// True iff `s` (trimmed) is `0x` followed by exactly 64 hex digits
pub fn is_valid_hash(s: &str) -> bool {
    is_prefixed_hex(s, HASH_HEX_LEN)
}

/// Account address that passed [`is_valid_address`]
///
/// Keeps the trimmed input as typed; case is not normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address(String);

impl Address {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if is_valid_address(raw) {
            Ok(Self(raw.trim().to_string()))
        } else {
            Err(ValidationError::InvalidAddress)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content hash that passed [`is_valid_hash`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentHash(String);

impl ContentHash {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if is_valid_hash(raw) {
            Ok(Self(raw.trim().to_string()))
        } else {
            Err(ValidationError::InvalidHash)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ADDR: &str = "0x52908400098527886E0F7030069857D2E4169EE7";
    const HASH: &str = "0x9c22ff5f21f0b81b113e63f7db6da94fedef11b2119b4088b89664fb9a3cb658";

    #[test]
    fn test_valid_address_mixed_case() {
        assert!(is_valid_address(ADDR));
        assert!(is_valid_address(&ADDR.to_lowercase()));
    }

    #[test]
    fn test_address_rejects_uppercase_prefix() {
        assert!(!is_valid_address(&ADDR.replacen("0x", "0X", 1)));
    }

    #[test]
    fn test_address_trims_whitespace() {
        assert!(is_valid_address(&format!("  {}\n", ADDR)));
        let parsed = Address::parse(&format!("\t{} ", ADDR)).unwrap();
        assert_eq!(parsed.as_str(), ADDR);
    }

    #[test]
    fn test_address_wrong_lengths() {
        assert!(!is_valid_address("0x"));
        assert!(!is_valid_address(&ADDR[..41]));
        assert!(!is_valid_address(&format!("{}0", ADDR)));
        assert!(!is_valid_address("not-an-address"));
    }

    #[test]
    fn test_hash_is_not_an_address() {
        assert!(is_valid_hash(HASH));
        assert!(!is_valid_address(HASH));
        assert!(!is_valid_hash(ADDR));
    }

    #[test]
    fn test_parse_errors_map_to_validation_messages() {
        assert_eq!(Address::parse("0x12"), Err(ValidationError::InvalidAddress));
        assert_eq!(ContentHash::parse(""), Err(ValidationError::InvalidHash));
        assert_eq!(
            ValidationError::InvalidHash.to_string(),
            "Enter a valid 32-byte (0x…) hash."
        );
    }

    // Reference oracle written against the character classes directly
    fn oracle(s: &str, digits: usize) -> bool {
        let t = s.trim();
        t.len() == digits + 2
            && t.starts_with("0x")
            && t.chars().skip(2).all(|c| matches!(c, '0'..='9' | 'a'..='f' | 'A'..='F'))
    }

    proptest! {
        #[test]
        fn prop_address_matches_oracle(s in "\\s{0,2}(0x)?[0-9a-fA-FxgG-]{0,44}\\s{0,2}") {
            prop_assert_eq!(is_valid_address(&s), oracle(&s, ADDRESS_HEX_LEN));
        }

        #[test]
        fn prop_hash_matches_oracle(s in "\\s{0,2}(0x)?[0-9a-fA-FzZ ]{60,68}\\s{0,2}") {
            prop_assert_eq!(is_valid_hash(&s), oracle(&s, HASH_HEX_LEN));
        }

        #[test]
        fn prop_generated_addresses_accepted(body in "[0-9a-fA-F]{40}", pad in "[ \t]{0,3}") {
            let addr = format!("{pad}0x{body}{pad}");
            prop_assert!(is_valid_address(&addr));
            prop_assert!(!is_valid_hash(&addr));
        }

        #[test]
        fn prop_generated_hashes_accepted(body in "[0-9a-fA-F]{64}") {
            let hash = format!("0x{body}");
            prop_assert!(is_valid_hash(&hash));
            let parsed = ContentHash::parse(&hash).unwrap();
            prop_assert_eq!(parsed.as_str(), hash.as_str());
        }

        #[test]
        fn prop_arbitrary_strings_never_panic(s in ".*") {
            let _ = is_valid_address(&s);
            let _ = is_valid_hash(&s);
        }
    }
}
