pub mod password;
pub mod url_validator;

/// Alphabet used for generated short codes
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Codes that collide with fixed routes and must never be assigned
pub const RESERVED_CODES: &[&str] = &["links", "login", "logout", "signup", "create", "static"];

/// Upper bound on accepted short code length
pub const MAX_CODE_LENGTH: usize = 64;

pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    iter::repeat_with(|| CODE_ALPHABET[rand::random_range(0..CODE_ALPHABET.len())] as char)
        .take(length)
        .collect()
}

/// Generate a code that does not shadow a fixed route.
pub fn generate_short_code(length: usize) -> String {
    loop {
        let code = generate_random_code(length.max(1));
        if !is_reserved_short_code(&code) {
            return code;
        }
    }
}

pub fn is_reserved_short_code(code: &str) -> bool {
    RESERVED_CODES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(code))
}

/// A short code is 1 to 64 characters of `[A-Za-z0-9_-]`.
pub fn is_valid_short_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_CODE_LENGTH
        && code
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_random_code_length_and_alphabet() {
        for len in [1, 6, 12] {
            let code = generate_random_code(len);
            assert_eq!(code.len(), len);
            assert!(code.bytes().all(|b| b.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_generated_codes_are_valid() {
        for _ in 0..200 {
            let code = generate_short_code(6);
            assert!(is_valid_short_code(&code));
            assert!(!is_reserved_short_code(&code));
        }
    }

    #[test]
    fn test_zero_length_is_clamped() {
        assert_eq!(generate_short_code(0).len(), 1);
    }

    #[test]
    fn test_reserved_codes() {
        assert!(is_reserved_short_code("links"));
        assert!(is_reserved_short_code("Login"));
        assert!(!is_reserved_short_code("abc123"));
    }

    #[test]
    fn test_is_valid_short_code() {
        assert!(is_valid_short_code("aB3_-x"));
        assert!(!is_valid_short_code(""));
        assert!(!is_valid_short_code("has space"));
        assert!(!is_valid_short_code("dot.dot"));
        assert!(!is_valid_short_code(&"a".repeat(65)));
        assert!(is_valid_short_code(&"a".repeat(64)));
    }
}
