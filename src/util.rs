use rand::Rng;
use regex::Regex;
use subtle::ConstantTimeEq;

use crate::{Error, Success};

/// Case-fold an email address for comparison and storage keys
///
/// Ownership checks are case-insensitive and nothing more: `A@x.com`
/// claims `a@x.com`, but any other character difference is a mismatch.
pub fn normalise_email(original: &str) -> String {
    original.trim().to_lowercase()
}

/// Check that a string is at least shaped like an email address
pub fn assert_valid_email(email: &str) -> Success {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }

    if EMAIL_RE.is_match(email.trim()) {
        Ok(())
    } else {
        Err(Error::IncorrectData { with: "email" })
    }
}

/// Generate a fixed-length decimal access code
///
/// Each digit is drawn independently, so the result is uniform over the
/// full 10^length range, leading zeros included.
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| {
            let digit: u32 = rng.gen_range(0..10);
            char::from_digit(digit, 10).expect("digit in range")
        })
        .collect()
}

/// Group a code as `NNN NNN` for display
///
/// Purely cosmetic; `canonicalise_code` reverses it losslessly.
pub fn format_code(code: &str) -> String {
    code.as_bytes()
        .chunks(3)
        .map(|chunk| std::str::from_utf8(chunk).expect("ascii digits"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip display grouping from a submitted code
pub fn canonicalise_code(submitted: &str) -> String {
    submitted.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Compare two codes without leaking a timing side channel
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_generates_codes_of_the_requested_length() {
        for length in [4, 6, 8] {
            for _ in 0..100 {
                let code = generate_code(length);
                assert_eq!(code.len(), length);
                assert!(code.chars().all(|c| c.is_ascii_digit()));
            }
        }
    }

    #[test]
    fn it_round_trips_display_formatting() {
        assert_eq!(format_code("012345"), "012 345");
        assert_eq!(canonicalise_code("012 345"), "012345");

        for _ in 0..100 {
            let code = generate_code(6);
            assert_eq!(canonicalise_code(&format_code(&code)), code);
        }
    }

    #[test]
    fn it_case_folds_emails() {
        assert_eq!(normalise_email("Alice@X.COM"), "alice@x.com");
        assert_eq!(normalise_email("  a@x.com "), "a@x.com");
        assert_ne!(normalise_email("alice@x.com"), normalise_email("bob@x.com"));
    }

    #[test]
    fn it_rejects_malformed_emails() {
        assert_eq!(assert_valid_email("a@x.com"), Ok(()));
        assert_eq!(
            assert_valid_email("not an email"),
            Err(Error::IncorrectData { with: "email" })
        );
        assert_eq!(
            assert_valid_email("missing@tld"),
            Err(Error::IncorrectData { with: "email" })
        );
    }

    #[test]
    fn it_compares_codes_in_constant_time() {
        assert!(constant_time_eq("123456", "123456"));
        assert!(!constant_time_eq("123456", "123457"));
        assert!(!constant_time_eq("123456", "12345"));
    }
}
