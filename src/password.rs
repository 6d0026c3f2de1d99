//! Random password generation.
//!
//! Passwords are drawn uniformly from ASCII letters, digits and punctuation
//! using the thread-local, OS-seeded random generator.

use rand::Rng;

/// Shortest password that will be generated.
pub const MIN_LENGTH: usize = 4;

/// Length used when none is configured.
pub const DEFAULT_LENGTH: usize = 12;

/// Lengths below this get a "use a longer password" hint.
pub const RECOMMENDED_LENGTH: usize = 16;

/// Every character a password may contain: letters, digits, then punctuation.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz\
ABCDEFGHIJKLMNOPQRSTUVWXYZ\
0123456789\
!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Error returned for an unusable password length.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PasswordError {
    /// The requested length is below [`MIN_LENGTH`].
    #[error("Password length must be at least {min} (got {requested})")]
    TooShort { requested: usize, min: usize },
}

/// Generate a password of exactly `length` characters.
///
/// # Errors
///
/// Returns [`PasswordError::TooShort`] when `length` is below [`MIN_LENGTH`].
pub fn generate(length: usize) -> Result<String, PasswordError> {
    generate_with(length, &mut rand::thread_rng())
}

/// Generate a password using the given random source.
///
/// # Errors
///
/// Returns [`PasswordError::TooShort`] when `length` is below [`MIN_LENGTH`].
pub fn generate_with<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Result<String, PasswordError> {
    if length < MIN_LENGTH {
        return Err(PasswordError::TooShort {
            requested: length,
            min: MIN_LENGTH,
        });
    }

    Ok((0..length)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect())
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_alphabet_composition() {
        assert_eq!(ALPHABET.len(), 26 + 26 + 10 + 32);
        assert!(ALPHABET.iter().all(u8::is_ascii_graphic));

        let mut sorted = ALPHABET.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), ALPHABET.len());
    }

    #[test]
    fn test_length_three_is_rejected() {
        assert_eq!(
            generate(3),
            Err(PasswordError::TooShort {
                requested: 3,
                min: MIN_LENGTH
            })
        );
        assert!(generate(0).is_err());
    }

    #[test]
    fn test_length_four_is_accepted() {
        let password = generate(4).unwrap();

        assert_eq!(password.chars().count(), 4);
        assert!(password.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn test_long_password_uses_only_alphabet() {
        let password = generate(256).unwrap();

        assert_eq!(password.len(), 256);
        assert!(password.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = generate_with(24, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = generate_with(24, &mut StdRng::seed_from_u64(7)).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_draws_cover_all_classes() {
        let password = generate_with(2000, &mut StdRng::seed_from_u64(42)).unwrap();

        assert!(password.chars().any(|c| c.is_ascii_lowercase()));
        assert!(password.chars().any(|c| c.is_ascii_uppercase()));
        assert!(password.chars().any(|c| c.is_ascii_digit()));
        assert!(password.chars().any(|c| c.is_ascii_punctuation()));
    }
}
