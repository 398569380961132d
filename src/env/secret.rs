// src/env/secret.rs

use std::fmt;

use rand::rngs::OsRng;
use rand::Rng;

/// Characters a generated secret may contain.
pub const SECRET_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*(-_=+)";

pub const PRIMARY_SECRET_LEN: usize = 64;
pub const AUXILIARY_SECRET_LEN: usize = 32;

/// A generated secret. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret(<{} chars>)", self.0.len())
    }
}

/// Draw `length` characters uniformly from [`SECRET_ALPHABET`] using the
/// operating system CSPRNG.
pub fn generate_secret(length: usize) -> Secret {
    let mut rng = OsRng;
    let value = (0..length)
        .map(|_| SECRET_ALPHABET[rng.gen_range(0..SECRET_ALPHABET.len())] as char)
        .collect();
    Secret(value)
}
