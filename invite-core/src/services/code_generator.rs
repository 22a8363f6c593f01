use std::collections::HashSet;
use rand::Rng;

use crate::Error;

pub const DEFAULT_CODE_LENGTH: usize = 8;
pub const MIN_CODE_LENGTH: usize = 4;
pub const MAX_CODE_LENGTH: usize = 64;

/// Redraw budget per requested code before a batch is abandoned.
const MAX_DRAWS_PER_CODE: usize = 64;

/// Uppercase alphanumerics minus the look-alikes 0/O and 1/I.
const ALPHABET: &[u8] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZ";

/// Produces random invite code strings. Collisions with stored codes are
/// detected by the pool on insert, not here.
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    length: usize,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self { length: DEFAULT_CODE_LENGTH }
    }
}

impl CodeGenerator {
    pub fn new(length: usize) -> Result<Self, Error> {
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&length) {
            return Err(Error::Config(format!(
                "code length must be between {MIN_CODE_LENGTH} and {MAX_CODE_LENGTH}, got {length}"
            )));
        }
        Ok(Self { length })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of distinct codes this length can express, saturating at `usize::MAX`.
    pub fn capacity(&self) -> usize {
        u32::try_from(self.length)
            .ok()
            .and_then(|len| ALPHABET.len().checked_pow(len))
            .unwrap_or(usize::MAX)
    }

    /// Returns `count` distinct codes.
    pub fn generate(&self, count: usize) -> Result<Vec<String>, Error> {
        if count == 0 {
            return Err(Error::InvalidInput("code count must be positive".into()));
        }
        if count > self.capacity() {
            return Err(Error::InvalidInput(format!(
                "cannot draw {count} distinct codes of length {}",
                self.length
            )));
        }

        let mut rng = rand::rng();
        let mut seen = HashSet::with_capacity(count);
        let mut codes = Vec::with_capacity(count);
        let max_draws = count.saturating_mul(MAX_DRAWS_PER_CODE);
        let mut draws = 0usize;

        while codes.len() < count {
            if draws == max_draws {
                return Err(Error::InvalidInput(format!(
                    "gave up after {draws} draws for {count} distinct codes of length {}",
                    self.length
                )));
            }
            draws += 1;

            let code: String = (0..self.length)
                .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
                .collect();
            if seen.insert(code.clone()) {
                codes.push(code);
            }
        }

        Ok(codes)
    }
}
