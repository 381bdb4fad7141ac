//! Note identifier generation
//!
//! Ids are 16 characters drawn from the URL-safe alphabet, so they can be
//! used in paths and shell arguments without quoting.

use rand::Rng;

/// Length of every generated note id
pub const NOTE_ID_LEN: usize = 16;

const ALPHABET: &[u8; 64] = b"useandom-26T198340PX75pxJACKVERYMINDBUSHWOLF_GQZbfghjklqvwyzrict";

/// Source of fresh note ids
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random fixed-length id generator backed by the thread-local RNG
#[derive(Debug, Clone, Copy)]
pub struct NanoIdGenerator {
    len: usize,
}

impl NanoIdGenerator {
    pub fn new() -> Self {
        Self { len: NOTE_ID_LEN }
    }

    pub fn with_len(len: usize) -> Self {
        Self { len }
    }
}

impl Default for NanoIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for NanoIdGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.len)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }
}
