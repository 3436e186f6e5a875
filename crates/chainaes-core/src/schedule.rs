//! Key schedule expansion.

use core::convert::TryInto;

use crate::block::Block;
use crate::error::{CipherError, Result};
use crate::key::CipherKey;
use crate::tables::{sbox, RCON};

/// Largest round count the fixed round-constant table supports.
pub const MAX_ROUNDS: u32 = RCON.len() as u32 - 1;

/// Expanded key schedule: `4 * (rounds + 1)` words of 32 bits.
///
/// Each word packs four state-column bytes big-endian, so the most significant
/// byte is row 0 of the column. The schedule is immutable once expanded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeySchedule {
    words: Vec<u32>,
    rounds: u32,
}

fn rot_word(word: u32) -> u32 {
    word.rotate_left(8)
}

fn sub_word(word: u32) -> u32 {
    let b0 = sbox((word >> 24) as u8) as u32;
    let b1 = sbox((word >> 16) as u8) as u32;
    let b2 = sbox((word >> 8) as u8) as u32;
    let b3 = sbox(word as u8) as u32;
    (b0 << 24) | (b1 << 16) | (b2 << 8) | b3
}

impl KeySchedule {
    /// Expands a 128-bit key for the requested round count.
    ///
    /// The first four words copy the key verbatim. Every later group of four
    /// starts from the previous word rotated left one byte and substituted
    /// through the S-box, XORed with the word four positions back and with
    /// the group's round constant in its leading byte; the remaining three
    /// words chain by XOR. Fails before any expansion work if `rounds` is
    /// zero or exceeds [`MAX_ROUNDS`].
    pub fn expand(key: &CipherKey, rounds: u32) -> Result<Self> {
        if rounds < 1 {
            return Err(CipherError::InvalidParameter("rounds must be at least 1"));
        }
        if rounds > MAX_ROUNDS {
            return Err(CipherError::RconExhausted {
                rounds,
                max: MAX_ROUNDS,
            });
        }

        let total = 4 * (rounds as usize + 1);
        let mut words = Vec::with_capacity(total);
        for chunk in key.0.chunks_exact(4) {
            let bytes: [u8; 4] = chunk.try_into().expect("chunk length is four");
            words.push(u32::from_be_bytes(bytes));
        }

        for i in (4..total).step_by(4) {
            let group = i / 4;
            let seed = sub_word(rot_word(words[i - 1])) ^ (u32::from(RCON[group]) << 24);
            words.push(words[i - 4] ^ seed);
            words.push(words[i - 3] ^ words[i]);
            words.push(words[i - 2] ^ words[i + 1]);
            words.push(words[i - 1] ^ words[i + 2]);
        }

        Ok(Self { words, rounds })
    }

    /// Round count this schedule was expanded for.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// The expanded words, in generation order.
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Byte view of the round key for `round` (0..=rounds).
    ///
    /// Unpacks words `[4 * round .. 4 * round + 4)` big-endian into the same
    /// column-major layout as [`Block`]; a fresh value, not a reinterpreted
    /// slice of the word buffer.
    pub fn round_key(&self, round: u32) -> Block {
        let base = 4 * round as usize;
        let mut key = [0u8; 16];
        for (word_idx, word) in self.words[base..base + 4].iter().enumerate() {
            key[word_idx * 4..word_idx * 4 + 4].copy_from_slice(&word.to_be_bytes());
        }
        key
    }
}
