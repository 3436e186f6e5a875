//! Block encryption and the multi-pass chaining driver.

use crate::block::{xor_in_place, Block};
use crate::error::{CipherError, Result};
use crate::key::CipherKey;
use crate::round::{add_round_key, mix_columns, shift_rows, sub_bytes};
use crate::schedule::KeySchedule;

/// Run configuration: chaining pass count and rounds per pass.
///
/// Both values are fixed for the lifetime of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunParameters {
    /// Number of chaining passes over the block.
    pub iterations: u32,
    /// Rounds per encryption pass.
    pub rounds: u32,
}

impl RunParameters {
    /// Validates and builds run parameters; both counts must be at least 1.
    pub fn new(iterations: u32, rounds: u32) -> Result<Self> {
        if iterations < 1 {
            return Err(CipherError::InvalidParameter(
                "iterations must be at least 1",
            ));
        }
        if rounds < 1 {
            return Err(CipherError::InvalidParameter("rounds must be at least 1"));
        }
        Ok(Self { iterations, rounds })
    }
}

/// Encrypts a single block with a pre-expanded schedule.
///
/// Runs the initial key mixing, then one round per schedule round; the final
/// round skips MixColumns.
pub fn encrypt_block(block: &Block, schedule: &KeySchedule) -> Block {
    let rounds = schedule.rounds();
    let mut state = *block;

    add_round_key(&mut state, &schedule.round_key(0));

    for round in 1..rounds {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, &schedule.round_key(round));
    }

    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, &schedule.round_key(rounds));

    state
}

/// One encryption run: key, parameters, schedule, and the working state.
///
/// Owns everything the run touches; the schedule is expanded exactly once at
/// construction and read-only afterwards. Consuming [`run`](Self::run)
/// finishes the lifecycle, so a completed context cannot be re-entered.
#[derive(Clone, Debug)]
pub struct CipherContext {
    key: CipherKey,
    params: RunParameters,
    schedule: KeySchedule,
    plaintext: Block,
    state: Block,
}

impl CipherContext {
    /// Builds a context for one run, expanding the key schedule up front.
    pub fn new(key: CipherKey, plaintext: Block, params: RunParameters) -> Result<Self> {
        if params.iterations < 1 {
            return Err(CipherError::InvalidParameter(
                "iterations must be at least 1",
            ));
        }
        let schedule = KeySchedule::expand(&key, params.rounds)?;
        Ok(Self {
            key,
            params,
            schedule,
            plaintext,
            state: plaintext,
        })
    }

    /// The key this context was built with.
    pub fn key(&self) -> &CipherKey {
        &self.key
    }

    /// The run parameters this context was built with.
    pub fn params(&self) -> RunParameters {
        self.params
    }

    /// The schedule expanded at construction.
    pub fn schedule(&self) -> &KeySchedule {
        &self.schedule
    }

    /// Runs every chaining pass and returns the final ciphertext block.
    ///
    /// Each pass after the first folds the original plaintext back into the
    /// running state by XOR before re-running the round sequence. There is no
    /// initialization vector and the feedback never uses the previous
    /// ciphertext; see the crate docs for the caveat on this construction.
    pub fn run(mut self) -> Block {
        for pass in 1..=self.params.iterations {
            if pass > 1 {
                xor_in_place(&mut self.state, &self.plaintext);
            }
            self.state = encrypt_block(&self.state, &self.schedule);
        }
        self.state
    }
}

/// Expands the key and runs a full chained encryption in one call.
pub fn encrypt(key: &CipherKey, plaintext: &Block, params: RunParameters) -> Result<Block> {
    CipherContext::new(*key, *plaintext, params).map(CipherContext::run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    const NIST_KEY: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];
    const NIST_PLAIN: [u8; 16] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];
    const NIST_CIPHER: [u8; 16] = [
        0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4, 0xc5,
        0x5a,
    ];

    #[test]
    fn encrypt_block_matches_nist_vector() {
        let key = CipherKey::from(NIST_KEY);
        let schedule = KeySchedule::expand(&key, 10).unwrap();
        let ct = encrypt_block(&NIST_PLAIN, &schedule);
        assert_eq!(ct, NIST_CIPHER);
    }

    #[test]
    fn full_run_matches_nist_vector_for_one_iteration() {
        let key = CipherKey::from(NIST_KEY);
        let params = RunParameters::new(1, 10).unwrap();
        let ct = encrypt(&key, &NIST_PLAIN, params).unwrap();
        assert_eq!(ct, NIST_CIPHER);
    }

    #[test]
    fn single_round_skips_mix_columns() {
        let key = CipherKey::from(NIST_KEY);
        let schedule = KeySchedule::expand(&key, 1).unwrap();
        let ct = encrypt_block(&NIST_PLAIN, &schedule);

        // Hand-assembled single round: key mixing, SubBytes, ShiftRows, and
        // the final key mixing, with no column mixing anywhere.
        let mut expected = NIST_PLAIN;
        add_round_key(&mut expected, &schedule.round_key(0));
        sub_bytes(&mut expected);
        shift_rows(&mut expected);
        add_round_key(&mut expected, &schedule.round_key(1));
        assert_eq!(ct, expected);
    }

    #[test]
    fn one_iteration_never_applies_plaintext_feedback() {
        let key = CipherKey::from(NIST_KEY);
        let schedule = KeySchedule::expand(&key, 10).unwrap();
        let params = RunParameters::new(1, 10).unwrap();
        let chained = encrypt(&key, &NIST_PLAIN, params).unwrap();
        assert_eq!(chained, encrypt_block(&NIST_PLAIN, &schedule));
    }

    #[test]
    fn chained_run_composes_feedback_then_encrypt() {
        let key = CipherKey::from(NIST_KEY);
        let schedule = KeySchedule::expand(&key, 10).unwrap();
        let params = RunParameters::new(3, 10).unwrap();
        let chained = encrypt(&key, &NIST_PLAIN, params).unwrap();

        let mut expected = encrypt_block(&NIST_PLAIN, &schedule);
        for _ in 1..3 {
            xor_in_place(&mut expected, &NIST_PLAIN);
            expected = encrypt_block(&expected, &schedule);
        }
        assert_eq!(chained, expected);
    }

    #[test]
    fn independent_contexts_produce_identical_output() {
        let key = CipherKey::from(NIST_KEY);
        let params = RunParameters::new(4, 10).unwrap();
        let first = CipherContext::new(key, NIST_PLAIN, params).unwrap().run();
        let second = CipherContext::new(key, NIST_PLAIN, params).unwrap().run();
        assert_eq!(first, second);
    }

    #[test]
    fn random_inputs_are_deterministic_per_key() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        for _ in 0..50 {
            let mut key_bytes = [0u8; 16];
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut key_bytes);
            rng.fill_bytes(&mut block);
            let key = CipherKey::from(key_bytes);
            let params = RunParameters::new(2, 12).unwrap();
            let a = encrypt(&key, &block, params).unwrap();
            let b = encrypt(&key, &block, params).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn zero_iterations_is_rejected() {
        assert_eq!(
            RunParameters::new(0, 10),
            Err(CipherError::InvalidParameter(
                "iterations must be at least 1"
            ))
        );
        let key = CipherKey::from(NIST_KEY);
        let params = RunParameters {
            iterations: 0,
            rounds: 10,
        };
        assert!(CipherContext::new(key, NIST_PLAIN, params).is_err());
    }
}
