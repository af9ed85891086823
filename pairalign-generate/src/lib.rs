//! Seeded generation of related sequence pairs for tests and benches.
//!
//! A pair is a uniform random sequence plus a mutated copy; the error
//! model controls the mix of substitutions, insertions and deletions, so
//! tests can bias towards the indel-heavy cases that stress gap handling.

use pairalign_types::Sequence;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

const ALPHABET: &[u8] = b"ACGT";

/// How mutations are distributed when deriving the second sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorModel {
    /// Substitutions, insertions and deletions in equal parts.
    Uniform,
    /// Insertions only; the second sequence grows.
    NoisyInsert,
    /// Deletions only; the second sequence shrinks.
    NoisyDelete,
}

/// A uniform random sequence of length `n`.
pub fn random_sequence(n: usize, rng: &mut impl Rng) -> Sequence {
    (0..n).map(|_| ALPHABET[rng.gen_range(0..4)]).collect()
}

/// Apply roughly `e * n` mutations from the given model.
pub fn mutate(seq: &[u8], e: f32, model: ErrorModel, rng: &mut impl Rng) -> Sequence {
    let mut out = seq.to_vec();
    let mutations = (e * seq.len() as f32).ceil() as usize;
    for _ in 0..mutations {
        if out.is_empty() {
            out.push(ALPHABET[rng.gen_range(0..4)]);
            continue;
        }
        let pos = rng.gen_range(0..out.len());
        let kind = match model {
            ErrorModel::Uniform => rng.gen_range(0..3),
            ErrorModel::NoisyInsert => 1,
            ErrorModel::NoisyDelete => 2,
        };
        match kind {
            0 => out[pos] = ALPHABET[rng.gen_range(0..4)],
            1 => out.insert(pos, ALPHABET[rng.gen_range(0..4)]),
            _ => {
                out.remove(pos);
            }
        }
    }
    out
}

/// Generate a seeded `(a, b)` pair: `a` uniform of length `n`, `b` a copy
/// of `a` with error rate `e` under `model`.
pub fn generate_model(n: usize, e: f32, model: ErrorModel, seed: u64) -> (Sequence, Sequence) {
    let rng = &mut ChaCha8Rng::seed_from_u64(seed);
    let a = random_sequence(n, rng);
    let b = mutate(&a, e, model, rng);
    (a, b)
}

/// Uniform-model convenience wrapper.
pub fn generate_pair(n: usize, e: f32, seed: u64) -> (Sequence, Sequence) {
    generate_model(n, e, ErrorModel::Uniform, seed)
}
