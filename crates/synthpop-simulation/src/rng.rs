//! Per-synth random streams.
//!
//! Each synth gets an independent ChaCha8 stream keyed by `blake3(domain ‖
//! seed_le ‖ synth_id)`. The stream depends only on the run seed and the synth
//! id, never on thread scheduling or on the synth's position in the population.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const STREAM_DOMAIN: &[u8] = b"synthpop.synth-stream.v1";

pub fn synth_stream(seed: u64, synth_id: &str) -> ChaCha8Rng {
    let mut hasher = blake3::Hasher::new();
    hasher.update(STREAM_DOMAIN);
    hasher.update(&seed.to_le_bytes());
    hasher.update(synth_id.as_bytes());
    ChaCha8Rng::from_seed(*hasher.finalize().as_bytes())
}
