//! CLI commands for the textprep pipeline.

pub mod embed;
pub mod encode;
pub mod prepare_ids;
pub mod run;
pub mod split;
pub mod vocab;

pub use embed::EmbedCommand;
pub use encode::EncodeCommand;
pub use prepare_ids::PrepareIdsCommand;
pub use run::RunCommand;
pub use split::SplitCommand;
pub use vocab::VocabCommand;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seeded generator when a seed is given, entropy-seeded otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
