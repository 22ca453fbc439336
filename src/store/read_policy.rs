use std::fmt;

#[cfg(test)]
use mockall::automock;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

/// Picks which replica serves a read.
#[cfg_attr(test, automock)]
pub trait ReplicaSelector: Send + Sync + 'static {
    /// Returns an index in `0..replica_count`. `replica_count` is at least 1.
    fn select(
        &self,
        replica_count: usize,
    ) -> usize;
}

/// Uniform random choice over the replicas.
pub struct RandomSelector {
    rng: Mutex<StdRng>,
}

impl RandomSelector {
    /// A fixed `seed` makes the sequence of picks reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng: Mutex::new(rng) }
    }
}

impl fmt::Debug for RandomSelector {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("RandomSelector").finish_non_exhaustive()
    }
}

impl ReplicaSelector for RandomSelector {
    fn select(
        &self,
        replica_count: usize,
    ) -> usize {
        if replica_count <= 1 {
            return 0;
        }
        self.rng.lock().gen_range(0..replica_count)
    }
}
