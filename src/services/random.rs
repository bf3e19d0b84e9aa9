use std::collections::VecDeque;
use std::sync::Mutex;

use rand::Rng;

/// Upper bound (exclusive) for anonymized contributor numbers.
pub const ANON_ID_BOUND: u32 = 10_000;

pub trait RandomSource: Send + Sync {
    /// A value in `0..bound`. A zero bound yields zero.
    fn next_below(&self, bound: u32) -> u32;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_below(&self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..bound)
    }
}

/// Replays a fixed list of values (reduced modulo the bound), then zeros.
#[derive(Debug, Default)]
pub struct SequenceRandom {
    values: Mutex<VecDeque<u32>>,
}

impl SequenceRandom {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: Mutex::new(values.into_iter().collect()),
        }
    }
}

impl RandomSource for SequenceRandom {
    fn next_below(&self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        let next = match self.values.lock() {
            Ok(mut guard) => guard.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        };
        next.unwrap_or(0) % bound
    }
}

/// Fresh per submission, so it is not stable per user.
pub fn anonymized_user_id(random: &dyn RandomSource) -> String {
    format!("anon_{}", random.next_below(ANON_ID_BOUND))
}
