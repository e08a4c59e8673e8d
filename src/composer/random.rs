//! Random draws used during composition
//!
//! Three draws per candidate, in order: suffix character, score jitter,
//! explanation template.

use rand::Rng;

/// Source of uniform indices
pub trait RandomSource {
    /// Uniform index in `0..len`; `len` is never 0
    fn pick(&mut self, len: usize) -> usize;

    /// Score jitter, uniform in [-5, 4]
    fn jitter(&mut self) -> i32 {
        self.pick(10) as i32 - 5
    }
}

/// Adapter over any `rand` generator
pub struct RngSource<R: Rng>(pub R);

impl RngSource<rand::rngs::ThreadRng> {
    pub fn thread() -> Self {
        RngSource(rand::thread_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Replays a fixed list of draws, cycling; each draw is reduced modulo `len`
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    draws: Vec<usize>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(draws: Vec<usize>) -> Self {
        Self { draws, cursor: 0 }
    }

    /// Every draw returns 0: first character, jitter -5, first template
    pub fn zeros() -> Self {
        Self::new(vec![0])
    }
}

impl RandomSource for ScriptedSource {
    fn pick(&mut self, len: usize) -> usize {
        if self.draws.is_empty() {
            return 0;
        }
        let draw = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        draw % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_jitter_range() {
        let mut source = RngSource(StdRng::seed_from_u64(7));
        for _ in 0..500 {
            let j = source.jitter();
            assert!((-5..=4).contains(&j));
        }
        assert_eq!(ScriptedSource::zeros().jitter(), -5);
        assert_eq!(ScriptedSource::new(vec![9]).jitter(), 4);
    }

    #[test]
    fn test_scripted_cycles_and_wraps() {
        let mut source = ScriptedSource::new(vec![1, 7]);
        assert_eq!(source.pick(5), 1);
        assert_eq!(source.pick(5), 2);
        assert_eq!(source.pick(5), 1);
    }
}
