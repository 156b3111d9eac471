use std::io::{Error, ErrorKind};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::streams::Stream;
use crate::streams::generators::SeaFunction;

/// Upper bound on draws per record when balancing classes.
pub const MAX_BALANCE_DRAWS: usize = 1_000;

/// SEA concepts stream: three features drawn uniformly from `[0, 10)` and a
/// binary class that is `0` when `a1 + a2 <= threshold`. The third feature is
/// irrelevant noise.
///
/// Records are `[a1, a2, a3, class]`.
#[derive(Debug)]
pub struct SeaGenerator {
    seed: u64,
    rng: StdRng,
    threshold: f64,
    balance_classes: bool,
    next_class_should_be_zero: bool,
    noise_percentage: u32,
    max_instances: Option<usize>,
    produced: usize,
}

impl SeaGenerator {
    pub fn new(
        function: SeaFunction,
        noise_percentage: u32,
        max_instances: Option<usize>,
        seed: u64,
    ) -> Result<Self, Error> {
        Self::with_threshold(function.threshold(), noise_percentage, max_instances, seed)
    }

    /// Uses a custom threshold on `a1 + a2` instead of one of the four concepts.
    pub fn with_threshold(
        threshold: f64,
        noise_percentage: u32,
        max_instances: Option<usize>,
        seed: u64,
    ) -> Result<Self, Error> {
        if !(0.0..=20.0).contains(&threshold) {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "Threshold must be in [0.0, 20.0] for attributes [0,10]",
            ));
        }
        if noise_percentage > 100 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "Noise percentage must be in [0, 100]",
            ));
        }

        Ok(Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            threshold,
            balance_classes: false,
            next_class_should_be_zero: false,
            noise_percentage,
            max_instances,
            produced: 0,
        })
    }

    /// Alternate classes, starting with `1`, by rejecting draws of the wrong class.
    ///
    /// After [`MAX_BALANCE_DRAWS`] rejected draws the last one is kept as is.
    pub fn balanced(mut self, balance: bool) -> Self {
        self.balance_classes = balance;
        self
    }

    #[inline]
    fn draw(&mut self) -> [f64; 3] {
        [
            self.rng.random_range(0.0..10.0),
            self.rng.random_range(0.0..10.0),
            self.rng.random_range(0.0..10.0),
        ]
    }

    #[inline]
    fn class_of(&self, a: &[f64; 3]) -> u8 {
        if a[0] + a[1] <= self.threshold { 0 } else { 1 }
    }

    #[inline]
    fn maybe_flip_with_noise(&mut self, cls: u8) -> u8 {
        let roll: u32 = self.rng.random_range(1..=100);
        if roll <= self.noise_percentage {
            1 - cls
        } else {
            cls
        }
    }
}

impl Stream for SeaGenerator {
    fn has_more_records(&self) -> bool {
        self.max_instances.is_none_or(|max| self.produced < max)
    }

    fn next_record(&mut self) -> Option<Vec<f64>> {
        if !self.has_more_records() {
            return None;
        }

        let mut attrs = self.draw();
        let mut cls = self.class_of(&attrs);
        if self.balance_classes {
            let want = if self.next_class_should_be_zero { 0 } else { 1 };
            // a threshold at the edge of the range may make one class unreachable
            for _ in 1..MAX_BALANCE_DRAWS {
                if cls == want {
                    break;
                }
                attrs = self.draw();
                cls = self.class_of(&attrs);
            }
            self.next_class_should_be_zero = !self.next_class_should_be_zero;
        }
        let cls = self.maybe_flip_with_noise(cls);

        self.produced += 1;
        Some(vec![attrs[0], attrs[1], attrs[2], cls as f64])
    }

    fn restart(&mut self) -> Result<(), Error> {
        self.rng = StdRng::seed_from_u64(self.seed);
        self.produced = 0;
        self.next_class_should_be_zero = false;
        Ok(())
    }
}
