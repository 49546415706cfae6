use anyhow::{ensure, Result};

/// Seed for the universe permutation. Both splits derive their index
/// subsets from the same permutation, so this must never differ between
/// the train and test instances.
pub const PERMUTATION_SEED: u64 = 1337;

/// Fraction of the universe reserved for the test split.
pub const TEST_FRACTION: f64 = 0.2;

/// Hard cap on the test split size.
pub const MAX_TEST_EXAMPLES: usize = 1000;

/// The ten decimal digits. No separator or operator tokens are encoded.
pub const VOCAB_SIZE: usize = 10;

/// Widths above this would materialize a permutation too large for memory
/// (100^5 is ten billion indices).
const MAX_NDIGIT: u32 = 4;

/// Problem-size parameter for the addition dataset: every operand has
/// exactly `ndigit` decimal digits (zero-padded).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdditionConfig {
    ndigit: u32,
}

impl AdditionConfig {
    pub fn new(ndigit: u32) -> Result<Self> {
        ensure!(ndigit >= 1, "digit width must be at least 1, got {ndigit}");
        ensure!(
            ndigit <= MAX_NDIGIT,
            "digit width {ndigit} would enumerate 100^{ndigit} operand pairs, \
             which cannot be materialized; the maximum supported width is {MAX_NDIGIT}"
        );

        Ok(Self { ndigit })
    }

    pub fn ndigit(&self) -> u32 {
        self.ndigit
    }

    /// Exclusive upper bound on a single operand: `10^ndigit`.
    pub fn operand_range(&self) -> u64 {
        10u64.pow(self.ndigit)
    }

    /// Number of ordered operand pairs: `100^ndigit`.
    pub fn universe_size(&self) -> u64 {
        100u64.pow(self.ndigit)
    }

    /// Test split size: `min(floor(0.2 * universe), 1000)`.
    pub fn num_test(&self) -> usize {
        ((self.universe_size() as f64 * TEST_FRACTION) as usize).min(MAX_TEST_EXAMPLES)
    }

    /// Length of a fully rendered problem: n digits of `a`, n digits of
    /// `b`, and n + 1 digits of the sum.
    pub fn rendered_len(&self) -> usize {
        3 * self.ndigit as usize + 1
    }

    /// Sequence length seen by the model: the rendered problem shifted by
    /// one for next-digit prediction.
    pub fn block_size(&self) -> usize {
        3 * self.ndigit as usize
    }

    pub fn vocab_size(&self) -> usize {
        VOCAB_SIZE
    }
}
