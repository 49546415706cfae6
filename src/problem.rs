use crate::config::AdditionConfig;

/// Tensor-side value for target positions excluded from the loss. Any
/// negative value is outside the digit vocabulary; loss code filters on
/// this constant.
pub const IGNORE_INDEX: i32 = -1;

/// One token of a target sequence: a digit the model should predict, or
/// a position excluded from the loss (it would be predicting part of the
/// given operands rather than the answer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetToken {
    Digit(u8),
    Ignore,
}

impl TargetToken {
    /// Encoding used when the target sequence is turned into an Int
    /// tensor: digits keep their face value, masked positions become
    /// `IGNORE_INDEX`.
    pub fn to_index(self) -> i32 {
        match self {
            TargetToken::Digit(d) => d as i32,
            TargetToken::Ignore => IGNORE_INDEX,
        }
    }
}

/// An addition problem `a + b`, decoded on demand from a universe index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdditionProblem {
    pub a: u64,
    pub b: u64,
}

impl AdditionProblem {
    /// Decode a universe index: `a = idx div 10^n`, `b = idx mod 10^n`.
    /// This is a bijection onto the ordered operand pairs, so no two
    /// indices map to the same problem.
    pub fn from_index(config: &AdditionConfig, idx: u64) -> Self {
        let base = config.operand_range();

        Self {
            a: idx / base,
            b: idx % base,
        }
    }

    pub fn sum(&self) -> u64 {
        self.a + self.b
    }

    /// Zero-padded decimal digits of `a` (width n), `b` (width n), and
    /// the sum (width n + 1, room for the carry), most significant digit
    /// first. Always `3n + 1` tokens, each in `0..=9`.
    pub fn render(&self, config: &AdditionConfig) -> Vec<u8> {
        let n = config.ndigit() as usize;
        let mut digits = Vec::with_capacity(config.rendered_len());

        push_digits(&mut digits, self.a, n);
        push_digits(&mut digits, self.b, n);
        push_digits(&mut digits, self.sum(), n + 1);

        digits
    }

    /// The (input, target) pair for next-digit prediction: input is the
    /// rendered sequence without its last digit, target is the rendered
    /// sequence without its first digit. The first `2n - 1` target
    /// positions still lie inside the operands, so they are masked.
    pub fn example(&self, config: &AdditionConfig) -> (Vec<u8>, Vec<TargetToken>) {
        let rendered = self.render(config);
        let num_masked = 2 * config.ndigit() as usize - 1;

        let inputs = rendered[..rendered.len() - 1].to_vec();
        let targets = rendered[1..]
            .iter()
            .enumerate()
            .map(|(pos, &digit)| {
                if pos < num_masked {
                    TargetToken::Ignore
                } else {
                    TargetToken::Digit(digit)
                }
            })
            .collect();

        (inputs, targets)
    }
}

fn push_digits(out: &mut Vec<u8>, mut value: u64, width: usize) {
    let start = out.len();
    out.resize(start + width, 0);

    for slot in out[start..].iter_mut().rev() {
        *slot = (value % 10) as u8;
        value /= 10;
    }
}
