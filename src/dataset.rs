use crate::config::{AdditionConfig, PERMUTATION_SEED};
use crate::problem::AdditionProblem;
use burn::{
    data::dataset::Dataset,
    tensor::{backend::Backend, Int, Tensor, TensorData},
};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Which side of the fixed 80/20 partition a dataset instance serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    Train,
    Test,
}

/// A dataset item: `[3n]` input digits and `[3n]` targets, with the
/// operand-predicting positions encoded as `IGNORE_INDEX`.
#[derive(Debug, Clone)]
pub struct AdditionItem<B: Backend> {
    pub inputs: Tensor<B, 1, Int>,
    pub targets: Tensor<B, 1, Int>,
}

impl<B: Backend> AdditionItem<B> {
    pub fn new(inputs: Tensor<B, 1, Int>, targets: Tensor<B, 1, Int>) -> Self {
        Self { inputs, targets }
    }
}

/// Dataset over one split of the addition-problem universe. Examples are
/// not stored; each access decodes its universe index arithmetically, so
/// the struct only holds the split's ordered index sequence.
pub struct AdditionDataset<B: Backend> {
    config: AdditionConfig,
    indices: Vec<u64>,
    device: B::Device,
}

impl<B: Backend> AdditionDataset<B> {
    pub fn new(config: AdditionConfig, split: Split, device: B::Device) -> Self {
        // Both splits regenerate the identical permutation from the fixed
        // seed, so the partition boundary agrees between two instances
        // without any shared state. The generator is a local instance,
        // never a process-wide one, so construction order cannot matter.
        let mut permutation: Vec<u64> = (0..config.universe_size()).collect();
        let mut rng = StdRng::seed_from_u64(PERMUTATION_SEED);
        permutation.shuffle(&mut rng);

        let num_test = config.num_test();
        let indices = match split {
            Split::Test => permutation[..num_test].to_vec(),
            Split::Train => permutation[num_test..].to_vec(),
        };

        Self {
            config,
            indices,
            device,
        }
    }

    pub fn config(&self) -> &AdditionConfig {
        &self.config
    }

    /// Ordered universe indices backing this split. Position k of the
    /// dataset always decodes `universe_indices()[k]`.
    pub fn universe_indices(&self) -> &[u64] {
        &self.indices
    }
}

impl<B: Backend> Dataset<AdditionItem<B>> for AdditionDataset<B> {
    fn get(&self, index: usize) -> Option<AdditionItem<B>> {
        let universe_idx = *self.indices.get(index)?;
        let problem = AdditionProblem::from_index(&self.config, universe_idx);
        let (inputs, targets) = problem.example(&self.config);

        let block_size = self.config.block_size();
        let input_tokens: Vec<i32> = inputs.iter().map(|&d| d as i32).collect();
        let target_tokens: Vec<i32> = targets.iter().map(|t| t.to_index()).collect();

        let inputs = Tensor::from_data(TensorData::new(input_tokens, [block_size]), &self.device);
        let targets = Tensor::from_data(TensorData::new(target_tokens, [block_size]), &self.device);

        Some(AdditionItem::new(inputs, targets))
    }

    fn len(&self) -> usize {
        self.indices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::IGNORE_INDEX;
    use burn_ndarray::NdArray;

    type TestBackend = NdArray<f32, i32>;

    fn device() -> <TestBackend as Backend>::Device {
        Default::default()
    }

    fn dataset(ndigit: u32, split: Split) -> AdditionDataset<TestBackend> {
        let config = AdditionConfig::new(ndigit).unwrap();
        AdditionDataset::new(config, split, device())
    }

    #[test]
    fn test_split_sizes_single_digit() {
        let train = dataset(1, Split::Train);
        let test = dataset(1, Split::Test);

        assert_eq!(test.len(), 20);
        assert_eq!(train.len(), 80);
        assert_eq!(train.len() + test.len(), 100);
    }

    #[test]
    fn test_split_sizes_hit_test_cap() {
        let train = dataset(2, Split::Train);
        let test = dataset(2, Split::Test);

        assert_eq!(test.len(), 1000);
        assert_eq!(train.len() + test.len(), 10_000);
    }

    #[test]
    fn test_splits_partition_the_universe() {
        let train = dataset(2, Split::Train);
        let test = dataset(2, Split::Test);

        let mut all: Vec<u64> = train
            .universe_indices()
            .iter()
            .chain(test.universe_indices())
            .copied()
            .collect();
        all.sort_unstable();

        // No overlap, no gaps: together they are exactly [0, 100^n).
        let expected: Vec<u64> = (0..10_000).collect();
        assert_eq!(all, expected);
    }

    #[test]
    fn test_construction_is_deterministic() {
        let first = dataset(2, Split::Train);
        let second = dataset(2, Split::Train);

        assert_eq!(first.universe_indices(), second.universe_indices());
    }

    #[test]
    fn test_item_tensors_match_the_decoded_problem() {
        let train = dataset(2, Split::Train);

        let universe_idx = train.universe_indices()[0];
        let a = universe_idx / 100;
        let b = universe_idx % 100;
        let c = a + b;

        let item = train.get(0).unwrap();
        assert_eq!(item.inputs.shape().dims, [6]);
        assert_eq!(item.targets.shape().dims, [6]);

        let inputs = item.inputs.into_data().to_vec::<i32>().unwrap();
        let targets = item.targets.into_data().to_vec::<i32>().unwrap();

        // Inputs spell out a, b, and all but the last digit of the sum.
        assert_eq!(inputs[0], (a / 10) as i32);
        assert_eq!(inputs[1], (a % 10) as i32);
        assert_eq!(inputs[2], (b / 10) as i32);
        assert_eq!(inputs[3], (b % 10) as i32);
        assert_eq!(inputs[4], (c / 100) as i32);
        assert_eq!(inputs[5], (c / 10 % 10) as i32);

        // Targets mask the operand positions and spell out the sum.
        assert_eq!(&targets[..3], [IGNORE_INDEX; 3]);
        assert_eq!(targets[3], (c / 100) as i32);
        assert_eq!(targets[4], (c / 10 % 10) as i32);
        assert_eq!(targets[5], (c % 10) as i32);
    }

    #[test]
    fn test_no_unmasked_position_equals_the_sentinel() {
        let test = dataset(1, Split::Test);

        for k in 0..test.len() {
            let item = test.get(k).unwrap();
            let targets = item.targets.into_data().to_vec::<i32>().unwrap();

            assert_eq!(targets[0], IGNORE_INDEX);
            for &t in &targets[1..] {
                assert!((0..10).contains(&t));
            }
        }
    }

    #[test]
    fn test_out_of_range_access_returns_none() {
        let test = dataset(1, Split::Test);

        assert!(test.get(test.len()).is_none());
    }
}
