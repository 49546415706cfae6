use crate::dataset::AdditionItem;
use burn::{
    data::dataloader::batcher::Batcher,
    tensor::{backend::Backend, Int, Tensor},
};

/// A batch of addition examples: `[batch_size, 3n]` inputs and targets.
#[derive(Clone, Debug)]
pub struct TrainingBatch<B: Backend> {
    pub inputs: Tensor<B, 2, Int>,
    pub targets: Tensor<B, 2, Int>,
}

impl<B: Backend> TrainingBatch<B> {
    pub fn new(inputs: Tensor<B, 2, Int>, targets: Tensor<B, 2, Int>) -> Self {
        Self { inputs, targets }
    }
}

/// Batcher that stacks individual addition examples into training batches.
/// Every item has the same fixed length, so stacking needs no padding.
#[derive(Clone, Debug)]
pub struct AdditionBatcher<B: Backend> {
    _phantom: std::marker::PhantomData<B>,
}

impl<B: Backend> AdditionBatcher<B> {
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<B: Backend> Default for AdditionBatcher<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> Batcher<B, AdditionItem<B>, TrainingBatch<B>> for AdditionBatcher<B> {
    fn batch(&self, items: Vec<AdditionItem<B>>, _device: &B::Device) -> TrainingBatch<B> {
        if items.is_empty() {
            panic!("Cannot create batch from empty items");
        }

        let inputs: Vec<Tensor<B, 1, Int>> =
            items.iter().map(|item| item.inputs.clone()).collect();
        let targets: Vec<Tensor<B, 1, Int>> =
            items.iter().map(|item| item.targets.clone()).collect();

        // Stack into [batch_size, sequence_length]
        TrainingBatch::new(Tensor::stack(inputs, 0), Tensor::stack(targets, 0))
    }
}
