use addition_gpt::batcher::AdditionBatcher;
use addition_gpt::config::AdditionConfig;
use addition_gpt::dataset::{AdditionDataset, Split};
use addition_gpt::problem::AdditionProblem;

use anyhow::{Context, Result};
use burn::data::dataloader::batcher::Batcher;
use burn::data::dataset::Dataset;
use burn::tensor::backend::Backend;
use burn_ndarray::NdArray;
use std::env;

type DemoBackend = NdArray<f32>;

fn main() -> Result<()> {
    let ndigit = match env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("digit width must be an integer, got {arg:?}"))?,
        None => 2,
    };
    let config = AdditionConfig::new(ndigit)?;

    println!(
        "Addition dataset: {}-digit operands, universe of {} problems",
        config.ndigit(),
        config.universe_size()
    );
    println!(
        "Model-facing contract: vocab_size = {}, block_size = {}",
        config.vocab_size(),
        config.block_size()
    );

    let device: <DemoBackend as Backend>::Device = Default::default();
    let train = AdditionDataset::<DemoBackend>::new(config, Split::Train, device.clone());
    let test = AdditionDataset::<DemoBackend>::new(config, Split::Test, device.clone());

    println!("Train split: {} examples", train.len());
    println!("Test split:  {} examples", test.len());

    // Show a few decoded training examples alongside their token pairs.
    for k in 0..3.min(train.len()) {
        let universe_idx = train.universe_indices()[k];
        let problem = AdditionProblem::from_index(train.config(), universe_idx);
        let (inputs, targets) = problem.example(train.config());

        println!(
            "Example {}: {} + {} = {}",
            k,
            problem.a,
            problem.b,
            problem.sum()
        );
        println!("  x = {:?}", inputs);
        println!("  y = {:?}", targets);
    }

    // Assemble one batch the way a burn dataloader would.
    let batch_size = 8.min(train.len());
    let items: Vec<_> = (0..batch_size)
        .map(|k| train.get(k).expect("position is within the split"))
        .collect();
    let batch = AdditionBatcher::new().batch(items, &device);

    println!(
        "Batched {} examples: inputs {:?}, targets {:?}",
        batch_size,
        batch.inputs.shape().dims,
        batch.targets.shape().dims
    );

    Ok(())
}
