use log::info;
use momentum_nn::{prelude::Result, viz::NNGui, Hyperparams, Network, Trainer};

fn main() -> Result<()> {
    env_logger::init();

    const BITS: u32 = 2; // Number of bits per number to add
    let topology = [2 * BITS as usize, 8, BITS as usize + 1];
    let mut net = Network::new(&topology, Hyperparams::default())?;

    fn to_bitvec(x: u32, size: u32) -> Vec<f64> {
        (0..size).map(|i| (x >> i & 1) as f64).collect()
    }

    let mut inputs = Vec::new();
    let mut targets = Vec::new();
    for i in 0..1 << BITS {
        for j in 0..1 << BITS {
            inputs.push([to_bitvec(i, BITS), to_bitvec(j, BITS)].concat());
            targets.push(to_bitvec(i + j, BITS + 1));
        }
    }

    let trainer = Trainer::new(5_000).with_log(Some(10));
    trainer.train_gui::<NNGui>(&mut net, &inputs, &targets)?;

    info!("recent average error: {}", net.recent_average_error());

    fn from_bits(bv: &[f64]) -> u32 {
        bv.iter()
            .enumerate()
            .fold(0, |acc, (idx, v)| acc + (((*v > 0.5) as u32) << idx))
    }

    let mut correct = 0;
    for input in &inputs {
        net.forward(input)?;
        let y = from_bits(&net.results());
        let (i, j) = input.split_at(BITS as usize);
        let (i, j) = (from_bits(i), from_bits(j));
        if i + j != y {
            println!("{i}+{j} != {y}");
        } else {
            correct += 1;
        }
    }

    println!("Accuracy = {}", correct as f64 / inputs.len() as f64);
    Ok(())
}
