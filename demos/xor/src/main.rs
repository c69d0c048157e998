use momentum_nn::{prelude::Result, Hyperparams, Network, Trainer};

fn main() -> Result<()> {
    env_logger::init();

    let mut net = Network::new(&[2, 4, 1], Hyperparams::default())?;

    let inputs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let targets = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];

    Trainer::new(2_000)
        .with_log(Some(200))
        .train(&mut net, &inputs, &targets)?;

    for (input, target) in inputs.iter().zip(&targets) {
        net.forward(input)?;
        println!(
            "{input:?} -> {:.4} (expected {})",
            net.results()[0],
            target[0]
        );
    }
    println!("Recent average error: {:.6}", net.recent_average_error());
    Ok(())
}
