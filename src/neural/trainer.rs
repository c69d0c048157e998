use std::sync::mpsc;

use log::info;

use crate::{
    neural::Network,
    prelude::*,
    viz::{IterationState, Visualizer},
};

/// Runs a fixed number of training iterations over a sample set. Each
/// iteration presents every (input, target) pair once, in order.
pub struct Trainer {
    iterations: usize,
    iterations_per_log: Option<usize>,
}

impl Trainer {
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            iterations_per_log: None,
        }
    }

    pub fn with_log(mut self, iterations_per_log: Option<usize>) -> Self {
        self.iterations_per_log = iterations_per_log;
        self
    }

    pub fn train(
        &self,
        net: &mut Network,
        inputs: &[Vec<f64>],
        targets: &[Vec<f64>],
    ) -> Result<()> {
        Self::check_samples(net, inputs, targets)?;

        for i in 0..self.iterations {
            Self::train_once(net, inputs, targets)?;
            if self.should_log(i) {
                info!(
                    "Iteration {i} error: {:.6} (recent average {:.6})",
                    net.error(),
                    net.recent_average_error()
                );
            }
        }
        Ok(())
    }

    /// Trains on a worker thread while `Gui` plots progress on this one.
    /// Returns once the window is closed and the worker has finished.
    /// Closing the window early stops the plotting, not the training.
    pub fn train_gui<Gui: Visualizer>(
        &self,
        net: &mut Network,
        inputs: &[Vec<f64>],
        targets: &[Vec<f64>],
    ) -> Result<()> {
        Self::check_samples(net, inputs, targets)?;

        std::thread::scope(|scope| -> Result<()> {
            let (tx, rx) = mpsc::channel::<IterationState>();
            let handle = scope.spawn(move || -> Result<()> {
                let mut plotting = true;
                for i in 0..self.iterations {
                    Self::train_once(net, inputs, targets)?;
                    if plotting && self.should_log(i) {
                        plotting = report(&tx, (i, net.error(), net.recent_average_error()));
                    }
                }
                info!(
                    "Finished {} iterations, error: {:.6}",
                    self.iterations,
                    net.error()
                );
                Ok(())
            });

            eframe::run_native(
                "momentum_nn",
                eframe::NativeOptions::default(),
                Box::new(move |cc| Box::new(Gui::new(cc, rx))),
            )
            .map_err(|_| Error::Thread)?;

            handle.join().map_err(|_| Error::Thread)??;
            Ok(())
        })
    }

    fn should_log(&self, i: usize) -> bool {
        self.iterations_per_log.is_some_and(|ipl| ipl > 0 && i % ipl == 0)
    }

    fn train_once(net: &mut Network, inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<()> {
        for (input, target) in inputs.iter().zip(targets) {
            net.forward(input)?;
            net.backward(target)?;
        }
        Ok(())
    }

    /// Rejects sample sets the network can't consume before any weight moves.
    fn check_samples(net: &Network, inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<()> {
        if inputs.is_empty() {
            return Err(Error::Config("no training samples".to_string()));
        }
        if inputs.len() != targets.len() {
            return Err(Error::SizeMismatch {
                expected: inputs.len(),
                actual: targets.len(),
            });
        }

        let topology = net.topology();
        let (n_in, n_out) = (topology[0], topology[topology.len() - 1]);
        for (input, target) in inputs.iter().zip(targets) {
            if input.len() != n_in {
                return Err(Error::SizeMismatch {
                    expected: n_in,
                    actual: input.len(),
                });
            }
            if target.len() != n_out {
                return Err(Error::SizeMismatch {
                    expected: n_out,
                    actual: target.len(),
                });
            }
        }
        Ok(())
    }
}

/// Sends one state to the GUI. Returns false once the window has gone away.
fn report(tx: &mpsc::Sender<IterationState>, state: IterationState) -> bool {
    tx.send(state).is_ok()
}
