pub mod activations;
pub mod neuron;
pub mod trainer;

use crate::prelude::*;

use log::debug;
use rand::Rng;

use self::neuron::{Connection, Neuron};

/// Learning constants of a network. Fixed once the network is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hyperparams {
    /// Overall learning rate
    pub eta: f64,
    /// Multiplier of the last weight change (momentum)
    pub alpha: f64,
    /// Number of past samples the recent average error is smoothed over
    pub smoothing: f64,
}

impl Default for Hyperparams {
    fn default() -> Self {
        Self {
            eta: 0.15,
            alpha: 0.5,
            smoothing: 100.0,
        }
    }
}

impl Hyperparams {
    pub fn with_eta(mut self, eta: f64) -> Self {
        self.eta = eta;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    fn validate(&self) -> Result<()> {
        for (name, val) in [
            ("eta", self.eta),
            ("alpha", self.alpha),
            ("smoothing", self.smoothing),
        ] {
            if !val.is_finite() || val < 0.0 {
                return Err(Error::Config(format!(
                    "{name} must be finite and non-negative, got {val}"
                )));
            }
        }
        Ok(())
    }
}

/// Fully-connected feedforward net. Every layer ends with a bias neuron
/// whose output stays at 1.0.
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Vec<Neuron>>,
    params: Hyperparams,
    error: f64,
    recent_average_error: f64,
}

impl Network {
    /// Builds a network with one layer per `topology` entry, each holding
    /// that many neurons plus a bias neuron. Weights are drawn from the
    /// thread rng.
    pub fn new(topology: &[usize], params: Hyperparams) -> Result<Self> {
        Self::with_rng(topology, params, &mut rand::thread_rng())
    }

    /// Same as [`Network::new`] but draws the initial weights from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        topology: &[usize],
        params: Hyperparams,
        rng: &mut R,
    ) -> Result<Self> {
        if topology.is_empty() {
            return Err(Error::Config("topology has no layers".to_string()));
        }
        if let Some(l) = topology.iter().position(|&n| n == 0) {
            return Err(Error::Config(format!("layer {l} has no neurons")));
        }
        params.validate()?;

        let mut layers = Vec::with_capacity(topology.len());
        for (l, &size) in topology.iter().enumerate() {
            let n_outputs = topology.get(l + 1).copied().unwrap_or(0);

            // <= adds the bias neuron
            let mut layer: Vec<Neuron> = (0..=size)
                .map(|n| Neuron::new(n_outputs, n, &mut *rng))
                .collect();
            if let Some(bias) = layer.last_mut() {
                bias.set_output(1.0);
            }

            debug!("built layer {l}: {size} neurons + bias, {n_outputs} connections each");
            layers.push(layer);
        }

        Ok(Self {
            layers,
            params,
            error: 0.0,
            recent_average_error: 0.0,
        })
    }

    /// Latches `inputs` into the input layer and propagates them to the outputs.
    pub fn forward(&mut self, inputs: &[f64]) -> Result<()> {
        let expected = self.layers[0].len() - 1;
        if inputs.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: inputs.len(),
            });
        }

        for (neuron, &x) in self.layers[0].iter_mut().zip(inputs) {
            neuron.set_output(x);
        }

        for l in 1..self.layers.len() {
            let (before, after) = self.layers.split_at_mut(l);
            let prev = &before[l - 1];
            let layer = &mut after[0];

            let fed = layer.len() - 1;
            for neuron in &mut layer[..fed] {
                neuron.feed_forward(prev);
            }
        }
        Ok(())
    }

    /// Measures the outputs against `targets`, then backpropagates the error
    /// and updates every connection weight.
    pub fn backward(&mut self, targets: &[f64]) -> Result<()> {
        let last = self.layers.len() - 1;
        let n_outputs = self.layers[last].len() - 1;
        if targets.len() != n_outputs {
            return Err(Error::SizeMismatch {
                expected: n_outputs,
                actual: targets.len(),
            });
        }

        // RMS of the output errors
        let output_layer = &mut self.layers[last];
        let sum_sq: f64 = output_layer
            .iter()
            .zip(targets)
            .map(|(n, t)| (t - n.output()).powi(2))
            .sum();
        self.error = (sum_sq / n_outputs as f64).sqrt();

        let k = self.params.smoothing;
        self.recent_average_error = (self.recent_average_error * k + self.error) / (k + 1.0);

        for (neuron, &t) in output_layer.iter_mut().zip(targets) {
            neuron.calc_output_gradient(t);
        }

        // Each hidden layer reads the finished gradients of the layer after it.
        for l in (1..last).rev() {
            let (before, after) = self.layers.split_at_mut(l + 1);
            let next = &after[0];
            for neuron in before[l].iter_mut() {
                neuron.calc_hidden_gradient(next);
            }
        }

        for l in (1..=last).rev() {
            let (before, after) = self.layers.split_at_mut(l);
            let prev = &mut before[l - 1];
            let layer = &after[0];
            for neuron in &layer[..layer.len() - 1] {
                neuron.update_input_weights(prev, &self.params);
            }
        }
        Ok(())
    }

    /// Outputs of the final layer, bias excluded.
    pub fn results(&self) -> Vec<f64> {
        let output_layer = &self.layers[self.layers.len() - 1];
        output_layer[..output_layer.len() - 1]
            .iter()
            .map(Neuron::output)
            .collect()
    }

    /// RMS output error measured by the last call to [`Network::backward`]
    pub fn error(&self) -> f64 {
        self.error
    }

    pub fn recent_average_error(&self) -> f64 {
        self.recent_average_error
    }

    pub fn params(&self) -> &Hyperparams {
        &self.params
    }

    pub fn layers(&self) -> &[Vec<Neuron>] {
        &self.layers
    }

    /// Neuron count per layer, bias excluded.
    pub fn topology(&self) -> Vec<usize> {
        self.layers.iter().map(|l| l.len() - 1).collect()
    }

    /// Weight of the connection from neuron `from` in `layer` to neuron `to`
    /// in the layer after it.
    pub fn weight(&self, layer: usize, from: usize, to: usize) -> Result<f64> {
        self.layers
            .get(layer)
            .and_then(|l| l.get(from))
            .and_then(|n| n.connections().get(to))
            .map(|c| c.weight)
            .ok_or(Error::OutOfRange)
    }

    /// Overwrites a single weight. The momentum carried by the connection is kept.
    pub fn set_weight(&mut self, layer: usize, from: usize, to: usize, weight: f64) -> Result<()> {
        let conn = self
            .layers
            .get_mut(layer)
            .and_then(|l| l.get_mut(from))
            .and_then(|n| n.connections_mut().get_mut(to))
            .ok_or(Error::OutOfRange)?;
        conn.weight = weight;
        Ok(())
    }

    /// Sets every weight to `weight` and clears all momentum.
    pub fn fill_weights(&mut self, weight: f64) {
        for neuron in self.layers.iter_mut().flatten() {
            for conn in neuron.connections_mut() {
                *conn = Connection::new(weight);
            }
        }
    }
}
