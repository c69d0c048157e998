use rand::{
    distributions::{Distribution, Uniform},
    Rng,
};

use super::{
    activations::{Activation, Tanh},
    Hyperparams,
};

/// Weighted edge from a neuron to one neuron of the next layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub weight: f64,
    /// Last applied change, carried into the next update as momentum
    pub delta_weight: f64,
}

impl Connection {
    pub fn new(weight: f64) -> Self {
        Self {
            weight,
            delta_weight: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Neuron {
    output: f64,
    gradient: f64,
    index: usize,
    connections: Vec<Connection>,
}

impl Neuron {
    /// Creates a neuron at position `index` in its layer with one connection
    /// per neuron it feeds. Weights are drawn uniformly from [0, 1).
    pub fn new<R: Rng + ?Sized>(num_outputs: usize, index: usize, rng: &mut R) -> Self {
        let die = Uniform::from(0.0..1.0);

        Self {
            output: 0.0,
            gradient: 0.0,
            index,
            connections: (0..num_outputs)
                .map(|_| Connection::new(die.sample(&mut *rng)))
                .collect(),
        }
    }

    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn set_output(&mut self, val: f64) {
        self.output = val;
    }

    pub fn gradient(&self) -> f64 {
        self.gradient
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub(crate) fn connections_mut(&mut self) -> &mut [Connection] {
        &mut self.connections
    }

    /// Sets the output to the activated weighted sum of `prev_layer`,
    /// bias neuron included.
    pub fn feed_forward(&mut self, prev_layer: &[Neuron]) {
        let sum: f64 = prev_layer
            .iter()
            .map(|n| n.output * n.connections[self.index].weight)
            .sum();

        self.output = Tanh.call(sum);
    }

    pub fn calc_output_gradient(&mut self, target: f64) {
        let delta = target - self.output;
        self.gradient = delta * Tanh.derivative(self.output);
    }

    /// Backpropagates the gradients of `next_layer` through this neuron's
    /// outgoing weights. The bias neuron of `next_layer` feeds nothing back.
    pub fn calc_hidden_gradient(&mut self, next_layer: &[Neuron]) {
        let dow = self.sum_dow(next_layer);
        self.gradient = dow * Tanh.derivative(self.output);
    }

    fn sum_dow(&self, next_layer: &[Neuron]) -> f64 {
        let fed = next_layer.len().saturating_sub(1);
        self.connections
            .iter()
            .zip(&next_layer[..fed])
            .map(|(c, n)| c.weight * n.gradient)
            .sum()
    }

    /// Adjusts the weights feeding this neuron. They live in the connection
    /// lists of `prev_layer`, at this neuron's index.
    pub fn update_input_weights(&self, prev_layer: &mut [Neuron], params: &Hyperparams) {
        for n in prev_layer.iter_mut() {
            let output = n.output;
            let conn = &mut n.connections[self.index];

            let delta = params.eta * output * self.gradient + params.alpha * conn.delta_weight;

            conn.delta_weight = delta;
            conn.weight += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn layer(outputs: &[f64], num_outputs: usize, weight: f64) -> Vec<Neuron> {
        let mut rng = StdRng::seed_from_u64(0);
        outputs
            .iter()
            .enumerate()
            .map(|(i, &out)| {
                let mut n = Neuron::new(num_outputs, i, &mut rng);
                n.set_output(out);
                n.connections_mut()
                    .iter_mut()
                    .for_each(|c| *c = Connection::new(weight));
                n
            })
            .collect()
    }

    #[test]
    fn weights_in_unit_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let n = Neuron::new(1_000, 3, &mut rng);

        assert_eq!(n.index(), 3);
        assert_eq!(n.connections().len(), 1_000);
        assert!(n
            .connections()
            .iter()
            .all(|c| (0.0..1.0).contains(&c.weight) && c.delta_weight == 0.0));
    }

    #[test]
    fn feed_forward_includes_bias() {
        // two inputs plus bias, all weights 0.5
        let prev = layer(&[0.2, -0.4, 1.0], 2, 0.5);
        let mut rng = StdRng::seed_from_u64(1);
        let mut n = Neuron::new(0, 1, &mut rng);

        n.feed_forward(&prev);

        let expected = (0.5 * 0.2 + 0.5 * -0.4 + 0.5 * 1.0_f64).tanh();
        assert!((n.output() - expected).abs() < 1e-12);
    }

    #[test]
    fn output_gradient() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut n = Neuron::new(0, 0, &mut rng);
        n.set_output(0.5);

        n.calc_output_gradient(1.0);

        assert!((n.gradient() - 0.5 * 0.75).abs() < 1e-12);
    }

    #[test]
    fn hidden_gradient_skips_next_bias() {
        let mut next = layer(&[0.0, 0.0, 1.0], 0, 0.0);
        next[0].gradient = 0.2;
        next[1].gradient = -0.1;
        // would change the sum if the bias were counted
        next[2].gradient = 100.0;

        let mut rng = StdRng::seed_from_u64(1);
        let mut n = Neuron::new(2, 0, &mut rng);
        n.connections_mut()[0].weight = 2.0;
        n.connections_mut()[1].weight = 3.0;
        n.set_output(0.5);

        n.calc_hidden_gradient(&next);

        let dow = 2.0 * 0.2 + 3.0 * -0.1;
        assert!((n.gradient() - dow * 0.75).abs() < 1e-12);
    }

    #[test]
    fn update_applies_momentum() {
        let params = Hyperparams::default();
        let mut prev = layer(&[0.5, 1.0], 1, 0.25);
        let mut rng = StdRng::seed_from_u64(1);
        let mut n = Neuron::new(0, 0, &mut rng);
        n.gradient = 0.4;

        n.update_input_weights(&mut prev, &params);

        let first = params.eta * 0.5 * 0.4;
        let c = prev[0].connections()[0];
        assert!((c.delta_weight - first).abs() < 1e-12);
        assert!((c.weight - (0.25 + first)).abs() < 1e-12);

        n.update_input_weights(&mut prev, &params);

        let second = params.eta * 0.5 * 0.4 + params.alpha * first;
        let c = prev[0].connections()[0];
        assert!((c.delta_weight - second).abs() < 1e-12);
        assert!((c.weight - (0.25 + first + second)).abs() < 1e-12);

        // bias connection is trained as well
        let bias = prev[1].connections()[0];
        assert!(bias.weight > 0.25);
    }
}
