pub trait Activation {
    /// Returns activation function at x
    fn call(&self, x: f64) -> f64;
    /// Returns derivative of activation function with respect to the function at x.
    /// The argument is the already-activated value, so for tanh we
    /// express the derivative as `1 - a_x^2` instead of `1 - tanh(x)^2`.
    fn derivative(&self, a_x: f64) -> f64;
}

/// Hyperbolic tangent, output range (-1.0, 1.0).
#[derive(Debug, Clone, Copy, Default)]
pub struct Tanh;

impl Activation for Tanh {
    fn call(&self, x: f64) -> f64 {
        x.tanh()
    }

    // Only meaningful for a_x inside tanh's range.
    fn derivative(&self, a_x: f64) -> f64 {
        1.0 - a_x * a_x
    }
}
