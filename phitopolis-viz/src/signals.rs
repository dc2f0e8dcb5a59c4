//! Simulated trading metrics for the hero widget
//!
//! Purely decorative: two values wander inside fixed ranges once a second.

use rand::Rng;

pub const LATENCY_START: f64 = 12.0;
pub const LATENCY_RANGE: (f64, f64) = (8.0, 25.0);
const LATENCY_STEP: f64 = 5.0;
/// Latency that fills the bar completely
const LATENCY_BAR_MAX: f64 = 30.0;

pub const ALPHA_START: f64 = 0.85;
pub const ALPHA_RANGE: (f64, f64) = (0.1, 0.99);
const ALPHA_STEP: f64 = 0.05;

/// Milliseconds between updates
pub const UPDATE_INTERVAL_MS: i32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalMetrics {
    /// "Execution latency" in microseconds
    pub latency: f64,
    /// "Alpha correlation"
    pub alpha: f64,
}

impl Default for SignalMetrics {
    fn default() -> Self {
        Self {
            latency: LATENCY_START,
            alpha: ALPHA_START,
        }
    }
}

impl SignalMetrics {
    /// Take one clamped random-walk step
    pub fn step<R: Rng>(&mut self, rng: &mut R) {
        let dl = (rng.r#gen::<f64>() - 0.5) * LATENCY_STEP;
        let da = (rng.r#gen::<f64>() - 0.5) * ALPHA_STEP;
        self.latency = (self.latency + dl).clamp(LATENCY_RANGE.0, LATENCY_RANGE.1);
        self.alpha = (self.alpha + da).clamp(ALPHA_RANGE.0, ALPHA_RANGE.1);
    }

    pub fn latency_label(&self) -> String {
        format!("{:.2}", self.latency)
    }

    pub fn alpha_label(&self) -> String {
        format!("{:.4}", self.alpha)
    }

    /// Width of the latency bar, in percent
    pub fn latency_bar_percent(&self) -> f64 {
        self.latency / LATENCY_BAR_MAX * 100.0
    }
}
