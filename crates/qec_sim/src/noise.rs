//! Pauli rates for backend noise.
//!
//! A stabilizer simulator can only apply Pauli errors, so damping and
//! thermal channels are replaced by their Pauli twirl. With
//! `a = sqrt(1 - γ)`:
//!
//! * amplitude damping: `px = py = γ/4`, `pz = (1 - a)²/4`
//! * phase damping: `pz = (1 - a)/2`
//! * thermal relaxation over `t` with `p1 = 1 - e^(-t/T1)` and
//!   `p2 = 1 - e^(-t/T2)`: `px = py = p1/4`, `pz = p2/2 - p1/4`

use qec_core::channel::{ErrorChannel, pauli_from_rates};
use qec_core::pauli::Pauli;
use rand::Rng;

/// `(px, py, pz)` applied by `channel` on a stabilizer backend.
pub fn pauli_rates(channel: &ErrorChannel) -> [f64; 3] {
    if let Some(rates) = channel.pauli_probabilities() {
        return rates;
    }
    match *channel {
        ErrorChannel::AmplitudeDamping { gamma } => {
            let a = (1.0 - gamma).sqrt();
            [gamma / 4.0, gamma / 4.0, (1.0 - a) * (1.0 - a) / 4.0]
        }
        ErrorChannel::PhaseDamping { gamma } => {
            let a = (1.0 - gamma).sqrt();
            [0.0, 0.0, (1.0 - a) / 2.0]
        }
        ErrorChannel::ThermalRelaxation { t1, t2, gate_time } => {
            let p1 = 1.0 - (-gate_time / t1).exp();
            let p2 = 1.0 - (-gate_time / t2).exp();
            let pz = (p2 / 2.0 - p1 / 4.0).max(0.0);
            [p1 / 4.0, p1 / 4.0, pz]
        }
        _ => [0.0; 3],
    }
}

/// Draws the Pauli applied by rates `[px, py, pz]`.
pub fn sample<R: Rng + ?Sized>(rates: &[f64; 3], rng: &mut R) -> Pauli {
    if rates.iter().sum::<f64>() <= 0.0 {
        return Pauli::I;
    }
    pauli_from_rates(rates, rng.gen_range(0.0..1.0))
}
