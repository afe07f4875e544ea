//! Reference simulation backend for the stabilizer-code engine.
//!
//! Executes circuit descriptions on a CHP stabilizer tableau. Every circuit
//! the engine emits is Clifford with Pauli noise, so the tableau simulates it
//! exactly; non-Pauli noise channels are applied through their Pauli twirl.

use qec_core::QecError;
use qec_core::backend::{BackendError, Histogram, SimulationBackend};
use qec_core::circuit::Circuit;
use qec_core::runner::trial_seed;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::{Duration, Instant};
use tracing::trace;

/// Single-shot instruction interpreter driving the tableau.
///
/// Resolves each circuit's noise models into per-gate-class Pauli rates,
/// then walks the instruction list once per shot. Measurement outcomes are
/// written into the record slot named by the instruction, and conditional
/// Paulis read previously written slots.
pub mod machine;

/// Pauli-twirl rates for backend noise channels.
pub mod noise;

/// Aaronson-Gottesman stabilizer tableau.
///
/// Stores destabilizer and stabilizer generators as packed X/Z rows with a
/// sign bit. Clifford gates cost `O(n)` row updates and measurements
/// `O(n²)`.
pub mod tableau;

/// Exact stabilizer simulation of circuit descriptions.
///
/// With a `timeout`, a submission that reaches the limit before its last
/// shot fails with [`BackendError::Transient`].
#[derive(Debug, Clone, Default)]
pub struct TableauBackend {
    timeout: Option<Duration>,
}

impl TableauBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

impl SimulationBackend for TableauBackend {
    fn name(&self) -> &str {
        "tableau"
    }

    fn submit(&self, circuit: &Circuit, shots: u64, seed: u64) -> Result<Histogram, BackendError> {
        let start = Instant::now();
        let mut histogram = Histogram::new();
        for shot in 0..shots {
            if let Some(limit) = self.timeout {
                if start.elapsed() >= limit {
                    return Err(BackendError::Transient(format!(
                        "timed out after {shot} of {shots} shots"
                    )));
                }
            }
            let mut rng = StdRng::seed_from_u64(trial_seed(seed, shot));
            histogram.record(machine::run_shot(circuit, &mut rng)?);
        }
        trace!(
            instructions = circuit.instructions().len(),
            shots,
            outcomes = histogram.len(),
            "tableau submission"
        );
        Ok(histogram)
    }
}

/// Wraps a backend and fails a fixed fraction of submissions transiently.
///
/// Whether a submission fails depends only on its seed, so runs stay
/// reproducible.
#[derive(Debug, Clone)]
pub struct FlakyBackend<B> {
    inner: B,
    failure_rate: f64,
}

impl<B: SimulationBackend> FlakyBackend<B> {
    /// Fails with [`QecError::InvalidArgument`] unless `failure_rate` lies
    /// in `[0, 1]`.
    pub fn new(inner: B, failure_rate: f64) -> Result<Self, QecError> {
        if !(0.0..=1.0).contains(&failure_rate) {
            return Err(QecError::InvalidArgument(format!(
                "failure rate {failure_rate} outside [0, 1]"
            )));
        }
        Ok(Self {
            inner,
            failure_rate,
        })
    }

    fn fails(&self, seed: u64) -> bool {
        let u = (trial_seed(seed, 0xF1A4) >> 11) as f64 / (1u64 << 53) as f64;
        u < self.failure_rate
    }
}

impl<B: SimulationBackend> SimulationBackend for FlakyBackend<B> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn submit(&self, circuit: &Circuit, shots: u64, seed: u64) -> Result<Histogram, BackendError> {
        if self.fails(seed) {
            return Err(BackendError::Transient(format!(
                "injected failure for seed {seed:#018x}"
            )));
        }
        self.inner.submit(circuit, shots, seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_determine_outcomes() {
        let mut c = Circuit::new(1).unwrap();
        c.h(0).unwrap();
        c.measure(0).unwrap();
        let backend = TableauBackend::new();
        let a = backend.submit(&c, 64, 9).unwrap();
        let b = backend.submit(&c, 64, 9).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.shots(), 64);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn zero_timeout_is_transient() {
        let mut c = Circuit::new(1).unwrap();
        c.measure(0).unwrap();
        let backend = TableauBackend::with_timeout(Duration::ZERO);
        let err = backend.submit(&c, 10, 0);
        assert!(matches!(err, Err(BackendError::Transient(_))));
    }

    #[test]
    fn flaky_backend_extremes() {
        let mut c = Circuit::new(1).unwrap();
        c.measure(0).unwrap();
        let always = FlakyBackend::new(TableauBackend::new(), 1.0).unwrap();
        let never = FlakyBackend::new(TableauBackend::new(), 0.0).unwrap();
        for seed in 0..20 {
            assert!(always.submit(&c, 1, seed).is_err());
            assert!(never.submit(&c, 1, seed).is_ok());
        }
    }

    #[test]
    fn flaky_backend_rejects_rates_outside_unit_interval() {
        for rate in [1.5, -3.0, f64::NAN, f64::INFINITY] {
            let err = FlakyBackend::new(TableauBackend::new(), rate).unwrap_err();
            assert!(matches!(err, QecError::InvalidArgument(_)), "{rate}");
        }
    }
}
