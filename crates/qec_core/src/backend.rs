//! Boundary with the quantum-state simulation backend.

use crate::QecError;
use crate::circuit::Circuit;
use bitvec::prelude::*;
use std::collections::BTreeMap;
use thiserror::Error;

/// One shot's measurement record, slot `i` at bit `i`.
pub type Outcome = BitVec<u8, Lsb0>;

/// Outcome counts across `shots` independent runs of one circuit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Histogram {
    shots: u64,
    counts: BTreeMap<Outcome, u64>,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: Outcome) {
        self.record_n(outcome, 1);
    }

    pub fn record_n(&mut self, outcome: Outcome, count: u64) {
        if count == 0 {
            return;
        }
        self.shots += count;
        *self.counts.entry(outcome).or_insert(0) += count;
    }

    pub fn shots(&self) -> u64 {
        self.shots
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, outcome: &BitSlice<u8, Lsb0>) -> u64 {
        self.counts.get(outcome).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Outcome, u64)> {
        self.counts.iter().map(|(o, &c)| (o, c))
    }

    /// The single outcome of a one-shot histogram.
    pub fn single(&self) -> Option<&Outcome> {
        match self.counts.len() {
            1 => self.counts.keys().next(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The call failed or timed out; the trial may be dropped.
    #[error("transient backend failure: {0}")]
    Transient(String),
    /// The circuit or backend configuration is unusable.
    #[error("fatal backend failure: {0}")]
    Fatal(String),
}

impl From<BackendError> for QecError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Transient(msg) => QecError::BackendTransientFailure(msg),
            BackendError::Fatal(msg) => QecError::InvalidArgument(format!("backend: {msg}")),
        }
    }
}

/// A simulator executing circuits shot by shot.
///
/// Implementations are shared read-only across worker threads. `seed`
/// fully determines the sampled outcomes so trials are reproducible.
pub trait SimulationBackend: Send + Sync {
    fn name(&self) -> &str;

    fn submit(&self, circuit: &Circuit, shots: u64, seed: u64) -> Result<Histogram, BackendError>;
}

impl<B: SimulationBackend + ?Sized> SimulationBackend for &B {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn submit(&self, circuit: &Circuit, shots: u64, seed: u64) -> Result<Histogram, BackendError> {
        (**self).submit(circuit, shots, seed)
    }
}
