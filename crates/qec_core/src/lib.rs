//! Code-agnostic stabilizer error-correction engine.
//!
//! This crate provides the Pauli algebra, the stabilizer code descriptor and
//! its catalog, the syndrome-extraction gadget synthesizer, error channels,
//! lookup-table decoders and the trial runner that drives a simulation
//! backend and aggregates the results. Codes and decoder tables are built
//! once and shared read-only by every trial.

/// Backend boundary: the `SimulationBackend` trait, histograms and backend
/// errors.
///
/// Backends receive a circuit description and a shot count and return one
/// count per distinct measurement record. Any simulator able to execute the
/// instruction set in `qec_common` can stand behind this trait.
pub mod backend;

/// Word-packed bit manipulation used by the Pauli and GF(2) code.
pub mod bit_utils;

/// Error channels, backend noise models and random error patterns.
///
/// Pauli channels are sampled into explicit error patterns so that the
/// injected error can be compared with the decoder's correction. Damping and
/// thermal relaxation are handed to the backend as noise parameters.
pub mod channel;

/// Instruction-list circuit builder over the shared instruction set.
pub mod circuit;

/// Stabilizer code descriptor, validation and error-pattern enumeration.
///
/// A `StabilizerCode` is validated once at construction: generators must be
/// independent and mutually commuting, and logical operators must commute
/// with every generator while pairing up correctly with each other.
pub mod code;

/// Fixed catalog of supported code families.
pub mod codes;

/// Lookup-table decoders.
///
/// Enumerates candidate errors up to a weight bound and keeps, per syndrome,
/// the first minimum-weight candidate. Collisions that differ by a logical
/// operator are flagged rather than hidden.
pub mod decoder;

/// Memory-experiment circuits built from the synthesized gadgets.
pub mod experiment;

/// Syndrome-extraction gadget synthesis from a generator's bit-vector pair.
pub mod gadget;

/// Gaussian elimination over GF(2).
pub mod gf2;

/// Pauli operators and Pauli strings.
pub mod pauli;

/// Trial execution and parallel evaluation.
///
/// Each trial samples its own error pattern from a per-trial seed, runs one
/// backend shot and decodes it. A backend timeout drops the trial without
/// aborting the batch.
pub mod runner;

/// Run statistics and their associative merge.
pub mod stats;

/// Syndrome bit-strings.
pub mod syndrome;

pub use backend::{BackendError, Histogram, SimulationBackend};
pub use channel::{ErrorChannel, NoiseModel, NoiseTargets};
pub use code::{DecodingStrategy, ErrorSupport, LogicalQubit, Readout, StabilizerCode};
pub use codes::{CodeFamily, build_code};
pub use decoder::{AmbiguityKind, DecodeStatus, Decoder, Decoding};
pub use pauli::{Pauli, PauliString};
pub use runner::{Injection, RunConfig, TrialResult, evaluate, run_trial, tally_histogram};
pub use stats::{RunStatistics, aggregate};
pub use syndrome::Syndrome;

/// Error types returned by the engine.
///
/// Construction-time failures abort the run before any trial starts.
/// Per-trial backend failures are recoverable: the trial is dropped and
/// counted separately.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QecError {
    /// Generators fail commutation or independence checks, or the claimed
    /// distance cannot be achieved.
    #[error("malformed code: {0}")]
    MalformedCode(String),

    /// Out-of-range probabilities, oversubscribed channels, length
    /// mismatches and other rejected call arguments. Values are never
    /// clamped.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A single simulation call failed or timed out.
    #[error("backend transient failure: {0}")]
    BackendTransientFailure(String),
}
