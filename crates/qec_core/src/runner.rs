//! Trial execution against a simulation backend.
//!
//! Each trial owns its RNG, seeded from the run seed and the trial index, so
//! results do not depend on how trials are scheduled across threads. Trials
//! are reduced into [`RunStatistics`] with rayon; a transient backend
//! failure drops that one trial and the batch continues.

use crate::QecError;
use crate::backend::SimulationBackend;
use crate::channel::{ErrorChannel, NoiseModel, apply_random_errors};
use crate::code::StabilizerCode;
use crate::decoder::{DecodeStatus, Decoder};
use crate::experiment::MemoryExperiment;
use crate::pauli::{Pauli, PauliString};
use crate::stats::RunStatistics;
use crate::syndrome::Syndrome;
use bitvec::prelude::*;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

/// How the error window's Pauli pattern is chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum Injection {
    None,
    /// The same pattern in every trial.
    Fixed(PauliString),
    /// One draw of the channel per data qubit. Non-Pauli channels are passed
    /// to the backend as error-window noise instead.
    Channel(ErrorChannel),
    /// [`apply_random_errors`] over the data qubits.
    Random { rate: f64, types: Vec<Pauli> },
}

impl Injection {
    /// A single `pauli` error on `qubit`.
    pub fn single(num_qubits: usize, qubit: usize, pauli: Pauli) -> Result<Self, QecError> {
        Ok(Self::Fixed(PauliString::single(num_qubits, qubit, pauli)?))
    }

    /// True if every trial sees the same classical pattern.
    pub fn is_fixed(&self) -> bool {
        match self {
            Self::None | Self::Fixed(_) => true,
            Self::Channel(c) => !c.is_pauli(),
            Self::Random { .. } => false,
        }
    }

    fn sample<R: RngCore>(
        &self,
        num_qubits: usize,
        rng: &mut R,
    ) -> Result<(PauliString, Vec<(usize, Pauli)>), QecError> {
        match self {
            Self::None => Ok((PauliString::identity(num_qubits), Vec::new())),
            Self::Fixed(p) => {
                if p.num_qubits() != num_qubits {
                    return Err(QecError::InvalidArgument(format!(
                        "fixed error has {} qubits, code has {num_qubits}",
                        p.num_qubits()
                    )));
                }
                Ok((p.clone(), p.iter().collect()))
            }
            Self::Channel(c) => {
                let targets: Vec<usize> = (0..num_qubits).collect();
                c.sample(num_qubits, &targets, rng)
            }
            Self::Random { rate, types } => apply_random_errors(num_qubits, *rate, types, rng),
        }
    }

    fn backend_noise(&self) -> Option<NoiseModel> {
        match self {
            Self::Channel(c) if !c.is_pauli() => Some(NoiseModel::idle(*c)),
            _ => None,
        }
    }
}

/// Parameters of one evaluation run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// One input bit per logical qubit.
    pub inputs: Vec<bool>,
    pub injection: Injection,
    /// Backend noise attached to the gates of the whole circuit.
    pub gate_noise: Option<NoiseModel>,
    pub shots: u64,
    pub seed: u64,
    /// Overrides the decoder's weight bound `(d - 1) / 2`.
    pub max_weight: Option<usize>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            inputs: vec![false],
            injection: Injection::None,
            gate_noise: None,
            shots: 1024,
            seed: 0,
            max_weight: None,
        }
    }
}

/// Outcome of one trial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialResult {
    pub syndrome: Syndrome,
    pub applied_correction: PauliString,
    pub recovered_logical: Vec<bool>,
    /// Every recovered logical bit equals its input bit.
    pub matched_expected: bool,
    pub status: DecodeStatus,
    pub description: String,
    /// Pauli pattern applied in the error window.
    pub injected: PauliString,
    /// `(qubit, type)` pairs of `injected`.
    pub applied_errors: Vec<(usize, Pauli)>,
}

/// One executed but undecoded shot.
struct Shot {
    syndrome: Syndrome,
    data: Vec<bool>,
    injected: PauliString,
    applied: Vec<(usize, Pauli)>,
}

/// SplitMix64 finalizer over `(seed, index)`.
pub fn trial_seed(seed: u64, index: u64) -> u64 {
    let mut z = seed ^ index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Shared, read-only state for the trials of one run.
pub struct TrialRunner<'a> {
    code: &'a StabilizerCode,
    decoder: Decoder,
    experiment: MemoryExperiment<'a>,
    config: RunConfig,
    noise: Vec<NoiseModel>,
}

impl<'a> TrialRunner<'a> {
    /// Builds the decoder tables and gadgets before any trial starts.
    pub fn new(code: &'a StabilizerCode, config: RunConfig) -> Result<Self, QecError> {
        if config.inputs.len() != code.num_logicals() {
            return Err(QecError::InvalidArgument(format!(
                "{} encodes {} logical qubit(s), got {} input bit(s)",
                code.name(),
                code.num_logicals(),
                config.inputs.len()
            )));
        }
        if let Some(model) = &config.gate_noise {
            model.channel.validate()?;
        }
        match &config.injection {
            Injection::Channel(c) => c.validate()?,
            Injection::Fixed(p) if p.num_qubits() != code.num_qubits() => {
                return Err(QecError::InvalidArgument(format!(
                    "fixed error {p} does not fit {} qubits",
                    code.num_qubits()
                )));
            }
            _ => {}
        }

        let decoder = match config.max_weight {
            Some(t) => Decoder::with_max_weight(code, t)?,
            None => Decoder::new(code)?,
        };
        let experiment = MemoryExperiment::new(code)?;
        let noise = config
            .gate_noise
            .into_iter()
            .chain(config.injection.backend_noise())
            .collect();

        Ok(Self {
            code,
            decoder,
            experiment,
            config,
            noise,
        })
    }

    pub fn code(&self) -> &StabilizerCode {
        self.code
    }

    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Samples trial `trial`'s error pattern and runs its one shot.
    fn execute<B: SimulationBackend + ?Sized>(&self, backend: &B, trial: u64) -> Result<Shot, QecError> {
        let mut rng = StdRng::seed_from_u64(trial_seed(self.config.seed, trial));
        let (injected, applied) = self.config.injection.sample(self.code.num_qubits(), &mut rng)?;
        let (circuit, layout) = self
            .experiment
            .build(&self.config.inputs, &injected, &self.noise)?;

        let histogram = backend.submit(&circuit, 1, rng.next_u64())?;
        let outcome = histogram.single().ok_or_else(|| {
            QecError::BackendTransientFailure(format!(
                "{} returned {} outcomes for one shot",
                backend.name(),
                histogram.len()
            ))
        })?;
        let (syndrome, data) = layout.split(outcome)?;
        Ok(Shot {
            syndrome,
            data,
            injected,
            applied,
        })
    }

    /// Samples an error pattern, runs one shot on `backend` and decodes it.
    pub fn run_trial<B: SimulationBackend + ?Sized>(
        &self,
        backend: &B,
        trial: u64,
    ) -> Result<TrialResult, QecError> {
        let shot = self.execute(backend, trial)?;
        self.interpret(shot.syndrome, &shot.data, shot.injected, shot.applied)
    }

    /// Runs trial `trial` without decoding it and returns its record as
    /// `syndrome ++ data` bits, the layout read by [`Self::interpret_record`].
    pub fn sample_record<B: SimulationBackend + ?Sized>(
        &self,
        backend: &B,
        trial: u64,
    ) -> Result<BitVec<u8, Lsb0>, QecError> {
        let shot = self.execute(backend, trial)?;
        let mut record = shot.syndrome.bits().to_bitvec();
        record.extend(shot.data);
        Ok(record)
    }

    /// Bits per record returned by [`Self::sample_record`].
    pub fn record_len(&self) -> usize {
        self.code.generators().len() + self.code.num_qubits()
    }

    /// Decodes one shot and judges its readout against the inputs.
    pub fn interpret(
        &self,
        syndrome: Syndrome,
        data: &[bool],
        injected: PauliString,
        applied_errors: Vec<(usize, Pauli)>,
    ) -> Result<TrialResult, QecError> {
        if data.len() != self.code.num_qubits() {
            return Err(QecError::InvalidArgument(format!(
                "readout has {} bits, code has {} qubits",
                data.len(),
                self.code.num_qubits()
            )));
        }
        let decoding = self.decoder.decode(&syndrome)?;
        let recovered = self.experiment.recover(data, &decoding.correction);
        Ok(TrialResult {
            matched_expected: recovered == self.config.inputs,
            description: decoding.description(),
            syndrome,
            status: decoding.status,
            applied_correction: decoding.correction,
            recovered_logical: recovered,
            injected,
            applied_errors,
        })
    }

    /// Decodes a record of `syndrome ++ data` bits, as stored in shot files.
    pub fn interpret_record(&self, record: &BitSlice<u8, Lsb0>) -> Result<TrialResult, QecError> {
        let m = self.code.generators().len();
        let n = self.code.num_qubits();
        if record.len() < self.record_len() {
            return Err(QecError::InvalidArgument(format!(
                "record has {} bits, expected {}",
                record.len(),
                m + n
            )));
        }
        let syndrome = Syndrome::from_bitslice(&record[..m]);
        let data: Vec<bool> = record[m..m + n].iter().by_vals().collect();
        self.interpret(syndrome, &data, PauliString::identity(n), Vec::new())
    }

    /// Runs `shots` independent trials in parallel.
    pub fn evaluate<B: SimulationBackend + ?Sized>(&self, backend: &B) -> Result<RunStatistics, QecError> {
        let stats = (0..self.config.shots)
            .into_par_iter()
            .map(|trial| (trial, self.run_trial(backend, trial)))
            .try_fold(RunStatistics::new, |mut acc, (trial, result)| {
                match result {
                    Ok(r) => acc.record(&r),
                    Err(QecError::BackendTransientFailure(msg)) => {
                        warn!(trial, %msg, "dropping trial after transient backend failure");
                        acc.record_dropped(1);
                    }
                    Err(e) => return Err(e),
                }
                Ok(acc)
            })
            .try_reduce(RunStatistics::new, |mut a, b| {
                a.merge(b);
                Ok(a)
            })?;

        self.log_summary(&stats);
        Ok(stats)
    }

    /// Runs every shot in one backend call and decodes the histogram.
    ///
    /// Requires an injection that is the same in every shot.
    pub fn tally_histogram<B: SimulationBackend + ?Sized>(
        &self,
        backend: &B,
    ) -> Result<RunStatistics, QecError> {
        if !self.config.injection.is_fixed() {
            return Err(QecError::InvalidArgument(
                "histogram tallying needs an injection that is the same in every shot".into(),
            ));
        }
        let mut rng = StdRng::seed_from_u64(trial_seed(self.config.seed, 0));
        let (injected, applied) = self.config.injection.sample(self.code.num_qubits(), &mut rng)?;
        let (circuit, layout) = self
            .experiment
            .build(&self.config.inputs, &injected, &self.noise)?;

        let mut stats = RunStatistics::new();
        match backend.submit(&circuit, self.config.shots, rng.next_u64()) {
            Ok(histogram) => {
                for (outcome, count) in histogram.iter() {
                    let (syndrome, data) = layout.split(outcome)?;
                    let result = self.interpret(syndrome, &data, injected.clone(), applied.clone())?;
                    stats.record_n(&result, count);
                }
            }
            Err(err) => match QecError::from(err) {
                QecError::BackendTransientFailure(msg) => {
                    warn!(shots = self.config.shots, %msg, "dropping batch after transient backend failure");
                    stats.record_dropped(self.config.shots);
                }
                fatal => return Err(fatal),
            },
        }

        self.log_summary(&stats);
        Ok(stats)
    }

    fn log_summary(&self, stats: &RunStatistics) {
        info!(
            code = self.code.name(),
            completed = stats.total_trials,
            attempted = stats.attempted(),
            successes = stats.successes,
            ambiguous = stats.ambiguous_trials,
            rate = stats.success_rate(),
            "run finished"
        );
    }
}

/// Runs one trial of `config` on `backend`.
pub fn run_trial<B: SimulationBackend + ?Sized>(
    code: &StabilizerCode,
    backend: &B,
    config: &RunConfig,
    trial: u64,
) -> Result<TrialResult, QecError> {
    TrialRunner::new(code, config.clone())?.run_trial(backend, trial)
}

/// Runs `config.shots` trials and aggregates them.
pub fn evaluate<B: SimulationBackend + ?Sized>(
    code: &StabilizerCode,
    backend: &B,
    config: &RunConfig,
) -> Result<RunStatistics, QecError> {
    TrialRunner::new(code, config.clone())?.evaluate(backend)
}

/// Runs `config.shots` shots as one backend call and aggregates the
/// decoded histogram.
pub fn tally_histogram<B: SimulationBackend + ?Sized>(
    code: &StabilizerCode,
    backend: &B,
    config: &RunConfig,
) -> Result<RunStatistics, QecError> {
    TrialRunner::new(code, config.clone())?.tally_histogram(backend)
}
