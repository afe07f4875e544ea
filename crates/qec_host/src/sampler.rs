//! Shot-record generation.
//!
//! Runs the configured trials in parallel and writes each completed trial's
//! `syndrome ++ data` record to a .b8 file for offline decoding with
//! `qec decode`.

use anyhow::Result;
use bitvec::prelude::*;
use qec_core::QecError;
use qec_core::backend::SimulationBackend;
use qec_core::runner::TrialRunner;
use qec_io::loader;
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Samples `runner`'s shots on `backend` and writes them to `path`.
///
/// Trials that fail transiently are skipped; returns the number of records
/// written.
pub fn sample_to_file<B: SimulationBackend + ?Sized>(
    runner: &TrialRunner<'_>,
    backend: &B,
    path: &Path,
) -> Result<usize> {
    let shots = runner.config().shots;
    let bits_per_shot = runner.record_len();
    println!(
        "Sampling {shots} shots of {} ({bits_per_shot} bits each)...",
        runner.code().name()
    );
    let start = Instant::now();

    let results: Vec<Result<BitVec<u8, Lsb0>, QecError>> = (0..shots)
        .into_par_iter()
        .map(|trial| runner.sample_record(backend, trial))
        .collect();

    let mut records = Vec::with_capacity(results.len());
    for (trial, result) in results.into_iter().enumerate() {
        match result {
            Ok(record) => records.push(record),
            Err(QecError::BackendTransientFailure(msg)) => {
                warn!(trial, %msg, "skipping shot after transient backend failure");
            }
            Err(e) => return Err(e.into()),
        }
    }

    loader::write_b8_file(path, records.iter().map(|r| r.as_bitslice()), bits_per_shot)?;
    info!(written = records.len(), path = %path.display(), "shot records written");
    println!(
        "Wrote {} records to {} in {:?}.",
        records.len(),
        path.display(),
        start.elapsed()
    );
    Ok(records.len())
}
