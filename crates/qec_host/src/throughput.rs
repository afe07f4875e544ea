use anyhow::Result;
use qec_core::runner::TrialRunner;
use qec_core::stats::RunStatistics;
use qec_io::loader;
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

/// Decodes every record in a .b8 file in parallel and reports throughput
/// when `verbose`.
pub fn decode_file(runner: &TrialRunner<'_>, b8_path: &Path, verbose: bool) -> Result<RunStatistics> {
    let bits_per_shot = runner.record_len();
    if verbose {
        println!("Loading Shots from {}...", b8_path.display());
    }
    let raw_bits = loader::load_b8_file(b8_path)?;
    let shots = loader::slice_shots(&raw_bits, bits_per_shot);
    if verbose {
        println!("Loaded {} shots.", shots.len());
        println!("Decoding (Parallel - Rayon)...");
    }

    let start = Instant::now();
    let stats = shots
        .par_iter()
        .map(|shot| runner.interpret_record(shot))
        .try_fold(RunStatistics::new, |mut acc, result| {
            acc.record(&result?);
            Ok::<_, qec_core::QecError>(acc)
        })
        .try_reduce(RunStatistics::new, |mut a, b| {
            a.merge(b);
            Ok(a)
        })?;

    if verbose {
        let seconds = start.elapsed().as_secs_f64();
        println!("Time: {:.4} s", seconds);
        println!("Throughput: {:.2} shots/s", shots.len() as f64 / seconds);
    }
    Ok(stats)
}
