//! Plain-text reports for the command line.

use qec_core::code::StabilizerCode;
use qec_core::decoder::Decoder;
use qec_core::experiment::MemoryExperiment;
use qec_core::runner::TrialRunner;
use qec_core::stats::RunStatistics;
use serde_json::{Value, json};

pub fn print_codes(codes: &[StabilizerCode]) {
    println!("{:<12} {:<14} {:<14} {:<8} {}", "name", "parameters", "strategy", "errors", "readout");
    for code in codes {
        println!(
            "{:<12} {:<14} {:<14} {:<8} {}",
            code.name(),
            code.parameters(),
            code.strategy().to_string(),
            code.errors().to_string(),
            code.readout()
        );
    }
}

/// Success statistics followed by the most frequent syndromes.
pub fn print_run_report(runner: &TrialRunner<'_>, stats: &RunStatistics, top: usize) {
    let code = runner.code();
    let config = runner.config();
    let inputs: String = config
        .inputs
        .iter()
        .map(|&b| if b { '1' } else { '0' })
        .collect();

    println!("\nResults: {} {}", code.name(), code.parameters());
    println!("Input:      {inputs}");
    println!("Trials:     {}/{}", stats.total_trials, stats.attempted());
    if stats.dropped_trials > 0 {
        println!("Dropped:    {} (transient backend failures)", stats.dropped_trials);
    }
    println!("Successes:  {}", stats.successes);
    println!("Failures:   {}", stats.failures());
    println!("Ambiguous:  {}", stats.ambiguous_trials);
    println!("Success:    {:.4}", stats.success_rate());

    let rows = stats.by_frequency();
    if rows.is_empty() {
        return;
    }
    println!("Syndromes (top {} of {}):", top.min(rows.len()), rows.len());
    for (syndrome, tally) in rows.into_iter().take(top) {
        println!("  {syndrome}: {:>8}  {}", tally.count, tally.description);
    }
}

pub fn print_tables(code: &StabilizerCode, decoder: &Decoder) {
    println!("{} {} ({} decoding)", code.name(), code.parameters(), decoder.strategy());
    for table in decoder.tables() {
        let types: String = table.types().iter().map(|p| p.as_char()).collect();
        println!(
            "\nTable: {types} errors over generators {:?}, weight <= {}, {} syndromes",
            table.generators(),
            table.max_weight(),
            table.len()
        );
        for (syndrome, entry) in table.iter() {
            let flag = if entry.degenerate { "  (degenerate)" } else { "" };
            println!(
                "  {syndrome}  {}  w={}{flag}",
                entry.correction.to_sparse_string(),
                entry.weight
            );
        }
    }
}

pub fn table_json(decoder: &Decoder) -> Value {
    let tables: Vec<Value> = decoder
        .tables()
        .iter()
        .map(|table| {
            let entries: Vec<Value> = table
                .iter()
                .map(|(syndrome, entry)| json!({ "syndrome": syndrome, "entry": entry }))
                .collect();
            json!({
                "generators": table.generators(),
                "types": table.types(),
                "max_weight": table.max_weight(),
                "entries": entries,
            })
        })
        .collect();
    json!({ "strategy": decoder.strategy(), "tables": tables })
}

pub fn print_gadgets(code: &StabilizerCode, experiment: &MemoryExperiment<'_>) {
    println!("{} {}", code.name(), code.parameters());
    for (g, gadget) in code.generators().iter().zip(experiment.gadgets()) {
        println!("  {g}  {gadget}");
    }
}
