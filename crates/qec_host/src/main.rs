mod report;
mod sampler;
mod throughput;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand};
use qec_core::backend::SimulationBackend;
use qec_core::channel::{ErrorChannel, NoiseModel};
use qec_core::code::StabilizerCode;
use qec_core::codes::CodeFamily;
use qec_core::decoder::Decoder;
use qec_core::experiment::MemoryExperiment;
use qec_core::pauli::{Pauli, PauliString};
use qec_core::runner::{Injection, RunConfig, TrialRunner};
use qec_io::parser;
use qec_sim::{FlakyBackend, TableauBackend};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "qec", about = "Stabilizer-code error-correction engine")]
struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace). Without it RUST_LOG applies.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CodeArgs {
    /// Catalog code (see `qec codes`).
    #[arg(short, long, default_value = "steane")]
    code: String,
    /// Read the code from a definition file instead of the catalog.
    #[arg(long)]
    code_file: Option<PathBuf>,
}

impl CodeArgs {
    fn load(&self) -> Result<StabilizerCode> {
        match &self.code_file {
            Some(path) => parser::load_code_file(path),
            None => Ok(qec_core::build_code(&self.code)?),
        }
    }
}

#[derive(Args)]
struct TrialArgs {
    #[command(flatten)]
    code: CodeArgs,
    /// Logical input bits, one per logical qubit (`0`, `1`, `10`, ...).
    #[arg(short, long)]
    input: Option<String>,
    /// Fixed error, dense (`IXIZI`) or sparse (`X1 Z3`).
    #[arg(short, long, conflicts_with_all = ["channel", "random_rate"])]
    error: Option<String>,
    /// Channel sampled on every data qubit, e.g. `depolarizing:0.05`.
    #[arg(long, conflicts_with = "random_rate")]
    channel: Option<String>,
    /// Per-qubit error probability with types drawn from `--random-types`.
    #[arg(long)]
    random_rate: Option<f64>,
    #[arg(long, default_value = "XYZ")]
    random_types: String,
    /// Backend noise after every gate, e.g. `depolarizing:0.001`.
    #[arg(long)]
    gate_noise: Option<String>,
    #[arg(short, long, default_value_t = 1024)]
    shots: u64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Decoder weight bound; defaults to (d - 1) / 2.
    #[arg(long)]
    max_weight: Option<usize>,
    /// Fail this fraction of backend submissions transiently.
    #[arg(long)]
    flaky: Option<f64>,
    /// Backend time limit per submission.
    #[arg(long)]
    timeout_ms: Option<u64>,
}

impl TrialArgs {
    fn config(&self, code: &StabilizerCode) -> Result<RunConfig> {
        let injection = if let Some(e) = &self.error {
            Injection::Fixed(parse_error(code.num_qubits(), e)?)
        } else if let Some(c) = &self.channel {
            Injection::Channel(c.parse::<ErrorChannel>()?)
        } else if let Some(rate) = self.random_rate {
            let types = self
                .random_types
                .chars()
                .map(Pauli::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            Injection::Random { rate, types }
        } else {
            Injection::None
        };
        let gate_noise = self
            .gate_noise
            .as_deref()
            .map(|c| c.parse::<ErrorChannel>().map(NoiseModel::new))
            .transpose()?;

        Ok(RunConfig {
            inputs: parse_inputs(self.input.as_deref(), code.num_logicals())?,
            injection,
            gate_noise,
            shots: self.shots,
            seed: self.seed,
            max_weight: self.max_weight,
        })
    }

    fn backend(&self) -> Result<Box<dyn SimulationBackend>> {
        let tableau = match self.timeout_ms {
            Some(ms) => TableauBackend::with_timeout(Duration::from_millis(ms)),
            None => TableauBackend::new(),
        };
        let backend: Box<dyn SimulationBackend> = match self.flaky {
            Some(rate) => Box::new(FlakyBackend::new(tableau, rate)?),
            None => Box::new(tableau),
        };
        Ok(backend)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the code catalog.
    Codes {
        /// Print one code in the definition-file format.
        #[arg(long)]
        export: Option<String>,
    },
    /// Run memory-experiment trials and report success statistics.
    Run {
        #[command(flatten)]
        trial: TrialArgs,
        /// Submit all shots as one backend call (fixed injections only).
        #[arg(long)]
        histogram: bool,
        /// Syndromes listed in the report.
        #[arg(long, default_value_t = 10)]
        top: usize,
        #[arg(long)]
        json: bool,
    },
    /// Print the decoder's syndrome tables.
    Table {
        #[command(flatten)]
        code: CodeArgs,
        #[arg(long)]
        max_weight: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Print the synthesized syndrome-extraction gadgets.
    Gadget {
        #[command(flatten)]
        code: CodeArgs,
        #[arg(long)]
        json: bool,
    },
    /// Write shot records (syndrome then data bits) to a .b8 file.
    Sample {
        #[command(flatten)]
        trial: TrialArgs,
        #[arg(short, long, default_value = "shots.b8")]
        out: PathBuf,
    },
    /// Decode a .b8 file of shot records in parallel.
    Decode {
        #[command(flatten)]
        code: CodeArgs,
        #[arg(short, long)]
        b8: PathBuf,
        /// Logical input bits the records were sampled with.
        #[arg(short, long)]
        input: Option<String>,
        #[arg(long)]
        max_weight: Option<usize>,
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

/// `0`/`1` string, one bit per logical qubit; all zeros when absent.
fn parse_inputs(input: Option<&str>, num_logicals: usize) -> Result<Vec<bool>> {
    let Some(s) = input else {
        return Ok(vec![false; num_logicals]);
    };
    let bits = s
        .trim()
        .chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => bail!("input bit '{other}' is not 0 or 1"),
        })
        .collect::<Result<Vec<_>>>()?;
    if bits.len() != num_logicals {
        bail!("code has {num_logicals} logical qubit(s), got {} input bit(s)", bits.len());
    }
    Ok(bits)
}

/// Dense (`IXIZI`) or sparse (`X1 Z3`) Pauli error on `num_qubits` qubits.
fn parse_error(num_qubits: usize, s: &str) -> Result<PauliString> {
    let s = s.trim();
    if !s.chars().any(|c| c.is_ascii_digit()) {
        let p: PauliString = s.parse()?;
        if p.num_qubits() != num_qubits {
            bail!("error '{s}' has {} qubits, code has {num_qubits}", p.num_qubits());
        }
        return Ok(p);
    }
    let mut terms = Vec::new();
    for token in s.split_whitespace() {
        let mut chars = token.chars();
        let pauli = chars
            .next()
            .map(Pauli::try_from)
            .transpose()?
            .context("empty error term")?;
        let qubit: usize = chars
            .as_str()
            .parse()
            .with_context(|| format!("error term '{token}' needs a qubit index"))?;
        terms.push((qubit, pauli));
    }
    Ok(PauliString::from_sparse(num_qubits, &terms)?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Codes { export } => match export {
            Some(name) => print!("{}", parser::format_code(&qec_core::build_code(&name)?)),
            None => {
                let codes = CodeFamily::ALL
                    .into_iter()
                    .map(CodeFamily::build)
                    .collect::<Result<Vec<_>, _>>()?;
                report::print_codes(&codes);
            }
        },
        Commands::Run {
            trial,
            histogram,
            top,
            json,
        } => {
            let code = trial.code.load()?;
            let runner = TrialRunner::new(&code, trial.config(&code)?)?;
            let backend = trial.backend()?;
            let stats = if histogram {
                runner.tally_histogram(&*backend)?
            } else {
                runner.evaluate(&*backend)?
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                report::print_run_report(&runner, &stats, top);
            }
        }
        Commands::Table {
            code,
            max_weight,
            json,
        } => {
            let code = code.load()?;
            let decoder = match max_weight {
                Some(t) => Decoder::with_max_weight(&code, t)?,
                None => Decoder::new(&code)?,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&report::table_json(&decoder))?);
            } else {
                report::print_tables(&code, &decoder);
            }
        }
        Commands::Gadget { code, json } => {
            let code = code.load()?;
            let experiment = MemoryExperiment::new(&code)?;
            if json {
                println!("{}", serde_json::to_string_pretty(experiment.gadgets())?);
            } else {
                report::print_gadgets(&code, &experiment);
            }
        }
        Commands::Sample { trial, out } => {
            let code = trial.code.load()?;
            let runner = TrialRunner::new(&code, trial.config(&code)?)?;
            let backend = trial.backend()?;
            sampler::sample_to_file(&runner, &*backend, &out)?;
        }
        Commands::Decode {
            code,
            b8,
            input,
            max_weight,
            json,
        } => {
            let code = code.load()?;
            let config = RunConfig {
                inputs: parse_inputs(input.as_deref(), code.num_logicals())?,
                max_weight,
                ..RunConfig::default()
            };
            let runner = TrialRunner::new(&code, config)?;
            let stats = throughput::decode_file(&runner, &b8, !json)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                report::print_run_report(&runner, &stats, 10);
            }
        }
    }
    Ok(())
}
