//! Cholbench CLI
//!
//! Benchmarks external Cholesky solver binaries (hipSOLVER, rocSOLVER,
//! ScaLAPACK) by running each one's command template for a number of
//! trials, aggregating the measurements, comparing against the
//! ScaLAPACK baseline, and appending the results to JSONL and CSV logs.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use cholbench_harness::{BenchConfig, BenchHarness, HarnessError, Result};

#[derive(Parser, Debug)]
#[command(
    name = "cholbench",
    version,
    about = "Benchmark external Cholesky solver implementations",
    long_about = "Runs each configured solver command for a number of repeated trials, \
                  measures wall-clock time and peak memory, prefers the solver's \
                  self-reported timing when present, compares every method against the \
                  ScaLAPACK baseline, and appends the results to JSONL and CSV logs."
)]
struct Cli {
    /// Problem size (matrix dimension)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    n: u32,

    /// Block size for the distributed factorization
    #[arg(long, default_value_t = 256)]
    block: u32,

    /// Process-grid rows
    #[arg(long, default_value_t = 1)]
    p: u32,

    /// Process-grid columns
    #[arg(long, default_value_t = 1)]
    q: u32,

    /// Factorization iterations per solver invocation
    #[arg(long, default_value_t = 3)]
    iters: u32,

    /// Repeated trials per method
    #[arg(long, default_value_t = 1)]
    runs: u32,

    /// Peak hardware throughput in TFLOP/s for the theoretical estimate
    #[arg(long, default_value_t = 0.0)]
    peak_tflops: f64,

    /// Command template for the hipSOLVER backend
    #[arg(long, default_value = "./build/hip_cholesky --n {n} --iters {iters}")]
    hip_cmd: String,

    /// Command template for the rocSOLVER backend
    #[arg(long, default_value = "./build/roc_cholesky --n {n} --iters {iters}")]
    roc_cmd: String,

    /// Command template for the ScaLAPACK baseline
    #[arg(
        long,
        default_value = "mpirun -np {np} ./build/scalapack_cholesky --n {n} --nb {block} \
                         --p {p} --q {q} --iters {iters}"
    )]
    scalapack_cmd: String,

    /// Line-delimited results log
    #[arg(long, default_value = "output/bench_results.jsonl")]
    out_jsonl: PathBuf,

    /// Tabular results log
    #[arg(long, default_value = "output/bench_results.csv")]
    out_csv: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Quiet output (errors only)
    #[arg(long)]
    quiet: bool,
}

impl Cli {
    fn into_config(self) -> BenchConfig {
        BenchConfig {
            n: self.n,
            block: self.block,
            p: self.p,
            q: self.q,
            iters: self.iters,
            runs: self.runs,
            peak_tflops: self.peak_tflops,
            hip_cmd: self.hip_cmd,
            roc_cmd: self.roc_cmd,
            scalapack_cmd: self.scalapack_cmd,
            out_jsonl: self.out_jsonl,
            out_csv: self.out_csv,
        }
    }
}

fn main() -> ExitCode {
    // Missing or invalid arguments are exit 1, not clap's default 2;
    // exit 2 is reserved for a benchmarked process failing.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    if let Err(err) = init_logging(&cli) {
        eprintln!("Error: {err}");
        return ExitCode::from(1);
    }

    debug!("cholbench v{} starting", env!("CARGO_PKG_VERSION"));

    match run(cli.into_config()) {
        Ok(count) => {
            println!("{{\"status\":\"ok\",\"results\":{count}}}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            if let HarnessError::BenchmarkFailed { stderr, .. } = &err {
                if !stderr.is_empty() {
                    eprintln!("{stderr}");
                }
            }
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn run(config: BenchConfig) -> Result<usize> {
    config.validate()?;

    let mut harness = BenchHarness::new(config);
    harness.run_all()?;
    harness.write_results()?;
    Ok(harness.records().len())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
