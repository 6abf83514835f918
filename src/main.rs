use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use paymo_core::PolicyTier;
use paymo_io::layout::DEFAULT_SUITE_DIR;
use paymo_io::{RunConfig, RunInputs, Runner};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Flags payments between parties with no close history of paying each other
#[derive(Parser, Debug)]
#[command(name = "antifraud")]
#[command(about = "Classify streamed payments as trusted or unverified", long_about = None)]
struct Args {
    /// Batch payment file used to build the relationship graph
    batch: Option<PathBuf>,

    /// Stream payment file to classify
    stream: Option<PathBuf>,

    /// Folder receiving output1.txt, output2.txt and output3.txt
    output_dir: Option<PathBuf>,

    /// Run a named test case (<suite-dir>/<name>/paymo_input) instead of explicit paths
    #[arg(long)]
    test_case: Option<String>,

    /// Root folder of the test suite
    #[arg(long, default_value = DEFAULT_SUITE_DIR)]
    suite_dir: PathBuf,

    /// Policy tier to run, repeatable (feature1, feature2, feature3). Defaults to all
    #[arg(long = "tier", value_name = "TIER")]
    tiers: Vec<PolicyTier>,

    /// Input files have no header line
    #[arg(long)]
    no_header: bool,

    /// Stream each tier from disk one line at a time instead of classifying in parallel
    #[arg(long)]
    sequential: bool,

    /// Worker threads for parallel classification (default: one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Write a JSON run report to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn inputs(&self) -> RunInputs {
        match (&self.test_case, &self.batch, &self.stream, &self.output_dir) {
            (Some(name), None, None, None) => RunInputs::from_test_case(&self.suite_dir, name),
            (None, Some(batch), Some(stream), Some(output_dir)) => RunInputs::new(batch, stream, output_dir),
            _ => Args::command()
                .error(
                    ErrorKind::MissingRequiredArgument,
                    "give either <BATCH> <STREAM> <OUTPUT_DIR> or --test-case <NAME>",
                )
                .exit(),
        }
    }

    fn config(&self) -> RunConfig {
        let defaults = RunConfig::default();
        RunConfig {
            skip_header: !self.no_header,
            parallel: !self.sequential,
            tiers: if self.tiers.is_empty() {
                defaults.tiers
            } else {
                self.tiers.clone()
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let inputs = args.inputs();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // RUST_LOG, when set, takes precedence over --log-level
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(log_level).into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new().num_threads(threads).build_global()?;
    }

    info!("Starting antifraud v{}", env!("CARGO_PKG_VERSION"));
    info!("Batch file: {:?}", inputs.batch);
    info!("Stream file: {:?}", inputs.stream);
    info!("Output folder: {:?}", inputs.output_dir);

    let runner = Runner::new(args.config())?;
    let report = runner.run(&inputs)?;

    if let Some(path) = &args.report {
        report.write_json(path)?;
        info!("Run report written to {:?}", path);
    }

    info!("Done");
    Ok(())
}
