use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use frame_transitions::{
    composition::TransitionEngine,
    config::Config,
    transitions::{TransitionKind, WipeAxis},
    TransitionsError,
};

#[derive(Parser)]
#[command(
    name = "frame-transitions",
    version,
    about = "Render classic video transitions over directories of frames",
    long_about = "Frame-Transitions reads numbered image frames from one or two directories, renders a cut, dissolve, fade, iris or wipe between them, and writes the result as numbered images."
)]
struct Cli {
    /// Configuration file (optional)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Worker threads, overrides the configuration
    #[arg(short, long, global = true)]
    threads: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Switch from the first clip to the second at a pivot frame
    Cut {
        #[arg(long)]
        first: PathBuf,
        #[arg(long)]
        second: PathBuf,
        /// Index of the first frame taken from the second clip
        #[arg(long)]
        pivot: usize,
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Cross-dissolve from the first clip to the second
    Dissolve {
        #[arg(long)]
        first: PathBuf,
        #[arg(long)]
        second: PathBuf,
        /// Additive bias applied to every pixel
        #[arg(long)]
        gamma: Option<f32>,
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Fade a clip out to black, or in from black with --fade-in
    Fade {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(long)]
        fade_in: bool,
        /// Additive bias applied to every pixel
        #[arg(long)]
        gamma: Option<f32>,
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Close a clip through a shrinking circle, or open it with --iris-in
    Iris {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(long)]
        iris_in: bool,
        /// Soften the circle edge with a Gaussian blur
        #[arg(long)]
        smooth: bool,
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Wipe from the first clip to the second
    Wipe {
        #[arg(long)]
        first: PathBuf,
        #[arg(long)]
        second: PathBuf,
        /// Direction of travel (horizontal, vertical)
        #[arg(long)]
        axis: Option<WipeAxis>,
        #[arg(long)]
        reverse: bool,
        #[arg(short, long)]
        output: PathBuf,
    },
}

impl Command {
    /// Build the transition and its inputs, filling gaps from `config`
    fn into_job(self, config: &Config) -> (TransitionKind, Vec<PathBuf>, PathBuf) {
        let defaults = &config.defaults;
        match self {
            Command::Cut { first, second, pivot, output } => {
                (TransitionKind::Cut { pivot }, vec![first, second], output)
            }
            Command::Dissolve { first, second, gamma, output } => (
                TransitionKind::Dissolve { gamma: gamma.unwrap_or(defaults.gamma) },
                vec![first, second],
                output,
            ),
            Command::Fade { input, fade_in, gamma, output } => (
                TransitionKind::Fade { gamma: gamma.unwrap_or(defaults.gamma), fade_in },
                vec![input],
                output,
            ),
            Command::Iris { input, iris_in, smooth, output } => {
                let smoothing = if smooth {
                    Some(defaults.iris_smoothing.unwrap_or_default())
                } else {
                    defaults.iris_smoothing
                };
                (TransitionKind::Iris { iris_in, smoothing }, vec![input], output)
            }
            Command::Wipe { first, second, axis, reverse, output } => (
                TransitionKind::Wipe { axis: axis.unwrap_or(defaults.wipe_axis), reverse },
                vec![first, second],
                output,
            ),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging, RUST_LOG wins when set
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Frame-Transitions v{}", env!("CARGO_PKG_VERSION"));
    run(cli).await.map_err(report)
}

async fn run(cli: Cli) -> frame_transitions::Result<()> {
    // Load configuration
    let mut config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };
    if let Some(threads) = cli.threads {
        config.processing.threads = threads;
    }

    let (kind, inputs, output) = cli.command.into_job(&config);
    info!("Transition: {}", kind.name());
    info!("Inputs: {:?}", inputs);
    info!("Output: {:?}", output);

    let engine = TransitionEngine::new(config)?;
    let saved = engine.compose(&kind, &inputs, &output).await?;

    info!("Done! {} frames written to {:?}", saved.frame_count, saved.dir);
    Ok(())
}

/// Turn a library error into the message shown on exit
fn report(err: TransitionsError) -> anyhow::Error {
    debug!("{:?}", err);
    anyhow::anyhow!(err.user_message())
}
