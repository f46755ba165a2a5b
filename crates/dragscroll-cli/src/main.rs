use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dragscroll_core::CarouselConfig;

mod commands;

#[derive(Parser)]
#[command(name = "dragscroll")]
#[command(author, version, about = "Drag, snap and autoplay engine for scrollable carousels")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Carousel config file (defaults to ~/.config/dragscroll/carousel.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the breakpoint and resolved layout for a viewport width
    Breakpoint {
        /// Viewport width in pixels
        width: f64,
    },
    /// Replay a scripted gesture session and print every notification as JSON
    Simulate {
        /// JSON script with a surface and timed steps
        script: PathBuf,
    },
    /// Run the carousel in real time with autoplay until Ctrl-C
    Play {
        /// Stop after this many slide changes
        #[arg(short = 't', long)]
        ticks: Option<u64>,
        /// Number of slides in the demo container
        #[arg(short = 'n', long, default_value_t = 5)]
        slides: usize,
        /// Autoplay interval in seconds, overriding the config
        #[arg(short = 'i', long)]
        interval: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CarouselConfig::load(path)?,
        None => CarouselConfig::load_default()?,
    };

    match cli.command {
        Commands::Breakpoint { width } => commands::breakpoint::run(&config, width),
        Commands::Simulate { script } => commands::simulate::run(config, &script),
        Commands::Play {
            ticks,
            slides,
            interval,
        } => commands::play::run(config, slides, interval, ticks).await,
    }
}
