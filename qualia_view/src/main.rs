//! ═══════════════════════════════════════════════════════════════════════════════
//! QUALIA VIEW CLI — Sliders and Points in the Terminal
//! ═══════════════════════════════════════════════════════════════════════════════

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

use qualia_space::ElementId;
use qualia_view::{build_registry, display, plot_views, ViewConfig, ViewRunner};

#[derive(Parser)]
#[command(name = "qualia_view")]
#[command(about = "Toy qualia-space projection of two small causal complexes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Read configuration from this file instead of the default location
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// JSON file of complex definitions replacing the built-ins
    #[arg(long, global = true)]
    complexes: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every complex and its point (default)
    Show {
        /// Emit JSON instead of cards
        #[arg(long)]
        json: bool,
    },

    /// Apply activity changes, then show
    Set {
        /// Triples of <complex> <element> <level>
        #[arg(num_args = 3.., value_names = ["COMPLEX", "ELEMENT", "LEVEL"])]
        changes: Vec<String>,

        /// Plot instead of showing cards
        #[arg(long)]
        plot: bool,
    },

    /// Plot every point in the unit square
    Plot,

    /// Interactive slider session
    Interactive,

    /// Show or initialise configuration
    Config {
        /// Show effective config
        #[arg(long)]
        show: bool,

        /// Write the default config file
        #[arg(long)]
        init: bool,
    },
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<ViewConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = ViewConfig::load_from(path)?;
            config.apply_env();
            config
        }
        None => ViewConfig::load()?,
    };

    if let Some(path) = &cli.complexes {
        config.complexes_file = Some(path.clone());
    }
    if cli.no_color {
        config.color = false;
    }
    config.validate()?;
    Ok(config)
}

/// Split positional args into (complex, element, level) triples
fn parse_changes(args: &[String]) -> anyhow::Result<Vec<(String, ElementId, f64)>> {
    if args.len() % 3 != 0 {
        anyhow::bail!(
            "changes must come in <complex> <element> <level> triples, got {} values",
            args.len()
        );
    }
    args.chunks(3)
        .map(|chunk| {
            let element: u8 = chunk[1]
                .parse()
                .map_err(|_| anyhow::anyhow!("element id '{}' is not a number", chunk[1]))?;
            let level: f64 = chunk[2]
                .parse()
                .map_err(|_| anyhow::anyhow!("level '{}' is not a number", chunk[2]))?;
            Ok((chunk[0].clone(), ElementId(element), level))
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    display::set_color(config.color);

    match cli.command {
        None | Some(Commands::Show { json: false }) => {
            let registry = build_registry(&config)?;
            display::views(&registry.views());
        }

        Some(Commands::Show { json: true }) => {
            let registry = build_registry(&config)?;
            println!("{}", serde_json::to_string_pretty(&registry.views())?);
        }

        Some(Commands::Set { changes, plot }) => {
            let mut runner = ViewRunner::new(config.clone(), build_registry(&config)?);
            for (complex, element, level) in parse_changes(&changes)? {
                runner.set(&complex, element, level);
            }
            if plot {
                runner.plot();
            } else {
                display::views(&runner.registry().views());
            }
        }

        Some(Commands::Plot) => {
            let registry = build_registry(&config)?;
            let grid = plot_views(&registry.views(), config.plot_width, config.plot_height);
            display::plot(&grid);
        }

        Some(Commands::Interactive) => {
            let registry = build_registry(&config)?;
            let mut runner = ViewRunner::new(config, registry);
            runner.run()?;
        }

        Some(Commands::Config { show, init }) => {
            if init {
                let path = ViewConfig::default().save()?;
                println!("Default config written to {}", path.display());
            }
            if show || !init {
                println!("Config path: {}", ViewConfig::config_path().display());
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }
    }

    Ok(())
}
