use std::fs;
use std::path::PathBuf;

use agecalc::age;
use agecalc::background::Backdrop;
use agecalc::config::Config;
use agecalc::speech::{CommandSpeaker, Speaker};
use agecalc::svg::{self, Theme};
use agecalc::{AgeReport, Summary};
use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::{ArgAction, Parser};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "agecalc", version, about = "Calculate elapsed age between two dates")]
struct Cli {
    /// Birth date (YYYY-MM-DD).
    #[arg(long)]
    birth: Option<String>,

    /// Reference date (YYYY-MM-DD).
    #[arg(long, conflicts_with = "today")]
    reference: Option<String>,

    /// Use today's local date as the reference date.
    #[arg(long)]
    today: bool,

    /// Print a flat-rate summary line (repeatable).
    #[arg(long = "show", value_enum)]
    show: Vec<Summary>,

    /// Read the result aloud with the configured speech program.
    #[arg(long)]
    speak: bool,

    /// Print the full report as JSON.
    #[arg(long)]
    json: bool,

    /// Write an SVG age card to this path.
    #[arg(long)]
    svg: Option<PathBuf>,

    #[arg(long, value_enum)]
    theme: Option<Theme>,

    /// Switch to the other theme.
    #[arg(long)]
    toggle_theme: bool,

    /// Viewport width in px for the card.
    #[arg(long)]
    width: Option<u32>,

    /// Viewport height in px for the card.
    #[arg(long)]
    height: Option<u32>,

    /// Seed for the background numbers.
    #[arg(long)]
    seed: Option<u64>,

    /// Anchor dates at midnight UTC instead of local midnight.
    #[arg(long)]
    utc: bool,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli)?;

    let dates = if cli.today {
        age::read_input(cli.birth.as_deref()).map(|birth| (birth, Local::now().date_naive()))
    } else {
        age::read_inputs(cli.birth.as_deref(), cli.reference.as_deref())
    };

    let Some((birth, reference)) = dates else {
        tracing::debug!("no usable birth and reference date; nothing to calculate");
        return Ok(());
    };

    let report = if cli.utc {
        AgeReport::build(birth, reference, config.milestone_years, &Utc)
    } else {
        AgeReport::build(birth, reference, config.milestone_years, &Local)
    }
    .context("Failed to calculate age")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.sentence());
        for which in &cli.show {
            println!("{}", report.summary(*which));
        }
        if let Some(line) = report.milestone_line() {
            println!("{line}");
        }
    }

    if let Some(path) = &cli.svg {
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let backdrop = Backdrop::generate(config.glyphs, &mut rng);

        let canvas = svg::canvas_size(&report, (config.width, config.height));
        let glyphs = if config.width == 0 || config.height == 0 {
            Vec::new()
        } else {
            backdrop.layout(canvas.0, canvas.1)
        };

        let out = svg::generate_svg(&report, &glyphs, config.theme, canvas);
        fs::write(path, out).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), theme = ?config.theme, "wrote age card");
    }

    if cli.speak {
        let speaker = CommandSpeaker::new(&config.speech_program, config.speech_args.clone());
        speaker
            .speak(&report.sentence())
            .await
            .context("Failed to speak result")?;
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = if verbose > 0 {
        "agecalc=debug"
    } else {
        "agecalc=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file and environment, then command-line overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config =
        Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if cli.toggle_theme {
        config.theme = config.theme.toggled();
    }
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }

    config.validate()?;
    Ok(config)
}
