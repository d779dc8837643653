mod ui;

use anyhow::Result;
use clap::Parser;
use clave::{Policy, generate_with, select_source};
use std::io::stderr;
use tracing::debug;
use tracing_subscriber::{
    EnvFilter, fmt::layer, layer::SubscriberExt, registry, util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(
    name = "clave",
    version,
    about = "Secure password generator with guaranteed character-class coverage"
)]
struct Cli {
    /// Length of each password
    #[arg(short, long, env = "CLAVE_LENGTH", default_value_t = clave::charset::DEFAULT_LENGTH)]
    length: usize,

    /// Number of passwords to generate
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    count: u16,

    /// Print passwords only, one per line
    #[arg(short, long)]
    quiet: bool,

    #[arg(
        long,
        env,
        default_value = "clave=warn",
        long_help = "Log filter (https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html#directives)"
    )]
    log_filter: String,
}

fn init_tracing(log_filter: &str) -> Result<()> {
    let filter = EnvFilter::builder().parse(log_filter)?;
    let sub = layer().with_writer(stderr);
    registry().with(filter).with(sub).try_init()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_filter)?;

    let policy = Policy::new(cli.length)?;

    let mut rng = select_source();
    let config = ui::OutputConfig {
        policy,
        source: rng.describe(),
        strength: rng.strength(),
    };
    debug!(length = policy.length(), count = cli.count, source = config.source, "generating");

    let passwords: Vec<_> = (0..cli.count)
        .map(|_| generate_with(rng.as_mut(), &policy))
        .collect();

    let options = ui::DisplayOptions {
        unicode_support: ui::detect_unicode_support(),
        color_support: ui::detect_color_support(),
        quiet: cli.quiet,
    };

    ui::display_output(&passwords, &config, &options);

    Ok(())
}
