use aboutinfo::collectors::release::parse_release_file;
use aboutinfo::util::report;
use aboutinfo::{AboutSettings, Config};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "aboutinfo", about = "Device version, identifier and storage summary", version)]
struct Cli {
    /// Print the snapshot as JSON instead of a text report
    #[arg(long)]
    json: bool,

    /// Parse any KEY=value release file and print the mapping as JSON
    #[arg(long, value_name = "FILE")]
    release: Option<PathBuf>,

    /// Use this config file instead of the per-user one
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print config file path and current values, then exit
    #[arg(long)]
    print_config: bool,

    /// Log more (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(path) = &cli.release {
        let map = parse_release_file(path);
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    let cfg = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None       => Config::load(),
    };

    if cli.print_config {
        return run_print_config(&cfg, cli.config.as_ref());
    }

    let snap = AboutSettings::new(&cfg).snapshot();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snap)?);
    } else {
        print!("{}", report::generate(&snap));
    }
    Ok(())
}

fn run_print_config(cfg: &Config, explicit: Option<&PathBuf>) -> Result<()> {
    let path = explicit.cloned().or_else(Config::config_path);
    match path {
        Some(p) => println!("# {}", p.display()),
        None    => println!("# (no config directory)"),
    }
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}

/// Logs go to stderr so `--json` output stays machine-readable.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("aboutinfo={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
