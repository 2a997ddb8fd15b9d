use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use txi::{
    CompressMode, EngineConfig, IndexManager, KindSet, SlotStatus, StructureKind, SENTINEL_BYTE,
};

#[derive(Parser)]
#[command(name = "txi")]
#[command(about = "In-memory text index construction engine")]
struct Cli {
    /// Input file to build structures over
    file: PathBuf,

    /// Structures to construct and retain (comma separated: sa,isa,phi,plcp,lcp)
    #[arg(short, long, default_value = "sa", value_delimiter = ',', value_parser = parse_kind)]
    structures: Vec<StructureKind>,

    /// Compress mode (none, delayed, compressed); defaults to the config value
    #[arg(short, long, value_parser = parse_mode)]
    compress: Option<CompressMode>,

    /// Engine configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Display base for positions (e.g. 1 for 1-indexed output)
    #[arg(long, default_value_t = 0)]
    base: u64,

    /// Append the sentinel terminator when the input lacks one
    #[arg(long)]
    add_sentinel: bool,

    /// Print per-structure statistics instead of the table
    #[arg(long)]
    stats: bool,
}

fn parse_kind(s: &str) -> Result<StructureKind, String> {
    s.parse()
}

fn parse_mode(s: &str) -> Result<CompressMode, String> {
    s.parse()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config: EngineConfig = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("invalid config file {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    let mut text = fs::read(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;
    if cli.add_sentinel && text.last() != Some(&SENTINEL_BYTE) {
        if memchr::memchr(SENTINEL_BYTE, &text).is_some() {
            eprintln!(
                "warning: input contains interior 0x00 bytes; suffix order treats them as content"
            );
        }
        text.push(SENTINEL_BYTE);
    }

    let requested: KindSet = cli.structures.iter().copied().collect();
    let mode = cli.compress.unwrap_or(CompressMode::Select);

    let mut manager = IndexManager::new(&text, &config)?;

    #[cfg(feature = "progress")]
    let spinner = {
        use indicatif::{ProgressBar, ProgressStyle};
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        spinner.set_message(format!("Constructing {requested:?}..."));
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        spinner
    };

    manager.require_set(requested, mode)?;

    #[cfg(feature = "progress")]
    spinner.finish_and_clear();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.stats {
        print_stats(&manager, &mut out)?;
    } else {
        manager.print(&mut out, cli.base)?;
    }
    Ok(())
}

fn print_stats(manager: &IndexManager<'_>, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "{:>6} | {:>12} | {:>10} | {:>5} | {:>12}",
        "kind", "state", "len", "bits", "heap bytes"
    )?;
    for stats in manager.stats() {
        let state = match stats.status {
            SlotStatus::Unbuilt => "unbuilt",
            SlotStatus::Built { compressed: true } => "compressed",
            SlotStatus::Built { compressed: false } => "built",
            SlotStatus::Discarded => "discarded",
            SlotStatus::Released => "released",
        };
        writeln!(
            out,
            "{:>6} | {:>12} | {:>10} | {:>5} | {:>12}",
            stats.kind.label(),
            state,
            stats.len,
            stats.width,
            stats.heap_bytes
        )?;
    }
    writeln!(out, "\ntext: {} bytes (sentinel included)", manager.len())?;
    Ok(())
}
