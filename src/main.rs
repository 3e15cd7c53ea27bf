//! RANGESCOPE - minimap navigator for large binary files.
//!
//! Maps a file, drives the minimap hierarchy with one command and prints the
//! resulting levels.

#![warn(clippy::all)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use rangescope::config::{
    DEFAULT_LADDER_GROW_FACTOR, DEFAULT_LADDER_SELECTION_SIZE, DEFAULT_MIN_SELECTION_FRACTION,
    DEFAULT_SAMPLE_COUNT,
};
use rangescope::util::color::tint;
use rangescope::util::{format_bytes, parse_offset};
use rangescope::{ByteSampler, HierarchyConfig, MinimapPanel};

#[derive(Parser, Debug)]
#[command(name = "rangescope", version, about = "Navigate a binary file through nested minimaps")]
struct Args {
    /// File to inspect
    file: PathBuf,

    /// Smallest window a level may show, as a fraction of its parent
    #[arg(long, default_value_t = DEFAULT_MIN_SELECTION_FRACTION)]
    fraction: f64,

    /// Slots per minimap
    #[arg(long, default_value_t = DEFAULT_SAMPLE_COUNT)]
    slots: usize,

    /// Use the entropy color scheme
    #[arg(long)]
    entropy: bool,

    /// Print the rows the hex view ends up showing
    #[arg(long)]
    dump: bool,

    /// Log level (RUST_LOG takes precedence)
    #[arg(long, default_value = "info")]
    log_level: Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Zoom onto START..END (decimal or 0x hex)
    Select {
        #[arg(value_parser = parse_offset)]
        start: u64,
        #[arg(value_parser = parse_offset)]
        end: u64,
    },
    /// Build a zoom ladder anchored at the start of the file
    Ladder {
        /// Selection size of the finest level
        #[arg(long, value_parser = parse_offset, default_value_t = DEFAULT_LADDER_SELECTION_SIZE)]
        size: u64,
        /// Size ratio between consecutive levels
        #[arg(long, default_value_t = DEFAULT_LADDER_GROW_FACTOR)]
        grow: f64,
    },
    /// Build the default ladder, then scroll the hex view to OFFSET
    Scroll {
        #[arg(value_parser = parse_offset)]
        offset: u64,
    },
    /// Print the initial single-level hierarchy
    Show,
}

fn init_tracing(level: Level) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_level);

    let config = HierarchyConfig {
        min_selection_fraction: args.fraction,
        sample_count: args.slots,
        ..HierarchyConfig::default()
    };
    let config = match &args.command {
        Command::Ladder { size, grow } => HierarchyConfig {
            ladder_selection_size: *size,
            ladder_grow_factor: *grow,
            ..config
        },
        _ => config,
    };
    config.validate().context("invalid hierarchy configuration")?;

    let sampler = ByteSampler::open(&args.file, config.sample_count)
        .with_context(|| format!("cannot load {}", args.file.display()))?;
    info!(
        "Loaded {} ({})",
        args.file.display(),
        format_bytes(sampler.source_len())
    );

    let mut panel = MinimapPanel::new(sampler, config);
    if args.entropy {
        panel.toggle_mode();
    }

    match args.command {
        Command::Select { start, end } => {
            panel.request_select_range(start, end);
        }
        Command::Ladder { .. } => panel.request_ladder(),
        Command::Scroll { offset } => {
            panel.request_ladder();
            panel.scroll_hex(offset);
        }
        Command::Show => {}
    }

    print_levels(&panel);
    if args.dump {
        print!("{}", panel.visible_dump());
    }
    Ok(())
}

fn print_levels(panel: &MinimapPanel<ByteSampler>) {
    let hierarchy = panel.hierarchy();
    println!(
        "{} level(s), mode {}",
        hierarchy.level_count(),
        hierarchy.mode().name()
    );
    for (index, level) in hierarchy.levels().iter().enumerate() {
        let view = level.range();
        let selected = level.selected_range();
        let [r, g, b, _] = tint(level.color()).to_array();
        println!(
            "L{index}  view {view} {:>10}  selected {selected} {:>10}  #{r:02x}{g:02x}{b:02x}",
            format_bytes(view.len()),
            format_bytes(selected.len()),
        );
    }
    println!("selection {}", panel.selection());
}
