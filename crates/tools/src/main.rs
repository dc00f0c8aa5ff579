mod soak;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use game_core::{EnemyKind, GameConfig, LevelSnapshot, LevelState, Pos};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file overriding the default game configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the first level generated for a seed
    Map {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        /// Print the level snapshot as JSON instead of ASCII
        #[arg(long)]
        json: bool,
    },
    /// Drive a seeded run with random inputs and report what happened
    Soak {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long, default_value_t = 1000)]
        turns: u32,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Map { seed, json } => {
            let level = LevelState::with_seed(config, seed)
                .with_context(|| format!("Failed to generate a level for seed {seed}"))?;
            let snapshot = level.snapshot();
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print!("{}", render_ascii(&snapshot));
                println!("{}", snapshot.hud_line());
            }
        }
        Command::Soak { seed, turns, json } => {
            let summary = soak::run(config, seed, turns)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                summary.print();
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // Ignored when a logger is already installed.
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    GameConfig::from_toml_str(&text)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

/// The map with `@` for the player, `>` for the portal and the enemy initial on top.
fn render_ascii(snapshot: &LevelSnapshot) -> String {
    let mut rows: Vec<Vec<char>> = snapshot.map.iter().map(|row| row.chars().collect()).collect();
    let mut stamp = |pos: Pos, glyph: char| {
        if let Some(cell) = rows
            .get_mut(pos.row as usize)
            .and_then(|row| row.get_mut(pos.col as usize))
        {
            *cell = glyph;
        }
    };

    stamp(snapshot.portal, '>');
    for enemy in &snapshot.enemies {
        stamp(
            enemy.pos,
            match enemy.kind {
                EnemyKind::Zombie => 'Z',
                EnemyKind::Skeleton => 'S',
                EnemyKind::Vampire => 'V',
            },
        );
    }
    stamp(snapshot.player.pos, '@');

    rows.into_iter()
        .map(|row| {
            let mut line: String = row.into_iter().collect();
            line.push('\n');
            line
        })
        .collect()
}
