use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crossgrid::{
    entry_summaries, play_script, render_board, render_entries, render_status, PlayerConfig,
};
use crossgrid_core::{Controller, Grid, Solver, WordList};

#[derive(Parser)]
#[command(name = "crossgrid")]
#[command(about = "Crossword grid numbering and solving navigation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Player configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a grid with its labels and entry list
    Show {
        /// Grid template file (one row per line, '.' for blocks)
        grid: PathBuf,
        /// Emit the entry list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replay a key script and print the resulting board
    Play {
        /// Grid template file
        grid: PathBuf,
        /// Key script, e.g. "cat<tab>tar<s-tab>"
        #[arg(short, long)]
        keys: String,
    },
    /// Read key scripts line by line from stdin
    Repl {
        /// Grid template file
        grid: PathBuf,
    },
    /// Fill the grid's blanks from a word list
    Fill {
        /// Grid template file
        grid: PathBuf,
        /// Word list, one `word` or `word;score` per line
        #[arg(short, long)]
        words: PathBuf,
        /// Words tried per entry once a fill is known
        #[arg(long, default_value_t = 10)]
        max_branch: usize,
    },
}

fn load_grid(path: &Path, config: &PlayerConfig) -> anyhow::Result<Grid> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading grid {}", path.display()))?;
    config
        .base()
        .parse_grid(&text)
        .with_context(|| format!("parsing grid {}", path.display()))
}

fn show(grid: Grid, config: PlayerConfig, json: bool) -> anyhow::Result<()> {
    let controller = Controller::new(grid, config.base().clone())?;
    let session = controller.session();
    let summaries = entry_summaries(session.grid(), session.index());
    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }
    print!("{}", render_board(session, &config));
    println!();
    print!("{}", render_entries(&summaries));
    Ok(())
}

fn play(grid: Grid, config: PlayerConfig, keys: &str) -> anyhow::Result<()> {
    let mut controller = Controller::new(grid, config.base().clone())?;
    play_script(&mut controller, keys)?;
    print!("{}", render_board(controller.session(), &config));
    println!("{}", render_status(controller.session()));
    if let Some(word) = &controller.context().duplicate_answer {
        println!("warning: {word} is already used in the grid");
    }
    Ok(())
}

fn run_repl(grid: Grid, config: PlayerConfig) -> anyhow::Result<()> {
    let mut controller = Controller::new(grid, config.base().clone())?;
    println!("crossgrid: type a key script and press Enter (e.g. abc<tab>)");
    println!("Ctrl-D to exit.");
    print!("{}", render_board(controller.session(), &config));

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        match play_script(&mut controller, &line) {
            Ok(_) => {
                print!("{}", render_board(controller.session(), &config));
                println!("{}", render_status(controller.session()));
                if controller.context().filled {
                    println!("grid filled");
                }
            }
            Err(e) => eprintln!("error: {e:#}"),
        }
        io::stdout().flush()?;
    }
    Ok(())
}

fn fill(grid: Grid, config: &PlayerConfig, words: &Path, max_branch: usize) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(words)
        .with_context(|| format!("reading word list {}", words.display()))?;
    let words = WordList::parse(&text)
        .with_context(|| format!("parsing word list {}", words.display()))?;
    match Solver::new(&words).with_max_branch(max_branch).solve(&grid) {
        Some(solution) => {
            println!("{}", config.base().grid_text(&solution.grid));
            println!("cost {:.3}", solution.cost);
            Ok(())
        }
        None => anyhow::bail!("no fill found with {} words", words.len()),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => PlayerConfig::load(path)?,
        None => PlayerConfig::default(),
    };

    match cli.command {
        Commands::Show { grid, json } => show(load_grid(&grid, &config)?, config, json),
        Commands::Play { grid, keys } => play(load_grid(&grid, &config)?, config, &keys),
        Commands::Repl { grid } => run_repl(load_grid(&grid, &config)?, config),
        Commands::Fill {
            grid,
            words,
            max_branch,
        } => fill(load_grid(&grid, &config)?, &config, &words, max_branch),
    }
}
