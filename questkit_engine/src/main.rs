#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** questkit **
//! Command-line front end for the quest helper panels.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::info;

use questkit_engine::data_paths::data_path;
use questkit_engine::loader::questdef::{load_questdef, save_questdef};
use questkit_engine::loader::state::load_state;
use questkit_engine::style::PanelStyle;
use questkit_engine::{HelperConfig, PanelView, QUESTKIT_VERSION, QuestSession, build_quest, load_config, quests};

#[derive(Parser)]
#[command(author, version, about = "Step-by-step quest guidance panels.")]
struct Cli {
    /// Path to `questkit.toml`; defaults to the one in the data directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in quests.
    List,
    /// Resolve and render the current step for a state snapshot.
    Show {
        /// RON state snapshot exported by the host.
        #[arg(long)]
        state: PathBuf,
        #[arg(long, default_value = "enlightened-journey")]
        quest: String,
    },
    /// Print the panel groupings of a quest.
    Panels {
        #[arg(long, default_value = "enlightened-journey")]
        quest: String,
    },
    /// Validate the built-in quest, or a RON quest definition.
    Check {
        #[arg(long)]
        def: Option<PathBuf>,
    },
    /// Write the built-in quest definition as RON.
    Export {
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value = "enlightened-journey")]
        quest: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    info!("questkit v{QUESTKIT_VERSION} starting");
    let cli = Cli::parse();
    let config = load_config(&cli.config.unwrap_or_else(|| data_path("questkit.toml")));

    match cli.command {
        Commands::List => list(),
        Commands::Show { state, quest } => show(&config, &state, &quest)?,
        Commands::Panels { quest } => panels(&config, &quest)?,
        Commands::Check { def } => check(def.as_deref())?,
        Commands::Export { out, quest } => export(&out, &quest)?,
    }
    Ok(())
}

fn list() {
    for def in quests::all() {
        println!("{:<24} {}", def.quest.slug.bold(), def.quest.name);
    }
}

fn show(config: &HelperConfig, state_path: &Path, quest: &str) -> Result<()> {
    let quest = quests::load_builtin(quest)?;
    let state = load_state(state_path).context("while loading host state")?;
    let view = PanelView::new(config);

    let mut session = QuestSession::new(&quest, config.resolution);
    print!("{}", view.overview(&quest, &state));
    match session.refresh(&state) {
        Ok(step) => {
            print!("{}", view.current_step(step, &state));
            println!();
            print!("{}", view.panels(&quest, session.current_key(), &state));
        },
        Err(err) => print!("{}", view.resolve_error(&err)),
    }
    Ok(())
}

fn panels(config: &HelperConfig, quest: &str) -> Result<()> {
    let quest = quests::load_builtin(quest)?;
    let view = PanelView::new(config);
    print!("{}", view.panels(&quest, None, &questkit_engine::StateSnapshot::default()));
    Ok(())
}

fn check(def_path: Option<&Path>) -> Result<()> {
    let def = match def_path {
        Some(path) => load_questdef(path)?,
        None => quests::enlightened_journey::quest_def(),
    };
    let errors = questkit_data::validate_quest(&def);
    if errors.is_empty() {
        let quest = build_quest(&def)?;
        println!(
            "{} '{}' is consistent ({} checkpoints, {} panels)",
            "ok:".satisfied_style(),
            quest.name,
            quest.steps().len(),
            quest.panels().len()
        );
        return Ok(());
    }
    for err in &errors {
        println!("{} {err}", "error:".error_style());
    }
    bail!("{} problem(s) found in '{}'", errors.len(), def.quest.name);
}

fn export(out: &Path, quest: &str) -> Result<()> {
    let def = quests::find(quest).with_context(|| format!("no built-in quest named '{quest}'"))?;
    save_questdef(&def, out)?;
    println!("wrote '{}' to {}", def.quest.name, out.display());
    Ok(())
}
