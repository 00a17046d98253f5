//! # Textworld - Scripted Driver
//!
//! Builds a text world, drops one actor into it and replays a script of
//! action names, one per tick.
//!
//! ## Quick Start
//!
//! ```bash
//! # Walk into the first item and type
//! cargo run -- --script "itemEnter h i enter"
//!
//! # Use a config file describing the initial tree
//! cargo run -- --config world.toml --script "itemDown itemEnter x" -vv
//! ```

use anyhow::Context;
use clap::Parser;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use textworld_api::{Action, CycleFn, World};
use textworld_text::{Command, Config, TextWorld};

/// Textworld - drive a virtual filesystem one keystroke at a time
#[derive(Parser, Debug)]
#[command(name = "textworld")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file describing the world and its initial tree
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Whitespace-separated action names, stepped one per tick
    #[arg(short, long, default_value = "")]
    script: String,

    /// Number of ticks to run (defaults to the script length)
    #[arg(short, long)]
    ticks: Option<usize>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting Textworld v{}", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load(),
    };

    let mut world = TextWorld::with_config(&config);
    world.bootstrap(&config.entries)?;

    let (actor, catalog) = world.new_actor(&[]);
    let script = resolve_script(&args.script, &catalog)?;
    let ticks = args.ticks.unwrap_or(script.len());

    let refused = Rc::new(RefCell::new(Vec::new()));
    world.register(actor, scripted_cycle(script, Rc::clone(&refused)))?;

    for _ in 0..ticks {
        world.tick();
    }

    for name in refused.borrow().iter() {
        tracing::warn!("Action {} was not ready", name);
    }

    let report = serde_json::json!({
        "actor": actor,
        "position": world.position(actor),
        "look": world.look(actor),
        "files": world
            .tree()
            .iter()
            .filter(|item| item.is_file())
            .map(|item| {
                let path = world.tree().path_of(item.id()).unwrap_or_default();
                let text = world.tree().file_text(item.id()).unwrap_or_default();
                (path, text)
            })
            .collect::<std::collections::BTreeMap<_, _>>(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

/// Maps every script word to the actor's catalog entry.
fn resolve_script(
    script: &str,
    catalog: &[Action<Command>],
) -> anyhow::Result<VecDeque<Action<Command>>> {
    script
        .split_whitespace()
        .map(|word| {
            let command = Command::parse(word)?;
            catalog
                .iter()
                .find(|action| *action.command() == command)
                .cloned()
                .with_context(|| format!("{} is not in the action catalog", word))
        })
        .collect()
}

/// A cycle function that steps the next scripted action each tick.
fn scripted_cycle(
    mut script: VecDeque<Action<Command>>,
    refused: Rc<RefCell<Vec<String>>>,
) -> CycleFn<TextWorld> {
    Box::new(move |world: &mut TextWorld| {
        let Some(action) = script.pop_front() else {
            return;
        };
        if !world.act(&action) {
            refused.borrow_mut().push(action.name().to_string());
        }
    })
}
