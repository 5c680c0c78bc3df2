//! `rule-tree`: learn a ruleset from a case file, then reason with it.

mod console;
mod loader;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::ConsoleProvider;
use itertools::Itertools;
use loader::{Layout, load_cases_from_path};
use rule_tree::conf::{BackwardMode, BranchPolicy, DEFAULT_RULESET_FILE};
use rule_tree::ruleset::{JsonFileStore, RuleSet, RuleSetStore};
use rule_tree::tree::TreeBuilder;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rule-tree")]
#[command(about = "Decision tree reasoning", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Where the ruleset is saved and loaded
    #[arg(long, global = true, default_value = DEFAULT_RULESET_FILE)]
    ruleset: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new ruleset from a .csv case file
    Create {
        /// Case file: attribute,value,flag_1..flag_n per line
        file: PathBuf,

        /// Branch on one boolean column per attribute=value pair
        #[arg(long)]
        binary: bool,
    },

    /// Forward reasoning
    Forward,

    /// Backward reasoning for a given conclusion value
    Backward {
        conclusion: String,

        /// Also confirm the remaining tests of the last candidate rule
        #[arg(long)]
        confirm: bool,
    },

    /// Print the learned tree
    Show,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rule_tree=info,rule_tree_cli=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn quoted<'a>(values: impl IntoIterator<Item = &'a rule_tree::AttributeValue>) -> String {
    values.into_iter().map(|v| format!("\"{v}\"")).join(", ")
}

fn load(store: &JsonFileStore) -> Result<RuleSet> {
    store
        .load()
        .with_context(|| format!("loading ruleset from {}", store.path().display()))
}

fn create(store: &JsonFileStore, file: &Path, binary: bool) -> Result<()> {
    let (layout, policy) = if binary {
        (Layout::Binary, BranchPolicy::Boolean)
    } else {
        (Layout::Categorical, BranchPolicy::Observed)
    };
    let table = load_cases_from_path(file, layout)?;
    info!(rows = table.height(), ?policy, "building ruleset");
    let ruleset = RuleSet::create(&table, &TreeBuilder::new(policy))?;
    store
        .save(&ruleset)
        .with_context(|| format!("saving ruleset to {}", store.path().display()))?;

    println!("Saved ruleset to {}", store.path().display());
    println!(
        "Possible conclusions are: {}",
        quoted(ruleset.possible_conclusions())
    );
    Ok(())
}

fn forward(store: &JsonFileStore) -> Result<()> {
    let ruleset = load(store)?;
    println!("Forward reasoning:");
    let conclusion = ruleset.forward(&mut ConsoleProvider::stdio())?;
    println!();
    println!("\"{conclusion}\" is the conclusion for given predicates");
    Ok(())
}

fn backward(store: &JsonFileStore, goal: &str, confirm: bool) -> Result<()> {
    let ruleset = load(store)?;
    let known = ruleset
        .possible_conclusions()
        .iter()
        .any(|c| c.matches_input(goal));
    if !known {
        println!("\"{goal}\" is not a valid conclusion");
        return Ok(());
    }

    let mode = if confirm {
        BackwardMode::Confirm
    } else {
        BackwardMode::Narrow
    };
    println!("Backward reasoning for \"{goal}\":");
    let reachable = ruleset.backward_with(goal, mode, &mut ConsoleProvider::stdio())?;
    println!();
    if reachable {
        println!("\"{goal}\" is a valid conclusion for given predicates");
    } else {
        println!("\"{goal}\" is NOT a valid conclusion for given predicates");
    }
    Ok(())
}

fn show(store: &JsonFileStore) -> Result<()> {
    let ruleset = load(store)?;
    println!("Conclusion: \"{}\"", ruleset.conclusion);
    println!(
        "Depth {}, {} rules",
        ruleset.tree.depth(),
        ruleset.tree.n_leaves()
    );
    println!();
    print!("{}", ruleset.tree);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let store = JsonFileStore::new(&cli.ruleset);
    match &cli.command {
        Commands::Create { file, binary } => create(&store, file, *binary),
        Commands::Forward => forward(&store),
        Commands::Backward {
            conclusion,
            confirm,
        } => backward(&store, conclusion, *confirm),
        Commands::Show => show(&store),
    }
}
