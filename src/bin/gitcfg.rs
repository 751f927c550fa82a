//! gitcfg CLI
//!
//! Loads a config file, applies one command, and saves it back when the
//! command changed anything.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use gitcfg::{Config, Result, Store};
use tracing_subscriber::{fmt, EnvFilter};

/// gitcfg CLI
#[derive(Parser, Debug)]
#[command(name = "gitcfg")]
#[command(about = "Read and edit git-style sectioned config files")]
#[command(version)]
struct Args {
    /// Config file to operate on
    #[arg(short, long, default_value = "./.gitcfg")]
    file: PathBuf,

    /// Indentation written before each variable
    #[arg(long, default_value = "\t\t")]
    indent: String,

    /// Quote used around sub-section names when writing
    #[arg(long, default_value = "'")]
    quote: char,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a value (empty when absent)
    Get {
        /// Composed key, e.g. user.name or merge.tool.path
        key: String,
    },

    /// Set a value
    Set {
        /// Composed key
        key: String,

        /// The value to set
        value: Option<String>,
    },

    /// Remove a variable
    Unset {
        /// Composed key
        key: String,
    },

    /// Remove a section (`root` or `root.sub`)
    RemoveSection {
        name: String,
    },

    /// Rename a section; a dotted new name moves it under another root
    RenameSection {
        old: String,
        new: String,
    },

    /// List variables as key=value
    List {
        /// Only list variables under `root` or `root.sub`
        prefix: Option<String>,
    },

    /// Print the rendered file
    Show,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,gitcfg=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::builder()
        .indent(args.indent)
        .subsection_quote(args.quote)
        .build();

    let mut store = Store::with_config(config);
    match store.load(&args.file) {
        Ok(()) => {}
        Err(e) if e.is_not_found() => {
            tracing::debug!(path = %args.file.display(), "Config file absent, starting empty");
        }
        Err(e) => return Err(e),
    }

    let changed = match args.command {
        Commands::Get { key } => {
            println!("{}", store.get(&key)?);
            false
        }
        Commands::Set { key, value } => {
            store.try_set(&key, value.as_deref())?;
            true
        }
        Commands::Unset { key } => {
            store.remove(&key)?;
            true
        }
        Commands::RemoveSection { name } => {
            store.remove_section(&name)?;
            true
        }
        Commands::RenameSection { old, new } => {
            store.rename_section(&old, &new)?;
            true
        }
        Commands::List { prefix } => {
            let variables = match prefix {
                Some(prefix) => store.variables_in(&prefix),
                None => store.variables(),
            };
            for (key, value) in variables {
                println!("{key}={value}");
            }
            false
        }
        Commands::Show => {
            print!("{}", store.text_content());
            false
        }
    };

    if changed {
        store.save(&args.file)?;
    }

    Ok(())
}
