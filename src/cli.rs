//! Command-line interface for cfg-editor.
//!
//! Each subcommand opens a headless editor on one list setting, performs a
//! single user action through the editor's own dialogs and prints the
//! resulting list.

use crate::file_store::FileStore;
use crate::headless::{HeadlessSession, Outcome};
use anyhow::{Context, Result};
use cfg_editor_config::{SchemaCatalog, SettingSchema, paths};
use cfg_editor_settings_ui::ListView;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// cfg-editor - Edit string-array configuration settings
#[derive(Parser, Debug)]
#[command(name = "cfg-editor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Schema catalog (default: ~/.config/cfg-editor/schema.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Stored settings file (default: ~/.config/cfg-editor/settings.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Set debug log level (overrides RUST_LOG and DEBUG_LEVEL)
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the settings declared in the schema catalog
    List,

    /// Show the rows of a setting
    Show {
        key: String,
        /// Print the row model as JSON
        #[arg(long)]
        json: bool,
    },

    /// Append a value
    Add { key: String, value: String },

    /// Replace the value at INDEX
    Edit {
        key: String,
        index: usize,
        value: String,
    },

    /// Move the value at INDEX one row up
    MoveUp { key: String, index: usize },

    /// Move the value at INDEX one row down
    MoveDown { key: String, index: usize },

    /// Delete the value at INDEX
    Delete {
        key: String,
        index: usize,
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Copy the profile or domain at INDEX (and its settings) to NEW_ID
    Copy {
        key: String,
        index: usize,
        new_id: String,
    },
}

impl Commands {
    /// Setting the command operates on
    pub fn key(&self) -> Option<&str> {
        match self {
            Commands::List => None,
            Commands::Show { key, .. }
            | Commands::Add { key, .. }
            | Commands::Edit { key, .. }
            | Commands::MoveUp { key, .. }
            | Commands::MoveDown { key, .. }
            | Commands::Delete { key, .. }
            | Commands::Copy { key, .. } => Some(key),
        }
    }
}

impl Cli {
    pub fn schema_path(&self) -> PathBuf {
        self.schema.clone().unwrap_or_else(paths::schema_path)
    }

    pub fn store_path(&self) -> PathBuf {
        self.store.clone().unwrap_or_else(paths::store_path)
    }
}

/// Execute the parsed command. Confirmation prompts read from `input`,
/// results are written to `out`.
pub async fn run(cli: Cli, input: &mut impl BufRead, out: &mut impl Write) -> Result<()> {
    let schema_path = cli.schema_path();
    let catalog = SchemaCatalog::load(&schema_path)
        .with_context(|| format!("Failed to load schema catalog {}", schema_path.display()))?;
    let store = FileStore::new(cli.store_path()).with_catalog(&catalog);
    log::info!(
        "Loaded {} settings from {}, store {}",
        catalog.len(),
        schema_path.display(),
        store.path().display()
    );

    let Some(key) = cli.command.key() else {
        return print_catalog(out, &catalog);
    };
    let schema = lookup(&catalog, key)?;
    let mut session = HeadlessSession::open(schema.clone(), &store).await?;

    let outcome = match cli.command {
        Commands::List => return print_catalog(out, &catalog),
        Commands::Show { json, .. } => {
            let view = session.view()?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
            } else {
                print_view(out, &view)?;
            }
            return Ok(());
        }
        Commands::Add { value, .. } => session.add(&value).await?,
        Commands::Edit { index, value, .. } => session.edit(index, &value).await?,
        Commands::MoveUp { index, .. } => session.move_item(true, index).await?,
        Commands::MoveDown { index, .. } => session.move_item(false, index).await?,
        Commands::Delete { index, yes, .. } => {
            session
                .delete(index, |question| yes || prompt(question, input, out))
                .await?
        }
        Commands::Copy { index, new_id, .. } => session.copy(index, &new_id).await?,
    };

    match outcome {
        Outcome::Declined => {
            writeln!(out, "Cancelled.")?;
            return Ok(());
        }
        Outcome::Saved => {}
        Outcome::Reloaded(_) => {
            writeln!(out, "{} changed; configuration reloaded.", schema.label)?;
            session = HeadlessSession::open(schema.clone(), &store).await?;
        }
    }
    print_view(out, &session.view()?)?;
    Ok(())
}

fn print_catalog(out: &mut impl Write, catalog: &SchemaCatalog) -> Result<()> {
    for schema in catalog.iter() {
        writeln!(
            out,
            "{:<32} {:<12} {}",
            schema.key.as_str(),
            schema.syntax.display_name(),
            schema.label
        )?;
    }
    Ok(())
}

fn lookup<'c>(catalog: &'c SchemaCatalog, key: &str) -> Result<&'c SettingSchema> {
    catalog
        .get(key)
        .with_context(|| format!("Unknown setting \"{key}\""))
}

/// Ask a yes/no question; anything but y/yes declines
fn prompt(question: &str, input: &mut impl BufRead, out: &mut impl Write) -> bool {
    let _ = write!(out, "{question} [y/N] ");
    let _ = out.flush();
    let mut response = String::new();
    if input.read_line(&mut response).is_err() {
        return false;
    }
    let response = response.trim().to_lowercase();
    response == "y" || response == "yes"
}

/// Plain-text rendering of a list view
pub fn print_view(out: &mut impl Write, view: &ListView) -> std::io::Result<()> {
    writeln!(out, "{} ({})", view.label, view.key)?;
    if let Some(description) = &view.description {
        for line in description.lines() {
            writeln!(out, "  {line}")?;
        }
    }
    if view.rows.is_empty() {
        writeln!(out, "  (no values)")?;
    }
    let width = view.rows.iter().map(|r| r.value.len()).max().unwrap_or(0);
    for row in &view.rows {
        let actions: Vec<&str> = row.commands().iter().map(|c| c.kind.title()).collect();
        writeln!(
            out,
            "  [{}] {:<width$}  {}",
            row.index,
            row.value,
            actions.join(", ")
        )?;
    }
    if let Some(add) = view.add {
        writeln!(out, "  + {}", add.label)?;
    }
    Ok(())
}
