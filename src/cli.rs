// CLI module - command-line argument parsing and handlers
//
// Provides subcommands:
// - search <query> [--sort key]: one headless search, printed as text
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --edit: Open config file in $EDITOR
// - config --update: Merge new defaults into existing config

use crate::config::{Config, VERSION};
use crate::sort::SortKey;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::process::Command;

/// reelsearch - search OMDb from the terminal
#[derive(Parser)]
#[command(name = "reelsearch")]
#[command(version = VERSION)]
#[command(about = "Movie search for the terminal, backed by OMDb", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one search and print the results
    Search {
        /// Movie title to search for
        #[arg(required = true)]
        query: Vec<String>,

        /// Sort order: titleAsc, titleDesc, yearAsc, yearDesc
        #[arg(long)]
        sort: Option<SortKey>,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Update config with new defaults (preserves user values)
        #[arg(long)]
        update: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// What main should do after argument parsing
#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    /// A config command ran; exit
    Exit,
    /// Run one headless search
    Search { query: String, sort: Option<SortKey> },
    /// No subcommand; start the interactive UI
    Run,
}

/// Handle CLI commands
pub fn handle_cli() -> CliAction {
    dispatch(Cli::parse())
}

fn dispatch(cli: Cli) -> CliAction {
    match cli.command {
        Some(Commands::Search { query, sort }) => CliAction::Search {
            query: query.join(" "),
            sort,
        },
        Some(Commands::Config {
            show,
            reset,
            edit,
            update,
            path,
        }) => {
            if path {
                handle_config_path();
            } else if show {
                handle_config_show();
            } else if reset {
                handle_config_reset();
            } else if edit {
                handle_config_edit();
            } else if update {
                handle_config_update();
            } else {
                // No flag provided, show help
                println!("Usage: reelsearch config [--show|--reset|--edit|--update|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --edit    Open config file in $EDITOR");
                println!("  --update  Update config with new defaults (preserves user values)");
                println!("  --path    Show config file path");
            }
            CliAction::Exit
        }
        None => CliAction::Run,
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("[omdb]");
    println!("api_url = {:?}", config.omdb.api_url);
    println!("api_key = {}", mask_key(config.omdb.api_key.as_deref()));
    println!("timeout_secs = {}", config.omdb.timeout_secs);
    println!();
    println!("[display]");
    println!("skeleton_count = {}", config.display.skeleton_count);
    println!("settle_delay_ms = {}", config.display.settle_delay_ms);
    println!("card_width = {}", config.display.card_width);
    println!("poster_min_rows = {}", config.display.poster_min_rows);
    println!("poster_max_rows = {}", config.display.poster_max_rows);
    println!("poster_timeout_secs = {}", config.display.poster_timeout_secs);
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);
    println!("file_dir = {:?}", config.logging.file_dir.display().to_string());
    println!("file_rotation = {:?}", config.logging.file_rotation.as_str());
    println!("file_prefix = {:?}", config.logging.file_prefix);

    // Show source info
    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

/// Show only the last four characters of a key
fn mask_key(key: Option<&str>) -> String {
    match key {
        None => "(unset)".to_string(),
        Some(k) if k.chars().count() <= 4 => "****".to_string(),
        Some(k) => {
            let tail: String = k.chars().skip(k.chars().count() - 4).collect();
            format!("****{}", tail)
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let mut input = String::new();
        if std::io::stderr().flush().is_err() || std::io::stdin().read_line(&mut input).is_err() {
            eprintln!("Error: Could not read confirmation");
            std::process::exit(1);
        }

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return;
        }
    }

    // Create parent directory
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    // Write the default config (using Config's single source of truth)
    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

fn handle_config_edit() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    // Ensure config exists
    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    // Get editor from environment
    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            // Platform-specific fallback
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    let status = Command::new(&editor).arg(&path).status();

    match status {
        Ok(s) if s.success() => {}
        Ok(s) => {
            eprintln!("Editor exited with status: {}", s);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to launch editor '{}': {}", editor, e);
            eprintln!("Set $EDITOR environment variable to your preferred editor");
            std::process::exit(1);
        }
    }
}

fn handle_config_update() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if !path.exists() {
        // No existing config, just create default
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
        return;
    }

    // Rebuild from the file alone: env overrides stay out of the file
    let existing = Config::from_file_only();
    let updated = existing.to_toml();

    // Backup existing
    let backup_path = path.with_extension("toml.bak");
    if let Err(e) = std::fs::copy(&path, &backup_path) {
        eprintln!("Warning: Could not create backup: {}", e);
    } else {
        println!("Backup created: {}", backup_path.display());
    }

    // Write updated config
    if let Err(e) = std::fs::write(&path, updated) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config updated with latest structure: {}", path.display());
    println!("Your values have been preserved.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_no_subcommand_runs_tui() {
        assert_eq!(dispatch(parse(&["reelsearch"])), CliAction::Run);
    }

    #[test]
    fn test_search_joins_words_and_parses_sort() {
        let action = dispatch(parse(&[
            "reelsearch", "search", "the", "matrix", "--sort", "year-desc",
        ]));
        assert_eq!(
            action,
            CliAction::Search {
                query: "the matrix".to_string(),
                sort: Some(SortKey::YearDesc),
            }
        );
    }

    #[test]
    fn test_search_rejects_unknown_sort() {
        assert!(Cli::try_parse_from(["reelsearch", "search", "heat", "--sort", "rating"]).is_err());
    }

    #[test]
    fn test_search_requires_query() {
        assert!(Cli::try_parse_from(["reelsearch", "search"]).is_err());
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key(None), "(unset)");
        assert_eq!(mask_key(Some("abc")), "****");
        assert_eq!(mask_key(Some("abcdef12")), "****ef12");
    }
}
