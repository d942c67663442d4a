//! CLI module - Command-line interface for Brickshelf
//!
//! This module provides a structured CLI using clap for argument parsing.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Brickshelf - Lego set catalog with user accounts
#[derive(Parser)]
#[command(name = "brickshelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web server (default)
    Serve,

    /// Bulk-load themes and sets from JSON files
    Seed {
        /// JSON array of {"id", "name"} objects
        #[arg(long)]
        themes: PathBuf,

        /// JSON array of sets
        #[arg(long)]
        sets: PathBuf,
    },

    /// List all themes
    Themes,

    /// List sets, optionally filtered by theme name
    #[command(alias = "ls")]
    Sets {
        /// Case-insensitive part of a theme name
        #[arg(long)]
        theme: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed() {
        let cli = Cli::try_parse_from([
            "brickshelf",
            "seed",
            "--themes",
            "themes.json",
            "--sets",
            "sets.json",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Seed { themes, sets }) => {
                assert_eq!(themes, PathBuf::from("themes.json"));
                assert_eq!(sets, PathBuf::from("sets.json"));
            }
            _ => panic!("expected seed command"),
        }
    }

    #[test]
    fn test_no_command_defaults_to_none() {
        let cli = Cli::try_parse_from(["brickshelf"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_sets_alias() {
        let cli = Cli::try_parse_from(["brickshelf", "ls", "--theme", "star"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Sets { theme: Some(ref t) }) if t == "star"
        ));
    }
}
