use anyhow::{Context, Result};
use bytespan_config::Config;
use clap::{Parser, Subcommand};
use std::{path::PathBuf, process};

mod commands;

use commands::NumberKind;

/// Span utilities on the command line: search, trim, split, percent-encode,
/// number conversion and in-buffer replacement.
#[derive(Debug, Parser)]
#[command(name = "bytespan", version)]
struct Cli {
    /// Config file to read instead of ~/.config/bytespan/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Percent-encode text
    Encode { text: String },
    /// Print the offset of the first occurrence of TARGET in SOURCE
    Find { source: String, target: String },
    /// Trim white space and print the result between brackets
    Trim { text: String },
    /// Print one token per line
    Split {
        text: String,
        #[arg(long, short)]
        delimiter: Option<String>,
    },
    /// Parse a number and print its value
    Parse {
        #[arg(value_enum)]
        kind: NumberKind,
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// Format a double with truncated fractional digits
    FormatDouble {
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(long)]
        digits: Option<u32>,
    },
    /// Replace the byte range [START, END) of TEXT
    Replace {
        text: String,
        start: usize,
        end: usize,
        replacement: String,
        #[arg(long)]
        capacity: Option<usize>,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => Config::load().context("Failed to load config file")?,
    };
    match config {
        Some(config) => {
            log::debug!("Loaded config: {config:?}");
            Ok(config)
        }
        None => {
            log::debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Encode { text } => println!("{}", commands::encode(&text)?),
        Command::Find { source, target } => match commands::find(&source, &target) {
            Some(offset) => println!("{offset}"),
            None => {
                println!("not found");
                process::exit(1);
            }
        },
        Command::Trim { text } => println!("{}", commands::trim(&text)),
        Command::Split { text, delimiter } => {
            let delimiter = delimiter.unwrap_or(config.delimiter);
            for piece in commands::split(&text, &delimiter)? {
                println!("{piece}");
            }
        }
        Command::Parse { kind, text } => println!("{}", commands::parse(kind, &text)?),
        Command::FormatDouble { value, digits } => {
            let digits = digits.unwrap_or(config.fractional_digits);
            println!("{}", commands::format_double(&value, digits)?);
        }
        Command::Replace {
            text,
            start,
            end,
            replacement,
            capacity,
        } => {
            let capacity = capacity.or(config.replace_capacity);
            println!(
                "{}",
                commands::replace(&text, start, end, &replacement, capacity)?
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_values_are_not_flags() {
        let cli = Cli::try_parse_from(["bytespan", "format-double", "-3.5", "--digits", "2"])
            .unwrap();
        match cli.command {
            Command::FormatDouble { value, digits } => {
                assert_eq!(value, "-3.5");
                assert_eq!(digits, Some(2));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parse_kind_is_lowercase() {
        let cli = Cli::try_parse_from(["bytespan", "parse", "i64", "-9"]).unwrap();
        match cli.command {
            Command::Parse { kind, text } => {
                assert_eq!(kind, NumberKind::I64);
                assert_eq!(text, "-9");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn missing_config_file_means_defaults() {
        let path = PathBuf::from("/nonexistent/bytespan/config.toml");
        assert_eq!(load_config(Some(&path)).unwrap(), Config::default());
    }
}
