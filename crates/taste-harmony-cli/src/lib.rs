//! Shared CLI definitions for taste-harmony.
//!
//! Used by the main application and by the build script (manpage) and
//! gen_docs binary (command-line-options markdown).

use clap::{CommandFactory, Parser, ValueEnum};
use std::path::PathBuf;

/// Dataset location used when neither the command line nor the config names one.
pub const DEFAULT_DATA_PATH: &str = "data/wine_food_pairing.csv";

/// Page shown when the dashboard starts.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ViewArg {
    /// Headline metrics, top pairings and the wine vs food comparison
    Overview,
    /// Top pairings and pairing frequencies for the selected wine
    PairingExplorer,
}

/// How foods with the same pairing count are ordered.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum TieBreakArg {
    /// Keep the order in which foods first appear in the data
    FirstSeen,
    /// Order equal counts by food name
    Alphabetical,
}

/// Parse a single ASCII character delimiter such as `,` or `;`.
fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ if s == "\\t" => Ok(b'\t'),
        _ => Err(format!(
            "delimiter must be a single ASCII character, got '{}'",
            s
        )),
    }
}

/// Parse a positive entry count for the top pairings list.
fn parse_top_n(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("top-n must be greater than 0".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// Command-line arguments for taste-harmony
#[derive(Clone, Parser, Debug)]
#[command(
    name = "taste-harmony",
    version,
    about = "Explore wine and food pairings in the terminal",
    long_about = "Explore wine and food pairings in the terminal.\n\n\
                  Loads a CSV of pairings, detects the wine and food columns by name, \
                  and shows top pairings, pairing frequencies and a wine vs food comparison."
)]
pub struct Args {
    /// Path to the pairings CSV (default: data/wine_food_pairing.csv or the config value)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Delimiter to use when reading the file (single character, e.g. ';')
    #[arg(long = "delimiter", value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,

    /// Specify that the file has no header
    #[arg(long = "no-header", value_name = "BOOL", value_parser = clap::value_parser!(bool))]
    pub no_header: Option<bool>,

    /// Start with this wine type selected instead of All
    #[arg(long = "wine", value_name = "WINE")]
    pub wine: Option<String>,

    /// Page to open on start
    #[arg(long = "view", value_enum)]
    pub view: Option<ViewArg>,

    /// Number of entries in the top pairings list (default: 3)
    #[arg(long = "top-n", value_name = "N", value_parser = parse_top_n)]
    pub top_n: Option<usize>,

    /// Ordering of foods with equal pairing counts (default: first-seen)
    #[arg(long = "tie-break", value_enum)]
    pub tie_break: Option<TieBreakArg>,

    /// Print the dashboard as JSON and exit
    #[arg(long = "json", action)]
    pub json: bool,

    /// Write the pairing charts as PNG files into DIR and exit
    #[arg(long = "export-charts", value_name = "DIR")]
    pub export_charts: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long = "debug", action)]
    pub debug: bool,

    /// Clear all cache data and exit
    #[arg(long = "clear-cache", action)]
    pub clear_cache: bool,

    /// Generate default configuration file at ~/.config/taste-harmony/config.toml
    #[arg(long = "generate-config", action)]
    pub generate_config: bool,

    /// Force overwrite existing config file when using --generate-config
    #[arg(long = "force", requires = "generate_config", action)]
    pub force: bool,
}

/// Escape `|` and newlines for use in markdown table cells.
fn escape_table_cell(s: &str) -> String {
    s.replace('|', "\\|").replace(['\n', '\r'], " ")
}

/// Render command-line options as markdown.
pub fn render_options_markdown() -> String {
    let mut cmd = Args::command();
    cmd.build();

    let mut out = String::from("# Command Line Options\n\n");

    out.push_str("## Usage\n\n```\n");
    out.push_str(&cmd.render_usage().to_string());
    out.push_str("\n```\n\n");

    out.push_str("## Options\n\n");
    out.push_str("| Option | Description |\n");
    out.push_str("|--------|-------------|\n");

    for arg in cmd.get_arguments() {
        let id = arg.get_id().as_ref().to_string();
        if id == "help" || id == "version" {
            continue;
        }

        let placeholder: String = arg
            .get_value_names()
            .map(|names| {
                names
                    .iter()
                    .map(|n: &clap::builder::Str| format!("<{}>", n.as_ref() as &str))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();

        let option_str = if arg.is_positional() {
            if arg.is_required_set() {
                placeholder
            } else {
                format!("[{placeholder}]")
            }
        } else {
            let mut parts = Vec::new();
            if let Some(s) = arg.get_short() {
                parts.push(format!("-{s}"));
            }
            if let Some(l) = arg.get_long() {
                parts.push(format!("--{l}"));
            }
            let op = parts.join(", ");
            if placeholder.is_empty() || !arg.get_action().takes_values() {
                op
            } else {
                format!("{op} {placeholder}")
            }
        };

        let help = arg
            .get_help()
            .map(|h| escape_table_cell(&h.to_string()))
            .unwrap_or_else(|| "-".to_string());

        out.push_str(&format!("| `{option_str}` | {help} |\n"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_args() {
        let args = Args::try_parse_from(["taste-harmony"]).unwrap();
        assert!(args.path.is_none());
        assert!(args.wine.is_none());
        assert!(!args.json);
    }

    #[test]
    fn test_parse_full_args() {
        let args = Args::try_parse_from([
            "taste-harmony",
            "pairings.csv",
            "--delimiter",
            ";",
            "--wine",
            "Red",
            "--view",
            "pairing-explorer",
            "--top-n",
            "5",
            "--tie-break",
            "alphabetical",
            "--json",
        ])
        .unwrap();
        assert_eq!(args.path, Some(PathBuf::from("pairings.csv")));
        assert_eq!(args.delimiter, Some(b';'));
        assert_eq!(args.wine.as_deref(), Some("Red"));
        assert_eq!(args.view, Some(ViewArg::PairingExplorer));
        assert_eq!(args.top_n, Some(5));
        assert_eq!(args.tie_break, Some(TieBreakArg::Alphabetical));
        assert!(args.json);
    }

    #[test]
    fn test_delimiter_must_be_single_char() {
        assert_eq!(parse_delimiter(","), Ok(b','));
        assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
        assert!(parse_delimiter(",,").is_err());
        assert!(parse_delimiter("").is_err());
    }

    #[test]
    fn test_top_n_must_be_positive() {
        assert!(Args::try_parse_from(["taste-harmony", "--top-n", "0"]).is_err());
        assert!(Args::try_parse_from(["taste-harmony", "--top-n", "x"]).is_err());
    }

    #[test]
    fn test_force_requires_generate_config() {
        assert!(Args::try_parse_from(["taste-harmony", "--force"]).is_err());
        assert!(Args::try_parse_from(["taste-harmony", "--generate-config", "--force"]).is_ok());
    }

    #[test]
    fn test_options_markdown_lists_flags() {
        let md = render_options_markdown();
        assert!(md.contains("--wine"));
        assert!(md.contains("--tie-break"));
        assert!(md.contains("[<PATH>]"));
    }
}
