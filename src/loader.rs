//! Reading the pairings CSV into a [`Dataset`].

use polars::io::csv::read::NullValues;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::dataset::Dataset;
use crate::error::{PairingError, PairingResult};
use taste_harmony_cli::{Args, DEFAULT_DATA_PATH};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenOptions {
    pub delimiter: Option<u8>,
    pub has_header: Option<bool>,
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_has_header(mut self, has_header: bool) -> Self {
        self.has_header = Some(has_header);
        self
    }

    /// Create OpenOptions from CLI args and config, with CLI args taking precedence
    pub fn from_args_and_config(args: &Args, config: &AppConfig) -> Self {
        let mut opts = OpenOptions::new();
        opts.delimiter = args.delimiter.or(config.file_loading.delimiter);

        // Handle has_header: CLI no_header flag overrides config
        opts.has_header = if let Some(no_header) = args.no_header {
            Some(!no_header)
        } else {
            config.file_loading.has_header
        };
        opts
    }
}

impl From<&Args> for OpenOptions {
    fn from(args: &Args) -> Self {
        Self::from_args_and_config(args, &AppConfig::default())
    }
}

/// Cell values read as missing, in addition to empty fields.
pub const MISSING_SENTINELS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn missing_values() -> NullValues {
    NullValues::AllColumns(
        MISSING_SENTINELS
            .iter()
            .map(|s| PlSmallStr::from(*s))
            .collect(),
    )
}

/// Dataset path: CLI argument, then config, then the built-in default.
pub fn data_path(args: &Args, config: &AppConfig) -> PathBuf {
    args.path
        .clone()
        .or_else(|| config.file_loading.data_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}

/// Parse the CSV at `path` without interpreting its columns.
pub fn read_frame(path: &Path, options: &OpenOptions) -> PairingResult<DataFrame> {
    if !path.exists() {
        return Err(PairingError::DataNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut parse_options = CsvParseOptions::default()
        .with_missing_is_null(true)
        .with_null_values(Some(missing_values()));
    if let Some(delimiter) = options.delimiter {
        parse_options = parse_options.with_separator(delimiter);
    }

    let df = CsvReadOptions::default()
        .with_has_header(options.has_header.unwrap_or(true))
        .with_parse_options(parse_options)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "parsed csv"
    );
    Ok(df)
}

/// Read `path` and resolve its wine/food columns. Fails before returning
/// anything if the file is missing or either column cannot be found.
pub fn load(path: &Path, options: &OpenOptions) -> PairingResult<Dataset> {
    let df = read_frame(path, options)?;
    let dataset = Dataset::from_frame(df, path)?;
    info!(
        path = %path.display(),
        wine = %dataset.columns().wine,
        food = %dataset.columns().food,
        rows = dataset.height(),
        "dataset loaded"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;

    #[test]
    fn missing_file_is_data_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        match load(&path, &OpenOptions::default()) {
            Err(PairingError::DataNotFound { path: p }) => assert_eq!(p, path),
            other => panic!("expected DataNotFound, got {:?}", other.map(|d| d.height())),
        }
    }

    #[test]
    fn loads_with_custom_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("semi.csv");
        fs::write(&path, "Wine;Food\nRed;Steak\nWhite;Fish\n").unwrap();
        let ds = load(&path, &OpenOptions::new().with_delimiter(b';')).unwrap();
        assert_eq!(ds.height(), 2);
        assert_eq!(ds.columns().wine, "Wine");
        assert_eq!(ds.columns().food, "Food");
    }

    #[test]
    fn header_only_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "wine_type,food_item\n").unwrap();
        let ds = load(&path, &OpenOptions::default()).unwrap();
        assert_eq!(ds.height(), 0);
    }

    #[test]
    fn cli_overrides_config() {
        let mut config = AppConfig::default();
        config.file_loading.delimiter = Some(b'|');
        config.file_loading.has_header = Some(true);
        config.file_loading.data_path = Some(PathBuf::from("from_config.csv"));

        let args = Args::parse_from(["taste-harmony", "--delimiter", ";", "--no-header", "true"]);
        let opts = OpenOptions::from_args_and_config(&args, &config);
        assert_eq!(opts.delimiter, Some(b';'));
        assert_eq!(opts.has_header, Some(false));
        assert_eq!(data_path(&args, &config), PathBuf::from("from_config.csv"));

        let args = Args::parse_from(["taste-harmony"]);
        let opts = OpenOptions::from_args_and_config(&args, &config);
        assert_eq!(opts.delimiter, Some(b'|'));
        assert_eq!(
            data_path(&args, &AppConfig::default()),
            PathBuf::from(DEFAULT_DATA_PATH)
        );
    }
}
