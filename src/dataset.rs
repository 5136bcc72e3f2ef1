//! The loaded pairings table, its resolved columns, and wine-filtered views.

use polars::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{PairingError, PairingResult};
use crate::schema::{self, PairingColumns};

/// Name of the column holding per-group counts in aggregation results.
pub(crate) const COUNT_COLUMN: &str = "count";

/// Wine selection applied before aggregating.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(into = "String")]
pub enum WineFilter {
    #[default]
    All,
    Wine(String),
}

impl WineFilter {
    pub const ALL_LABEL: &'static str = "All";

    pub fn label(&self) -> &str {
        match self {
            WineFilter::All => Self::ALL_LABEL,
            WineFilter::Wine(w) => w.as_str(),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, WineFilter::All)
    }

    /// Build a selection from a label, accepting only values from `domain`
    /// (the sorted distinct wine values) or "All".
    pub fn parse(label: &str, domain: &[String]) -> Option<Self> {
        if label == Self::ALL_LABEL {
            return Some(WineFilter::All);
        }
        domain
            .iter()
            .find(|w| w.as_str() == label)
            .map(|w| WineFilter::Wine(w.clone()))
    }
}

impl From<WineFilter> for String {
    fn from(filter: WineFilter) -> Self {
        filter.label().to_string()
    }
}

/// Immutable in-memory table plus the columns pairing logic reads.
#[derive(Debug, Clone)]
pub struct Dataset {
    path: PathBuf,
    df: DataFrame,
    columns: PairingColumns,
    wine_options: Vec<String>,
}

impl Dataset {
    /// Resolve the wine/food columns of `df` and normalize both to strings.
    pub fn from_frame(df: DataFrame, path: impl Into<PathBuf>) -> PairingResult<Self> {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let columns = schema::resolve(&names)?;
        let wine_options = sorted_distinct(&df, &columns.wine)?;

        let mut casts = vec![col(columns.wine.as_str()).cast(DataType::String)];
        if columns.food != columns.wine {
            casts.push(col(columns.food.as_str()).cast(DataType::String));
        }
        let df = df.lazy().with_columns(casts).collect()?;

        Ok(Self {
            path: path.into(),
            df,
            columns,
            wine_options,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn columns(&self) -> &PairingColumns {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// The whole table as a view.
    pub fn full_view(&self) -> View<'_> {
        View {
            columns: &self.columns,
            df: self.df.clone(),
        }
    }

    /// Rows matching `filter`; `All` returns every row in file order.
    pub fn view(&self, filter: &WineFilter) -> PairingResult<View<'_>> {
        match filter {
            WineFilter::All => Ok(self.full_view()),
            WineFilter::Wine(wine) => {
                let df = self
                    .df
                    .clone()
                    .lazy()
                    .filter(col(self.columns.wine.as_str()).eq(lit(wine.as_str())))
                    .collect()?;
                Ok(View {
                    columns: &self.columns,
                    df,
                })
            }
        }
    }

    /// Distinct non-missing wine values, sorted ascending in the column's
    /// own type (numeric codes sort as numbers).
    pub fn wine_options(&self) -> PairingResult<Vec<String>> {
        Ok(self.wine_options.clone())
    }

    /// Selectable filter labels: "All" followed by [`Dataset::wine_options`].
    pub fn selection_domain(&self) -> PairingResult<Vec<String>> {
        let mut domain = vec![WineFilter::ALL_LABEL.to_string()];
        domain.extend(self.wine_options()?);
        Ok(domain)
    }

    /// Turn a user-supplied label into a selection, rejecting wines that
    /// never occur in the dataset.
    pub fn resolve_selection(&self, label: &str) -> PairingResult<WineFilter> {
        WineFilter::parse(label, &self.wine_options()?).ok_or_else(|| PairingError::UnknownWine {
            value: label.to_string(),
        })
    }
}

/// A row subset of a [`Dataset`] that aggregations run against.
#[derive(Debug, Clone)]
pub struct View<'a> {
    columns: &'a PairingColumns,
    df: DataFrame,
}

impl View<'_> {
    pub fn columns(&self) -> &PairingColumns {
        self.columns
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }
}

/// Count rows per distinct combination of `keys`, skipping rows where any
/// key is missing. Groups come out in order of first appearance.
pub(crate) fn grouped_counts(df: &DataFrame, keys: &[&str]) -> PolarsResult<DataFrame> {
    let mut lf = df.clone().lazy();
    for key in keys {
        lf = lf.filter(col(*key).is_not_null());
    }
    let key_exprs: Vec<Expr> = keys.iter().map(|k| col(*k)).collect();
    lf.group_by_stable(key_exprs)
        .agg([len().alias(COUNT_COLUMN)])
        .with_column(col(COUNT_COLUMN).cast(DataType::UInt64))
        .collect()
}

/// Distinct non-missing values of `name`, sorted in the column's dtype and
/// then rendered as strings.
fn sorted_distinct(df: &DataFrame, name: &str) -> PolarsResult<Vec<String>> {
    let sorted = grouped_counts(df, &[name])?
        .lazy()
        .sort([name], SortMultipleOptions::default())
        .select([col(name).cast(DataType::String)])
        .collect()?;
    Ok(string_values(&sorted, name)?.into_iter().flatten().collect())
}

/// Values of a string column in row order.
pub(crate) fn string_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    Ok(df
        .column(name)?
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Values of the count column in row order.
pub(crate) fn count_values(df: &DataFrame) -> PolarsResult<Vec<u64>> {
    Ok(df
        .column(COUNT_COLUMN)?
        .u64()?
        .into_iter()
        .map(|v| v.unwrap_or(0))
        .collect())
}
