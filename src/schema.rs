//! Detects which columns carry the wine and food values.

use crate::error::{PairingError, PairingResult};
use serde::Serialize;

pub const WINE_KEYWORD: &str = "wine";
pub const FOOD_KEYWORD: &str = "food";

/// The two columns every pairing computation works on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairingColumns {
    pub wine: String,
    pub food: String,
}

/// First column whose lowercased name contains `keyword`.
fn first_match<'a, S: AsRef<str>>(columns: &'a [S], keyword: &str) -> Option<&'a str> {
    columns
        .iter()
        .map(|c| c.as_ref())
        .find(|name| name.to_lowercase().contains(keyword))
}

/// Resolve the wine and food columns from a header row.
///
/// The two searches are independent, so a column named e.g. "wine_food" can
/// satisfy both. Wine is checked first when reporting what is missing.
pub fn resolve<S: AsRef<str>>(columns: &[S]) -> PairingResult<PairingColumns> {
    let wine = first_match(columns, WINE_KEYWORD).ok_or(PairingError::SchemaResolution {
        missing: WINE_KEYWORD,
    })?;
    let food = first_match(columns, FOOD_KEYWORD).ok_or(PairingError::SchemaResolution {
        missing: FOOD_KEYWORD,
    })?;

    Ok(PairingColumns {
        wine: wine.to_string(),
        food: food.to_string(),
    })
}
