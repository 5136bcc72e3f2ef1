//! Pairing aggregations: row counts, food rankings and the food × wine cross-tab.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use taste_harmony_cli::TieBreakArg;

use crate::dataset::{count_values, grouped_counts, string_values, Dataset, View, COUNT_COLUMN};
use crate::error::PairingResult;

/// Number of foods in the "Top N" list unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 3;

/// Ordering of foods that share the same pairing count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Equal counts keep the order the food first appears in the view.
    #[default]
    FirstSeen,
    /// Equal counts are ordered by food name.
    Alphabetical,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::FirstSeen => TieBreak::FirstSeen,
            TieBreakArg::Alphabetical => TieBreak::Alphabetical,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoodCount {
    pub food: String,
    pub count: u64,
}

impl FoodCount {
    pub fn new(food: impl Into<String>, count: u64) -> Self {
        Self {
            food: food.into(),
            count,
        }
    }
}

/// Co-occurrence counts of (food, wine) over the whole dataset.
/// Foods and wines are sorted; missing combinations count as zero.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CrossTab {
    pub foods: Vec<String>,
    pub wines: Vec<String>,
    /// `counts[food_idx][wine_idx]`
    pub counts: Vec<Vec<u64>>,
}

impl CrossTab {
    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    pub fn get(&self, food: &str, wine: &str) -> u64 {
        let f = self.foods.iter().position(|x| x == food);
        let w = self.wines.iter().position(|x| x == wine);
        match (f, w) {
            (Some(f), Some(w)) => self.counts[f][w],
            _ => 0,
        }
    }

    pub fn row_total(&self, food: &str) -> u64 {
        self.foods
            .iter()
            .position(|x| x == food)
            .map(|f| self.counts[f].iter().sum())
            .unwrap_or(0)
    }

    pub fn column_total(&self, wine: &str) -> u64 {
        self.wines
            .iter()
            .position(|x| x == wine)
            .map(|w| self.counts.iter().map(|row| row[w]).sum())
            .unwrap_or(0)
    }

    /// Largest per-food total, used to scale stacked bars.
    pub fn max_row_total(&self) -> u64 {
        self.counts
            .iter()
            .map(|row| row.iter().sum::<u64>())
            .max()
            .unwrap_or(0)
    }
}

/// Number of rows in the view.
pub fn total_count(view: &View<'_>) -> usize {
    view.height()
}

/// Distinct non-missing wine values across the unfiltered dataset.
pub fn distinct_wine_count(dataset: &Dataset) -> PairingResult<usize> {
    let wine = dataset.columns().wine.as_str();
    Ok(grouped_counts(dataset.frame(), &[wine])?.height())
}

/// Every distinct food in the view with its count, highest first.
pub fn food_frequencies(view: &View<'_>, tie_break: TieBreak) -> PairingResult<Vec<FoodCount>> {
    let food = view.columns().food.as_str();
    let counts = grouped_counts(view.frame(), &[food])?;

    let sorted = match tie_break {
        TieBreak::FirstSeen => counts.lazy().sort(
            [COUNT_COLUMN],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        ),
        TieBreak::Alphabetical => counts.lazy().sort(
            [COUNT_COLUMN, food],
            SortMultipleOptions::default()
                .with_order_descending_multi([true, false])
                .with_maintain_order(true),
        ),
    }
    .collect()?;

    let foods = string_values(&sorted, food)?;
    let counts = count_values(&sorted)?;
    Ok(foods
        .into_iter()
        .zip(counts)
        .filter_map(|(food, count)| food.map(|f| FoodCount::new(f, count)))
        .collect())
}

/// The first `n` entries of [`food_frequencies`]. Empty when the view is.
pub fn top_foods(view: &View<'_>, n: usize, tie_break: TieBreak) -> PairingResult<Vec<FoodCount>> {
    if view.is_empty() || n == 0 {
        return Ok(Vec::new());
    }
    let mut ranking = food_frequencies(view, tie_break)?;
    ranking.truncate(n);
    Ok(ranking)
}

/// Food × wine counts over the unfiltered dataset.
pub fn food_wine_crosstab(dataset: &Dataset) -> PairingResult<CrossTab> {
    let cols = dataset.columns();
    let (food, wine) = (cols.food.as_str(), cols.wine.as_str());

    // Degenerate schema: one column is both wine and food.
    let grouped = if food == wine {
        grouped_counts(dataset.frame(), &[food])?
    } else {
        grouped_counts(dataset.frame(), &[food, wine])?
    };

    let food_values = string_values(&grouped, food)?;
    let wine_values = string_values(&grouped, wine)?;
    let counts = count_values(&grouped)?;

    let mut foods: Vec<String> = food_values.iter().flatten().cloned().collect();
    foods.sort();
    foods.dedup();
    let wines: Vec<String> = dataset
        .wine_options()?
        .into_iter()
        .filter(|w| wine_values.iter().flatten().any(|v| v == w))
        .collect();

    let mut table = vec![vec![0u64; wines.len()]; foods.len()];
    for ((f, w), n) in food_values.iter().zip(&wine_values).zip(counts) {
        let (Some(f), Some(w)) = (f, w) else {
            continue;
        };
        let wi = wines.iter().position(|x| x == w);
        if let (Ok(fi), Some(wi)) = (foods.binary_search(f), wi) {
            table[fi][wi] += n;
        }
    }

    Ok(CrossTab {
        foods,
        wines,
        counts: table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::WineFilter;

    fn sample() -> Dataset {
        let df = df!(
            "wine" => &["Red", "Red", "White", "White", "White"],
            "food" => &["Steak", "Cheese", "Fish", "Fish", "Cheese"]
        )
        .unwrap();
        Dataset::from_frame(df, "sample.csv").unwrap()
    }

    #[test]
    fn first_seen_keeps_encounter_order_on_ties() {
        let df = df!(
            "wine" => &["a", "a", "a", "a"],
            "food" => &["Pasta", "Bread", "Bread", "Pasta"]
        )
        .unwrap();
        let ds = Dataset::from_frame(df, "t.csv").unwrap();
        let ranking = food_frequencies(&ds.full_view(), TieBreak::FirstSeen).unwrap();
        assert_eq!(
            ranking,
            vec![FoodCount::new("Pasta", 2), FoodCount::new("Bread", 2)]
        );
        let ranking = food_frequencies(&ds.full_view(), TieBreak::Alphabetical).unwrap();
        assert_eq!(
            ranking,
            vec![FoodCount::new("Bread", 2), FoodCount::new("Pasta", 2)]
        );
    }

    #[test]
    fn top_foods_truncates() {
        let ds = sample();
        let top = top_foods(&ds.full_view(), 2, TieBreak::FirstSeen).unwrap();
        assert_eq!(top.len(), 2);
        assert!(top.iter().all(|fc| fc.count == 2));
    }

    #[test]
    fn missing_foods_are_not_ranked() {
        let df = df!(
            "wine" => &["Red", "Red", "Red"],
            "food" => &[Some("Steak"), None, Some("Steak")]
        )
        .unwrap();
        let ds = Dataset::from_frame(df, "t.csv").unwrap();
        let ranking = food_frequencies(&ds.full_view(), TieBreak::FirstSeen).unwrap();
        assert_eq!(ranking, vec![FoodCount::new("Steak", 2)]);
    }

    #[test]
    fn crosstab_fills_absent_pairs_with_zero() {
        let ds = sample();
        let tab = food_wine_crosstab(&ds).unwrap();
        assert_eq!(tab.foods, vec!["Cheese", "Fish", "Steak"]);
        assert_eq!(tab.wines, vec!["Red", "White"]);
        assert_eq!(tab.get("Cheese", "Red"), 1);
        assert_eq!(tab.get("Cheese", "White"), 1);
        assert_eq!(tab.get("Fish", "Red"), 0);
        assert_eq!(tab.get("Steak", "White"), 0);
        assert_eq!(tab.get("Tofu", "Red"), 0);
        assert_eq!(tab.row_total("Fish"), 2);
        assert_eq!(tab.column_total("White"), 3);
        assert_eq!(tab.max_row_total(), 2);
    }

    #[test]
    fn crosstab_ignores_rows_with_missing_values() {
        let df = df!(
            "wine" => &[Some("Red"), None, Some("White")],
            "food" => &[Some("Steak"), Some("Fish"), None]
        )
        .unwrap();
        let ds = Dataset::from_frame(df, "t.csv").unwrap();
        let tab = food_wine_crosstab(&ds).unwrap();
        assert_eq!(tab.foods, vec!["Steak"]);
        assert_eq!(tab.wines, vec!["Red"]);
        assert_eq!(tab.counts, vec![vec![1]]);
    }

    #[test]
    fn distinct_wines_ignore_filter() {
        let ds = sample();
        assert_eq!(distinct_wine_count(&ds).unwrap(), 2);
        let red = ds.view(&WineFilter::Wine("Red".into())).unwrap();
        assert_eq!(total_count(&red), 2);
    }
}
