//! Pure view model of the dashboard page.
//!
//! [`render`] is re-run whenever the navigation state or the wine selection
//! changes; the terminal widgets and the `--json` output only read its result.

use serde::Serialize;
use taste_harmony_cli::{Args, ViewArg};

use crate::config::AppConfig;
use crate::dataset::{Dataset, WineFilter};
use crate::error::PairingResult;
use crate::pairings::{self, CrossTab, FoodCount, TieBreak, DEFAULT_TOP_N};
use crate::schema::PairingColumns;

pub const TITLE: &str = "🍷 Taste Harmony";
pub const TAGLINE: &str = "Explore how wines complement various foods. Find your perfect pairing!";
pub const OVERVIEW_INTRO: &str = "Discover how different wines complement various foods. \
                                  Explore pairing trends and uncover perfect matches!";
pub const NO_DATA_MESSAGE: &str = "No data available for this selection.";
pub const CAPTION: &str =
    "Note: The longer the bar, the more frequently that type of wine is paired with the food.";
pub const FOOTER: &str = "© 2025 Wine & Food Pairing Analysis - by Lidya";

/// Sidebar navigation entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavState {
    #[default]
    Overview,
    PairingExplorer,
}

impl NavState {
    pub const ALL: [NavState; 2] = [NavState::Overview, NavState::PairingExplorer];

    pub fn label(self) -> &'static str {
        match self {
            NavState::Overview => "Overview",
            NavState::PairingExplorer => "Pairing Explorer",
        }
    }

    pub fn index(self) -> usize {
        match self {
            NavState::Overview => 0,
            NavState::PairingExplorer => 1,
        }
    }

    pub fn from_index(idx: usize) -> Self {
        Self::ALL[idx.min(Self::ALL.len() - 1)]
    }
}

impl From<ViewArg> for NavState {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Overview => NavState::Overview,
            ViewArg::PairingExplorer => NavState::PairingExplorer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    pub top_n: usize,
    pub tie_break: TieBreak,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            tie_break: TieBreak::default(),
        }
    }
}

impl DashboardOptions {
    /// Command-line values win over the `[analysis]` config section.
    pub fn from_args_and_config(args: &Args, config: &AppConfig) -> Self {
        Self {
            top_n: args.top_n.unwrap_or(config.analysis.top_n),
            tie_break: args
                .tie_break
                .map(TieBreak::from)
                .unwrap_or(config.analysis.tie_break),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewMetrics {
    pub total_pairings: usize,
    pub unique_wines: usize,
}

/// Everything the page shows for one (selection, navigation) pair.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub nav: NavState,
    pub selection: WineFilter,
    /// "All" followed by the sorted wine values.
    pub wine_options: Vec<String>,
    pub columns: PairingColumns,
    /// Rows in the filtered view.
    pub total_count: usize,
    /// Headline metrics; only on the Overview page with no wine filter.
    pub overview: Option<OverviewMetrics>,
    /// Top foods within the filtered view.
    pub top_foods: Vec<FoodCount>,
    /// Top foods across all wines, regardless of the filter.
    pub top_foods_overall: Vec<FoodCount>,
    /// Full ranking within the filtered view, for the bar chart.
    pub frequencies: Vec<FoodCount>,
    /// Food × wine comparison; only with no wine filter.
    pub comparison: Option<CrossTab>,
    pub show_caption: bool,
}

impl DashboardView {
    /// True when the filtered view has nothing to rank.
    pub fn is_empty(&self) -> bool {
        self.top_foods.is_empty()
    }
}

pub fn render(
    dataset: &Dataset,
    selection: &WineFilter,
    nav: NavState,
    options: DashboardOptions,
) -> PairingResult<DashboardView> {
    let view = dataset.view(selection)?;
    let full = dataset.full_view();
    let all = selection.is_all();

    let overview = if nav == NavState::Overview && all {
        Some(OverviewMetrics {
            total_pairings: pairings::total_count(&full),
            unique_wines: pairings::distinct_wine_count(dataset)?,
        })
    } else {
        None
    };

    let frequencies = pairings::food_frequencies(&view, options.tie_break)?;
    let top_foods = pairings::top_foods(&view, options.top_n, options.tie_break)?;
    let top_foods_overall = if all {
        top_foods.clone()
    } else {
        pairings::top_foods(&full, options.top_n, options.tie_break)?
    };

    let comparison = if all {
        Some(pairings::food_wine_crosstab(dataset)?)
    } else {
        None
    };

    Ok(DashboardView {
        nav,
        selection: selection.clone(),
        wine_options: dataset.selection_domain()?,
        columns: dataset.columns().clone(),
        total_count: pairings::total_count(&view),
        overview,
        top_foods,
        top_foods_overall,
        frequencies,
        comparison,
        show_caption: all,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn sample() -> Dataset {
        let df = df!(
            "Wine Type" => &["Red", "Red", "White", "White", "White"],
            "Food Pairing" => &["Steak", "Cheese", "Fish", "Fish", "Cheese"]
        )
        .unwrap();
        Dataset::from_frame(df, "sample.csv").unwrap()
    }

    #[test]
    fn overview_with_all_shows_metrics_and_comparison() {
        let ds = sample();
        let view = render(
            &ds,
            &WineFilter::All,
            NavState::Overview,
            DashboardOptions::default(),
        )
        .unwrap();
        assert_eq!(
            view.overview,
            Some(OverviewMetrics {
                total_pairings: 5,
                unique_wines: 2
            })
        );
        assert!(view.comparison.is_some());
        assert!(view.show_caption);
        assert_eq!(view.wine_options, vec!["All", "Red", "White"]);
        assert_eq!(view.top_foods, view.top_foods_overall);
    }

    #[test]
    fn explorer_never_shows_overview_metrics() {
        let ds = sample();
        let view = render(
            &ds,
            &WineFilter::All,
            NavState::PairingExplorer,
            DashboardOptions::default(),
        )
        .unwrap();
        assert!(view.overview.is_none());
        assert!(view.comparison.is_some());
    }

    #[test]
    fn filtered_selection_hides_comparison_and_caption() {
        let ds = sample();
        let view = render(
            &ds,
            &WineFilter::Wine("Red".into()),
            NavState::Overview,
            DashboardOptions::default(),
        )
        .unwrap();
        assert!(view.overview.is_none());
        assert!(view.comparison.is_none());
        assert!(!view.show_caption);
        assert_eq!(view.total_count, 2);
        assert_eq!(
            view.top_foods,
            vec![FoodCount::new("Steak", 1), FoodCount::new("Cheese", 1)]
        );
        assert_eq!(view.top_foods_overall[0].count, 2);
    }

    #[test]
    fn serializes_selection_as_label() {
        let ds = sample();
        let view = render(
            &ds,
            &WineFilter::Wine("White".into()),
            NavState::PairingExplorer,
            DashboardOptions::default(),
        )
        .unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["selection"], "White");
        assert_eq!(json["nav"], "pairing_explorer");
        assert_eq!(json["frequencies"][0]["food"], "Fish");
    }

    #[test]
    fn nav_index_round_trips() {
        for nav in NavState::ALL {
            assert_eq!(NavState::from_index(nav.index()), nav);
        }
        assert_eq!(NavState::from_index(9), NavState::PairingExplorer);
    }
}
