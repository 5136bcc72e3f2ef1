use std::collections::HashSet;

use taste_harmony::dashboard::{self, DashboardOptions, NavState, NO_DATA_MESSAGE};
use taste_harmony::loader::{self, OpenOptions};
use taste_harmony::pairings::{
    distinct_wine_count, food_frequencies, food_wine_crosstab, top_foods, total_count, FoodCount,
    TieBreak,
};
use taste_harmony::schema;
use taste_harmony::{Dataset, PairingError, WineFilter};
use tempfile::TempDir;

mod common;

fn sample() -> (TempDir, Dataset) {
    let dir = TempDir::new().unwrap();
    let path = common::write_sample_csv(dir.path());
    let dataset = loader::load(&path, &OpenOptions::default()).unwrap();
    (dir, dataset)
}

fn pairs(list: &[FoodCount]) -> Vec<(&str, u64)> {
    list.iter().map(|fc| (fc.food.as_str(), fc.count)).collect()
}

#[test]
fn test_five_row_sample_ranks_by_count() {
    let (_dir, ds) = sample();
    let all = ds.full_view();

    assert_eq!(distinct_wine_count(&ds).unwrap(), 2);
    assert_eq!(
        pairs(&top_foods(&all, 3, TieBreak::FirstSeen).unwrap()),
        vec![("Cheese", 2), ("Fish", 2), ("Steak", 1)]
    );
    assert_eq!(
        pairs(&top_foods(&all, 3, TieBreak::Alphabetical).unwrap()),
        vec![("Cheese", 2), ("Fish", 2), ("Steak", 1)]
    );
    // Repeated calls give the same order.
    assert_eq!(
        top_foods(&all, 3, TieBreak::FirstSeen).unwrap(),
        top_foods(&all, 3, TieBreak::FirstSeen).unwrap()
    );
}

#[test]
fn test_red_filter() {
    let (_dir, ds) = sample();
    let red = ds.view(&WineFilter::Wine("Red".into())).unwrap();

    assert_eq!(total_count(&red), 2);
    assert_eq!(
        pairs(&top_foods(&red, 3, TieBreak::FirstSeen).unwrap()),
        vec![("Steak", 1), ("Cheese", 1)]
    );
}

#[test]
fn test_absent_wine_is_not_selectable() {
    let (_dir, ds) = sample();
    let domain = ds.selection_domain().unwrap();
    assert_eq!(domain, vec!["All", "Red", "White"]);
    assert!(!domain.iter().any(|w| w == "Rosé"));
    assert!(matches!(
        ds.resolve_selection("Rosé"),
        Err(PairingError::UnknownWine { .. })
    ));
}

#[test]
fn test_region_column_is_ignored() {
    let (_dir, ds) = sample();
    assert_eq!(ds.columns().wine, "Wine Type");
    assert_eq!(ds.columns().food, "Food Pairing");
    assert_eq!(ds.column_names().len(), 3);
}

#[test]
fn test_unrelated_columns_halt_with_wine_missing() {
    let dir = TempDir::new().unwrap();
    let path = common::write_csv(dir.path(), "notes.csv", "Region,Notes\nLoire,crisp\n");
    let err = loader::load(&path, &OpenOptions::default()).unwrap_err();
    assert!(matches!(err, PairingError::SchemaResolution { missing: "wine" }));
    assert_eq!(
        err.to_string(),
        "Required column 'wine' not found in the dataset"
    );
}

#[test]
fn test_empty_dataset_shows_no_data() {
    let dir = TempDir::new().unwrap();
    let path = common::write_csv(dir.path(), "empty.csv", "Wine Type,Food Pairing\n");
    let ds = loader::load(&path, &OpenOptions::default()).unwrap();

    let all = ds.full_view();
    assert_eq!(total_count(&all), 0);
    assert!(top_foods(&all, 3, TieBreak::FirstSeen).unwrap().is_empty());

    let view = dashboard::render(
        &ds,
        &WineFilter::All,
        NavState::Overview,
        DashboardOptions::default(),
    )
    .unwrap();
    assert!(view.is_empty());
    assert!(view.frequencies.is_empty());
    assert_eq!(NO_DATA_MESSAGE, "No data available for this selection.");
}

#[test]
fn test_resolution_prefers_earliest_match() {
    let cols = ["Region", "Wine Name", "Food", "Other Wine", "Side Food"];
    let first = schema::resolve(&cols).unwrap();
    let second = schema::resolve(&cols).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.wine, "Wine Name");
    assert_eq!(first.food, "Food");
}

#[test]
fn test_all_filter_is_identity() {
    let (_dir, ds) = sample();
    let all = ds.view(&WineFilter::All).unwrap();
    assert!(all.frame().equals_missing(ds.frame()));
}

#[test]
fn test_count_conservation_and_monotonic_ranking() {
    let dir = TempDir::new().unwrap();
    let path = common::write_frame(dir.path(), "generated.csv", &mut common::generated_frame(200));
    let ds = loader::load(&path, &OpenOptions::default()).unwrap();

    for filter in [
        WineFilter::All,
        WineFilter::Wine("Red".into()),
        WineFilter::Wine("Sparkling".into()),
    ] {
        let view = ds.view(&filter).unwrap();
        let ranking = food_frequencies(&view, TieBreak::FirstSeen).unwrap();
        let total: u64 = ranking.iter().map(|fc| fc.count).sum();
        assert_eq!(total as usize, total_count(&view));

        assert!(ranking.windows(2).all(|w| w[0].count >= w[1].count));

        let all = top_foods(&view, ranking.len() + 5, TieBreak::FirstSeen).unwrap();
        let distinct: HashSet<&str> = all.iter().map(|fc| fc.food.as_str()).collect();
        assert_eq!(distinct.len(), all.len());
        assert_eq!(all.len(), ranking.len());
    }
}

#[test]
fn test_zero_row_selection_is_not_an_error() {
    let (_dir, ds) = sample();
    let view = ds.view(&WineFilter::Wine("Rosé".into())).unwrap();
    assert_eq!(total_count(&view), 0);
    assert!(top_foods(&view, 3, TieBreak::FirstSeen).unwrap().is_empty());
}

#[test]
fn test_crosstab_rows_match_food_frequencies() {
    let dir = TempDir::new().unwrap();
    let path = common::write_frame(dir.path(), "generated.csv", &mut common::generated_frame(120));
    let ds = loader::load(&path, &OpenOptions::default()).unwrap();

    let tab = food_wine_crosstab(&ds).unwrap();
    let ranking = food_frequencies(&ds.full_view(), TieBreak::Alphabetical).unwrap();
    assert_eq!(tab.foods.len(), ranking.len());
    for fc in &ranking {
        assert_eq!(tab.row_total(&fc.food), fc.count, "food {}", fc.food);
    }

    let mut sorted = tab.wines.clone();
    sorted.sort();
    assert_eq!(tab.wines, sorted);
    assert_eq!(tab.get("Fish", "Nonexistent"), 0);
}

#[test]
fn test_missing_food_values_are_excluded() {
    let dir = TempDir::new().unwrap();
    let path = common::write_csv(
        dir.path(),
        "gaps.csv",
        "wine,food\nRed,Steak\nRed,\nWhite,Fish\n,Fish\n",
    );
    let ds = loader::load(&path, &OpenOptions::default()).unwrap();

    assert_eq!(ds.wine_options().unwrap(), vec!["Red", "White"]);
    assert_eq!(distinct_wine_count(&ds).unwrap(), 2);
    let red = ds.view(&WineFilter::Wine("Red".into())).unwrap();
    assert_eq!(total_count(&red), 2);
    assert_eq!(
        pairs(&top_foods(&red, 3, TieBreak::FirstSeen).unwrap()),
        vec![("Steak", 1)]
    );

    let tab = food_wine_crosstab(&ds).unwrap();
    assert_eq!(tab.row_total("Fish"), 1);
    assert_eq!(tab.column_total("Red"), 1);
}

#[test]
fn test_na_markers_count_as_missing() {
    let dir = TempDir::new().unwrap();
    let path = common::write_csv(
        dir.path(),
        "markers.csv",
        "wine,food\nRed,Steak\nNA,Fish\nWhite,N/A\nWhite,NaN\nnull,Cheese\n",
    );
    let ds = loader::load(&path, &OpenOptions::default()).unwrap();

    assert_eq!(ds.wine_options().unwrap(), vec!["Red", "White"]);
    assert_eq!(distinct_wine_count(&ds).unwrap(), 2);
    assert_eq!(
        pairs(&top_foods(&ds.full_view(), 5, TieBreak::FirstSeen).unwrap()),
        vec![("Steak", 1), ("Fish", 1), ("Cheese", 1)]
    );
    let tab = food_wine_crosstab(&ds).unwrap();
    assert_eq!(tab.row_total("Fish"), 0);
    assert_eq!(tab.column_total("White"), 0);
}

#[test]
fn test_numeric_wine_codes_sort_numerically() {
    let dir = TempDir::new().unwrap();
    let path = common::write_csv(
        dir.path(),
        "codes.csv",
        "wine_id,food\n10,Steak\n2,Fish\n1,Cheese\n2,Pasta\n",
    );
    let ds = loader::load(&path, &OpenOptions::default()).unwrap();

    assert_eq!(ds.wine_options().unwrap(), vec!["1", "2", "10"]);
    assert_eq!(ds.resolve_selection("10").unwrap(), WineFilter::Wine("10".into()));
    let two = ds.view(&WineFilter::Wine("2".into())).unwrap();
    assert_eq!(total_count(&two), 2);
}
