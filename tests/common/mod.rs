#![allow(dead_code)]

use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Five pairings: two Red (Steak, Cheese) and three White (Fish, Fish, Cheese).
pub const SAMPLE_CSV: &str = "Wine Type,Food Pairing,Region\n\
Red,Steak,Bordeaux\n\
Red,Cheese,Rioja\n\
White,Fish,Chablis\n\
White,Fish,Mosel\n\
White,Cheese,Loire\n";

pub fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

pub fn write_sample_csv(dir: &Path) -> PathBuf {
    write_csv(dir, "wine_food_pairing.csv", SAMPLE_CSV)
}

/// Write a frame as CSV with polars, for larger generated datasets.
pub fn write_frame(dir: &Path, name: &str, df: &mut DataFrame) -> PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();
    path
}

/// `rows` pairings cycling through wines and foods of different frequencies.
pub fn generated_frame(rows: usize) -> DataFrame {
    let wines = ["Red", "White", "Rosé", "Sparkling"];
    let foods = ["Steak", "Fish", "Cheese", "Pasta", "Dessert", "Salad", "Fish", "Cheese", "Fish"];
    df!(
        "wine_type" => (0..rows).map(|i| wines[i % wines.len()]).collect::<Vec<_>>(),
        "best_food" => (0..rows).map(|i| foods[(i * 7) % foods.len()]).collect::<Vec<_>>(),
        "rating" => (0..rows).map(|i| (i % 5) as i32).collect::<Vec<i32>>()
    )
    .unwrap()
}
