//! Reduce a raw food composition table to a name/price lookup.

use crate::errors::Result;
use itertools::Itertools;
use log::info;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fs;
use std::path::Path;
use std::result;

/// Where the raw table is read from unless told otherwise.
pub const DEFAULT_TABLE: &str = "foods.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoodPrice {
    pub name: String,
    pub price: String,
}

impl Serialize for FoodPrice {
    fn serialize<S: Serializer>(&self, serializer: S) -> result::Result<S::Ok, S::Error> {
        (&self.name, &self.price).serialize(serializer)
    }
}

#[derive(Serialize)]
struct PriceTable<'a> {
    foods: &'a [FoodPrice],
}

fn clean(cell: &str) -> String {
    cell.replace('"', "").trim().to_owned()
}

/// Extract `(name, price)` from columns 1 and 3 of each record.
/// Records with fewer than four cells are skipped.
pub fn reduce(text: &str) -> Vec<FoodPrice> {
    text.split('\n')
        .filter(|line| !line.is_empty())
        .map(|line| line.split(',').collect_vec())
        .filter(|cells| cells.len() > 3)
        .map(|cells| FoodPrice {
            name: clean(cells[1]),
            price: clean(cells[3]),
        })
        .collect_vec()
}

/// Pretty-print the table, with each `[name, price]` pair kept on one line.
pub fn render(prices: &[FoodPrice]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    PriceTable { foods: prices }.serialize(&mut ser)?;
    let text = String::from_utf8(buf)?;

    let open = Regex::new(r#"\[.*?\n.*?""#)?;
    let middle = Regex::new(r#"",.*?\n.*?""#)?;
    let close = Regex::new(r#""\n.*?]"#)?;
    let text = open.replace_all(&text, r#"[""#);
    let text = middle.replace_all(&text, r#"", ""#);
    let text = close.replace_all(&text, r#""]"#);
    Ok(text.into_owned())
}

/// Read the raw table at `input`, and write the reduced table to `output`.
pub fn convert(input: &Path, output: &Path) -> Result<usize> {
    info!(target: "mealkit", "read: {}", input.display());
    let text = fs::read_to_string(input)?;
    let prices = reduce(&text);
    info!(target: "mealkit", "foods with a price column: {}", prices.len());
    let rendered = render(&prices)?;
    info!(target: "mealkit", "write: {}", output.display());
    fs::write(output, rendered)?;
    Ok(prices.len())
}
