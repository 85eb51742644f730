//! The complete input document for the `meal` program.

use crate::body::Body;
use crate::errors::{self, Result};
use crate::foods::{FoodLine, Foods};
use crate::invoker::{self, Invoke, Subcommand};
use crate::user_foods::UserDefinitionFoods;
use itertools::Itertools;
use log::{info, warn};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Tag for the columns of the dietary reference intakes.
pub const INTAKE_STANDARD: &str = "摂取基準";

/// Columns shown for [INTAKE_STANDARD], in display order.
pub const INTAKE_STANDARD_COLUMNS: [&str; 38] = [
    "食品番号",
    "食品名",
    "価格",
    "廃棄率",
    "重量",
    "エネルギー",
    "たんぱく質",
    "脂質",
    "飽和脂肪酸",
    "多価不飽和脂肪酸",
    "炭水化物",
    "食物繊維総量",
    "レチノール活性当量",
    "ビタミンD",
    "α-トコフェロール",
    "ビタミンK",
    "ビタミンB1",
    "ビタミンB2",
    "ナイアシン",
    "ビタミンB6",
    "ビタミンB12",
    "葉酸",
    "パントテン酸",
    "ビオチン",
    "ビタミンC",
    "ナトリウム",
    "カリウム",
    "カルシウム",
    "マグネシウム",
    "リン",
    "鉄",
    "亜鉛",
    "銅",
    "マンガン",
    "ヨウ素",
    "セレン",
    "クロム",
    "モリブデン",
];

/// Lengths of the food combinations to try, either one or several.
pub trait Combination {
    fn into_combination(self) -> Vec<usize>;
}

impl Combination for usize {
    fn into_combination(self) -> Vec<usize> {
        vec![self]
    }
}

impl<const N: usize> Combination for [usize; N] {
    fn into_combination(self) -> Vec<usize> {
        self.to_vec()
    }
}

impl Combination for &[usize] {
    fn into_combination(self) -> Vec<usize> {
        self.to_vec()
    }
}

impl Combination for Vec<usize> {
    fn into_combination(self) -> Vec<usize> {
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Options {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_status: Option<bool>,
}

#[derive(Clone, Debug, Default, Serialize)]
struct Data {
    #[serde(skip_serializing_if = "Option::is_none")]
    foods: Option<Vec<FoodLine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<Body>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name_list: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    combination: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_definition_foods: Option<UserDefinitionFoods>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<Options>,
}

/// Builder for an input document.
///
/// [Body], [Foods] and [UserDefinitionFoods] are copied in when attached,
/// so one builder can feed several documents without them affecting each other.
#[derive(Clone, Debug, Default)]
pub struct Document {
    data: Data,
    path: Option<PathBuf>,
}

impl Document {
    pub fn new() -> Document {
        Document::default()
    }

    pub fn foods(mut self, foods: &Foods) -> Self {
        self.data.foods = Some(foods.lines().to_vec());
        self
    }

    pub fn body(mut self, body: &Body) -> Self {
        self.data.body = Some(body.clone());
        self
    }

    pub fn user_definition_foods(mut self, foods: &UserDefinitionFoods) -> Self {
        self.data.user_definition_foods = Some(foods.clone());
        self
    }

    /// Select the columns to display by tag. Only [INTAKE_STANDARD] is known;
    /// other tags are ignored.
    pub fn name_list(mut self, tag: &str) -> Self {
        if tag == INTAKE_STANDARD {
            self.data.name_list = Some(
                INTAKE_STANDARD_COLUMNS
                    .iter()
                    .map(|&s| s.to_owned())
                    .collect_vec(),
            );
        } else {
            warn!(target: "mealkit", "ignoring unknown name list {:?}", tag);
        }
        self
    }

    pub fn combination<C: Combination>(mut self, combination: C) -> Self {
        self.data.combination = Some(combination.into_combination());
        self
    }

    pub fn comb<C: Combination>(self, combination: C) -> Self {
        self.combination(combination)
    }

    pub fn show_status(mut self, show_status: bool) -> Self {
        self.data.options = Some(Options {
            show_status: Some(show_status),
        });
        self
    }

    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn target(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.data)?)
    }

    fn require_path(&self) -> Result<&Path> {
        self.target()
            .ok_or_else(|| errors::invalid_state_ref("no document path, call path() first"))
    }

    /// Write the document to its path, replacing any existing file.
    pub fn write(self) -> Result<Self> {
        let path = self.require_path()?;
        let json = self.to_json()?;
        info!(target: "mealkit", "write: {}", path.display());
        fs::write(path, json)?;
        Ok(self)
    }

    /// Run `meal a` on the written document.
    pub fn automatic_selection<I: Invoke + ?Sized>(self, invoker: &I) -> Result<Self> {
        let path = self.require_path()?;
        invoker::run(invoker, Subcommand::AutomaticSelection, &[path])?;
        Ok(self)
    }

    /// Run `meal c` on the written document.
    pub fn calc<I: Invoke + ?Sized>(self, invoker: &I) -> Result<Self> {
        let path = self.require_path()?;
        invoker::run(invoker, Subcommand::Calc, &[path])?;
        Ok(self)
    }
}
