//! The `foods` part of an input document: which foods, how much, at what price.

use crate::errors::{self, Result};
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};

const NO_CURRENT: &str = "no current food line, call food() first";

/// One line of the diet.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct FoodLine {
    /// Food number in the composition table.
    pub number: String,
    /// Grams.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Free-form group name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Whether the weight includes the inedible part.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_refuse: Option<bool>,
}

impl FoodLine {
    pub fn new(number: &str) -> FoodLine {
        FoodLine {
            number: number.to_owned(),
            weight: None,
            price: None,
            class: None,
            include_refuse: None,
        }
    }
}

/// One or more weights, so that `weight(200)` and `weight([10, 20, 30])` both work.
pub trait Weights {
    fn into_weights(self) -> Vec<f64>;
}

macro_rules! scalar_weight {
    ($($t:ty),*) => {
        $(
            impl Weights for $t {
                fn into_weights(self) -> Vec<f64> {
                    vec![f64::from(self)]
                }
            }
        )*
    };
}

scalar_weight!(f64, f32, i32, u32, i16, u16, i8, u8);

impl<T: Copy + Into<f64>, const N: usize> Weights for [T; N] {
    fn into_weights(self) -> Vec<f64> {
        self.iter().map(|&w| w.into()).collect_vec()
    }
}

impl<T: Copy + Into<f64>> Weights for &[T] {
    fn into_weights(self) -> Vec<f64> {
        self.iter().map(|&w| w.into()).collect_vec()
    }
}

impl<T: Copy + Into<f64>> Weights for Vec<T> {
    fn into_weights(self) -> Vec<f64> {
        self.iter().map(|&w| w.into()).collect_vec()
    }
}

/// Builder for the list of diet lines.
///
/// All setters other than [Foods::food] act on the current line, which is
/// the line most recently added. Setting a weight on a line that already has
/// one does not overwrite it: a new line for the same food is added instead.
/// This is how several alternative amounts of one food are expressed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Foods {
    lines: Vec<FoodLine>,
    current: Option<usize>,
}

impl Foods {
    pub fn new() -> Foods {
        Foods::default()
    }

    pub fn lines(&self) -> &[FoodLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line that setters currently act on.
    pub fn current(&self) -> Option<&FoodLine> {
        self.current.map(|i| &self.lines[i])
    }

    fn current_index(&self) -> Result<usize> {
        self.current.ok_or_else(|| errors::invalid_state_ref(NO_CURRENT))
    }

    fn current_mut(&mut self) -> Result<&mut FoodLine> {
        let i = self.current_index()?;
        Ok(&mut self.lines[i])
    }

    fn push(&mut self, line: FoodLine) {
        self.lines.push(line);
        self.current = Some(self.lines.len() - 1);
    }

    /// Start a new line.
    pub fn food(mut self, number: &str) -> Self {
        self.push(FoodLine::new(number));
        self
    }

    pub fn f(self, number: &str) -> Self {
        self.food(number)
    }

    /// Set the weight of the current line, or add sibling lines if it already has one.
    /// Several weights behave like successive calls with one weight each.
    pub fn weight<W: Weights>(mut self, weight: W) -> Result<Self> {
        let mut i = self.current_index()?;
        for w in weight.into_weights() {
            if self.lines[i].weight.is_some() {
                let mut line = FoodLine::new(&self.lines[i].number);
                line.weight = Some(w);
                debug!(target: "mealkit", "food {}: new line for weight {}", line.number, w);
                self.push(line);
                i = self.lines.len() - 1;
            } else {
                self.lines[i].weight = Some(w);
            }
        }
        Ok(self)
    }

    pub fn w<W: Weights>(self, weight: W) -> Result<Self> {
        self.weight(weight)
    }

    pub fn price(mut self, price: impl Into<f64>) -> Result<Self> {
        self.current_mut()?.price = Some(price.into());
        Ok(self)
    }

    pub fn p(self, price: impl Into<f64>) -> Result<Self> {
        self.price(price)
    }

    /// Derive the price from the weight of the current line.
    /// Does nothing if the line has no weight yet.
    pub fn price_per_gram(mut self, price_per_gram: impl Into<f64>) -> Result<Self> {
        let price_per_gram: f64 = price_per_gram.into();
        let line = self.current_mut()?;
        match line.weight {
            Some(weight) => line.price = Some(price_per_gram * weight),
            None => debug!(target: "mealkit", "food {}: no weight, price per gram ignored", line.number),
        }
        Ok(self)
    }

    pub fn ppg(self, price_per_gram: impl Into<f64>) -> Result<Self> {
        self.price_per_gram(price_per_gram)
    }

    pub fn class(mut self, class: &str) -> Result<Self> {
        self.current_mut()?.class = Some(class.to_owned());
        Ok(self)
    }

    pub fn c(self, class: &str) -> Result<Self> {
        self.class(class)
    }

    pub fn include_refuse(mut self, include_refuse: bool) -> Result<Self> {
        self.current_mut()?.include_refuse = Some(include_refuse);
        Ok(self)
    }

    pub fn ir(self, include_refuse: bool) -> Result<Self> {
        self.include_refuse(include_refuse)
    }

    /// A copy with all weights and prices multiplied by `rate`.
    ///
    /// `class` and `include_refuse` are carried over unchanged, since they do
    /// not depend on the amount.
    pub fn scale(&self, rate: f64) -> Foods {
        let lines = self
            .lines
            .iter()
            .map(|line| FoodLine {
                number: line.number.clone(),
                weight: line.weight.map(|w| w * rate),
                price: line.price.map(|p| p * rate),
                class: line.class.clone(),
                include_refuse: line.include_refuse,
            })
            .collect_vec();
        Foods {
            lines,
            current: self.current,
        }
    }

    pub fn change_weight(&self, rate: f64) -> Foods {
        self.scale(rate)
    }

    /// Weight of `n` eggs, at 50 g each.
    pub fn egg(self, n: u32) -> Result<Self> {
        self.weight(50.0 * f64::from(n))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::InvalidState;

    fn line(number: &str, weight: Option<f64>, price: Option<f64>) -> FoodLine {
        FoodLine {
            weight,
            price,
            ..FoodLine::new(number)
        }
    }

    #[test]
    fn second_weight_adds_line() {
        let foods = Foods::new().food("A").weight(10).unwrap().weight(20).unwrap();
        assert_eq!(
            foods.lines(),
            [line("A", Some(10.0), None), line("A", Some(20.0), None)]
        );
    }

    #[test]
    fn weight_array_is_sequential() {
        let a = Foods::new().food("A").w([10, 20, 30]).unwrap();
        let b = Foods::new()
            .food("A")
            .w(10)
            .unwrap()
            .w(20)
            .unwrap()
            .w(30)
            .unwrap();
        assert_eq!(a.lines(), b.lines());
        assert_eq!(a.len(), 3);
        assert_eq!(a.lines()[2], line("A", Some(30.0), None));
        let c = Foods::new().food("A").w(vec![10.0, 20.0, 30.0]).unwrap();
        assert_eq!(a.lines(), c.lines());
    }

    #[test]
    fn weight_array_after_existing_weight() {
        let foods = Foods::new().f("A").w(5).unwrap().w([10.5, 20.5]).unwrap();
        let weights = foods.lines().iter().map(|l| l.weight).collect_vec();
        assert_eq!(weights, [Some(5.0), Some(10.5), Some(20.5)]);
    }

    #[test]
    fn split_line_drops_price() {
        let foods = Foods::new().food("A").w(20).unwrap().p(30).unwrap().w(40).unwrap();
        assert_eq!(
            foods.lines(),
            [line("A", Some(20.0), Some(30.0)), line("A", Some(40.0), None)]
        );
        assert_eq!(foods.current(), Some(&line("A", Some(40.0), None)));
    }

    #[test]
    fn price_per_gram_after_weight() {
        let foods = Foods::new().food("A").weight(50).unwrap().price_per_gram(2).unwrap();
        assert_eq!(foods.lines(), [line("A", Some(50.0), Some(100.0))]);
    }

    #[test]
    fn price_per_gram_without_weight() {
        let foods = Foods::new().food("A").ppg(2).unwrap();
        assert_eq!(foods.lines(), [line("A", None, None)]);
    }

    #[test]
    fn price_overwrites() {
        let foods = Foods::new().food("A").w(10).unwrap().p(1).unwrap().p(2.5).unwrap();
        assert_eq!(foods.lines()[0].price, Some(2.5));
    }

    #[test]
    fn setters_need_a_line() {
        let e = Foods::new().weight(10).unwrap_err();
        assert!(e.downcast_ref::<InvalidState>().is_some());
        assert!(Foods::new().w([1, 2]).is_err());
        assert!(Foods::new().price(1).is_err());
        assert!(Foods::new().ppg(1).is_err());
        assert!(Foods::new().class("x").is_err());
        assert!(Foods::new().ir(true).is_err());
    }

    #[test]
    fn class_and_refuse() {
        let foods = Foods::new()
            .food("02001")
            .w(50)
            .unwrap()
            .ir(true)
            .unwrap()
            .food("u2")
            .c("test")
            .unwrap();
        assert_eq!(foods.lines()[0].include_refuse, Some(true));
        assert_eq!(foods.lines()[1].class.as_deref(), Some("test"));
        let json = serde_json::to_string(foods.lines()).unwrap();
        assert_eq!(
            json,
            r#"[{"number":"02001","weight":50.0,"include_refuse":true},{"number":"u2","class":"test"}]"#
        );
    }

    #[test]
    fn scale_is_pure() {
        let foods = Foods::new().food("A").w(200).unwrap().p(100).unwrap();
        let half = foods.scale(0.5);
        assert_eq!(half.lines(), [line("A", Some(100.0), Some(50.0))]);
        assert_eq!(foods.lines(), [line("A", Some(200.0), Some(100.0))]);
    }

    #[test]
    fn scale_keeps_missing_fields_missing() {
        let foods = Foods::new()
            .food("u1")
            .c("g")
            .unwrap()
            .ir(true)
            .unwrap()
            .food("B")
            .w(10)
            .unwrap()
            .change_weight(3.0);
        assert_eq!(foods.lines()[0].weight, None);
        assert_eq!(foods.lines()[0].price, None);
        assert_eq!(foods.lines()[0].class.as_deref(), Some("g"));
        assert_eq!(foods.lines()[0].include_refuse, Some(true));
        assert_eq!(foods.lines()[1].include_refuse, None);
        assert_eq!(foods.lines()[1].weight, Some(30.0));
        let foods = foods.w(5).unwrap();
        assert_eq!(foods.len(), 3);
    }

    #[test]
    fn eggs() {
        let foods = Foods::new().food("12004").egg(2).unwrap().egg(1).unwrap();
        assert_eq!(foods.len(), 2);
        assert_eq!(foods.lines()[0].weight, Some(100.0));
        assert_eq!(foods.lines()[1].weight, Some(50.0));
        assert!(Foods::new().egg(1).is_err());
    }
}
