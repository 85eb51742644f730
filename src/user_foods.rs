//! Foods that are not in the composition table.
//!
//! Each entry gets a number of its own, a weight, and whatever columns
//! (`食品名`, `エネルギー`, ...) the caller wants to provide as strings.
//! In the document they appear as an object keyed by number.

use crate::errors::{self, Result};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::result;

const NO_CURRENT: &str = "no current user definition food, call food() first";

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UserFood {
    pub weight: f64,
    pub data: BTreeMap<String, String>,
}

/// Builder for the `user_definition_foods` part of an input document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserDefinitionFoods {
    entries: Vec<(String, UserFood)>,
    current: Option<usize>,
}

impl UserDefinitionFoods {
    pub fn new() -> UserDefinitionFoods {
        UserDefinitionFoods::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, number: &str) -> Option<&UserFood> {
        self.entries
            .iter()
            .find(|(n, _)| n == number)
            .map(|(_, food)| food)
    }

    fn current_mut(&mut self) -> Result<&mut UserFood> {
        match self.current {
            Some(i) => Ok(&mut self.entries[i].1),
            None => Err(errors::invalid_state_ref(NO_CURRENT)),
        }
    }

    /// Select the entry with this number, adding it if needed.
    pub fn food(mut self, number: &str) -> Self {
        let i = match self.entries.iter().position(|(n, _)| n == number) {
            Some(i) => i,
            None => {
                self.entries.push((number.to_owned(), UserFood::default()));
                self.entries.len() - 1
            }
        };
        self.current = Some(i);
        self
    }

    pub fn f(self, number: &str) -> Self {
        self.food(number)
    }

    pub fn weight(mut self, weight: impl Into<f64>) -> Result<Self> {
        self.current_mut()?.weight = weight.into();
        Ok(self)
    }

    pub fn w(self, weight: impl Into<f64>) -> Result<Self> {
        self.weight(weight)
    }

    /// Add columns to the current entry. Existing columns with the same name are replaced.
    pub fn data<I, K, V>(mut self, data: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let food = self.current_mut()?;
        for (k, v) in data {
            food.data.insert(k.into(), v.into());
        }
        Ok(self)
    }
}

impl Serialize for UserDefinitionFoods {
    fn serialize<S: Serializer>(&self, serializer: S) -> result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (number, food) in &self.entries {
            map.serialize_entry(number, food)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::InvalidState;

    #[test]
    fn build_entries() {
        let udf = UserDefinitionFoods::new()
            .food("1")
            .w(100)
            .unwrap()
            .food("2")
            .w(0)
            .unwrap()
            .data([("食品名", "2番目")])
            .unwrap()
            .food("3")
            .w(200)
            .unwrap()
            .data([("食品名", "3番目"), ("エネルギー", "100")])
            .unwrap();
        assert_eq!(udf.len(), 3);
        assert_eq!(udf.get("1").unwrap().weight, 100.0);
        assert!(udf.get("1").unwrap().data.is_empty());
        assert_eq!(udf.get("3").unwrap().data["エネルギー"], "100");
        assert!(udf.get("4").is_none());
    }

    #[test]
    fn serialize_keyed_by_number() {
        let udf = UserDefinitionFoods::new()
            .food("b")
            .w(1)
            .unwrap()
            .food("a")
            .w(2)
            .unwrap()
            .data(vec![("x".to_owned(), "y".to_owned())])
            .unwrap();
        assert_eq!(
            serde_json::to_string(&udf).unwrap(),
            r#"{"b":{"weight":1.0,"data":{}},"a":{"weight":2.0,"data":{"x":"y"}}}"#
        );
    }

    #[test]
    fn same_number_selects_existing() {
        let udf = UserDefinitionFoods::new()
            .food("1")
            .w(10)
            .unwrap()
            .food("2")
            .food("1")
            .w(20)
            .unwrap();
        assert_eq!(udf.len(), 2);
        assert_eq!(udf.get("1").unwrap().weight, 20.0);
    }

    #[test]
    fn setters_need_an_entry() {
        let e = UserDefinitionFoods::new().w(1).unwrap_err();
        assert!(e.downcast_ref::<InvalidState>().is_some());
        assert!(UserDefinitionFoods::new().data([("a", "b")]).is_err());
    }
}
