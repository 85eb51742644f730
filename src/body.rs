//! The person the meal plan is calculated for.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn parse(s: &str) -> Option<Gender> {
        match s {
            "female" => Some(Gender::Female),
            "male" => Some(Gender::Male),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Gender::Female => write!(f, "female"),
            Gender::Male => write!(f, "male"),
        }
    }
}

/// Physical activity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pal {
    Low,
    Moderate,
    High,
}

impl Pal {
    pub fn parse(s: &str) -> Option<Pal> {
        match s {
            "low" => Some(Pal::Low),
            "moderate" => Some(Pal::Moderate),
            "high" => Some(Pal::High),
            _ => None,
        }
    }

    /// Levels are also known by the numbers 1, 2 and 3.
    pub fn from_code(code: i64) -> Option<Pal> {
        match code {
            1 => Some(Pal::Low),
            2 => Some(Pal::Moderate),
            3 => Some(Pal::High),
            _ => None,
        }
    }
}

impl fmt::Display for Pal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Pal::Low => write!(f, "low"),
            Pal::Moderate => write!(f, "moderate"),
            Pal::High => write!(f, "high"),
        }
    }
}

/// Anything that may name a [Gender].
pub trait ToGender: fmt::Debug {
    fn to_gender(&self) -> Option<Gender>;
}

impl ToGender for Gender {
    fn to_gender(&self) -> Option<Gender> {
        Some(*self)
    }
}

impl ToGender for &str {
    fn to_gender(&self) -> Option<Gender> {
        Gender::parse(self)
    }
}

impl ToGender for String {
    fn to_gender(&self) -> Option<Gender> {
        Gender::parse(self)
    }
}

/// Anything that may name a [Pal], either by name or by number.
pub trait ToPal: fmt::Debug {
    fn to_pal(&self) -> Option<Pal>;
}

impl ToPal for Pal {
    fn to_pal(&self) -> Option<Pal> {
        Some(*self)
    }
}

impl ToPal for &str {
    fn to_pal(&self) -> Option<Pal> {
        Pal::parse(self)
    }
}

impl ToPal for String {
    fn to_pal(&self) -> Option<Pal> {
        Pal::parse(self)
    }
}

macro_rules! pal_code {
    ($($t:ty),*) => {
        $(
            impl ToPal for $t {
                fn to_pal(&self) -> Option<Pal> {
                    i64::try_from(*self).ok().and_then(Pal::from_code)
                }
            }
        )*
    };
}

pal_code!(i32, i64, u8, u32, u64, usize);

/// Body measurements and activity, the `body` part of an input document.
///
/// Every field is optional; unset fields are left out of the JSON.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Body {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Kilograms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Centimetres.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pal: Option<Pal>,
    /// Number of days the plan covers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
}

impl Body {
    pub fn new() -> Body {
        Body::default()
    }

    pub fn age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn weight(mut self, weight: impl Into<f64>) -> Self {
        self.weight = Some(weight.into());
        self
    }

    pub fn height(mut self, height: impl Into<f64>) -> Self {
        self.height = Some(height.into());
        self
    }

    /// Unknown values are ignored and leave the field as it was.
    pub fn gender<T: ToGender>(mut self, gender: T) -> Self {
        self.set_gender(gender);
        self
    }

    /// Unknown values are ignored and leave the field as it was.
    pub fn pal<T: ToPal>(mut self, pal: T) -> Self {
        self.set_pal(pal);
        self
    }

    pub fn days(mut self, days: u32) -> Self {
        self.days = Some(days);
        self
    }

    /// Returns `false` if the value was not recognized.
    pub fn set_gender<T: ToGender>(&mut self, gender: T) -> bool {
        match gender.to_gender() {
            Some(g) => {
                self.gender = Some(g);
                true
            }
            None => {
                warn!(target: "mealkit", "ignoring unknown gender {:?}", gender);
                false
            }
        }
    }

    /// Returns `false` if the value was not recognized.
    pub fn set_pal<T: ToPal>(&mut self, pal: T) -> bool {
        match pal.to_pal() {
            Some(p) => {
                self.pal = Some(p);
                true
            }
            None => {
                warn!(target: "mealkit", "ignoring unknown pal {:?}", pal);
                false
            }
        }
    }
}
