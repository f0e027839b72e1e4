//! Structured search filters.
//!
//! Every dimension has an `All` variant meaning "no constraint"; it is
//! the default and never contributes to the augmented query.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A filter value string that is not part of the enumerated set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {dimension} filter value: {value:?}")]
pub struct UnknownFilterValue {
    pub dimension: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    All,
    Men,
    Women,
    Unisex,
}

impl Gender {
    pub const VALUES: [Gender; 4] = [Gender::All, Gender::Men, Gender::Women, Gender::Unisex];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::All => "all",
            Gender::Men => "men",
            Gender::Women => "women",
            Gender::Unisex => "unisex",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::All => "All",
            Gender::Men => "Men",
            Gender::Women => "Women",
            Gender::Unisex => "Unisex",
        }
    }

    /// Wire value, or `None` for the `All` sentinel.
    pub fn constraint(&self) -> Option<&'static str> {
        match self {
            Gender::All => None,
            other => Some(other.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgeRange {
    #[default]
    All,
    Kids,
    Teens,
    YoungAdults,
    Adults,
    Seniors,
}

impl AgeRange {
    pub const VALUES: [AgeRange; 6] = [
        AgeRange::All,
        AgeRange::Kids,
        AgeRange::Teens,
        AgeRange::YoungAdults,
        AgeRange::Adults,
        AgeRange::Seniors,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeRange::All => "all",
            AgeRange::Kids => "kids",
            AgeRange::Teens => "teens",
            AgeRange::YoungAdults => "young-adults",
            AgeRange::Adults => "adults",
            AgeRange::Seniors => "seniors",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeRange::All => "All Ages",
            AgeRange::Kids => "Kids (0-12)",
            AgeRange::Teens => "Teens (13-19)",
            AgeRange::YoungAdults => "Young Adults (20-29)",
            AgeRange::Adults => "Adults (30-49)",
            AgeRange::Seniors => "Seniors (50+)",
        }
    }

    /// Wire value, or `None` for the `All` sentinel.
    pub fn constraint(&self) -> Option<&'static str> {
        match self {
            AgeRange::All => None,
            other => Some(other.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorStyle {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "warm")]
    Warm,
    #[serde(rename = "cool")]
    Cool,
    #[serde(rename = "Pastels&Bright")]
    PastelsAndBrights,
}

impl ColorStyle {
    pub const VALUES: [ColorStyle; 5] = [
        ColorStyle::All,
        ColorStyle::Neutral,
        ColorStyle::Warm,
        ColorStyle::Cool,
        ColorStyle::PastelsAndBrights,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorStyle::All => "all",
            ColorStyle::Neutral => "neutral",
            ColorStyle::Warm => "warm",
            ColorStyle::Cool => "cool",
            ColorStyle::PastelsAndBrights => "Pastels&Bright",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ColorStyle::All => "All colors",
            ColorStyle::Neutral => "Neutral colors",
            ColorStyle::Warm => "Warm colors",
            ColorStyle::Cool => "Cool colors",
            ColorStyle::PastelsAndBrights => "Pastels & Brights",
        }
    }

    /// Wire value, or `None` for the `All` sentinel.
    pub fn constraint(&self) -> Option<&'static str> {
        match self {
            ColorStyle::All => None,
            other => Some(other.as_str()),
        }
    }
}

impl FromStr for Gender {
    type Err = UnknownFilterValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::VALUES
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownFilterValue {
                dimension: "gender",
                value: s.to_string(),
            })
    }
}

impl FromStr for AgeRange {
    type Err = UnknownFilterValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgeRange::VALUES
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownFilterValue {
                dimension: "age range",
                value: s.to_string(),
            })
    }
}

impl FromStr for ColorStyle {
    type Err = UnknownFilterValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorStyle::VALUES
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownFilterValue {
                dimension: "color style",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AgeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ColorStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user's current filter selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub age_range: AgeRange,
    #[serde(default)]
    pub color_style: ColorStyle,
}

impl SearchFilters {
    pub fn new(gender: Gender, age_range: AgeRange, color_style: ColorStyle) -> Self {
        Self {
            gender,
            age_range,
            color_style,
        }
    }

    /// True when every dimension is the `All` sentinel.
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }
}
