//! Argument bags: call arguments keyed by position or by parameter name.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::value::ParamValue;

/// Key of an argument bag entry.
///
/// Positional keys are unresolved call arguments; named keys are resolved
/// parameters. Positional keys order before named ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum ParamKey {
    Position(usize),
    Name(String),
}

impl ParamKey {
    /// Parse a textual key, treating canonical non-negative integers as positions.
    pub fn parse(key: &str) -> Self {
        match key.parse::<usize>() {
            Ok(position) if position.to_string() == key => ParamKey::Position(position),
            _ => ParamKey::Name(key.to_string()),
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            ParamKey::Name(name) => Some(name),
            ParamKey::Position(_) => None,
        }
    }

    pub fn is_position(&self) -> bool {
        matches!(self, ParamKey::Position(_))
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKey::Position(position) => write!(f, "{position}"),
            ParamKey::Name(name) => f.write_str(name),
        }
    }
}

impl<'de> Deserialize<'de> for ParamKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = ParamKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a parameter name or position")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<ParamKey, E> {
                usize::try_from(v)
                    .map(ParamKey::Position)
                    .map_err(|_| E::custom("position out of range"))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ParamKey, E> {
                Ok(ParamKey::parse(v))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

impl From<usize> for ParamKey {
    fn from(position: usize) -> Self {
        ParamKey::Position(position)
    }
}

impl From<&str> for ParamKey {
    fn from(name: &str) -> Self {
        ParamKey::Name(name.to_string())
    }
}

impl From<String> for ParamKey {
    fn from(name: String) -> Self {
        ParamKey::Name(name)
    }
}

/// Arguments for one link, mixing positional and named entries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArgumentBag {
    entries: BTreeMap<ParamKey, ParamValue>,
}

impl ArgumentBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bag holding `values` at positions `0..n`.
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        Self {
            entries: values
                .into_iter()
                .enumerate()
                .map(|(i, v)| (ParamKey::Position(i), v.into()))
                .collect(),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<ParamKey>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(
        &mut self,
        key: impl Into<ParamKey>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Named entry lookup.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.get(&ParamKey::Name(name.to_string()))
    }

    pub fn get_key(&self, key: &ParamKey) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn contains_position(&self, position: usize) -> bool {
        self.entries.contains_key(&ParamKey::Position(position))
    }

    pub fn remove(&mut self, key: &ParamKey) -> Option<ParamValue> {
        self.entries.remove(key)
    }

    pub fn remove_name(&mut self, name: &str) -> Option<ParamValue> {
        self.entries.remove(&ParamKey::Name(name.to_string()))
    }

    pub fn remove_position(&mut self, position: usize) -> Option<ParamValue> {
        self.entries.remove(&ParamKey::Position(position))
    }

    /// Positional keys still present, in ascending order.
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.keys().filter_map(|key| match key {
            ParamKey::Position(position) => Some(*position),
            ParamKey::Name(_) => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParamKey, &ParamValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(ParamKey, ParamValue)> for ArgumentBag {
    fn from_iter<T: IntoIterator<Item = (ParamKey, ParamValue)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ArgumentBag {
    type Item = (ParamKey, ParamValue);
    type IntoIter = std::collections::btree_map::IntoIter<ParamKey, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ArgumentBag {
    type Item = (&'a ParamKey, &'a ParamValue);
    type IntoIter = std::collections::btree_map::Iter<'a, ParamKey, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
