//! Observation records.
//!
//! An actor never learns global coordinates. Everything it sees is an
//! [`Image`] whose transient part says where the thing is *relative to
//! the actor*, as a [`Direction`] marker plus the signed offset.

use serde::{Deserialize, Serialize};

use crate::UnitId;

/// Label carried by every piece of information an actor can observe.
pub const LABEL_OBSERVABLE: &str = "observable";

/// Sign of a relative offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Positive offset
    Ahead,
    /// Zero offset
    At,
    /// Negative offset
    Behind,
}

impl Direction {
    /// Classifies a signed offset.
    pub fn of(delta: i64) -> Self {
        match delta.signum() {
            1 => Direction::Ahead,
            -1 => Direction::Behind,
            _ => Direction::At,
        }
    }

    /// Returns the literal marker used in info labels.
    pub fn label(self) -> &'static str {
        match self {
            Direction::Ahead => "[pos]",
            Direction::At => "[zro]",
            Direction::Behind => "[neg]",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Quantitative part of an [`Info`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

/// A labelled piece of information.
///
/// `labels` categorize it qualitatively (`["observable", "[itemDirection]", "[pos]"]`),
/// `value` carries the quantity, if any (`Some(3)` for three steps away).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub labels: Vec<String>,
    pub value: Option<Scalar>,
}

impl Info {
    /// Creates an info record.
    pub fn new<I, S>(labels: I, value: Option<Scalar>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            value,
        }
    }

    /// Creates an observable, value-less info: `[observable, category, kind]`.
    pub fn kind(category: &str, kind: &str) -> Self {
        Self::new([LABEL_OBSERVABLE, category, kind], None)
    }

    /// Creates an observable direction info carrying the signed offset.
    pub fn direction(axis: &str, delta: i64) -> Self {
        Self::new(
            [LABEL_OBSERVABLE, axis, Direction::of(delta).label()],
            Some(Scalar::Int(delta)),
        )
    }

    /// Returns true if `label` is among the labels.
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Returns the value as an integer, if it is one.
    pub fn as_int(&self) -> Option<i64> {
        match self.value {
            Some(Scalar::Int(v)) => Some(v),
            _ => None,
        }
    }
}

/// Everything an actor sees about a single unit.
///
/// `permanent` holds what the unit is (its type, its shape),
/// `transient` holds where it is relative to the observer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: UnitId,
    pub name: String,
    pub permanent: Vec<Info>,
    pub transient: Vec<Info>,
}

/// Contact information fed back to an actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Touch {
    pub id: UnitId,
    pub name: String,
    pub info: Info,
}
