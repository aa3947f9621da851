//! Single-attribute predicates over close approaches.
//!
//! An [`AttributeFilter`] pairs one of five attributes with a [`Comparator`]
//! and a reference value. Evaluating it reads the attribute from a
//! [`LinkedApproach`] and compares it against the reference:
//!
//! | Variant | Attribute read | Reference |
//! |---------|----------------|-----------|
//! | [`Date`](AttributeFilter::Date) | calendar date of the approach time | [`NaiveDate`] |
//! | [`Distance`](AttributeFilter::Distance) | approach distance (au) | `f64` |
//! | [`Velocity`](AttributeFilter::Velocity) | relative velocity (km/s) | `f64` |
//! | [`Diameter`](AttributeFilter::Diameter) | NEO diameter (km) | `f64` |
//! | [`Hazardous`](AttributeFilter::Hazardous) | NEO hazard flag | `bool` |
//!
//! Comparisons follow IEEE semantics, so a NaN diameter never satisfies a
//! diameter filter. An approach without a timestamp never satisfies a date
//! filter.

use std::fmt;

use chrono::NaiveDate;

use crate::model::{LinkedApproach, NearEarthObject};

/// Binary comparison applied as `attribute <op> reference`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Lt,
    Le,
    Eq,
    Ge,
    Gt,
}

impl Comparator {
    pub fn apply<T: PartialOrd>(self, lhs: &T, rhs: &T) -> bool {
        match self {
            Comparator::Lt => lhs < rhs,
            Comparator::Le => lhs <= rhs,
            Comparator::Eq => lhs == rhs,
            Comparator::Ge => lhs >= rhs,
            Comparator::Gt => lhs > rhs,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Comparator::Lt => "<",
            Comparator::Le => "<=",
            Comparator::Eq => "==",
            Comparator::Ge => ">=",
            Comparator::Gt => ">",
        }
    }
}

/// The attribute a filter reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Date,
    Distance,
    Velocity,
    Diameter,
    Hazardous,
}

impl Attribute {
    pub fn name(self) -> &'static str {
        match self {
            Attribute::Date => "date",
            Attribute::Distance => "distance",
            Attribute::Velocity => "velocity",
            Attribute::Diameter => "diameter",
            Attribute::Hazardous => "hazardous",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A predicate on one attribute of a close approach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttributeFilter {
    Date(Comparator, NaiveDate),
    Distance(Comparator, f64),
    Velocity(Comparator, f64),
    Diameter(Comparator, f64),
    Hazardous(Comparator, bool),
}

impl AttributeFilter {
    pub fn attribute(&self) -> Attribute {
        match self {
            AttributeFilter::Date(..) => Attribute::Date,
            AttributeFilter::Distance(..) => Attribute::Distance,
            AttributeFilter::Velocity(..) => Attribute::Velocity,
            AttributeFilter::Diameter(..) => Attribute::Diameter,
            AttributeFilter::Hazardous(..) => Attribute::Hazardous,
        }
    }

    pub fn comparator(&self) -> Comparator {
        match *self {
            AttributeFilter::Date(op, _)
            | AttributeFilter::Distance(op, _)
            | AttributeFilter::Velocity(op, _)
            | AttributeFilter::Diameter(op, _)
            | AttributeFilter::Hazardous(op, _) => op,
        }
    }

    /// Evaluate the filter against one approach.
    ///
    /// # Panics
    /// Diameter and hazard filters panic on an approach that is not linked
    /// to a NEO. Every approach a [`crate::NeoDatabase`] linked is safe.
    pub fn matches(&self, approach: &LinkedApproach<'_>) -> bool {
        match *self {
            AttributeFilter::Date(op, date) => compare(approach, date_of, op, &date),
            AttributeFilter::Distance(op, value) => compare(approach, distance_of, op, &value),
            AttributeFilter::Velocity(op, value) => compare(approach, velocity_of, op, &value),
            AttributeFilter::Diameter(op, value) => compare(approach, diameter_of, op, &value),
            AttributeFilter::Hazardous(op, flag) => compare(approach, hazardous_of, op, &flag),
        }
    }
}

impl fmt::Display for AttributeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.attribute(), self.comparator().symbol())?;
        match self {
            AttributeFilter::Date(_, date) => write!(f, "{}", date),
            AttributeFilter::Distance(_, v) => write!(f, "{} au", v),
            AttributeFilter::Velocity(_, v) => write!(f, "{} km/s", v),
            AttributeFilter::Diameter(_, v) => write!(f, "{} km", v),
            AttributeFilter::Hazardous(_, flag) => write!(f, "{}", flag),
        }
    }
}

type Accessor<T> = for<'a, 'db> fn(&'a LinkedApproach<'db>) -> Option<T>;

fn compare<T: PartialOrd>(
    approach: &LinkedApproach<'_>,
    accessor: Accessor<T>,
    op: Comparator,
    reference: &T,
) -> bool {
    accessor(approach).is_some_and(|value| op.apply(&value, reference))
}

fn date_of(approach: &LinkedApproach<'_>) -> Option<NaiveDate> {
    approach.time().map(|t| t.date())
}

fn distance_of(approach: &LinkedApproach<'_>) -> Option<f64> {
    Some(approach.distance())
}

fn velocity_of(approach: &LinkedApproach<'_>) -> Option<f64> {
    Some(approach.velocity())
}

fn diameter_of(approach: &LinkedApproach<'_>) -> Option<f64> {
    Some(require_neo(approach, Attribute::Diameter).diameter())
}

fn hazardous_of(approach: &LinkedApproach<'_>) -> Option<bool> {
    Some(require_neo(approach, Attribute::Hazardous).hazardous())
}

fn require_neo<'db>(approach: &LinkedApproach<'db>, attribute: Attribute) -> &'db NearEarthObject {
    match approach.neo() {
        Some(neo) => neo,
        None => panic!(
            "{} filter evaluated on close approach of {:?}, which is not linked to a NEO",
            attribute,
            approach.designation()
        ),
    }
}
