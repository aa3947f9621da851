use std::fmt;
use std::ops::Deref;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::neo::{NearEarthObject, NeoRecord};
use super::time::{format_datetime, parse_cd};
use super::NeoId;
use crate::error::{Error, Result};

/// A close approach to Earth by a NEO.
///
/// Holds the approach time (UTC), nominal distance in astronomical units and
/// relative velocity in km/s. Until a [`crate::NeoDatabase`] links it, the
/// approach only knows the raw designation of its NEO.
#[derive(Debug, Clone)]
pub struct CloseApproach {
    designation: String,
    time: Option<NaiveDateTime>,
    distance: f64,
    velocity: f64,
    pub(crate) neo: Option<NeoId>,
}

impl CloseApproach {
    pub fn new(
        designation: impl Into<String>,
        time: Option<NaiveDateTime>,
        distance: f64,
        velocity: f64,
    ) -> Self {
        Self {
            designation: designation.into(),
            time,
            distance,
            velocity,
            neo: None,
        }
    }

    /// Build an approach from a raw calendar time string.
    ///
    /// An unparseable time leaves the approach without a timestamp.
    pub fn from_fields(designation: &str, time: &str, distance: f64, velocity: f64) -> Self {
        let parsed = parse_cd(time);
        if parsed.is_none() {
            tracing::debug!(designation, time, "unparseable approach time");
        }
        Self::new(designation, parsed, distance, velocity)
    }

    /// Raw primary designation this approach was loaded with.
    pub fn designation(&self) -> &str {
        &self.designation
    }

    pub fn time(&self) -> Option<NaiveDateTime> {
        self.time
    }

    /// `YYYY-MM-DD HH:MM`, or `None` without a timestamp.
    pub fn time_str(&self) -> Option<String> {
        self.time.as_ref().map(format_datetime)
    }

    /// Nominal approach distance in astronomical units.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Relative approach velocity in km/s.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Handle of the linked NEO, `None` before linking or when no NEO matched.
    pub fn neo(&self) -> Option<NeoId> {
        self.neo
    }

    pub fn serialize(&self, neo: &NearEarthObject) -> ApproachRecord {
        ApproachRecord {
            datetime_utc: self.time_str(),
            distance_au: self.distance,
            velocity_km_s: self.velocity,
            neo: neo.serialize(),
        }
    }
}

/// A close approach resolved against the database that owns it.
///
/// Dereferences to the underlying [`CloseApproach`].
#[derive(Debug, Clone, Copy)]
pub struct LinkedApproach<'db> {
    approach: &'db CloseApproach,
    neo: Option<&'db NearEarthObject>,
}

impl<'db> LinkedApproach<'db> {
    pub(crate) fn new(approach: &'db CloseApproach, neo: Option<&'db NearEarthObject>) -> Self {
        Self { approach, neo }
    }

    pub fn approach(&self) -> &'db CloseApproach {
        self.approach
    }

    pub fn neo(&self) -> Option<&'db NearEarthObject> {
        self.neo
    }

    /// # Errors
    /// Returns [`Error::Unlinked`] when no NEO matched this approach.
    pub fn linked_neo(&self) -> Result<&'db NearEarthObject> {
        self.neo.ok_or_else(|| Error::Unlinked {
            designation: self.approach.designation.clone(),
        })
    }

    /// # Errors
    /// Returns [`Error::Unlinked`] when no NEO matched this approach.
    pub fn serialize(&self) -> Result<ApproachRecord> {
        Ok(self.approach.serialize(self.linked_neo()?))
    }
}

impl Deref for LinkedApproach<'_> {
    type Target = CloseApproach;

    fn deref(&self) -> &CloseApproach {
        self.approach
    }
}

impl fmt::Display for LinkedApproach<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.time_str() {
            Some(time) => write!(f, "On {}, ", time)?,
            None => write!(f, "At an unknown time, ")?,
        }
        let who = match self.neo {
            Some(neo) => neo.fullname(),
            None => self.approach.designation.clone(),
        };
        write!(
            f,
            "'{}' approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s.",
            who, self.approach.distance, self.approach.velocity
        )
    }
}

/// Nested output record for a close approach.
#[derive(Debug, Clone, Serialize)]
pub struct ApproachRecord {
    pub datetime_utc: Option<String>,
    pub distance_au: f64,
    pub velocity_km_s: f64,
    pub neo: NeoRecord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn eros() -> NearEarthObject {
        NearEarthObject::from_fields("433", "Eros", "16.84", "N")
    }

    #[test]
    fn test_from_fields_parses_time() {
        let ca = CloseApproach::from_fields("433", "2020-Jan-01 12:30", 0.25, 5.5);
        let expected = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        assert_eq!(ca.time(), Some(expected));
        assert_eq!(ca.time_str().as_deref(), Some("2020-01-01 12:30"));
        assert_eq!(ca.designation(), "433");
        assert_eq!(ca.neo(), None);
    }

    #[test]
    fn test_from_fields_bad_time_is_absent() {
        let ca = CloseApproach::from_fields("433", "sometime", 0.25, 5.5);
        assert_eq!(ca.time(), None);
        assert_eq!(ca.time_str(), None);
        assert_eq!(ca.distance(), 0.25);
        assert_eq!(ca.velocity(), 5.5);
    }

    #[test]
    fn test_serialize_nests_neo() {
        let neo = eros();
        let ca = CloseApproach::from_fields("433", "2020-Jan-01 12:30", 0.25, 5.5);
        let record = ca.serialize(&neo);
        assert_eq!(record.datetime_utc.as_deref(), Some("2020-01-01 12:30"));
        assert_eq!(record.distance_au, 0.25);
        assert_eq!(record.velocity_km_s, 5.5);
        assert_eq!(record.neo.designation, "433");
        assert_eq!(record.neo.name.as_deref(), Some("Eros"));
    }

    #[test]
    fn test_linked_serialize_requires_neo() {
        let ca = CloseApproach::from_fields("999", "2020-Jan-01 12:30", 0.25, 5.5);
        let linked = LinkedApproach::new(&ca, None);
        let err = linked.serialize().unwrap_err();
        assert!(matches!(err, Error::Unlinked { ref designation } if designation == "999"));
    }

    #[test]
    fn test_linked_display() {
        let neo = eros();
        let ca = CloseApproach::from_fields("433", "2020-Jan-01 12:30", 0.25, 5.5);
        assert_eq!(
            LinkedApproach::new(&ca, Some(&neo)).to_string(),
            "On 2020-01-01 12:30, '433 (Eros)' approaches Earth at a distance of 0.25 au and a velocity of 5.50 km/s."
        );

        let orphan = CloseApproach::new("999", None, 1.0, 2.0);
        assert_eq!(
            LinkedApproach::new(&orphan, None).to_string(),
            "At an unknown time, '999' approaches Earth at a distance of 1.00 au and a velocity of 2.00 km/s."
        );
    }
}
