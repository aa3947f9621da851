use std::fmt;

use serde::Serialize;

use super::ApproachId;

/// Marker used by the source data's `pha` column for potentially hazardous objects.
pub const HAZARDOUS_MARKER: &str = "Y";

/// A near-Earth object.
///
/// Identified by its primary designation. The IAU name is optional and the
/// diameter is NaN when unknown. The list of close approaches starts empty
/// and is filled in exactly once, when a [`crate::NeoDatabase`] links its
/// records.
#[derive(Debug, Clone)]
pub struct NearEarthObject {
    designation: String,
    name: Option<String>,
    diameter: f64,
    hazardous: bool,
    pub(crate) approaches: Vec<ApproachId>,
}

impl NearEarthObject {
    /// An empty name is stored as no name.
    pub fn new(
        designation: impl Into<String>,
        name: Option<String>,
        diameter: f64,
        hazardous: bool,
    ) -> Self {
        Self {
            designation: designation.into(),
            name: name.filter(|n| !n.is_empty()),
            diameter,
            hazardous,
            approaches: Vec::new(),
        }
    }

    /// Build a NEO from raw source fields.
    ///
    /// An empty `name` becomes `None`, an empty or unparseable `diameter`
    /// becomes NaN and only [`HAZARDOUS_MARKER`] marks the object hazardous.
    pub fn from_fields(designation: &str, name: &str, diameter: &str, pha: &str) -> Self {
        let diameter = diameter.trim().parse().unwrap_or(f64::NAN);
        Self::new(
            designation.trim(),
            Some(name.trim().to_string()),
            diameter,
            pha.trim() == HAZARDOUS_MARKER,
        )
    }

    pub fn designation(&self) -> &str {
        &self.designation
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Diameter in kilometers, NaN when unknown.
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn hazardous(&self) -> bool {
        self.hazardous
    }

    /// Handles of the close approaches linked to this object, in load order.
    pub fn approaches(&self) -> &[ApproachId] {
        &self.approaches
    }

    /// `"433 (Eros)"` for named objects, the bare designation otherwise.
    pub fn fullname(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({})", self.designation, name),
            None => self.designation.clone(),
        }
    }

    pub fn serialize(&self) -> NeoRecord {
        NeoRecord {
            designation: self.designation.clone(),
            name: self.name.clone(),
            diameter_km: self.diameter,
            potentially_hazardous: self.hazardous,
        }
    }
}

impl fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NEO {} ", self.fullname())?;
        if self.diameter.is_nan() {
            write!(f, "has an unknown diameter")?;
        } else {
            write!(f, "has a diameter of {:.3} km", self.diameter)?;
        }
        let hazard = if self.hazardous { "is" } else { "is not" };
        write!(f, " and {} potentially hazardous.", hazard)
    }
}

/// Flat output record for a NEO.
#[derive(Debug, Clone, Serialize)]
pub struct NeoRecord {
    pub designation: String,
    pub name: Option<String>,
    pub diameter_km: f64,
    pub potentially_hazardous: bool,
}
