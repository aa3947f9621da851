//! Building filter sets from optional query parameters.

use chrono::NaiveDate;

use super::filter::{AttributeFilter, Comparator};

/// Optional constraints for a close-approach query.
///
/// Every field left as `None` contributes no filter. Bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryCriteria {
    /// Approaches on exactly this date.
    pub date: Option<NaiveDate>,
    /// Approaches on or after this date.
    pub start_date: Option<NaiveDate>,
    /// Approaches on or before this date.
    pub end_date: Option<NaiveDate>,
    /// Minimum approach distance, in au.
    pub distance_min: Option<f64>,
    /// Maximum approach distance, in au.
    pub distance_max: Option<f64>,
    /// Minimum relative velocity, in km/s.
    pub velocity_min: Option<f64>,
    /// Maximum relative velocity, in km/s.
    pub velocity_max: Option<f64>,
    /// Minimum NEO diameter, in km.
    pub diameter_min: Option<f64>,
    /// Maximum NEO diameter, in km.
    pub diameter_max: Option<f64>,
    /// Only hazardous (`true`) or only non-hazardous (`false`) NEOs.
    pub hazardous: Option<bool>,
}

/// Turn query criteria into an ordered filter list for [`crate::NeoDatabase::query`].
///
/// Order is date, start, end, distance, velocity, diameter, hazard; this is
/// also the evaluation order. An exact `date` becomes a `<=`/`>=` pair on the
/// same day. Combining `date` with `start_date` or `end_date` is allowed and
/// may simply match nothing.
pub fn create_filters(criteria: &QueryCriteria) -> Vec<AttributeFilter> {
    let mut filters = Vec::new();

    if let Some(date) = criteria.date {
        filters.push(AttributeFilter::Date(Comparator::Le, date));
        filters.push(AttributeFilter::Date(Comparator::Ge, date));
    }
    if let Some(start) = criteria.start_date {
        filters.push(AttributeFilter::Date(Comparator::Ge, start));
    }
    if let Some(end) = criteria.end_date {
        filters.push(AttributeFilter::Date(Comparator::Le, end));
    }

    push_range(&mut filters, AttributeFilter::Distance, criteria.distance_min, criteria.distance_max);
    push_range(&mut filters, AttributeFilter::Velocity, criteria.velocity_min, criteria.velocity_max);
    push_range(&mut filters, AttributeFilter::Diameter, criteria.diameter_min, criteria.diameter_max);

    if let Some(hazardous) = criteria.hazardous {
        filters.push(AttributeFilter::Hazardous(Comparator::Eq, hazardous));
    }

    filters
}

fn push_range(
    filters: &mut Vec<AttributeFilter>,
    variant: fn(Comparator, f64) -> AttributeFilter,
    min: Option<f64>,
    max: Option<f64>,
) {
    if let Some(min) = min {
        filters.push(variant(Comparator::Ge, min));
    }
    if let Some(max) = max {
        filters.push(variant(Comparator::Le, max));
    }
}
