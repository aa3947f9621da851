//! Record types for near-Earth objects and their close approaches.
//!
//! - [`neo`]: [`NearEarthObject`] and its flat output record
//! - [`approach`]: [`CloseApproach`], the database-resolved [`LinkedApproach`] view
//! - [`time`]: calendar parsing and formatting for approach timestamps
//!
//! NEOs and approaches reference each other through [`NeoId`] and
//! [`ApproachId`] handles into the owning [`crate::NeoDatabase`], never
//! through pointers.

pub mod approach;
pub mod neo;
pub mod time;

pub use approach::{ApproachRecord, CloseApproach, LinkedApproach};
pub use neo::{NearEarthObject, NeoRecord};

/// Index of a NEO in its database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NeoId(pub(crate) usize);

/// Index of a close approach in its database, which is also its load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApproachId(pub(crate) usize);
