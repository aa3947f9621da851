//! In-memory near-Earth object database with composable close-approach queries.
//!
//! Loads near-Earth objects (NEOs) and their close approaches to Earth from
//! NASA data files, cross-links them, and answers queries that filter
//! approaches by date, distance, velocity, NEO diameter and hazard flag.
//! Results stream lazily and can be capped and written to CSV or JSON.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`model`] | [`NearEarthObject`], [`CloseApproach`], [`LinkedApproach`], output records, time formats |
//! | [`database`] | [`NeoDatabase`]: linking, lookups by designation and name, lazy [`Query`](database::Query) |
//! | [`query`] | [`AttributeFilter`](query::AttributeFilter), [`create_filters`](query::create_filters), [`limit`](query::limit()) |
//! | [`extract`] | CSV/JSON loaders ([`load_neos`](extract::load_neos), [`load_approaches`](extract::load_approaches)) |
//! | [`write`] | CSV/JSON writers ([`write_to_csv`](write::write_to_csv), [`write_to_json`](write::write_to_json)) |
//!
//! # Quick Start
//!
//! ```ignore
//! use celestial_neo::extract::{load_approaches, load_neos};
//! use celestial_neo::query::{create_filters, limit, QueryCriteria};
//! use celestial_neo::NeoDatabase;
//!
//! let db = NeoDatabase::new(load_neos("data/neos.csv")?, load_approaches("data/cad.json")?);
//!
//! let filters = create_filters(&QueryCriteria {
//!     distance_max: Some(0.05),
//!     hazardous: Some(true),
//!     ..Default::default()
//! });
//! for approach in limit(db.query(&filters), Some(10)) {
//!     println!("{}", approach);
//! }
//! ```
//!
//! # Features
//!
//! - **`cli`**: Enables the `neo` binary with `inspect` and `query`
//!   subcommands.

pub mod database;
pub mod error;
pub mod extract;
pub mod model;
pub mod query;
pub mod write;

pub use database::{LinkStats, NeoDatabase};
pub use error::{Error, Result};
pub use model::{CloseApproach, LinkedApproach, NearEarthObject};
