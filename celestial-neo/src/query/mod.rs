//! Query interface for close approaches.
//!
//! Three submodules cover the query surface:
//!
//! - [`filter`]: single-attribute predicates ([`AttributeFilter`], [`Comparator`])
//! - [`criteria`]: build a filter list from optional parameters ([`create_filters`])
//! - [`limit`]: cap a result stream without over-pulling ([`limit()`])

pub mod criteria;
pub mod filter;
pub mod limit;

pub use criteria::{create_filters, QueryCriteria};
pub use filter::{Attribute, AttributeFilter, Comparator};
pub use limit::{limit, Limit, LimitExt};
