//! In-memory database of NEOs and their close approaches.
//!
//! [`NeoDatabase`] owns every record. NEOs and approaches are cross-linked
//! through [`NeoId`]/[`ApproachId`] handles during a single linking pass
//! that runs once, at construction. After that the database is read-only:
//! point lookups by designation or name, and a lazy filtered [`Query`] over
//! all approaches in load order.

use std::collections::HashMap;
use std::fmt;
use std::slice;

use crate::model::{ApproachId, CloseApproach, LinkedApproach, NearEarthObject, NeoId};
use crate::query::AttributeFilter;

/// Outcome of the linking pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Approaches attached to a NEO.
    pub linked: usize,
    /// Approaches whose designation matched no NEO.
    pub unlinked: usize,
}

impl fmt::Display for LinkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} linked, {} unlinked", self.linked, self.unlinked)
    }
}

/// A database of near-Earth objects and their close approaches.
#[derive(Debug)]
pub struct NeoDatabase {
    neos: Vec<NearEarthObject>,
    approaches: Vec<CloseApproach>,
    by_designation: HashMap<String, NeoId>,
    by_name: HashMap<String, Vec<NeoId>>,
    link_stats: Option<LinkStats>,
}

impl NeoDatabase {
    /// Build the lookup maps and link every approach to its NEO.
    ///
    /// On duplicate designations the last NEO wins: it alone is found by
    /// designation or name and it receives the approaches.
    pub fn new(
        neos: impl IntoIterator<Item = NearEarthObject>,
        approaches: impl IntoIterator<Item = CloseApproach>,
    ) -> Self {
        let mut db = Self::unlinked(neos, approaches);
        let stats = db.link();
        tracing::info!(
            neos = db.neos.len(),
            approaches = db.approaches.len(),
            linked = stats.linked,
            unlinked = stats.unlinked,
            "database ready"
        );
        db
    }

    fn unlinked(
        neos: impl IntoIterator<Item = NearEarthObject>,
        approaches: impl IntoIterator<Item = CloseApproach>,
    ) -> Self {
        let neos: Vec<NearEarthObject> = neos.into_iter().collect();
        let mut by_designation = HashMap::with_capacity(neos.len());
        for (index, neo) in neos.iter().enumerate() {
            by_designation.insert(neo.designation().to_string(), NeoId(index));
        }

        // Only NEOs reachable by designation are reachable by name.
        let mut by_name: HashMap<String, Vec<NeoId>> = HashMap::new();
        for (index, neo) in neos.iter().enumerate() {
            let id = NeoId(index);
            if by_designation.get(neo.designation()) != Some(&id) {
                continue;
            }
            if let Some(name) = neo.name() {
                by_name.entry(name.to_string()).or_default().push(id);
            }
        }

        Self {
            neos,
            approaches: approaches.into_iter().collect(),
            by_designation,
            by_name,
            link_stats: None,
        }
    }

    /// Attach each approach to the NEO with the same designation.
    ///
    /// Runs at most once; later calls return the stats of the first pass
    /// without touching any record.
    fn link(&mut self) -> LinkStats {
        if let Some(stats) = self.link_stats {
            return stats;
        }

        let mut stats = LinkStats::default();
        for (index, approach) in self.approaches.iter_mut().enumerate() {
            match self.by_designation.get(approach.designation()) {
                Some(&neo_id) => {
                    approach.neo = Some(neo_id);
                    self.neos[neo_id.0].approaches.push(ApproachId(index));
                    stats.linked += 1;
                }
                None => stats.unlinked += 1,
            }
        }

        if stats.unlinked > 0 {
            tracing::warn!(
                unlinked = stats.unlinked,
                "close approaches reference unknown designations"
            );
        }
        self.link_stats = Some(stats);
        stats
    }

    /// Counts from the linking pass.
    pub fn link_stats(&self) -> LinkStats {
        self.link_stats.unwrap_or_default()
    }

    pub fn neo_count(&self) -> usize {
        self.neos.len()
    }

    pub fn approach_count(&self) -> usize {
        self.approaches.len()
    }

    /// Find a NEO by its primary designation.
    pub fn get_neo_by_designation(&self, designation: &str) -> Option<&NearEarthObject> {
        self.by_designation
            .get(designation)
            .map(|id| &self.neos[id.0])
    }

    /// Find a NEO by its IAU name.
    ///
    /// When several NEOs share the name, the first one loaded is returned.
    pub fn get_neo_by_name(&self, name: &str) -> Option<&NearEarthObject> {
        self.by_name
            .get(name)
            .and_then(|ids| ids.first())
            .map(|id| &self.neos[id.0])
    }

    pub fn neo(&self, id: NeoId) -> Option<&NearEarthObject> {
        self.neos.get(id.0)
    }

    pub fn approach(&self, id: ApproachId) -> Option<LinkedApproach<'_>> {
        self.approaches.get(id.0).map(|a| self.resolve(a))
    }

    /// The close approaches linked to `neo`, in load order.
    pub fn approaches_of<'db>(
        &'db self,
        neo: &'db NearEarthObject,
    ) -> impl Iterator<Item = LinkedApproach<'db>> + 'db {
        neo.approaches()
            .iter()
            .filter_map(move |&id| self.approach(id))
    }

    /// Lazily stream every approach that satisfies all `filters`.
    ///
    /// Approaches come out in load order. Filters are tested left to right
    /// and testing stops at the first rejection. An empty filter slice
    /// matches everything.
    pub fn query<'db, 'f>(&'db self, filters: &'f [AttributeFilter]) -> Query<'db, 'f> {
        for filter in filters {
            tracing::debug!(%filter, "query filter");
        }
        Query {
            db: self,
            approaches: self.approaches.iter(),
            filters,
        }
    }

    fn resolve<'db>(&'db self, approach: &'db CloseApproach) -> LinkedApproach<'db> {
        let neo = approach.neo.and_then(|id| self.neos.get(id.0));
        LinkedApproach::new(approach, neo)
    }
}

/// Lazy iterator returned by [`NeoDatabase::query`].
pub struct Query<'db, 'f> {
    db: &'db NeoDatabase,
    approaches: slice::Iter<'db, CloseApproach>,
    filters: &'f [AttributeFilter],
}

impl<'db> Iterator for Query<'db, '_> {
    type Item = LinkedApproach<'db>;

    fn next(&mut self) -> Option<Self::Item> {
        let db = self.db;
        let filters = self.filters;
        self.approaches
            .by_ref()
            .map(|approach| db.resolve(approach))
            .find(|approach| filters.iter().all(|filter| filter.matches(approach)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.approaches.size_hint().1)
    }
}
