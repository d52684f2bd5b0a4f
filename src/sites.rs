//! Site content types consumed from the content provider.
//!
//! The engine never mutates content: sites, their sub-locations, and their
//! grouping attributes arrive from the content layer and are refreshed
//! independently of user progress.

use serde::{Deserialize, Serialize};

pub type SiteId = String;
pub type SubLocationId = String;
pub type PlaceId = String;
pub type QuizId = String;

/// Geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// A visitable site as delivered by the content provider.
///
/// `city` and `era` are grouping attributes used by the catalog-wide
/// achievement predicates ("every site in one city", "every site of one
/// era"); they carry no other meaning here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub id: SiteId,
    pub name: String,
    pub city: String,
    pub era: String,
    pub coordinate: Coordinate,
    /// Knowledge units, in display order. Each earns one scholar badge.
    pub sub_locations: Vec<SubLocationId>,
}

/// Read-only source of the current site catalog.
pub trait SiteCatalog: Send + Sync {
    fn sites(&self) -> Vec<Site>;
}

/// Fixed in-memory catalog, for tests and embedded content.
pub struct StaticCatalog {
    sites: Vec<Site>,
}

impl StaticCatalog {
    pub fn new(sites: Vec<Site>) -> Self {
        Self { sites }
    }
}

impl SiteCatalog for StaticCatalog {
    fn sites(&self) -> Vec<Site> {
        self.sites.clone()
    }
}
