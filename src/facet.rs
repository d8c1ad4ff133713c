//! Member visibility for the documentation facet being generated.
use indexmap::IndexSet;

use crate::model::Member;

pub trait FacetFilter {
    fn accept(&self, member: &Member) -> bool;
}

/// Every member is visible.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl FacetFilter for AcceptAll {
    fn accept(&self, _member: &Member) -> bool {
        true
    }
}

/// Include/exclude facet names.
///
/// A member carrying any excluded facet is hidden. When includes are set, a
/// member that declares facets must carry at least one of them; members with
/// no facets at all stay visible.
#[derive(Debug, Clone, Default)]
pub struct FacetSet {
    include: IndexSet<String>,
    exclude: IndexSet<String>,
}

impl FacetSet {
    pub fn new<I, E>(include: I, exclude: E) -> Self
    where
        I: IntoIterator<Item = String>,
        E: IntoIterator<Item = String>,
    {
        Self {
            include: include.into_iter().collect(),
            exclude: exclude.into_iter().collect(),
        }
    }
}

impl FacetFilter for FacetSet {
    fn accept(&self, member: &Member) -> bool {
        if member.facets.iter().any(|f| self.exclude.contains(f)) {
            return false;
        }
        if self.include.is_empty() || member.facets.is_empty() {
            return true;
        }
        member.facets.iter().any(|f| self.include.contains(f))
    }
}
