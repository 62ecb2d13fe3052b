use crate::raw::{Authority, ConcordedRecord, RawBrandBundle, RawRelated, SourceRelations};
use itertools::Itertools;
use std::str::FromStr;
use tracing::debug;

/// Authorities whose relations win when the sources of one concept disagree,
/// most preferred first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorityPrecedence(Vec<Authority>);

impl AuthorityPrecedence {
    pub fn new<I, A>(authorities: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self(authorities.into_iter().map(Authority::new).collect())
    }

    pub fn authorities(&self) -> &[Authority] {
        &self.0
    }

    fn ranks(&self, authority: Option<&Authority>) -> bool {
        authority.is_some_and(|a| self.0.contains(a))
    }

    /// Picks the relations of one direction.
    ///
    /// Each listed authority is consulted in order and the first one with data for
    /// this direction wins outright. When none of them has any, the data of every
    /// unlisted source is used instead.
    fn select<'a, F>(&self, sources: &'a [SourceRelations], direction: F) -> Vec<&'a RawRelated>
    where
        F: Fn(&'a SourceRelations) -> &'a [RawRelated],
    {
        let preferred = self.0.iter().find_map(|authority| {
            let related = sources
                .iter()
                .filter(|s| s.authority.as_ref() == Some(authority))
                .flat_map(&direction)
                .collect::<Vec<_>>();
            (!related.is_empty()).then(|| {
                debug!("using relations from preferred authority {authority}");
                related
            })
        });

        preferred.unwrap_or_else(|| {
            sources
                .iter()
                .filter(|s| !self.ranks(s.authority.as_ref()))
                .flat_map(direction)
                .collect()
        })
    }
}

impl Default for AuthorityPrecedence {
    fn default() -> Self {
        Self::new(["Smartlogic", "TME"])
    }
}

impl FromStr for AuthorityPrecedence {
    type Err = std::convert::Infallible;

    /// Parses a comma separated list, e.g. `Smartlogic,TME`. Blank entries are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(
            s.split(',').map(str::trim).filter(|a| !a.is_empty()),
        ))
    }
}

/// Reduces a concorded record to the one-hop relations exposed publicly.
///
/// Parents and children are selected independently using `precedence`, then
/// deduplicated by canonical id keeping the first occurrence.
pub fn assemble(record: ConcordedRecord, precedence: &AuthorityPrecedence) -> RawBrandBundle {
    let parents = dedup(precedence.select(&record.sources, |s| s.parents.as_slice()));
    let children = dedup(precedence.select(&record.sources, |s| s.children.as_slice()));

    RawBrandBundle {
        concept: record.concept,
        parents,
        children,
    }
}

fn dedup(related: Vec<&RawRelated>) -> Vec<RawRelated> {
    related
        .into_iter()
        .unique_by(|r| r.id)
        .cloned()
        .collect()
}
