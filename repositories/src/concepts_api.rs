use crate::trim_base_url;
use brands_core::raw::{ConcordedRecord, RawConcept, RawRelated, SourceRelations};
use brands_core::{ConceptStore, Equivalence, Lookup, StoreError, StoreResult};
use error_stack::{IntoReport, ResultExt};
use ids::ConceptUuid;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

/// Reads brands from an upstream concepts api that has already done the
/// concordance work.
///
/// The api answers an alias with the canonical concept, so a concept whose id
/// differs from the requested one is reported as an equivalence.
#[derive(Debug, Clone)]
pub struct ConceptsApiStore {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiConcept {
    id: String,
    #[serde(rename = "type", default)]
    concept_type: Option<String>,
    #[serde(default)]
    pref_label: Option<String>,
    #[serde(rename = "descriptionXML", default)]
    description_xml: Option<String>,
    #[serde(default)]
    strapline: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    broader_concepts: Vec<ApiRelationship>,
    #[serde(default)]
    narrower_concepts: Vec<ApiRelationship>,
}

#[derive(Debug, Deserialize)]
struct ApiRelationship {
    concept: ApiRelatedConcept,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRelatedConcept {
    id: String,
    #[serde(rename = "type", default)]
    concept_type: Option<String>,
    #[serde(default)]
    pref_label: Option<String>,
}

impl ConceptsApiStore {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: trim_base_url(base_url),
        }
    }

    fn concept_url(&self, id: ConceptUuid) -> String {
        format!(
            "{}/concepts/{id}?showRelationship=broader&showRelationship=narrower",
            self.base_url
        )
    }
}

fn to_related(relationships: Vec<ApiRelationship>) -> Vec<RawRelated> {
    relationships
        .into_iter()
        .filter_map(|r| match ConceptUuid::from_uri(&r.concept.id) {
            Ok(id) => Some(RawRelated::new(
                id,
                r.concept.pref_label.unwrap_or_default(),
                r.concept.concept_type,
            )),
            Err(e) => {
                warn!("skipping related concept with unreadable id: {e:?}");
                None
            }
        })
        .collect()
}

impl ConceptStore for ConceptsApiStore {
    #[instrument(skip(self), name = "concepts_api#lookup")]
    async fn lookup(&self, id: ConceptUuid) -> StoreResult<Lookup> {
        let url = self.concept_url(id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .change_context(StoreError::Read)
            .attach_with(|| format!("GET {url}"))?;

        match response.status() {
            StatusCode::NOT_FOUND => return Ok(Lookup::Missing),
            status if !status.is_success() => {
                return Err(StoreError::Read.into_report())
                    .attach_with(|| format!("GET {url} answered {status}"));
            }
            _ => {}
        }

        let concept: ApiConcept = response
            .json()
            .await
            .change_context(StoreError::Decode)
            .attach_with(|| format!("GET {url}"))?;
        let returned_id = ConceptUuid::from_uri(&concept.id).change_context(StoreError::Decode)?;

        if returned_id != id {
            debug!("{id} was answered with {returned_id}");
            return Ok(Lookup::Equivalent(vec![Equivalence::canonical(returned_id)]));
        }

        let mut raw = RawConcept::new(
            returned_id,
            concept.pref_label.unwrap_or_default(),
            concept.concept_type,
        );
        raw.description_xml = concept.description_xml;
        raw.strapline = concept.strapline;
        raw.image_url = concept.image_url;

        let relations = SourceRelations::unattributed()
            .with_parents(to_related(concept.broader_concepts))
            .with_children(to_related(concept.narrower_concepts));

        Ok(Lookup::Canonical(vec![ConcordedRecord {
            concept: raw,
            sources: vec![relations],
        }]))
    }

    #[instrument(skip(self), name = "concepts_api#check_connectivity")]
    async fn check_connectivity(&self) -> StoreResult<()> {
        let url = format!("{}/__gtg", self.base_url);
        self.client
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .change_context(StoreError::Connectivity)
            .attach_with(|| format!("GET {url}"))
            .map(|_| ())
    }
}
