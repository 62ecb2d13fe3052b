use crate::model::{Brand, Thing};
use crate::ontology::{ConceptType, most_specific_type};
use crate::raw::{RawBrandBundle, RawRelated};
use ids::ConceptUuid;
use tracing::{debug, warn};

const THINGS_URL: &str = "http://api.ft.com/things/";
const API_HOST: &str = "http://api.ft.com";
const TEST_API_HOST: &str = "http://test.api.ft.com";

/// Builds the public urls of concepts for one environment.
///
/// `id` urls are the same everywhere; `apiUrl`s point at the host of the
/// environment the service runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiUrls {
    api_host: &'static str,
}

impl ApiUrls {
    pub fn for_env(env: &str) -> Self {
        let api_host = if env == "test" { TEST_API_HOST } else { API_HOST };
        Self { api_host }
    }

    pub fn id_url(&self, id: ConceptUuid) -> String {
        format!("{THINGS_URL}{id}")
    }

    pub fn api_url(&self, id: ConceptUuid, concept_type: ConceptType) -> String {
        format!("{}/{}/{id}", self.api_host, concept_type.api_collection())
    }
}

impl Default for ApiUrls {
    fn default() -> Self {
        Self::for_env("local")
    }
}

/// Shapes raw bundles into public [`Brand`]s. Holds nothing but configuration,
/// so the same bundle always produces the same brand.
#[derive(Debug, Clone, Default)]
pub struct Transformer {
    urls: ApiUrls,
}

impl Transformer {
    pub fn new(urls: ApiUrls) -> Self {
        Self { urls }
    }

    /// Returns `None` when the concept is not a brand.
    ///
    /// Related concepts that are not brands themselves are dropped, as are
    /// optional fields holding empty strings.
    pub fn transform(&self, bundle: RawBrandBundle) -> Option<Brand> {
        let concept = bundle.concept;
        let concept_type = match most_specific_type(&concept.types) {
            Ok(t) => t,
            Err(e) => {
                warn!("could not determine the type of {}: {e:?}", concept.id);
                return None;
            }
        };

        if concept_type != ConceptType::Brand {
            debug!("{} is a {concept_type}, not a brand", concept.id);
            return None;
        }

        let mut parents = self.related_brands(bundle.parents);
        if parents.len() > 1 {
            debug!(
                "{} has {} parents, exposing the first one",
                concept.id,
                parents.len()
            );
        }

        Some(Brand {
            thing: self.thing(concept.id, concept_type, concept.pref_label),
            description_xml: non_empty(concept.description_xml),
            strapline: non_empty(concept.strapline),
            image_url: non_empty(concept.image_url),
            parent_brand: (!parents.is_empty()).then(|| parents.swap_remove(0)),
            child_brands: self.related_brands(bundle.children),
        })
    }

    fn related_brands(&self, related: Vec<RawRelated>) -> Vec<Thing> {
        related
            .into_iter()
            .filter_map(|r| match most_specific_type(&r.types) {
                Ok(ConceptType::Brand) => Some(self.thing(r.id, ConceptType::Brand, r.pref_label)),
                Ok(other) => {
                    debug!("skipping related {} as it is a {other}", r.id);
                    None
                }
                Err(e) => {
                    warn!("skipping related {} with unusable types: {e:?}", r.id);
                    None
                }
            })
            .collect()
    }

    fn thing(&self, id: ConceptUuid, concept_type: ConceptType, pref_label: String) -> Thing {
        Thing {
            id: self.urls.id_url(id),
            api_url: self.urls.api_url(id, concept_type),
            types: concept_type
                .hierarchy()
                .into_iter()
                .map(|t| t.uri().to_owned())
                .collect(),
            direct_type: concept_type.uri().to_owned(),
            pref_label,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
