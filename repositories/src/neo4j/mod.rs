use crate::neo4j::tx::{TxRequest, TxResponse};
use crate::trim_base_url;
use brands_core::raw::{ConcordedRecord, RawConcept, RawRelated, SourceRelations};
use brands_core::{ConceptStore, Equivalence, Lookup, StoreError, StoreResult};
use error_stack::{IntoReport, Report, ResultExt};
use ids::ConceptUuid;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::fmt::{Debug, Formatter};
use tracing::{debug, instrument, warn};

mod statements;
mod tx;

#[derive(Clone)]
pub struct Credentials {
    user: String,
    password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Reads concorded brands straight out of the graph through Neo4j's HTTP
/// transactional endpoint.
#[derive(Debug, Clone)]
pub struct Neo4jStore {
    client: reqwest::Client,
    commit_url: String,
    credentials: Option<Credentials>,
}

#[derive(Debug, Deserialize)]
struct CanonicalRow(
    String,
    Option<String>,
    Option<Vec<String>>,
    Option<String>,
    Option<String>,
    Option<String>,
    Vec<SourceRow>,
);

#[derive(Debug, Deserialize)]
struct SourceRow {
    authority: Option<String>,
    #[serde(default)]
    parents: Vec<RelatedRow>,
    #[serde(default)]
    children: Vec<RelatedRow>,
}

/// `OPTIONAL MATCH`es with no hit still collect a map, with every value null.
#[derive(Debug, Deserialize)]
struct RelatedRow {
    id: Option<String>,
    types: Option<Vec<String>>,
    #[serde(rename = "prefLabel")]
    pref_label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SourceIdentifierRow(String, bool);

impl Neo4jStore {
    /// `base_url` is the database endpoint, e.g. `http://localhost:7474/db/neo4j`.
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        credentials: Option<Credentials>,
    ) -> Self {
        Self {
            client,
            commit_url: format!("{}/tx/commit", trim_base_url(base_url)),
            credentials,
        }
    }

    async fn run<R: DeserializeOwned + Send>(
        &self,
        statement: &'static str,
        parameters: serde_json::Value,
    ) -> StoreResult<Vec<R>> {
        let mut request = self
            .client
            .post(&self.commit_url)
            .json(&TxRequest::single(statement, parameters));
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.user, Some(&credentials.password));
        }

        let response = request
            .send()
            .await
            .change_context(StoreError::Read)
            .attach_with(|| format!("POST {}", self.commit_url))?
            .error_for_status()
            .change_context(StoreError::Read)?;

        let body: TxResponse<R> = response.json().await.change_context(StoreError::Decode)?;

        if let Some(first) = body.errors.first() {
            return Err(StoreError::Read.into_report()).attach_with(|| {
                format!(
                    "neo4j reported {} error(s), first: {} {}",
                    body.errors.len(),
                    first.code,
                    first.message
                )
            });
        }

        Ok(body
            .results
            .into_iter()
            .next()
            .map(|result| result.data.into_iter().map(|d| d.row).collect())
            .unwrap_or_default())
    }

    async fn canonical_records(&self, id: ConceptUuid) -> StoreResult<Vec<ConcordedRecord>> {
        self.run::<CanonicalRow>(statements::CANONICAL, json!({ "uuid": id }))
            .await?
            .into_iter()
            .map(to_record)
            .collect()
    }

    async fn equivalences(&self, id: ConceptUuid) -> StoreResult<Vec<Equivalence>> {
        self.run::<SourceIdentifierRow>(statements::SOURCE, json!({ "uuid": id }))
            .await?
            .into_iter()
            .map(|SourceIdentifierRow(target, is_canonical)| {
                Ok(Equivalence {
                    canonical_id: parse_id(&target)?,
                    target_is_canonical: is_canonical,
                })
            })
            .collect()
    }
}

fn parse_id(raw: &str) -> Result<ConceptUuid, Report<StoreError>> {
    raw.parse::<ConceptUuid>().change_context(StoreError::Decode)
}

fn to_record(row: CanonicalRow) -> StoreResult<ConcordedRecord> {
    let CanonicalRow(id, pref_label, types, description_xml, strapline, image_url, sources) = row;

    let mut concept = RawConcept::new(
        parse_id(&id)?,
        pref_label.unwrap_or_default(),
        types.unwrap_or_default(),
    );
    concept.description_xml = description_xml;
    concept.strapline = strapline;
    concept.image_url = image_url;

    let sources = sources
        .into_iter()
        .map(|source| {
            let relations = match source.authority {
                Some(authority) => SourceRelations::from_authority(authority),
                None => SourceRelations::unattributed(),
            };
            relations
                .with_parents(to_related(source.parents))
                .with_children(to_related(source.children))
        })
        .collect();

    Ok(ConcordedRecord { concept, sources })
}

/// Drops the all-null entries of unmatched relations, and any relation whose
/// concorded id cannot be read.
fn to_related(rows: Vec<RelatedRow>) -> Vec<RawRelated> {
    rows.into_iter()
        .filter_map(|row| {
            let raw_id = row.id?;
            match raw_id.parse::<ConceptUuid>() {
                Ok(id) => Some(RawRelated::new(
                    id,
                    row.pref_label.unwrap_or_default(),
                    row.types.unwrap_or_default(),
                )),
                Err(e) => {
                    warn!("skipping related concept with unreadable id: {e:?}");
                    None
                }
            }
        })
        .collect()
}

impl ConceptStore for Neo4jStore {
    #[instrument(skip(self), name = "neo4j#lookup")]
    async fn lookup(&self, id: ConceptUuid) -> StoreResult<Lookup> {
        let records = self.canonical_records(id).await?;
        if !records.is_empty() {
            return Ok(Lookup::Canonical(records));
        }

        debug!("{id} is not a canonical id, looking it up as a source identifier");
        let equivalences = self.equivalences(id).await?;
        if equivalences.is_empty() {
            Ok(Lookup::Missing)
        } else {
            Ok(Lookup::Equivalent(equivalences))
        }
    }

    #[instrument(skip(self), name = "neo4j#check_connectivity")]
    async fn check_connectivity(&self) -> StoreResult<()> {
        self.run::<serde_json::Value>(statements::CONNECTIVITY, json!({}))
            .await
            .change_context(StoreError::Connectivity)
            .map(|_| ())
    }
}
