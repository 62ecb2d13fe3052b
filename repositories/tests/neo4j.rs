mod common;

use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use brands_core::{ConceptStore, Equivalence, Lookup, StoreError};
use ids::ConceptUuid;
use repositories::neo4j::{Credentials, Neo4jStore};
use serde_json::{Value, json};

const LEX: &str = "9636919c-838d-11e8-8f42-da24cd01f044";
const LEX_TME_IDENTIFIER: &str = "ffc5e8e1-0f2d-4a3a-b1a4-5e5b30d8f9c2";
const OLD_FATHER_LEX: &str = "dbb0bdae-1f0c-11e4-b0cb-b2227cce2b54";
const LITTLE_LEX: &str = "0be232ac-841f-11e8-8f42-da24cd01f044";
const FAILING: &str = "6a2a0170-6afa-4bcc-b427-430268d2ac50";

// base64 of "neo4j:secret"
const EXPECTED_AUTH: &str = "Basic bmVvNGo6c2VjcmV0";

fn rows(rows: Vec<Value>) -> Value {
    json!({
        "results": [{
            "columns": [],
            "data": rows.into_iter().map(|row| json!({"row": row, "meta": []})).collect::<Vec<_>>(),
        }],
        "errors": [],
    })
}

fn null_relation() -> Value {
    json!({"id": null, "types": null, "prefLabel": null})
}

fn lex_row() -> Value {
    json!([
        LEX,
        "Lex",
        ["Thing", "Concept", "Classification", "Brand"],
        null,
        "Something",
        "www.imgur.com",
        [
            {
                "authority": "Smartlogic",
                "parents": [{"id": OLD_FATHER_LEX, "types": ["Thing", "Concept", "Classification", "Brand"], "prefLabel": "Old father Lex"}],
                "children": [null_relation()],
            },
            {
                "authority": "TME",
                "parents": [null_relation()],
                "children": [{"id": LITTLE_LEX, "types": ["Thing", "Concept", "Classification", "Brand"], "prefLabel": "Little Lex"}],
            },
        ],
    ])
}

async fn commit(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == EXPECTED_AUTH);
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let statement = body["statements"][0]["statement"].as_str().unwrap_or_default();
    let uuid = body["statements"][0]["parameters"]["uuid"]
        .as_str()
        .unwrap_or_default();

    let response = if statement.contains("LIMIT 1") {
        rows(vec![json!([{}])])
    } else if uuid == FAILING {
        json!({
            "results": [],
            "errors": [{"code": "Neo.ClientError.Statement.SyntaxError", "message": "bad"}],
        })
    } else if statement.contains("UPPIdentifier") {
        match uuid {
            LEX_TME_IDENTIFIER => rows(vec![json!([LEX, true])]),
            _ => rows(vec![]),
        }
    } else {
        match uuid {
            LEX => rows(vec![lex_row()]),
            _ => rows(vec![]),
        }
    };
    Json(response).into_response()
}

async fn store() -> Neo4jStore {
    let router = Router::new().route("/db/neo4j/tx/commit", post(commit));
    let base_url = format!("{}/db/neo4j", common::serve(router).await);
    Neo4jStore::new(
        reqwest::Client::new(),
        base_url,
        Some(Credentials::new("neo4j", "secret")),
    )
}

fn id(raw: &str) -> ConceptUuid {
    raw.parse().unwrap()
}

#[tokio::test]
async fn canonical_node_is_read_with_every_source() {
    let store = store().await;

    let lookup = store.lookup(id(LEX)).await.unwrap();

    let Lookup::Canonical(records) = lookup else {
        panic!("expected a canonical record, got {lookup:?}");
    };
    assert_eq!(1, records.len());
    let record = &records[0];
    assert_eq!(id(LEX), record.concept.id);
    assert_eq!(None, record.concept.description_xml);
    assert_eq!(Some("www.imgur.com"), record.concept.image_url.as_deref());

    let authorities = record
        .sources
        .iter()
        .map(|s| s.authority.as_ref().map(|a| a.as_str().to_owned()))
        .collect::<Vec<_>>();
    assert_eq!(
        vec![Some("Smartlogic".to_string()), Some("TME".to_string())],
        authorities
    );

    let smartlogic = &record.sources[0];
    assert_eq!(1, smartlogic.parents.len());
    assert_eq!(id(OLD_FATHER_LEX), smartlogic.parents[0].id);
    assert!(smartlogic.children.is_empty(), "null relations are dropped");

    let tme = &record.sources[1];
    assert!(tme.parents.is_empty());
    assert_eq!(id(LITTLE_LEX), tme.children[0].id);
}

#[tokio::test]
async fn source_identifier_resolves_to_its_concorded_node() {
    let store = store().await;

    let lookup = store.lookup(id(LEX_TME_IDENTIFIER)).await.unwrap();

    assert_eq!(Lookup::Equivalent(vec![Equivalence::canonical(id(LEX))]), lookup);
}

#[tokio::test]
async fn unknown_id_is_missing() {
    let store = store().await;

    assert_eq!(Lookup::Missing, store.lookup(ConceptUuid::random()).await.unwrap());
}

#[tokio::test]
async fn transaction_errors_are_read_failures() {
    let store = store().await;

    let err = store.lookup(id(FAILING)).await.unwrap_err();

    assert!(matches!(err.current_context(), StoreError::Read));
}

#[tokio::test]
async fn rejected_credentials_are_read_failures() {
    let router = Router::new().route("/db/neo4j/tx/commit", post(commit));
    let base_url = format!("{}/db/neo4j/", common::serve(router).await);
    let store = Neo4jStore::new(reqwest::Client::new(), base_url, None);

    let err = store.lookup(id(LEX)).await.unwrap_err();

    assert!(matches!(err.current_context(), StoreError::Read));
}

#[tokio::test]
async fn connectivity_runs_a_trivial_query() {
    let store = store().await;
    assert!(store.check_connectivity().await.is_ok());

    let unreachable = Neo4jStore::new(reqwest::Client::new(), "http://127.0.0.1:9/db/neo4j", None);
    let err = unreachable.check_connectivity().await.unwrap_err();
    assert!(matches!(err.current_context(), StoreError::Connectivity));
}
