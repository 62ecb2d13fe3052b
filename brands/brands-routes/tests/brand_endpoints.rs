use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use brands_core::raw::{ConcordedRecord, RawConcept, RawRelated, SourceRelations};
use brands_core::store::MockConceptStore;
use brands_core::{
    AuthorityPrecedence, BrandEngine, BrandReader, Equivalence, Lookup, StoreError, Transformer,
};
use brands_routes::cache::CacheControl;
use brands_routes::routes;
use brands_routes::state::BrandAppState;
use error_stack::IntoReport;
use futures::FutureExt;
use ids::ConceptUuid;
use rstest::rstest;
use serde_json::{Value, json};

const LEX: &str = "9636919c-838d-11e8-8f42-da24cd01f044";
const OLD_FATHER_LEX: &str = "dbb0bdae-1f0c-11e4-b0cb-b2227cce2b54";
const LITTLE_LEX: &str = "0be232ac-841f-11e8-8f42-da24cd01f044";
const BABY_LEX: &str = "c0eab380-07fe-4672-a277-14ca51ef537e";

const BRAND_TYPES: [&str; 4] = ["Thing", "Concept", "Classification", "Brand"];

#[derive(Debug, Clone)]
struct TestEngine {
    reader: BrandReader<Arc<MockConceptStore>>,
}

impl BrandEngine for TestEngine {
    type Store = Arc<MockConceptStore>;

    fn reader(&self) -> &BrandReader<Self::Store> {
        &self.reader
    }
}

fn id(raw: &str) -> ConceptUuid {
    raw.parse().unwrap()
}

fn server(store: MockConceptStore) -> TestServer {
    let engine = TestEngine {
        reader: BrandReader::new(
            Arc::new(store),
            AuthorityPrecedence::default(),
            Transformer::default(),
        ),
    };
    let state = BrandAppState::new_without_metrics(
        engine,
        CacheControl::max_age(Duration::from_secs(30 * 60)),
    );
    TestServer::new(routes::build(state).expect("routes build")).expect("test server starts")
}

fn store_returning(expected: ConceptUuid, lookup: Lookup) -> MockConceptStore {
    let mut store = MockConceptStore::new();
    store
        .expect_lookup()
        .withf(move |requested| *requested == expected)
        .times(1)
        .returning(move |_| {
            let lookup = lookup.clone();
            async move { Ok(lookup) }.boxed()
        });
    store
}

fn lex() -> ConcordedRecord {
    let mut concept = RawConcept::new(id(LEX), "Lex", BRAND_TYPES);
    concept.strapline = Some("Something".to_string());
    concept.image_url = Some("www.imgur.com".to_string());
    concept.description_xml = Some(String::new());

    ConcordedRecord {
        concept,
        sources: vec![
            SourceRelations::from_authority("Smartlogic")
                .with_parents(vec![RawRelated::new(
                    id(OLD_FATHER_LEX),
                    "Old father Lex",
                    BRAND_TYPES,
                )])
                .with_children(vec![
                    RawRelated::new(id(LITTLE_LEX), "Little Lex", BRAND_TYPES),
                    RawRelated::new(id(BABY_LEX), "Baby Lex", BRAND_TYPES),
                ]),
        ],
    }
}

fn brand_thing(uuid: &str, label: &str) -> Value {
    json!({
        "id": format!("http://api.ft.com/things/{uuid}"),
        "apiUrl": format!("http://api.ft.com/brands/{uuid}"),
        "types": [
            "http://www.ft.com/ontology/core/Thing",
            "http://www.ft.com/ontology/concept/Concept",
            "http://www.ft.com/ontology/classification/Classification",
            "http://www.ft.com/ontology/product/Brand"
        ],
        "directType": "http://www.ft.com/ontology/product/Brand",
        "prefLabel": label,
    })
}

#[tokio::test]
async fn full_brand_is_returned_with_parent_and_children() {
    let server = server(store_returning(id(LEX), Lookup::Canonical(vec![lex()])));

    let response = server.get(&format!("/brands/{LEX}")).await;

    response.assert_status_ok();
    assert_eq!(
        "max-age=1800, public",
        response.headers()["cache-control"].to_str().unwrap()
    );
    assert_eq!(
        "application/json",
        response.headers()["content-type"].to_str().unwrap()
    );

    let mut expected = brand_thing(LEX, "Lex");
    expected["strapline"] = json!("Something");
    expected["imageUrl"] = json!("www.imgur.com");
    expected["parentBrand"] = brand_thing(OLD_FATHER_LEX, "Old father Lex");
    expected["childBrands"] = json!([
        brand_thing(LITTLE_LEX, "Little Lex"),
        brand_thing(BABY_LEX, "Baby Lex"),
    ]);
    response.assert_json(&expected);
}

#[tokio::test]
async fn brand_without_children_omits_the_child_brands_key() {
    let record = ConcordedRecord {
        concept: RawConcept::new(id(LEX), "Lex", BRAND_TYPES),
        sources: vec![SourceRelations::from_authority("TME")],
    };
    let server = server(store_returning(id(LEX), Lookup::Canonical(vec![record])));

    let response = server.get(&format!("/brands/{LEX}")).await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    let fields = body.as_object().unwrap();
    assert!(!fields.contains_key("childBrands"));
    assert!(!fields.contains_key("parentBrand"));
    assert!(!fields.contains_key("descriptionXML"));
}

#[tokio::test]
async fn repeated_requests_return_identical_bodies() {
    let mut store = MockConceptStore::new();
    store
        .expect_lookup()
        .times(2)
        .returning(|_| async { Ok(Lookup::Canonical(vec![lex()])) }.boxed());
    let server = server(store);

    let first = server.get(&format!("/brands/{LEX}")).await;
    let second = server.get(&format!("/brands/{LEX}")).await;

    assert_eq!(first.text(), second.text());
}

#[tokio::test]
async fn non_brand_concept_is_not_found() {
    let person = ConcordedRecord {
        concept: RawConcept::new(id(LEX), "Lex Luthor", ["Thing", "Concept", "Person"]),
        sources: vec![SourceRelations::from_authority("TME")],
    };
    let server = server(store_returning(id(LEX), Lookup::Canonical(vec![person])));

    let response = server.get(&format!("/brands/{LEX}")).await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({"message": "brand not found"}));
}

#[tokio::test]
async fn unknown_uuid_is_not_found() {
    let server = server(store_returning(id(LEX), Lookup::Missing));

    let response = server.get(&format!("/brands/{LEX}")).await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({"message": "brand not found"}));
}

#[rstest]
#[case("1234")]
#[case("9636919c838d11e88f42da24cd01f044")]
#[case("9636919c-838d-11e8-8f42-da24cd01f04z")]
#[tokio::test]
async fn malformed_uuid_is_rejected_before_any_lookup(#[case] uuid: &str) {
    let mut store = MockConceptStore::new();
    store.expect_lookup().times(0);
    let server = server(store);

    let response = server.get(&format!("/brands/{uuid}")).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({
        "message": format!("uuid '{uuid}' is either missing or invalid")
    }));
}

#[tokio::test]
async fn alias_redirects_to_the_canonical_brand() {
    let alias = "ffc5e8e1-0f2d-4a3a-b1a4-5e5b30d8f9c2";
    let server = server(store_returning(
        id(alias),
        Lookup::Equivalent(vec![Equivalence::canonical(id(LEX))]),
    ));

    let response = server.get(&format!("/brands/{alias}?apiKey=abc")).await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        format!("/brands/{LEX}?apiKey=abc"),
        response.headers()["location"].to_str().unwrap()
    );
}

#[tokio::test]
async fn percent_encoded_alias_redirects_to_the_canonical_brand() {
    let server = server(store_returning(
        id("ffc5e8e1-0f2d-4a3a-b1a4-5e5b30d8f9c2"),
        Lookup::Equivalent(vec![Equivalence::canonical(id(LEX))]),
    ));

    let response = server.get("/brands/ffc5e8e1-0f2d-4a3a-b1a4-5e5b30d8f9c%32").await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        format!("/brands/{LEX}"),
        response.headers()["location"].to_str().unwrap()
    );
}

#[tokio::test]
async fn store_failure_is_an_internal_error() {
    let mut store = MockConceptStore::new();
    store
        .expect_lookup()
        .times(1)
        .returning(|_| async { Err(StoreError::Read.into_report()) }.boxed());
    let server = server(store);

    let response = server.get(&format!("/brands/{LEX}")).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({"message": "failed to return brand"}));
}

#[tokio::test]
async fn only_get_is_allowed() {
    let mut store = MockConceptStore::new();
    store.expect_lookup().times(0);
    let server = server(store);

    let response = server.post(&format!("/brands/{LEX}")).await;
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);

    let response = server.delete(&format!("/brands/{LEX}")).await;
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn health_reports_store_connectivity() {
    let mut store = MockConceptStore::new();
    store
        .expect_check_connectivity()
        .times(1)
        .returning(|| async { Ok(()) }.boxed());
    let server = server(store);

    let response = server.get("/__health").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(json!(1), body["schemaVersion"]);
    assert_eq!(json!(true), body["ok"]);
    assert_eq!(json!(true), body["checks"][0]["ok"]);
    assert_eq!(json!(1), body["checks"][0]["severity"]);
}

#[tokio::test]
async fn gtg_is_unavailable_when_the_store_is_unreachable() {
    let mut store = MockConceptStore::new();
    store
        .expect_check_connectivity()
        .times(1)
        .returning(|| async { Err(StoreError::Connectivity.into_report()) }.boxed());
    let server = server(store);

    let response = server.get("/__gtg").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn ping_and_build_info_answer_without_the_store() {
    let server = server(MockConceptStore::new());

    let response = server.get("/__ping").await;
    response.assert_status_ok();
    response.assert_text("pong");

    let response = server.get("/__build-info").await;
    response.assert_status_ok();
    assert_eq!(json!("public-brands-api"), response.json::<Value>()["name"]);
}

#[tokio::test]
async fn metrics_are_unavailable_when_disabled() {
    let server = server(MockConceptStore::new());

    let response = server.get("/metrics").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}
