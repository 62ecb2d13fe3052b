//! [`ConceptStore`](brands_core::ConceptStore) implementations backed by the
//! systems brands are actually kept in.

pub mod concepts_api;
pub mod neo4j;

fn trim_base_url(base_url: impl Into<String>) -> String {
    let mut base_url = base_url.into();
    while base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}
