//! The request and response bodies of the Neo4j HTTP transactional endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxRequest<'a> {
    pub statements: [TxStatement<'a>; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxStatement<'a> {
    pub statement: &'a str,
    pub parameters: Value,
    pub result_data_contents: [&'static str; 1],
}

impl<'a> TxRequest<'a> {
    pub fn single(statement: &'a str, parameters: Value) -> Self {
        Self {
            statements: [TxStatement {
                statement,
                parameters,
                result_data_contents: ["row"],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TxResponse<R> {
    #[serde(default = "Vec::new")]
    pub results: Vec<TxResult<R>>,
    #[serde(default)]
    pub errors: Vec<TxError>,
}

#[derive(Debug, Deserialize)]
pub struct TxResult<R> {
    pub data: Vec<TxRow<R>>,
}

#[derive(Debug, Deserialize)]
pub struct TxRow<R> {
    pub row: R,
}

#[derive(Debug, Deserialize)]
pub struct TxError {
    pub code: String,
    pub message: String,
}
