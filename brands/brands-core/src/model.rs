use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The fields every public concept representation carries.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Thing {
    /// e.g. `http://api.ft.com/things/9636919c-838d-11e8-8f42-da24cd01f044`
    pub id: String,
    /// e.g. `http://api.ft.com/brands/9636919c-838d-11e8-8f42-da24cd01f044`
    pub api_url: String,
    /// The type hierarchy of the concept, broadest type first.
    pub types: Vec<String>,
    /// The narrowest type, always the last entry of `types`.
    pub direct_type: String,
    pub pref_label: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    #[serde(flatten)]
    pub thing: Thing,
    #[serde(rename = "descriptionXML", skip_serializing_if = "Option::is_none", default)]
    pub description_xml: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub strapline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image_url: Option<String>,
    /// The parent brand supplied by the most preferred source.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub parent_brand: Option<Thing>,
    /// Omitted rather than empty when the brand has no children.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub child_brands: Vec<Thing>,
}
