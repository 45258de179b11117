use serde::{Deserialize, Serialize};

/// One link in a document's breadcrumb chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocParent {
    pub uri: String,
    pub title: String,
}

/// The document currently on screen, as far as view tracking cares.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doc {
    pub mdn_url: String,
    pub title: String,
    #[serde(default)]
    pub parents: Vec<DocParent>,
}

/// A table-of-contents entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Toc {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<bool>,
}

/// Static page payload served at `/{locale}/{slug}/index.json` under `hyData`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaticPageDoc {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub sections: Vec<String>,
    #[serde(default)]
    pub toc: Vec<Toc>,
}

/// Envelope around a static page payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaticPageEnvelope {
    #[serde(rename = "hyData")]
    pub hy_data: StaticPageDoc,
}
