//! Static documentation pages.
//!
//! Fetches `{base_url}/{locale}/{slug}/index.json` and turns the payload into
//! what the page chrome needs: a window title, a breadcrumb chain ending at
//! the page itself, an optional table of contents, and the HTML sections.
//! Any failure to load surfaces as [`PageState::NotFound`].

use serde::Serialize;
use tracing::warn;

use crate::types::document::{DocParent, StaticPageDoc, StaticPageEnvelope, Toc};
use crate::types::errors::PageError;

/// What to load, plus optional data already in hand.
#[derive(Debug, Clone, Default)]
pub struct StaticPageRequest {
    pub locale: String,
    pub slug: String,
    pub parents: Vec<DocParent>,
    /// Prefetched payload; when present no request is made.
    pub fallback: Option<StaticPageDoc>,
}

impl StaticPageRequest {
    pub fn new(locale: &str, slug: &str) -> Self {
        Self {
            locale: locale.to_string(),
            slug: slug.to_string(),
            ..Default::default()
        }
    }

    /// `/{locale}/{slug}`
    pub fn base_path(&self) -> String {
        format!("/{}/{}", self.locale, self.slug)
    }
}

/// A loaded page, ready for layout.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StaticPageView {
    pub id: String,
    pub document_title: String,
    pub breadcrumbs: Vec<DocParent>,
    pub toc: Option<Vec<Toc>>,
    pub sections: Vec<String>,
}

/// Outcome of a page load as the page sees it.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "state", content = "page", rename_all = "snake_case")]
pub enum PageState {
    NotFound(String),
    Ready(StaticPageView),
}

/// Loads static pages over HTTP.
pub struct StaticPageLoader {
    client: reqwest::Client,
    base_url: String,
    site_title: String,
}

impl StaticPageLoader {
    pub fn new(base_url: &str, site_title: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            site_title: site_title.to_string(),
        }
    }

    pub fn site_title(&self) -> &str {
        &self.site_title
    }

    /// Absolute URL of the page's JSON payload.
    pub fn json_url(&self, request: &StaticPageRequest) -> String {
        format!("{}{}/index.json", self.base_url, request.base_path())
    }

    /// Window title: `"{page} | {site}"`, or just the site before a page is known.
    pub fn document_title(&self, doc: Option<&StaticPageDoc>) -> String {
        match doc {
            Some(doc) => format!("{} | {}", doc.title, self.site_title),
            None => self.site_title.clone(),
        }
    }

    /// Fetches and decodes the page payload.
    pub async fn fetch(&self, request: &StaticPageRequest) -> Result<StaticPageDoc, PageError> {
        let url = self.json_url(request);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PageError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(PageError::NotFound(format!(
                "{} on {}: {}",
                status.as_u16(),
                url,
                text
            )));
        }

        let envelope: StaticPageEnvelope = response
            .json()
            .await
            .map_err(|e| PageError::InvalidResponse(e.to_string()))?;
        Ok(envelope.hy_data)
    }

    /// Loads the page, preferring fallback data, and never fails outright.
    pub async fn load(&self, request: &StaticPageRequest) -> PageState {
        let doc = match &request.fallback {
            Some(doc) => doc.clone(),
            None => match self.fetch(request).await {
                Ok(doc) => doc,
                Err(err) => {
                    warn!(error = %err, path = %request.base_path(), "static page load failed");
                    return PageState::NotFound(err.to_string());
                }
            },
        };
        PageState::Ready(self.build_view(request, doc))
    }

    pub fn build_view(&self, request: &StaticPageRequest, doc: StaticPageDoc) -> StaticPageView {
        let document_title = self.document_title(Some(&doc));
        let mut breadcrumbs = request.parents.clone();
        breadcrumbs.push(DocParent {
            uri: request.base_path(),
            title: doc.title.clone(),
        });
        let toc = (!doc.toc.is_empty()).then_some(doc.toc);

        StaticPageView {
            id: doc.id,
            document_title,
            breadcrumbs,
            toc,
            sections: doc.sections,
        }
    }
}
