//! The original document and fetched resources as seen by hooks.

use reqwest::header::HeaderMap;
use scraper::Html;
use url::Url;

use super::transport::HttpResponse;
use crate::encoder::{self, mime};
use crate::locator::base_href;

/// The page being bundled
#[derive(Debug, Clone)]
pub struct SourceDocument {
    url: String,
    final_url: String,
    base_url: String,
    status: u16,
    headers: HeaderMap,
    text: String,
}

impl SourceDocument {
    /// A document that was not fetched over the network
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        let url = url.into();
        let text = text.into();
        let base_url = document_base(&url, &text);
        Self {
            final_url: url.clone(),
            url,
            base_url,
            status: 200,
            headers: HeaderMap::new(),
            text,
        }
    }

    /// Build from the response to the original request
    ///
    /// The body is decoded as UTF-8, replacing invalid sequences.
    pub fn from_response(url: impl Into<String>, response: HttpResponse) -> Self {
        let text = String::from_utf8_lossy(&response.body).into_owned();
        let base_url = document_base(&response.url, &text);
        Self {
            url: url.into(),
            final_url: response.url,
            base_url,
            status: response.status,
            headers: response.headers,
            text,
        }
    }

    /// URL passed to the bundler, after normalization
    pub fn url(&self) -> &str {
        &self.url
    }

    /// URL the document was served from, after redirects
    pub fn final_url(&self) -> &str {
        &self.final_url
    }

    /// Base for resolving references: `<base href>` if present, otherwise the final URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

fn document_base(final_url: &str, text: &str) -> String {
    let href = base_href(&Html::parse_document(text));
    href.and_then(|href| Url::parse(final_url).and_then(|base| base.join(&href)).ok())
        .map(String::from)
        .unwrap_or_else(|| final_url.to_string())
}

/// A fetched resource, before it is encoded
#[derive(Debug, Clone)]
pub struct ResourceContext {
    reference: String,
    base_url: String,
    url: String,
    final_url: String,
    status: u16,
    headers: HeaderMap,
    body: Vec<u8>,
    import_chain: Vec<String>,
}

impl ResourceContext {
    /// `url` is the resolved form of `reference` against `base_url`
    pub fn new(
        reference: impl Into<String>,
        base_url: impl Into<String>,
        url: impl Into<String>,
        response: HttpResponse,
    ) -> Self {
        Self {
            reference: reference.into(),
            base_url: base_url.into(),
            url: url.into(),
            final_url: response.url,
            status: response.status,
            headers: response.headers,
            body: response.body,
            import_chain: Vec::new(),
        }
    }

    /// Record the stylesheets that led to this resource, outermost first
    #[must_use]
    pub fn with_import_chain(mut self, chain: Vec<String>) -> Self {
        self.import_chain = chain;
        self
    }

    /// URLs of the stylesheets whose references led to this resource
    ///
    /// Empty for resources referenced directly by the page.
    pub fn import_chain(&self) -> &[String] {
        &self.import_chain
    }

    /// Whether `url` names this resource or one of the stylesheets importing it
    pub fn is_on_import_chain(&self, url: &str) -> bool {
        url == self.url || url == self.final_url || self.import_chain.iter().any(|u| u == url)
    }

    /// Import chain handed to the resources this one references
    pub fn nested_chain(&self) -> Vec<String> {
        let mut chain = self.import_chain.clone();
        chain.push(self.url.clone());
        if self.final_url != self.url {
            chain.push(self.final_url.clone());
        }
        chain
    }

    /// The reference exactly as it appeared in its containing document
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// URL of the document the reference was found in
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL the reference resolved to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// URL the resource was served from, after redirects
    ///
    /// References inside the body resolve against this.
    pub fn final_url(&self) -> &str {
        &self.final_url
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn content_type_header(&self) -> Option<&str> {
        self.headers
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }

    /// Declared content type, falling back to inference from the URL
    pub fn mime_type(&self) -> String {
        encoder::content_type_for(self.content_type_header(), &self.url)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as text, `None` if it is not valid UTF-8
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Whether received hooks may inspect and rewrite this resource
    pub fn is_textual(&self) -> bool {
        !mime::is_binary_mime_type(&self.mime_type()) && self.text().is_some()
    }

    pub(crate) fn set_body(&mut self, body: Vec<u8>) {
        self.body = body;
    }

    /// The encoded form that replaces the reference
    pub fn to_data_uri(&self) -> String {
        encoder::encode(&self.mime_type(), &self.body)
    }
}
