//! Resource fetching
//!
//! [`RequestOptions`] describe a request, [`Transport`] performs it and
//! [`ResourceFetcher`] drives a resource through the hook chains up to its
//! encoded diff.

pub mod documents;
pub mod options;
pub mod resource_fetcher;
pub mod transport;
pub mod visited;

pub use documents::{ResourceContext, SourceDocument};
pub use options::{Redirects, RequestOptions};
pub use resource_fetcher::ResourceFetcher;
pub use transport::{HttpResponse, ReqwestTransport, Transport};
pub use visited::VisitedSet;
