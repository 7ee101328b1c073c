//! Named extension points of the bundling pipeline
//!
//! Each hook kind is its own capability trait with an explicit signature:
//!
//! | Hook name               | Trait                    | Invocation                         |
//! |-------------------------|--------------------------|------------------------------------|
//! | `beforeOriginalRequest` | [`RequestHook`]          | sequential, once per bundle        |
//! | `onOriginalReceived`    | [`ResourceHandler`]      | concurrent, once per bundle        |
//! | `beforeResourceRequest` | [`ResourceRequestHook`]  | sequential, per resource fetch     |
//! | `onResourceReceived`    | [`ResourceReceivedHook`] | sequential, per textual resource   |
//! | `onDiffsReceived`       | [`DiffHook`]             | sequential, once on the merged diff |
//!
//! Sequential hooks run in registration order and each one receives the value
//! produced by the previous one.

pub mod diff_hooks;
pub mod registry;
pub mod request_hooks;
pub mod traits;

pub use diff_hooks::{FilterDiffs, filter_diffs};
pub use registry::{Hook, HookRegistry};
pub use request_hooks::{ProxyTo, RedirectPolicy, SpoofHeaders, StripHeaders};
pub use traits::{DiffHook, RequestHook, ResourceHandler, ResourceReceivedHook, ResourceRequestHook};

use std::fmt;
use std::str::FromStr;

/// The five extension points, in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookName {
    BeforeOriginalRequest,
    OnOriginalReceived,
    BeforeResourceRequest,
    OnResourceReceived,
    OnDiffsReceived,
}

impl HookName {
    pub const ALL: [HookName; 5] = [
        HookName::BeforeOriginalRequest,
        HookName::OnOriginalReceived,
        HookName::BeforeResourceRequest,
        HookName::OnResourceReceived,
        HookName::OnDiffsReceived,
    ];

    /// Canonical registration name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            HookName::BeforeOriginalRequest => "beforeOriginalRequest",
            HookName::OnOriginalReceived => "onOriginalReceived",
            HookName::BeforeResourceRequest => "beforeResourceRequest",
            HookName::OnResourceReceived => "onResourceReceived",
            HookName::OnDiffsReceived => "onDiffsReceived",
        }
    }

    /// Short name accepted for compatibility with older registrations
    #[must_use]
    pub fn legacy_name(&self) -> &'static str {
        match self {
            HookName::BeforeOriginalRequest => "originalRequest",
            HookName::OnOriginalReceived => "originalReceived",
            HookName::BeforeResourceRequest => "resourceRequest",
            HookName::OnResourceReceived => "resourceReceived",
            HookName::OnDiffsReceived => "diffsReceived",
        }
    }
}

impl fmt::Display for HookName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A hook name that matches none of the extension points
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown hook name '{0}'")]
pub struct UnknownHookName(pub String);

impl FromStr for HookName {
    type Err = UnknownHookName;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        HookName::ALL
            .into_iter()
            .find(|hook| hook.as_str() == name || hook.legacy_name() == name)
            .ok_or_else(|| UnknownHookName(name.to_string()))
    }
}
