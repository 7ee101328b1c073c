//! Ordered storage for registered hooks.

use std::fmt;

use super::HookName;
use super::traits::{DiffHook, RequestHook, ResourceHandler, ResourceReceivedHook, ResourceRequestHook};

/// A hook implementation tagged with the extension point it belongs to
pub enum Hook {
    OriginalRequest(Box<dyn RequestHook>),
    OriginalReceived(Box<dyn ResourceHandler>),
    ResourceRequest(Box<dyn ResourceRequestHook>),
    ResourceReceived(Box<dyn ResourceReceivedHook>),
    DiffsReceived(Box<dyn DiffHook>),
}

impl Hook {
    pub fn original_request(hook: impl RequestHook + 'static) -> Self {
        Hook::OriginalRequest(Box::new(hook))
    }

    pub fn original_received(handler: impl ResourceHandler + 'static) -> Self {
        Hook::OriginalReceived(Box::new(handler))
    }

    pub fn resource_request(hook: impl ResourceRequestHook + 'static) -> Self {
        Hook::ResourceRequest(Box::new(hook))
    }

    pub fn resource_received(hook: impl ResourceReceivedHook + 'static) -> Self {
        Hook::ResourceReceived(Box::new(hook))
    }

    pub fn diffs_received(hook: impl DiffHook + 'static) -> Self {
        Hook::DiffsReceived(Box::new(hook))
    }

    /// Extension point this hook implements
    #[must_use]
    pub fn name(&self) -> HookName {
        match self {
            Hook::OriginalRequest(_) => HookName::BeforeOriginalRequest,
            Hook::OriginalReceived(_) => HookName::OnOriginalReceived,
            Hook::ResourceRequest(_) => HookName::BeforeResourceRequest,
            Hook::ResourceReceived(_) => HookName::OnResourceReceived,
            Hook::DiffsReceived(_) => HookName::OnDiffsReceived,
        }
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Hook").field(&self.name()).finish()
    }
}

/// Hooks grouped by extension point, each list in registration order
#[derive(Default)]
pub struct HookRegistry {
    original_request: Vec<Box<dyn RequestHook>>,
    original_received: Vec<Box<dyn ResourceHandler>>,
    resource_request: Vec<Box<dyn ResourceRequestHook>>,
    resource_received: Vec<Box<dyn ResourceReceivedHook>>,
    diffs_received: Vec<Box<dyn DiffHook>>,
}

impl HookRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook under a string name
    ///
    /// Canonical and legacy names are accepted. An unknown name, or a name that
    /// does not match the hook's kind, is logged and the hook is dropped.
    pub fn on(&mut self, name: &str, hook: Hook) -> &mut Self {
        match name.parse::<HookName>() {
            Ok(parsed) if parsed == hook.name() => self.register(hook),
            Ok(parsed) => {
                log::warn!(
                    "Ignoring {} hook registered under '{name}' ({parsed})",
                    hook.name()
                );
                self
            }
            Err(error) => {
                log::warn!("Ignoring hook registration: {error}");
                self
            }
        }
    }

    /// Append a hook to the list for its extension point
    pub fn register(&mut self, hook: Hook) -> &mut Self {
        match hook {
            Hook::OriginalRequest(hook) => self.original_request.push(hook),
            Hook::OriginalReceived(handler) => self.original_received.push(handler),
            Hook::ResourceRequest(hook) => self.resource_request.push(hook),
            Hook::ResourceReceived(hook) => self.resource_received.push(hook),
            Hook::DiffsReceived(hook) => self.diffs_received.push(hook),
        }
        self
    }

    pub fn original_request_hooks(&self) -> &[Box<dyn RequestHook>] {
        &self.original_request
    }

    pub fn resource_handlers(&self) -> &[Box<dyn ResourceHandler>] {
        &self.original_received
    }

    pub fn resource_request_hooks(&self) -> &[Box<dyn ResourceRequestHook>] {
        &self.resource_request
    }

    pub fn resource_received_hooks(&self) -> &[Box<dyn ResourceReceivedHook>] {
        &self.resource_received
    }

    pub fn diff_hooks(&self) -> &[Box<dyn DiffHook>] {
        &self.diffs_received
    }

    /// Number of hooks registered for an extension point
    #[must_use]
    pub fn count(&self, name: HookName) -> usize {
        match name {
            HookName::BeforeOriginalRequest => self.original_request.len(),
            HookName::OnOriginalReceived => self.original_received.len(),
            HookName::BeforeResourceRequest => self.resource_request.len(),
            HookName::OnResourceReceived => self.resource_received.len(),
            HookName::OnDiffsReceived => self.diffs_received.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        HookName::ALL.into_iter().all(|name| self.count(name) == 0)
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for name in HookName::ALL {
            map.entry(&name.as_str(), &self.count(name));
        }
        map.finish()
    }
}
