//! Per-call context carried into every repository entry point
//!
//! A `CallContext` holds the credentials supplied with a single call plus
//! response-shaping flags. Contexts are built fresh for every call and are
//! never cached or shared; the repository derives a backing-store session
//! from them on each invocation.

use crate::sensitive::Sensitive;

/// Context for a single repository call
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    /// Optional user name; `None` means the anonymous principal
    username: Option<String>,
    /// Optional password, redacted in Debug output
    password: Option<Sensitive<String>>,
    /// Whether the caller wants object info registered with the response sink
    object_info_required: bool,
}

impl CallContext {
    /// Create an anonymous context with no flags set
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach credentials to the context
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(Sensitive::new(password.into()));
        self
    }

    /// Mark object info as required for this call
    pub fn with_object_info_required(mut self, required: bool) -> Self {
        self.object_info_required = required;
        self
    }

    /// The user name supplied with the call, if any
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// The password supplied with the call, if any
    pub fn password(&self) -> Option<&str> {
        self.password.as_ref().map(|p| p.expose().as_str())
    }

    /// Whether object info should be registered with the response sink
    pub fn object_info_required(&self) -> bool {
        self.object_info_required
    }
}
