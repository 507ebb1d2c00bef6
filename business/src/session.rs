//! Credentials supplied by the surrounding session provider.
//!
//! The panel never logs in or refreshes tokens. Whoever owns the session
//! publishes a [`Session`] through `ctx.updater().set(..)`; every request built
//! by the users API attaches it as a bearer token.

use userdesk_states::{Compute, snapshot_state};

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: (!token.trim().is_empty()).then_some(token),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

snapshot_state!(Session);
impl Compute for Session {}
