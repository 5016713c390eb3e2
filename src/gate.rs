//! The host-facing authentication boundary.
//!
//! Login (email one-time code, signed cookie) lives entirely in the host.
//! The editor only asks whether the caller holds an authenticated session.

use serde::{Deserialize, Serialize};

use crate::util::time::timestamp_secs;

/// Lifetime of a freshly issued session: seven days
pub const SESSION_LIFETIME_SECS: u64 = 7 * 24 * 60 * 60;

/// Capability the host hands to the editor to prove the user is signed in.
pub trait SessionGate {
    fn is_authenticated(&self) -> bool;
}

impl SessionGate for bool {
    fn is_authenticated(&self) -> bool {
        *self
    }
}

/// An opaque, time-limited session issued by the host's login flow.
///
/// The token is never inspected; only the expiry is checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedSession {
    subject: String,
    token: String,
    expires_at: u64,
}

impl AuthenticatedSession {
    pub fn new(subject: impl Into<String>, token: impl Into<String>, expires_at: u64) -> Self {
        Self {
            subject: subject.into(),
            token: token.into(),
            expires_at,
        }
    }

    /// A session valid for [`SESSION_LIFETIME_SECS`] from now
    pub fn issued_now(subject: impl Into<String>, token: impl Into<String>) -> Self {
        Self::new(subject, token, timestamp_secs() + SESSION_LIFETIME_SECS)
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Expiry as seconds since the UNIX epoch
    pub fn expires_at(&self) -> u64 {
        self.expires_at
    }

    pub fn is_valid_at(&self, now_secs: u64) -> bool {
        !self.token.is_empty() && now_secs < self.expires_at
    }
}

impl SessionGate for AuthenticatedSession {
    fn is_authenticated(&self) -> bool {
        self.is_valid_at(timestamp_secs())
    }
}
