//! Client session context
//!
//! The session id and device identity are read by both the REST path and the
//! socket path whenever they build headers. [`SessionContext`] holds them in
//! one place: the device identity is fixed for the lifetime of a client, and
//! the login session is an immutable [`Session`] swapped as a whole on login
//! and logout. Callers take an [`AuthSnapshot`] once per request so a login
//! racing with an in-flight request never produces mixed headers.

use crate::device::DeviceIdentity;
use crate::objects::UserProfile;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock};

/// An authenticated session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Session id sent as `NDCAUTH: sid=<sid>`
    pub sid: String,
    /// Account user id
    pub user_id: String,
    /// Raw account record returned by login
    pub account: Value,
    /// Global profile of the account
    pub profile: UserProfile,
}

/// The credentials needed to build one request's headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSnapshot {
    /// Device id
    pub device_id: String,
    /// Session id, when logged in
    pub sid: Option<String>,
}

/// Shared device identity and login state
#[derive(Debug, Clone)]
pub struct SessionContext {
    device: Arc<DeviceIdentity>,
    session: Arc<RwLock<Option<Arc<Session>>>>,
}

impl SessionContext {
    /// Create a logged-out context for a device
    pub fn new(device: DeviceIdentity) -> Self {
        Self {
            device: Arc::new(device),
            session: Arc::new(RwLock::new(None)),
        }
    }

    /// The device identity
    pub fn device(&self) -> &DeviceIdentity {
        &self.device
    }

    /// The current session, if logged in
    pub fn current(&self) -> Option<Arc<Session>> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the current session
    pub fn set(&self, session: Session) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(session));
    }

    /// Drop the current session
    pub fn clear(&self) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Whether a session is present
    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    /// User id of the logged-in account
    pub fn user_id(&self) -> Result<String> {
        self.current()
            .map(|s| s.user_id.clone())
            .ok_or(Error::NotLoggedIn)
    }

    /// Take a consistent view of the device id and session id
    pub fn snapshot(&self) -> AuthSnapshot {
        AuthSnapshot {
            device_id: self.device.device_id.clone(),
            sid: self.current().map(|s| s.sid.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(sid: &str) -> Session {
        Session {
            sid: sid.to_string(),
            user_id: format!("uid-{}", sid),
            ..Default::default()
        }
    }

    #[test]
    fn test_snapshot_logged_out() {
        let ctx = SessionContext::new(DeviceIdentity::default());
        let snapshot = ctx.snapshot();
        assert_eq!(snapshot.device_id, ctx.device().device_id);
        assert!(snapshot.sid.is_none());
        assert!(!ctx.is_authenticated());
        assert!(matches!(ctx.user_id(), Err(Error::NotLoggedIn)));
    }

    #[test]
    fn test_set_and_clear() {
        let ctx = SessionContext::new(DeviceIdentity::default());
        ctx.set(session("abc"));
        assert_eq!(ctx.snapshot().sid.as_deref(), Some("abc"));
        assert_eq!(ctx.user_id().unwrap(), "uid-abc");

        ctx.clear();
        assert!(ctx.snapshot().sid.is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let ctx = SessionContext::new(DeviceIdentity::default());
        let other = ctx.clone();
        ctx.set(session("shared"));
        assert_eq!(other.snapshot().sid.as_deref(), Some("shared"));
    }

    #[test]
    fn test_snapshot_survives_relogin() {
        let ctx = SessionContext::new(DeviceIdentity::default());
        ctx.set(session("first"));
        let held = ctx.current().unwrap();
        ctx.set(session("second"));
        assert_eq!(held.sid, "first");
        assert_eq!(ctx.current().unwrap().sid, "second");
    }
}
