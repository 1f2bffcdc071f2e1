//! Route guard for admin-only views
//!
//! The guard is evaluated on every navigation into a protected route and
//! never cached. Before the auth context is ready it answers
//! [`GuardDecision::Pending`]: a returning admin whose session has not
//! been restored yet must not be bounced to the login view.

use super::Route;
use crate::session::AuthContext;

/// Authentication state as seen by the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessState {
    /// No session
    Unauthenticated,
    /// Session present without the admin role
    AuthenticatedNonAdmin,
    /// Session present with the admin role
    AuthenticatedAdmin,
}

impl AccessState {
    /// Classify the current session, or `None` while not ready
    pub fn of(auth: &AuthContext) -> Option<Self> {
        if !auth.is_ready() {
            return None;
        }
        Some(match auth.session() {
            None => Self::Unauthenticated,
            Some(session) if session.is_admin() => Self::AuthenticatedAdmin,
            Some(_) => Self::AuthenticatedNonAdmin,
        })
    }
}

/// What to do with a navigation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not restored yet; render nothing and decide later
    Pending,
    /// Replace the navigation with the login view
    RedirectToLogin,
    /// Show the access-denied interstitial; its only action leads home
    AccessDenied,
    /// Render the requested view unmodified
    Allow,
}

/// Decides render, redirect or deny for guarded routes
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard;

impl RouteGuard {
    /// Decide for a protected view
    ///
    /// # Examples
    ///
    /// ```
    /// use reliefdesk::routes::{GuardDecision, RouteGuard};
    /// use reliefdesk::session::{AuthContext, SessionStore};
    /// use reliefdesk::storage::MemoryStore;
    ///
    /// let auth = AuthContext::new(SessionStore::new(Box::new(MemoryStore::new()), "user"));
    /// // not restored yet
    /// assert_eq!(RouteGuard::evaluate(&auth), GuardDecision::Pending);
    /// ```
    pub fn evaluate(auth: &AuthContext) -> GuardDecision {
        match AccessState::of(auth) {
            None => GuardDecision::Pending,
            Some(AccessState::Unauthenticated) => GuardDecision::RedirectToLogin,
            Some(AccessState::AuthenticatedNonAdmin) => GuardDecision::AccessDenied,
            Some(AccessState::AuthenticatedAdmin) => GuardDecision::Allow,
        }
    }

    /// Decide for an arbitrary route
    ///
    /// Public routes are allowed once the context is ready; protected
    /// routes go through [`RouteGuard::evaluate`].
    pub fn check(route: Route, auth: &AuthContext) -> GuardDecision {
        let decision = if route.is_protected() {
            Self::evaluate(auth)
        } else if auth.is_ready() {
            GuardDecision::Allow
        } else {
            GuardDecision::Pending
        };
        tracing::debug!(route = %route, ?decision, "Route guard evaluated");
        decision
    }
}
