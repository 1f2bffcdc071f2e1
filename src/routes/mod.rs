//! Client routes and the guard in front of the privileged ones
//!
//! Every view in the client is addressed by a path, the same paths the
//! browser client used. Unknown paths fall back to the home view.

use crate::api::Resource;
use std::fmt;

pub mod guard;

pub use guard::{AccessState, GuardDecision, RouteGuard};

/// A navigable view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Dashboard with request and volunteer counts
    Home,
    /// Public list of help requests
    HelpRequests,
    /// Public list of volunteers
    Volunteers,
    /// Public list of emergency contacts
    EmergencyContacts,
    /// Admin-only list of rescue operations
    RescueOperations,
    /// Admin-only list of relief supplies
    ReliefSupplies,
    /// Admin login form
    Login,
}

impl Route {
    /// All routes in navigation-bar order
    pub const ALL: [Route; 7] = [
        Route::Home,
        Route::HelpRequests,
        Route::Volunteers,
        Route::EmergencyContacts,
        Route::RescueOperations,
        Route::ReliefSupplies,
        Route::Login,
    ];

    /// Resolve a path to a route
    ///
    /// Matching ignores case, surrounding whitespace, a query string and
    /// trailing slashes. Anything unrecognized resolves to [`Route::Home`].
    ///
    /// # Examples
    ///
    /// ```
    /// use reliefdesk::routes::Route;
    ///
    /// assert_eq!(Route::resolve("/relief-supplies/"), Route::ReliefSupplies);
    /// assert_eq!(Route::resolve("volunteers"), Route::Volunteers);
    /// assert_eq!(Route::resolve("/no-such-page"), Route::Home);
    /// ```
    pub fn resolve(path: &str) -> Self {
        Self::parse(path).unwrap_or_else(|| {
            tracing::info!("No view at {}, showing home", path.trim());
            Route::Home
        })
    }

    /// Resolve a path, returning `None` for unknown paths
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim();
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let normalized = path.trim_matches('/').to_lowercase();
        Self::ALL
            .into_iter()
            .find(|route| route.path().trim_matches('/') == normalized)
    }

    /// Canonical path of this route
    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::HelpRequests => "/help-requests",
            Self::Volunteers => "/volunteers",
            Self::EmergencyContacts => "/emergency-contacts",
            Self::RescueOperations => "/rescue-operations",
            Self::ReliefSupplies => "/relief-supplies",
            Self::Login => "/login",
        }
    }

    /// Label used in the navigation bar and view headings
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::HelpRequests => "Help Requests",
            Self::Volunteers => "Volunteers",
            Self::EmergencyContacts => "Emergency Contacts",
            Self::RescueOperations => "Rescue Operations",
            Self::ReliefSupplies => "Relief Supplies",
            Self::Login => "Admin Login",
        }
    }

    /// Whether this route sits behind the admin guard
    pub fn is_protected(&self) -> bool {
        matches!(self, Self::RescueOperations | Self::ReliefSupplies)
    }

    /// Backend resource listed by this view, if it is a list view
    pub fn resource(&self) -> Option<Resource> {
        match self {
            Self::HelpRequests => Some(Resource::HelpRequests),
            Self::Volunteers => Some(Resource::Volunteers),
            Self::EmergencyContacts => Some(Resource::EmergencyContacts),
            Self::RescueOperations => Some(Resource::RescueOperations),
            Self::ReliefSupplies => Some(Resource::ReliefSupplies),
            Self::Home | Self::Login => None,
        }
    }

    /// List view that shows `resource`
    pub fn for_resource(resource: Resource) -> Self {
        match resource {
            Resource::HelpRequests => Self::HelpRequests,
            Resource::Volunteers => Self::Volunteers,
            Resource::EmergencyContacts => Self::EmergencyContacts,
            Resource::RescueOperations => Self::RescueOperations,
            Resource::ReliefSupplies => Self::ReliefSupplies,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
