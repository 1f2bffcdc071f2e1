//! Backend resource collections

use std::fmt;

/// One of the five REST collections exposed under the API base path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// `help-requests`
    HelpRequests,
    /// `volunteers`
    Volunteers,
    /// `emergency-contacts`
    EmergencyContacts,
    /// `rescue-operations`
    RescueOperations,
    /// `relief-supplies`
    ReliefSupplies,
}

impl Resource {
    /// All collections
    pub const ALL: [Resource; 5] = [
        Resource::HelpRequests,
        Resource::Volunteers,
        Resource::EmergencyContacts,
        Resource::RescueOperations,
        Resource::ReliefSupplies,
    ];

    /// Path segment under the API base (e.g. `relief-supplies`)
    pub fn segment(&self) -> &'static str {
        match self {
            Self::HelpRequests => "help-requests",
            Self::Volunteers => "volunteers",
            Self::EmergencyContacts => "emergency-contacts",
            Self::RescueOperations => "rescue-operations",
            Self::ReliefSupplies => "relief-supplies",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segment())
    }
}
