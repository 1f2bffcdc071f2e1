//! Record types returned by the relief backend
//!
//! Field names follow the backend JSON. Timestamps and most text fields
//! are optional-by-default so partially filled records from older
//! backends still deserialize.

use super::Resource;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Common behavior of every backend record
///
/// `COLUMNS` and [`Record::cells`] line up one-to-one and drive both the
/// terminal tables and CSV export.
pub trait Record: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// Collection the record belongs to
    const RESOURCE: Resource;

    /// Column headers for tables and CSV
    const COLUMNS: &'static [&'static str];

    /// Backend identifier
    fn id(&self) -> u64;

    /// Cell values in `COLUMNS` order
    fn cells(&self) -> Vec<String>;

    /// Text the list search matches against
    fn search_text(&self) -> Vec<&str>;

    /// Value of a backend field by its JSON name, for exact-match filters
    ///
    /// Strings are returned verbatim, other scalars in their JSON form,
    /// and `null`/missing fields as `None`.
    fn field(&self, name: &str) -> Option<String> {
        let value = serde_json::to_value(self).ok()?;
        match value.get(name)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// One-line count summary shown above the list
    fn summary(records: &[Self]) -> String {
        format!("Total: {}", records.len())
    }
}

fn format_time(value: &Option<DateTime<Utc>>) -> String {
    value
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// A request for help from an affected person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelpRequest {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub phone: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: String,
    /// `pending`, `in-progress` or `completed`
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for HelpRequest {
    const RESOURCE: Resource = Resource::HelpRequests;
    const COLUMNS: &'static [&'static str] = &[
        "ID",
        "Name",
        "Phone",
        "Location",
        "Description",
        "Priority",
        "Status",
    ];

    fn id(&self) -> u64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.phone.clone(),
            self.location.clone(),
            self.description.clone(),
            self.priority.clone(),
            self.status.clone(),
        ]
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.location.as_str(), self.phone.as_str()]
    }

    fn summary(records: &[Self]) -> String {
        let pending = records.iter().filter(|r| r.status == "pending").count();
        format!("Total: {} | Pending: {}", records.len(), pending)
    }
}

/// A registered volunteer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volunteer {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub availability: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for Volunteer {
    const RESOURCE: Resource = Resource::Volunteers;
    const COLUMNS: &'static [&'static str] = &[
        "ID",
        "Name",
        "Email",
        "Phone",
        "Skills",
        "Availability",
        "Location",
        "Status",
    ];

    fn id(&self) -> u64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.skills.clone(),
            self.availability.clone(),
            self.location.clone(),
            self.status.clone(),
        ]
    }

    fn search_text(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            self.skills.as_str(),
            self.location.as_str(),
        ]
    }

    fn summary(records: &[Self]) -> String {
        let available = records
            .iter()
            .filter(|v| v.availability == "available")
            .count();
        format!("Total: {} | Available: {}", records.len(), available)
    }
}

/// An organization to call in an emergency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyContact {
    #[serde(default)]
    pub id: u64,
    pub organization_name: String,
    #[serde(default)]
    pub contact_person: String,
    pub phone: String,
    #[serde(default)]
    pub alternate_phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    /// Medical, Rescue, Food, Shelter, ...
    #[serde(default)]
    pub service_type: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl Record for EmergencyContact {
    const RESOURCE: Resource = Resource::EmergencyContacts;
    const COLUMNS: &'static [&'static str] = &[
        "ID",
        "Organization",
        "Contact Person",
        "Phone",
        "Alternate Phone",
        "Email",
        "Address",
        "Service Type",
        "Active",
    ];

    fn id(&self) -> u64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.organization_name.clone(),
            self.contact_person.clone(),
            self.phone.clone(),
            self.alternate_phone.clone(),
            self.email.clone(),
            self.address.clone(),
            self.service_type.clone(),
            if self.is_active { "yes" } else { "no" }.to_string(),
        ]
    }

    fn search_text(&self) -> Vec<&str> {
        vec![
            self.organization_name.as_str(),
            self.contact_person.as_str(),
            self.phone.as_str(),
            self.address.as_str(),
            self.service_type.as_str(),
        ]
    }

    fn summary(records: &[Self]) -> String {
        let active = records.iter().filter(|c| c.is_active).count();
        format!("Total: {} | Active: {}", records.len(), active)
    }
}

/// A rescue team dispatched to a help request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RescueOperation {
    #[serde(default)]
    pub id: u64,
    pub operation_name: String,
    #[serde(default)]
    pub help_request_id: u64,
    #[serde(default)]
    pub volunteer_id: u64,
    #[serde(default)]
    pub team_size: u32,
    #[serde(default)]
    pub vehicle_type: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub people_rescued: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for RescueOperation {
    const RESOURCE: Resource = Resource::RescueOperations;
    const COLUMNS: &'static [&'static str] = &[
        "ID",
        "Operation",
        "Help Request",
        "Volunteer",
        "Team Size",
        "Vehicle",
        "Location",
        "Start",
        "End",
        "Status",
        "Priority",
        "Rescued",
    ];

    fn id(&self) -> u64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.operation_name.clone(),
            self.help_request_id.to_string(),
            self.volunteer_id.to_string(),
            self.team_size.to_string(),
            self.vehicle_type.clone(),
            self.location.clone(),
            format_time(&self.start_time),
            format_time(&self.end_time),
            self.status.clone(),
            self.priority.clone(),
            self.people_rescued.to_string(),
        ]
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.operation_name.as_str(), self.location.as_str(), self.vehicle_type.as_str()]
    }

    fn summary(records: &[Self]) -> String {
        let active = records.iter().filter(|o| o.status == "active").count();
        let rescued: u32 = records.iter().map(|o| o.people_rescued).sum();
        format!(
            "Total: {} | Active: {} | People rescued: {}",
            records.len(),
            active,
            rescued
        )
    }
}

/// Donated goods held at a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliefSupply {
    #[serde(default)]
    pub id: u64,
    pub item_name: String,
    /// Food, Medical, Clothing, Shelter, Other
    pub category: String,
    pub quantity: i64,
    pub unit: String,
    #[serde(default)]
    pub donor_name: String,
    #[serde(default)]
    pub donor_phone: String,
    pub location: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for ReliefSupply {
    const RESOURCE: Resource = Resource::ReliefSupplies;
    const COLUMNS: &'static [&'static str] = &[
        "ID",
        "Item",
        "Category",
        "Quantity",
        "Unit",
        "Donor",
        "Donor Phone",
        "Location",
        "Status",
        "Expiry",
        "Notes",
    ];

    fn id(&self) -> u64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.item_name.clone(),
            self.category.clone(),
            self.quantity.to_string(),
            self.unit.clone(),
            self.donor_name.clone(),
            self.donor_phone.clone(),
            self.location.clone(),
            self.status.clone(),
            self.expiry_date
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            self.notes.clone(),
        ]
    }

    fn search_text(&self) -> Vec<&str> {
        vec![
            self.item_name.as_str(),
            self.category.as_str(),
            self.donor_name.as_str(),
            self.location.as_str(),
        ]
    }

    fn summary(records: &[Self]) -> String {
        // the backend has used both "available" and "Available"
        let available = records
            .iter()
            .filter(|s| s.status.eq_ignore_ascii_case("available"))
            .count();
        format!("Total: {} | Available: {}", records.len(), available)
    }
}
