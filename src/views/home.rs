//! Home dashboard

use crate::api::{ApiClient, HelpRequest, Volunteer};
use crate::error::Result;
use colored::Colorize;
use std::fmt::Write as _;

/// Counts shown on the home view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_requests: usize,
    pub pending_requests: usize,
    pub completed_requests: usize,
    pub total_volunteers: usize,
    pub available_volunteers: usize,
}

impl DashboardStats {
    /// Compute counts from already fetched records
    pub fn from_records(requests: &[HelpRequest], volunteers: &[Volunteer]) -> Self {
        Self {
            total_requests: requests.len(),
            pending_requests: requests.iter().filter(|r| r.status == "pending").count(),
            completed_requests: requests.iter().filter(|r| r.status == "completed").count(),
            total_volunteers: volunteers.len(),
            available_volunteers: volunteers
                .iter()
                .filter(|v| v.availability == "available")
                .count(),
        }
    }

    /// Fetch help requests and volunteers concurrently and count them
    pub async fn load(api: &ApiClient) -> Result<Self> {
        let (requests, volunteers) =
            tokio::try_join!(api.list::<HelpRequest>(), api.list::<Volunteer>())?;
        Ok(Self::from_records(&requests, &volunteers))
    }

    /// Dashboard text
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", "Disaster Relief Coordination".bold());
        let _ = writeln!(out);
        let _ = writeln!(out, "  Help requests:        {}", self.total_requests);
        let _ = writeln!(
            out,
            "    pending:            {}",
            self.pending_requests.to_string().yellow()
        );
        let _ = writeln!(
            out,
            "    completed:          {}",
            self.completed_requests.to_string().green()
        );
        let _ = writeln!(out, "  Volunteers:           {}", self.total_volunteers);
        let _ = write!(
            out,
            "    available:          {}",
            self.available_volunteers.to_string().green()
        );
        out
    }
}
