//! REST client for the relief backend
//!
//! Thin wrapper over `reqwest`: one generic CRUD surface driven by the
//! [`Record`] trait, plus the handful of filtered read endpoints the
//! backend exposes for specific collections.

use crate::config::ApiConfig;
use crate::error::{Result, ReliefError};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

pub mod models;
pub mod resource;

pub use models::{EmergencyContact, HelpRequest, Record, ReliefSupply, RescueOperation, Volunteer};
pub use resource::Resource;

/// Evaluate `$body` with `$record` bound as a type alias for the
/// [`Record`] type of a runtime [`Resource`]
macro_rules! with_record {
    ($resource:expr, $record:ident => $body:expr) => {
        match $resource {
            $crate::api::Resource::HelpRequests => {
                type $record = $crate::api::HelpRequest;
                $body
            }
            $crate::api::Resource::Volunteers => {
                type $record = $crate::api::Volunteer;
                $body
            }
            $crate::api::Resource::EmergencyContacts => {
                type $record = $crate::api::EmergencyContact;
                $body
            }
            $crate::api::Resource::RescueOperations => {
                type $record = $crate::api::RescueOperation;
                $body
            }
            $crate::api::Resource::ReliefSupplies => {
                type $record = $crate::api::ReliefSupply;
                $body
            }
        }
    };
}
pub(crate) use with_record;

/// Body returned by `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `OK` when the backend is up
    pub status: String,
    /// Human readable detail
    #[serde(default)]
    pub message: String,
}

/// Error body the backend sends with non-success statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client bound to one backend base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be initialized
    ///
    /// # Examples
    ///
    /// ```
    /// use reliefdesk::api::ApiClient;
    /// use reliefdesk::config::ApiConfig;
    ///
    /// let client = ApiClient::new(&ApiConfig::default()).unwrap();
    /// assert_eq!(client.base_url(), "http://localhost:8081/api/v1");
    /// ```
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("reliefdesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ReliefError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        tracing::debug!("Initialized API client: base_url={}", base_url);

        Ok(Self { client, base_url })
    }

    /// Base URL requests are issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// URL for `segments` under the base, each segment percent-encoded
    fn segments_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ReliefError::Config(format!("Invalid API base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| {
                ReliefError::Config(format!("API base URL has no path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Check backend connectivity
    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self.send(self.client.get(self.url("health")), "health").await?;
        Ok(response.json().await?)
    }

    /// Fetch every record of a collection
    ///
    /// A body that is not a JSON array is treated as an empty list.
    pub async fn list<T: Record>(&self) -> Result<Vec<T>> {
        self.list_at(T::RESOURCE.segment()).await
    }

    /// Fetch one record by id
    ///
    /// # Errors
    ///
    /// Returns [`ReliefError::NotFound`] when the backend answers 404
    pub async fn get<T: Record>(&self, id: u64) -> Result<T> {
        let path = format!("{}/{}", T::RESOURCE.segment(), id);
        let response = self.send(self.client.get(self.url(&path)), &path).await?;
        Ok(response.json().await?)
    }

    /// Create a record; returns the stored record as echoed by the backend
    pub async fn create<T: Record, B: Serialize + ?Sized>(&self, body: &B) -> Result<T> {
        let path = T::RESOURCE.segment();
        let request = self.client.post(self.url(path)).json(body);
        let response = self.send(request, path).await?;
        Ok(response.json().await?)
    }

    /// Replace a record's fields
    pub async fn update<T: Record, B: Serialize + ?Sized>(&self, id: u64, body: &B) -> Result<T> {
        let path = format!("{}/{}", T::RESOURCE.segment(), id);
        let request = self.client.put(self.url(&path)).json(body);
        let response = self.send(request, &path).await?;
        Ok(response.json().await?)
    }

    /// Delete a record
    pub async fn delete(&self, resource: Resource, id: u64) -> Result<()> {
        let path = format!("{}/{}", resource.segment(), id);
        self.send(self.client.delete(self.url(&path)), &path).await?;
        Ok(())
    }

    /// Emergency contacts flagged active
    pub async fn active_emergency_contacts(&self) -> Result<Vec<EmergencyContact>> {
        self.list_at("emergency-contacts/status/active").await
    }

    /// Emergency contacts offering `service_type`
    pub async fn emergency_contacts_by_service(
        &self,
        service_type: &str,
    ) -> Result<Vec<EmergencyContact>> {
        let url = self.segments_url(&["emergency-contacts", "service", service_type])?;
        self.list_from(url.into(), &format!("emergency-contacts/service/{}", service_type))
            .await
    }

    /// Rescue operations currently active
    pub async fn active_rescue_operations(&self) -> Result<Vec<RescueOperation>> {
        self.list_at("rescue-operations/status/active").await
    }

    /// Rescue operations with the given priority
    pub async fn rescue_operations_by_priority(
        &self,
        priority: &str,
    ) -> Result<Vec<RescueOperation>> {
        let url = self.segments_url(&["rescue-operations", "priority", priority])?;
        self.list_from(url.into(), &format!("rescue-operations/priority/{}", priority))
            .await
    }

    /// Relief supplies in one category
    pub async fn relief_supplies_by_category(&self, category: &str) -> Result<Vec<ReliefSupply>> {
        let url = self.segments_url(&["relief-supplies", "category", category])?;
        self.list_from(url.into(), &format!("relief-supplies/category/{}", category))
            .await
    }

    /// Relief supplies still available for distribution
    pub async fn available_relief_supplies(&self) -> Result<Vec<ReliefSupply>> {
        self.list_at("relief-supplies/available/true").await
    }

    async fn list_at<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        self.list_from(self.url(path), path).await
    }

    async fn list_from<T: DeserializeOwned>(&self, url: String, path: &str) -> Result<Vec<T>> {
        let response = self.send(self.client.get(url), path).await?;
        let body: serde_json::Value = response.json().await?;
        match body {
            serde_json::Value::Array(_) => Ok(serde_json::from_value(body)?),
            other => {
                tracing::warn!(
                    "Expected a JSON array from {}, got {}; treating as empty",
                    path,
                    json_kind(&other)
                );
                Ok(Vec::new())
            }
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder, path: &str) -> Result<Response> {
        tracing::debug!("Requesting {}", path);
        let response = request.send().await.map_err(|e| {
            tracing::error!("Request to {} failed: {}", path, e);
            ReliefError::Http(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or_else(|_| text.trim().to_string());
        tracing::error!("Backend returned {} for {}: {}", status, path, message);

        if status == StatusCode::NOT_FOUND {
            return Err(ReliefError::NotFound(if message.is_empty() {
                path.to_string()
            } else {
                message
            })
            .into());
        }

        Err(ReliefError::Api {
            status: status.as_u16(),
            message,
        }
        .into())
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = ApiConfig {
            base_url: "http://localhost:8081/api/v1/".to_string(),
            timeout_seconds: 5,
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8081/api/v1");
        assert_eq!(
            client.url("/relief-supplies/3"),
            "http://localhost:8081/api/v1/relief-supplies/3"
        );
    }

    #[test]
    fn test_segments_url_encodes_each_segment() {
        let client = ApiClient::new(&ApiConfig {
            base_url: "http://localhost:8081/api/v1".to_string(),
            timeout_seconds: 5,
        })
        .unwrap();
        let url = client
            .segments_url(&["relief-supplies", "category", "Food/Water?x=1"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8081/api/v1/relief-supplies/category/Food%2FWater%3Fx=1"
        );
    }

    #[test]
    fn test_json_kind() {
        assert_eq!(json_kind(&serde_json::json!(null)), "null");
        assert_eq!(json_kind(&serde_json::json!({"a": 1})), "an object");
    }
}
