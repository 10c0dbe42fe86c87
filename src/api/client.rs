use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::TransportError;
use super::types::{CreateResponse, FormDraft, Record, UserList};

/// The capability set the view controller needs from a record store.
///
/// Each call is exactly one round trip; implementations never retry.
pub trait RecordStore {
    async fn list(&self) -> Result<Vec<Record>, TransportError>;
    /// Any 2xx is a success. The echoed row is returned when the server sent
    /// one; a bare confirmation yields `None`.
    async fn create(&self, draft: &FormDraft) -> Result<Option<Record>, TransportError>;
    async fn delete(&self, id: i64) -> Result<(), TransportError>;
}

/// HTTP client for the `/users` resource of the backing REST server.
///
/// No request timeout is configured: a hung server blocks the caller.
pub struct RecordClient {
    client: Client,
    base_url: String,
}

impl RecordClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    fn user_url(&self, id: i64) -> String {
        format!("{}/users/{id}", self.base_url)
    }
}

impl RecordStore for RecordClient {
    async fn list(&self) -> Result<Vec<Record>, TransportError> {
        let response = self.client.get(self.users_url()).send().await?;
        debug!(method = "GET", path = "/users", status = %response.status(), "list users");
        let body: UserList = decode(response).await?;
        Ok(body.into_records())
    }

    async fn create(&self, draft: &FormDraft) -> Result<Option<Record>, TransportError> {
        let response = self
            .client
            .post(self.users_url())
            .json(draft)
            .send()
            .await?;
        debug!(method = "POST", path = "/users", status = %response.status(), "create user");
        let body = ensure_success(response).await?.text().await?;
        Ok(CreateResponse::from_body(&body).into_record())
    }

    async fn delete(&self, id: i64) -> Result<(), TransportError> {
        let response = self.client.delete(self.user_url(id)).send().await?;
        debug!(method = "DELETE", id, status = %response.status(), "delete user");
        ensure_success(response).await?;
        Ok(())
    }
}

async fn ensure_success(response: Response) -> Result<Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(TransportError::from_status(status, &body))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
    let response = ensure_success(response).await?;
    let text = response.text().await?;
    serde_json::from_str(&text)
        .map_err(|e| TransportError::new(format!("Invalid response from server: {e}")))
}
