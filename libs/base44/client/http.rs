//! HTTP implementation of the Base44 client
//!
//! All calls go to `{server_url}/api/apps/{app_id}/...` with an `X-App-Id`
//! header and, when a token is configured, a bearer `Authorization` header.

use super::auth::{login_url, request_headers};
use super::helpers::{
    parse_json, require_success, validate_app_id, validate_entity_name, validate_record_id,
    with_headers,
};
use super::types::{EntityRecord, ListQuery, User};
use super::{AuthenticatedServiceClient, ClientError, Result};
use crate::config::{parse_server_url, ClientConfiguration};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Base44 REST client
pub struct Base44Client {
    config: ClientConfiguration,
    base_url: Url,
    client: Client,
}

impl Base44Client {
    /// Build a client. No network I/O happens here.
    pub fn new(config: ClientConfiguration) -> Result<Self> {
        validate_app_id(config.application_id())?;

        let mut base_url =
            parse_server_url(config.server_url()).map_err(ClientError::InvalidConfiguration)?;
        push_segments(&mut base_url, &["api", "apps", config.application_id()])?;

        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            config,
            base_url,
            client,
        })
    }

    pub fn configuration(&self) -> &ClientConfiguration {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn login_url(&self) -> String {
        login_url(self.config.server_url(), self.config.application_id())
    }

    fn entity_url(&self, entity: &str, id: Option<&str>) -> Result<Url> {
        validate_entity_name(entity)?;
        let mut url = self.base_url.clone();
        match id {
            Some(id) => {
                validate_record_id(id)?;
                push_segments(&mut url, &["entities", entity, id])?;
            }
            None => push_segments(&mut url, &["entities", entity])?,
        }
        Ok(url)
    }

    /// Attach app and auth headers, refusing when auth is required but absent
    fn authorize(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.config.access_token();
        if token.is_none() && self.config.requires_auth() {
            return Err(ClientError::AuthenticationRequired {
                login_url: self.login_url(),
            });
        }
        Ok(with_headers(
            req,
            request_headers(self.config.application_id(), token),
        ))
    }
}

/// Append percent-encoded path segments
fn push_segments(url: &mut Url, segments: &[&str]) -> Result<()> {
    let display = url.to_string();
    url.path_segments_mut()
        .map_err(|_| {
            ClientError::InvalidConfiguration(format!("'{}' cannot be a base url", display))
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(())
}

#[async_trait]
impl AuthenticatedServiceClient for Base44Client {
    fn application_id(&self) -> &str {
        self.config.application_id()
    }

    fn requires_auth(&self) -> bool {
        self.config.requires_auth()
    }

    fn is_authenticated(&self) -> bool {
        self.config.access_token().is_some()
    }

    async fn me(&self) -> Result<User> {
        let url = self.entity_url("User", Some("me"))?;

        debug!("Fetching current user from {}", url);

        let req = self.authorize(self.client.get(url))?;
        let response = req.send().await?;
        let response = require_success(response, "Failed to fetch current user").await?;

        parse_json(response).await
    }

    async fn list_entities(&self, entity: &str, query: &ListQuery) -> Result<Vec<EntityRecord>> {
        let url = self.entity_url(entity, None)?;
        let params = query.to_query_params();

        debug!("GET {} with {} params", url, params.len());

        let req = self.authorize(self.client.get(url).query(&params))?;
        let response = req.send().await?;
        let response = require_success(response, "Failed to list entities").await?;

        let records: Vec<EntityRecord> = parse_json(response).await?;

        debug!("Fetched {} {} records", records.len(), entity);
        Ok(records)
    }

    async fn get_entity(&self, entity: &str, id: &str) -> Result<EntityRecord> {
        let url = self.entity_url(entity, Some(id))?;

        debug!("Fetching {} {}", entity, id);

        let req = self.authorize(self.client.get(url))?;
        let response = req.send().await?;
        let response = require_success(response, "Failed to fetch entity").await?;

        parse_json(response).await
    }

    async fn create_entity(&self, entity: &str, data: Value) -> Result<EntityRecord> {
        let url = self.entity_url(entity, None)?;

        debug!("Creating {} record", entity);

        let req = self.authorize(self.client.post(url).json(&data))?;
        let response = req.send().await?;
        let response = require_success(response, "Failed to create entity").await?;

        parse_json(response).await
    }

    async fn update_entity(&self, entity: &str, id: &str, data: Value) -> Result<EntityRecord> {
        let url = self.entity_url(entity, Some(id))?;

        debug!("Updating {} {}", entity, id);

        let req = self.authorize(self.client.put(url).json(&data))?;
        let response = req.send().await?;
        let response = require_success(response, "Failed to update entity").await?;

        parse_json(response).await
    }

    async fn delete_entity(&self, entity: &str, id: &str) -> Result<()> {
        let url = self.entity_url(entity, Some(id))?;

        debug!("Deleting {} {}", entity, id);

        let req = self.authorize(self.client.delete(url))?;
        let response = req.send().await?;
        require_success(response, "Failed to delete entity").await?;

        Ok(())
    }
}
