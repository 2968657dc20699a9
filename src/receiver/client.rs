// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! HTTP client for the secret receiver

use crate::config::Config;
use crate::constants::headers;
use crate::error::{PublisherError, Result};
use crate::receiver::signing::{base_string, sign};
use crate::types::RemoteState;
use async_trait::async_trait;
use bytes::Bytes;
use http::{Method, StatusCode};
use reqwest::RequestBuilder;
use tracing::{debug, instrument};
use url::Url;

/// Operations the reconciler needs from a secret receiver
#[async_trait]
pub trait Receiver: Send + Sync {
    /// Look up what the receiver stores for `namespace/name`
    async fn fetch(&self, name: &str, namespace: &str) -> Result<RemoteState>;

    /// Create (POST) or replace (PUT) an object. `name` is only used for signing.
    async fn upsert(&self, method: Method, name: &str, body: Bytes) -> Result<()>;

    async fn remove(&self, name: &str, namespace: &str) -> Result<()>;
}

/// [`Receiver`] backed by a real HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpReceiver {
    http: reqwest::Client,
    base_url: Url,
    signing_secret: Option<String>,
}

impl HttpReceiver {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|source| PublisherError::TransportError {
                context: "building HTTP client".to_string(),
                source,
            })?;

        Ok(HttpReceiver {
            http,
            base_url: config.receiver_url.clone(),
            signing_secret: config.signing_secret.clone(),
        })
    }

    fn object_url(&self, namespace: &str, name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            namespace,
            name
        )
    }

    /// Attach timestamp and signature headers when signing is enabled
    fn signed(&self, request: RequestBuilder, name: &str) -> Result<RequestBuilder> {
        let Some(secret) = self.signing_secret.as_deref() else {
            return Ok(request);
        };

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign(&timestamp, &base_string(&timestamp, name), secret);
        if signature.is_empty() {
            return Err(PublisherError::SigningError(format!(
                "empty signature for {}",
                name
            )));
        }

        Ok(request
            .header(headers::REQUEST_TIMESTAMP, timestamp)
            .header(headers::SIGNATURE, signature))
    }

    async fn send(&self, request: RequestBuilder, context: &str) -> Result<(StatusCode, String)> {
        let response = request
            .send()
            .await
            .map_err(|source| PublisherError::TransportError {
                context: context.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| PublisherError::TransportError {
                context: context.to_string(),
                source,
            })?;

        debug!(
            "[SECRETRECEIVER] Response Code: {}, Body Response: {}",
            status, body
        );
        Ok((status, body))
    }
}

#[async_trait]
impl Receiver for HttpReceiver {
    #[instrument(skip(self))]
    async fn fetch(&self, name: &str, namespace: &str) -> Result<RemoteState> {
        let context = format!("GET {}/{}", namespace, name);
        let request = self.signed(self.http.get(self.object_url(namespace, name)), name)?;
        let (status, body) = self.send(request, &context).await?;

        if status == StatusCode::NO_CONTENT {
            return Ok(RemoteState::NotFound);
        }
        if status.as_u16() >= 400 {
            return Err(PublisherError::ReceiverError {
                context,
                status: status.to_string(),
            });
        }
        Ok(RemoteState::Found(body))
    }

    #[instrument(skip(self, body), fields(bytes = body.len()))]
    async fn upsert(&self, method: Method, name: &str, body: Bytes) -> Result<()> {
        if method != Method::POST && method != Method::PUT {
            return Err(PublisherError::ConfigurationError(format!(
                "unsupported upsert method {}",
                method
            )));
        }

        let context = format!("{} {}", method, name);
        let request = self
            .http
            .request(method, self.base_url.clone())
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(body);
        let request = self.signed(request, name)?;
        let (status, _) = self.send(request, &context).await?;

        if status.as_u16() > 204 {
            return Err(PublisherError::ReceiverError {
                context,
                status: status.to_string(),
            });
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, name: &str, namespace: &str) -> Result<()> {
        let context = format!("DELETE {}/{}", namespace, name);
        let request = self.signed(self.http.delete(self.object_url(namespace, name)), name)?;
        let (status, _) = self.send(request, &context).await?;

        if status.as_u16() > 204 {
            return Err(PublisherError::ReceiverError {
                context,
                status: status.to_string(),
            });
        }
        Ok(())
    }
}
