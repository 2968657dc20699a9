// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PublisherError {
    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),

    #[error("Request to secret receiver failed ({context}): {source}")]
    TransportError {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Secret receiver rejected {context}: {status}")]
    ReceiverError { context: String, status: String },

    #[error("Failed to parse embedded value: {0}")]
    ParseError(String),

    #[error("Cannot process these {kind}: [{}]", .names.join(", "))]
    PartialBatchFailure {
        kind: &'static str,
        names: Vec<String>,
    },

    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("Failed to encode record: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to sign request: {0}")]
    SigningError(String),
}

pub type Result<T> = std::result::Result<T, PublisherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_batch_failure_names_every_item() {
        let err = PublisherError::PartialBatchFailure {
            kind: "secrets",
            names: vec!["item2".to_string(), "item5".to_string()],
        };

        assert_eq!(
            err.to_string(),
            "Cannot process these secrets: [item2, item5]"
        );
    }

    #[test]
    fn test_receiver_error_carries_status_text() {
        let err = PublisherError::ReceiverError {
            context: "GET default/db".to_string(),
            status: "500 Internal Server Error".to_string(),
        };

        assert!(err.to_string().contains("500 Internal Server Error"));
    }
}
