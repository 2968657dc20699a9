// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Command line surface. Every flag can also be set through its environment variable.

use crate::config::{non_empty, parse_key_values, Config, RecordOptions, ScanOptions};
use crate::error::Result;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "secretpublisher",
    about = "Secret Publisher is a command line tool to interact with Secret Receiver",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Shared secret used to sign requests, or "disabled"
    #[arg(long = "encodingRequest", env = "ENCODING_REQUEST", global = true, hide_env_values = true)]
    pub encoding_request: Option<String>,

    /// Base URL of the Secret Receiver
    #[arg(long = "receiverURL", env = "RECEIVER_URL", global = true)]
    pub receiver_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long = "commandTimeout", env = "COMMAND_TIMEOUT", global = true)]
    pub command_timeout: Option<String>,

    /// Use ~/.kube/config instead of the in-cluster service account
    #[arg(long = "localKubeconfig", global = true)]
    pub local_kubeconfig: bool,

    #[arg(long, global = true)]
    pub debug: bool,
}

impl GlobalArgs {
    pub fn to_config(&self) -> Result<Config> {
        Config::new(
            self.receiver_url.as_deref(),
            self.encoding_request.as_deref(),
            self.command_timeout.as_deref(),
            self.local_kubeconfig,
            self.debug,
        )
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the version number
    Version,
    /// Create or update SECRET_NAME depending on the receiver's checksum
    Exist(RecordArgs),
    /// Create SECRET_NAME in the receiver
    Create(RecordArgs),
    /// Replace SECRET_NAME in the receiver
    Update(RecordArgs),
    /// Print the receiver's checksum for SECRET_NAME
    Check(NameArgs),
    /// Delete SECRET_NAME from the receiver
    Delete(NameArgs),
    /// Publish every Secret matching label=value
    ScanSecrets(ScanArgs),
    /// Publish every ConfigMap matching label=value
    ScanConfigmaps(ScanArgs),
    /// Publish one YAML sub-value from every Secret matching label=value
    SecretSubvalue(SubvalueArgs),
}

#[derive(Args, Debug)]
pub struct NameArgs {
    #[arg(value_name = "SECRET_NAME")]
    pub name: String,

    /// Secret namespace in Kubernetes
    #[arg(long = "secretNamespace", env = "SECRET_NAMESPACE", default_value = "")]
    pub namespace: String,
}

#[derive(Args, Debug)]
pub struct RecordArgs {
    #[command(flatten)]
    pub target: NameArgs,

    /// Data to publish, key=value[,key=value]
    #[arg(long = "stringData", env = "STRING_DATA")]
    pub string_data: Option<String>,

    /// Labels to publish, key=value[,key=value]
    #[arg(long, env = "LABELS")]
    pub labels: Option<String>,

    /// Annotations to publish, key=value[,key=value]
    #[arg(long, env = "ANNOTATIONS")]
    pub annotations: Option<String>,
}

impl RecordArgs {
    pub fn to_options(&self) -> RecordOptions {
        let parse = |v: &Option<String>| parse_key_values(v.as_deref().unwrap_or_default());
        RecordOptions {
            namespace: self.target.namespace.clone(),
            data: parse(&self.string_data),
            labels: parse(&self.labels),
            annotations: parse(&self.annotations),
        }
    }
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Label selector, e.g. app=web
    #[arg(value_name = "LABEL=VALUE")]
    pub selector: String,

    /// Namespace to scan; all namespaces when empty
    #[arg(long = "secretNamespace", env = "SECRET_NAMESPACE", default_value = "")]
    pub namespace: String,

    /// Destination namespace in the Secret Receiver
    #[arg(long = "destinationNamespace", env = "DESTINATION_NAMESPACE")]
    pub destination_namespace: Option<String>,

    /// Destination name suffix (secret-subvalue: data key holding the suffix value)
    #[arg(long = "nameSuffix", env = "NAME_SUFFIX")]
    pub name_suffix: Option<String>,

    /// Skip objects carrying this label, key or key=value
    #[arg(long = "disabledLabel", env = "DISABLED_LABEL")]
    pub disabled_label: Option<String>,
}

impl ScanArgs {
    pub fn to_options(&self) -> ScanOptions {
        ScanOptions {
            namespace: self.namespace.clone(),
            destination_namespace: non_empty(self.destination_namespace.clone()),
            name_suffix: non_empty(self.name_suffix.clone()),
            disabled_label: non_empty(self.disabled_label.clone()),
            ..Default::default()
        }
    }
}

#[derive(Args, Debug)]
pub struct SubvalueArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Key inside the Secret to export, key.subkey
    #[arg(long = "matchKey", env = "MATCH_KEY")]
    pub match_key: Option<String>,

    /// Middle segment of the exported data key
    #[arg(long = "middleName", env = "MIDDLE_NAME")]
    pub middle_name: Option<String>,

    /// Labels for the exported record, key=value[,key=value]
    #[arg(long = "newLabels", env = "NEW_LABELS")]
    pub new_labels: Option<String>,

    /// Annotations for the exported record, key=value[,key=value]
    #[arg(long = "newAnnotations", env = "NEW_ANNOTATIONS")]
    pub new_annotations: Option<String>,
}

impl SubvalueArgs {
    pub fn to_options(&self) -> ScanOptions {
        ScanOptions {
            match_key: non_empty(self.match_key.clone()),
            middle_name: non_empty(self.middle_name.clone()),
            new_labels: parse_key_values(self.new_labels.as_deref().unwrap_or_default()),
            new_annotations: parse_key_values(self.new_annotations.as_deref().unwrap_or_default()),
            ..self.scan.to_options()
        }
    }
}
