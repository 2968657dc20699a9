// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use secretpublisher::cli::{Cli, Command};
use secretpublisher::constants::NOT_FOUND_OUTPUT;
use secretpublisher::kubernetes::create_client;
use secretpublisher::receiver::HttpReceiver;
use secretpublisher::reconcilers::Reconciler;
use secretpublisher::sync::Scanner;
use secretpublisher::types::RemoteState;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.global.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Command::Version = cli.command {
        match option_env!("BUILD_INFO") {
            Some(build) => println!(
                "secretpublisher command line tools version: {}, build: {}",
                env!("CARGO_PKG_VERSION"),
                build
            ),
            None => println!(
                "secretpublisher command line tools version: {}",
                env!("CARGO_PKG_VERSION")
            ),
        }
        return Ok(());
    }

    // Fails before any network call when the receiver URL is missing
    let config = cli.global.to_config()?;
    debug!(
        "Configuration loaded: receiver_url={}, signing={}, timeout={:?}",
        config.receiver_url,
        config.signing_enabled(),
        config.timeout
    );

    let receiver = Arc::new(HttpReceiver::new(&config)?);
    let reconciler = Reconciler::new(receiver);

    match cli.command {
        Command::Version => {}
        Command::Exist(args) => {
            let record = args.to_options().to_record(&args.target.name);
            reconciler.reconcile(&args.target.name, &record).await?;
        }
        Command::Create(args) => {
            let record = args.to_options().to_record(&args.target.name);
            reconciler.create(&args.target.name, &record).await?;
            println!("[OK] Created");
        }
        Command::Update(args) => {
            let record = args.to_options().to_record(&args.target.name);
            reconciler.update(&args.target.name, &record).await?;
            println!("[OK] Updated");
        }
        Command::Check(args) => match reconciler.check(&args.name, &args.namespace).await? {
            RemoteState::Found(body) => println!("{}", body.trim_end()),
            RemoteState::NotFound => println!("{}", NOT_FOUND_OUTPUT),
        },
        Command::Delete(args) => {
            reconciler.delete(&args.name, &args.namespace).await?;
        }
        Command::ScanSecrets(args) => {
            let options = args.to_options();
            let client = create_client(&config)
                .await
                .context("Failed to create Kubernetes client")?;
            let report = Scanner::new(&client, &reconciler, &options)
                .scan_secrets(&args.selector)
                .await?;
            println!("{}", report);
        }
        Command::ScanConfigmaps(args) => {
            let options = args.to_options();
            let client = create_client(&config)
                .await
                .context("Failed to create Kubernetes client")?;
            let report = Scanner::new(&client, &reconciler, &options)
                .scan_config_maps(&args.selector)
                .await?;
            println!("{}", report);
        }
        Command::SecretSubvalue(args) => {
            let options = args.to_options();
            // Reject a malformed --matchKey before touching the cluster
            options.split_match_key()?;
            let client = create_client(&config)
                .await
                .context("Failed to create Kubernetes client")?;
            let report = Scanner::new(&client, &reconciler, &options)
                .scan_subvalues(&args.scan.selector)
                .await?;
            println!("{}", report);
        }
    }

    Ok(())
}
