// ABOUTME: Recipe planner HTTP server binary
// ABOUTME: Loads environment configuration, applies CLI overrides, initializes logging and serves
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

//! # Recipe Planner Server Binary
//!
//! Serves ingredient editing, weekly shopping lists and recommendations over
//! HTTP, backed by `SQLite`.

use anyhow::Result;
use clap::Parser;
use recipe_planner::{
    config::{DatabaseUrl, ServerConfig},
    logging, server,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "recipe-planner-server")]
#[command(about = "Recipe planner API - ingredient editing, shopping lists and recommendations")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL, e.g. `sqlite:./data/planner.db` or `sqlite::memory:`
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(url) = args.database_url.as_deref() {
        config.database = DatabaseUrl::parse_url(url)?;
    }

    logging::init_from_env()?;
    info!("{}", config.summary());

    if let Err(e) = server::serve(config).await {
        error!(error = %e, "Server terminated with an error");
        return Err(e);
    }
    Ok(())
}
