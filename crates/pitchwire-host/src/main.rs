// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pitchwire desktop harness.
//
// Loads the config, answers each method name given on the command line as a
// JSON response line, then renders one demo ad through the full checkpoint
// schedule against the in-memory view system.

mod data_dir;
mod host;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{ArgGroup, Parser};
use pitchwire_ads::creative::AdCreative;
use pitchwire_ads::factory::NativeAd;
use pitchwire_ads::memory::MemoryViewSystem;
use pitchwire_ads::view::{CreativeBinder, ViewBinding};
use pitchwire_bridge::channel::{GET_NETWORK_TYPE, MethodCall};
use pitchwire_bridge::stub::FixedBridge;
use pitchwire_bridge::traits::PlatformBridge;
use pitchwire_core::AppConfig;
use pitchwire_core::error::{PitchwireError, Result};
use pitchwire_core::types::ConnectivityState;

use host::Host;

#[derive(Parser, Debug)]
#[command(name = "pitchwire")]
#[command(about = "Answer network-type channel calls and render a demo native ad")]
#[command(group(ArgGroup::new("connectivity").args(["subtype", "offline"])))]
struct Cli {
    /// Config file (defaults to the per-user pitchwire.json)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Simulate a connected network with this telephony subtype code
    #[arg(long, allow_negative_numbers = true)]
    subtype: Option<i32>,
    /// Simulate having no active network
    #[arg(long)]
    offline: bool,
    /// Method names or JSON-encoded calls to answer
    #[arg(default_value = GET_NETWORK_TYPE)]
    methods: Vec<String>,
}

impl Cli {
    /// Connectivity source: a simulated snapshot if one was asked for,
    /// otherwise the real platform bridge.
    fn bridge(&self) -> Arc<dyn PlatformBridge> {
        if self.offline {
            Arc::new(FixedBridge::new(None))
        } else if let Some(code) = self.subtype {
            Arc::new(FixedBridge::new(Some(ConnectivityState::connected(code))))
        } else {
            pitchwire_bridge::platform_bridge()
        }
    }
}

/// Stands in for the ad SDK: logs the binding and accepts it.
struct LoggingBinder;

impl CreativeBinder for LoggingBinder {
    fn bind_creative(&self, binding: &ViewBinding) -> Result<()> {
        for (kind, handle) in &binding.roles {
            tracing::debug!(instance = %binding.instance, role = %kind, handle = handle.0, "SDK bound role");
        }
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(Cli::parse()).await {
        tracing::error!(error = %e, "pitchwire harness failed");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let bridge = cli.bridge();
    let config_path = cli.config.unwrap_or_else(data_dir::default_config_path);
    let config = AppConfig::load(&config_path)?;

    tracing::info!(platform = bridge.platform_name(), "Pitchwire starting");

    let views = MemoryViewSystem::new();
    let host = Host::new(config, bridge, Arc::new(views.clone()))?;

    for method in &cli.methods {
        if method.starts_with('{') {
            println!("{}", host.handle_json(method));
        } else {
            let response = host.handle(&MethodCall::new(method.as_str()));
            println!("{}", serde_json::to_string(&response)?);
        }
    }

    let demo = AdCreative::default()
        .with_headline("Live scores, ball by ball")
        .with_body("Follow every match with instant updates.")
        .with_call_to_action("Install")
        .with_advertiser("Pitchwire");
    let factory_id = host.config().ad_factory_id.clone();
    let session = host.render_ad(
        &factory_id,
        NativeAd {
            creative: Arc::new(demo),
            binder: Arc::new(LoggingBinder),
        },
        None,
    )?;

    // No real layout pass on desktop; report it straight away.
    session.first_layout.first_layout_done();
    let report = session
        .report
        .await
        .map_err(|e| PitchwireError::Bridge(format!("reconciliation task failed: {e}")))?;

    let slots: Vec<_> = report
        .slots
        .iter()
        .map(|slot| {
            serde_json::json!({
                "role": slot.kind,
                "visible": slot.visible,
                "text": slot.content.as_text(),
            })
        })
        .collect();
    println!(
        "{}",
        serde_json::json!({
            "instance": report.instance,
            "completed": report.completed(),
            "checkpoints": report.checkpoints.len(),
            "slots": slots,
            "native_layout_requests": views.snapshot(report.instance).map(|v| v.layout_requests),
        })
    );

    session.lifetime.discard();
    views.discard(report.instance);
    Ok(())
}
