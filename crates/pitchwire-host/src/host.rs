// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-platform host glue: answers method channel calls and builds native ad
// views through the registered factories.
//
// Everything here is expected to run on the UI/event-loop thread. Ad views
// are reconciled on tasks spawned onto the current tokio runtime; with the
// current-thread flavour at most one checkpoint runs at a time.

use std::sync::Arc;

use pitchwire_ads::coordinator::AdRenderCoordinator;
use pitchwire_ads::factory::{AdFactoryRegistry, ListTileAdFactory, NativeAd};
use pitchwire_ads::schedule::{self, LayoutNotifier, ReconciliationReport, ReconciliationSchedule, ViewLifetime};
use pitchwire_ads::view::ViewSystem;
use pitchwire_bridge::channel::{MethodCall, MethodResponse, NetworkTypeChannel};
use pitchwire_bridge::traits::PlatformBridge;
use pitchwire_core::AppConfig;
use pitchwire_core::error::Result;
use pitchwire_core::types::AdInstanceId;
use pitchwire_network::Classifier;
use serde_json::{Map, Value};
use tokio::task::JoinHandle;
use tracing::info;

/// A native ad view whose reconciliation is in flight.
pub struct AdViewSession {
    pub instance: AdInstanceId,
    /// Fire once the host has laid the view out for the first time.
    pub first_layout: LayoutNotifier,
    /// Flip when the host discards the view.
    pub lifetime: ViewLifetime,
    pub report: JoinHandle<ReconciliationReport>,
}

/// Host-side owner of the channel handler and the ad factory registry.
pub struct Host {
    config: AppConfig,
    channel: NetworkTypeChannel,
    factories: AdFactoryRegistry,
    schedule: ReconciliationSchedule,
}

impl Host {
    /// Wire the network-type channel and register the list-tile factory
    /// under the configured id.
    pub fn new(
        config: AppConfig,
        bridge: Arc<dyn PlatformBridge>,
        views: Arc<dyn ViewSystem>,
    ) -> Result<Self> {
        config.validate()?;

        let classifier = Classifier::with_nr_code(config.nr_subtype_code);
        let channel = NetworkTypeChannel::new(config.channel_name.clone(), bridge, classifier);

        let mut factories = AdFactoryRegistry::new();
        factories.register(
            &config.ad_factory_id,
            Arc::new(ListTileAdFactory::with_id(config.ad_factory_id.clone(), views)),
        )?;

        let schedule = ReconciliationSchedule::from_config(&config.reconciliation);
        info!(
            channel = %config.channel_name,
            factory = %config.ad_factory_id,
            "host initialised"
        );

        Ok(Self {
            config,
            channel,
            factories,
            schedule,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Answer one method channel call.
    pub fn handle(&self, call: &MethodCall) -> MethodResponse {
        self.channel.handle(call)
    }

    pub fn handle_json(&self, request: &str) -> String {
        self.channel.handle_json(request)
    }

    /// Build and bind an ad view without scheduling any checkpoint.
    pub fn create_ad_view(
        &self,
        factory_id: &str,
        ad: NativeAd,
        custom_options: Option<&Map<String, Value>>,
    ) -> Result<AdRenderCoordinator> {
        self.factories.create(factory_id, ad, custom_options)
    }

    /// Build an ad view and start its reconciliation schedule. Must be
    /// called from within a tokio runtime.
    pub fn render_ad(
        &self,
        factory_id: &str,
        ad: NativeAd,
        custom_options: Option<&Map<String, Value>>,
    ) -> Result<AdViewSession> {
        let coordinator = self.create_ad_view(factory_id, ad, custom_options)?;
        let instance = coordinator.id();
        let (first_layout, lifetime, report) = schedule::spawn(coordinator, self.schedule);
        Ok(AdViewSession {
            instance,
            first_layout,
            lifetime,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitchwire_ads::creative::AdCreative;
    use pitchwire_ads::memory::MemoryViewSystem;
    use pitchwire_ads::view::{CreativeBinder, ViewBinding};
    use pitchwire_bridge::stub::FixedBridge;
    use pitchwire_core::PitchwireError;
    use pitchwire_core::types::{ConnectivityState, SlotKind};

    struct AcceptAll;

    impl CreativeBinder for AcceptAll {
        fn bind_creative(&self, _binding: &ViewBinding) -> Result<()> {
            Ok(())
        }
    }

    fn host(config: AppConfig, state: Option<ConnectivityState>) -> (Host, MemoryViewSystem) {
        let views = MemoryViewSystem::new();
        let host = Host::new(
            config,
            Arc::new(FixedBridge::new(state)),
            Arc::new(views.clone()),
        )
        .unwrap();
        (host, views)
    }

    fn ad(creative: AdCreative) -> NativeAd {
        NativeAd {
            creative: Arc::new(creative),
            binder: Arc::new(AcceptAll),
        }
    }

    #[test]
    fn answers_network_type() {
        let (host, _) = host(AppConfig::default(), Some(ConnectivityState::connected(13)));
        assert_eq!(
            host.handle(&MethodCall::new("getNetworkType")),
            MethodResponse::success("4G")
        );
        assert_eq!(host.handle(&MethodCall::new("foo")), MethodResponse::NotImplemented);
    }

    #[test]
    fn configured_nr_code_reaches_classifier() {
        let config = AppConfig {
            nr_subtype_code: 23,
            ..Default::default()
        };
        let (host, _) = host(config, Some(ConnectivityState::connected(23)));
        assert_eq!(
            host.handle(&MethodCall::new("getNetworkType")),
            MethodResponse::success("5G")
        );
    }

    #[test]
    fn unknown_factory_is_an_error() {
        let (host, _) = host(AppConfig::default(), None);
        let err = host
            .create_ad_view("banner", ad(AdCreative::default()), None)
            .err()
            .unwrap();
        assert!(matches!(err, PitchwireError::UnknownFactory(_)));
    }

    #[test]
    fn invalid_config_rejected() {
        let config = AppConfig {
            channel_name: String::new(),
            ..Default::default()
        };
        let result = Host::new(
            config,
            Arc::new(FixedBridge::new(None)),
            Arc::new(MemoryViewSystem::new()),
        );
        assert!(matches!(result, Err(PitchwireError::Config(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn renders_list_tile_through_schedule() {
        let (host, views) = host(AppConfig::default(), None);
        let session = host
            .render_ad(
                "listTile",
                ad(AdCreative::default().with_headline("Test Ad").with_call_to_action("Install")),
                None,
            )
            .unwrap();
        session.first_layout.first_layout_done();

        let report = session.report.await.unwrap();
        assert!(report.completed());
        let native = views.snapshot(session.instance).unwrap();
        assert_eq!(native.slots[&SlotKind::Headline].content.as_text(), Some("Test Ad"));
        assert!(native.slots[&SlotKind::CallToAction].visible);
        assert!(!native.slots[&SlotKind::Body].visible);
    }
}
