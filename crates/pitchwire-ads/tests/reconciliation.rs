// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end reconciliation against a creative source that changes between
// checkpoints and a view whose content the "SDK" wipes behind our back.

use std::sync::{Arc, Mutex};

use pitchwire_ads::coordinator::{Checkpoint, FieldOutcome, RenderState};
use pitchwire_ads::creative::{AdCreative, CreativeField, CreativeSource};
use pitchwire_ads::factory::{AdFactoryRegistry, ListTileAdFactory, NativeAd};
use pitchwire_ads::memory::MemoryViewSystem;
use pitchwire_ads::schedule::{self, ReconciliationSchedule};
use pitchwire_ads::view::{CreativeBinder, ViewBinding};
use pitchwire_core::error::Result;
use pitchwire_core::types::SlotKind;

/// Creative whose fields the test can change at any time, like an SDK that
/// fills the ad in lazily.
#[derive(Clone, Default)]
struct ScriptedCreative {
    current: Arc<Mutex<AdCreative>>,
}

impl ScriptedCreative {
    fn set(&self, creative: AdCreative) {
        *self.current.lock().unwrap() = creative;
    }
}

impl CreativeSource for ScriptedCreative {
    fn field(&self, kind: SlotKind) -> Result<Option<CreativeField>> {
        self.current.lock().unwrap().field(kind)
    }
}

/// Records every binding it receives.
#[derive(Default)]
struct RecordingSdk {
    bindings: Mutex<Vec<ViewBinding>>,
}

impl CreativeBinder for RecordingSdk {
    fn bind_creative(&self, binding: &ViewBinding) -> Result<()> {
        self.bindings.lock().unwrap().push(binding.clone());
        Ok(())
    }
}

fn setup() -> (AdFactoryRegistry, MemoryViewSystem) {
    let views = MemoryViewSystem::new();
    let mut registry = AdFactoryRegistry::new();
    registry
        .register(
            "listTile",
            Arc::new(ListTileAdFactory::new(Arc::new(views.clone()))),
        )
        .unwrap();
    (registry, views)
}

#[test]
fn late_headline_is_picked_up_by_second_checkpoint() {
    let (registry, views) = setup();
    let creative = ScriptedCreative::default();
    creative.set(AdCreative::default().with_call_to_action("Install"));
    let sdk = Arc::new(RecordingSdk::default());

    let mut coordinator = registry
        .create(
            "listTile",
            NativeAd {
                creative: Arc::new(creative.clone()),
                binder: sdk.clone(),
            },
            None,
        )
        .unwrap();

    // Binding happens during construction, before any checkpoint.
    assert_eq!(sdk.bindings.lock().unwrap().len(), 1);
    assert_eq!(coordinator.state(), RenderState::BoundToSdk);

    let first = coordinator.run_next().unwrap();
    assert_eq!(first.outcome(SlotKind::Headline), Some(&FieldOutcome::Absent));
    assert!(!coordinator.slots().get(SlotKind::Headline).visible);

    creative.set(
        AdCreative::default()
            .with_headline("Late Headline")
            .with_call_to_action("Install"),
    );
    let second = coordinator.run_next().unwrap();
    assert_eq!(second.checkpoint, Checkpoint::AfterFirstLayout);
    assert_eq!(second.outcome(SlotKind::Headline), Some(&FieldOutcome::Applied));

    // The SDK withdraws everything before the last pass; nothing regresses.
    creative.set(AdCreative::default());
    coordinator.run_next().unwrap();

    let headline = coordinator.slots().get(SlotKind::Headline);
    assert_eq!(headline.content.as_text(), Some("Late Headline"));
    assert!(headline.visible);

    let native = views.snapshot(coordinator.id()).unwrap();
    assert_eq!(native.slots[&SlotKind::Headline].content.as_text(), Some("Late Headline"));
    assert!(native.slots[&SlotKind::CallToAction].visible);
}

#[test]
fn content_wiped_by_sdk_is_restored() {
    let (registry, views) = setup();
    let creative = AdCreative::default()
        .with_headline("Test Ad")
        .with_body("Body copy")
        .with_advertiser("Acme");
    let mut coordinator = registry
        .create(
            "listTile",
            NativeAd {
                creative: Arc::new(creative),
                binder: Arc::new(RecordingSdk::default()),
            },
            None,
        )
        .unwrap();
    let id = coordinator.id();

    coordinator.run_next().unwrap();
    views.clear_content(id, SlotKind::Body);
    views.clear_content(id, SlotKind::Headline);
    assert!(views.snapshot(id).unwrap().slots[&SlotKind::Body].content.is_placeholder());

    coordinator.run_next().unwrap();
    let native = views.snapshot(id).unwrap();
    assert_eq!(native.slots[&SlotKind::Body].content.as_text(), Some("Body copy"));
    assert_eq!(native.slots[&SlotKind::Headline].content.as_text(), Some("Test Ad"));
}

#[test]
fn native_view_discarded_mid_schedule_degrades_per_field() {
    let (registry, views) = setup();
    let mut coordinator = registry
        .create(
            "listTile",
            NativeAd {
                creative: Arc::new(AdCreative::default().with_headline("Test Ad")),
                binder: Arc::new(RecordingSdk::default()),
            },
            None,
        )
        .unwrap();

    coordinator.run_next().unwrap();
    views.discard(coordinator.id());

    // The host tore down the native view without flipping the lifetime
    // flag: rendering fails per field, the checkpoint itself still succeeds.
    let report = coordinator.run_next().unwrap();
    assert!(matches!(
        report.outcome(SlotKind::Headline),
        Some(FieldOutcome::Failed(_))
    ));
    assert_eq!(report.outcome(SlotKind::Body), Some(&FieldOutcome::Absent));
}

#[tokio::test(start_paused = true)]
async fn driven_schedule_tolerates_late_fields() {
    let (registry, views) = setup();
    let creative = ScriptedCreative::default();
    let coordinator = registry
        .create(
            "listTile",
            NativeAd {
                creative: Arc::new(creative.clone()),
                binder: Arc::new(RecordingSdk::default()),
            },
            None,
        )
        .unwrap();
    let id = coordinator.id();

    let (notifier, _lifetime, handle) = schedule::spawn(coordinator, ReconciliationSchedule::default());

    // Let the first checkpoint run against the empty creative.
    tokio::task::yield_now().await;

    creative.set(
        AdCreative::default()
            .with_headline("Test Ad")
            .with_advertiser("Acme"),
    );
    notifier.first_layout_done();

    let report = handle.await.unwrap();
    assert!(report.completed());
    assert_eq!(
        report.checkpoints[0].outcome(SlotKind::Headline),
        Some(&FieldOutcome::Absent)
    );
    assert_eq!(
        report.checkpoints[1].outcome(SlotKind::Headline),
        Some(&FieldOutcome::Applied)
    );
    assert!(report.slots.get(SlotKind::Headline).visible);
    assert!(report.slots.get(SlotKind::Advertiser).visible);
    assert!(!report.slots.get(SlotKind::Body).visible);
    assert_eq!(views.snapshot(id).unwrap().layout_requests, 3);
}
