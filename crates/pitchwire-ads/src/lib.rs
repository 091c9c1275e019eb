// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pitchwire Ads: builds the native ad view for the "listTile" factory and
// keeps its slots in step with creative data the ad SDK delivers on its own
// schedule. The SDK may fill or clear the view at any time, so content is
// re-applied at three ordered checkpoints: right after SDK registration,
// after the first layout pass, and after a short settle delay.

pub mod coordinator;
pub mod creative;
pub mod factory;
pub mod layout;
pub mod memory;
pub mod schedule;
pub mod slot;
pub mod view;

pub use coordinator::{AdRenderCoordinator, Checkpoint, CheckpointReport, FieldOutcome, RenderState, apply};
pub use creative::{AdCreative, CreativeField, CreativeSource};
pub use factory::{AdFactoryRegistry, ListTileAdFactory, NativeAd, NativeAdFactory};
pub use layout::ViewLayout;
pub use memory::MemoryViewSystem;
pub use schedule::{ReconciliationReport, ReconciliationSchedule, ViewLifetime};
pub use slot::{DisplaySlot, IconImage, SlotContent, SlotSet};
pub use view::{CreativeBinder, SlotHandleId, ViewBinding, ViewHandle, ViewSystem};
