// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Seams to the host view system and the ad SDK.
//
// The coordinator never touches native widgets directly. It owns the slot
// state and pushes it through a `ViewHandle`; the host decides how a slot
// becomes a label, button or image view.

use pitchwire_core::error::Result;
use pitchwire_core::types::{AdInstanceId, SlotKind};

use crate::layout::Placement;
use crate::slot::DisplaySlot;

/// Host-side handle to one native element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotHandleId(pub u64);

/// The assembled composite view on the host side.
pub trait ViewHandle: Send {
    /// Add a native element for `kind` at `placement`.
    fn add_slot(&mut self, kind: SlotKind, placement: Placement) -> Result<SlotHandleId>;

    /// Push the slot's current content and visibility to its native element.
    fn render_slot(&mut self, slot: &DisplaySlot) -> Result<()>;

    /// Ask for a layout pass. Redundant calls are harmless.
    fn request_layout(&mut self);
}

/// Creates one composite view per ad instance.
pub trait ViewSystem: Send + Sync {
    fn create_view(&self, instance: AdInstanceId) -> Result<Box<dyn ViewHandle>>;

    /// Tear down a view whose construction did not complete. Unknown
    /// instances are ignored.
    fn discard_view(&self, instance: AdInstanceId);
}

/// Which native element plays which creative role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewBinding {
    pub instance: AdInstanceId,
    pub roles: Vec<(SlotKind, SlotHandleId)>,
}

impl ViewBinding {
    pub fn handle_for(&self, kind: SlotKind) -> Option<SlotHandleId> {
        self.roles.iter().find(|(k, _)| *k == kind).map(|(_, h)| *h)
    }
}

/// The ad SDK's "bind creative to view" entry point.
///
/// After this call the SDK runs its own population pass, which races the
/// coordinator's checkpoints.
pub trait CreativeBinder: Send + Sync {
    fn bind_creative(&self, binding: &ViewBinding) -> Result<()>;
}
