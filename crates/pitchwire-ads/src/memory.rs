// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory view system for desktop/CI builds.
//
// Records what each ad view would display so the desktop host and tests can
// inspect it. Also lets a caller imitate the ad SDK wiping native content
// between checkpoints.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use pitchwire_core::error::{PitchwireError, Result};
use pitchwire_core::types::{AdInstanceId, SlotKind};

use crate::layout::Placement;
use crate::slot::{DisplaySlot, SlotContent};
use crate::view::{SlotHandleId, ViewHandle, ViewSystem};

/// What one native element currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSlot {
    pub handle: SlotHandleId,
    pub placement: Placement,
    pub content: SlotContent,
    pub visible: bool,
}

/// Native-side state of one assembled view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryView {
    pub slots: BTreeMap<SlotKind, RenderedSlot>,
    pub layout_requests: u32,
}

type Views = HashMap<AdInstanceId, MemoryView>;

/// Shared, cloneable in-memory view system.
#[derive(Clone, Default)]
pub struct MemoryViewSystem {
    views: Arc<Mutex<Views>>,
}

impl MemoryViewSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the native state of `instance`, if it was created here.
    pub fn snapshot(&self, instance: AdInstanceId) -> Option<MemoryView> {
        lock(&self.views).ok()?.get(&instance).cloned()
    }

    /// Reset one element to an empty placeholder, as the SDK sometimes does
    /// behind our back. Visibility is left alone.
    pub fn clear_content(&self, instance: AdInstanceId, kind: SlotKind) {
        let Ok(mut views) = lock(&self.views) else {
            return;
        };
        if let Some(slot) = views.get_mut(&instance).and_then(|v| v.slots.get_mut(&kind)) {
            slot.content = SlotContent::Placeholder;
        }
    }

    /// Drop the native view. Further renders through its handle fail with
    /// `ViewDetached`.
    pub fn discard(&self, instance: AdInstanceId) -> bool {
        lock(&self.views)
            .map(|mut v| v.remove(&instance).is_some())
            .unwrap_or(false)
    }

    pub fn view_count(&self) -> usize {
        lock(&self.views).map(|v| v.len()).unwrap_or(0)
    }
}

impl ViewSystem for MemoryViewSystem {
    fn create_view(&self, instance: AdInstanceId) -> Result<Box<dyn ViewHandle>> {
        lock(&self.views)?.insert(instance, MemoryView::default());
        Ok(Box::new(MemoryViewHandle {
            instance,
            views: Arc::clone(&self.views),
            next_handle: 1,
        }))
    }

    fn discard_view(&self, instance: AdInstanceId) {
        self.discard(instance);
    }
}

struct MemoryViewHandle {
    instance: AdInstanceId,
    views: Arc<Mutex<Views>>,
    next_handle: u64,
}

impl MemoryViewHandle {
    fn with_view<T>(&self, f: impl FnOnce(&mut MemoryView) -> Result<T>) -> Result<T> {
        let mut views = lock(&self.views)?;
        let view = views
            .get_mut(&self.instance)
            .ok_or(PitchwireError::ViewDetached)?;
        f(view)
    }
}

impl ViewHandle for MemoryViewHandle {
    fn add_slot(&mut self, kind: SlotKind, placement: Placement) -> Result<SlotHandleId> {
        let handle = SlotHandleId(self.next_handle);
        self.with_view(|view| {
            view.slots.insert(
                kind,
                RenderedSlot {
                    handle,
                    placement,
                    content: SlotContent::Placeholder,
                    visible: false,
                },
            );
            Ok(())
        })?;
        self.next_handle += 1;
        Ok(handle)
    }

    fn render_slot(&mut self, slot: &DisplaySlot) -> Result<()> {
        self.with_view(|view| {
            let rendered = view.slots.get_mut(&slot.kind).ok_or_else(|| {
                PitchwireError::SlotRender {
                    kind: slot.kind,
                    detail: "slot was never added to the view".into(),
                }
            })?;
            rendered.content = slot.content.clone();
            rendered.visible = slot.visible;
            Ok(())
        })
    }

    fn request_layout(&mut self) {
        if let Err(e) = self.with_view(|view| {
            view.layout_requests += 1;
            Ok(())
        }) {
            tracing::debug!(instance = %self.instance, error = %e, "layout request dropped");
        }
    }
}

fn lock(views: &Mutex<Views>) -> Result<MutexGuard<'_, Views>> {
    views
        .lock()
        .map_err(|_| PitchwireError::Bridge("view registry lock poisoned".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Edge;

    #[test]
    fn records_slots_and_renders() {
        let system = MemoryViewSystem::new();
        let id = AdInstanceId::new();
        let mut view = system.create_view(id).unwrap();

        let icon = view.add_slot(SlotKind::Icon, Placement::Beside(Edge::Leading)).unwrap();
        let headline = view.add_slot(SlotKind::Headline, Placement::Stacked(0)).unwrap();
        assert_ne!(icon, headline);

        let mut slot = DisplaySlot::new(SlotKind::Headline);
        slot.populate(SlotContent::Text("Hello".into()));
        view.render_slot(&slot).unwrap();
        view.request_layout();

        let snap = system.snapshot(id).unwrap();
        let rendered = &snap.slots[&SlotKind::Headline];
        assert!(rendered.visible);
        assert_eq!(rendered.content.as_text(), Some("Hello"));
        assert_eq!(snap.layout_requests, 1);
    }

    #[test]
    fn rendering_unknown_slot_fails() {
        let system = MemoryViewSystem::new();
        let mut view = system.create_view(AdInstanceId::new()).unwrap();
        let err = view.render_slot(&DisplaySlot::new(SlotKind::Body)).unwrap_err();
        assert!(matches!(err, PitchwireError::SlotRender { kind: SlotKind::Body, .. }));
    }

    #[test]
    fn clear_content_keeps_visibility() {
        let system = MemoryViewSystem::new();
        let id = AdInstanceId::new();
        let mut view = system.create_view(id).unwrap();
        view.add_slot(SlotKind::Body, Placement::Stacked(1)).unwrap();
        let mut slot = DisplaySlot::new(SlotKind::Body);
        slot.populate(SlotContent::Text("Body".into()));
        view.render_slot(&slot).unwrap();

        system.clear_content(id, SlotKind::Body);
        let rendered = &system.snapshot(id).unwrap().slots[&SlotKind::Body];
        assert!(rendered.content.is_placeholder());
        assert!(rendered.visible);
    }

    #[test]
    fn discard_view_detaches_handle() {
        let system = MemoryViewSystem::new();
        let id = AdInstanceId::new();
        let mut view = system.create_view(id).unwrap();
        assert_eq!(system.view_count(), 1);

        system.discard_view(id);
        system.discard_view(AdInstanceId::new());
        assert_eq!(system.view_count(), 0);
        assert!(matches!(
            view.add_slot(SlotKind::Icon, Placement::Beside(Edge::Leading)),
            Err(PitchwireError::ViewDetached)
        ));
    }
}
