// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-ad render coordinator.
//
// Lifecycle: Constructed -> BoundToSdk -> Reconciled(1) -> Reconciled(2)
// -> Reconciled(3). Each checkpoint re-reads the creative and re-applies
// every present field. Visibility is only ever switched on, so a field that
// flickers absent between checkpoints cannot hide a populated slot. A
// reloaded ad gets a new coordinator; there is no reset.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pitchwire_core::error::{PitchwireError, Result};
use pitchwire_core::types::{AdInstanceId, SlotKind};
use tracing::{debug, info, warn};

use crate::creative::{CreativeField, CreativeSource, presence};
use crate::layout::ViewLayout;
use crate::schedule::ViewLifetime;
use crate::slot::{IconImage, SlotContent, SlotSet};
use crate::view::{CreativeBinder, ViewBinding, ViewHandle, ViewSystem};

/// Points at which creative data is re-applied, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Checkpoint {
    /// Immediately after the SDK binding call returns.
    AfterRegistration,
    /// Once the view has completed its first layout pass.
    AfterFirstLayout,
    /// A fixed delay after the first layout pass.
    AfterSettleDelay,
}

impl Checkpoint {
    pub const ORDER: [Checkpoint; 3] = [
        Checkpoint::AfterRegistration,
        Checkpoint::AfterFirstLayout,
        Checkpoint::AfterSettleDelay,
    ];

    /// 1-based position in the schedule.
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::AfterRegistration => 1,
            Self::AfterFirstLayout => 2,
            Self::AfterSettleDelay => 3,
        }
    }

    fn from_ordinal(n: u8) -> Option<Self> {
        Self::ORDER.get(usize::from(n).checked_sub(1)?).copied()
    }
}

impl std::fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::AfterRegistration => "after_registration",
            Self::AfterFirstLayout => "after_first_layout",
            Self::AfterSettleDelay => "after_settle_delay",
        })
    }
}

/// Where an ad view is in its render lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    /// Slots allocated and added to the view, SDK not told yet.
    Constructed,
    /// SDK binding done; no checkpoint has run.
    BoundToSdk,
    /// `n` checkpoints have run.
    Reconciled(u8),
}

/// Result of applying one creative field during a checkpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    /// The field was present and is now shown.
    Applied,
    /// The field was absent; the slot kept its previous state.
    Absent,
    /// Reading, decoding or rendering the field failed. The slot kept its
    /// previous state and the other fields were unaffected.
    Failed(String),
}

/// What happened at one checkpoint.
#[derive(Debug, Clone)]
pub struct CheckpointReport {
    pub checkpoint: Checkpoint,
    pub outcomes: Vec<(SlotKind, FieldOutcome)>,
    pub completed_at: DateTime<Utc>,
}

impl CheckpointReport {
    pub fn outcome(&self, kind: SlotKind) -> Option<&FieldOutcome> {
        self.outcomes.iter().find(|(k, _)| *k == kind).map(|(_, o)| o)
    }

    pub fn applied_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == FieldOutcome::Applied)
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (SlotKind, &str)> {
        self.outcomes.iter().filter_map(|(kind, outcome)| match outcome {
            FieldOutcome::Failed(detail) => Some((*kind, detail.as_str())),
            _ => None,
        })
    }
}

/// Apply every present creative field onto `slots`.
///
/// Present fields overwrite the slot content and make it visible. Absent
/// or failing fields leave the slot exactly as it was. Running this twice
/// with the same creative leaves the slots unchanged the second time.
pub fn apply(creative: &dyn CreativeSource, slots: &mut SlotSet) -> Vec<(SlotKind, FieldOutcome)> {
    SlotKind::ALL
        .iter()
        .map(|&kind| (kind, apply_field(creative, kind, slots)))
        .collect()
}

fn apply_field(creative: &dyn CreativeSource, kind: SlotKind, slots: &mut SlotSet) -> FieldOutcome {
    let field = match creative.field(kind) {
        Ok(Some(field)) => field,
        Ok(None) => return FieldOutcome::Absent,
        Err(e) => {
            warn!(kind = %kind, error = %e, "creative field read failed");
            return FieldOutcome::Failed(e.to_string());
        }
    };

    match content_for(kind, field) {
        Ok(content) => {
            if slots.get_mut(kind).populate(content) {
                debug!(kind = %kind, "slot populated");
            }
            FieldOutcome::Applied
        }
        Err(e) => {
            warn!(kind = %kind, error = %e, "creative field could not be applied");
            FieldOutcome::Failed(e.to_string())
        }
    }
}

fn content_for(kind: SlotKind, field: CreativeField) -> Result<SlotContent> {
    match field {
        CreativeField::Icon(encoded) if kind == SlotKind::Icon => {
            IconImage::decode(&encoded).map(SlotContent::Icon)
        }
        CreativeField::Text(text) if kind.is_text() => Ok(SlotContent::Text(text)),
        _ => Err(PitchwireError::CreativeRead {
            kind,
            detail: "field type does not match the slot".into(),
        }),
    }
}

/// Owns one ad view's slots and drives them through the checkpoints.
pub struct AdRenderCoordinator {
    id: AdInstanceId,
    factory_id: String,
    creative: Arc<dyn CreativeSource>,
    view: Box<dyn ViewHandle>,
    binding: ViewBinding,
    slots: SlotSet,
    state: RenderState,
    lifetime: ViewLifetime,
}

impl AdRenderCoordinator {
    /// Assemble the view, add the five slots in `layout` order and hand the
    /// slot bindings to the SDK.
    ///
    /// Only a broken layout, a view the host could not create, or a
    /// refused SDK binding fail construction. Creative contents never do.
    pub fn build(
        factory_id: &str,
        layout: &ViewLayout,
        creative: Arc<dyn CreativeSource>,
        view_system: &dyn ViewSystem,
        binder: &dyn CreativeBinder,
    ) -> Result<Self> {
        layout.validate()?;

        let id = AdInstanceId::new();
        let view = view_system.create_view(id)?;
        Self::assemble(id, factory_id, layout, creative, view, binder).inspect_err(|e| {
            warn!(instance = %id, error = %e, "ad view construction failed, discarding view");
            view_system.discard_view(id);
        })
    }

    fn assemble(
        id: AdInstanceId,
        factory_id: &str,
        layout: &ViewLayout,
        creative: Arc<dyn CreativeSource>,
        mut view: Box<dyn ViewHandle>,
        binder: &dyn CreativeBinder,
    ) -> Result<Self> {
        let slots = SlotSet::new();

        let mut roles = Vec::with_capacity(SlotKind::ALL.len());
        for (kind, placement) in layout.placements() {
            let handle = view.add_slot(kind, placement)?;
            if let Err(e) = view.render_slot(slots.get(kind)) {
                warn!(instance = %id, kind = %kind, error = %e, "initial slot render failed");
            }
            roles.push((kind, handle));
        }

        let mut coordinator = Self {
            id,
            factory_id: factory_id.to_string(),
            creative,
            view,
            binding: ViewBinding { instance: id, roles },
            slots,
            state: RenderState::Constructed,
            lifetime: ViewLifetime::new(),
        };

        coordinator.log_creative();
        coordinator.bind(binder)?;
        Ok(coordinator)
    }

    fn bind(&mut self, binder: &dyn CreativeBinder) -> Result<()> {
        binder.bind_creative(&self.binding).map_err(|e| match e {
            PitchwireError::SdkBinding(_) => e,
            other => PitchwireError::SdkBinding(other.to_string()),
        })?;
        self.state = RenderState::BoundToSdk;
        info!(instance = %self.id, factory = %self.factory_id, "native ad bound to SDK");
        Ok(())
    }

    fn log_creative(&self) {
        for (kind, present) in presence(self.creative.as_ref()) {
            debug!(instance = %self.id, kind = %kind, present, "creative field");
        }
        let extras = self.creative.extras();
        debug!(
            instance = %self.id,
            star_rating = ?extras.star_rating,
            price = ?extras.price,
            store = ?extras.store,
            "creative extras"
        );
    }

    pub fn id(&self) -> AdInstanceId {
        self.id
    }

    pub fn factory_id(&self) -> &str {
        &self.factory_id
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn slots(&self) -> &SlotSet {
        &self.slots
    }

    pub fn binding(&self) -> &ViewBinding {
        &self.binding
    }

    /// Handle the host uses to mark this view as discarded.
    pub fn lifetime(&self) -> ViewLifetime {
        self.lifetime.clone()
    }

    /// The checkpoint that must run next, or `None` once all have run.
    pub fn next_checkpoint(&self) -> Option<Checkpoint> {
        match self.state {
            RenderState::Constructed => None,
            RenderState::BoundToSdk => Some(Checkpoint::AfterRegistration),
            RenderState::Reconciled(n) => Checkpoint::from_ordinal(n + 1),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.state, RenderState::Reconciled(n) if usize::from(n) >= Checkpoint::ORDER.len())
    }

    /// Run whichever checkpoint is due.
    pub fn run_next(&mut self) -> Result<CheckpointReport> {
        let next = self.next_checkpoint().ok_or(PitchwireError::ScheduleComplete)?;
        self.run_checkpoint(next)
    }

    /// Re-apply the creative at `checkpoint`.
    ///
    /// Checkpoints run strictly in order and at most once each; asking for
    /// any other checkpoint is an error and touches nothing. A discarded
    /// view is never mutated; the view is held alive until this returns.
    pub fn run_checkpoint(&mut self, checkpoint: Checkpoint) -> Result<CheckpointReport> {
        let Some(_live) = self.lifetime.enter() else {
            return Err(PitchwireError::ViewDetached);
        };
        if self.state == RenderState::Constructed {
            return Err(PitchwireError::SdkBinding("view has not been bound to the SDK".into()));
        }
        let expected = self.next_checkpoint().ok_or(PitchwireError::ScheduleComplete)?;
        if checkpoint != expected {
            return Err(PitchwireError::CheckpointOutOfOrder {
                expected: expected.to_string(),
                requested: checkpoint.to_string(),
            });
        }

        debug!(instance = %self.id, %checkpoint, "checkpoint starting");
        let mut outcomes = apply(self.creative.as_ref(), &mut self.slots);

        // Re-render every applied slot, changed or not: the SDK may have
        // cleared the native element since the last checkpoint.
        for (kind, outcome) in outcomes.iter_mut() {
            if *outcome != FieldOutcome::Applied {
                continue;
            }
            if let Err(e) = self.view.render_slot(self.slots.get(*kind)) {
                warn!(instance = %self.id, kind = %kind, error = %e, "slot render failed");
                *outcome = FieldOutcome::Failed(e.to_string());
            }
        }
        self.view.request_layout();
        self.state = RenderState::Reconciled(checkpoint.ordinal());

        let report = CheckpointReport {
            checkpoint,
            outcomes,
            completed_at: Utc::now(),
        };
        info!(
            instance = %self.id,
            %checkpoint,
            applied = report.applied_count(),
            visible = self.slots.visible_count(),
            "checkpoint complete"
        );
        Ok(report)
    }
}
