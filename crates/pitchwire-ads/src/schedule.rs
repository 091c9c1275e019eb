// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Async driver for the reconciliation checkpoints.
//
// Each stage is started only after the previous one has signalled: the
// first checkpoint runs as soon as the driver is polled, the second waits
// for the host's first-layout notification, the third sleeps the settle
// delay after that. The layout wait has no deadline; only a discarded view
// or a dropped notifier ends the drive early. The coordinator is moved into
// the driver, so only one checkpoint can ever be in flight.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use pitchwire_core::config::ReconciliationConfig;
use pitchwire_core::error::PitchwireError;
use pitchwire_core::types::AdInstanceId;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::coordinator::{AdRenderCoordinator, Checkpoint, CheckpointReport, RenderState};
use crate::slot::SlotSet;

/// Shared "still alive" flag for one ad view.
///
/// The host calls [`ViewLifetime::discard`] when it drops the view. A
/// checkpoint holds the flag for its whole run, so `discard` blocks until
/// any running checkpoint has finished and no slot is touched afterwards.
/// `discard` must not be called from inside a [`ViewHandle`] callback.
///
/// [`ViewHandle`]: crate::view::ViewHandle
#[derive(Debug, Clone)]
pub struct ViewLifetime {
    alive: Arc<Mutex<bool>>,
}

/// Proof that the view stays alive until this guard is dropped.
#[derive(Debug)]
pub struct LiveView<'a> {
    _guard: MutexGuard<'a, bool>,
}

impl Default for ViewLifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewLifetime {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(Mutex::new(true)),
        }
    }

    pub fn discard(&self) {
        *self.lock() = false;
    }

    pub fn is_alive(&self) -> bool {
        *self.lock()
    }

    /// Pin the view alive for the duration of the returned guard, or `None`
    /// if it has already been discarded.
    pub fn enter(&self) -> Option<LiveView<'_>> {
        let guard = self.lock();
        if *guard {
            Some(LiveView { _guard: guard })
        } else {
            None
        }
    }

    fn lock(&self) -> MutexGuard<'_, bool> {
        self.alive.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Timing of the checkpoints after the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconciliationSchedule {
    pub settle_delay: Duration,
}

impl Default for ReconciliationSchedule {
    fn default() -> Self {
        Self::from_config(&ReconciliationConfig::default())
    }
}

impl ReconciliationSchedule {
    pub fn from_config(config: &ReconciliationConfig) -> Self {
        Self {
            settle_delay: Duration::from_millis(config.settle_delay_ms),
        }
    }
}

/// Host side of the first-layout signal.
#[derive(Debug)]
pub struct LayoutNotifier(oneshot::Sender<()>);

impl LayoutNotifier {
    /// Report that the view has finished its first layout pass.
    pub fn first_layout_done(self) {
        // The driver may already have stopped; nothing to do then.
        let _ = self.0.send(());
    }
}

/// Driver side of the first-layout signal.
#[derive(Debug)]
pub struct LayoutSignal(oneshot::Receiver<()>);

pub fn layout_signal() -> (LayoutNotifier, LayoutSignal) {
    let (tx, rx) = oneshot::channel();
    (LayoutNotifier(tx), LayoutSignal(rx))
}

/// Why a drive ended before the last checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The host discarded the view.
    Detached,
    /// The host dropped the layout notifier without signalling.
    LayoutAbandoned,
}

/// Outcome of driving one ad view through the schedule.
#[derive(Debug, Clone)]
pub struct ReconciliationReport {
    pub instance: AdInstanceId,
    pub checkpoints: Vec<CheckpointReport>,
    pub final_state: RenderState,
    pub stopped: Option<StopReason>,
    pub slots: SlotSet,
}

impl ReconciliationReport {
    pub fn completed(&self) -> bool {
        self.stopped.is_none() && self.final_state == RenderState::Reconciled(3)
    }
}

/// Run all checkpoints for `coordinator` in order.
pub async fn drive(
    mut coordinator: AdRenderCoordinator,
    layout: LayoutSignal,
    schedule: ReconciliationSchedule,
) -> ReconciliationReport {
    let mut checkpoints = Vec::with_capacity(Checkpoint::ORDER.len());
    let stopped = drive_stages(&mut coordinator, layout, schedule, &mut checkpoints).await;

    match stopped {
        None => info!(instance = %coordinator.id(), "reconciliation complete"),
        Some(reason) => warn!(instance = %coordinator.id(), ?reason, "reconciliation stopped early"),
    }

    ReconciliationReport {
        instance: coordinator.id(),
        checkpoints,
        final_state: coordinator.state(),
        stopped,
        slots: coordinator.slots().clone(),
    }
}

async fn drive_stages(
    coordinator: &mut AdRenderCoordinator,
    layout: LayoutSignal,
    schedule: ReconciliationSchedule,
    checkpoints: &mut Vec<CheckpointReport>,
) -> Option<StopReason> {
    if let Err(reason) = run(coordinator, Checkpoint::AfterRegistration, checkpoints) {
        return Some(reason);
    }

    if layout.0.await.is_err() {
        return Some(StopReason::LayoutAbandoned);
    }
    debug!(instance = %coordinator.id(), "first layout pass done");
    if let Err(reason) = run(coordinator, Checkpoint::AfterFirstLayout, checkpoints) {
        return Some(reason);
    }

    tokio::time::sleep(schedule.settle_delay).await;
    if let Err(reason) = run(coordinator, Checkpoint::AfterSettleDelay, checkpoints) {
        return Some(reason);
    }
    None
}

fn run(
    coordinator: &mut AdRenderCoordinator,
    checkpoint: Checkpoint,
    checkpoints: &mut Vec<CheckpointReport>,
) -> Result<(), StopReason> {
    match coordinator.run_checkpoint(checkpoint) {
        Ok(report) => {
            checkpoints.push(report);
            Ok(())
        }
        Err(PitchwireError::ViewDetached) => Err(StopReason::Detached),
        Err(e) => {
            // Only reachable if someone ran checkpoints by hand before
            // handing the coordinator over; skip ahead rather than fail.
            warn!(instance = %coordinator.id(), %checkpoint, error = %e, "checkpoint skipped");
            Ok(())
        }
    }
}

/// Spawn [`drive`] on the current tokio runtime.
///
/// Expects a current-thread runtime driven from the host's UI thread.
/// Returns the notifier the host fires after the first layout pass, the
/// view's lifetime handle and the join handle for the final report.
pub fn spawn(
    coordinator: AdRenderCoordinator,
    schedule: ReconciliationSchedule,
) -> (LayoutNotifier, ViewLifetime, JoinHandle<ReconciliationReport>) {
    let (notifier, signal) = layout_signal();
    let lifetime = coordinator.lifetime();
    let handle = tokio::spawn(drive(coordinator, signal, schedule));
    (notifier, lifetime, handle)
}
