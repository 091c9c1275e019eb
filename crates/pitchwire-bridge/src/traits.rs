// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.

use pitchwire_core::error::Result;
use pitchwire_core::types::ConnectivityState;

/// Unified bridge that groups all native capabilities.
pub trait PlatformBridge: NativeConnectivity + Send + Sync {
    /// Human-readable platform name (e.g. "Android", "Desktop (stub)").
    fn platform_name(&self) -> &str;
}

/// Active network information.
pub trait NativeConnectivity {
    /// Snapshot of the active network.
    ///
    /// `Ok(None)` means there is no active network at all. `Err` means the
    /// platform service could not be read (permission denied, service
    /// missing); callers fold both into the fallback classification.
    fn active_connectivity(&self) -> Result<Option<ConnectivityState>>;
}
