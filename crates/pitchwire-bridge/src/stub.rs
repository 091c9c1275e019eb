// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridges for desktop/CI builds where native mobile APIs are unavailable.

use pitchwire_core::error::{PitchwireError, Result};
use pitchwire_core::types::ConnectivityState;

use crate::traits::*;

/// No-op bridge returned on non-mobile platforms.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl NativeConnectivity for StubBridge {
    fn active_connectivity(&self) -> Result<Option<ConnectivityState>> {
        tracing::warn!("NativeConnectivity::active_connectivity called on stub bridge");
        Err(PitchwireError::PlatformUnavailable)
    }
}

/// Bridge that reports a fixed connectivity snapshot. Used by the desktop
/// harness to simulate a device.
pub struct FixedBridge {
    state: Option<ConnectivityState>,
}

impl FixedBridge {
    pub fn new(state: Option<ConnectivityState>) -> Self {
        Self { state }
    }
}

impl PlatformBridge for FixedBridge {
    fn platform_name(&self) -> &str {
        "Desktop (simulated)"
    }
}

impl NativeConnectivity for FixedBridge {
    fn active_connectivity(&self) -> Result<Option<ConnectivityState>> {
        Ok(self.state.clone())
    }
}
