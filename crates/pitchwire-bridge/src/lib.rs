// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Pitchwire: native platform bridge abstractions.
//!
//! Defines the traits the glue layer needs from the host OS, the platform
//! implementations behind them, and the method channel the app layer talks
//! to.

pub mod channel;
pub mod traits;

#[cfg(target_os = "android")]
pub mod android;

pub mod stub;

use std::sync::Arc;

/// Bridge implementation for the target operating system.
pub fn platform_bridge() -> Arc<dyn traits::PlatformBridge> {
    #[cfg(target_os = "android")]
    {
        // Android: `jni-rs` calls into ConnectivityManager.
        Arc::new(android::AndroidBridge::new())
    }
    #[cfg(not(target_os = "android"))]
    {
        // Desktop/CI/iOS: no telephony subtype source.
        Arc::new(stub::StubBridge)
    }
}
