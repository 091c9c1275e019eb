// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Pitchwire.

use thiserror::Error;

use crate::types::SlotKind;

/// Top-level error type for all Pitchwire operations.
#[derive(Debug, Error)]
pub enum PitchwireError {
    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    #[error("connectivity state could not be read: {0}")]
    ConnectivityRead(String),

    // -- Ad creative / rendering --
    #[error("reading creative field {kind} failed: {detail}")]
    CreativeRead { kind: SlotKind, detail: String },

    #[error("icon could not be decoded: {0}")]
    IconDecode(String),

    #[error("rendering slot {kind} failed: {detail}")]
    SlotRender { kind: SlotKind, detail: String },

    #[error("ad SDK refused the view binding: {0}")]
    SdkBinding(String),

    #[error("invalid ad view layout: {0}")]
    InvalidLayout(String),

    // -- Reconciliation protocol --
    #[error("checkpoint out of order: expected {expected}, requested {requested}")]
    CheckpointOutOfOrder { expected: String, requested: String },

    #[error("reconciliation schedule already complete")]
    ScheduleComplete,

    #[error("ad view was discarded by the host")]
    ViewDetached,

    // -- Factory registry --
    #[error("no native ad factory registered under `{0}`")]
    UnknownFactory(String),

    #[error("a native ad factory is already registered under `{0}`")]
    DuplicateFactory(String),

    // -- Configuration / persistence --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PitchwireError>;
