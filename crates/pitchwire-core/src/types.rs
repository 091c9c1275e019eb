// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types shared by the network classifier, the ad renderer and
// the platform bridge.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one native ad view instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdInstanceId(pub Uuid);

impl AdInstanceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AdInstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AdInstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cellular generation of the active network, as reported to the app layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkClass {
    #[serde(rename = "2G")]
    TwoG,
    #[serde(rename = "3G")]
    ThreeG,
    #[serde(rename = "4G")]
    FourG,
    #[serde(rename = "5G")]
    FiveG,
    /// No active connection, or a subtype we do not recognise.
    #[serde(rename = "Mobile")]
    Unknown,
}

impl NetworkClass {
    /// Label the Dart side expects over the method channel.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TwoG => "2G",
            Self::ThreeG => "3G",
            Self::FourG => "4G",
            Self::FiveG => "5G",
            Self::Unknown => FALLBACK_LABEL,
        }
    }

    /// Parse a channel label back into a class. Unrecognised labels are `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "2G" => Some(Self::TwoG),
            "3G" => Some(Self::ThreeG),
            "4G" => Some(Self::FourG),
            "5G" => Some(Self::FiveG),
            FALLBACK_LABEL => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl std::fmt::Display for NetworkClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Label returned when there is no active or recognised cellular connection.
pub const FALLBACK_LABEL: &str = "Mobile";

/// Snapshot of the platform's active network, read on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectivityState {
    pub is_connected: bool,
    /// Platform telephony subtype code. Unbounded; unknown values are legal.
    pub subtype_code: i32,
    /// Platform-supplied subtype name, when the platform reports one.
    #[serde(default)]
    pub subtype_name: Option<String>,
}

impl ConnectivityState {
    pub fn connected(subtype_code: i32) -> Self {
        Self {
            is_connected: true,
            subtype_code,
            subtype_name: None,
        }
    }

    pub fn disconnected() -> Self {
        Self {
            is_connected: false,
            subtype_code: 0,
            subtype_name: None,
        }
    }
}

/// The five display roles of a native ad view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Icon,
    Headline,
    Body,
    CallToAction,
    Advertiser,
}

impl SlotKind {
    /// Every slot kind, in slot-set order.
    pub const ALL: [SlotKind; 5] = [
        SlotKind::Icon,
        SlotKind::Headline,
        SlotKind::Body,
        SlotKind::CallToAction,
        SlotKind::Advertiser,
    ];

    /// Position of this kind inside a slot set.
    pub fn index(&self) -> usize {
        match self {
            Self::Icon => 0,
            Self::Headline => 1,
            Self::Body => 2,
            Self::CallToAction => 3,
            Self::Advertiser => 4,
        }
    }

    /// Role name as registered with the ad SDK and the host view system.
    pub fn role(&self) -> &'static str {
        match self {
            Self::Icon => "icon",
            Self::Headline => "headline",
            Self::Body => "body",
            Self::CallToAction => "call_to_action",
            Self::Advertiser => "advertiser",
        }
    }

    /// Whether this slot carries text (everything except the icon).
    pub fn is_text(&self) -> bool {
        !matches!(self, Self::Icon)
    }
}

impl std::fmt::Display for SlotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.role())
    }
}
