// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Telephony subtype codes (android.telephony.TelephonyManager.NETWORK_TYPE_*)
// and the generation table built from them.

use pitchwire_core::types::NetworkClass;

pub const NETWORK_TYPE_GPRS: i32 = 1;
pub const NETWORK_TYPE_EDGE: i32 = 2;
pub const NETWORK_TYPE_UMTS: i32 = 3;
pub const NETWORK_TYPE_CDMA: i32 = 4;
pub const NETWORK_TYPE_EVDO_0: i32 = 5;
pub const NETWORK_TYPE_EVDO_A: i32 = 6;
pub const NETWORK_TYPE_1XRTT: i32 = 7;
pub const NETWORK_TYPE_HSDPA: i32 = 8;
pub const NETWORK_TYPE_HSUPA: i32 = 9;
pub const NETWORK_TYPE_HSPA: i32 = 10;
pub const NETWORK_TYPE_IDEN: i32 = 11;
pub const NETWORK_TYPE_EVDO_B: i32 = 12;
pub const NETWORK_TYPE_LTE: i32 = 13;
pub const NETWORK_TYPE_EHRPD: i32 = 14;
pub const NETWORK_TYPE_HSPAP: i32 = 15;

/// 5G standalone. Hard-coded: the deprecated `NetworkInfo` API never exposed
/// it as a constant, and the value has not been stable across releases.
pub const NETWORK_TYPE_NR: i32 = 20;

pub const TWO_G_CODES: [i32; 5] = [
    NETWORK_TYPE_GPRS,
    NETWORK_TYPE_EDGE,
    NETWORK_TYPE_CDMA,
    NETWORK_TYPE_1XRTT,
    NETWORK_TYPE_IDEN,
];

pub const THREE_G_CODES: [i32; 9] = [
    NETWORK_TYPE_UMTS,
    NETWORK_TYPE_EVDO_0,
    NETWORK_TYPE_EVDO_A,
    NETWORK_TYPE_HSDPA,
    NETWORK_TYPE_HSUPA,
    NETWORK_TYPE_HSPA,
    NETWORK_TYPE_EVDO_B,
    NETWORK_TYPE_EHRPD,
    NETWORK_TYPE_HSPAP,
];

/// Lookup from subtype code to generation.
///
/// The 2G/3G/4G partitions are fixed; only the NR literal can be swapped,
/// since that is the one code the platform does not pin down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubtypeTable {
    nr_code: i32,
}

impl Default for SubtypeTable {
    fn default() -> Self {
        Self {
            nr_code: NETWORK_TYPE_NR,
        }
    }
}

impl SubtypeTable {
    /// Table whose 5G entry is `nr_code` instead of the default.
    ///
    /// A code that collides with a 2G/3G/4G entry keeps its older meaning.
    pub fn with_nr_code(nr_code: i32) -> Self {
        Self { nr_code }
    }

    pub fn nr_code(&self) -> i32 {
        self.nr_code
    }

    /// Generation for `code`, or `None` when the code is not in any set.
    pub fn lookup(&self, code: i32) -> Option<NetworkClass> {
        if TWO_G_CODES.contains(&code) {
            Some(NetworkClass::TwoG)
        } else if THREE_G_CODES.contains(&code) {
            Some(NetworkClass::ThreeG)
        } else if code == NETWORK_TYPE_LTE {
            Some(NetworkClass::FourG)
        } else if code == self.nr_code {
            Some(NetworkClass::FiveG)
        } else {
            None
        }
    }
}

/// Telephony name of a subtype code, for log output.
pub fn subtype_name(code: i32) -> Option<&'static str> {
    let name = match code {
        NETWORK_TYPE_GPRS => "GPRS",
        NETWORK_TYPE_EDGE => "EDGE",
        NETWORK_TYPE_UMTS => "UMTS",
        NETWORK_TYPE_CDMA => "CDMA",
        NETWORK_TYPE_EVDO_0 => "EVDO_0",
        NETWORK_TYPE_EVDO_A => "EVDO_A",
        NETWORK_TYPE_1XRTT => "1xRTT",
        NETWORK_TYPE_HSDPA => "HSDPA",
        NETWORK_TYPE_HSUPA => "HSUPA",
        NETWORK_TYPE_HSPA => "HSPA",
        NETWORK_TYPE_IDEN => "iDEN",
        NETWORK_TYPE_EVDO_B => "EVDO_B",
        NETWORK_TYPE_LTE => "LTE",
        NETWORK_TYPE_EHRPD => "eHRPD",
        NETWORK_TYPE_HSPAP => "HSPA+",
        NETWORK_TYPE_NR => "NR",
        _ => return None,
    };
    Some(name)
}
