// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Connectivity snapshot -> cellular generation.
//
// Total over every input: disconnected or unrecognised states map to
// `NetworkClass::Unknown`, which the channel reports as "Mobile". The
// classifier never fails; read failures are the caller's to fold into the
// fallback before a state ever reaches here.

use pitchwire_core::types::{ConnectivityState, NetworkClass};
use tracing::debug;

use crate::subtype::{SubtypeTable, subtype_name};

/// Classify with the default subtype table.
pub fn classify(state: &ConnectivityState) -> NetworkClass {
    Classifier::default().classify(state)
}

/// Classifier bound to a particular subtype table.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    table: SubtypeTable,
}

impl Classifier {
    pub fn new(table: SubtypeTable) -> Self {
        Self { table }
    }

    /// Classifier whose 5G entry is `nr_code`.
    pub fn with_nr_code(nr_code: i32) -> Self {
        Self::new(SubtypeTable::with_nr_code(nr_code))
    }

    pub fn table(&self) -> &SubtypeTable {
        &self.table
    }

    pub fn classify(&self, state: &ConnectivityState) -> NetworkClass {
        if !state.is_connected {
            debug!("no active network connection");
            return NetworkClass::Unknown;
        }

        let code = state.subtype_code;
        let name = state
            .subtype_name
            .as_deref()
            .or_else(|| subtype_name(code))
            .unwrap_or("?");

        match self.table.lookup(code) {
            Some(class) => {
                debug!(subtype = code, name, class = %class, "classified network");
                class
            }
            None => {
                debug!(subtype = code, name, "unknown subtype, using fallback");
                NetworkClass::Unknown
            }
        }
    }
}
