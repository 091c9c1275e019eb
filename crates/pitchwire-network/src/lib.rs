// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pitchwire Network: maps the platform's raw telephony subtype code onto the
// cellular generation label reported to the app layer.

pub mod classifier;
pub mod subtype;

pub use classifier::{Classifier, classify};
pub use subtype::SubtypeTable;
