// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Visual arrangement of the ad view's slots.

use pitchwire_core::error::{PitchwireError, Result};
use pitchwire_core::types::SlotKind;
use serde::{Deserialize, Serialize};

/// Edge of the view the icon sits against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Leading,
    Trailing,
}

/// Where a single slot goes inside the assembled view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Beside the text stack, against an edge.
    Beside(Edge),
    /// Row `n` (0-based, top first) of the text stack.
    Stacked(usize),
}

/// Icon at one edge, the text roles stacked in the remaining space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewLayout {
    pub icon_edge: Edge,
    pub text_stack: Vec<SlotKind>,
}

impl ViewLayout {
    /// The "listTile" arrangement: icon leading, headline / body /
    /// call-to-action / advertiser stacked to its right.
    pub fn list_tile() -> Self {
        Self {
            icon_edge: Edge::Leading,
            text_stack: vec![
                SlotKind::Headline,
                SlotKind::Body,
                SlotKind::CallToAction,
                SlotKind::Advertiser,
            ],
        }
    }

    /// Check that all five roles appear exactly once and the icon is not
    /// part of the text stack.
    pub fn validate(&self) -> Result<()> {
        if self.text_stack.contains(&SlotKind::Icon) {
            return Err(PitchwireError::InvalidLayout(
                "icon must sit beside the text stack, not in it".into(),
            ));
        }
        for kind in SlotKind::ALL.iter().filter(|k| k.is_text()) {
            let count = self.text_stack.iter().filter(|k| *k == kind).count();
            if count != 1 {
                return Err(PitchwireError::InvalidLayout(format!(
                    "text role {kind} appears {count} times"
                )));
            }
        }
        Ok(())
    }

    /// Slots in the order they are added to the container: icon first,
    /// then the stack top to bottom.
    pub fn placements(&self) -> Vec<(SlotKind, Placement)> {
        let mut placements = vec![(SlotKind::Icon, Placement::Beside(self.icon_edge))];
        placements.extend(
            self.text_stack
                .iter()
                .enumerate()
                .map(|(row, &kind)| (kind, Placement::Stacked(row))),
        );
        placements
    }
}

impl Default for ViewLayout {
    fn default() -> Self {
        Self::list_tile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_tile_is_valid() {
        let layout = ViewLayout::list_tile();
        layout.validate().unwrap();
        let placements = layout.placements();
        assert_eq!(placements.len(), 5);
        assert_eq!(placements[0], (SlotKind::Icon, Placement::Beside(Edge::Leading)));
        assert_eq!(placements[1], (SlotKind::Headline, Placement::Stacked(0)));
        assert_eq!(placements[4], (SlotKind::Advertiser, Placement::Stacked(3)));
    }

    #[test]
    fn icon_in_stack_rejected() {
        let layout = ViewLayout {
            icon_edge: Edge::Trailing,
            text_stack: vec![
                SlotKind::Icon,
                SlotKind::Headline,
                SlotKind::Body,
                SlotKind::CallToAction,
                SlotKind::Advertiser,
            ],
        };
        assert!(matches!(layout.validate(), Err(PitchwireError::InvalidLayout(_))));
    }

    #[test]
    fn missing_role_rejected() {
        let layout = ViewLayout {
            icon_edge: Edge::Leading,
            text_stack: vec![SlotKind::Headline, SlotKind::Headline, SlotKind::Body],
        };
        assert!(layout.validate().is_err());
    }
}
