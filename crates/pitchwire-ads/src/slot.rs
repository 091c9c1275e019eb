// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Display slots: one per creative role, owned by a single ad view.

use std::sync::Arc;

use pitchwire_core::error::{PitchwireError, Result};
use pitchwire_core::types::SlotKind;

/// Decoded icon, ready for the host view system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    pub width: u32,
    pub height: u32,
    /// RGBA8, row-major.
    pub pixels: Arc<[u8]>,
}

impl IconImage {
    /// Decode an encoded image (any format the `image` crate recognises).
    pub fn decode(encoded: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(encoded)
            .map_err(|e| PitchwireError::IconDecode(e.to_string()))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(PitchwireError::IconDecode("icon has zero area".into()));
        }
        Ok(Self {
            width,
            height,
            pixels: Arc::from(rgba.into_raw()),
        })
    }
}

/// What a slot currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SlotContent {
    /// Construction-time default; nothing from the creative yet.
    #[default]
    Placeholder,
    Text(String),
    Icon(IconImage),
}

impl SlotContent {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// One display element of the ad view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySlot {
    pub kind: SlotKind,
    pub content: SlotContent,
    pub visible: bool,
}

impl DisplaySlot {
    pub fn new(kind: SlotKind) -> Self {
        Self {
            kind,
            content: SlotContent::Placeholder,
            visible: false,
        }
    }

    /// Show `content`. Returns whether anything changed.
    ///
    /// Visibility only ever turns on here; there is deliberately no way
    /// to hide a slot once it has shown creative data.
    pub fn populate(&mut self, content: SlotContent) -> bool {
        let changed = self.content != content || !self.visible;
        self.content = content;
        self.visible = true;
        changed
    }
}

/// The five slots of one ad view, indexed by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSet {
    slots: [DisplaySlot; 5],
}

impl Default for SlotSet {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotSet {
    pub fn new() -> Self {
        Self {
            slots: SlotKind::ALL.map(DisplaySlot::new),
        }
    }

    pub fn get(&self, kind: SlotKind) -> &DisplaySlot {
        &self.slots[kind.index()]
    }

    pub fn get_mut(&mut self, kind: SlotKind) -> &mut DisplaySlot {
        &mut self.slots[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &DisplaySlot> {
        self.slots.iter()
    }

    pub fn visible_count(&self) -> usize {
        self.slots.iter().filter(|s| s.visible).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 10, 10, 255]));
        let mut buf = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn new_set_is_hidden_placeholders() {
        let slots = SlotSet::new();
        assert_eq!(slots.visible_count(), 0);
        for kind in SlotKind::ALL {
            let slot = slots.get(kind);
            assert_eq!(slot.kind, kind);
            assert!(slot.content.is_placeholder());
        }
    }

    #[test]
    fn populate_reports_change_once() {
        let mut slot = DisplaySlot::new(SlotKind::Headline);
        assert!(slot.populate(SlotContent::Text("Test Ad".into())));
        assert!(!slot.populate(SlotContent::Text("Test Ad".into())));
        assert!(slot.visible);
        assert_eq!(slot.content.as_text(), Some("Test Ad"));
    }

    #[test]
    fn decode_png_icon() {
        let icon = IconImage::decode(&encoded_png(3, 2)).unwrap();
        assert_eq!((icon.width, icon.height), (3, 2));
        assert_eq!(icon.pixels.len(), 3 * 2 * 4);
    }

    #[test]
    fn garbage_icon_fails_to_decode() {
        let err = IconImage::decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, PitchwireError::IconDecode(_)));
    }
}
