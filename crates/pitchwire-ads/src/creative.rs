// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Read-only access to the creative fields the ad SDK exposes once an ad has
// loaded. Every field is independently optional, and reading one may fail
// without affecting the others.

use pitchwire_core::error::Result;
use pitchwire_core::types::SlotKind;
use serde::{Deserialize, Serialize};

/// One creative field value as supplied by the SDK.
#[derive(Debug, Clone, PartialEq)]
pub enum CreativeField {
    /// Headline, body, call-to-action or advertiser text.
    Text(String),
    /// Encoded icon image (PNG, JPEG, ...). Decoded when applied to a slot.
    Icon(Vec<u8>),
}

/// Extra creative metadata the SDK may expose. Logged, never rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreativeExtras {
    pub star_rating: Option<f64>,
    pub price: Option<String>,
    pub store: Option<String>,
}

/// SDK-owned view of one ad's creative data.
///
/// Implementations are read on every reconciliation checkpoint and may
/// return different values each time; the SDK fills fields in lazily.
pub trait CreativeSource: Send + Sync {
    /// Current value of the field backing `kind`.
    ///
    /// `Ok(None)` means the field is absent right now. `Err` means the
    /// read itself failed; only that field is affected.
    fn field(&self, kind: SlotKind) -> Result<Option<CreativeField>>;

    fn extras(&self) -> CreativeExtras {
        CreativeExtras::default()
    }
}

/// Plain snapshot of an ad's creative data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdCreative {
    pub headline: Option<String>,
    pub body: Option<String>,
    pub call_to_action: Option<String>,
    pub advertiser: Option<String>,
    pub icon: Option<Vec<u8>>,
    pub extras: CreativeExtras,
}

impl AdCreative {
    pub fn with_headline(mut self, headline: impl Into<String>) -> Self {
        self.headline = Some(headline.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_call_to_action(mut self, cta: impl Into<String>) -> Self {
        self.call_to_action = Some(cta.into());
        self
    }

    pub fn with_advertiser(mut self, advertiser: impl Into<String>) -> Self {
        self.advertiser = Some(advertiser.into());
        self
    }

    pub fn with_icon(mut self, encoded: Vec<u8>) -> Self {
        self.icon = Some(encoded);
        self
    }
}

impl CreativeSource for AdCreative {
    fn field(&self, kind: SlotKind) -> Result<Option<CreativeField>> {
        let text = |value: &Option<String>| value.clone().map(CreativeField::Text);
        Ok(match kind {
            SlotKind::Icon => self.icon.clone().map(CreativeField::Icon),
            SlotKind::Headline => text(&self.headline),
            SlotKind::Body => text(&self.body),
            SlotKind::CallToAction => text(&self.call_to_action),
            SlotKind::Advertiser => text(&self.advertiser),
        })
    }

    fn extras(&self) -> CreativeExtras {
        self.extras.clone()
    }
}

/// Which fields are present right now, for log output. Failed reads count
/// as absent.
pub fn presence(source: &dyn CreativeSource) -> Vec<(SlotKind, bool)> {
    SlotKind::ALL
        .iter()
        .map(|&kind| (kind, matches!(source.field(kind), Ok(Some(_)))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_exposes_each_field() {
        let creative = AdCreative::default()
            .with_headline("Test Ad")
            .with_call_to_action("Install");

        assert_eq!(
            creative.field(SlotKind::Headline).unwrap(),
            Some(CreativeField::Text("Test Ad".into()))
        );
        assert_eq!(
            creative.field(SlotKind::CallToAction).unwrap(),
            Some(CreativeField::Text("Install".into()))
        );
        assert_eq!(creative.field(SlotKind::Body).unwrap(), None);
        assert_eq!(creative.field(SlotKind::Icon).unwrap(), None);
    }

    #[test]
    fn presence_lists_all_kinds() {
        let creative = AdCreative::default().with_advertiser("Acme");
        let present = presence(&creative);
        assert_eq!(present.len(), 5);
        assert!(present.contains(&(SlotKind::Advertiser, true)));
        assert!(present.contains(&(SlotKind::Headline, false)));
    }
}
