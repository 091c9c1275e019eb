// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Native ad factories and the registry the host looks them up in.

use std::collections::HashMap;
use std::sync::Arc;

use pitchwire_core::error::{PitchwireError, Result};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::coordinator::AdRenderCoordinator;
use crate::creative::CreativeSource;
use crate::layout::ViewLayout;
use crate::view::{CreativeBinder, ViewSystem};

/// A loaded ad as handed over by the SDK: its creative data plus the
/// callback that binds it to a view.
#[derive(Clone)]
pub struct NativeAd {
    pub creative: Arc<dyn CreativeSource>,
    pub binder: Arc<dyn CreativeBinder>,
}

/// Builds the view for one native ad.
pub trait NativeAdFactory: Send + Sync {
    fn create_native_ad(
        &self,
        ad: NativeAd,
        custom_options: Option<&Map<String, Value>>,
    ) -> Result<AdRenderCoordinator>;
}

/// Icon-plus-text-stack list tile.
pub struct ListTileAdFactory {
    id: String,
    layout: ViewLayout,
    views: Arc<dyn ViewSystem>,
}

impl ListTileAdFactory {
    pub const DEFAULT_ID: &'static str = "listTile";

    pub fn new(views: Arc<dyn ViewSystem>) -> Self {
        Self::with_id(Self::DEFAULT_ID, views)
    }

    pub fn with_id(id: impl Into<String>, views: Arc<dyn ViewSystem>) -> Self {
        Self {
            id: id.into(),
            layout: ViewLayout::list_tile(),
            views,
        }
    }
}

impl NativeAdFactory for ListTileAdFactory {
    fn create_native_ad(
        &self,
        ad: NativeAd,
        custom_options: Option<&Map<String, Value>>,
    ) -> Result<AdRenderCoordinator> {
        if let Some(options) = custom_options {
            // No options affect this layout.
            debug!(factory = %self.id, keys = ?options.keys().collect::<Vec<_>>(), "ignoring custom options");
        }
        AdRenderCoordinator::build(
            &self.id,
            &self.layout,
            ad.creative,
            self.views.as_ref(),
            ad.binder.as_ref(),
        )
    }
}

/// Factories keyed by the id the Dart side passes as `factoryId`.
#[derive(Default)]
pub struct AdFactoryRegistry {
    factories: HashMap<String, Arc<dyn NativeAdFactory>>,
}

impl AdFactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: &str, factory: Arc<dyn NativeAdFactory>) -> Result<()> {
        if self.factories.contains_key(id) {
            return Err(PitchwireError::DuplicateFactory(id.to_string()));
        }
        self.factories.insert(id.to_string(), factory);
        info!(factory = id, "native ad factory registered");
        Ok(())
    }

    /// Remove a factory. Returns whether one was registered under `id`.
    pub fn unregister(&mut self, id: &str) -> bool {
        self.factories.remove(id).is_some()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    pub fn create(
        &self,
        id: &str,
        ad: NativeAd,
        custom_options: Option<&Map<String, Value>>,
    ) -> Result<AdRenderCoordinator> {
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| PitchwireError::UnknownFactory(id.to_string()))?;
        factory.create_native_ad(ad, custom_options)
    }
}
