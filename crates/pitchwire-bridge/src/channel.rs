// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Method channel answering the app layer's network-type requests.
//
// The transport is the host's business; this module only maps a named call
// to a response. Unknown method names are answered with `NotImplemented`,
// never an error, and perform no classification.

use std::sync::Arc;

use pitchwire_core::types::NetworkClass;
use pitchwire_network::Classifier;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::traits::{NativeConnectivity, PlatformBridge};

/// Method name the app layer calls.
pub const GET_NETWORK_TYPE: &str = "getNetworkType";

/// An incoming channel request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: Value::Null,
        }
    }
}

/// Channel reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MethodResponse {
    Success { value: Value },
    NotImplemented,
    Error { code: String, message: String },
}

impl MethodResponse {
    pub fn success(value: impl Into<Value>) -> Self {
        Self::Success {
            value: value.into(),
        }
    }
}

/// Read connectivity and classify it, folding every read failure into the
/// fallback class.
pub fn network_type(source: &dyn NativeConnectivity, classifier: &Classifier) -> NetworkClass {
    match source.active_connectivity() {
        Ok(Some(state)) => classifier.classify(&state),
        Ok(None) => {
            info!("no active network connection");
            NetworkClass::Unknown
        }
        Err(e) => {
            warn!(error = %e, "connectivity read failed, reporting fallback");
            NetworkClass::Unknown
        }
    }
}

/// Handler for the network-type channel.
pub struct NetworkTypeChannel {
    name: String,
    bridge: Arc<dyn PlatformBridge>,
    classifier: Classifier,
}

impl NetworkTypeChannel {
    pub fn new(name: impl Into<String>, bridge: Arc<dyn PlatformBridge>, classifier: Classifier) -> Self {
        Self {
            name: name.into(),
            bridge,
            classifier,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self, call: &MethodCall) -> MethodResponse {
        debug!(channel = %self.name, method = %call.method, "method channel called");
        match call.method.as_str() {
            GET_NETWORK_TYPE => {
                let class = network_type(self.bridge.as_ref(), &self.classifier);
                info!(
                    channel = %self.name,
                    platform = self.bridge.platform_name(),
                    network = %class,
                    "returning network type"
                );
                MethodResponse::success(class.label())
            }
            other => {
                debug!(channel = %self.name, method = other, "method not implemented");
                MethodResponse::NotImplemented
            }
        }
    }

    /// Decode a JSON-encoded call, handle it and encode the reply.
    pub fn handle_json(&self, request: &str) -> String {
        let response = match serde_json::from_str::<MethodCall>(request) {
            Ok(call) => self.handle(&call),
            Err(e) => MethodResponse::Error {
                code: "bad_request".into(),
                message: e.to_string(),
            },
        };
        serde_json::to_string(&response).unwrap_or_else(|e| {
            format!(r#"{{"status":"error","code":"encode","message":"{e}"}}"#)
        })
    }
}
