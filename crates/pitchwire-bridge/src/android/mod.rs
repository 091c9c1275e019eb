// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform bridge via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Connectivity is read from
// `ConnectivityManager.getActiveNetworkInfo()`. That API is deprecated but
// still the only one that reports the telephony subtype without the
// READ_PHONE_STATE permission.

#![cfg(target_os = "android")]

use std::sync::OnceLock;

use jni::objects::{JObject, JString, JValue};
use jni::{JNIEnv, JavaVM};

use pitchwire_core::error::{PitchwireError, Result};
use pitchwire_core::types::ConnectivityState;

use crate::traits::*;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// `Context.CONNECTIVITY_SERVICE`.
const CONNECTIVITY_SERVICE: &str = "connectivity";

static JAVA_VM: OnceLock<JavaVM> = OnceLock::new();

/// The process-wide `JavaVM`, resolved once from the global Android context.
fn java_vm() -> Result<&'static JavaVM> {
    if let Some(vm) = JAVA_VM.get() {
        return Ok(vm);
    }
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is guaranteed valid for the lifetime of the process.
    let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| PitchwireError::Bridge(format!("failed to obtain JavaVM: {e}")))?;
    // Losing the race just means another thread stored the same VM.
    let _ = JAVA_VM.set(vm);
    JAVA_VM
        .get()
        .ok_or_else(|| PitchwireError::Bridge("JavaVM not initialised".into()))
}

/// Obtain a [`JNIEnv`] for the current thread, attaching it if needed.
fn jni_env() -> Result<JNIEnv<'static>> {
    java_vm()?
        .attach_current_thread_permanently()
        .map_err(|e| PitchwireError::Bridge(format!("failed to attach JNI thread: {e}")))
}

/// Obtain the hosting `Activity` as a [`JObject`].
fn activity() -> Result<JObject<'static>> {
    let ctx = ndk_context::android_context();
    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(PitchwireError::Bridge(
            "Android context is null; host activity not initialised".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Activity.
    Ok(unsafe { JObject::from_raw(ptr.cast()) })
}

/// Map a JNI failure into `ConnectivityRead`, clearing any pending Java
/// exception so later calls on this thread are not poisoned.
fn read_err(env: &mut JNIEnv<'_>, context: &str, e: jni::errors::Error) -> PitchwireError {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_clear();
    }
    PitchwireError::ConnectivityRead(format!("{context}: {e}"))
}

// ---------------------------------------------------------------------------
// Bridge struct
// ---------------------------------------------------------------------------

/// Android implementation of the Pitchwire platform bridge.
///
/// Zero-sized; all state lives on the Java side. The first JNI call happens
/// lazily when a trait method is invoked.
pub struct AndroidBridge;

impl AndroidBridge {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AndroidBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for AndroidBridge {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

// ---------------------------------------------------------------------------
// NativeConnectivity: android.net.ConnectivityManager
// ---------------------------------------------------------------------------

impl NativeConnectivity for AndroidBridge {
    fn active_connectivity(&self) -> Result<Option<ConnectivityState>> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let j_service: JString = env
            .new_string(CONNECTIVITY_SERVICE)
            .map_err(|e| read_err(&mut env, "new_string(service)", e))?;

        let manager: JObject = match env.call_method(
            &activity,
            "getSystemService",
            "(Ljava/lang/String;)Ljava/lang/Object;",
            &[JValue::Object(&j_service)],
        ) {
            Ok(value) => value.l().map_err(|e| read_err(&mut env, "getSystemService->l", e))?,
            Err(e) => return Err(read_err(&mut env, "getSystemService", e)),
        };
        if manager.is_null() {
            return Err(PitchwireError::ConnectivityRead(
                "ConnectivityManager unavailable".into(),
            ));
        }

        let info: JObject = match env.call_method(
            &manager,
            "getActiveNetworkInfo",
            "()Landroid/net/NetworkInfo;",
            &[],
        ) {
            Ok(value) => value
                .l()
                .map_err(|e| read_err(&mut env, "getActiveNetworkInfo->l", e))?,
            Err(e) => return Err(read_err(&mut env, "getActiveNetworkInfo", e)),
        };
        if info.is_null() {
            tracing::debug!("Android: no active network");
            return Ok(None);
        }

        let is_connected = match env.call_method(&info, "isConnected", "()Z", &[]) {
            Ok(value) => value.z().map_err(|e| read_err(&mut env, "isConnected->z", e))?,
            Err(e) => return Err(read_err(&mut env, "isConnected", e)),
        };

        let subtype_code = match env.call_method(&info, "getSubtype", "()I", &[]) {
            Ok(value) => value.i().map_err(|e| read_err(&mut env, "getSubtype->i", e))?,
            Err(e) => return Err(read_err(&mut env, "getSubtype", e)),
        };

        // Logging only; failures yield `None`.
        let subtype_name = subtype_name(&mut env, &info);

        tracing::debug!(
            is_connected,
            subtype = subtype_code,
            name = subtype_name.as_deref().unwrap_or("?"),
            "Android: active network info"
        );

        Ok(Some(ConnectivityState {
            is_connected,
            subtype_code,
            subtype_name,
        }))
    }
}

fn subtype_name(env: &mut JNIEnv<'_>, info: &JObject<'_>) -> Option<String> {
    let name = match env.call_method(info, "getSubtypeName", "()Ljava/lang/String;", &[]) {
        Ok(value) => value.l().ok()?,
        Err(e) => {
            tracing::debug!(error = %e, "Android: getSubtypeName failed");
            let _ = env.exception_clear();
            return None;
        }
    };
    if name.is_null() {
        return None;
    }
    env.get_string(&JString::from(name)).ok().map(Into::into)
}
