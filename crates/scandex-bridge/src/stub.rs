// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where native mobile APIs are
// unavailable.  Every capability reports `PlatformUnavailable` — real
// implementations live with the platform projects.

use scandex_core::error::{Result, ScandexError};

use crate::traits::*;

/// No-op bridge returned on non-mobile platforms.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }

    fn as_share(&self) -> &dyn NativeShare {
        self
    }
}

impl NativeCamera for StubBridge {
    fn open_camera(&self) -> Result<Box<dyn CameraLease>> {
        tracing::warn!("NativeCamera::open_camera called on stub bridge");
        Err(ScandexError::PlatformUnavailable)
    }
}

impl NativeFilePicker for StubBridge {
    fn pick_image(&self) -> Result<Option<scandex_core::types::CapturedImage>> {
        tracing::warn!("NativeFilePicker::pick_image called on stub bridge");
        Err(ScandexError::PlatformUnavailable)
    }
}

impl NativeShare for StubBridge {
    fn share_file(
        &self,
        _path: &str,
        _mime_type: &str,
        _title: &str,
        _message: &str,
    ) -> Result<()> {
        tracing::warn!("NativeShare::share_file called on stub bridge");
        Err(ScandexError::PlatformUnavailable)
    }
}
