// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.

use scandex_core::error::Result;
use scandex_core::types::CapturedImage;

/// Unified bridge that groups all native capabilities needed by the
/// capture and export flows.
///
/// Platforms that lack a capability return
/// `ScandexError::PlatformUnavailable` from the stub implementation.
pub trait PlatformBridge: NativeCamera + NativeFilePicker + NativeShare {
    /// Human-readable platform name (e.g. "iOS 17", "Android 14").
    fn platform_name(&self) -> &str;

    /// View the bridge as its share capability alone.
    fn as_share(&self) -> &dyn NativeShare;
}

/// Scoped access to the device camera.
///
/// The camera is held for exactly as long as the lease lives; dropping the
/// lease releases the hardware, so a cancelled capture session frees the
/// camera no matter which suspension point was active.
pub trait CameraLease {
    /// Capture one frame.  Returns `Ok(None)` if the user dismissed the
    /// viewfinder without taking a picture.
    fn capture_frame(&mut self) -> Result<Option<CapturedImage>>;
}

/// Acquire the device camera.
pub trait NativeCamera {
    /// Open the camera, returning a lease that releases it on drop.
    fn open_camera(&self) -> Result<Box<dyn CameraLease>>;
}

/// Pick images from the device photo library.
pub trait NativeFilePicker {
    /// Show the image picker.  Returns `Ok(None)` if the user cancelled.
    /// The result has the same shape as a camera frame — callers never
    /// need to know which source produced an image.
    fn pick_image(&self) -> Result<Option<CapturedImage>>;
}

/// Share content via the OS share sheet.
pub trait NativeShare {
    /// Hand a file to the native share sheet with a title and message.
    ///
    /// A failure here never invalidates the file being shared.
    fn share_file(&self, path: &str, mime_type: &str, title: &str, message: &str) -> Result<()>;
}
