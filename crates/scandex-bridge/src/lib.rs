// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scandex — Native platform bridge abstractions.
//
// The capture flow needs three device capabilities: a camera, a photo
// library picker, and the OS share sheet.  This crate defines the traits
// and platform dispatch; the rest of the workspace never touches a native
// SDK directly.

pub mod stub;
pub mod traits;

/// Retrieves the bridge implementation for the target operating system.
///
/// Native iOS/Android implementations plug in here; desktop and CI builds
/// get the stub, which reports every capability as unavailable.
pub fn platform_bridge() -> Box<dyn traits::PlatformBridge> {
    Box::new(stub::StubBridge)
}
