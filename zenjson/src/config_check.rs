// SPDX-License-Identifier: Apache-2.0

//! Compile-time configuration validation
//!
//! Exactly one Unicode escape flavour must be selected. The default build uses
//! `hex-unicode-escapes`; selecting `decimal-unicode-escapes` requires
//! `default-features = false`.

#[cfg(not(any(
    feature = "hex-unicode-escapes",
    feature = "decimal-unicode-escapes"
)))]
compile_error!(
    "No Unicode escape feature selected: choose one of 'hex-unicode-escapes' or 'decimal-unicode-escapes'"
);

#[cfg(all(feature = "hex-unicode-escapes", feature = "decimal-unicode-escapes"))]
compile_error!(
    "Cannot enable both 'hex-unicode-escapes' and 'decimal-unicode-escapes' features simultaneously: choose one escape flavour"
);
