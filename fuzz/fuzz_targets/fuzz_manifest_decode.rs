//! Fuzz target for multi-document manifest decoding.
//!
//! Goal: decoding should **never panic** on any input.
//! It may return errors, but panics are unacceptable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_manifest_decode
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = vapguard_loader::fuzz::parse_manifest(text);
        let _ = vapguard_loader::fuzz::parse_policies(text);
    }
});
