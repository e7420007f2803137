//! Fuzz target for Gemara policy parsing and compilation.
//!
//! Goal: parsing and transforming arbitrary documents should **never panic**.
//! Malformed input must surface as an error.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_policy_parser
//! ```

#![no_main]

use ampelgen_domain::options::TransformOptions;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let Ok(policy) = ampelgen_source::parse_policy_yaml(text) else {
        return;
    };

    let plain = ampelgen_domain::transform(&policy, &TransformOptions::default());
    let scoped = ampelgen_domain::transform(
        &policy,
        &TransformOptions::default().with_scope_filters(true),
    );

    if let (Ok(a), Ok(b)) = (&plain, &scoped) {
        assert_eq!(a.tenets.len(), b.tenets.len());
    }
    assert_eq!(plain.is_err(), scoped.is_err());
});
