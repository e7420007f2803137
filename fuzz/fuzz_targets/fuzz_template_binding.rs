//! Fuzz target for CEL template binding.
//!
//! Goal: binding should **never panic**, and a successful bind never leaves a
//! placeholder that the template declared.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_template_binding
//! ```

#![no_main]

use ampelgen_domain::template;
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::collections::BTreeMap;

#[derive(Arbitrary, Debug)]
struct BindInput {
    template: String,
    params: Vec<(String, String)>,
}

fuzz_target!(|input: BindInput| {
    if input.template.len() > 4096 || input.params.len() > 32 {
        return;
    }

    let params: BTreeMap<String, String> = input.params.into_iter().collect();

    let names = template::placeholders(&template::fold(&input.template)).unwrap_or_default();

    match template::bind(&input.template, &params) {
        Ok(_) => {
            for name in names {
                assert!(params.contains_key(&name), "bound without '{name}'");
            }
        }
        Err(template::BindError::MissingParameter { name }) => {
            assert!(!params.contains_key(&name));
        }
        Err(template::BindError::Malformed { .. }) => {}
    }
});
