//! Fuzz target for the extraction engine.
//!
//! Decodes arbitrary bytes as a `Person` and walks a set of paths covering
//! nested messages, repeated fields, negative indices and enum accessors.
//! Corrupt input must surface as an error, never a panic.

#![no_main]

use std::sync::OnceLock;

use libfuzzer_sys::fuzz_target;
use protosql_core::testing::address_book_bundle;
use protosql_core::{AllowLoad, DescriptorRegistry, Extractor, Path};

const PATHS: &[&str] = &[
    "$",
    "$.name",
    "$.id",
    "$.phones[0].number",
    "$.phones[-1].type.name",
    "$.phones[-1].type.number",
    "$.manager.manager.phones[2].type",
    "$.scores[-1]",
    "$.salary",
    "$.active",
];

fn registry() -> &'static DescriptorRegistry {
    static REGISTRY: OnceLock<DescriptorRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let registry = DescriptorRegistry::new();
        registry
            .load_bundle(&address_book_bundle(), &AllowLoad)
            .expect("fixture bundle should load");
        registry
    })
}

fuzz_target!(|data: &[u8]| {
    let Some((&selector, message)) = data.split_first() else {
        return;
    };

    let path: Path = PATHS[selector as usize % PATHS.len()]
        .parse()
        .expect("fixture path should parse");

    let _ = Extractor::new(registry())
        .warn_on_unsigned(false)
        .extract(message, "Person", &path);
});
