//! Fuzz target for the path parser.
//!
//! Any UTF-8 input must either parse or fail with a `PathError`, and a
//! successful parse must re-render to text that parses to the same path.

#![no_main]

use libfuzzer_sys::fuzz_target;
use protosql_core::path::parse_path;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(path) = parse_path(text) {
            let rendered = path.to_string();
            let reparsed = parse_path(&rendered).expect("rendered path should parse");
            assert_eq!(path, reparsed);
        }
    }
});
