use std::env;
use std::fs;
use std::path::Path;

include!("../build_common.rs");

fn main() {
    let Ok(crate_dir) = env::var("CARGO_MANIFEST_DIR") else {
        return;
    };

    process_readme_for_rustdoc(&crate_dir);
}
