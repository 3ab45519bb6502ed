// Shared build script helper that turns a crate's README.md into its rustdoc front page.
// Include this in build.rs files with: include!("../build_common.rs");
//
// Required imports in the including file:
//   use std::env;
//   use std::fs;
//   use std::path::Path;

/// Copy the crate README into `OUT_DIR/README_GENERATED.md` with links rewritten
/// so rustdoc resolves them as module paths.
///
/// `](src/backends/echo.rs)` becomes `](backends/echo)`.
fn process_readme_for_rustdoc(crate_dir: &str) {
    println!("cargo:rerun-if-changed=README.md");

    let readme_path = Path::new(crate_dir).join("README.md");
    let content = fs::read_to_string(&readme_path).unwrap_or_default();

    let rustdoc_content = content
        .replace("](src/", "](")
        .replace("/mod.rs)", ")")
        .replace(".rs)", ")");

    let Ok(out_dir) = env::var("OUT_DIR") else {
        return;
    };
    let dest_path = Path::new(&out_dir).join("README_GENERATED.md");
    if let Err(e) = fs::write(&dest_path, rustdoc_content) {
        println!("cargo:warning=failed to write {}: {e}", dest_path.display());
    }
}
