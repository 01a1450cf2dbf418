//! Build script that re-exports the target triple to the crate.
//!
//! Cargo only exposes `TARGET` to build scripts, so it is passed through as
//! `LANDAS_TARGET_TRIPLE` for the triple-based classifiers.

use std::env;

fn main() {
    let target = env::var("TARGET").unwrap_or_default();
    println!("cargo:rustc-env=LANDAS_TARGET_TRIPLE={target}");
    println!("cargo:rerun-if-changed=build.rs");
}
