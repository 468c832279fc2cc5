//! Build script for counter-ffi.
//!
//! Regenerates `include/counter_ffi.h` from the `#[no_mangle]` exports with
//! cbindgen, configured by `cbindgen.toml`.

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=cbindgen.toml");

    let Some(crate_dir) = env::var_os("CARGO_MANIFEST_DIR").map(PathBuf::from) else {
        println!("cargo:warning=CARGO_MANIFEST_DIR is unset, header not regenerated");
        return;
    };

    let config = match cbindgen::Config::from_file(crate_dir.join("cbindgen.toml")) {
        Ok(config) => config,
        Err(err) => {
            println!("cargo:warning=invalid cbindgen.toml: {}", err);
            return;
        }
    };

    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(crate_dir.join("include").join("counter_ffi.h"));
        }
        Err(err) => println!("cargo:warning=counter_ffi.h not regenerated: {}", err),
    }
}
