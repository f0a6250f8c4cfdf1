use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
  // only the firmware binaries link against memory.x
  if env::var_os("CARGO_FEATURE_FIRMWARE").is_none() {
    return;
  }

  let out = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR not set"));
  fs::copy("memory.x", out.join("memory.x")).expect("copying memory.x");
  println!("cargo:rustc-link-search={}", out.display());
  println!("cargo:rerun-if-changed=memory.x");
}
