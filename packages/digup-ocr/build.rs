use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

const BRIDGE_SOURCE: &str = "src/swift/VisionOCR.swift";

fn main() {
    println!("cargo:rerun-if-changed={BRIDGE_SOURCE}");

    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os != "macos" {
        return;
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap();

    let object_file = out_dir.join("VisionOCR.o");
    run(
        Command::new("swiftc")
            .args(["-emit-object", "-parse-as-library", "-O", "-target"])
            .arg(format!("{arch}-apple-macosx11.0"))
            .arg("-o")
            .arg(&object_file)
            .arg(BRIDGE_SOURCE),
        "swiftc",
    );

    let lib_file = out_dir.join("libdigup_vision.a");
    run(
        Command::new("ar").arg("rcs").arg(&lib_file).arg(&object_file),
        "ar",
    );

    println!("cargo:rustc-link-search=native={}", out_dir.display());
    println!("cargo:rustc-link-lib=static=digup_vision");

    for framework in ["Vision", "Foundation", "CoreGraphics"] {
        println!("cargo:rustc-link-lib=framework={framework}");
    }

    // Swift runtime, from the SDK and from the active toolchain
    let sdk_path = xcrun(&["--show-sdk-path"]);
    println!("cargo:rustc-link-search=native={sdk_path}/usr/lib/swift");

    let swift = PathBuf::from(xcrun(&["--toolchain", "default", "--find", "swift"]));
    let toolchain_lib = toolchain_root(&swift).join("lib/swift/macosx");
    println!(
        "cargo:rustc-link-search=native={}",
        toolchain_lib.display()
    );
    println!("cargo:rustc-link-lib=dylib=swiftCore");
}

fn run(command: &mut Command, name: &str) {
    let status = command
        .status()
        .unwrap_or_else(|e| panic!("failed to run {name}: {e}"));
    assert!(status.success(), "{name} failed");
}

fn xcrun(args: &[&str]) -> String {
    let output = Command::new("xcrun")
        .args(args)
        .output()
        .expect("failed to run xcrun");
    String::from_utf8(output.stdout)
        .expect("xcrun printed non-utf8 output")
        .trim()
        .to_string()
}

// <toolchain>/usr/bin/swift -> <toolchain>/usr
fn toolchain_root(swift: &Path) -> PathBuf {
    swift
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .expect("unexpected swift location")
}
