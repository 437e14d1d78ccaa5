use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

fn main() {
    // Put memory.x where link.x can find it
    let out = PathBuf::from(env::var_os("OUT_DIR").unwrap());
    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(include_bytes!("memory.x"))
        .unwrap();
    println!("cargo:rustc-link-search={}", out.display());
    println!("cargo::rerun-if-changed=memory.x");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");

    git();
}

fn git() {
    let rev = Command::new("git")
        .args([
            "-c",
            "core.abbrev=8",
            "rev-parse",
            "--verify",
            "--short",
            "HEAD",
        ])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok());

    // Tarball builds have no repository
    let Some(rev) = rev else {
        println!("cargo::rustc-env=GIT_REV=unknown");
        return;
    };
    let rev = rev.trim().to_string();

    // Determine local directory changes
    let modified = Command::new("git")
        .args(["ls-files", "--modified"])
        .output()
        .unwrap();
    let modified = String::from_utf8(modified.stdout).unwrap();
    let modified = modified.trim();
    let dirty = if modified.is_empty() { "" } else { "-dirty" };

    println!("cargo::rustc-env=GIT_REV={rev}{dirty}");

    // Find git directory
    let path_res = Command::new("git")
        .args(["rev-parse", "--path-format=relative", "--git-dir"])
        .output()
        .map(|o| String::from_utf8(o.stdout).unwrap().trim().to_string());
    if let Ok(path) = path_res {
        println!("cargo:rerun-if-changed={path}/HEAD");
    }

    // Workaround for
    // https://github.com/rust-lang/cargo/issues/4587
    // since setting any rerun-if-changed clears the default set.
    println!("cargo::rerun-if-changed=src");
    println!("cargo::rerun-if-changed=Cargo.lock");
    println!("cargo::rerun-if-changed=Cargo.toml");
}
