use std::process::Command;

fn main() {
    // Short commit hash for `strawpoll version`; "unknown" outside a checkout.
    let commit = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|hash| hash.trim().to_string())
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=STRAWPOLL_GIT_HASH={commit}");
    println!("cargo:rerun-if-changed=.git/HEAD");
}
