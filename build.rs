use shadow_rs::{BuildPattern, ShadowBuilder};
use std::process::Command;

fn main() -> shadow_rs::SdResult<()> {
    ShadowBuilder::builder().build_pattern(BuildPattern::RealTime).build()?;

    // Subject line of HEAD, shown by --version
    let subject = Command::new("git")
        .args(["log", "-1", "--pretty=%s"])
        .output()
        .ok()
        .and_then(|output| String::from_utf8(output.stdout).ok());
    if let Some(subject) = subject {
        println!("cargo:rustc-env=GIT_COMMIT_MESSAGE={}", subject.trim());
    }

    // Release builds in CI have no local branch
    if let Ok(ref_name) = std::env::var("GITHUB_REF_NAME") {
        println!("cargo:rustc-env=GITHUB_REF_NAME={}", ref_name);
    }

    Ok(())
}
