use crate::build;

/// Returns the long version string shown by `--version`.
pub fn long_version() -> String {
    #[allow(clippy::const_is_empty)]
    let branch = if build::BRANCH.is_empty() {
        option_env!("GITHUB_REF_NAME").unwrap_or("unknown")
    } else {
        build::BRANCH
    };
    let state = if build::GIT_CLEAN { "clean" } else { "dirty" };
    let commit_msg = option_env!("GIT_COMMIT_MESSAGE").unwrap_or("no commit message");

    format!(
        "{} ({} {} {}: {})\nBuilt {} for {} with {}",
        build::PKG_VERSION,
        branch,
        build::SHORT_COMMIT,
        state,
        commit_msg,
        build::BUILD_TIME,
        build::BUILD_TARGET,
        build::RUST_VERSION,
    )
}
