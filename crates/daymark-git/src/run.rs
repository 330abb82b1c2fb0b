use std::path::Path;
use std::process::Command;

use crate::error::Error;

/// Run git in `repo` and return stdout. A non-zero exit surfaces the tool's
/// stderr verbatim as `Error::Git`.
pub(crate) fn git(repo: &Path, args: &[&str]) -> Result<String, Error> {
    tracing::debug!(?args, "git");
    let output = Command::new("git")
        .args(args)
        .current_dir(repo)
        .output()
        .map_err(|e| Error::Git(format!("failed to run git: {e}")))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if stderr.is_empty() {
            return Err(Error::Git(format!(
                "git {} exited with {}",
                args.first().copied().unwrap_or_default(),
                output.status
            )));
        }
        return Err(Error::Git(stderr));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Run a git query whose exit code is the answer: 0 is yes, 1 is a normal
/// negative result, anything else is a failure.
pub(crate) fn git_check(repo: &Path, args: &[&str]) -> Result<bool, Error> {
    tracing::debug!(?args, "git (check)");
    let output = Command::new("git")
        .args(args)
        .current_dir(repo)
        .output()
        .map_err(|e| Error::Git(format!("failed to run git: {e}")))?;
    match output.status.code() {
        Some(0) => Ok(true),
        Some(1) => Ok(false),
        _ => Err(Error::Git(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        )),
    }
}
