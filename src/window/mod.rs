use std::process::Command;
use tracing::debug;

use crate::error::{Error, Result};

/// Brings the window of a running program to the foreground.
pub trait WindowFocus {
    fn focus(&self, process: &str) -> Result<()>;
}

/// Finds the process with `pgrep` and activates its window with `wmctrl`.
pub struct Wmctrl;

impl WindowFocus for Wmctrl {
    fn focus(&self, process: &str) -> Result<()> {
        let pids = program_pids(process)?;
        if pids.is_empty() {
            return Err(Error::ProcessNotRunning(process.to_string()));
        }

        let listing = run_wmctrl(&["-l", "-p"])?;
        let Some(window_id) = find_window(&listing, &pids) else {
            return Err(Error::WindowToolUnavailable(format!(
                "Unable to find a {process} window, make sure you have wmctrl installed"
            )));
        };

        debug!("Focusing window {window_id} of {process}");
        run_wmctrl(&["-i", "-a", window_id])?;
        Ok(())
    }
}

/// Pids of processes named exactly `process`. Our own binary shares the
/// `spotify` prefix, so a substring match would always find itself.
fn program_pids(process: &str) -> Result<Vec<String>> {
    let output = Command::new("pgrep")
        .args(["-x", process])
        .output()
        .map_err(|e| Error::WindowToolUnavailable(format!("Failed to run pgrep: {e}")))?;

    Ok(parse_pids(
        &String::from_utf8_lossy(&output.stdout),
        std::process::id(),
    ))
}

fn parse_pids(stdout: &str, own_pid: u32) -> Vec<String> {
    let own_pid = own_pid.to_string();
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && *line != own_pid)
        .map(str::to_string)
        .collect()
}

fn run_wmctrl(args: &[&str]) -> Result<String> {
    let output = Command::new("wmctrl").args(args).output().map_err(|e| {
        Error::WindowToolUnavailable(format!(
            "Failed to run wmctrl ({e}), make sure you have wmctrl installed"
        ))
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::WindowToolUnavailable(format!(
            "wmctrl failed: {}",
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Id of the first window in a `wmctrl -l -p` listing owned by one of `pids`.
/// Listing lines look like `0x03a00007  0 12345 host Title`.
fn find_window<'a>(listing: &'a str, pids: &[String]) -> Option<&'a str> {
    listing.lines().find_map(|line| {
        let mut fields = line.split_whitespace();
        let id = fields.next()?;
        let _desktop = fields.next()?;
        let pid = fields.next()?;
        pids.iter().any(|p| p == pid).then_some(id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
0x01e00003 -1 1834   laptop Top Panel
0x03a00007  0 4242   laptop nvim ~/src
0x04200001  1 5151   laptop Spotify Premium
0x04200009  1 5151   laptop Spotify Mini
";

    #[test]
    fn test_find_window_by_pid() {
        let pids = vec!["5151".to_string(), "5152".to_string()];
        assert_eq!(find_window(LISTING, &pids), Some("0x04200001"));
    }

    #[test]
    fn test_parse_pids_skips_own_process() {
        assert_eq!(parse_pids("5151\n 77 \n\n5152\n", 77), vec!["5151", "5152"]);
        assert!(parse_pids("77\n", 77).is_empty());
        assert!(parse_pids("", 77).is_empty());
    }

    #[test]
    fn test_find_window_missing() {
        let pids = vec!["99".to_string()];
        assert_eq!(find_window(LISTING, &pids), None);
        assert_eq!(find_window("", &pids), None);
        assert_eq!(find_window("garbage\n", &pids), None);
    }
}
