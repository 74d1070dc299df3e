use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

pub mod cleanup;
pub mod heartbeat;
pub mod reminders;

/// Append one line to a maintenance log, creating the file on first use.
pub fn append_log_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", line)?;
    Ok(())
}
