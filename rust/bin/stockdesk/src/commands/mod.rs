//! CLI command implementations.

pub mod bills;
pub mod context;
pub mod dues;
pub mod login;
pub mod profile;
pub mod records;
pub mod users;

use anyhow::Result;

/// Ask on stderr; anything but "y" declines.
pub fn confirm(question: &str) -> Result<bool> {
    eprint!("{} [y/N]: ", question);
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

/// Read one line from stdin after a prompt on stderr.
pub fn prompt(label: &str) -> Result<String> {
    eprint!("{}: ", label);
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
