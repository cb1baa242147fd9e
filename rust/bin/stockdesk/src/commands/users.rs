//! User administration commands.

use anyhow::Result;
use stockdesk_bff::request::{BlockUserReq, ChangeRoleReq};
use stockdesk_core::Role;

use crate::shell::Shell;

/// Parse a role given as its id (`3`) or its name (`manager`,
/// `super-admin`).
pub fn parse_role(value: &str) -> Result<Role> {
    let value = value.trim();
    if let Ok(rid) = value.parse::<i64>() {
        return Ok(Role::from_rid(rid)?);
    }
    let wanted: String = value.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    (1..=5)
        .filter_map(|rid| Role::from_rid(rid).ok())
        .find(|role| {
            let name: String = role.name().chars().filter(|c| c.is_ascii_alphanumeric()).collect();
            name.eq_ignore_ascii_case(&wanted)
        })
        .ok_or_else(|| anyhow::anyhow!("Unknown role \"{}\". Use 1-5 or a role name.", value))
}

pub async fn set_blocked(shell: &Shell, id: &str, blocked: bool) -> Result<()> {
    shell.require_login()?;
    shell.emit(BlockUserReq::PATH, BlockUserReq { id: id.to_string(), blocked }).await
}

pub async fn set_role(shell: &Shell, id: &str, role: Role) -> Result<()> {
    shell.require_login()?;
    shell.emit(ChangeRoleReq::PATH, ChangeRoleReq { id: id.to_string(), role }).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_by_id_or_name() {
        assert_eq!(parse_role("3").unwrap(), Role::Manager);
        assert_eq!(parse_role("super-admin").unwrap(), Role::SuperAdmin);
        assert_eq!(parse_role("Super Admin").unwrap(), Role::SuperAdmin);
        assert_eq!(parse_role("viewer").unwrap(), Role::Viewer);
        assert!(parse_role("9").is_err());
        assert!(parse_role("owner").is_err());
    }
}
