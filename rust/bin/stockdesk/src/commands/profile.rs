//! Profile commands.

use anyhow::{anyhow, Result};
use stockdesk_bff::request::{PasswordChangeReq, ProfileLoadReq, ProfileSaveReq};
use stockdesk_bff::state::ProfilePage;
use stockdesk_core::Profile;

use crate::render::{dash, print_json, Output, Table};
use crate::shell::Shell;

/// Fields `profile update` may change. `None` keeps the current value.
#[derive(Debug, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub country: Option<String>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.mobile.is_none() && self.country.is_none()
    }

    fn apply(self, profile: &mut Profile) {
        if let Some(name) = self.name {
            profile.name = name;
        }
        if let Some(email) = self.email {
            profile.email = email;
        }
        if let Some(mobile) = self.mobile {
            profile.mobile = mobile;
        }
        if let Some(country) = self.country {
            profile.country = country;
        }
    }
}

async fn load(shell: &Shell) -> Result<Profile> {
    shell.require_login()?;
    shell.emit(ProfileLoadReq::PATH, ProfileLoadReq).await?;
    shell
        .get::<ProfilePage>(ProfilePage::PATH)
        .map(|page| page.profile)
        .ok_or_else(|| anyhow!("Profile is not loaded."))
}

pub async fn show(shell: &Shell) -> Result<()> {
    let profile = load(shell).await?;
    if shell.output() == Output::Json {
        return print_json(&profile);
    }
    let mut table = Table::new(&["FIELD", "VALUE"]);
    table
        .row(vec!["NAME".into(), dash(&profile.name).to_string()])
        .row(vec!["EMAIL".into(), dash(&profile.email).to_string()])
        .row(vec!["MOBILE".into(), dash(&profile.mobile).to_string()])
        .row(vec!["COUNTRY".into(), dash(&profile.country).to_string()]);
    table.print();
    Ok(())
}

pub async fn update(shell: &Shell, changes: ProfileChanges) -> Result<()> {
    if changes.is_empty() {
        anyhow::bail!("Nothing to update. Pass --name, --email, --mobile or --country.");
    }
    let mut profile = load(shell).await?;
    changes.apply(&mut profile);
    shell.emit(ProfileSaveReq::PATH, ProfileSaveReq { profile }).await
}

pub async fn change_password(shell: &Shell, current: String, new: String, confirm: String) -> Result<()> {
    shell.require_login()?;
    shell.emit(PasswordChangeReq::PATH, PasswordChangeReq { current, new, confirm }).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changes_keep_unset_fields() {
        let mut profile = Profile {
            id: "1".into(),
            name: "Asha".into(),
            email: "asha@shop.in".into(),
            mobile: "98".into(),
            country: "IN".into(),
        };
        let changes = ProfileChanges { mobile: Some("99".into()), ..ProfileChanges::default() };
        assert!(!changes.is_empty());
        changes.apply(&mut profile);
        assert_eq!(profile.mobile, "99");
        assert_eq!(profile.name, "Asha");
        assert!(ProfileChanges::default().is_empty());
    }
}
