use serde::Serialize;
use stockdesk_core::Profile;

/// Stored at `profile/page`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfilePage {
    pub profile: Profile,
    pub loading: bool,
    pub busy: bool,
    pub error: Option<String>,
}

impl ProfilePage {
    pub const PATH: &'static str = "profile/page";
}
