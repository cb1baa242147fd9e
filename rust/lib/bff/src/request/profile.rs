use stockdesk_core::Profile;

#[derive(Debug, Clone, Default)]
pub struct ProfileLoadReq;

impl ProfileLoadReq {
    pub const PATH: &'static str = "profile/load";
}

#[derive(Debug, Clone)]
pub struct ProfileSaveReq {
    pub profile: Profile,
}

impl ProfileSaveReq {
    pub const PATH: &'static str = "profile/save";
}

#[derive(Debug, Clone)]
pub struct PasswordChangeReq {
    pub current: String,
    pub new: String,
    pub confirm: String,
}

impl PasswordChangeReq {
    pub const PATH: &'static str = "profile/password";
}
