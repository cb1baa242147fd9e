use stockdesk_core::Role;

#[derive(Debug, Clone)]
pub struct BlockUserReq {
    pub id: String,
    pub blocked: bool,
}

impl BlockUserReq {
    pub const PATH: &'static str = "users/block";
}

#[derive(Debug, Clone)]
pub struct ChangeRoleReq {
    pub id: String,
    pub role: Role,
}

impl ChangeRoleReq {
    pub const PATH: &'static str = "users/role";
}
