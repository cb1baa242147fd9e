//! Auth requests.

/// Login with email + password.
#[derive(Debug, Clone)]
pub struct LoginReq {
    pub email: String,
    pub password: String,
}

impl LoginReq {
    pub const PATH: &'static str = "auth/login";
}

/// Logout, clear the session.
#[derive(Debug, Clone, Default)]
pub struct LogoutReq;

impl LogoutReq {
    pub const PATH: &'static str = "auth/logout";
}
