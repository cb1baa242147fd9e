/// Restore the session and pick the first route.
#[derive(Debug, Clone, Default)]
pub struct InitializeReq;

impl InitializeReq {
    pub const PATH: &'static str = "app/initialize";
}
