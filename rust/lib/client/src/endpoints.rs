//! Endpoints beyond plain CRUD.

use serde::Serialize;
use serde_json::{json, Value};
use stockdesk_core::{
    Category, DueRecord, Payment, Product, ProductInfo, Profile, Role, Unit, User,
};

use crate::api::ApiClient;
use crate::envelope::Reply;
use crate::error::ApiError;
use crate::resource::ResourceClient;

#[derive(Serialize)]
struct PasswordChange<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

impl ApiClient {
    pub fn resource<T: stockdesk_core::Resource>(&self) -> ResourceClient<T> {
        ResourceClient::new(self.clone())
    }

    /// `GET /products/{id}/info`, with derived costs filled in.
    pub async fn product_info(&self, product_id: &str) -> Result<ProductInfo, ApiError> {
        let reply: Reply<ProductInfo> = self
            .get(&format!("{}/{}/info", <Product as stockdesk_core::Resource>::COLLECTION, product_id))
            .await?;
        let mut info = reply.data.fill_missing();
        if info.product_id.is_empty() {
            info.product_id = product_id.to_string();
        }
        Ok(info)
    }

    pub async fn units(&self) -> Result<Vec<Unit>, ApiError> {
        self.resource::<Unit>().list().await
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.resource::<Category>().list().await
    }

    /// `PUT /users/{id}/block`.
    pub async fn set_user_blocked(&self, user_id: &str, blocked: bool) -> Result<Reply<Option<User>>, ApiError> {
        self.put(&format!("users/{}/block", user_id), &json!({ "blocked": blocked }))
            .await
    }

    /// `PUT /users/{id}/role`.
    pub async fn set_user_role(&self, user_id: &str, role: Role) -> Result<Reply<Option<User>>, ApiError> {
        self.put(&format!("users/{}/role", user_id), &json!({ "rid": role.rid() }))
            .await
    }

    pub async fn profile(&self) -> Result<Profile, ApiError> {
        Ok(self.get::<Profile>("profile").await?.data)
    }

    pub async fn update_profile(&self, profile: &Profile) -> Result<Reply<Option<Profile>>, ApiError> {
        self.put("profile", profile).await
    }

    /// `PUT /profile/password`.
    pub async fn change_password(&self, current: &str, new: &str) -> Result<Reply<Value>, ApiError> {
        self.put(
            "profile/password",
            &PasswordChange { current_password: current, new_password: new },
        )
        .await
    }

    pub async fn dues(&self) -> Result<Vec<DueRecord>, ApiError> {
        self.resource::<DueRecord>().list().await
    }

    /// `POST /dues/{id}/payments`.
    pub async fn record_payment(&self, due_id: &str, payment: &Payment) -> Result<Reply<Option<DueRecord>>, ApiError> {
        self.post(&format!("dues/{}/payments", due_id), payment).await
    }
}
