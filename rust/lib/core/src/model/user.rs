use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::CoreError;
use crate::lenient::{bool_lenient, id_lenient, int_code};
use crate::resource::{Resource, Searchable};

/// Role carried as `rid` (1..=5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    SuperAdmin,
    Admin,
    Manager,
    #[default]
    Staff,
    Viewer,
}

impl Role {
    pub fn rid(self) -> i64 {
        match self {
            Role::SuperAdmin => 1,
            Role::Admin => 2,
            Role::Manager => 3,
            Role::Staff => 4,
            Role::Viewer => 5,
        }
    }

    pub fn from_rid(rid: i64) -> Result<Self, CoreError> {
        match rid {
            1 => Ok(Role::SuperAdmin),
            2 => Ok(Role::Admin),
            3 => Ok(Role::Manager),
            4 => Ok(Role::Staff),
            5 => Ok(Role::Viewer),
            other => Err(CoreError::UnknownRole(other)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::Staff => "Staff",
            Role::Viewer => "Viewer",
        }
    }

    /// Roles allowed to manage other users.
    pub fn can_manage_users(self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(self.rid())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(d)?;
        let rid = int_code(&value)
            .ok_or_else(|| D::Error::custom(format!("invalid role id: {}", value)))?;
        Role::from_rid(rid).map_err(D::Error::custom)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "id_lenient", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub rid: Role,
    #[serde(default, deserialize_with = "bool_lenient")]
    pub blocked: bool,
    /// Only sent when creating a user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Resource for User {
    const COLLECTION: &'static str = "users";
    const LABEL: &'static str = "User";

    fn id(&self) -> &str {
        &self.id
    }

    fn clear_id(&mut self) {
        self.id.clear();
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.email, &self.mobile, &self.country]
    }
}

/// Editable fields of the signed-in user (`/profile`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, deserialize_with = "id_lenient", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub country: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_ids() {
        for rid in 1..=5 {
            assert_eq!(Role::from_rid(rid).unwrap().rid(), rid);
        }
        assert_eq!(Role::from_rid(0).unwrap_err(), CoreError::UnknownRole(0));
        assert_eq!(Role::from_rid(6).unwrap_err(), CoreError::UnknownRole(6));
    }

    #[test]
    fn only_admins_manage_users() {
        assert!(Role::SuperAdmin.can_manage_users());
        assert!(Role::Admin.can_manage_users());
        assert!(!Role::Manager.can_manage_users());
        assert!(!Role::Viewer.can_manage_users());
    }

    #[test]
    fn user_decodes_string_rid_and_numeric_flag() {
        let u: User = serde_json::from_str(
            r#"{"id":3,"name":"Asha","email":"asha@example.com","rid":"2","blocked":1}"#,
        )
        .unwrap();
        assert_eq!(u.rid, Role::Admin);
        assert!(u.blocked);
        assert_eq!(u.password, None);
    }

    #[test]
    fn unknown_rid_fails_to_decode() {
        assert!(serde_json::from_str::<User>(r#"{"name":"x","rid":9}"#).is_err());
    }

    #[test]
    fn password_only_serialized_when_set() {
        let mut u = User { name: "Asha".into(), ..Default::default() };
        let json = serde_json::to_value(&u).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["rid"], 4);
        u.password = Some("s3cret".into());
        let json = serde_json::to_value(&u).unwrap();
        assert_eq!(json["password"], "s3cret");
    }
}
