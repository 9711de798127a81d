use serde::{Deserialize, Serialize};

use crate::domain::NewUser;

/// Body of `POST /api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

impl From<&NewUser> for CreateUserRequest {
    fn from(value: &NewUser) -> Self {
        Self {
            name: value.name.clone(),
            email: value.email.clone(),
        }
    }
}

pub const USERS_PATH: &str = "/api/users";

pub fn user_path(id: crate::domain::UserId) -> String {
    format!("{USERS_PATH}/{id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;

    #[test]
    fn create_request_serializes_only_name_and_email() {
        let body = CreateUserRequest::from(&NewUser::new("A", "a@x.com"));
        assert_eq!(
            serde_json::to_value(&body).expect("json"),
            serde_json::json!({ "name": "A", "email": "a@x.com" })
        );
    }

    #[test]
    fn user_path_embeds_id() {
        assert_eq!(user_path(UserId(3)), "/api/users/3");
    }
}
