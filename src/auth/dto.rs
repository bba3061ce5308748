use serde::{Deserialize, Serialize};

use crate::store::User;

/// Request body for signup.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after signup or login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Public part of the user returned to the client. The password hash never
/// crosses this boundary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: u64,
    pub full_name: String,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_serializes_camel_case() {
        let user = PublicUser {
            id: 1,
            full_name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "fullName": "Ada Lovelace",
                "email": "ada@example.com"
            })
        );
    }

    #[test]
    fn signup_request_reads_camel_case() {
        let req: SignupRequest = serde_json::from_str(
            r#"{"fullName":"Ada Lovelace","email":"ada@example.com","password":"s3cret!"}"#,
        )
        .unwrap();
        assert_eq!(req.full_name, "Ada Lovelace");
        assert_eq!(req.email, "ada@example.com");
    }
}
