use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// Authenticatable user record (stored in the `users` collection).
/// `password` always holds the bcrypt hash, never the plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

/// Listing payload. The password hash never leaves the server.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub photo: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: user.name,
            phone: user.phone,
            email: user.email,
            photo: user.photo,
            created_at: user.created_at.timestamp_millis(),
            updated_at: user.updated_at.timestamp_millis(),
        }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Signup form fields, collected from the multipart request.
/// `photo` is the stored `/uploads/...` path, not the raw file.
#[derive(Debug, Default)]
pub struct SignupForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub photo: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_payload_excludes_password_hash() {
        let user = User {
            id: Some(ObjectId::new()),
            name: "A".into(),
            phone: "1".into(),
            email: "a@x.com".into(),
            password: "$2b$12$abcdefghijklmnopqrstuv".into(),
            photo: None,
            created_at: BsonDateTime::now(),
            updated_at: BsonDateTime::now(),
        };

        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("$2b$"));
        assert!(json.contains("a@x.com"));
    }

    #[test]
    fn response_id_is_objectid_hex() {
        let oid = ObjectId::new();
        let user = User {
            id: Some(oid),
            name: "A".into(),
            phone: "1".into(),
            email: "a@x.com".into(),
            password: "hash".into(),
            photo: Some("/uploads/123-me.png".into()),
            created_at: BsonDateTime::now(),
            updated_at: BsonDateTime::now(),
        };

        let response = UserResponse::from(user);
        assert_eq!(response.id, oid.to_hex());
        assert_eq!(response.photo.as_deref(), Some("/uploads/123-me.png"));
    }
}
