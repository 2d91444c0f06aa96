use crate::database::{MongoDB, USERS_COLLECTION};
use crate::models::{AuthResponse, LoginRequest, SignupForm, User};
use crate::utils::error::AppError;
use crate::utils::validate::require_fields;
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tokens are stateless and non-revocable; short expiry bounds the
/// damage of a leaked one.
pub const TOKEN_TTL_HOURS: i64 = 1;

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user id (ObjectId hex)
    pub iat: usize,  // issued at
    pub exp: usize,  // expiration
    pub jti: String, // JWT ID
}

/// Required at startup (main.rs verifies), so this cannot fail at
/// request time. There is deliberately no literal fallback.
pub fn get_jwt_secret() -> String {
    std::env::var("JWT_SECRET").expect("JWT_SECRET must be set")
}

pub fn hash_password(plaintext: &str) -> Result<String, AppError> {
    hash(plaintext, DEFAULT_COST)
        .map_err(|e| AppError::Database(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(plaintext: &str, hashed: &str) -> Result<bool, AppError> {
    verify(plaintext, hashed)
        .map_err(|e| AppError::Database(format!("Password verification error: {}", e)))
}

// Generate JWT token
pub fn generate_token(user_id: &str, secret: &str) -> Result<String, AppError> {
    let iat = Utc::now().timestamp() as usize;
    let exp = (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize;
    let jti = Uuid::new_v4().to_string();

    let claims = Claims {
        sub: user_id.to_string(),
        iat,
        exp,
        jti,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| AppError::Database(format!("Failed to generate token: {}", e)))
}

// Verify JWT token (signature + expiry)
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::InvalidToken(e.to_string()))
}

// User signup: validate -> duplicate check -> hash -> persist -> token
pub async fn signup(db: &MongoDB, form: &SignupForm) -> Result<AuthResponse, AppError> {
    require_fields(&[
        ("name", &form.name),
        ("phone", &form.phone),
        ("email", &form.email),
        ("password", &form.password),
    ])?;

    let collection = db.collection::<User>(USERS_COLLECTION);

    let filter = doc! {
        "$or": [
            { "email": &form.email },
            { "phone": &form.phone },
        ]
    };

    if collection.find_one(filter).await?.is_some() {
        return Err(AppError::Duplicate("User already exists".to_string()));
    }

    let hashed_password = hash_password(&form.password)?;

    let user_id = ObjectId::new();
    let now = BsonDateTime::now();

    let new_user = User {
        id: Some(user_id),
        name: form.name.clone(),
        phone: form.phone.clone(),
        email: form.email.clone(),
        password: hashed_password,
        photo: form.photo.clone(),
        created_at: now,
        updated_at: now,
    };

    // The unique indexes still catch the race where two signups with the
    // same email pass the find_one above.
    collection.insert_one(&new_user).await?;

    let token = generate_token(&user_id.to_hex(), &get_jwt_secret())?;

    log::info!("User registered successfully: {}", form.email);

    Ok(AuthResponse {
        success: true,
        token,
    })
}

// User login
pub async fn login(db: &MongoDB, request: &LoginRequest) -> Result<AuthResponse, AppError> {
    let collection = db.collection::<User>(USERS_COLLECTION);

    let filter = doc! { "email": &request.email };

    let user = collection
        .find_one(filter)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(&request.password, &user.password)? {
        return Err(AppError::InvalidCredentials);
    }

    let user_id = user.id.ok_or_else(|| {
        AppError::Database(format!("User {} has no _id", request.email))
    })?;

    let token = generate_token(&user_id.to_hex(), &get_jwt_secret())?;

    Ok(AuthResponse {
        success: true,
        token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn password_hash_round_trip() {
        let hashed = hash_password("pw").unwrap();
        assert_ne!(hashed, "pw");
        assert!(verify_password("pw", &hashed).unwrap());
        assert!(!verify_password("other", &hashed).unwrap());
    }

    #[test]
    fn token_round_trip() {
        let user_id = ObjectId::new().to_hex();
        let token = generate_token(&user_id, SECRET).unwrap();

        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, user_id);
        assert!(claims.exp > claims.iat);
        assert_eq!(
            claims.exp - claims.iat,
            (TOKEN_TTL_HOURS * 3600) as usize
        );
    }

    #[test]
    fn token_rejected_with_wrong_secret() {
        let token = generate_token("abc", SECRET).unwrap();
        let result = verify_token(&token, "another-secret");
        assert!(matches!(result, Err(AppError::InvalidToken(_))));
    }

    #[test]
    fn expired_token_rejected() {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "abc".to_string(),
            iat: now - 7200,
            exp: now - 3600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_ref()),
        )
        .unwrap();

        let result = verify_token(&token, SECRET);
        assert!(matches!(result, Err(AppError::InvalidToken(_))));
    }

    #[test]
    fn garbage_token_rejected() {
        assert!(matches!(
            verify_token("not-a-jwt", SECRET),
            Err(AppError::InvalidToken(_))
        ));
    }
}
