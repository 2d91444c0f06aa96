use crate::database::{MongoDB, DASHBOARD_COLLECTION, USERS_COLLECTION};
use crate::models::{
    CreateEntryRequest, DashboardEntry, DashboardEntryResponse, User, UserResponse,
};
use crate::utils::error::AppError;
use crate::utils::validate::require_fields;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime};

// List all user records (password hashes stay server-side, see UserResponse)
pub async fn list_users(db: &MongoDB) -> Result<Vec<UserResponse>, AppError> {
    let collection = db.collection::<User>(USERS_COLLECTION);

    let users: Vec<User> = collection.find(doc! {}).await?.try_collect().await?;

    Ok(users.into_iter().map(UserResponse::from).collect())
}

// Delete a user record by id
pub async fn delete_user(db: &MongoDB, id: &str) -> Result<(), AppError> {
    let oid = ObjectId::parse_str(id)
        .map_err(|_| AppError::Validation(format!("Invalid user id: {}", id)))?;

    let collection = db.collection::<User>(USERS_COLLECTION);

    let result = collection.delete_one(doc! { "_id": oid }).await?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    Ok(())
}

// Create a dashboard contact entry
pub async fn create_entry(
    db: &MongoDB,
    request: &CreateEntryRequest,
) -> Result<DashboardEntryResponse, AppError> {
    require_fields(&[
        ("name", &request.name),
        ("email", &request.email),
        ("phone", &request.phone),
    ])?;

    let collection = db.collection::<DashboardEntry>(DASHBOARD_COLLECTION);

    let now = BsonDateTime::now();
    let entry = DashboardEntry {
        id: Some(ObjectId::new()),
        name: request.name.clone(),
        phone: request.phone.clone(),
        email: request.email.clone(),
        created_at: now,
        updated_at: now,
    };

    // Duplicate email/phone surfaces here as an E11000 unique-index
    // violation, mapped to a 400 by AppError.
    collection.insert_one(&entry).await?;

    Ok(DashboardEntryResponse::from(entry))
}

// List all dashboard contact entries
pub async fn list_entries(db: &MongoDB) -> Result<Vec<DashboardEntryResponse>, AppError> {
    let collection = db.collection::<DashboardEntry>(DASHBOARD_COLLECTION);

    let entries: Vec<DashboardEntry> = collection.find(doc! {}).await?.try_collect().await?;

    Ok(entries
        .into_iter()
        .map(DashboardEntryResponse::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SignupForm;
    use crate::services::auth_service;

    async fn test_db() -> MongoDB {
        dotenv::dotenv().ok();
        std::env::set_var("JWT_SECRET", "test-secret");
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/user_portal_test".to_string());
        MongoDB::new(&uri).await.expect("MongoDB must be running")
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn signup_login_list_delete_flow() {
        let db = test_db().await;

        let suffix = ObjectId::new().to_hex();
        let email = format!("flow-{}@example.com", suffix);
        let phone = format!("99{}", &suffix[..10]);

        let form = SignupForm {
            name: "Flow Test".into(),
            phone: phone.clone(),
            email: email.clone(),
            password: "pw".into(),
            photo: None,
        };

        let signup = auth_service::signup(&db, &form).await.unwrap();
        assert!(signup.success);
        assert!(!signup.token.is_empty());

        // Reusing the email must be rejected with no new record.
        let before = list_users(&db).await.unwrap().len();
        let dup = auth_service::signup(&db, &form).await;
        assert!(matches!(dup, Err(AppError::Duplicate(_))));
        assert_eq!(list_users(&db).await.unwrap().len(), before);

        // Login with the same credentials succeeds; the stored record
        // never carries the plaintext password.
        let login = auth_service::login(
            &db,
            &crate::models::LoginRequest {
                email: email.clone(),
                password: "pw".into(),
            },
        )
        .await
        .unwrap();
        assert!(login.success);

        let listed = list_users(&db).await.unwrap();
        let record = listed.iter().find(|u| u.email == email).unwrap();
        let json = serde_json::to_string(record).unwrap();
        assert!(!json.contains("\"pw\""));

        delete_user(&db, &record.id).await.unwrap();
        assert!(matches!(
            delete_user(&db, &record.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn dashboard_entry_create_and_list() {
        let db = test_db().await;

        let suffix = ObjectId::new().to_hex();
        let request = CreateEntryRequest {
            name: "Contact".into(),
            email: format!("contact-{}@example.com", suffix),
            phone: format!("88{}", &suffix[..10]),
        };

        let created = create_entry(&db, &request).await.unwrap();
        assert!(!created.id.is_empty());

        let entries = list_entries(&db).await.unwrap();
        assert!(entries.iter().any(|e| e.id == created.id));

        // Same phone/email again violates the unique index.
        let dup = create_entry(&db, &request).await;
        assert!(matches!(dup, Err(AppError::Duplicate(_))));
    }
}
