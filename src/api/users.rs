use crate::database::MongoDB;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{CreateEntryRequest, DashboardEntryResponse, MessageResponse, UserResponse};
use crate::services::user_service;
use actix_web::{web, HttpResponse, ResponseError};

#[utoipa::path(
    post,
    path = "/api/user",
    tag = "Users",
    request_body = CreateEntryRequest,
    responses(
        (status = 201, description = "Dashboard entry created", body = DashboardEntryResponse),
        (status = 400, description = "Missing field or duplicate email/phone"),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Persistence error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_user(
    db: web::Data<MongoDB>,
    request: web::Json<CreateEntryRequest>,
) -> HttpResponse {
    log::info!("POST /api/user - email: {}", request.email);

    match user_service::create_entry(&db, &request).await {
        Ok(entry) => {
            log::info!("Dashboard entry created: {}", entry.id);
            HttpResponse::Created().json(entry)
        }
        Err(e) => {
            log::warn!("Failed to create dashboard entry: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "All user records", body = [UserResponse]),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Persistence error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("GET /api/users");

    match user_service::list_users(&db).await {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(e) => {
            log::error!("Failed to fetch users: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/dashboard-user",
    tag = "Users",
    responses(
        (status = 200, description = "All dashboard entries", body = [DashboardEntryResponse]),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Persistence error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_dashboard_users(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("GET /api/dashboard-user");

    match user_service::list_entries(&db).await {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(e) => {
            log::error!("Failed to fetch dashboard entries: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/user/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User record id (ObjectId hex)")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Malformed id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No user with that id"),
        (status = 500, description = "Persistence error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    caller: web::ReqData<AuthenticatedUser>,
) -> HttpResponse {
    let id = path.into_inner();
    log::info!("DELETE /api/user/{} (by {})", id, caller.user_id);

    match user_service::delete_user(&db, &id).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            message: "User deleted successfully".to_string(),
        }),
        Err(e) => {
            log::warn!("Failed to delete user {}: {}", id, e);
            e.error_response()
        }
    }
}
