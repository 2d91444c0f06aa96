use crate::database::MongoDB;
use crate::models::{AuthResponse, LoginRequest, SignupForm};
use crate::services::auth_service;
use crate::utils::error::AppError;
use crate::utils::uploads;
use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse, ResponseError};
use futures::{StreamExt, TryStreamExt};

async fn read_text_field(field: &mut Field) -> Result<String, AppError> {
    let mut bytes: Vec<u8> = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk =
            chunk.map_err(|e| AppError::Validation(format!("Malformed form field: {}", e)))?;
        bytes.extend_from_slice(&chunk);
    }
    String::from_utf8(bytes)
        .map_err(|_| AppError::Validation("Form field is not valid UTF-8".to_string()))
}

/// Walks the multipart stream, collecting text fields and persisting the
/// photo (if any) as a side effect. Field names mirror the signup form.
async fn parse_signup_form(mut payload: Multipart) -> Result<SignupForm, AppError> {
    let mut form = SignupForm::default();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart request: {}", e)))?
    {
        let field_name = field.name().to_string();
        match field_name.as_str() {
            "name" => form.name = read_text_field(&mut field).await?,
            "phone" => form.phone = read_text_field(&mut field).await?,
            "email" => form.email = read_text_field(&mut field).await?,
            "password" => form.password = read_text_field(&mut field).await?,
            "photo" => form.photo = uploads::save_photo(&mut field).await?,
            other => {
                log::debug!("Ignoring unknown signup field: {}", other);
                while let Some(chunk) = field.next().await {
                    chunk.map_err(|e| {
                        AppError::Validation(format!("Malformed form field: {}", e))
                    })?;
                }
            }
        }
    }

    Ok(form)
}

/// Multipart form fields: name, phone, email, password, optional photo file.
#[utoipa::path(
    post,
    path = "/api/signup",
    tag = "Auth",
    responses(
        (status = 201, description = "Signup successful", body = AuthResponse),
        (status = 400, description = "Missing field or user already exists"),
        (status = 500, description = "Persistence error")
    )
)]
pub async fn signup(db: web::Data<MongoDB>, payload: Multipart) -> HttpResponse {
    log::info!("POST /api/signup");

    let form = match parse_signup_form(payload).await {
        Ok(form) => form,
        Err(e) => {
            log::warn!("Signup form rejected: {}", e);
            return e.error_response();
        }
    };

    match auth_service::signup(&db, &form).await {
        Ok(response) => {
            log::info!("Signup successful: {}", form.email);
            HttpResponse::Created().json(response)
        }
        Err(e) => {
            log::warn!("Signup failed: {} - {}", form.email, e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Invalid credentials")
    )
)]
pub async fn login(db: web::Data<MongoDB>, request: web::Json<LoginRequest>) -> HttpResponse {
    log::info!("POST /api/login - email: {}", request.email);

    match auth_service::login(&db, &request).await {
        Ok(response) => {
            log::info!("Login successful: {}", request.email);
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::warn!("Login failed: {} - {}", request.email, e);
            e.error_response()
        }
    }
}
