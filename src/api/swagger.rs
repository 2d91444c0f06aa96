use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Portal Service API",
        version = "1.0.0",
        description = "User-management backend: signup/login backed by MongoDB, user record listing and deletion, and a password-less dashboard contact collection.\n\n**Authentication:** data endpoints require a JWT Bearer token obtained from signup or login."
    ),
    paths(
        // Auth endpoints
        crate::api::auth::signup,
        crate::api::auth::login,

        // User management
        crate::api::users::create_user,
        crate::api::users::list_users,
        crate::api::users::list_dashboard_users,
        crate::api::users::delete_user,

        // Health
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::models::LoginRequest,
            crate::models::AuthResponse,
            crate::models::MessageResponse,
            crate::models::UserResponse,
            crate::models::CreateEntryRequest,
            crate::models::DashboardEntryResponse,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Signup (multipart form with optional photo) and login. Both return a 1-hour bearer token."),
        (name = "Users", description = "User record listing/deletion and dashboard contact entries. Requires a bearer token."),
        (name = "Health", description = "Health check endpoint for monitoring service status."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build(),
                ),
            );
        }
    }
}
