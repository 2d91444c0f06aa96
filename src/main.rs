mod api;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    // No hardcoded fallback: a missing secret is a startup failure, not a
    // silently insecure server.
    env::var("JWT_SECRET").expect("JWT_SECRET must be set");

    log::info!("Starting User Portal Service...");
    log::info!("Database: {}", database_url);

    // Initialize MongoDB connection (also builds the unique indexes)
    let db = database::MongoDB::new(&database_url)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db.clone());

    log::info!("MongoDB connected successfully");

    // Uploaded photos land here and are served back at /uploads
    let upload_dir = utils::uploads::upload_dir();
    std::fs::create_dir_all(&upload_dir)?;

    log::info!("Server starting on {}:{}", host, port);
    log::info!("Swagger UI available at: http://{}:{}/swagger-ui/", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://localhost:5173")
            .allowed_origin("http://127.0.0.1:3000")
            .allowed_origin("http://127.0.0.1:5173")
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .supports_credentials()
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .wrap(cors)
            .wrap(middleware::SecurityHeaders)
            .wrap(Logger::default())
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            // Health check
            .route("/health", web::get().to(api::health::health_check))
            .service(
                web::scope("/api")
                    // Public: signup and login issue the token
                    .route("/signup", web::post().to(api::auth::signup))
                    .route("/login", web::post().to(api::auth::login))
                    // Protected: every data route requires a valid bearer token
                    .service(
                        web::scope("")
                            .wrap(middleware::auth::AuthMiddleware)
                            .route("/user", web::post().to(api::users::create_user))
                            .route("/users", web::get().to(api::users::list_users))
                            .route(
                                "/dashboard-user",
                                web::get().to(api::users::list_dashboard_users),
                            )
                            .route("/user/{id}", web::delete().to(api::users::delete_user)),
                    ),
            )
            // Uploaded photos
            .service(Files::new("/uploads", utils::uploads::upload_dir()))
            // Frontend views (signup/login/dashboard) - keep last, catch-all
            .service(Files::new("/", "static").index_file("signup.html"))
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
