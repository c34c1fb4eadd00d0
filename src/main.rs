use actix_web::{delete, get, post, put, web, App, HttpResponse, HttpServer, Responder};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{self, ConnectionManager};
use diesel::Connection;
use log::{debug, error, info};
use serde_json::json;
use std::env;

use mentor_market::config::{AppConfig, DbPool, DB_INIT_SQL};
use mentor_market::errors::ApiError;
use mentor_market::logger::setup_logger;
use mentor_market::middleware::{AuthUser, RequestLogger};
use mentor_market::models::{
    BookingFilter, BookingStatusRequest, CreateBookingRequest, CreateSessionRequest,
    RegisteredUser, RoleName, SessionChangeset, SessionFilter, SigninRequest, SignupRequest,
};
use mentor_market::services::{AuthService, BookingService, SessionService, UserService};

#[get("/health")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[post("/signup")]
async fn signup(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
    body: web::Json<SignupRequest>,
) -> Result<HttpResponse, ApiError> {
    debug!("Signup request received for email: {}", body.email);
    let user = UserService::register(body.into_inner(), &pool).await?;
    let token = AuthService::generate_token(user.id, &user.roles, &config)?;

    Ok(HttpResponse::Created().json(json!({
        "message": "User created successfully",
        "token": token,
        "user": user
    })))
}

#[post("/signin")]
async fn signin(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
    body: web::Json<SigninRequest>,
) -> Result<HttpResponse, ApiError> {
    debug!("Signin attempt for: {}", body.email);

    // Same response for unknown email and bad password
    let user = match UserService::find_by_email(&body.email, &pool).await? {
        Some(user) => user,
        None => return Err(ApiError::AuthError("Invalid credentials".to_string())),
    };
    if !AuthService::verify_password(&body.password, &user.password_hash)? {
        return Err(ApiError::AuthError("Invalid credentials".to_string()));
    }

    let roles = UserService::get_user_roles(user.id, &pool).await?;
    let token = AuthService::generate_token(user.id, &roles, &config)?;

    info!("User {} signed in successfully", user.email);
    Ok(HttpResponse::Ok().json(json!({
        "message": "Signin successful",
        "token": token,
        "user": RegisteredUser {
            id: user.id,
            name: user.name,
            email: user.email,
            roles,
        }
    })))
}

#[post("/signout")]
async fn signout() -> impl Responder {
    // Tokens are stateless; the client discards its copy
    HttpResponse::Ok().json(json!({ "message": "Signout successful" }))
}

#[get("/me")]
async fn me(pool: web::Data<DbPool>, auth: AuthUser) -> Result<HttpResponse, ApiError> {
    let profile = UserService::get_profile(auth.id, &pool).await?;
    Ok(HttpResponse::Ok().json(json!({ "user": profile })))
}

#[post("/sessions")]
async fn create_session(
    pool: web::Data<DbPool>,
    auth: AuthUser,
    body: web::Json<CreateSessionRequest>,
) -> Result<HttpResponse, ApiError> {
    auth.require_role(RoleName::Mentor)?;
    let session_id = SessionService::create(auth.id, body.into_inner(), &pool).await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Session created successfully",
        "sessionId": session_id
    })))
}

#[get("/sessions")]
async fn list_sessions(
    pool: web::Data<DbPool>,
    query: web::Query<SessionFilter>,
) -> Result<HttpResponse, ApiError> {
    let sessions = SessionService::list(query.into_inner(), &pool).await?;
    Ok(HttpResponse::Ok().json(json!({ "sessions": sessions })))
}

#[get("/sessions/{session_id}")]
async fn get_session(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let session = SessionService::get(path.into_inner(), &pool).await?;
    Ok(HttpResponse::Ok().json(json!({ "session": session })))
}

#[put("/sessions/{session_id}")]
async fn update_session(
    pool: web::Data<DbPool>,
    auth: AuthUser,
    path: web::Path<i32>,
    body: web::Json<SessionChangeset>,
) -> Result<HttpResponse, ApiError> {
    auth.require_role(RoleName::Mentor)?;
    SessionService::update(path.into_inner(), auth.id, body.into_inner(), &pool).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Session updated successfully" })))
}

#[delete("/sessions/{session_id}")]
async fn delete_session(
    pool: web::Data<DbPool>,
    auth: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    auth.require_role(RoleName::Mentor)?;
    SessionService::delete(path.into_inner(), auth.id, &pool).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Session deleted successfully" })))
}

#[post("/bookings")]
async fn create_booking(
    pool: web::Data<DbPool>,
    auth: AuthUser,
    body: web::Json<CreateBookingRequest>,
) -> Result<HttpResponse, ApiError> {
    auth.require_role(RoleName::Student)?;
    let booking_id = BookingService::create(auth.id, body.session_id, &pool).await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Session booked successfully",
        "bookingId": booking_id
    })))
}

#[get("/my-bookings")]
async fn my_bookings(
    pool: web::Data<DbPool>,
    auth: AuthUser,
    query: web::Query<BookingFilter>,
) -> Result<HttpResponse, ApiError> {
    let bookings = BookingService::list_for_user(auth.id, query.into_inner().role, &pool).await?;
    Ok(HttpResponse::Ok().json(json!({ "bookings": bookings })))
}

#[put("/bookings/{booking_id}/status")]
async fn update_booking_status(
    pool: web::Data<DbPool>,
    auth: AuthUser,
    path: web::Path<i32>,
    body: web::Json<BookingStatusRequest>,
) -> Result<HttpResponse, ApiError> {
    BookingService::update_status(path.into_inner(), auth.id, &body.status, &pool).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Booking status updated successfully" })))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables and initialize logger
    dotenvy::dotenv().ok();
    setup_logger();

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .expect("PORT must be a number");

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    info!("Connecting to database");

    // Initialize database schema and seed roles
    let mut conn = PgConnection::establish(&db_url)
        .expect("Failed to establish connection for schema bootstrap");
    conn.batch_execute(DB_INIT_SQL)
        .expect("Failed to execute database initialization script");
    info!("Database initialization complete.");

    // Set up database connection pool
    let manager = ConnectionManager::<PgConnection>::new(db_url);
    let pool = r2d2::Pool::builder()
        .build(manager)
        .expect("Failed to create database connection pool");

    // Load and validate configuration
    let config = AppConfig::from_env();
    if let Err(e) = config.validate() {
        error!("Configuration validation error: {}", e);
        panic!("Invalid configuration: {}", e);
    }

    info!("Starting HTTP server at http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(RequestLogger)
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config.clone()))
            .service(web::scope("/api").service(health_check))
            .service(
                web::scope("/auth")
                    .service(signup)
                    .service(signin)
                    .service(signout)
                    .service(me),
            )
            .service(
                web::scope("/marketplace")
                    .service(list_sessions)
                    .service(get_session)
                    .service(create_session)
                    .service(update_session)
                    .service(delete_session)
                    .service(create_booking)
                    .service(my_bookings)
                    .service(update_booking_status),
            )
    })
    .workers(2)
    .keep_alive(std::time::Duration::from_secs(75))
    .shutdown_timeout(30)
    .bind((host, port))?
    .run()
    .await
}
