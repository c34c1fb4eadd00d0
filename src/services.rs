use crate::config::{AppConfig, DbPool};
use crate::errors::ApiError;
use crate::models::*;
use crate::schema::{bookings, mentees, mentors, roles, sessions, students, user_roles, users};
use actix_web::web;
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, NaiveDateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::Integer;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use log::{debug, error, info, warn};
use rust_decimal::Decimal;

pub struct AuthService;

impl AuthService {
    pub fn hash_password(password: &str) -> Result<String, ApiError> {
        hash(password, DEFAULT_COST).map_err(|e| {
            error!("Failed to hash password: {}", e);
            ApiError::InternalError("Failed to hash password".to_string())
        })
    }

    pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, ApiError> {
        verify(password, password_hash).map_err(|e| {
            error!("Failed to verify password: {}", e);
            ApiError::InternalError("Failed to verify password".to_string())
        })
    }

    pub fn generate_token(
        user_id: i32,
        user_roles: &[RoleName],
        config: &AppConfig,
    ) -> Result<String, ApiError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + Duration::hours(config.jwt_expiry)).timestamp() as usize,
            iat: now.timestamp() as usize,
            user_id,
            roles: user_roles.to_vec(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .map_err(|e| {
            error!("Failed to generate token: {}", e);
            ApiError::InternalError("Failed to generate token".to_string())
        })
    }

    pub fn decode_token(token: &str, config: &AppConfig) -> Result<Claims, ApiError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| {
            debug!("JWT verification failed: {}", e);
            ApiError::ForbiddenError("Invalid or expired token".to_string())
        })
    }
}

/// Turns the raw signup payload into typed role requests. Unknown role names
/// are rejected here, before anything touches storage; duplicates collapse.
pub(crate) fn parse_role_requests(req: &SignupRequest) -> Result<Vec<RoleRequest>, ApiError> {
    if req.roles.is_empty() {
        return Err(ApiError::ValidationError(
            "At least one role is required".to_string(),
        ));
    }

    let mut seen: Vec<RoleName> = Vec::new();
    let mut requests = Vec::new();
    for name in &req.roles {
        let role = RoleName::parse(name)
            .ok_or_else(|| ApiError::ValidationError(format!("Unknown role '{}'", name)))?;
        if seen.contains(&role) {
            continue;
        }
        seen.push(role);
        requests.push(match role {
            RoleName::Mentor => RoleRequest::Mentor {
                specialization: req.specialization.clone(),
            },
            RoleName::Mentee => RoleRequest::Mentee {
                interests: req.interests.clone(),
            },
            RoleName::Student => RoleRequest::Student {
                major: req.major.clone(),
            },
        });
    }
    Ok(requests)
}

fn persisted_role_names(conn: &mut PgConnection, user_id: i32) -> Result<Vec<RoleName>, ApiError> {
    let names = user_roles::table
        .inner_join(roles::table)
        .filter(user_roles::user_id.eq(user_id))
        .select(roles::name)
        .load::<String>(conn)?;

    Ok(names
        .iter()
        .filter_map(|name| {
            let parsed = RoleName::parse(name);
            if parsed.is_none() {
                warn!("Ignoring unrecognized role '{}' for user {}", name, user_id);
            }
            parsed
        })
        .collect())
}

/// Creates the role-specific profile row when the supplementary payload was
/// supplied. A missing payload is logged and skipped, not rejected.
fn create_profile(
    conn: &mut PgConnection,
    user_id: i32,
    request: &RoleRequest,
) -> Result<(), ApiError> {
    match request {
        RoleRequest::Mentor {
            specialization: Some(specialization),
        } => {
            let exists = mentors::table
                .find(user_id)
                .select(mentors::user_id)
                .first::<i32>(conn)
                .optional()?;
            if exists.is_none() {
                diesel::insert_into(mentors::table)
                    .values(&NewMentorProfile {
                        user_id,
                        specialization: specialization.clone(),
                    })
                    .execute(conn)?;
            } else {
                warn!("Mentor profile for user {} already exists. Skipping.", user_id);
            }
        }
        RoleRequest::Mentor { specialization: None } => {
            warn!("No specialization supplied for user {}; skipping mentor profile", user_id);
        }
        RoleRequest::Student { major: Some(major) } => {
            let exists = students::table
                .find(user_id)
                .select(students::user_id)
                .first::<i32>(conn)
                .optional()?;
            if exists.is_none() {
                diesel::insert_into(students::table)
                    .values(&NewStudentProfile {
                        user_id,
                        major: major.clone(),
                    })
                    .execute(conn)?;
            } else {
                warn!("Student profile for user {} already exists. Skipping.", user_id);
            }
        }
        RoleRequest::Student { major: None } => {
            warn!("No major supplied for user {}; skipping student profile", user_id);
        }
        RoleRequest::Mentee {
            interests: Some(interests),
        } => {
            let exists = mentees::table
                .find(user_id)
                .select(mentees::user_id)
                .first::<i32>(conn)
                .optional()?;
            if exists.is_none() {
                diesel::insert_into(mentees::table)
                    .values(&NewMenteeProfile {
                        user_id,
                        interests: interests.clone(),
                    })
                    .execute(conn)?;
            } else {
                warn!("Mentee profile for user {} already exists. Skipping.", user_id);
            }
        }
        RoleRequest::Mentee { interests: None } => {
            warn!("No interests supplied for user {}; skipping mentee profile", user_id);
        }
    }
    Ok(())
}

/// The registration unit of work: user row, profile rows and role links all
/// commit together or not at all. Runs on an already-checked-out connection
/// inside `web::block`.
fn register_in_transaction(
    conn: &mut PgConnection,
    new_user: NewUser,
    role_requests: &[RoleRequest],
) -> Result<RegisteredUser, ApiError> {
    // Pre-check for a friendlier message; the unique constraint on email
    // stays authoritative under concurrent signups
    let existing = users::table
        .filter(users::email.eq(&new_user.email))
        .select(users::id)
        .first::<i32>(conn)
        .optional()?;
    if existing.is_some() {
        return Err(ApiError::ConflictError("Email already registered".to_string()));
    }

    conn.transaction::<RegisteredUser, ApiError, _>(|conn| {
        let user_id = diesel::insert_into(users::table)
            .values(&new_user)
            .returning(users::id)
            .get_result::<i32>(conn)?;

        for request in role_requests {
            // Roles are seeded reference data; a missing row aborts the
            // whole transaction
            let role_id = roles::table
                .filter(roles::name.eq(request.role().as_str()))
                .select(roles::id)
                .first::<i32>(conn)
                .optional()?
                .ok_or_else(|| {
                    ApiError::NotFoundError(format!("Role '{}' not found", request.role()))
                })?;

            create_profile(conn, user_id, request)?;

            diesel::insert_into(user_roles::table)
                .values(&NewUserRole { user_id, role_id })
                .on_conflict((user_roles::user_id, user_roles::role_id))
                .do_nothing()
                .execute(conn)?;
        }

        // Report what was actually persisted, not the request list
        let persisted = persisted_role_names(conn, user_id)?;

        Ok(RegisteredUser {
            id: user_id,
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            roles: persisted,
        })
    })
}

pub struct UserService;

impl UserService {
    pub async fn register(req: SignupRequest, pool: &DbPool) -> Result<RegisteredUser, ApiError> {
        if req.name.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
            return Err(ApiError::ValidationError(
                "name, email and password are required".to_string(),
            ));
        }
        let role_requests = parse_role_requests(&req)?;
        let password_hash = AuthService::hash_password(&req.password)?;

        let new_user = NewUser {
            name: req.name,
            email: req.email,
            password_hash,
        };

        let conn = pool.get()?;
        let registered = web::block(move || {
            let mut conn = conn;
            register_in_transaction(&mut conn, new_user, &role_requests)
        })
        .await??;

        info!(
            "User {} registered with roles {:?}",
            registered.email, registered.roles
        );
        Ok(registered)
    }

    pub async fn find_by_email(email_addr: &str, pool: &DbPool) -> Result<Option<User>, ApiError> {
        let email_copy = email_addr.to_string();
        let conn = pool.get()?;

        let user = web::block(move || {
            let mut conn = conn;
            users::table
                .filter(users::email.eq(email_copy))
                .first::<User>(&mut conn)
                .optional()
        })
        .await??;

        Ok(user)
    }

    pub async fn get_user_roles(user_id: i32, pool: &DbPool) -> Result<Vec<RoleName>, ApiError> {
        let conn = pool.get()?;
        let role_names = web::block(move || {
            let mut conn = conn;
            persisted_role_names(&mut conn, user_id)
        })
        .await??;
        Ok(role_names)
    }

    pub async fn get_profile(user_id: i32, pool: &DbPool) -> Result<ProfileResponse, ApiError> {
        let conn = pool.get()?;
        let profile = web::block(move || -> Result<ProfileResponse, ApiError> {
            let mut conn = conn;
            let user = users::table
                .find(user_id)
                .first::<User>(&mut conn)
                .optional()?
                .ok_or_else(|| ApiError::NotFoundError("User not found".to_string()))?;

            let user_role_names = persisted_role_names(&mut conn, user_id)?;

            let specialization = mentors::table
                .find(user_id)
                .select(mentors::specialization)
                .first::<String>(&mut conn)
                .optional()?;
            let major = students::table
                .find(user_id)
                .select(students::major)
                .first::<String>(&mut conn)
                .optional()?;
            let interests = mentees::table
                .find(user_id)
                .select(mentees::interests)
                .first::<String>(&mut conn)
                .optional()?;

            Ok(ProfileResponse {
                id: user.id,
                name: user.name,
                email: user.email,
                roles: user_role_names,
                specialization,
                major,
                interests,
            })
        })
        .await??;
        Ok(profile)
    }
}

pub struct SessionService;

impl SessionService {
    pub async fn create(
        mentor_id: i32,
        req: CreateSessionRequest,
        pool: &DbPool,
    ) -> Result<i32, ApiError> {
        if req.title.trim().is_empty() || req.sap_module.trim().is_empty() {
            return Err(ApiError::ValidationError(
                "title and sap_module are required".to_string(),
            ));
        }
        if req.end_time <= req.start_time {
            return Err(ApiError::ValidationError(
                "end_time must be after start_time".to_string(),
            ));
        }
        if req.price < Decimal::ZERO {
            return Err(ApiError::ValidationError("price cannot be negative".to_string()));
        }

        let new_session = NewSession {
            mentor_id,
            title: req.title,
            description: req.description,
            sap_module: req.sap_module,
            start_time: req.start_time,
            end_time: req.end_time,
            price: req.price,
            duration_minutes: req.duration_minutes,
        };

        let conn = pool.get()?;
        let session_id = web::block(move || {
            let mut conn = conn;
            diesel::insert_into(sessions::table)
                .values(&new_session)
                .returning(sessions::id)
                .get_result::<i32>(&mut conn)
        })
        .await??;

        info!("Mentor {} created session {}", mentor_id, session_id);
        Ok(session_id)
    }

    pub async fn list(filter: SessionFilter, pool: &DbPool) -> Result<Vec<SessionView>, ApiError> {
        let conn = pool.get()?;
        let rows = web::block(move || {
            let mut conn = conn;
            let mut query = sessions::table
                .inner_join(users::table)
                .select((sessions::all_columns, users::name, users::email))
                .order(sessions::start_time.asc())
                .into_boxed();

            if let Some(module) = filter.sap_module {
                query = query.filter(sessions::sap_module.eq(module));
            }
            if let Some(mentor) = filter.mentor_id {
                query = query.filter(sessions::mentor_id.eq(mentor));
            }

            query.load::<(Session, String, String)>(&mut conn)
        })
        .await??;

        Ok(rows
            .into_iter()
            .map(|(session, mentor_name, mentor_email)| SessionView {
                session,
                mentor_name,
                mentor_email,
            })
            .collect())
    }

    pub async fn get(session_id: i32, pool: &DbPool) -> Result<SessionView, ApiError> {
        let conn = pool.get()?;
        let row = web::block(move || {
            let mut conn = conn;
            sessions::table
                .inner_join(users::table)
                .filter(sessions::id.eq(session_id))
                .select((sessions::all_columns, users::name, users::email))
                .first::<(Session, String, String)>(&mut conn)
                .optional()
        })
        .await??;

        match row {
            Some((session, mentor_name, mentor_email)) => Ok(SessionView {
                session,
                mentor_name,
                mentor_email,
            }),
            None => Err(ApiError::NotFoundError("Session not found".to_string())),
        }
    }

    pub async fn update(
        session_id: i32,
        actor_id: i32,
        changes: SessionChangeset,
        pool: &DbPool,
    ) -> Result<(), ApiError> {
        if changes.is_empty() {
            return Err(ApiError::ValidationError("No fields to update".to_string()));
        }

        let conn = pool.get()?;
        web::block(move || -> Result<(), ApiError> {
            let mut conn = conn;
            check_session_ownership(&mut conn, session_id, actor_id)?;
            diesel::update(sessions::table.find(session_id))
                .set(&changes)
                .execute(&mut conn)?;
            Ok(())
        })
        .await??;

        info!("Mentor {} updated session {}", actor_id, session_id);
        Ok(())
    }

    pub async fn delete(session_id: i32, actor_id: i32, pool: &DbPool) -> Result<(), ApiError> {
        let conn = pool.get()?;
        web::block(move || -> Result<(), ApiError> {
            let mut conn = conn;
            check_session_ownership(&mut conn, session_id, actor_id)?;
            diesel::delete(sessions::table.find(session_id)).execute(&mut conn)?;
            Ok(())
        })
        .await??;

        info!("Mentor {} deleted session {}", actor_id, session_id);
        Ok(())
    }
}

/// Existence is checked before ownership so an absent session is a 404 and a
/// session owned by someone else is a 403.
fn check_session_ownership(
    conn: &mut PgConnection,
    session_id: i32,
    actor_id: i32,
) -> Result<(), ApiError> {
    let owner = sessions::table
        .find(session_id)
        .select(sessions::mentor_id)
        .first::<i32>(conn)
        .optional()?
        .ok_or_else(|| ApiError::NotFoundError("Session not found".to_string()))?;

    if owner != actor_id {
        return Err(ApiError::ForbiddenError(
            "You do not own this session".to_string(),
        ));
    }
    Ok(())
}

/// A booking must target a live session that the actor does not mentor.
pub(crate) fn validate_booking_target(
    mentor_id: i32,
    end_time: NaiveDateTime,
    student_id: i32,
    now: NaiveDateTime,
) -> Result<(), ApiError> {
    if end_time < now {
        return Err(ApiError::ValidationError(
            "Cannot book a session that has already ended".to_string(),
        ));
    }
    if mentor_id == student_id {
        return Err(ApiError::ValidationError(
            "You cannot book your own mentorship session".to_string(),
        ));
    }
    Ok(())
}

/// The session's mentor may set any status; the booking's student may only
/// cancel their own booking. Everyone else is refused.
pub(crate) fn can_update_status(
    actor_id: i32,
    mentor_id: i32,
    student_id: i32,
    status: BookingStatus,
) -> bool {
    if actor_id == mentor_id {
        return true;
    }
    actor_id == student_id && status == BookingStatus::Cancelled
}

const BOOKING_VIEW_SELECT: &str = "\
    SELECT b.id, b.session_id, b.student_id, b.status, b.payment_status, \
           s.title AS session_title, s.description AS session_description, \
           s.start_time, s.end_time, s.price, \
           m.id AS mentor_id, m.name AS mentor_name, m.email AS mentor_email, \
           st.name AS student_name, st.email AS student_email \
    FROM bookings b \
    JOIN sessions s ON b.session_id = s.id \
    JOIN users m ON s.mentor_id = m.id \
    JOIN users st ON b.student_id = st.id";

pub struct BookingService;

impl BookingService {
    pub async fn create(student_id: i32, session_id: i32, pool: &DbPool) -> Result<i32, ApiError> {
        let conn = pool.get()?;
        let booking_id = web::block(move || -> Result<i32, ApiError> {
            let mut conn = conn;
            let (mentor_id, end_time) = sessions::table
                .find(session_id)
                .select((sessions::mentor_id, sessions::end_time))
                .first::<(i32, NaiveDateTime)>(&mut conn)
                .optional()?
                .ok_or_else(|| ApiError::NotFoundError("Session not found".to_string()))?;

            validate_booking_target(mentor_id, end_time, student_id, Utc::now().naive_utc())?;

            // The unique constraint on (session_id, student_id) is the
            // linearization point under concurrent booking attempts
            let booking_id = diesel::insert_into(bookings::table)
                .values(&NewBooking {
                    session_id,
                    student_id,
                })
                .returning(bookings::id)
                .get_result::<i32>(&mut conn)
                .map_err(|e| match e {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ApiError::ConflictError(
                            "This session has already been booked by this student".to_string(),
                        )
                    }
                    other => ApiError::from(other),
                })?;
            Ok(booking_id)
        })
        .await??;

        info!(
            "Student {} booked session {} (booking {})",
            student_id, session_id, booking_id
        );
        Ok(booking_id)
    }

    pub async fn update_status(
        booking_id: i32,
        actor_id: i32,
        status: &str,
        pool: &DbPool,
    ) -> Result<(), ApiError> {
        let status = BookingStatus::parse(status).ok_or_else(|| {
            ApiError::ValidationError(format!("Invalid booking status '{}'", status))
        })?;

        let conn = pool.get()?;
        web::block(move || -> Result<(), ApiError> {
            let mut conn = conn;
            let (booking, mentor_id) = bookings::table
                .inner_join(sessions::table)
                .filter(bookings::id.eq(booking_id))
                .select((bookings::all_columns, sessions::mentor_id))
                .first::<(Booking, i32)>(&mut conn)
                .optional()?
                .ok_or_else(|| ApiError::NotFoundError("Booking not found".to_string()))?;

            if !can_update_status(actor_id, mentor_id, booking.student_id, status) {
                return Err(ApiError::ForbiddenError(
                    "You do not have permission to update this booking status".to_string(),
                ));
            }

            diesel::update(bookings::table.find(booking_id))
                .set(bookings::status.eq(status.as_str()))
                .execute(&mut conn)?;
            Ok(())
        })
        .await??;

        info!("User {} set booking {} to {}", actor_id, booking_id, status);
        Ok(())
    }

    /// Bookings where the caller is either side, joined with session and
    /// counterpart display fields. Raw SQL because `users` appears twice.
    pub async fn list_for_user(
        user_id: i32,
        role_filter: Option<String>,
        pool: &DbPool,
    ) -> Result<Vec<BookingView>, ApiError> {
        let where_clause = match role_filter.as_deref() {
            Some("student") => "b.student_id = $1",
            Some("mentor") => "s.mentor_id = $1",
            None => "(b.student_id = $1 OR s.mentor_id = $1)",
            Some(other) => {
                return Err(ApiError::ValidationError(format!(
                    "role filter must be 'student' or 'mentor', got '{}'",
                    other
                )))
            }
        };
        let sql = format!(
            "{} WHERE {} ORDER BY s.start_time DESC",
            BOOKING_VIEW_SELECT, where_clause
        );

        let conn = pool.get()?;
        let rows = web::block(move || {
            let mut conn = conn;
            diesel::sql_query(sql)
                .bind::<Integer, _>(user_id)
                .load::<BookingView>(&mut conn)
        })
        .await??;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn signup(roles: &[&str]) -> SignupRequest {
        SignupRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "hunter2!".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            specialization: Some("FICO".to_string()),
            major: Some("Information Systems".to_string()),
            interests: None,
        }
    }

    fn test_config() -> AppConfig {
        AppConfig {
            jwt_secret: "test-secret".to_string(),
            jwt_expiry: 1,
        }
    }

    #[test]
    fn password_hash_verifies() {
        let digest = AuthService::hash_password("s3cret").unwrap();
        assert!(AuthService::verify_password("s3cret", &digest).unwrap());
        assert!(!AuthService::verify_password("wrong", &digest).unwrap());
    }

    #[test]
    fn token_round_trip_carries_id_and_roles() {
        let config = test_config();
        let token =
            AuthService::generate_token(7, &[RoleName::Mentor, RoleName::Student], &config)
                .unwrap();
        let claims = AuthService::decode_token(&token, &config).unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.roles, vec![RoleName::Mentor, RoleName::Student]);
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config();
        let now = Utc::now();
        let claims = Claims {
            sub: "7".to_string(),
            exp: (now - Duration::hours(2)).timestamp() as usize,
            iat: (now - Duration::hours(3)).timestamp() as usize,
            user_id: 7,
            roles: vec![RoleName::Student],
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            AuthService::decode_token(&token, &config),
            Err(ApiError::ForbiddenError(_))
        ));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let config = test_config();
        let other = AppConfig {
            jwt_secret: "other-secret".to_string(),
            jwt_expiry: 1,
        };
        let token = AuthService::generate_token(7, &[RoleName::Mentor], &other).unwrap();
        assert!(AuthService::decode_token(&token, &config).is_err());
    }

    #[test]
    fn unknown_role_name_is_rejected_before_storage() {
        let req = signup(&["wizard"]);
        assert!(matches!(
            parse_role_requests(&req),
            Err(ApiError::ValidationError(_))
        ));
    }

    #[test]
    fn empty_role_list_is_rejected() {
        let req = signup(&[]);
        assert!(matches!(
            parse_role_requests(&req),
            Err(ApiError::ValidationError(_))
        ));
    }

    #[test]
    fn duplicate_roles_collapse() {
        let req = signup(&["mentor", "mentor", "student"]);
        let requests = parse_role_requests(&req).unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].role(), RoleName::Mentor);
        assert_eq!(requests[1].role(), RoleName::Student);
    }

    #[test]
    fn supplementary_payload_follows_its_role() {
        let req = signup(&["mentor", "mentee"]);
        let requests = parse_role_requests(&req).unwrap();
        match &requests[0] {
            RoleRequest::Mentor { specialization } => {
                assert_eq!(specialization.as_deref(), Some("FICO"))
            }
            other => panic!("expected mentor request, got {:?}", other),
        }
        // Interests were not supplied, so the mentee payload is empty
        match &requests[1] {
            RoleRequest::Mentee { interests } => assert!(interests.is_none()),
            other => panic!("expected mentee request, got {:?}", other),
        }
    }

    fn t(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn booking_an_ended_session_is_rejected() {
        let result = validate_booking_target(1, t(10), 2, t(11));
        assert!(matches!(result, Err(ApiError::ValidationError(_))));
    }

    #[test]
    fn booking_own_session_is_rejected_even_when_live() {
        let result = validate_booking_target(2, t(12), 2, t(10));
        assert!(matches!(result, Err(ApiError::ValidationError(_))));
    }

    #[test]
    fn booking_a_live_session_by_another_user_is_allowed() {
        assert!(validate_booking_target(1, t(12), 2, t(10)).is_ok());
    }

    #[test]
    fn mentor_may_set_any_status() {
        let mentor = 1;
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
            BookingStatus::Completed,
        ] {
            assert!(can_update_status(mentor, mentor, 2, status));
        }
    }

    #[test]
    fn student_may_only_cancel_their_own_booking() {
        let student = 2;
        assert!(can_update_status(student, 1, student, BookingStatus::Cancelled));
        assert!(!can_update_status(student, 1, student, BookingStatus::Confirmed));
        assert!(!can_update_status(student, 1, student, BookingStatus::Completed));
        assert!(!can_update_status(student, 1, student, BookingStatus::Pending));
    }

    #[test]
    fn strangers_may_not_touch_a_booking() {
        assert!(!can_update_status(3, 1, 2, BookingStatus::Cancelled));
        assert!(!can_update_status(3, 1, 2, BookingStatus::Confirmed));
    }
}
