use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sql_types;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of roles a user may hold. Role rows are seeded reference data;
/// nothing creates roles at runtime, so unknown names are rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleName {
    Mentor,
    Mentee,
    Student,
}

impl RoleName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Mentor => "mentor",
            RoleName::Mentee => "mentee",
            RoleName::Student => "student",
        }
    }

    pub fn parse(name: &str) -> Option<RoleName> {
        match name {
            "mentor" => Some(RoleName::Mentor),
            "mentee" => Some(RoleName::Mentee),
            "student" => Some(RoleName::Student),
            _ => None,
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requested role together with its optional supplementary profile payload.
/// Missing payloads are tolerated at signup; the profile row is simply skipped.
#[derive(Debug, Clone)]
pub enum RoleRequest {
    Mentor { specialization: Option<String> },
    Mentee { interests: Option<String> },
    Student { major: Option<String> },
}

impl RoleRequest {
    pub fn role(&self) -> RoleName {
        match self {
            RoleRequest::Mentor { .. } => RoleName::Mentor,
            RoleRequest::Mentee { .. } => RoleName::Mentee,
            RoleRequest::Student { .. } => RoleName::Student,
        }
    }
}

/// Booking lifecycle states. Enum membership is the only transition rule
/// enforced; any state may be set by an authorized actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    pub fn parse(status: &str) -> Option<BookingStatus> {
        match status {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "cancelled" => Some(BookingStatus::Cancelled),
            "completed" => Some(BookingStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Table rows

#[derive(Queryable, Serialize, Debug)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Queryable, Serialize, Debug)]
pub struct Role {
    pub id: i32,
    pub name: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::user_roles)]
pub struct NewUserRole {
    pub user_id: i32,
    pub role_id: i32,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::mentors)]
pub struct NewMentorProfile {
    pub user_id: i32,
    pub specialization: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::students)]
pub struct NewStudentProfile {
    pub user_id: i32,
    pub major: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::mentees)]
pub struct NewMenteeProfile {
    pub user_id: i32,
    pub interests: String,
}

#[derive(Queryable, Serialize, Debug)]
pub struct Session {
    pub id: i32,
    pub mentor_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub sap_module: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub price: Decimal,
    pub duration_minutes: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::sessions)]
pub struct NewSession {
    pub mentor_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub sap_module: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub price: Decimal,
    pub duration_minutes: Option<i32>,
}

#[derive(AsChangeset, Deserialize, Debug)]
#[diesel(table_name = crate::schema::sessions)]
pub struct SessionChangeset {
    pub title: Option<String>,
    pub description: Option<String>,
    pub sap_module: Option<String>,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub price: Option<Decimal>,
    pub duration_minutes: Option<i32>,
}

impl SessionChangeset {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.sap_module.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.price.is_none()
            && self.duration_minutes.is_none()
    }
}

#[derive(Queryable, Serialize, Debug)]
pub struct Booking {
    pub id: i32,
    pub session_id: i32,
    pub student_id: i32,
    pub status: String,
    pub payment_status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::bookings)]
pub struct NewBooking {
    pub session_id: i32,
    pub student_id: i32,
}

/// Booking row joined with its session and the display fields of both
/// counterpart users. Loaded via raw SQL because `users` appears twice.
#[derive(QueryableByName, Serialize, Debug)]
pub struct BookingView {
    #[diesel(sql_type = sql_types::Integer)]
    pub id: i32,
    #[diesel(sql_type = sql_types::Integer)]
    pub session_id: i32,
    #[diesel(sql_type = sql_types::Integer)]
    pub student_id: i32,
    #[diesel(sql_type = sql_types::Text)]
    pub status: String,
    #[diesel(sql_type = sql_types::Text)]
    pub payment_status: String,
    #[diesel(sql_type = sql_types::Text)]
    pub session_title: String,
    #[diesel(sql_type = sql_types::Nullable<sql_types::Text>)]
    pub session_description: Option<String>,
    #[diesel(sql_type = sql_types::Timestamp)]
    pub start_time: NaiveDateTime,
    #[diesel(sql_type = sql_types::Timestamp)]
    pub end_time: NaiveDateTime,
    #[diesel(sql_type = sql_types::Numeric)]
    pub price: Decimal,
    #[diesel(sql_type = sql_types::Integer)]
    pub mentor_id: i32,
    #[diesel(sql_type = sql_types::Text)]
    pub mentor_name: String,
    #[diesel(sql_type = sql_types::Text)]
    pub mentor_email: String,
    #[diesel(sql_type = sql_types::Text)]
    pub student_name: String,
    #[diesel(sql_type = sql_types::Text)]
    pub student_email: String,
}

// DTOs

#[derive(Deserialize, Debug)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub roles: Vec<String>,
    pub specialization: Option<String>,
    pub major: Option<String>,
    pub interests: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// User as returned from signup/signin; the role list reflects what was
/// actually persisted, never the request verbatim.
#[derive(Serialize, Debug)]
pub struct RegisteredUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub roles: Vec<RoleName>,
}

#[derive(Serialize, Debug)]
pub struct ProfileResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub roles: Vec<RoleName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interests: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct CreateSessionRequest {
    pub title: String,
    pub description: Option<String>,
    pub sap_module: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub price: Decimal,
    pub duration_minutes: Option<i32>,
}

#[derive(Deserialize, Debug)]
pub struct SessionFilter {
    pub sap_module: Option<String>,
    pub mentor_id: Option<i32>,
}

/// Session joined with its mentor's display fields.
#[derive(Serialize, Debug)]
pub struct SessionView {
    #[serde(flatten)]
    pub session: Session,
    pub mentor_name: String,
    pub mentor_email: String,
}

#[derive(Deserialize, Debug)]
pub struct CreateBookingRequest {
    #[serde(rename = "sessionId")]
    pub session_id: i32,
}

#[derive(Deserialize, Debug)]
pub struct BookingStatusRequest {
    pub status: String,
}

#[derive(Deserialize, Debug)]
pub struct BookingFilter {
    pub role: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
    pub user_id: i32,
    pub roles: Vec<RoleName>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_round_trip() {
        for role in [RoleName::Mentor, RoleName::Mentee, RoleName::Student] {
            assert_eq!(RoleName::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert_eq!(RoleName::parse("wizard"), None);
        assert_eq!(RoleName::parse("Mentor"), None);
        assert_eq!(RoleName::parse(""), None);
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&vec![RoleName::Mentor, RoleName::Student]).unwrap(),
            r#"["mentor","student"]"#
        );
    }

    #[test]
    fn booking_status_round_trip() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
            BookingStatus::Completed,
        ] {
            assert_eq!(BookingStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(BookingStatus::parse("refunded"), None);
    }

    #[test]
    fn role_request_exposes_its_role() {
        let req = RoleRequest::Mentor {
            specialization: Some("FICO".to_string()),
        };
        assert_eq!(req.role(), RoleName::Mentor);
        let req = RoleRequest::Student { major: None };
        assert_eq!(req.role(), RoleName::Student);
    }

    #[test]
    fn changeset_parses_exact_price() {
        use rust_decimal_macros::dec;
        let changeset: SessionChangeset =
            serde_json::from_str(r#"{"price": "49.99"}"#).unwrap();
        assert_eq!(changeset.price, Some(dec!(49.99)));
    }

    #[test]
    fn empty_changeset_is_detected() {
        let changeset: SessionChangeset = serde_json::from_str("{}").unwrap();
        assert!(changeset.is_empty());
        let changeset: SessionChangeset =
            serde_json::from_str(r#"{"title": "SAP MM Deep Dive"}"#).unwrap();
        assert!(!changeset.is_empty());
    }
}
