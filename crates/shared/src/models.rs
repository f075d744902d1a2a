//! Data models for the WAY studio REST API.
//!
//! Every endpoint wraps its payload in the `{success, message, data}`
//! envelope; non-2xx responses reuse the same shape with `message` carrying
//! the error text. Identifiers are server-assigned and opaque to the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard response envelope used by every API endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

// --- Accounts ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

/// `{user, token}` payload returned by login and register.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SendVerificationRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PasswordResetRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerifyResetCodeRequest {
    pub email: String,
    pub code: String,
}

/// `{resetToken}` payload returned by the reset-code verification step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResetTokenPayload {
    pub reset_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub reset_token: String,
    pub password: String,
    pub confirm_password: String,
}

// --- Schedules & sessions ---

/// A single dated occurrence of a schedule. Read-only to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(rename = "_id")]
    pub id: String,
    pub start_date: DateTime<Utc>,
    /// Per-session capacity override; zero means "use the reported total".
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub time: Option<String>,
}

/// A bookable class/offering with one or more sessions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    /// Rich-text description (HTML fragment).
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub images: Vec<String>,
}

// --- Registrations ---

/// Lifecycle of a registration: pending until an admin approves or rejects.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Rejected,
}

/// The populated `scheduleId` reference inside a registration record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleRef {
    #[serde(rename = "_id")]
    pub id: String,
}

/// One registration as reported by `/registrations/my-registrations`.
///
/// The schedule reference and session id can be absent when the underlying
/// schedule or session was deleted server-side; such records are skipped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    #[serde(rename = "scheduleId", default)]
    pub schedule: Option<ScheduleRef>,
    #[serde(default)]
    pub session_id: Option<String>,
    pub status: RegistrationStatus,
    /// Legacy field kept for backend compatibility; not shown in the UI.
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MyRegistrations {
    #[serde(default)]
    pub registrations: Vec<RegistrationRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSessionRequest {
    pub schedule_id: String,
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FullClassRequest {
    pub schedule_id: String,
    pub session_id: String,
    pub message: String,
}

// --- Capacity ---

/// Per-session paid/total counts from the capacity endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionCapacityEntry {
    pub session_id: String,
    #[serde(default)]
    pub paid: u32,
    #[serde(default)]
    pub total_capacity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CapacityReport {
    #[serde(default)]
    pub sessions: Vec<SessionCapacityEntry>,
}

// --- Events ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    /// Rich-text body (HTML fragment).
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    pub event_id: String,
    pub event_title: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

// --- Shop ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductCategory {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRequest {
    /// Product id the request is about.
    pub product: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_record_tolerates_missing_references() {
        let raw = r#"{
            "scheduleId": null,
            "status": "pending",
            "paymentStatus": "unpaid"
        }"#;
        let rec: RegistrationRecord = serde_json::from_str(raw).unwrap();
        assert!(rec.schedule.is_none());
        assert!(rec.session_id.is_none());
        assert_eq!(rec.status, RegistrationStatus::Pending);
    }

    #[test]
    fn registration_record_reads_populated_schedule() {
        let raw = r#"{
            "scheduleId": {"_id": "sch1", "title": "Wheel Throwing"},
            "sessionId": "ses9",
            "status": "rejected",
            "rejectionReason": "class moved"
        }"#;
        let rec: RegistrationRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(rec.schedule.unwrap().id, "sch1");
        assert_eq!(rec.session_id.as_deref(), Some("ses9"));
        assert_eq!(rec.rejection_reason.as_deref(), Some("class moved"));
    }

    #[test]
    fn envelope_round_trips_without_data() {
        let raw = r#"{"success": false, "message": "Invalid credentials"}"#;
        let resp: ApiResponse<AuthPayload> = serde_json::from_str(raw).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.message.as_deref(), Some("Invalid credentials"));
        assert!(resp.data.is_none());
    }

    #[test]
    fn schedule_defaults_empty_collections() {
        let raw = r#"{"_id": "s1", "title": "Glazing"}"#;
        let sch: Schedule = serde_json::from_str(raw).unwrap();
        assert!(sch.sessions.is_empty());
        assert!(sch.images.is_empty());
        assert_eq!(sch.price, 0.0);
    }
}
