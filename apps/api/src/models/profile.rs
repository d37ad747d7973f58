use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "sex", rename_all = "lowercase")]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "marital_status", rename_all = "lowercase")]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

/// The single CV owner record. Every other entity hangs off one of these;
/// the site assumes exactly one row exists (see `store::first_profile`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub first_names: String,
    pub last_names: String,
    pub nationality: String,
    pub birthplace: String,
    pub birth_date: NaiveDate,
    pub national_id: String,
    pub sex: Sex,
    pub marital_status: MaritalStatus,
    pub drivers_license: bool,
    pub phone: String,
    pub email: String,
    pub website: Option<String>,
    pub home_address: String,
    pub work_address: Option<String>,
    pub profession: String,
    pub description: String,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Candidate profile as submitted by the admin collaborator, before
/// validation and persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub first_names: String,
    pub last_names: String,
    pub nationality: String,
    pub birthplace: String,
    pub birth_date: NaiveDate,
    pub national_id: String,
    pub sex: Sex,
    pub marital_status: MaritalStatus,
    pub drivers_license: bool,
    pub phone: String,
    pub email: String,
    pub website: Option<String>,
    pub home_address: String,
    pub work_address: Option<String>,
    pub profession: String,
    pub description: String,
    pub photo_url: Option<String>,
}
