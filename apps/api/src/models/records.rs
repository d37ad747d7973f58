use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Child records of a profile. `profile_id` nullability differs per entity
// on purpose: education/experience/skills/references tolerate orphan rows,
// certificates and projects require an owner.

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EducationRow {
    pub id: Uuid,
    pub profile_id: Option<Uuid>,
    pub institution: String,
    pub degree: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationDraft {
    pub profile_id: Option<Uuid>,
    pub institution: String,
    pub degree: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExperienceRow {
    pub id: Uuid,
    pub profile_id: Option<Uuid>,
    pub company: String,
    pub role: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceDraft {
    pub profile_id: Option<Uuid>,
    pub company: String,
    pub role: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillRow {
    pub id: Uuid,
    pub profile_id: Option<Uuid>,
    pub name: String,
    /// Self-assessed proficiency, 1 to 10.
    pub level: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDraft {
    pub profile_id: Option<Uuid>,
    pub name: String,
    pub level: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CertificateRow {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub title: String,
    pub institution: String,
    pub date: NaiveDate,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateDraft {
    pub profile_id: Uuid,
    pub title: String,
    pub institution: String,
    pub date: NaiveDate,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub name: String,
    pub description: String,
    pub technologies: String,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub profile_id: Uuid,
    pub name: String,
    pub description: String,
    pub technologies: String,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReferenceRow {
    pub id: Uuid,
    pub profile_id: Option<Uuid>,
    pub name: String,
    pub company: String,
    pub role: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceDraft {
    pub profile_id: Option<Uuid>,
    pub name: String,
    pub company: String,
    pub role: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}
