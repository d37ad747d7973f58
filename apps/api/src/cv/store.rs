//! Storage collaborator: the read queries the pages need, and the write
//! contract the admin collaborator goes through. Every write validates the
//! candidate record and only persists on success, inside one transaction,
//! so an invalid instance never reaches durable storage.

#![allow(dead_code)]

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::cv::validation;
use crate::errors::AppError;
use crate::models::garage::{GarageSaleItemDraft, GarageSaleItemRow};
use crate::models::profile::{ProfileDraft, ProfileRow};
use crate::models::records::{
    CertificateDraft, CertificateRow, EducationDraft, EducationRow, ExperienceDraft,
    ExperienceRow, ProjectDraft, ProjectRow, ReferenceDraft, ReferenceRow, SkillDraft, SkillRow,
};

// ---------- reads ----------

/// The singleton profile: first row in insertion order. The `id` tie-break
/// keeps the pick deterministic if more than one row ever exists.
pub async fn first_profile(pool: &PgPool) -> Result<Option<ProfileRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM profiles ORDER BY created_at, id LIMIT 1")
        .fetch_optional(pool)
        .await
}

pub async fn education_for(pool: &PgPool, profile_id: Uuid) -> Result<Vec<EducationRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM education WHERE profile_id = $1")
        .bind(profile_id)
        .fetch_all(pool)
        .await
}

pub async fn experience_for(
    pool: &PgPool,
    profile_id: Uuid,
) -> Result<Vec<ExperienceRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM experience WHERE profile_id = $1")
        .bind(profile_id)
        .fetch_all(pool)
        .await
}

pub async fn skills_for(pool: &PgPool, profile_id: Uuid) -> Result<Vec<SkillRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM skills WHERE profile_id = $1")
        .bind(profile_id)
        .fetch_all(pool)
        .await
}

pub async fn certificates_for(
    pool: &PgPool,
    profile_id: Uuid,
) -> Result<Vec<CertificateRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM certificates WHERE profile_id = $1")
        .bind(profile_id)
        .fetch_all(pool)
        .await
}

pub async fn projects_for(pool: &PgPool, profile_id: Uuid) -> Result<Vec<ProjectRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM projects WHERE profile_id = $1")
        .bind(profile_id)
        .fetch_all(pool)
        .await
}

pub async fn references_for(
    pool: &PgPool,
    profile_id: Uuid,
) -> Result<Vec<ReferenceRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM personal_references WHERE profile_id = $1")
        .bind(profile_id)
        .fetch_all(pool)
        .await
}

pub async fn garage_items_for(
    pool: &PgPool,
    profile_id: Uuid,
) -> Result<Vec<GarageSaleItemRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM garage_sale_items WHERE profile_id = $1")
        .bind(profile_id)
        .fetch_all(pool)
        .await
}

// ---------- writes: profile ----------

pub async fn create_profile(
    pool: &PgPool,
    draft: &ProfileDraft,
    today: NaiveDate,
) -> Result<Uuid, AppError> {
    validation::validate_profile(draft, today).map_err(AppError::Validation)?;

    let id = Uuid::new_v4();
    let mut tx = pool.begin().await?;
    sqlx::query(
        r#"
        INSERT INTO profiles
            (id, first_names, last_names, nationality, birthplace, birth_date,
             national_id, sex, marital_status, drivers_license, phone, email,
             website, home_address, work_address, profession, description, photo_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
        "#,
    )
    .bind(id)
    .bind(&draft.first_names)
    .bind(&draft.last_names)
    .bind(&draft.nationality)
    .bind(&draft.birthplace)
    .bind(draft.birth_date)
    .bind(&draft.national_id)
    .bind(draft.sex)
    .bind(draft.marital_status)
    .bind(draft.drivers_license)
    .bind(&draft.phone)
    .bind(&draft.email)
    .bind(&draft.website)
    .bind(&draft.home_address)
    .bind(&draft.work_address)
    .bind(&draft.profession)
    .bind(&draft.description)
    .bind(&draft.photo_url)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    info!("created profile {id}");
    Ok(id)
}

pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    draft: &ProfileDraft,
    today: NaiveDate,
) -> Result<(), AppError> {
    validation::validate_profile(draft, today).map_err(AppError::Validation)?;

    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        r#"
        UPDATE profiles SET
            first_names = $2, last_names = $3, nationality = $4, birthplace = $5,
            birth_date = $6, national_id = $7, sex = $8, marital_status = $9,
            drivers_license = $10, phone = $11, email = $12, website = $13,
            home_address = $14, work_address = $15, profession = $16,
            description = $17, photo_url = $18
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&draft.first_names)
    .bind(&draft.last_names)
    .bind(&draft.nationality)
    .bind(&draft.birthplace)
    .bind(draft.birth_date)
    .bind(&draft.national_id)
    .bind(draft.sex)
    .bind(draft.marital_status)
    .bind(draft.drivers_license)
    .bind(&draft.phone)
    .bind(&draft.email)
    .bind(&draft.website)
    .bind(&draft.home_address)
    .bind(&draft.work_address)
    .bind(&draft.profession)
    .bind(&draft.description)
    .bind(&draft.photo_url)
    .execute(&mut *tx)
    .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Profile {id} not found")));
    }
    tx.commit().await?;

    info!("updated profile {id}");
    Ok(())
}

/// Deleting a profile cascades to every owned record via the schema's
/// foreign keys.
pub async fn delete_profile(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Profile {id} not found")));
    }
    info!("deleted profile {id} and its owned records");
    Ok(())
}

// ---------- writes: education ----------

pub async fn create_education(
    pool: &PgPool,
    draft: &EducationDraft,
    today: NaiveDate,
) -> Result<Uuid, AppError> {
    validation::validate_education(draft, today).map_err(AppError::Validation)?;

    let id = Uuid::new_v4();
    let mut tx = pool.begin().await?;
    sqlx::query(
        r#"
        INSERT INTO education (id, profile_id, institution, degree, start_date, end_date, description)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(id)
    .bind(draft.profile_id)
    .bind(&draft.institution)
    .bind(&draft.degree)
    .bind(draft.start_date)
    .bind(draft.end_date)
    .bind(&draft.description)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    info!("created education record {id}");
    Ok(id)
}

pub async fn update_education(
    pool: &PgPool,
    id: Uuid,
    draft: &EducationDraft,
    today: NaiveDate,
) -> Result<(), AppError> {
    validation::validate_education(draft, today).map_err(AppError::Validation)?;

    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        r#"
        UPDATE education SET
            profile_id = $2, institution = $3, degree = $4,
            start_date = $5, end_date = $6, description = $7
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(draft.profile_id)
    .bind(&draft.institution)
    .bind(&draft.degree)
    .bind(draft.start_date)
    .bind(draft.end_date)
    .bind(&draft.description)
    .execute(&mut *tx)
    .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Education record {id} not found")));
    }
    tx.commit().await?;
    Ok(())
}

pub async fn delete_education(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    delete_by_id(pool, "education", id).await
}

// ---------- writes: experience ----------

pub async fn create_experience(
    pool: &PgPool,
    draft: &ExperienceDraft,
    today: NaiveDate,
) -> Result<Uuid, AppError> {
    validation::validate_experience(draft, today).map_err(AppError::Validation)?;

    let id = Uuid::new_v4();
    let mut tx = pool.begin().await?;
    sqlx::query(
        r#"
        INSERT INTO experience (id, profile_id, company, role, start_date, end_date, description)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(id)
    .bind(draft.profile_id)
    .bind(&draft.company)
    .bind(&draft.role)
    .bind(draft.start_date)
    .bind(draft.end_date)
    .bind(&draft.description)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    info!("created experience record {id}");
    Ok(id)
}

pub async fn update_experience(
    pool: &PgPool,
    id: Uuid,
    draft: &ExperienceDraft,
    today: NaiveDate,
) -> Result<(), AppError> {
    validation::validate_experience(draft, today).map_err(AppError::Validation)?;

    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        r#"
        UPDATE experience SET
            profile_id = $2, company = $3, role = $4,
            start_date = $5, end_date = $6, description = $7
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(draft.profile_id)
    .bind(&draft.company)
    .bind(&draft.role)
    .bind(draft.start_date)
    .bind(draft.end_date)
    .bind(&draft.description)
    .execute(&mut *tx)
    .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Experience record {id} not found"
        )));
    }
    tx.commit().await?;
    Ok(())
}

pub async fn delete_experience(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    delete_by_id(pool, "experience", id).await
}

// ---------- writes: skill ----------

pub async fn create_skill(pool: &PgPool, draft: &SkillDraft) -> Result<Uuid, AppError> {
    validation::validate_skill(draft).map_err(AppError::Validation)?;

    let id = Uuid::new_v4();
    let mut tx = pool.begin().await?;
    sqlx::query("INSERT INTO skills (id, profile_id, name, level) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(draft.profile_id)
        .bind(&draft.name)
        .bind(draft.level)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    info!("created skill {id}");
    Ok(id)
}

pub async fn update_skill(pool: &PgPool, id: Uuid, draft: &SkillDraft) -> Result<(), AppError> {
    validation::validate_skill(draft).map_err(AppError::Validation)?;

    let mut tx = pool.begin().await?;
    let result =
        sqlx::query("UPDATE skills SET profile_id = $2, name = $3, level = $4 WHERE id = $1")
            .bind(id)
            .bind(draft.profile_id)
            .bind(&draft.name)
            .bind(draft.level)
            .execute(&mut *tx)
            .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Skill {id} not found")));
    }
    tx.commit().await?;
    Ok(())
}

pub async fn delete_skill(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    delete_by_id(pool, "skills", id).await
}

// ---------- writes: certificate ----------

pub async fn create_certificate(
    pool: &PgPool,
    draft: &CertificateDraft,
    today: NaiveDate,
) -> Result<Uuid, AppError> {
    validation::validate_certificate(draft, today).map_err(AppError::Validation)?;

    let id = Uuid::new_v4();
    let mut tx = pool.begin().await?;
    sqlx::query(
        r#"
        INSERT INTO certificates (id, profile_id, title, institution, date, image_url)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(id)
    .bind(draft.profile_id)
    .bind(&draft.title)
    .bind(&draft.institution)
    .bind(draft.date)
    .bind(&draft.image_url)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    info!("created certificate {id}");
    Ok(id)
}

pub async fn update_certificate(
    pool: &PgPool,
    id: Uuid,
    draft: &CertificateDraft,
    today: NaiveDate,
) -> Result<(), AppError> {
    validation::validate_certificate(draft, today).map_err(AppError::Validation)?;

    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        r#"
        UPDATE certificates SET
            profile_id = $2, title = $3, institution = $4, date = $5, image_url = $6
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(draft.profile_id)
    .bind(&draft.title)
    .bind(&draft.institution)
    .bind(draft.date)
    .bind(&draft.image_url)
    .execute(&mut *tx)
    .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Certificate {id} not found")));
    }
    tx.commit().await?;
    Ok(())
}

pub async fn delete_certificate(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    delete_by_id(pool, "certificates", id).await
}

// ---------- writes: project ----------

// Projects and references carry no field invariants beyond presence, so
// their writes persist directly.

pub async fn create_project(pool: &PgPool, draft: &ProjectDraft) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO projects (id, profile_id, name, description, technologies, github_url, demo_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(id)
    .bind(draft.profile_id)
    .bind(&draft.name)
    .bind(&draft.description)
    .bind(&draft.technologies)
    .bind(&draft.github_url)
    .bind(&draft.demo_url)
    .execute(pool)
    .await?;

    info!("created project {id}");
    Ok(id)
}

pub async fn update_project(pool: &PgPool, id: Uuid, draft: &ProjectDraft) -> Result<(), AppError> {
    let result = sqlx::query(
        r#"
        UPDATE projects SET
            profile_id = $2, name = $3, description = $4,
            technologies = $5, github_url = $6, demo_url = $7
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(draft.profile_id)
    .bind(&draft.name)
    .bind(&draft.description)
    .bind(&draft.technologies)
    .bind(&draft.github_url)
    .bind(&draft.demo_url)
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Project {id} not found")));
    }
    Ok(())
}

pub async fn delete_project(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    delete_by_id(pool, "projects", id).await
}

// ---------- writes: reference ----------

pub async fn create_reference(pool: &PgPool, draft: &ReferenceDraft) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO personal_references (id, profile_id, name, company, role, phone, email)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(id)
    .bind(draft.profile_id)
    .bind(&draft.name)
    .bind(&draft.company)
    .bind(&draft.role)
    .bind(&draft.phone)
    .bind(&draft.email)
    .execute(pool)
    .await?;

    info!("created reference {id}");
    Ok(id)
}

pub async fn update_reference(
    pool: &PgPool,
    id: Uuid,
    draft: &ReferenceDraft,
) -> Result<(), AppError> {
    let result = sqlx::query(
        r#"
        UPDATE personal_references SET
            profile_id = $2, name = $3, company = $4, role = $5, phone = $6, email = $7
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(draft.profile_id)
    .bind(&draft.name)
    .bind(&draft.company)
    .bind(&draft.role)
    .bind(&draft.phone)
    .bind(&draft.email)
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Reference {id} not found")));
    }
    Ok(())
}

pub async fn delete_reference(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    delete_by_id(pool, "personal_references", id).await
}

// ---------- writes: garage sale item ----------

/// `published_on` is stamped from the injected clock at insert time and is
/// never accepted from the draft.
pub async fn create_garage_item(
    pool: &PgPool,
    draft: &GarageSaleItemDraft,
    today: NaiveDate,
) -> Result<Uuid, AppError> {
    validation::validate_garage_item(draft).map_err(AppError::Validation)?;

    let id = Uuid::new_v4();
    let mut tx = pool.begin().await?;
    sqlx::query(
        r#"
        INSERT INTO garage_sale_items
            (id, profile_id, product_name, description, price, condition,
             available, image_url, published_on)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(id)
    .bind(draft.profile_id)
    .bind(&draft.product_name)
    .bind(&draft.description)
    .bind(draft.price)
    .bind(draft.condition)
    .bind(draft.available)
    .bind(&draft.image_url)
    .bind(today)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    info!("created garage sale item {id}");
    Ok(id)
}

/// Updates everything but `published_on`.
pub async fn update_garage_item(
    pool: &PgPool,
    id: Uuid,
    draft: &GarageSaleItemDraft,
) -> Result<(), AppError> {
    validation::validate_garage_item(draft).map_err(AppError::Validation)?;

    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        r#"
        UPDATE garage_sale_items SET
            profile_id = $2, product_name = $3, description = $4, price = $5,
            condition = $6, available = $7, image_url = $8
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(draft.profile_id)
    .bind(&draft.product_name)
    .bind(&draft.description)
    .bind(draft.price)
    .bind(draft.condition)
    .bind(draft.available)
    .bind(&draft.image_url)
    .execute(&mut *tx)
    .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Garage sale item {id} not found"
        )));
    }
    tx.commit().await?;
    Ok(())
}

pub async fn delete_garage_item(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    delete_by_id(pool, "garage_sale_items", id).await
}

// ---------- shared ----------

async fn delete_by_id(pool: &PgPool, table: &str, id: Uuid) -> Result<(), AppError> {
    // `table` is always a compile-time constant from this module.
    let result = sqlx::query(&format!("DELETE FROM {table} WHERE id = $1"))
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Record {id} not found in {table}"
        )));
    }
    info!("deleted {table} record {id}");
    Ok(())
}
