use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::garage::GarageSaleItemDraft;
use crate::models::profile::ProfileDraft;
use crate::models::records::{CertificateDraft, EducationDraft, ExperienceDraft, SkillDraft};

/// A single validation failure. `field: None` marks a whole-record error
/// (currently only the start/end date ordering check).
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: Option<&'static str>,
    pub message: String,
}

/// The collected set of violations for one candidate record. All rules are
/// evaluated; nothing short-circuits.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FieldErrors {
    pub errors: Vec<FieldError>,
}

impl FieldErrors {
    fn push(&mut self, field: Option<&'static str>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for e in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            match e.field {
                Some(field) => write!(f, "{field}: {}", e.message)?,
                None => write!(f, "{}", e.message)?,
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

fn is_all_digits(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit())
}

/// Shared date rules for records with a start and an optional end. A missing
/// end date is always valid (the record is ongoing).
fn check_date_span(
    start: NaiveDate,
    end: Option<NaiveDate>,
    today: NaiveDate,
    errors: &mut FieldErrors,
) {
    if start > today {
        errors.push(Some("start_date"), "start date cannot be in the future");
    }
    if let Some(end) = end {
        if end > today {
            errors.push(Some("end_date"), "end date cannot be in the future");
        }
        if start > end {
            errors.push(None, "start date cannot be later than end date");
        }
    }
}

/// `today` is the injected clock for the not-in-the-future rules; callers
/// pass `Utc::now().date_naive()`, tests pass a fixed date.
pub fn validate_profile(draft: &ProfileDraft, today: NaiveDate) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    if draft.birth_date > today {
        errors.push(Some("birth_date"), "birth date cannot be in the future");
    }
    if draft.national_id.len() != 10 || !is_all_digits(&draft.national_id) {
        errors.push(
            Some("national_id"),
            "national ID must be exactly 10 numeric digits",
        );
    }
    if !is_all_digits(&draft.phone) {
        errors.push(Some("phone"), "phone may only contain digits");
    }
    errors.into_result()
}

pub fn validate_education(draft: &EducationDraft, today: NaiveDate) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    check_date_span(draft.start_date, draft.end_date, today, &mut errors);
    errors.into_result()
}

pub fn validate_experience(draft: &ExperienceDraft, today: NaiveDate) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    check_date_span(draft.start_date, draft.end_date, today, &mut errors);
    errors.into_result()
}

pub fn validate_skill(draft: &SkillDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    if !(1..=10).contains(&draft.level) {
        errors.push(Some("level"), "level must be between 1 and 10");
    }
    errors.into_result()
}

pub fn validate_certificate(draft: &CertificateDraft, today: NaiveDate) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    if draft.date > today {
        errors.push(Some("date"), "certificate date cannot be in the future");
    }
    errors.into_result()
}

pub fn validate_garage_item(draft: &GarageSaleItemDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    if draft.price < Decimal::ZERO {
        errors.push(Some("price"), "price cannot be negative");
    }
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::garage::ItemCondition;
    use crate::models::profile::{MaritalStatus, Sex};
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_profile() -> ProfileDraft {
        ProfileDraft {
            first_names: "Ana María".into(),
            last_names: "Quintero".into(),
            nationality: "Ecuadorian".into(),
            birthplace: "Quito".into(),
            birth_date: date(1990, 3, 12),
            national_id: "0102030405".into(),
            sex: Sex::Female,
            marital_status: MaritalStatus::Single,
            drivers_license: true,
            phone: "0991234567".into(),
            email: "ana@example.com".into(),
            website: None,
            home_address: "Av. Amazonas 123".into(),
            work_address: None,
            profession: "Software Engineer".into(),
            description: "Backend developer.".into(),
            photo_url: None,
        }
    }

    fn sample_education() -> EducationDraft {
        EducationDraft {
            profile_id: None,
            institution: "Universidad Central".into(),
            degree: "Ingeniería en Sistemas".into(),
            start_date: date(2015, 9, 1),
            end_date: Some(date(2020, 7, 31)),
            description: String::new(),
        }
    }

    fn sample_experience() -> ExperienceDraft {
        ExperienceDraft {
            profile_id: None,
            company: "Acme".into(),
            role: "Developer".into(),
            start_date: date(2021, 1, 4),
            end_date: None,
            description: "Built internal tools.".into(),
        }
    }

    fn sample_garage_item(price: Decimal) -> GarageSaleItemDraft {
        GarageSaleItemDraft {
            profile_id: Uuid::new_v4(),
            product_name: "Bicycle".into(),
            description: "Mountain bike, barely used.".into(),
            price,
            condition: ItemCondition::Used,
            available: true,
            image_url: None,
        }
    }

    #[test]
    fn profile_valid() {
        assert!(validate_profile(&sample_profile(), today()).is_ok());
    }

    #[test]
    fn profile_future_birth_date_rejected() {
        let mut draft = sample_profile();
        draft.birth_date = date(2026, 1, 1);
        let errs = validate_profile(&draft, today()).unwrap_err();
        assert_eq!(errs.errors.len(), 1);
        assert_eq!(errs.errors[0].field, Some("birth_date"));
    }

    #[test]
    fn profile_birth_date_today_accepted() {
        let mut draft = sample_profile();
        draft.birth_date = today();
        assert!(validate_profile(&draft, today()).is_ok());
    }

    #[test]
    fn national_id_ten_digits_accepted() {
        let mut draft = sample_profile();
        draft.national_id = "0102030405".into();
        assert!(validate_profile(&draft, today()).is_ok());
    }

    #[test]
    fn national_id_nine_digits_rejected() {
        let mut draft = sample_profile();
        draft.national_id = "010203040".into();
        let errs = validate_profile(&draft, today()).unwrap_err();
        assert_eq!(errs.errors[0].field, Some("national_id"));
    }

    #[test]
    fn national_id_eleven_digits_rejected() {
        let mut draft = sample_profile();
        draft.national_id = "01020304056".into();
        assert!(validate_profile(&draft, today()).is_err());
    }

    #[test]
    fn national_id_with_letter_rejected() {
        let mut draft = sample_profile();
        draft.national_id = "010203040A".into();
        let errs = validate_profile(&draft, today()).unwrap_err();
        assert_eq!(errs.errors[0].field, Some("national_id"));
    }

    #[test]
    fn phone_digits_only_accepted() {
        let mut draft = sample_profile();
        draft.phone = "022345678".into();
        assert!(validate_profile(&draft, today()).is_ok());
    }

    #[test]
    fn phone_with_dash_rejected() {
        let mut draft = sample_profile();
        draft.phone = "099-123456".into();
        let errs = validate_profile(&draft, today()).unwrap_err();
        assert_eq!(errs.errors[0].field, Some("phone"));
    }

    #[test]
    fn phone_has_no_length_constraint() {
        let mut draft = sample_profile();
        draft.phone = "123".into();
        assert!(validate_profile(&draft, today()).is_ok());
    }

    #[test]
    fn profile_violations_are_collected_not_short_circuited() {
        let mut draft = sample_profile();
        draft.birth_date = date(2030, 1, 1);
        draft.national_id = "abc".into();
        draft.phone = "+593991234".into();
        let errs = validate_profile(&draft, today()).unwrap_err();
        assert_eq!(errs.errors.len(), 3);
    }

    #[test]
    fn education_valid() {
        assert!(validate_education(&sample_education(), today()).is_ok());
    }

    #[test]
    fn education_end_before_start_is_whole_record_error() {
        let mut draft = sample_education();
        draft.start_date = date(2020, 1, 1);
        draft.end_date = Some(date(2019, 1, 1));
        let errs = validate_education(&draft, today()).unwrap_err();
        assert_eq!(errs.errors.len(), 1);
        assert_eq!(errs.errors[0].field, None);
    }

    #[test]
    fn education_missing_end_never_fails_ordering() {
        let mut draft = sample_education();
        draft.end_date = None;
        assert!(validate_education(&draft, today()).is_ok());
    }

    #[test]
    fn education_future_start_rejected() {
        let mut draft = sample_education();
        draft.start_date = date(2026, 1, 1);
        draft.end_date = None;
        let errs = validate_education(&draft, today()).unwrap_err();
        assert_eq!(errs.errors[0].field, Some("start_date"));
    }

    #[test]
    fn education_future_end_rejected() {
        let mut draft = sample_education();
        draft.end_date = Some(date(2026, 1, 1));
        let errs = validate_education(&draft, today()).unwrap_err();
        assert_eq!(errs.errors[0].field, Some("end_date"));
    }

    #[test]
    fn education_start_equal_end_accepted() {
        let mut draft = sample_education();
        draft.start_date = date(2020, 1, 1);
        draft.end_date = Some(date(2020, 1, 1));
        assert!(validate_education(&draft, today()).is_ok());
    }

    #[test]
    fn experience_same_date_rules_as_education() {
        let mut draft = sample_experience();
        draft.start_date = date(2022, 5, 1);
        draft.end_date = Some(date(2022, 4, 1));
        let errs = validate_experience(&draft, today()).unwrap_err();
        assert_eq!(errs.errors[0].field, None);

        draft.end_date = None;
        assert!(validate_experience(&draft, today()).is_ok());
    }

    #[test]
    fn skill_level_bounds() {
        let mut draft = SkillDraft {
            profile_id: None,
            name: "Rust".into(),
            level: 0,
        };
        assert!(validate_skill(&draft).is_err());
        draft.level = 1;
        assert!(validate_skill(&draft).is_ok());
        draft.level = 10;
        assert!(validate_skill(&draft).is_ok());
        draft.level = 11;
        assert!(validate_skill(&draft).is_err());
    }

    #[test]
    fn skill_level_error_names_field() {
        let draft = SkillDraft {
            profile_id: None,
            name: "Rust".into(),
            level: -3,
        };
        let errs = validate_skill(&draft).unwrap_err();
        assert_eq!(errs.errors[0].field, Some("level"));
    }

    #[test]
    fn certificate_future_date_rejected() {
        let draft = CertificateDraft {
            profile_id: Uuid::new_v4(),
            title: "AWS SAA".into(),
            institution: "Amazon".into(),
            date: date(2026, 1, 1),
            image_url: "https://media.example.com/certificates/x.png".into(),
        };
        let errs = validate_certificate(&draft, today()).unwrap_err();
        assert_eq!(errs.errors[0].field, Some("date"));
    }

    #[test]
    fn certificate_past_date_accepted() {
        let draft = CertificateDraft {
            profile_id: Uuid::new_v4(),
            title: "AWS SAA".into(),
            institution: "Amazon".into(),
            date: date(2023, 11, 2),
            image_url: "https://media.example.com/certificates/x.png".into(),
        };
        assert!(validate_certificate(&draft, today()).is_ok());
    }

    #[test]
    fn price_negative_rejected() {
        // -0.01
        let errs = validate_garage_item(&sample_garage_item(Decimal::new(-1, 2))).unwrap_err();
        assert_eq!(errs.errors[0].field, Some("price"));
    }

    #[test]
    fn price_zero_accepted() {
        assert!(validate_garage_item(&sample_garage_item(Decimal::ZERO)).is_ok());
    }

    #[test]
    fn price_positive_accepted() {
        // 100.00
        assert!(validate_garage_item(&sample_garage_item(Decimal::new(10000, 2))).is_ok());
    }

    #[test]
    fn field_errors_display_includes_field_names() {
        let mut draft = sample_profile();
        draft.national_id = "x".into();
        let errs = validate_profile(&draft, today()).unwrap_err();
        assert!(errs.to_string().contains("national_id"));
    }
}
