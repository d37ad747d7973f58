//! Read-model assembly for the two public pages. Fetches the profile's
//! collections and applies the view ordering/filtering rules; the result is
//! handed opaquely to the external renderer.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::PgPool;

use crate::cv::store;
use crate::models::garage::GarageSaleItemRow;
use crate::models::profile::ProfileRow;
use crate::models::records::{
    CertificateRow, EducationRow, ExperienceRow, ProjectRow, ReferenceRow, SkillRow,
};

/// The view-ready bundle for the CV page. With no profile in storage every
/// collection is empty; the page renders its empty state instead of failing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CvPage {
    pub profile: Option<ProfileRow>,
    pub education: Vec<EducationRow>,
    pub experience: Vec<ExperienceRow>,
    pub skills: Vec<SkillRow>,
    pub certificates: Vec<CertificateRow>,
    pub projects: Vec<ProjectRow>,
    pub references: Vec<ReferenceRow>,
    pub garage_items: Vec<GarageSaleItemRow>,
}

pub async fn assemble_cv_page(
    pool: &PgPool,
    profile: Option<ProfileRow>,
) -> Result<CvPage, sqlx::Error> {
    let Some(profile) = profile else {
        return Ok(CvPage::default());
    };

    let mut education = store::education_for(pool, profile.id).await?;
    sort_newest_first(&mut education, |e| e.start_date);

    let mut experience = store::experience_for(pool, profile.id).await?;
    sort_newest_first(&mut experience, |e| e.start_date);

    let mut garage_items = store::garage_items_for(pool, profile.id).await?;
    retain_available(&mut garage_items);

    Ok(CvPage {
        skills: store::skills_for(pool, profile.id).await?,
        certificates: store::certificates_for(pool, profile.id).await?,
        projects: store::projects_for(pool, profile.id).await?,
        references: store::references_for(pool, profile.id).await?,
        profile: Some(profile),
        education,
        experience,
        garage_items,
    })
}

/// Start-date descending. Stable, so rows sharing a start date keep their
/// storage order.
pub fn sort_newest_first<T>(rows: &mut [T], start_date: impl Fn(&T) -> NaiveDate) {
    rows.sort_by(|a, b| start_date(b).cmp(&start_date(a)));
}

/// The public page only shows listings still for sale.
pub fn retain_available(items: &mut Vec<GarageSaleItemRow>) {
    items.retain(|item| item.available);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::garage::ItemCondition;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn education_starting(start: NaiveDate) -> EducationRow {
        EducationRow {
            id: Uuid::new_v4(),
            profile_id: None,
            institution: "U".into(),
            degree: "BSc".into(),
            start_date: start,
            end_date: None,
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    fn item(available: bool) -> GarageSaleItemRow {
        GarageSaleItemRow {
            id: Uuid::new_v4(),
            profile_id: Uuid::new_v4(),
            product_name: "Lamp".into(),
            description: "Desk lamp".into(),
            price: Decimal::new(1500, 2),
            condition: ItemCondition::Used,
            available,
            image_url: None,
            published_on: date(2024, 5, 1),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn education_sorted_start_date_descending() {
        let mut rows = vec![
            education_starting(date(2020, 1, 1)),
            education_starting(date(2022, 6, 1)),
            education_starting(date(2019, 3, 1)),
        ];
        sort_newest_first(&mut rows, |e| e.start_date);
        let starts: Vec<_> = rows.iter().map(|e| e.start_date).collect();
        assert_eq!(
            starts,
            vec![date(2022, 6, 1), date(2020, 1, 1), date(2019, 3, 1)]
        );
    }

    #[test]
    fn sort_is_stable_for_equal_start_dates() {
        let first = education_starting(date(2020, 1, 1));
        let second = education_starting(date(2020, 1, 1));
        let (first_id, second_id) = (first.id, second.id);
        let mut rows = vec![first, second];
        sort_newest_first(&mut rows, |e| e.start_date);
        assert_eq!(rows[0].id, first_id);
        assert_eq!(rows[1].id, second_id);
    }

    #[test]
    fn only_available_items_are_kept() {
        let kept = item(true);
        let kept_id = kept.id;
        let mut items = vec![kept, item(false)];
        retain_available(&mut items);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, kept_id);
    }

    #[test]
    fn empty_page_has_no_profile_and_empty_collections() {
        let page = CvPage::default();
        assert!(page.profile.is_none());
        assert!(page.education.is_empty());
        assert!(page.experience.is_empty());
        assert!(page.skills.is_empty());
        assert!(page.certificates.is_empty());
        assert!(page.projects.is_empty());
        assert!(page.references.is_empty());
        assert!(page.garage_items.is_empty());
    }
}
