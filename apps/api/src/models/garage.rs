use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "item_condition", rename_all = "lowercase")]
#[serde(rename_all = "snake_case")]
pub enum ItemCondition {
    New,
    Used,
}

/// A classifieds listing attached to the profile. Sold items are flipped to
/// `available = false` rather than deleted, so the CV page filters on it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GarageSaleItemRow {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub product_name: String,
    pub description: String,
    pub price: Decimal,
    pub condition: ItemCondition,
    pub available: bool,
    pub image_url: Option<String>,
    /// Set once at insert time, never updated.
    pub published_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GarageSaleItemDraft {
    pub profile_id: Uuid,
    pub product_name: String,
    pub description: String,
    pub price: Decimal,
    pub condition: ItemCondition,
    #[serde(default = "default_available")]
    pub available: bool,
    pub image_url: Option<String>,
}

fn default_available() -> bool {
    true
}
