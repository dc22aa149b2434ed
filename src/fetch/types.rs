use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Latest two-line element set fetched for one catalog number.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ElementSet {
    pub norad_id: u32,
    pub name: Option<String>,
    pub line1: String,
    pub line2: String,
    pub fetched_at: DateTime<Utc>,
}
