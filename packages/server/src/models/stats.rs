use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::Serialize;

/// Donor dashboard counters, scoped to the caller's own listings.
#[derive(Serialize, utoipa::ToSchema)]
pub struct DonorStats {
    pub total: u64,
    pub delivered: u64,
    pub expired: u64,
}

/// Platform-wide counters for authenticated users.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    pub total_posted: u64,
    pub total_delivered: u64,
    pub total_expired: u64,
}

/// Unauthenticated landing-page counters.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicStats {
    pub total_posted: u64,
    pub total_delivered: u64,
    pub total_expired: u64,
    pub donors: u64,
    pub volunteers: u64,
}

/// Recently joined donor, name only.
#[derive(Serialize, FromQueryResult, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentDonor {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Publicly showcased delivery.
#[derive(Serialize, FromQueryResult, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicDelivery {
    pub id: i32,
    pub food_name: String,
    pub delivery_image: Option<String>,
    pub delivery_address: Option<String>,
    pub delivered_at: Option<DateTime<Utc>>,
}

/// Volunteer listed on the public roster.
#[derive(Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct PublicVolunteer {
    pub id: i32,
    pub name: String,
}

/// Volunteer's own profile with gamification counters.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerProfile {
    pub name: String,
    pub email: String,
    pub karma_points: i32,
    pub deliveries_completed: i32,
    pub created_at: DateTime<Utc>,
}

/// Donor's own profile.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonorProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub karma_points: i32,
    pub deliveries_completed: i32,
    pub created_at: DateTime<Utc>,
}
