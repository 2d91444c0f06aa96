use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// Password-less contact record (stored in the `dashboard_users`
/// collection). Created and listed only; no update or delete exposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardEntry {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateEntryRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DashboardEntryResponse {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<DashboardEntry> for DashboardEntryResponse {
    fn from(entry: DashboardEntry) -> Self {
        DashboardEntryResponse {
            id: entry.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: entry.name,
            phone: entry.phone,
            email: entry.email,
            created_at: entry.created_at.timestamp_millis(),
            updated_at: entry.updated_at.timestamp_millis(),
        }
    }
}
