use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RecordId;

/// Row of `entrenamiento_selfies`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressPhoto {
    pub id: RecordId,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    pub image_url: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProgressPhoto {
    /// Local capture date rendered with `format` (e.g. `%d/%m/%Y`)
    pub fn date_label(&self, format: &str) -> String {
        self.created_at
            .with_timezone(&Local)
            .format(format)
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProgressPhoto {
    pub user_id: Uuid,
    pub image_url: String,
    pub description: String,
}
