use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{null_as_default, RecordId};

/// Row of the `exercises` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: RecordId,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub muscle_group: String,
    #[serde(default)]
    pub equipment: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
}

impl Exercise {
    /// Case-insensitive match on name, muscle group or equipment
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.muscle_group.to_lowercase().contains(&term)
            || self
                .equipment
                .as_deref()
                .is_some_and(|e| e.to_lowercase().contains(&term))
    }
}

/// Create/edit form, also the write payload
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExerciseForm {
    pub name: String,
    pub muscle_group: String,
    pub equipment: String,
    pub description: String,
    pub video_url: String,
}

impl From<&Exercise> for ExerciseForm {
    fn from(ex: &Exercise) -> Self {
        Self {
            name: ex.name.clone(),
            muscle_group: ex.muscle_group.clone(),
            equipment: ex.equipment.clone().unwrap_or_default(),
            description: ex.description.clone().unwrap_or_default(),
            video_url: ex.video_url.clone().unwrap_or_default(),
        }
    }
}
