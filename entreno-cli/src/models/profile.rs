use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RecordId;

pub const DEFAULT_FITNESS_LEVEL: &str = "Principiante";
pub const DEFAULT_GOAL: &str = "Salud";

/// Row of the `profiles` table, keyed by the auth user id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub fitness_level: Option<String>,
    #[serde(default)]
    pub goal: Option<String>,
}

impl Profile {
    /// Profile created on first login
    pub fn initial(id: Uuid, full_name: String) -> Self {
        Self {
            id,
            full_name: Some(full_name),
            age: None,
            weight: None,
            height: None,
            fitness_level: Some(DEFAULT_FITNESS_LEVEL.to_string()),
            goal: Some(DEFAULT_GOAL.to_string()),
        }
    }
}

/// Editable profile fields
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileForm {
    pub full_name: String,
    pub age: Option<u32>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub fitness_level: String,
    pub goal: String,
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            age: None,
            weight: None,
            height: None,
            fitness_level: DEFAULT_FITNESS_LEVEL.to_string(),
            goal: DEFAULT_GOAL.to_string(),
        }
    }
}

impl From<Profile> for ProfileForm {
    fn from(p: Profile) -> Self {
        Self {
            full_name: p.full_name.unwrap_or_default(),
            age: p.age,
            weight: p.weight,
            height: p.height,
            fitness_level: p
                .fitness_level
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| DEFAULT_FITNESS_LEVEL.to_string()),
            goal: p
                .goal
                .filter(|g| !g.is_empty())
                .unwrap_or_else(|| DEFAULT_GOAL.to_string()),
        }
    }
}

impl ProfileForm {
    pub fn to_profile(&self, id: Uuid) -> Profile {
        Profile {
            id,
            full_name: Some(self.full_name.clone()),
            age: self.age,
            weight: self.weight,
            height: self.height,
            fitness_level: Some(self.fitness_level.clone()),
            goal: Some(self.goal.clone()),
        }
    }

    pub fn to_history_entry(&self, user_id: Uuid) -> NewBiometricEntry {
        NewBiometricEntry {
            user_id,
            weight: self.weight,
            height: self.height,
            age: self.age,
            fitness_level: self.fitness_level.clone(),
            goal: self.goal.clone(),
        }
    }
}

/// Row of `biometric_history`: snapshot written on each profile save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiometricEntry {
    pub id: RecordId,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub fitness_level: Option<String>,
    #[serde(default)]
    pub goal: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBiometricEntry {
    pub user_id: Uuid,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub age: Option<u32>,
    pub fitness_level: String,
    pub goal: String,
}
