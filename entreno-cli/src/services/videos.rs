//! Catalog of reference technique videos keyed by exercise name.

use std::collections::BTreeMap;

const BUILTIN: &[(&str, &str)] = &[
    ("Press de Banca Plano", "K3idX0vU9hE"),
    ("Sentadillas Libre", "gcNh17Ckjgg"),
];

/// Names shorter than this never get a suggestion
const MIN_NAME_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub video_id: String,
}

#[derive(Debug, Clone)]
pub struct VideoCatalog {
    entries: Vec<CatalogEntry>,
}

impl Default for VideoCatalog {
    fn default() -> Self {
        Self::with_extra(&BTreeMap::new())
    }
}

impl VideoCatalog {
    /// Built-in entries plus `extra` (name → video id) from configuration.
    /// Configured names override built-in ones.
    pub fn with_extra(extra: &BTreeMap<String, String>) -> Self {
        let mut entries: Vec<CatalogEntry> = BUILTIN
            .iter()
            .filter(|(name, _)| !extra.keys().any(|k| normalize(k) == normalize(name)))
            .map(|(name, id)| CatalogEntry {
                name: name.to_string(),
                video_id: id.to_string(),
            })
            .collect();

        entries.extend(extra.iter().map(|(name, id)| CatalogEntry {
            name: name.clone(),
            video_id: id.clone(),
        }));

        Self { entries }
    }

    /// Video id for an exercise whose name contains a catalog keyword
    pub fn video_id(&self, exercise_name: &str) -> Option<&str> {
        let name = normalize(exercise_name);
        self.entries
            .iter()
            .find(|e| name.contains(&normalize(&e.name)))
            .map(|e| e.video_id.as_str())
    }

    /// URL to prefill when the user left the video field empty
    pub fn suggest_url(&self, exercise_name: &str, current_url: &str) -> Option<String> {
        if !current_url.trim().is_empty() || exercise_name.trim().chars().count() < MIN_NAME_LEN {
            return None;
        }
        self.video_id(exercise_name).map(youtube_url)
    }

    /// Entries whose name contains `query`
    pub fn search(&self, query: &str) -> Vec<&CatalogEntry> {
        let query = normalize(query);
        self.entries
            .iter()
            .filter(|e| normalize(&e.name).contains(&query))
            .collect()
    }
}

pub fn youtube_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Lowercase with Spanish accents folded
pub fn normalize(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' => 'a',
            'é' | 'è' | 'ë' => 'e',
            'í' | 'ì' | 'ï' => 'i',
            'ó' | 'ò' | 'ö' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_exercises() {
        let catalog = VideoCatalog::default();
        assert_eq!(catalog.video_id("Press de Banca Plano"), Some("K3idX0vU9hE"));
        assert_eq!(catalog.video_id("Sentadillas Libre"), Some("gcNh17Ckjgg"));
        assert_eq!(catalog.video_id("sentadillas libre con pausa"), Some("gcNh17Ckjgg"));
        assert_eq!(catalog.video_id("Ejercicio Inexistente 123"), None);
    }

    #[test]
    fn test_accents_are_ignored() {
        let mut extra = BTreeMap::new();
        extra.insert("Dominadas Pronación".to_string(), "xyz".to_string());
        let catalog = VideoCatalog::with_extra(&extra);

        assert_eq!(catalog.video_id("DOMINADAS PRONACION"), Some("xyz"));
    }

    #[test]
    fn test_suggestion_rules() {
        let catalog = VideoCatalog::default();
        assert_eq!(
            catalog.suggest_url("Press de Banca Plano", "").as_deref(),
            Some("https://www.youtube.com/watch?v=K3idX0vU9hE")
        );
        assert_eq!(catalog.suggest_url("Press de Banca Plano", "https://v/1"), None);
        assert_eq!(catalog.suggest_url("Pre", ""), None);
    }

    #[test]
    fn test_search() {
        let catalog = VideoCatalog::default();
        let found = catalog.search("Press");
        assert!(!found.is_empty());
        assert_eq!(found[0].video_id, "K3idX0vU9hE");
        assert!(catalog.search("XyZ123").is_empty());
    }

    #[test]
    fn test_youtube_url() {
        assert_eq!(youtube_url("abc12345"), "https://www.youtube.com/watch?v=abc12345");
    }
}
