//! Game instances and experiments - the persisted fixture format

use serde::{Deserialize, Serialize};
use std::path::Path;

/// One target word with its forbidden related words
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInstance {
    /// Sequential id, unique within the experiment, starting at 0
    pub id: usize,
    pub target_word: String,
    pub related_word: Vec<String>,
    pub target_word_stem: String,
    pub related_word_stem: Vec<String>,
    pub lang: String,
}

/// Instances sharing one frequency tier and one language
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experiment {
    /// "<tier>_<lang>"
    pub name: String,
    pub max_turns: u32,
    pub describer_initial_prompt: String,
    pub guesser_initial_prompt: String,
    pub game_instances: Vec<GameInstance>,
}

impl Experiment {
    pub fn new(tier: &str, language: &str, max_turns: u32) -> Self {
        Self {
            name: format!("{}_{}", tier, language),
            max_turns,
            describer_initial_prompt: String::new(),
            guesser_initial_prompt: String::new(),
            game_instances: Vec::new(),
        }
    }

    pub fn with_prompts(mut self, describer: String, guesser: String) -> Self {
        self.describer_initial_prompt = describer;
        self.guesser_initial_prompt = guesser;
        self
    }

    pub fn len(&self) -> usize {
        self.game_instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.game_instances.is_empty()
    }

    /// Id the next appended instance will get
    pub fn next_id(&self) -> usize {
        self.game_instances.len()
    }
}

/// Output of a generation run
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceFile {
    pub experiments: Vec<Experiment>,
}

impl InstanceFile {
    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file = serde_json::from_str(&content)?;
        Ok(file)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn instance_count(&self) -> usize {
        self.experiments.iter().map(Experiment::len).sum()
    }

    pub fn experiment(&self, name: &str) -> Option<&Experiment> {
        self.experiments.iter().find(|e| e.name == name)
    }
}

/// File name for a generation run: `instances_<version>_<lang>_<mode>.json`
pub fn instance_filename(version: &str, language: &str, mode_tag: &str) -> String {
    format!("instances_{}_{}_{}.json", version, language, mode_tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_file() -> InstanceFile {
        let mut experiment = Experiment::new("high", "en", 3)
            .with_prompts("describe $TARGET$".to_string(), "guess".to_string());
        experiment.game_instances.push(GameInstance {
            id: 0,
            target_word: "ocean".to_string(),
            related_word: vec!["sea".to_string(), "wave".to_string()],
            target_word_stem: "ocean".to_string(),
            related_word_stem: vec!["sea".to_string(), "wave".to_string()],
            lang: "en".to_string(),
        });
        InstanceFile {
            experiments: vec![experiment],
        }
    }

    #[test]
    fn test_experiment_name() {
        let experiment = Experiment::new("medium", "ru", 3);
        assert_eq!(experiment.name, "medium_ru");
        assert_eq!(experiment.next_id(), 0);
    }

    #[test]
    fn test_instance_json_field_names() {
        let file = sample_file();
        let json = serde_json::to_value(&file).unwrap();
        let instance = &json["experiments"][0]["game_instances"][0];

        assert_eq!(instance["id"], 0);
        assert_eq!(instance["target_word"], "ocean");
        assert_eq!(instance["related_word"][1], "wave");
        assert_eq!(instance["target_word_stem"], "ocean");
        assert_eq!(instance["lang"], "en");
        assert_eq!(json["experiments"][0]["max_turns"], 3);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("instances.json");
        let file = sample_file();

        file.save(&path).unwrap();
        let loaded = InstanceFile::load(&path).unwrap();

        assert_eq!(loaded, file);
        assert_eq!(loaded.instance_count(), 1);
        assert!(loaded.experiment("high_en").is_some());
    }

    #[test]
    fn test_instance_filename() {
        assert_eq!(
            instance_filename("v2.0", "en", "conceptnet"),
            "instances_v2.0_en_conceptnet.json"
        );
    }
}
