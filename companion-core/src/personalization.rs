//! Skill level, difficulty and practice tips derived from stored progress

use serde::Serialize;

use crate::Result;
use crate::progress::{number_field, round_half_up};
use crate::storage::{ProgressFields, ProgressStore};

const BEGINNER_BELOW: f64 = 40.0;
const INTERMEDIATE_BELOW: f64 = 70.0;
/// A section under this score gets a fundamentals focus
const WEAK_AREA_BELOW: f64 = 50.0;
/// A section under this score gets a recommendation
const RECOMMEND_BELOW: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillLevel {
    pub level: Level,
    pub grammar: f64,
    pub vocabulary: f64,
    pub pronunciation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveDifficulty {
    pub complexity: String,
    pub vocabulary_level: String,
    pub grammar_focus: Vec<String>,
}

pub fn skill_level(fields: &ProgressFields) -> SkillLevel {
    let grammar = number_field(fields, "grammarScore");
    let vocabulary = number_field(fields, "vocabularyScore");
    let pronunciation = number_field(fields, "pronunciationScore");

    let total = grammar + vocabulary + pronunciation;
    let average = if total > 0.0 { round_half_up(total / 3.0) } else { 0.0 };
    let level = if average < BEGINNER_BELOW {
        Level::Beginner
    } else if average < INTERMEDIATE_BELOW {
        Level::Intermediate
    } else {
        Level::Advanced
    };

    SkillLevel {
        level,
        grammar,
        vocabulary,
        pronunciation,
    }
}

pub fn adaptive_difficulty(skill: &SkillLevel) -> AdaptiveDifficulty {
    let (complexity, vocabulary_level, focus): (&str, &str, [&str; 3]) = match skill.level {
        Level::Beginner => (
            "simple",
            "basic",
            ["present tense", "basic questions", "common phrases"],
        ),
        Level::Intermediate => (
            "moderate",
            "intermediate",
            ["past tense", "conditional", "complex sentences"],
        ),
        Level::Advanced => (
            "complex",
            "advanced",
            ["subjunctive", "idiomatic expressions", "nuanced vocabulary"],
        ),
    };
    let mut grammar_focus: Vec<String> = focus.iter().map(|s| s.to_string()).collect();

    // Ties keep this order, so grammar wins over vocabulary wins over pronunciation
    let mut areas = [
        (skill.grammar, "grammar fundamentals"),
        (skill.vocabulary, "vocabulary building"),
        (skill.pronunciation, "pronunciation practice"),
    ];
    areas.sort_by(|a, b| a.0.total_cmp(&b.0));
    let (weakest, extra) = areas[0];
    if weakest < WEAK_AREA_BELOW {
        grammar_focus.push(extra.to_string());
    }

    AdaptiveDifficulty {
        complexity: complexity.to_string(),
        vocabulary_level: vocabulary_level.to_string(),
        grammar_focus,
    }
}

pub fn recommendations(fields: &ProgressFields) -> Vec<String> {
    let checks = [
        (
            number_field(fields, "totalConversations") < 5.0,
            "Practice more conversations to build confidence",
        ),
        (
            number_field(fields, "streak") < 3.0,
            "Try to practice daily to maintain your streak!",
        ),
        (
            number_field(fields, "grammarScore") < RECOMMEND_BELOW,
            "Focus on grammar exercises and corrections",
        ),
        (
            number_field(fields, "vocabularyScore") < RECOMMEND_BELOW,
            "Expand your vocabulary with new words and phrases",
        ),
        (
            number_field(fields, "pronunciationScore") < RECOMMEND_BELOW,
            "Practice pronunciation with native-like patterns",
        ),
    ];
    let mut tips: Vec<String> = checks
        .iter()
        .filter(|(applies, _)| *applies)
        .map(|(_, tip)| tip.to_string())
        .collect();
    if tips.is_empty() {
        tips.push("Great progress! Keep practicing to maintain your skills".to_string());
    }
    tips
}

pub async fn user_skill_level(store: &dyn ProgressStore, user_id: &str) -> Result<SkillLevel> {
    let record = store.get_progress(user_id).await?;
    Ok(skill_level(&record.fields))
}

pub async fn user_difficulty(store: &dyn ProgressStore, user_id: &str) -> Result<AdaptiveDifficulty> {
    let skill = user_skill_level(store, user_id).await?;
    Ok(adaptive_difficulty(&skill))
}

pub async fn user_recommendations(store: &dyn ProgressStore, user_id: &str) -> Result<Vec<String>> {
    let record = store.get_progress(user_id).await?;
    Ok(recommendations(&record.fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryProgressStore;
    use serde_json::{Value, json};

    fn fields(value: Value) -> ProgressFields {
        value.as_object().cloned().unwrap()
    }

    fn scores(grammar: f64, vocabulary: f64, pronunciation: f64) -> ProgressFields {
        fields(json!({
            "grammarScore": grammar,
            "vocabularyScore": vocabulary,
            "pronunciationScore": pronunciation,
        }))
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(skill_level(&ProgressFields::new()).level, Level::Beginner);
        assert_eq!(skill_level(&scores(39.0, 39.0, 39.0)).level, Level::Beginner);
        assert_eq!(skill_level(&scores(40.0, 40.0, 40.0)).level, Level::Intermediate);
        assert_eq!(skill_level(&scores(69.0, 69.0, 69.0)).level, Level::Intermediate);
        assert_eq!(skill_level(&scores(70.0, 70.0, 70.0)).level, Level::Advanced);
    }

    #[test]
    fn test_average_rounds_before_thresholds() {
        // 39.5 rounds up to 40
        assert_eq!(skill_level(&scores(39.0, 40.0, 39.5)).level, Level::Intermediate);
        // 69.33 rounds down to 69
        assert_eq!(skill_level(&scores(69.0, 69.0, 70.0)).level, Level::Intermediate);
    }

    #[test]
    fn test_skill_level_shape() {
        let skill = skill_level(&scores(80.0, 65.0, 90.0));
        assert_eq!(
            serde_json::to_value(&skill).unwrap(),
            json!({"level": "advanced", "grammar": 80.0, "vocabulary": 65.0, "pronunciation": 90.0})
        );
    }

    #[test]
    fn test_difficulty_per_level() {
        let beginner = adaptive_difficulty(&skill_level(&scores(30.0, 30.0, 0.0)));
        assert_eq!(beginner.complexity, "simple");
        assert_eq!(beginner.vocabulary_level, "basic");

        let intermediate = adaptive_difficulty(&skill_level(&scores(60.0, 60.0, 60.0)));
        assert_eq!(
            serde_json::to_value(&intermediate).unwrap(),
            json!({
                "complexity": "moderate",
                "vocabularyLevel": "intermediate",
                "grammarFocus": ["past tense", "conditional", "complex sentences"]
            })
        );
    }

    #[test]
    fn test_weakest_area_adds_focus() {
        let difficulty = adaptive_difficulty(&skill_level(&scores(80.0, 90.0, 30.0)));
        assert_eq!(difficulty.complexity, "moderate");
        assert_eq!(
            difficulty.grammar_focus.last().map(String::as_str),
            Some("pronunciation practice")
        );

        let difficulty = adaptive_difficulty(&skill_level(&scores(90.0, 45.0, 80.0)));
        assert_eq!(
            difficulty.grammar_focus.last().map(String::as_str),
            Some("vocabulary building")
        );
    }

    #[test]
    fn test_weakest_area_tie_prefers_grammar() {
        let difficulty = adaptive_difficulty(&skill_level(&ProgressFields::new()));
        assert_eq!(
            difficulty.grammar_focus,
            vec!["present tense", "basic questions", "common phrases", "grammar fundamentals"]
        );

        let difficulty = adaptive_difficulty(&skill_level(&scores(90.0, 20.0, 20.0)));
        assert_eq!(
            difficulty.grammar_focus.last().map(String::as_str),
            Some("vocabulary building")
        );
    }

    #[test]
    fn test_no_weak_area_no_extra_focus() {
        let difficulty = adaptive_difficulty(&skill_level(&scores(50.0, 80.0, 90.0)));
        assert_eq!(difficulty.grammar_focus.len(), 3);
    }

    #[test]
    fn test_recommendations_for_new_user() {
        assert_eq!(
            recommendations(&ProgressFields::new()),
            vec![
                "Practice more conversations to build confidence",
                "Try to practice daily to maintain your streak!",
                "Focus on grammar exercises and corrections",
                "Expand your vocabulary with new words and phrases",
                "Practice pronunciation with native-like patterns",
            ]
        );
    }

    #[test]
    fn test_recommendations_when_doing_well() {
        let progress = fields(json!({
            "totalConversations": 12,
            "streak": 4,
            "grammarScore": 75,
            "vocabularyScore": 60,
            "pronunciationScore": 82,
        }));
        assert_eq!(
            recommendations(&progress),
            vec!["Great progress! Keep practicing to maintain your skills"]
        );
    }

    #[tokio::test]
    async fn test_reads_from_store() {
        let store = MemoryProgressStore::new();
        store
            .update_progress("u1", scores(85.0, 75.0, 80.0))
            .await
            .unwrap();

        let skill = user_skill_level(&store, "u1").await.unwrap();
        assert_eq!(skill.level, Level::Advanced);

        let difficulty = user_difficulty(&store, "u1").await.unwrap();
        assert_eq!(difficulty.complexity, "complex");

        let tips = user_recommendations(&store, "u1").await.unwrap();
        assert_eq!(tips.len(), 2);
        assert_eq!(tips[0], "Practice more conversations to build confidence");
    }
}
