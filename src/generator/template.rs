//! Deterministic offline generator.
//!
//! Produces templated content without any network dependency. Used by
//! the CLI as the default backend and useful wherever reproducible
//! output matters more than prose quality.

use async_trait::async_trait;

use super::{AchievementSpec, Content, ContentGenerator, GenerationError, GenerationRequest};
use crate::domain::{CriteriaKind, MissionFeedback, Rank};

/// Generator backed by fixed templates. Fully deterministic: the same
/// request always yields the same content.
#[derive(Debug, Clone, Default)]
pub struct TemplateGenerator;

static DAILY_TEMPLATES: &[(&str, &str)] = &[
    ("Spend 25 focused minutes on {}", "One uninterrupted session. Timer on, distractions off."),
    ("Write down one concrete step toward {}", "Small enough to finish today, specific enough to check off."),
    ("Review yesterday's progress on {}", "Read what you did last, note one thing to improve."),
    ("Do the hardest part of {} first", "Start with the piece you have been avoiding."),
    ("Teach someone one thing about {}", "Explaining it out loud exposes what you actually know."),
    ("Spend 40 minutes practicing {}", "Longer block today. Take one short break in the middle."),
    ("Remove one obstacle blocking {}", "Clear the desk, install the tool, make the call."),
];

impl TemplateGenerator {
    fn base_difficulty(rank: Rank) -> i32 {
        match rank {
            Rank::F => 2,
            Rank::E => 3,
            Rank::D => 4,
            Rank::C => 5,
            Rank::B => 6,
            Rank::A => 7,
            Rank::S => 8,
            Rank::SS => 9,
            Rank::SSS => 10,
        }
    }

    /// Coarse text complexity estimate, deterministic by construction.
    fn score_text(text: &str) -> u8 {
        let words = text.split_whitespace().count() as i32;
        (2 + words / 4).clamp(1, 10) as u8
    }
}

#[async_trait]
impl ContentGenerator for TemplateGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<Content, GenerationError> {
        let content = match request {
            GenerationRequest::NextDailyMission {
                goal,
                rank,
                completed,
                feedback,
                ..
            } => {
                let (name_tpl, desc) = DAILY_TEMPLATES[completed.len() % DAILY_TEMPLATES.len()];
                let mut difficulty = Self::base_difficulty(rank);
                match feedback {
                    Some(MissionFeedback::TooEasy) => difficulty += 1,
                    Some(MissionFeedback::TooHard) => difficulty -= 1,
                    _ => {}
                }
                Content::DailyMission {
                    name: name_tpl.replace("{}", &goal),
                    description: desc.to_string(),
                    difficulty: difficulty.clamp(1, 10) as u8,
                }
            }
            GenerationRequest::EpicMission { goal, rank, .. } => Content::EpicMission {
                title: format!("Rank {rank} trial: {goal}"),
            },
            GenerationRequest::TowerChallenge { floor, tier, .. } => Content::TowerChallenge {
                name: format!("Floor {floor} trial"),
                description: format!(
                    "A tier {tier} challenge. Hold the pace for every requirement."
                ),
                difficulty: (tier * 2).clamp(1, 10),
                requirements: vec![super::RequirementSpec {
                    description: format!("Complete the floor {floor} objective"),
                    target: tier as u32,
                }],
            },
            GenerationRequest::DungeonChallenge { skill, room, .. } => {
                Content::DungeonChallenge {
                    name: format!("Room {room}: {skill} depths"),
                    description: format!(
                        "Prove your {skill} under pressure. Submit what you did as evidence."
                    ),
                    difficulty: (1 + room / 2).clamp(1, 10) as u8,
                }
            }
            GenerationRequest::AchievementBatch { goals, .. } => {
                let mut specs = vec![
                    AchievementSpec {
                        id: "first-steps".into(),
                        name: "First Steps".into(),
                        description: "Complete your first daily mission".into(),
                        kind: CriteriaKind::MissionsCompleted,
                        target: 1,
                        category: None,
                    },
                    AchievementSpec {
                        id: "dedicated".into(),
                        name: "Dedicated".into(),
                        description: "Complete 10 daily missions".into(),
                        kind: CriteriaKind::MissionsCompleted,
                        target: 10,
                        category: None,
                    },
                    AchievementSpec {
                        id: "rising".into(),
                        name: "Rising".into(),
                        description: "Reach profile level 5".into(),
                        kind: CriteriaKind::LevelReached,
                        target: 5,
                        category: None,
                    },
                    AchievementSpec {
                        id: "week-strong".into(),
                        name: "Week Strong".into(),
                        description: "Maintain a 7 day streak".into(),
                        kind: CriteriaKind::StreakMaintained,
                        target: 7,
                        category: None,
                    },
                ];
                if !goals.is_empty() {
                    specs.push(AchievementSpec {
                        id: "finisher".into(),
                        name: "Finisher".into(),
                        description: "See one goal through to the end".into(),
                        kind: CriteriaKind::GoalsCompleted,
                        target: 1,
                        category: None,
                    });
                }
                Content::AchievementBatch(specs)
            }
            GenerationRequest::GoalSuggestions { interests } => {
                let suggestions = if interests.is_empty() {
                    vec![
                        "Run a 5k without stopping".to_string(),
                        "Read one book per month".to_string(),
                        "Learn conversational Spanish".to_string(),
                    ]
                } else {
                    interests
                        .iter()
                        .map(|i| format!("Get noticeably better at {i} in 90 days"))
                        .collect()
                };
                Content::GoalSuggestions(suggestions)
            }
            GenerationRequest::DifficultyScore { text } => {
                Content::Difficulty(Self::score_text(&text))
            }
        };

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GoalCategory;
    use crate::generator::generate_validated;

    #[tokio::test]
    async fn test_template_output_passes_validation() {
        let generator = TemplateGenerator;
        let requests = vec![
            GenerationRequest::NextDailyMission {
                goal: "learn piano".into(),
                category: GoalCategory::Creativity,
                rank: Rank::F,
                completed: vec!["warmup".into()],
                feedback: None,
            },
            GenerationRequest::EpicMission {
                goal: "learn piano".into(),
                category: GoalCategory::Creativity,
                rank: Rank::E,
            },
            GenerationRequest::TowerChallenge {
                floor: 42,
                tier: 3,
                profile_level: 7,
            },
            GenerationRequest::DungeonChallenge {
                skill: "piano".into(),
                room: 4,
                skill_level: 2,
            },
            GenerationRequest::AchievementBatch {
                profile_level: 1,
                goals: vec!["learn piano".into()],
            },
            GenerationRequest::GoalSuggestions { interests: vec![] },
            GenerationRequest::DifficultyScore {
                text: "practice scales for twenty minutes".into(),
            },
        ];
        for request in requests {
            generate_validated(&generator, request).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_feedback_shifts_difficulty() {
        let generator = TemplateGenerator;
        let base = GenerationRequest::NextDailyMission {
            goal: "write a novel".into(),
            category: GoalCategory::Creativity,
            rank: Rank::D,
            completed: vec![],
            feedback: None,
        };
        let harder = GenerationRequest::NextDailyMission {
            goal: "write a novel".into(),
            category: GoalCategory::Creativity,
            rank: Rank::D,
            completed: vec![],
            feedback: Some(MissionFeedback::TooEasy),
        };
        let d0 = match generator.generate(base).await.unwrap() {
            Content::DailyMission { difficulty, .. } => difficulty,
            other => panic!("unexpected content: {other:?}"),
        };
        let d1 = match generator.generate(harder).await.unwrap() {
            Content::DailyMission { difficulty, .. } => difficulty,
            other => panic!("unexpected content: {other:?}"),
        };
        assert_eq!(d1, d0 + 1);
    }
}
