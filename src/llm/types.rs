//! Report types — the structured output of one analysis.
//!
//! The model returns JSON that deserializes into these types after
//! extraction and validation. Field names are camelCase on the wire; only
//! the four top-level sections are required, everything below them defaults
//! so a sparse model answer still produces a usable report.

use serde::{Deserialize, Serialize};

/// Notice attached to every reference report.
pub const REFERENCE_NOTICE: &str =
    "Placeholder report — set ARK_API_KEY to get a real analysis.";

/// The full analysis report: who they are, how to approach them,
/// what to say first, and how well you might match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub profile: Profile,
    pub strategy: Strategy,
    #[serde(default)]
    pub openers: Vec<Opener>,
    pub compatibility: Compatibility,
    /// Present only on placeholder data (reference mode).
    #[serde(rename = "_notice", default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Personality portrait inferred from the screenshots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub personality: Personality,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub lifestyle: Lifestyle,
    #[serde(default)]
    pub emotional_status: EmotionalStatus,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub language_style: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Personality {
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub mbti_guess: Option<String>,
    #[serde(default)]
    pub scores: PersonalityScores,
}

/// Trait scores on a 0–100 scale. The validator clamps these into range —
/// the radar visualization assumes it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityScores {
    #[serde(default)]
    pub extroversion: f64,
    #[serde(default)]
    pub rationality: f64,
    #[serde(default)]
    pub openness: f64,
    #[serde(default)]
    pub agreeableness: f64,
    #[serde(default)]
    pub conscientiousness: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lifestyle {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub schedule: String,
    #[serde(default)]
    pub social_circle: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionalStatus {
    #[serde(default)]
    pub single_probability: String,
    #[serde(default)]
    pub emotional_needs: String,
}

/// Approach recommendations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    #[serde(default)]
    pub common_topics: Vec<String>,
    #[serde(default)]
    pub date_ideas: Vec<String>,
    #[serde(default)]
    pub communication_tips: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// One suggested opening line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opener {
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compatibility {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub challenges: Vec<String>,
}

impl AnalysisReport {
    /// Deterministic reference report for when no provider credential is
    /// configured. Carries `_notice` so the client can flag placeholder data.
    pub fn reference() -> Self {
        Self {
            profile: Profile {
                summary: "An upbeat urban professional who cares about quality of life and loves discovering new things".to_string(),
                personality: Personality {
                    traits: vec![
                        "Outgoing".to_string(),
                        "Curious".to_string(),
                        "Detail-oriented".to_string(),
                        "Good aesthetic sense".to_string(),
                        "A touch artsy".to_string(),
                    ],
                    mbti_guess: Some("ENFP".to_string()),
                    scores: PersonalityScores {
                        extroversion: 75.0,
                        rationality: 45.0,
                        openness: 85.0,
                        agreeableness: 70.0,
                        conscientiousness: 60.0,
                    },
                },
                interests: vec![
                    "Travel".to_string(),
                    "Food spots".to_string(),
                    "Photography".to_string(),
                    "Coffee".to_string(),
                    "Film".to_string(),
                    "Reading".to_string(),
                ],
                lifestyle: Lifestyle {
                    description: "Weekend café-hopping and the occasional trip, regular weekday routine, values work-life balance".to_string(),
                    schedule: "Nine-to-six weekdays, busy weekends".to_string(),
                    social_circle: "Stable circle of friends, moderate social calendar — time alone as well as gatherings".to_string(),
                },
                emotional_status: EmotionalStatus {
                    single_probability: "high".to_string(),
                    emotional_needs: "Wants a partner who shares their topics and outlook, and who makes them feel understood and appreciated".to_string(),
                },
                values: vec![
                    "Quality of life".to_string(),
                    "Personal growth".to_string(),
                    "Friends and family".to_string(),
                    "Effort pays off".to_string(),
                ],
                language_style: "Writes with care, likes emoji, occasionally quotes lyrics or book passages — a literary streak".to_string(),
            },
            strategy: Strategy {
                common_topics: vec![
                    "Any good films you've seen lately?".to_string(),
                    "Your favorite place you've ever traveled to".to_string(),
                    "That great café/restaurant you just found".to_string(),
                    "What you're reading at the moment".to_string(),
                    "How you usually spend a weekend".to_string(),
                ],
                date_ideas: vec![
                    "Check out that newly opened café together".to_string(),
                    "An easy weekend hike just outside the city".to_string(),
                    "Dinner somewhere with real atmosphere".to_string(),
                    "A well-reviewed film".to_string(),
                    "Browse a market or an exhibition".to_string(),
                ],
                communication_tips: vec![
                    "Show genuine curiosity and respond to the specifics of what they share".to_string(),
                    "Offer your own similar experiences to build common ground".to_string(),
                    "Keep the tone light and playful, but don't overdo the jokes".to_string(),
                    "Respect their space — don't message too often".to_string(),
                    "Remember details they mention and bring them up naturally later".to_string(),
                ],
                warnings: vec![
                    "Don't open with overly personal questions".to_string(),
                    "Don't come across as over-eager or ingratiating".to_string(),
                    "Make the conversation a two-way street, not a monologue".to_string(),
                    "Avoid negativity and complaining".to_string(),
                    "Don't rush to confess feelings or force the pace".to_string(),
                ],
            },
            openers: vec![
                Opener {
                    style: "curious".to_string(),
                    text: "Saw you went to X — is it really as beautiful as everyone says? Been meaning to go but haven't found the time.".to_string(),
                },
                Opener {
                    style: "kindred".to_string(),
                    text: "You like X too! That's properly niche — rare to run into a fellow fan.".to_string(),
                },
                Opener {
                    style: "playful".to_string(),
                    text: "Your photo composition is unfairly good. Any secret technique you could pass on? Mine all come out looking like tourist snaps.".to_string(),
                },
                Opener {
                    style: "sincere".to_string(),
                    text: "Hope you don't mind me reaching out — I found what you shared about X really interesting and wanted to say hi.".to_string(),
                },
            ],
            compatibility: Compatibility {
                strengths: vec![
                    "You both care about quality of life — shared values to build on".to_string(),
                    "Overlapping interests, so topics won't run dry".to_string(),
                    "They're outgoing, so conversation should flow easily".to_string(),
                ],
                challenges: vec![
                    "You'll need to show your interesting side to stand out".to_string(),
                    "They likely have a wide social circle — building something distinct takes patience".to_string(),
                    "Finding the right moment and pace to move things forward".to_string(),
                ],
            },
            notice: Some(REFERENCE_NOTICE.to_string()),
        }
    }
}
