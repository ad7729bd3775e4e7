//! # Render Context
//!
//! Ephemeral data bound into a template for one render call. Built fresh for
//! every render and never persisted.
//!
//! The general context exposes these keys, always present:
//!
//! | key | source |
//! |---|---|
//! | `visitor_name`, `visitor_email` | visitor (email `""` when absent) |
//! | `amount` | transaction amount in minor units |
//! | `currency`, `message`, `created_at` | transaction |
//! | `username`, `display_name`, `avatar_url`, `bio`, `socials` | creator profile |
//! | `user` | creator profile as an object |
//! | `data` | the block's data |

use chrono::{DateTime, Utc};
use potatopay_schema::{CreatorProfile, DataMap, LeaderboardData};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Who is tipping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Visitor {
    pub name: String,
    pub email: Option<String>,
}

/// The tip being displayed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    /// Minor currency units (paise, cents)
    pub amount: i64,
    pub currency: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// One row of the supporter leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranker {
    pub rank: u32,
    pub name: String,
    pub amount: i64,
    pub currency: String,
}

impl Ranker {
    pub fn new(rank: u32, name: impl Into<String>, amount: i64, currency: impl Into<String>) -> Self {
        Self {
            rank,
            name: name.into(),
            amount,
            currency: currency.into(),
        }
    }

    /// Fixed ranking used when no live leaderboard data is supplied
    pub fn sample() -> Vec<Ranker> {
        vec![
            Ranker::new(1, "Hash Brown", 250_000, "INR"),
            Ranker::new(2, "Tater Tot", 120_000, "INR"),
            Ranker::new(3, "Mashed Mike", 80_000, "INR"),
            Ranker::new(4, "Wedge", 45_000, "INR"),
            Ranker::new(5, "Chip", 10_000, "INR"),
        ]
    }
}

/// Podium position of a rank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankTier {
    First,
    Second,
    Third,
    Rest,
}

impl RankTier {
    pub fn of(rank: u32) -> Self {
        match rank {
            1 => RankTier::First,
            2 => RankTier::Second,
            3 => RankTier::Third,
            _ => RankTier::Rest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RankTier::First => "first",
            RankTier::Second => "second",
            RankTier::Third => "third",
            RankTier::Rest => "rest",
        }
    }
}

const PODIUM_COLORS: [&str; 3] = ["#FFD700", "#C0C0C0", "#CD7F32"];

/// Everything a block template can see
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderContext {
    pub visitor: Visitor,
    pub transaction: Transaction,
    pub creator: CreatorProfile,
    /// Live leaderboard; empty means "use the sample ranking"
    pub rankers: Vec<Ranker>,
}

impl RenderContext {
    pub fn new(creator: CreatorProfile) -> Self {
        Self {
            creator,
            ..Default::default()
        }
    }

    /// Sample tip used by editor previews
    pub fn preview(creator: CreatorProfile) -> Self {
        Self {
            visitor: Visitor {
                name: "Spud Fan".to_string(),
                email: Some("fan@example.com".to_string()),
            },
            transaction: Transaction {
                amount: 50_000,
                currency: "INR".to_string(),
                message: "Keep the stream going!".to_string(),
                created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default(),
            },
            creator,
            rankers: Vec::new(),
        }
    }

    pub fn with_visitor(mut self, name: impl Into<String>, email: Option<String>) -> Self {
        self.visitor = Visitor {
            name: name.into(),
            email,
        };
        self
    }

    pub fn with_transaction(mut self, amount: i64, currency: impl Into<String>, message: impl Into<String>) -> Self {
        self.transaction = Transaction {
            amount,
            currency: currency.into(),
            message: message.into(),
            created_at: Utc::now(),
        };
        self
    }

    pub fn with_rankers(mut self, rankers: Vec<Ranker>) -> Self {
        self.rankers = rankers;
        self
    }

    /// General context with `data` bound under the `data` key
    pub fn to_value(&self, data: Value) -> DataMap {
        let mut context = DataMap::new();
        context.insert("visitor_name".to_string(), json!(self.visitor.name));
        context.insert(
            "visitor_email".to_string(),
            json!(self.visitor.email.clone().unwrap_or_default()),
        );
        context.insert("amount".to_string(), json!(self.transaction.amount));
        context.insert("currency".to_string(), json!(self.transaction.currency));
        context.insert("message".to_string(), json!(self.transaction.message));
        context.insert(
            "created_at".to_string(),
            json!(self.transaction.created_at.to_rfc3339()),
        );
        context.insert("username".to_string(), json!(self.creator.username));
        context.insert("display_name".to_string(), json!(self.creator.display_name));
        context.insert("avatar_url".to_string(), json!(self.creator.avatar_url));
        context.insert("bio".to_string(), json!(self.creator.bio));
        context.insert("socials".to_string(), json!(self.creator.socials));
        context.insert("user".to_string(), json!(self.creator));
        context.insert("data".to_string(), data);
        context
    }

    /// Leaderboard context: enriched `rankers`, `data` and `username` only
    pub fn leaderboard_value(&self, data: &LeaderboardData) -> DataMap {
        let rankers = if self.rankers.is_empty() {
            Ranker::sample()
        } else {
            self.rankers.clone()
        };

        let rows: Vec<Value> = rankers
            .iter()
            .map(|ranker| {
                json!({
                    "rank": ranker.rank,
                    "name": ranker.name,
                    "amount": ranker.amount,
                    "currency": ranker.currency,
                    "tier": RankTier::of(ranker.rank).as_str(),
                    "palette_index": ranker.rank % 5,
                    "color": rank_color(ranker.rank, data),
                })
            })
            .collect();

        let mut context = DataMap::new();
        context.insert("rankers".to_string(), Value::Array(rows));
        context.insert("data".to_string(), json!(data));
        context.insert("username".to_string(), json!(self.creator.username));
        context
    }
}

/// Podium colors for ranks 1-3, then `rank_colors[rank % 5]`
fn rank_color(rank: u32, data: &LeaderboardData) -> String {
    match RankTier::of(rank) {
        RankTier::First => PODIUM_COLORS[0].to_string(),
        RankTier::Second => PODIUM_COLORS[1].to_string(),
        RankTier::Third => PODIUM_COLORS[2].to_string(),
        RankTier::Rest if data.rank_colors.is_empty() => data.text_color.clone(),
        RankTier::Rest => {
            let index = (rank % 5) as usize % data.rank_colors.len();
            data.rank_colors[index].clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_context_has_every_documented_key() {
        let context = RenderContext::default().to_value(json!({}));
        for key in [
            "visitor_name",
            "visitor_email",
            "amount",
            "currency",
            "message",
            "created_at",
            "username",
            "display_name",
            "avatar_url",
            "bio",
            "socials",
            "user",
            "data",
        ] {
            assert!(context.contains_key(key), "missing {}", key);
        }
        assert_eq!(context["visitor_email"], "");
    }

    #[test]
    fn test_leaderboard_uses_sample_when_empty() {
        let context = RenderContext::default().leaderboard_value(&LeaderboardData::default());
        assert_eq!(context["rankers"].as_array().unwrap().len(), 5);
        assert!(!context.contains_key("visitor_name"));
    }

    #[test]
    fn test_leaderboard_prefers_live_rankers() {
        let context = RenderContext::default()
            .with_rankers(vec![Ranker::new(1, "Only", 100, "USD")])
            .leaderboard_value(&LeaderboardData::default());

        let rows = context["rankers"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], "Only");
        assert_eq!(rows[0]["tier"], "first");
    }

    #[test]
    fn test_rank_colors_rotate_by_rank_mod_five() {
        let data = LeaderboardData::default();
        assert_eq!(rank_color(4, &data), data.rank_colors[4]);
        assert_eq!(rank_color(5, &data), data.rank_colors[0]);
        assert_eq!(rank_color(6, &data), data.rank_colors[1]);
        assert_eq!(rank_color(9, &data), data.rank_colors[4]);
    }

    #[test]
    fn test_podium_colors_are_distinct() {
        let data = LeaderboardData::default();
        let podium: Vec<String> = (1..=3).map(|rank| rank_color(rank, &data)).collect();
        assert_ne!(podium[0], podium[1]);
        assert_ne!(podium[1], podium[2]);
    }

    #[test]
    fn test_short_palette_wraps() {
        let data = LeaderboardData {
            rank_colors: vec!["#111111".to_string(), "#222222".to_string()],
            ..Default::default()
        };
        assert_eq!(rank_color(4, &data), "#111111");
        assert_eq!(rank_color(7, &data), "#111111");
    }
}
