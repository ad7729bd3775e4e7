//! Per-type `data` payloads.
//!
//! Each struct's `Default` impl is the canonical default for a freshly
//! created block of that type. Keys the struct does not know about are kept
//! in `extra` so documents written by other clients survive a round trip.

use crate::profile::{CreatorProfile, SocialLink};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Open-ended JSON object used for generic blocks and compound sub-blocks
pub type DataMap = serde_json::Map<String, serde_json::Value>;

/// Anything that can sit in a block's `data` slot
pub trait BlockData: Serialize + DeserializeOwned + Default + Clone {}

impl<T: Serialize + DeserializeOwned + Default + Clone> BlockData for T {}

/// Theme and timing of a tip alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TipData {
    pub primary_color: String,
    pub secondary_color: String,
    pub text_color: String,
    pub message_text_color: String,
    /// Empty when no background image is set
    pub background_image: String,
    /// Seconds the alert stays on screen
    pub display_time: u32,
    #[serde(flatten)]
    pub extra: DataMap,
}

impl Default for TipData {
    fn default() -> Self {
        Self {
            primary_color: "#FACC15".to_string(),
            secondary_color: "#1F2937".to_string(),
            text_color: "#111827".to_string(),
            message_text_color: "#374151".to_string(),
            background_image: String::new(),
            display_time: 5,
            extra: DataMap::new(),
        }
    }
}

/// Color scheme of the generated QR image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrCodeData {
    pub background_color: String,
    pub qr_code_color: String,
    #[serde(flatten)]
    pub extra: DataMap,
}

impl Default for QrCodeData {
    fn default() -> Self {
        Self {
            background_color: "#FFFFFF".to_string(),
            qr_code_color: "#000000".to_string(),
            extra: DataMap::new(),
        }
    }
}

/// Presentation of the ranked supporter list.
///
/// The rankers themselves come from the render context, not from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardData {
    pub title: String,
    pub primary_color: String,
    /// Rotating palette for ranks past the podium, indexed by `rank % 5`
    pub rank_colors: Vec<String>,
    pub text_color: String,
    pub heading_text_color: String,
    pub background_image: String,
    #[serde(flatten)]
    pub extra: DataMap,
}

impl Default for LeaderboardData {
    fn default() -> Self {
        Self {
            title: "Top Supporters".to_string(),
            primary_color: "#1F2937".to_string(),
            rank_colors: vec![
                "#F87171".to_string(),
                "#60A5FA".to_string(),
                "#34D399".to_string(),
                "#A78BFA".to_string(),
                "#FBBF24".to_string(),
            ],
            text_color: "#F9FAFB".to_string(),
            heading_text_color: "#FACC15".to_string(),
            background_image: String::new(),
            extra: DataMap::new(),
        }
    }
}

/// Social links shown by a socials block.
///
/// Seeded from the creator's profile but edited independently afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialsData {
    pub socials: Vec<SocialLink>,
    #[serde(flatten)]
    pub extra: DataMap,
}

impl SocialsData {
    pub fn from_profile(profile: &CreatorProfile) -> Self {
        Self {
            socials: profile.socials.clone(),
            extra: DataMap::new(),
        }
    }
}
