use serde::{Deserialize, Serialize};

/// One social link (`platform` is a lowercase slug such as `twitch`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

impl SocialLink {
    pub fn new(platform: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            url: url.into(),
        }
    }
}

/// Public profile of the creator whose page is being rendered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatorProfile {
    pub username: String,
    pub display_name: String,
    pub avatar_url: String,
    pub bio: String,
    pub socials: Vec<SocialLink>,
}
