//! Platforms, urgency levels, and the static per-platform constant table.
//!
//! Every per-platform lookup (prompt spec, image size, call-to-action, posting
//! window) goes through [`Platform::profile`]. Unlisted platforms resolve to
//! [`DEFAULT_PROFILE`], which mirrors the twitter entry.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Target social network.
///
/// Deserializes from any string: the four known names map to their variants
/// (case-insensitively) and anything else is kept as `Unlisted`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    #[default]
    Twitter,
    Linkedin,
    Instagram,
    Facebook,
    Unlisted(String),
}

/// Platforms covered by a campaign run, in generation order.
pub const CAMPAIGN_PLATFORMS: [Platform; 3] =
    [Platform::Twitter, Platform::Linkedin, Platform::Instagram];

/// Constants that vary by platform.
#[derive(Debug, PartialEq, Eq)]
pub struct PlatformProfile {
    /// Formatting guidance given to the text model.
    pub spec: &'static str,
    pub image_width: u32,
    pub image_height: u32,
    /// Closing line offered as the call-to-action variant.
    pub call_to_action: &'static str,
    pub optimal_post_time: &'static str,
}

const TWITTER: PlatformProfile = PlatformProfile {
    spec: "Max 280 characters, hashtags count toward limit, visual content performs well",
    image_width: 1200,
    image_height: 675,
    call_to_action: "What's your experience with this? 💭",
    optimal_post_time: "1-3 PM or 5-6 PM weekdays",
};

const LINKEDIN: PlatformProfile = PlatformProfile {
    spec: "Professional tone, longer form content OK (up to 1300 chars), industry insights valued",
    image_width: 1200,
    image_height: 627,
    call_to_action: "What are your thoughts? Share your insights below! 👇",
    optimal_post_time: "7:45-8:30 AM, 12 PM, or 5-6 PM weekdays",
};

const INSTAGRAM: PlatformProfile = PlatformProfile {
    spec: "Visual-first, story-driven captions, emoji-friendly, hashtag groups work well",
    image_width: 1080,
    image_height: 1080,
    call_to_action: "Double-tap if you agree! 💙 What's your take?",
    optimal_post_time: "11 AM-2 PM or 5-7 PM",
};

const FACEBOOK: PlatformProfile = PlatformProfile {
    spec: "Community-focused, conversation starters, mixed content types perform well",
    image_width: 1200,
    image_height: 630,
    call_to_action: "Let's discuss in the comments! What do you think? 🤔",
    optimal_post_time: "1-4 PM or 6-9 PM",
};

/// Entry used for unlisted platforms.
pub const DEFAULT_PROFILE: PlatformProfile = TWITTER;

impl Platform {
    pub fn profile(&self) -> &'static PlatformProfile {
        match self {
            Platform::Twitter => &TWITTER,
            Platform::Linkedin => &LINKEDIN,
            Platform::Instagram => &INSTAGRAM,
            Platform::Facebook => &FACEBOOK,
            Platform::Unlisted(_) => &DEFAULT_PROFILE,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Unlisted(name) => name,
        }
    }

    /// Only twitter enforces a hard character cap.
    pub fn char_limit(&self) -> Option<usize> {
        matches!(self, Platform::Twitter).then_some(280)
    }
}

impl From<String> for Platform {
    fn from(name: String) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "twitter" => Platform::Twitter,
            "linkedin" => Platform::Linkedin,
            "instagram" => Platform::Instagram,
            "facebook" => Platform::Facebook,
            _ => Platform::Unlisted(name),
        }
    }
}

impl From<&str> for Platform {
    fn from(name: &str) -> Self {
        Platform::from(name.to_string())
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.as_str().to_string()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied priority hint. Only affects prompt framing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Normal,
    Urgent,
    Breaking,
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Urgency::Normal => "normal",
            Urgency::Urgent => "urgent",
            Urgency::Breaking => "breaking",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_platforms_parse_case_insensitively() {
        assert_eq!(Platform::from("LinkedIn"), Platform::Linkedin);
        assert_eq!(Platform::from(" instagram "), Platform::Instagram);
        assert_eq!(Platform::from("twitter"), Platform::Twitter);
    }

    #[test]
    fn test_unknown_platform_uses_default_profile() {
        let platform = Platform::from("mastodon");
        assert_eq!(platform, Platform::Unlisted("mastodon".to_string()));
        assert_eq!(platform.profile(), &DEFAULT_PROFILE);
        assert_eq!(platform.profile().spec, Platform::Twitter.profile().spec);
        assert_eq!(platform.as_str(), "mastodon");
    }

    #[test]
    fn test_only_twitter_has_char_limit() {
        assert_eq!(Platform::Twitter.char_limit(), Some(280));
        assert_eq!(Platform::Linkedin.char_limit(), None);
        assert_eq!(Platform::Facebook.char_limit(), None);
        assert_eq!(Platform::from("x").char_limit(), None);
    }

    #[test]
    fn test_image_dimensions_per_platform() {
        let dims = |p: Platform| (p.profile().image_width, p.profile().image_height);
        assert_eq!(dims(Platform::Twitter), (1200, 675));
        assert_eq!(dims(Platform::Linkedin), (1200, 627));
        assert_eq!(dims(Platform::Instagram), (1080, 1080));
        assert_eq!(dims(Platform::Facebook), (1200, 630));
        assert_eq!(dims(Platform::from("tiktok")), (1200, 675));
    }

    #[test]
    fn test_platform_serde_as_plain_string() {
        let platform: Platform = serde_json::from_str(r#""facebook""#).unwrap();
        assert_eq!(platform, Platform::Facebook);
        assert_eq!(serde_json::to_string(&Platform::Linkedin).unwrap(), r#""linkedin""#);
    }

    #[test]
    fn test_urgency_serde_lowercase() {
        let urgency: Urgency = serde_json::from_str(r#""breaking""#).unwrap();
        assert_eq!(urgency, Urgency::Breaking);
        assert_eq!(Urgency::default(), Urgency::Normal);
        assert!(serde_json::from_str::<Urgency>(r#""whenever""#).is_err());
    }
}
