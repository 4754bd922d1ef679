use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const FALLBACK_GUIDANCE: &str = "Find the letter!";

/// Which finger should press a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display, strum_macros::IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum FingerZone {
    LeftPinky,
    LeftRing,
    LeftMiddle,
    LeftIndex,
    Thumbs,
    RightIndex,
    RightMiddle,
    RightRing,
    RightPinky,
}

impl FingerZone {
    pub const ALL: [FingerZone; 9] = [
        FingerZone::LeftPinky,
        FingerZone::LeftRing,
        FingerZone::LeftMiddle,
        FingerZone::LeftIndex,
        FingerZone::Thumbs,
        FingerZone::RightIndex,
        FingerZone::RightMiddle,
        FingerZone::RightRing,
        FingerZone::RightPinky,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|zone| zone.tag() == tag)
    }

    pub fn tag(self) -> &'static str {
        self.into()
    }

    pub fn guidance(self) -> &'static str {
        match self {
            FingerZone::LeftPinky => "Use your LEFT PINKY finger! 🤙",
            FingerZone::LeftRing => "Use your LEFT RING finger! 💍",
            FingerZone::LeftMiddle => "Use your LEFT MIDDLE finger! 🖕",
            FingerZone::LeftIndex => "Use your LEFT INDEX finger! 👉",
            FingerZone::Thumbs => "Use your THUMBS! 👍",
            FingerZone::RightIndex => "Use your RIGHT INDEX finger! 👉",
            FingerZone::RightMiddle => "Use your RIGHT MIDDLE finger! 🖕",
            FingerZone::RightRing => "Use your RIGHT RING finger! 💍",
            FingerZone::RightPinky => "Use your RIGHT PINKY finger! 🤙",
        }
    }
}

/// Guidance text for a zone tag; unknown tags get the generic hint.
pub fn guidance_for_tag(tag: &str) -> &'static str {
    FingerZone::from_tag(tag)
        .map(FingerZone::guidance)
        .unwrap_or(FALLBACK_GUIDANCE)
}

const QWERTY_ZONES: &[(&str, FingerZone)] = &[
    ("1qaz", FingerZone::LeftPinky),
    ("2wsx", FingerZone::LeftRing),
    ("3edc", FingerZone::LeftMiddle),
    ("45rtfgvb", FingerZone::LeftIndex),
    (" ", FingerZone::Thumbs),
    ("67yuhjnm", FingerZone::RightIndex),
    ("8ik,", FingerZone::RightMiddle),
    ("9ol.", FingerZone::RightRing),
    ("0p;/-'", FingerZone::RightPinky),
];

/// Key to zone-tag table for the on-screen keyboard.
///
/// Tags are plain strings so a config file can use any tag; tags that do not
/// name a [`FingerZone`] resolve to [`FALLBACK_GUIDANCE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyboardLayout {
    zones: BTreeMap<String, String>,
}

impl KeyboardLayout {
    pub fn qwerty() -> Self {
        let zones = QWERTY_ZONES
            .iter()
            .flat_map(|(keys, zone)| {
                keys.chars()
                    .map(move |c| (c.to_string(), zone.tag().to_string()))
            })
            .collect();
        Self { zones }
    }

    pub fn from_zones(zones: BTreeMap<String, String>) -> Self {
        Self { zones }
    }

    pub fn zone_tag(&self, key: char) -> Option<&str> {
        let key = key.to_lowercase().to_string();
        self.zones.get(&key).map(String::as_str)
    }

    pub fn contains(&self, key: char) -> bool {
        self.zone_tag(key).is_some()
    }

    /// Guidance for a key, or the generic hint when the key is not on the layout.
    pub fn guidance(&self, key: char) -> &'static str {
        self.zone_tag(key)
            .map(guidance_for_tag)
            .unwrap_or(FALLBACK_GUIDANCE)
    }
}

impl Default for KeyboardLayout {
    fn default() -> Self {
        Self::qwerty()
    }
}

/// Exclusive on-screen key highlight: at most one key lit at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyHighlight {
    key: Option<char>,
    guidance: Option<&'static str>,
}

impl KeyHighlight {
    /// Light `key` (clearing whatever was lit before) and resolve its guidance.
    pub fn show(&mut self, key: char, layout: &KeyboardLayout) {
        self.clear();
        let key = key.to_lowercase().next().unwrap_or(key);
        if layout.contains(key) {
            self.key = Some(key);
        }
        self.guidance = Some(layout.guidance(key));
    }

    pub fn clear(&mut self) {
        self.key = None;
        self.guidance = None;
    }

    pub fn key(&self) -> Option<char> {
        self.key
    }

    pub fn guidance(&self) -> Option<&'static str> {
        self.guidance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_tags_are_kebab_case() {
        assert_eq!(FingerZone::LeftPinky.tag(), "left-pinky");
        assert_eq!(FingerZone::RightIndex.to_string(), "right-index");
        assert_eq!(FingerZone::Thumbs.tag(), "thumbs");
    }

    #[test]
    fn test_from_tag_round_trip() {
        for zone in FingerZone::ALL {
            assert_eq!(FingerZone::from_tag(zone.tag()), Some(zone));
        }
        assert_eq!(FingerZone::from_tag("left-toe"), None);
    }

    #[test]
    fn test_guidance_for_tag() {
        assert_eq!(guidance_for_tag("left-pinky"), "Use your LEFT PINKY finger! 🤙");
        assert_eq!(guidance_for_tag("thumbs"), "Use your THUMBS! 👍");
        assert_eq!(guidance_for_tag("nose"), FALLBACK_GUIDANCE);
    }

    #[test]
    fn test_qwerty_covers_the_alphabet() {
        let layout = KeyboardLayout::qwerty();
        for c in 'a'..='z' {
            assert!(layout.contains(c), "missing key {c}");
        }
        assert_eq!(layout.zone_tag('f'), Some("left-index"));
        assert_eq!(layout.zone_tag('J'), Some("right-index"));
        assert_eq!(layout.zone_tag(' '), Some("thumbs"));
        assert_eq!(layout.guidance('a'), "Use your LEFT PINKY finger! 🤙");
    }

    #[test]
    fn test_unknown_zone_in_custom_layout() {
        let mut zones = BTreeMap::new();
        zones.insert("a".to_string(), "left-elbow".to_string());
        let layout = KeyboardLayout::from_zones(zones);
        assert_eq!(layout.guidance('a'), FALLBACK_GUIDANCE);
        assert_eq!(layout.guidance('b'), FALLBACK_GUIDANCE);
    }

    #[test]
    fn test_highlight_is_exclusive() {
        let layout = KeyboardLayout::qwerty();
        let mut highlight = KeyHighlight::default();

        highlight.show('c', &layout);
        assert_eq!(highlight.key(), Some('c'));
        assert_eq!(highlight.guidance(), Some("Use your LEFT MIDDLE finger! 🖕"));

        highlight.show('a', &layout);
        assert_eq!(highlight.key(), Some('a'));
        assert_eq!(highlight.guidance(), Some("Use your LEFT PINKY finger! 🤙"));

        highlight.clear();
        assert_eq!(highlight.key(), None);
        assert_eq!(highlight.guidance(), None);
    }

    #[test]
    fn test_highlight_key_missing_from_layout() {
        let layout = KeyboardLayout::qwerty();
        let mut highlight = KeyHighlight::default();

        highlight.show('a', &layout);
        highlight.show('é', &layout);
        assert_eq!(highlight.key(), None);
        assert_eq!(highlight.guidance(), Some(FALLBACK_GUIDANCE));
    }

    #[test]
    fn test_layout_serializes_as_plain_map() {
        let layout = KeyboardLayout::qwerty();
        let json = serde_json::to_string(&layout).unwrap();
        let back: KeyboardLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(layout, back);
        assert!(json.contains("\"q\":\"left-pinky\""));
    }
}
