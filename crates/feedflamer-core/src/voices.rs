//! Speaker → voice configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::roster::SpeakerId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechRate {
    #[default]
    Normal,
    Slow,
}

/// How one speaker sounds: language, regional accent, and pace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceProfile {
    pub speaker_label: String,
    /// BCP-47 primary language, e.g. `en`.
    pub language_code: String,
    /// Regional host suffix selecting the accent, e.g. `co.uk` or `com.au`.
    pub regional_variant: String,
    pub rate: SpeechRate,
}

impl VoiceProfile {
    #[must_use]
    pub fn new(speaker_label: &str, language_code: &str, regional_variant: &str, rate: SpeechRate) -> Self {
        Self {
            speaker_label: speaker_label.to_string(),
            language_code: language_code.to_string(),
            regional_variant: regional_variant.to_string(),
            rate,
        }
    }
}

/// Label used for the single-voice narration profile.
pub const FALLBACK_LABEL: &str = "NARRATOR";

/// Regional variant for each speaker in the default mapping.
const DEFAULT_VARIANTS: [(SpeakerId, &str); 5] = [
    (SpeakerId::Host, "com"),
    (SpeakerId::Alex, "co.uk"),
    (SpeakerId::Maya, "com.au"),
    (SpeakerId::Jordan, "ca"),
    (SpeakerId::Sam, "com"),
];

/// Voice lookup by transcript label, plus a fallback narrator voice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceMap {
    voices: BTreeMap<String, VoiceProfile>,
    fallback: VoiceProfile,
}

impl VoiceMap {
    /// An empty map that only knows the fallback voice.
    #[must_use]
    pub fn new(fallback: VoiceProfile) -> Self {
        Self {
            voices: BTreeMap::new(),
            fallback,
        }
    }

    /// The standard five-voice mapping in `language`.
    ///
    /// Every speaker talks at normal pace; `fallback_rate` only applies to
    /// single-voice narration.
    #[must_use]
    pub fn with_defaults(language: &str, fallback_rate: SpeechRate) -> Self {
        let mut map = Self::new(VoiceProfile::new(
            FALLBACK_LABEL,
            language,
            "com",
            fallback_rate,
        ));
        for (id, variant) in DEFAULT_VARIANTS {
            map.insert(VoiceProfile::new(
                id.label(),
                language,
                variant,
                SpeechRate::Normal,
            ));
        }
        map
    }

    /// Add or replace the voice for `profile.speaker_label`.
    pub fn insert(&mut self, profile: VoiceProfile) {
        self.voices.insert(profile.speaker_label.clone(), profile);
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&VoiceProfile> {
        self.voices.get(label)
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.voices.contains_key(label)
    }

    #[must_use]
    pub fn fallback(&self) -> &VoiceProfile {
        &self.fallback
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.voices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}

impl Default for VoiceMap {
    fn default() -> Self {
        Self::with_defaults("en", SpeechRate::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_map_covers_every_speaker() {
        let map = VoiceMap::default();
        assert_eq!(map.len(), SpeakerId::ALL.len());
        for id in SpeakerId::ALL {
            assert!(map.contains(id.label()), "missing voice for {id}");
        }
    }

    #[test]
    fn default_variants_give_panelists_distinct_accents() {
        let map = VoiceMap::default();
        assert_eq!(map.get("ALEX").unwrap().regional_variant, "co.uk");
        assert_eq!(map.get("MAYA").unwrap().regional_variant, "com.au");
        assert_eq!(map.get("JORDAN").unwrap().regional_variant, "ca");
        assert_eq!(map.get("HOST").unwrap().rate, SpeechRate::Normal);
    }

    #[test]
    fn fallback_uses_configured_language_and_rate() {
        let map = VoiceMap::with_defaults("fr", SpeechRate::Slow);
        assert_eq!(map.fallback().language_code, "fr");
        assert_eq!(map.fallback().rate, SpeechRate::Slow);
        assert_eq!(map.fallback().speaker_label, FALLBACK_LABEL);
        assert_eq!(map.get("SAM").unwrap().language_code, "fr");
    }

    #[test]
    fn unknown_label_has_no_voice() {
        let map = VoiceMap::default();
        assert!(map.get("NARRATOR").is_none());
        assert!(!map.contains("GUEST"));
    }

    #[test]
    fn insert_replaces_existing_voice() {
        let mut map = VoiceMap::default();
        map.insert(VoiceProfile::new("HOST", "en", "ie", SpeechRate::Slow));
        assert_eq!(map.len(), 5);
        assert_eq!(map.get("HOST").unwrap().regional_variant, "ie");
    }

    #[test]
    fn new_map_is_empty_but_has_fallback() {
        let map = VoiceMap::new(VoiceProfile::new("X", "en", "com", SpeechRate::Normal));
        assert!(map.is_empty());
        assert_eq!(map.fallback().speaker_label, "X");
    }
}
