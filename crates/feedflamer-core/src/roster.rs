use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// The closed set of voices that may speak in an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeakerId {
    Host,
    Alex,
    Maya,
    Jordan,
    Sam,
}

impl SpeakerId {
    /// Every speaker, host first.
    pub const ALL: [SpeakerId; 5] = [
        SpeakerId::Host,
        SpeakerId::Alex,
        SpeakerId::Maya,
        SpeakerId::Jordan,
        SpeakerId::Sam,
    ];

    /// Transcript label used in `LABEL: text` lines.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SpeakerId::Host => "HOST",
            SpeakerId::Alex => "ALEX",
            SpeakerId::Maya => "MAYA",
            SpeakerId::Jordan => "JORDAN",
            SpeakerId::Sam => "SAM",
        }
    }

    /// Look up a speaker by its exact transcript label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        SpeakerId::ALL.into_iter().find(|id| id.label() == label)
    }
}

impl std::fmt::Display for SpeakerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panelist {
    pub id: SpeakerId,
    pub name: String,
    pub role: String,
    pub personality: String,
    pub voice_style: String,
}

/// Number of panelists on every episode, excluding the host.
pub const PANEL_SIZE: usize = 4;

/// The panel for one run: exactly four panelists plus the implicit host.
///
/// Built once and passed by reference into the composer and renderer; there
/// is no process-wide roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    panelists: Vec<Panelist>,
}

impl Roster {
    /// Build a roster from panelist records, enforcing the fixed panel.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] unless the records name Alex, Maya,
    /// Jordan and Sam exactly once each with non-empty name, role and personality.
    pub fn new(panelists: Vec<Panelist>) -> Result<Self, ConfigError> {
        validate_panelists(&panelists)?;
        Ok(Self { panelists })
    }

    /// Panelists in presentation order.
    #[must_use]
    pub fn panelists(&self) -> &[Panelist] {
        &self.panelists
    }

    /// Speaker labels in the order they are introduced, host first.
    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        std::iter::once(SpeakerId::Host.label())
            .chain(self.panelists.iter().map(|p| p.id.label()))
            .collect()
    }

    #[must_use]
    pub fn get(&self, id: SpeakerId) -> Option<&Panelist> {
        self.panelists.iter().find(|p| p.id == id)
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            panelists: default_panelists(),
        }
    }
}

fn panelist(id: SpeakerId, name: &str, role: &str, personality: &str, voice_style: &str) -> Panelist {
    Panelist {
        id,
        name: name.to_string(),
        role: role.to_string(),
        personality: personality.to_string(),
        voice_style: voice_style.to_string(),
    }
}

fn default_panelists() -> Vec<Panelist> {
    vec![
        panelist(
            SpeakerId::Alex,
            "Alex Rivera",
            "Social Media Strategist",
            "analytical, data-driven, focuses on engagement metrics and audience growth",
            "professional but approachable",
        ),
        panelist(
            SpeakerId::Maya,
            "Dr. Maya Chen",
            "Digital Communications Expert",
            "academic, thoughtful, examines communication effectiveness and clarity",
            "measured and insightful",
        ),
        panelist(
            SpeakerId::Jordan,
            "Jordan Blake",
            "Content Creator & Influencer",
            "creative, trend-focused, evaluates entertainment value and viral potential",
            "energetic and casual",
        ),
        panelist(
            SpeakerId::Sam,
            "Sam Martinez",
            "Brand Consultant",
            "business-minded, risk-aware, assesses brand impact and reputation",
            "direct and practical",
        ),
    ]
}

#[derive(Debug, Deserialize)]
pub struct RosterFile {
    pub panelists: Vec<Panelist>,
}

/// Load and validate a panel roster from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_roster(path: &Path) -> Result<Roster, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RosterFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let roster_file: RosterFile =
        serde_yaml::from_str(&content).map_err(ConfigError::RosterFileParse)?;

    Roster::new(roster_file.panelists)
}

fn validate_panelists(panelists: &[Panelist]) -> Result<(), ConfigError> {
    if panelists.len() != PANEL_SIZE {
        return Err(ConfigError::Validation(format!(
            "roster must list exactly {PANEL_SIZE} panelists, found {}",
            panelists.len()
        )));
    }

    let mut seen = HashSet::new();

    for p in panelists {
        if p.id == SpeakerId::Host {
            return Err(ConfigError::Validation(
                "the host is implicit and cannot be listed as a panelist".to_string(),
            ));
        }

        if !seen.insert(p.id) {
            return Err(ConfigError::Validation(format!(
                "duplicate panelist id: '{}'",
                p.id
            )));
        }

        for (field, value) in [
            ("name", &p.name),
            ("role", &p.role),
            ("personality", &p.personality),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "panelist '{}' has an empty {field}",
                    p.id
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "roster_test.rs"]
mod tests;
