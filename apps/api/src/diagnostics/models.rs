use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Device categories
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceCategory {
    #[serde(rename = "laptop")]
    Laptop,
    #[serde(rename = "tv")]
    Tv,
    #[serde(rename = "ac")]
    AirConditioner,
    #[serde(rename = "washing-machine")]
    WashingMachine,
    #[serde(rename = "network")]
    Network,
    #[serde(rename = "other")]
    Other,
}

impl DeviceCategory {
    pub const ALL: [DeviceCategory; 6] = [
        DeviceCategory::Laptop,
        DeviceCategory::Tv,
        DeviceCategory::AirConditioner,
        DeviceCategory::WashingMachine,
        DeviceCategory::Network,
        DeviceCategory::Other,
    ];

    /// Wire id, also the label embedded in the prompt.
    pub fn id(self) -> &'static str {
        match self {
            DeviceCategory::Laptop => "laptop",
            DeviceCategory::Tv => "tv",
            DeviceCategory::AirConditioner => "ac",
            DeviceCategory::WashingMachine => "washing-machine",
            DeviceCategory::Network => "network",
            DeviceCategory::Other => "other",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            DeviceCategory::Laptop => "Laptopi",
            DeviceCategory::Tv => "Televizor",
            DeviceCategory::AirConditioner => "Klima",
            DeviceCategory::WashingMachine => "Bela Tehnika",
            DeviceCategory::Network => "Mreža",
            DeviceCategory::Other => "Ostalo",
        }
    }

    /// Common one-click symptom descriptions. Only TVs have them for now.
    pub fn symptom_presets(self) -> &'static [SymptomPreset] {
        match self {
            DeviceCategory::Tv => TV_PRESETS,
            _ => &[],
        }
    }
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown device category '{0}'")]
pub struct UnknownDevice(pub String);

impl FromStr for DeviceCategory {
    type Err = UnknownDevice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        DeviceCategory::ALL
            .into_iter()
            .find(|d| d.id() == s)
            .ok_or_else(|| UnknownDevice(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SymptomPreset {
    pub id: &'static str,
    pub label: &'static str,
}

const TV_PRESETS: &[SymptomPreset] = &[
    SymptomPreset { id: "tv-no-pic-sound", label: "Ima ton, nema slike" },
    SymptomPreset { id: "tv-no-power-led", label: "Sija lampica, ne pali" },
    SymptomPreset { id: "tv-no-power-no-led", label: "Mrtav (nema lampice)" },
    SymptomPreset { id: "tv-flickering-pic", label: "Slika treperi" },
    SymptomPreset { id: "tv-lines-on-screen", label: "Linije na ekranu" },
    SymptomPreset { id: "tv-blue-pic", label: "Plava slika" },
];

// ────────────────────────────────────────────────────────────────────────────
// Request side
// ────────────────────────────────────────────────────────────────────────────

/// Optional visual evidence: one photo or video, already base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAttachment {
    pub data: String,
    pub mime_type: String,
}

/// Everything the composer needs for one analysis. Built fresh per call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiagnosticRequest {
    pub device: DeviceCategory,
    pub description: String,
    #[serde(default)]
    pub media: Option<MediaAttachment>,
}

// ────────────────────────────────────────────────────────────────────────────
// Result side
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "Lako")]
    Easy,
    #[serde(rename = "Srednje")]
    Medium,
    #[serde(rename = "Teško")]
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Lako",
            Difficulty::Medium => "Srednje",
            Difficulty::Hard => "Teško",
        }
    }
}

/// One candidate fix. Every field is mandatory: a model answer missing any
/// of them fails deserialization and triggers the fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticSolution {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub steps: Vec<String>,
}

/// Business contact details, quoted when the AI path is unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
}
