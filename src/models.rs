/// A town of the reference table.
///
/// `postal_code` and `insee_code` are always five characters, zero-padded on load.
#[derive(Debug, Clone, PartialEq)]
pub struct TownRecord {
    pub canonical_name: String,
    pub postal_code: String,
    pub insee_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub department_name: String,
}

/// Pollen risk category as published by the observatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RiskLevel {
    Nul,
    Faible,
    Moyen,
    Eleve,
    /// Any label outside the four known categories, kept verbatim
    Unknown(String),
}

impl RiskLevel {
    /// Returns the label as displayed on the observatory pages.
    pub fn label(&self) -> &str {
        match self {
            Self::Nul => "Nul",
            Self::Faible => "Faible",
            Self::Moyen => "Moyen",
            Self::Eleve => "Élevé",
            Self::Unknown(label) => label,
        }
    }
}

impl From<&str> for RiskLevel {
    fn from(value: &str) -> Self {
        // The pages uppercase labels through CSS, the raw text may still vary in case
        let trimmed = value.trim();
        match trimmed.to_lowercase().as_str() {
            "nul" => Self::Nul,
            "faible" => Self::Faible,
            "moyen" => Self::Moyen,
            "élevé" | "eleve" => Self::Eleve,
            _ => Self::Unknown(trimmed.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollenObservation {
    pub pollen_name: String,
    pub risk_level: RiskLevel,
}

/// Result of one pollen query, rendered then dropped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryResult {
    /// In document order
    pub observations: Vec<PollenObservation>,
    pub department_risk: Option<String>,
    pub resolved_town: Option<TownRecord>,
}

/// Allergy recommendations article, split into list items.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Recommendations {
    pub items: Vec<String>,
}

/// "Surveillance des pollens" article.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MeasurementArticle {
    pub paragraphs: Vec<String>,
    pub video_url: Option<String>,
}
