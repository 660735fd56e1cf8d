use crate::models::RiskLevel;

/// Display color of a risk category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskColor {
    LightBlue,
    Green,
    Yellow,
    Red,
    Gray,
}

impl RiskColor {
    /// CSS color value used by the dashboard.
    pub fn css(&self) -> &'static str {
        match self {
            RiskColor::LightBlue => "#ADD8E6",
            RiskColor::Green => "green",
            RiskColor::Yellow => "yellow",
            RiskColor::Red => "red",
            RiskColor::Gray => "gray",
        }
    }
}

impl RiskLevel {
    pub fn color(&self) -> RiskColor {
        match self {
            RiskLevel::Nul => RiskColor::LightBlue,
            RiskLevel::Faible => RiskColor::Green,
            RiskLevel::Moyen => RiskColor::Yellow,
            RiskLevel::Eleve => RiskColor::Red,
            RiskLevel::Unknown(_) => RiskColor::Gray,
        }
    }
}

/// Maps a scraped risk label to its color. Unrecognized labels are gray.
pub fn classify(label: &str) -> RiskColor {
    RiskLevel::from(label).color()
}
