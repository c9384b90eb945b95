use chrono::{DateTime, Utc};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Weather,
    Nutrient,
    SoilPh,
}

impl AlertKind {
    pub fn tag(&self) -> &'static str {
        match self {
            AlertKind::Weather => "Weather",
            AlertKind::Nutrient => "Nutrients",
            AlertKind::SoilPh => "Soil pH",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            AlertKind::Weather => Color::Blue,
            AlertKind::Nutrient => Color::Green,
            AlertKind::SoilPh => Color::Magenta,
        }
    }
}

/// How loudly an alert is drawn. Ordered so the most pressing sorts last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Advisory,
    Warning,
}

impl Severity {
    pub fn color(&self) -> Color {
        match self {
            Severity::Info => Color::Gray,
            Severity::Advisory => Color::Blue,
            Severity::Warning => Color::Yellow,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Info => "ℹ",
            Severity::Advisory => "→",
            Severity::Warning => "⚠",
        }
    }
}

/// A reading that backs an alert, e.g. `Rainfall = 8.2 mm` from the weather feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub label: String,
    pub value: String,
    pub source: String,
}

/// One dashboard alert derived from a weather or soil classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldAlert {
    pub id: &'static str,
    pub kind: AlertKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub evidence: Vec<Evidence>,
    pub action: Option<String>,
    pub raised_at: DateTime<Utc>,
}

impl FieldAlert {
    pub fn new(
        id: &'static str,
        kind: AlertKind,
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind,
            severity,
            title: title.into(),
            description: description.into(),
            evidence: Vec::new(),
            action: None,
            raised_at: Utc::now(),
        }
    }

    pub fn evidence(mut self, label: &str, value: impl ToString, source: &str) -> Self {
        self.evidence.push(Evidence {
            label: label.to_string(),
            value: value.to_string(),
            source: source.to_string(),
        });
        self
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// `Rainfall 8.2 mm, Humidity 91%`
    pub fn evidence_summary(&self) -> String {
        self.evidence
            .iter()
            .map(|e| format!("{} {}", e.label, e.value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
