use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Hindi,
    Marathi,
    Telugu,
    Tamil,
    Gujarati,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::English,
        Language::Hindi,
        Language::Marathi,
        Language::Telugu,
        Language::Tamil,
        Language::Gujarati,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Marathi => "Marathi",
            Language::Telugu => "Telugu",
            Language::Tamil => "Tamil",
            Language::Gujarati => "Gujarati",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(s.trim()))
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|l| l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scripted question/answer pair.
#[derive(Debug, Clone, Serialize)]
pub struct ChatEntry {
    pub language: Language,
    pub user_input: &'static str,
    pub bot_response: &'static str,
}

/// Spoken-style response keyed by a command word.
#[derive(Debug, Clone, Serialize)]
pub struct VoiceCommand {
    pub command: &'static str,
    pub response: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: usize,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub language: Option<Language>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_from_name() {
        assert_eq!(Language::from_name("hindi"), Some(Language::Hindi));
        assert_eq!(Language::from_name(" English "), Some(Language::English));
        assert_eq!(Language::from_name("French"), None);
    }

    #[test]
    fn language_cycles() {
        assert_eq!(Language::English.next(), Language::Hindi);
        assert_eq!(Language::Gujarati.next(), Language::English);
    }
}
