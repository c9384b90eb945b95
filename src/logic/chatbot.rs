use crate::data::samples::{CHAT_SCRIPT, VOICE_COMMANDS};
use crate::models::{ChatMessage, Language, Sender, VoiceCommand};
use chrono::Utc;

pub const GREETING: &str = "Hello! I'm your CropCare assistant. I can help you with farming \
questions, crop advice, pest management, and more. How can I assist you today?";

pub const QUICK_QUESTIONS: &[&str] = &[
    "What crops should I plant this season?",
    "How do I test my soil?",
    "What are today's market prices?",
    "How to control pests naturally?",
    "When should I irrigate my crops?",
    "Weather forecast for farming",
];

const WEATHER_REPLY: &str = "Based on current weather data, I recommend monitoring humidity \
levels and preparing for potential rainfall. Check the weather section for detailed forecasts.";
const SOIL_REPLY: &str = "For soil health, I suggest regular pH testing and nutrient analysis. \
Our soil health monitor can provide detailed recommendations for your specific field conditions.";
const PEST_REPLY: &str = "For pest and disease management, early detection is key. Use our pest \
detection feature to identify issues and get treatment recommendations.";
const MARKET_REPLY: &str = "Current market prices are available in our market section. I can \
help you track price trends and find the best selling opportunities.";
const DEFAULT_REPLY: &str = "I'm here to help you with your farming questions. Could you please \
provide more details about what you'd like to know?";
const DEFAULT_REPLY_HINDI: &str =
    "मैं आपकी मदद करने के लिए यहाँ हूँ। कृपया अपना प्रश्न और विस्तार से बताएं।";

/// Reply to `input` in `language`.
///
/// A scripted answer wins when the input and a scripted question for the
/// same language contain one another. Otherwise the first keyword group that
/// appears picks a canned reply, and anything else gets the default.
pub fn respond(input: &str, language: Language) -> &'static str {
    let lowered = input.trim().to_lowercase();

    if !lowered.is_empty() {
        let scripted = CHAT_SCRIPT.iter().find(|entry| {
            let question = entry.user_input.to_lowercase();
            entry.language == language && (lowered.contains(&question) || question.contains(&lowered))
        });
        if let Some(entry) = scripted {
            return entry.bot_response;
        }
    }

    let mentions = |words: &[&str]| words.iter().any(|w| lowered.contains(w));

    if mentions(&["weather"]) {
        WEATHER_REPLY
    } else if mentions(&["soil"]) {
        SOIL_REPLY
    } else if mentions(&["pest", "disease"]) {
        PEST_REPLY
    } else if mentions(&["market", "price"]) {
        MARKET_REPLY
    } else if language == Language::Hindi {
        DEFAULT_REPLY_HINDI
    } else {
        DEFAULT_REPLY
    }
}

/// Spoken-style response for the first voice command word in `text`.
pub fn voice_response(text: &str) -> Option<&'static VoiceCommand> {
    let lowered = text.to_lowercase();
    VOICE_COMMANDS.iter().find(|c| lowered.contains(c.command))
}

/// Conversation transcript. Starts with the greeting.
#[derive(Debug, Clone)]
pub struct Chatbot {
    pub language: Language,
    messages: Vec<ChatMessage>,
}

impl Chatbot {
    pub fn new(language: Language) -> Self {
        let mut bot = Self {
            language,
            messages: Vec::new(),
        };
        bot.push(Sender::Bot, GREETING.to_string(), None);
        bot
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Records the user's message and the bot's reply. Blank input is
    /// ignored and returns `None`.
    pub fn send(&mut self, input: &str) -> Option<&ChatMessage> {
        if input.trim().is_empty() {
            return None;
        }
        let reply = respond(input, self.language);
        self.push(Sender::User, input.to_string(), None);
        self.push(Sender::Bot, reply.to_string(), Some(self.language));
        self.messages.last()
    }

    fn push(&mut self, sender: Sender, text: String, language: Option<Language>) {
        self.messages.push(ChatMessage {
            id: self.messages.len() + 1,
            sender,
            text,
            timestamp: Utc::now(),
            language,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_answer_either_direction() {
        let exact = respond("How to control pests?", Language::English);
        assert!(exact.starts_with("For effective pest control"));

        // The input is contained in the scripted question
        let partial = respond("best time to plant", Language::English);
        assert!(partial.starts_with("Wheat planting season"));
    }

    #[test]
    fn script_is_language_scoped() {
        let reply = respond("How to control pests?", Language::Hindi);
        assert_eq!(reply, PEST_REPLY);
    }

    #[test]
    fn hindi_script_entry() {
        let reply = respond("मिट्टी की जांच कैसे करें?", Language::Hindi);
        assert!(reply.starts_with("मिट्टी की जांच के लिए"));
    }

    #[test]
    fn keyword_fallbacks_in_order() {
        assert_eq!(respond("Will the weather hurt my soil?", Language::English), WEATHER_REPLY);
        assert_eq!(respond("soil moisture", Language::Tamil), SOIL_REPLY);
        assert_eq!(respond("leaf disease", Language::English), PEST_REPLY);
        assert_eq!(respond("onion PRICE today", Language::English), MARKET_REPLY);
    }

    #[test]
    fn default_reply_depends_on_language() {
        assert_eq!(respond("hello there", Language::English), DEFAULT_REPLY);
        assert_eq!(respond("hello there", Language::Hindi), DEFAULT_REPLY_HINDI);
        assert_eq!(respond("hello there", Language::Marathi), DEFAULT_REPLY);
    }

    #[test]
    fn voice_commands() {
        assert_eq!(voice_response("Tell me the WEATHER").unwrap().command, "weather");
        assert_eq!(voice_response("market prices please").unwrap().command, "prices");
        assert!(voice_response("hello").is_none());
    }

    #[test]
    fn transcript_flow() {
        let mut bot = Chatbot::new(Language::English);
        assert_eq!(bot.messages().len(), 1);
        assert_eq!(bot.messages()[0].text, GREETING);

        assert!(bot.send("   ").is_none());
        assert_eq!(bot.messages().len(), 1);

        let reply = bot.send("What about the weather?").unwrap();
        assert_eq!(reply.sender, Sender::Bot);
        assert_eq!(reply.language, Some(Language::English));
        assert_eq!(bot.messages().len(), 3);
        assert_eq!(bot.messages()[1].sender, Sender::User);
        assert_eq!(bot.messages()[2].id, 3);
    }
}
