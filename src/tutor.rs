use std::future::Future;

use chatgpt::client::ChatGPT;
use chatgpt::config::ChatGPTEngine;
use chatgpt::types::{ChatMessage as GptMessage, CompletionResponse, Role as GptRole};
use log::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;

/// How many earlier transcript entries go along with a question.
pub const HISTORY_WINDOW: usize = 5;

pub const GREETING: &str = "Hello Tangtang! I am Smarty Cat 🐱. Ask me anything about math!";
pub const FALLBACK_ON_ERROR: &str =
    "My brain is taking a nap. Please try again later! (Check API Key)";
pub const FALLBACK_ON_EMPTY: &str = "Oops! I fell asleep. Can you ask that again? 🐱";

const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

impl ChatMessage {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// Anything that can answer a child's question given a bit of context.
pub trait TutorBackend {
    /// `history` is the texts of earlier messages, oldest first, with roles dropped.
    fn reply(&self, prompt: &str, history: &[String]) -> impl Future<Output = Result<String>> + Send;
}

/// Who the tutor is and who it is talking to.
#[derive(Debug, Clone)]
pub struct Personality {
    pub tutor: &'static str,
    pub student: &'static str,
}

impl Default for Personality {
    fn default() -> Self {
        Self {
            tutor: "\"Smarty Cat\" (聪明猫)",
            student: "\"Tangtang\" (堂堂)",
        }
    }
}

impl Personality {
    pub fn system_instruction(&self) -> String {
        format!(
            "You are a super friendly, enthusiastic, and patient math tutor named {} designed for a young girl named {}.

Your Goal: Help her understand multiplication (1-9 table).

Tone:
- Use simple language suitable for a 6-9 year old.
- Use lots of emojis (🐱, ⭐, 🍎, ✨).
- Be encouraging and praise her effort.

Capabilities:
- Explain why 2x3 is the same as 2 groups of 3.
- Tell short, funny stories to help memorize specific multiplication facts (e.g., for 7x8=56, make a rhyme or story).
- If she asks unrelated questions, gently guide her back to math or fun logic puzzles.
- Output mostly in Chinese, but keep it simple.

Format:
- Keep responses relatively short (under 100 words) unless telling a specific story.",
            self.tutor, self.student
        )
    }
}

pub struct ChatGptTutor {
    personality: Personality,
    chat_gpt: ChatGPT,
}

impl ChatGptTutor {
    pub fn new(config: &Config, personality: Personality) -> Result<Self> {
        let mut chat_gpt = ChatGPT::new(config.chatgpt_api_key.clone())?;
        chat_gpt.config.engine = ChatGPTEngine::Gpt35Turbo;
        chat_gpt.config.temperature = TEMPERATURE;
        chat_gpt.config.timeout = config.tutor_timeout;

        Ok(Self {
            personality,
            chat_gpt,
        })
    }

    fn build_messages(&self, prompt: &str, history: &[String]) -> Vec<GptMessage> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(GptMessage {
            role: GptRole::System,
            content: self.personality.system_instruction(),
        });
        // Earlier turns all go in as the user's, the same as the new question
        let texts = history.iter().map(String::as_str).chain(std::iter::once(prompt));
        for text in texts {
            messages.push(GptMessage {
                role: GptRole::User,
                content: text.to_string(),
            });
        }
        messages
    }
}

impl TutorBackend for ChatGptTutor {
    async fn reply(&self, prompt: &str, history: &[String]) -> Result<String> {
        debug!("Asking the tutor: {:?} ({} earlier messages)", prompt, history.len());

        let messages = self.build_messages(prompt, history);
        let response: CompletionResponse = self.chat_gpt.send_history(&messages).await?;
        let content = response.message().clone().content;

        debug!("Completion: {:?}", content);

        Ok(content)
    }
}

/// One conversation with the tutor. Lives in the dialogue state only.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TutorSession {
    transcript: Vec<ChatMessage>,
}

impl Default for TutorSession {
    fn default() -> Self {
        Self {
            transcript: vec![ChatMessage::new(Role::Model, GREETING)],
        }
    }
}

impl TutorSession {
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Texts of the last few messages before the one being sent now.
    fn history(&self) -> Vec<String> {
        let start = self.transcript.len().saturating_sub(HISTORY_WINDOW);
        self.transcript[start..]
            .iter()
            .map(|message| message.text.clone())
            .collect()
    }

    /// Sends a question and records both sides of the exchange.
    /// Blank input is ignored. A failed or empty reply is replaced by a fixed
    /// apology so the conversation can carry on.
    pub async fn send<B: TutorBackend>(&mut self, backend: &B, text: &str) -> Option<&ChatMessage> {
        if text.trim().is_empty() {
            return None;
        }

        let history = self.history();
        self.transcript.push(ChatMessage::new(Role::User, text));

        let reply = match backend.reply(text, &history).await {
            Ok(reply) if reply.trim().is_empty() => {
                info!("Tutor returned an empty reply");
                FALLBACK_ON_EMPTY.to_string()
            }
            Ok(reply) => reply,
            Err(err) => {
                warn!("Tutor request failed: {err}");
                FALLBACK_ON_ERROR.to_string()
            }
        };

        self.transcript.push(ChatMessage::new(Role::Model, reply));
        self.transcript.last()
    }
}
