//! Times table trainer: the multiplication chant, a multiple choice quiz and
//! a chat tutor, served by the Telegram bot in `main.rs`.

pub mod chant;
pub mod config;
pub mod error;
pub mod fact;
pub mod grid;
pub mod quiz;
pub mod tutor;

pub use chant::format_chant;
pub use error::{Error, Result};
pub use quiz::generate_quiz_question;
