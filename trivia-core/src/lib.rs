//! trivia-core: domain model for the trivia backend
//!
//! Holds everything that does not need a database or an HTTP server:
//! - questions and categories as plain request-scoped records
//! - input validation for new questions
//! - fixed-size page slicing
//! - random selection of an unseen quiz question
//! - the bundled seed dataset and the TOML configuration model

pub mod category;
pub mod config;
pub mod error;
pub mod pagination;
pub mod question;
pub mod quiz;
pub mod seed;

pub use category::{Category, CategoryId, CategoryMap};
pub use config::TriviaConfig;
pub use error::{ConfigError, ValidationError};
pub use pagination::{paginate, PageNumber, QUESTIONS_PER_PAGE};
pub use question::{NewQuestion, Question, QuestionId};
pub use quiz::{select_question, QuizCategory, ANY_CATEGORY};
