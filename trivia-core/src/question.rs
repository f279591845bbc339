//! Questions - the records served by the listing, search and quiz endpoints

use serde::{Deserialize, Serialize};

use crate::category::CategoryId;
use crate::error::ValidationError;

/// Question identifier assigned by the store
pub type QuestionId = i32;

/// Stored question, serialized as `{id, question, answer, category, difficulty}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: i32,
}

/// Validated question awaiting insertion.
///
/// Text fields are trimmed and guaranteed non-empty. Category and difficulty
/// are checked by the store, which may reject them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    question: String,
    answer: String,
    category: CategoryId,
    difficulty: i32,
}

impl NewQuestion {
    /// Trim and validate the text fields.
    ///
    /// # Example
    /// ```
    /// use trivia_core::NewQuestion;
    ///
    /// let q = NewQuestion::new("  Who invented Peanut Butter? ", "Carver", 4, 2).unwrap();
    /// assert_eq!(q.question(), "Who invented Peanut Butter?");
    /// assert!(NewQuestion::new("   ", "Carver", 4, 2).is_err());
    /// ```
    pub fn new(
        question: &str,
        answer: &str,
        category: CategoryId,
        difficulty: i32,
    ) -> Result<Self, ValidationError> {
        let (question, answer) = Self::validate_text(question, answer)?;

        Ok(Self {
            question: question.to_owned(),
            answer: answer.to_owned(),
            category,
            difficulty,
        })
    }

    /// Trimmed question and answer, or the first field that is blank.
    pub fn validate_text<'a>(
        question: &'a str,
        answer: &'a str,
    ) -> Result<(&'a str, &'a str), ValidationError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ValidationError::Empty { field: "question" });
        }

        let answer = answer.trim();
        if answer.is_empty() {
            return Err(ValidationError::Empty { field: "answer" });
        }

        Ok((question, answer))
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn category(&self) -> CategoryId {
        self.category
    }

    pub fn difficulty(&self) -> i32 {
        self.difficulty
    }

    /// Attach the id assigned by the store.
    pub fn into_question(self, id: QuestionId) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}
