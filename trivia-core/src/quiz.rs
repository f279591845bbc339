//! Quiz question selection
//!
//! The caller loads the candidate pool (all questions, or one category) and
//! supplies the random source, so selection stays a pure function.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::category::CategoryId;
use crate::question::{Question, QuestionId};

/// Category id a client sends to play across every category
pub const ANY_CATEGORY: CategoryId = 0;

/// Candidate pool requested by a quiz client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizCategory {
    /// No filter, every stored question is a candidate
    Any,
    /// Only questions in this category
    Only(CategoryId),
}

impl From<CategoryId> for QuizCategory {
    fn from(id: CategoryId) -> Self {
        if id == ANY_CATEGORY {
            Self::Any
        } else {
            Self::Only(id)
        }
    }
}

/// Pick one question uniformly at random from `candidates`, skipping any id in
/// `previous`. Returns `None` once every candidate has been asked.
pub fn select_question<R>(
    candidates: Vec<Question>,
    previous: &[QuestionId],
    rng: &mut R,
) -> Option<Question>
where
    R: Rng + ?Sized,
{
    let asked: HashSet<QuestionId> = previous.iter().copied().collect();
    let remaining: Vec<Question> = candidates
        .into_iter()
        .filter(|q| !asked.contains(&q.id))
        .collect();

    remaining.choose(rng).cloned()
}
