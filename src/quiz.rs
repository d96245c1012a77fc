use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::db::Question;

/// Which questions a quiz draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizScope {
    All,
    Category(i64),
}

impl QuizScope {
    /// Id 0 (or no id) stands for every category.
    pub fn from_category_id(id: Option<i64>) -> Self {
        match id {
            None | Some(0) => QuizScope::All,
            Some(id) => QuizScope::Category(id),
        }
    }

    pub fn label(&self) -> String {
        match self {
            QuizScope::All => "all".to_owned(),
            QuizScope::Category(id) => id.to_string(),
        }
    }
}

/// Picks uniformly among `candidates` whose id is not in `seen`.
///
/// Seen ids that are not among the candidates are ignored.
pub fn pick_unseen<'a, R>(
    candidates: &'a [Question],
    seen: &[i64],
    rng: &mut R,
) -> Option<&'a Question>
where
    R: Rng + ?Sized,
{
    let seen: HashSet<i64> = seen.iter().copied().collect();
    let unseen: Vec<&Question> = candidates
        .iter()
        .filter(|question| !seen.contains(&question.id))
        .collect();
    unseen.choose(rng).copied()
}
