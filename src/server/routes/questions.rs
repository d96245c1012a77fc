use std::collections::{BTreeMap, HashMap};

use axum::{
    extract::{Query, State},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_all_categories, questions},
        NewQuestion, Question,
    },
    pagination::Page,
    server::{
        app::AppState,
        deserializers::{deserialize_option_int, deserialize_option_text},
        error::ApiError,
        extract::{ApiJson, ApiPath},
    },
};

use super::{category_labels, ApiResponse, Success};

/// Body of `POST /questions`: a search when `searchTerm` is set, a new question otherwise.
#[derive(Deserialize, Debug)]
struct QuestionsBody {
    #[serde(rename = "searchTerm", default)]
    search_term: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_text")]
    question: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_text")]
    answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_int")]
    difficulty: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_int")]
    category: Option<i64>,
}

impl QuestionsBody {
    fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref().filter(|term| !term.is_empty())
    }

    fn into_new_question(self) -> Result<NewQuestion, ApiError> {
        Ok(NewQuestion {
            question: required_text(self.question, "question")?,
            answer: required_text(self.answer, "answer")?,
            difficulty: self.difficulty.ok_or_else(|| missing("difficulty"))?,
            category: self.category.ok_or_else(|| missing("category"))?,
        })
    }
}

fn missing(field: &str) -> ApiError {
    ApiError::Validation(format!("missing field `{field}`"))
}

fn required_text(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        Some(_) => Err(ApiError::Validation(format!("field `{field}` is blank"))),
        None => Err(missing(field)),
    }
}

#[derive(Serialize)]
struct QuestionsListing {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<String, String>,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
#[serde(untagged)]
enum QuestionsPost {
    Search(SearchResults),
    Created(Success),
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResponse<QuestionsListing> {
    let questions = questions::get_all_questions(&pool).await?;
    let page = Page::from_params(&params);
    let current = page.slice(&questions);
    if current.is_empty() {
        return Err(ApiError::NotFound(format!("questions page {}", page.number())));
    }
    let categories = get_all_categories(&pool).await?;
    Ok(Json(QuestionsListing {
        success: true,
        questions: current.to_vec(),
        total_questions: questions.len(),
        categories: category_labels(categories),
    }))
}

async fn create_or_search(
    State(pool): State<SqlitePool>,
    Query(params): Query<HashMap<String, String>>,
    ApiJson(body): ApiJson<QuestionsBody>,
) -> ApiResponse<QuestionsPost> {
    if let Some(term) = body.search_term() {
        let results = search(&pool, term, Page::from_params(&params)).await?;
        return Ok(Json(QuestionsPost::Search(results)));
    }
    let new_question = body.into_new_question()?;
    let id = questions::create_question(&pool, &new_question).await?;
    tracing::info!(id, category = new_question.category, "Created question");
    Ok(Json(QuestionsPost::Created(Success::new())))
}

#[tracing::instrument(skip(pool))]
async fn search(pool: &SqlitePool, term: &str, page: Page) -> Result<SearchResults, ApiError> {
    let matches = questions::search_questions(pool, term).await?;
    tracing::debug!(found = matches.len(), "Searched questions");
    Ok(SearchResults {
        success: true,
        questions: page.slice(&matches).to_vec(),
        total_questions: matches.len(),
    })
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResponse<Success> {
    let mut tx = pool.begin().await?;
    if questions::get_question_by_id(&mut *tx, id).await?.is_none() {
        return Err(ApiError::NotFound(format!("question {id}")));
    }
    questions::delete_question(&mut *tx, id)
        .await
        .map_err(ApiError::Store)?;
    tx.commit().await.map_err(ApiError::Store)?;
    tracing::info!(id, "Deleted question");
    Ok(Json(Success::new()))
}

pub fn questions_router() -> Router<AppState> {
    Router::new()
        .route("/questions", get(list_questions).post(create_or_search))
        .route("/questions/{id}", delete(delete_question))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: &str) -> QuestionsBody {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn empty_search_term_means_creation() {
        assert_eq!(body(r#"{"searchTerm": "title"}"#).search_term(), Some("title"));
        assert_eq!(body(r#"{"searchTerm": ""}"#).search_term(), None);
        assert_eq!(body(r#"{"question": "q"}"#).search_term(), None);
    }

    #[test]
    fn complete_body_becomes_new_question() {
        let new_question = body(
            r#"{"question": "Quel est la capital du Burkina Faso?", "answer": 4, "difficulty": 5, "category": "3"}"#,
        )
        .into_new_question()
        .unwrap();
        assert_eq!(
            new_question,
            NewQuestion {
                question: "Quel est la capital du Burkina Faso?".to_owned(),
                answer: "4".to_owned(),
                difficulty: 5,
                category: 3,
            }
        );
    }

    #[test]
    fn incomplete_body_is_a_validation_error() {
        let error = body(r#"{"question": "q", "answer": "a", "difficulty": 1}"#)
            .into_new_question()
            .unwrap_err();
        assert!(matches!(error, ApiError::Validation(msg) if msg.contains("category")));

        let error = body(r#"{"question": "  ", "answer": "a", "difficulty": 1, "category": 1}"#)
            .into_new_question()
            .unwrap_err();
        assert!(matches!(error, ApiError::Validation(msg) if msg.contains("blank")));
    }
}
