use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions, Question},
    quiz::{pick_unseen, QuizScope},
    server::{
        app::AppState, deserializers::deserialize_option_int, error::ApiError, extract::ApiJson,
    },
    telemetry::QUIZ_QUESTIONS_SERVED,
};

use super::ApiResponse;

#[derive(Deserialize, Debug)]
struct QuizRequest {
    #[serde(default)]
    previous_questions: Vec<i64>,
    #[serde(default)]
    quiz_category: Option<QuizCategory>,
}

#[derive(Deserialize, Debug)]
struct QuizCategory {
    #[serde(default, deserialize_with = "deserialize_option_int")]
    id: Option<i64>,
}

#[derive(Serialize)]
struct QuizQuestion {
    success: bool,
    question: Question,
}

async fn next_question(
    State(pool): State<SqlitePool>,
    ApiJson(request): ApiJson<QuizRequest>,
) -> ApiResponse<QuizQuestion> {
    let scope = QuizScope::from_category_id(request.quiz_category.and_then(|c| c.id));
    let candidates = match scope {
        QuizScope::All => questions::get_all_questions(&pool).await?,
        QuizScope::Category(id) => questions::get_questions_for_category(&pool, id).await?,
    };
    let question = pick_unseen(
        &candidates,
        &request.previous_questions,
        &mut rand::thread_rng(),
    )
    .cloned()
    .ok_or_else(|| ApiError::NotFound(format!("no unseen questions in {scope:?}")))?;

    QUIZ_QUESTIONS_SERVED
        .with_label_values(&[scope.label().as_str()])
        .inc();
    tracing::debug!(id = question.id, ?scope, "Serving quiz question");
    Ok(Json(QuizQuestion {
        success: true,
        question,
    }))
}

pub fn quizzes_router() -> Router<AppState> {
    Router::new().route("/quizzes", post(next_question))
}
