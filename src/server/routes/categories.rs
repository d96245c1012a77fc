use std::collections::{BTreeMap, HashMap};

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_all_categories, categories::get_category, questions},
        Category, Question,
    },
    pagination::Page,
    server::{app::AppState, error::ApiError, extract::ApiPath},
};

use super::{category_labels, ApiResponse};

#[derive(Serialize)]
struct CategoriesListing {
    success: bool,
    categories: BTreeMap<String, String>,
}

#[derive(Serialize)]
struct CategoryQuestions {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Category,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesListing> {
    let categories = get_all_categories(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound("no categories".to_owned()));
    }
    Ok(Json(CategoriesListing {
        success: true,
        categories: category_labels(categories),
    }))
}

async fn category_questions(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResponse<CategoryQuestions> {
    let current_category = get_category(&pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("category {id}")))?;
    let questions = questions::get_questions_for_category(&pool, id).await?;
    let page = Page::from_params(&params);
    let current = page.slice(&questions);
    if current.is_empty() {
        return Err(ApiError::NotFound(format!(
            "page {} of category {id}",
            page.number()
        )));
    }
    Ok(Json(CategoryQuestions {
        success: true,
        questions: current.to_vec(),
        total_questions: questions.len(),
        current_category,
    }))
}

pub fn category_router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(category_questions))
}
