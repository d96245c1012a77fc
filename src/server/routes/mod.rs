mod categories;
mod questions;
mod quizzes;

use std::collections::BTreeMap;

use axum::Json;
use serde::Serialize;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use crate::db::Category;

use super::error::ApiError;

pub type ApiResponse<T> = Result<Json<T>, ApiError>;

#[derive(Serialize)]
pub struct Success {
    success: bool,
}

impl Success {
    fn new() -> Self {
        Success { success: true }
    }
}

/// Category labels keyed by the decimal id.
fn category_labels(categories: Vec<Category>) -> BTreeMap<String, String> {
    categories
        .into_iter()
        .map(|category| (category.id.to_string(), category.kind))
        .collect()
}
