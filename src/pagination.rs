use std::collections::HashMap;

pub const QUESTIONS_PER_PAGE: usize = 10;

/// 1-based page number taken from the `page` query parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page(i64);

impl Default for Page {
    fn default() -> Self {
        Page(1)
    }
}

impl Page {
    pub fn new(number: i64) -> Self {
        Page(number)
    }

    pub fn number(&self) -> i64 {
        self.0
    }

    /// A missing or non-integer `page` parameter means the first page.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        params
            .get("page")
            .and_then(|value| value.trim().parse::<i64>().ok())
            .map(Page)
            .unwrap_or_default()
    }

    /// Items `[(page - 1) * 10, page * 10)` of `items`, clipped to its length.
    ///
    /// Pages before the first or past the last one are empty.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let Some(start) = self
            .0
            .checked_sub(1)
            .and_then(|index| usize::try_from(index).ok())
            .and_then(|index| index.checked_mul(QUESTIONS_PER_PAGE))
        else {
            return &[];
        };
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(QUESTIONS_PER_PAGE).min(items.len());
        &items[start..end]
    }
}
