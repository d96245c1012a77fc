use serde::{Deserialize, Serialize};
use sqlx::{SqliteExecutor, SqlitePool};

#[derive(Serialize, Deserialize, sqlx::FromRow, Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

pub async fn get_all_categories(pool: &SqlitePool) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
SELECT id, type
FROM categories
ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_category<'e, E>(executor: E, id: i64) -> sqlx::Result<Option<Category>>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Category>(
        r#"
SELECT id, type
FROM categories
WHERE categories.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Inserts new categories and relabels existing ones, keyed by id.
pub async fn import_categories(pool: &SqlitePool, categories: Vec<Category>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for category in categories {
        sqlx::query(
            r#"
INSERT INTO categories (id, type) VALUES (?1, ?2)
ON CONFLICT (id) DO UPDATE SET type = excluded.type
            "#,
        )
        .bind(category.id)
        .bind(&category.kind)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::tests::migrated_pool;

    fn category(id: i64, kind: &str) -> Category {
        Category {
            id,
            kind: kind.to_owned(),
        }
    }

    #[tokio::test]
    async fn categories_are_listed_by_id() {
        let pool = migrated_pool().await;
        import_categories(&pool, vec![category(2, "Art"), category(1, "Science")])
            .await
            .unwrap();

        let categories = get_all_categories(&pool).await.unwrap();
        assert_eq!(categories, vec![category(1, "Science"), category(2, "Art")]);
    }

    #[tokio::test]
    async fn import_relabels_existing_category() {
        let pool = migrated_pool().await;
        import_categories(&pool, vec![category(1, "Sciense")])
            .await
            .unwrap();
        import_categories(&pool, vec![category(1, "Science")])
            .await
            .unwrap();

        assert_eq!(
            get_category(&pool, 1).await.unwrap(),
            Some(category(1, "Science"))
        );
        assert_eq!(get_all_categories(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_category_is_none() {
        let pool = migrated_pool().await;
        assert_eq!(get_category(&pool, 42).await.unwrap(), None);
    }

    #[test]
    fn category_serializes_label_as_type() {
        let json = serde_json::to_value(category(3, "Geography")).unwrap();
        assert_eq!(json, serde_json::json!({"id": 3, "type": "Geography"}));
    }
}
