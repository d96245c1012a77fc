//! CSV import and export of both tables, used to seed and back up the store.

use std::fs::{create_dir_all, File};
use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::queries::categories::{get_all_categories, import_categories};
use crate::db::queries::questions::{get_all_questions, import_questions};
use crate::db::{Category, Question};

pub const CATEGORIES_FILE: &str = "categories.csv";
pub const QUESTIONS_FILE: &str = "questions.csv";

fn write_to(path: &Path, data: &[impl Serialize]) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
    let mut wtr = csv::Writer::from_writer(file);
    for line in data {
        wtr.serialize(line)?;
    }
    wtr.flush()?;
    Ok(())
}

fn read_from<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);
    let mut out = Vec::new();
    for record in rdr.deserialize() {
        let record: T = record.with_context(|| format!("Malformed row in {}", path.display()))?;
        out.push(record);
    }
    Ok(out)
}

pub async fn export_data(pool: &SqlitePool, dir: &Path) -> anyhow::Result<()> {
    let categories = get_all_categories(pool).await?;
    let questions = get_all_questions(pool).await?;
    if !dir.exists() {
        create_dir_all(dir)?
    }
    write_to(&dir.join(CATEGORIES_FILE), &categories)?;
    write_to(&dir.join(QUESTIONS_FILE), &questions)?;
    tracing::info!(
        categories = categories.len(),
        questions = questions.len(),
        "Exported to {}",
        dir.display()
    );
    Ok(())
}

/// Categories go first, questions reference them.
pub async fn import_data(pool: &SqlitePool, dir: &Path) -> anyhow::Result<()> {
    let categories: Vec<Category> = read_from(&dir.join(CATEGORIES_FILE))?;
    let questions: Vec<Question> = read_from(&dir.join(QUESTIONS_FILE))?;
    let (category_count, question_count) = (categories.len(), questions.len());
    import_categories(pool, categories)
        .await
        .context("Cannot import categories")?;
    import_questions(pool, questions)
        .await
        .context("Cannot import questions")?;
    tracing::info!(
        categories = category_count,
        questions = question_count,
        "Imported from {}",
        dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::db::tests::migrated_pool;

    fn seed_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    #[tokio::test]
    async fn shipped_seed_data_imports() {
        let pool = migrated_pool().await;
        import_data(&pool, &seed_dir()).await.unwrap();

        assert_eq!(get_all_categories(&pool).await.unwrap().len(), 6);
        let questions = get_all_questions(&pool).await.unwrap();
        assert_eq!(questions.len(), 19);
        assert_eq!(questions[0].answer, "Apollo 13");
    }

    #[tokio::test]
    async fn export_then_import_into_fresh_store() {
        let pool = migrated_pool().await;
        import_data(&pool, &seed_dir()).await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("backup");
        export_data(&pool, &target).await.unwrap();
        assert!(target.join(CATEGORIES_FILE).is_file());

        let fresh = migrated_pool().await;
        import_data(&fresh, &target).await.unwrap();
        assert_eq!(
            get_all_questions(&fresh).await.unwrap(),
            get_all_questions(&pool).await.unwrap()
        );
        assert_eq!(
            get_all_categories(&fresh).await.unwrap(),
            get_all_categories(&pool).await.unwrap()
        );
    }

    #[tokio::test]
    async fn questions_for_unknown_categories_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CATEGORIES_FILE), "id,type\n1,Science\n").unwrap();
        std::fs::write(
            dir.path().join(QUESTIONS_FILE),
            "id,question,answer,category,difficulty\n1,Orphan?,Yes,7,1\n",
        )
        .unwrap();

        let pool = migrated_pool().await;
        assert!(import_data(&pool, dir.path()).await.is_err());
        assert!(get_all_questions(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_files_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let pool = migrated_pool().await;
        let err = import_data(&pool, dir.path()).await.unwrap_err();
        assert!(err.to_string().contains(CATEGORIES_FILE));
    }
}
