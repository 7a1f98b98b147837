use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct NutritionFact {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub cal_per_serv: f64,
}

/// Case-insensitive substring pattern with ILIKE metacharacters escaped.
fn like_pattern(name: &str) -> String {
    let escaped = name
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// First match wins; with several matching rows the tie-break is whatever
/// order the store returns, which is unspecified.
pub async fn find_by_name(db: &PgPool, name: &str) -> anyhow::Result<Option<NutritionFact>> {
    let row = sqlx::query_as::<_, NutritionFact>(
        r#"
        SELECT id, name, category, cal_per_serv
        FROM nutrition_facts
        WHERE name ILIKE $1
        LIMIT 1
        "#,
    )
    .bind(like_pattern(name))
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn list_under_limit(db: &PgPool, limit: f64) -> anyhow::Result<Vec<NutritionFact>> {
    let rows = sqlx::query_as::<_, NutritionFact>(
        r#"
        SELECT id, name, category, cal_per_serv
        FROM nutrition_facts
        WHERE cal_per_serv <= $1
        "#,
    )
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_wraps_and_escapes() {
        assert_eq!(like_pattern("beef"), "%beef%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
