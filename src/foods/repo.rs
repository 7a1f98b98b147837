use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::foods::dto::NewFood;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FoodEntry {
    pub id: Uuid,
    pub name: String,
    pub food_type: String,
    pub food_amount: i32,
    pub calorie_amount: i32,
    pub weekday: String,
    pub time_in_day: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<FoodEntry>> {
    let rows = sqlx::query_as::<_, FoodEntry>(
        r#"
        SELECT id, name, food_type, food_amount, calorie_amount, weekday, time_in_day, created_at
        FROM foods
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn list_by_weekday(db: &PgPool, weekday: &str) -> anyhow::Result<Vec<FoodEntry>> {
    let rows = sqlx::query_as::<_, FoodEntry>(
        r#"
        SELECT id, name, food_type, food_amount, calorie_amount, weekday, time_in_day, created_at
        FROM foods
        WHERE weekday = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(weekday)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn get(db: &PgPool, id: Uuid) -> anyhow::Result<Option<FoodEntry>> {
    let row = sqlx::query_as::<_, FoodEntry>(
        r#"
        SELECT id, name, food_type, food_amount, calorie_amount, weekday, time_in_day, created_at
        FROM foods
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn insert(db: &PgPool, food: &NewFood) -> anyhow::Result<FoodEntry> {
    let row = sqlx::query_as::<_, FoodEntry>(
        r#"
        INSERT INTO foods (name, food_type, food_amount, calorie_amount, weekday, time_in_day)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, name, food_type, food_amount, calorie_amount, weekday, time_in_day, created_at
        "#,
    )
    .bind(&food.name)
    .bind(&food.food_type)
    .bind(food.food_amount)
    .bind(food.calorie_amount)
    .bind(food.weekday.as_str())
    .bind(food.time_in_day.as_str())
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// Full overwrite of every field, created_at included. Returns the number
/// of matched rows (0 when the id is unknown).
pub async fn replace(db: &PgPool, id: Uuid, food: &NewFood) -> anyhow::Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE foods
        SET name = $2, food_type = $3, food_amount = $4, calorie_amount = $5,
            weekday = $6, time_in_day = $7, created_at = now()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&food.name)
    .bind(&food.food_type)
    .bind(food.food_amount)
    .bind(food.calorie_amount)
    .bind(food.weekday.as_str())
    .bind(food.time_in_day.as_str())
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}

pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM foods WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete_by_weekday(db: &PgPool, weekday: &str) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM foods WHERE weekday = $1")
        .bind(weekday)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete_by_meal(db: &PgPool, weekday: &str, meal: &str) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM foods WHERE weekday = $1 AND time_in_day = $2")
        .bind(weekday)
        .bind(meal)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete_all(db: &PgPool) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM foods").execute(db).await?;
    Ok(result.rows_affected())
}

pub async fn delete_by_content(
    db: &PgPool,
    name: &str,
    weekday: &str,
    meal: &str,
) -> anyhow::Result<u64> {
    let result =
        sqlx::query("DELETE FROM foods WHERE name = $1 AND weekday = $2 AND time_in_day = $3")
            .bind(name)
            .bind(weekday)
            .bind(meal)
            .execute(db)
            .await?;
    Ok(result.rows_affected())
}
