use std::collections::HashMap;

use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::grocery::dto::NewGroceryItem;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GroceryItem {
    pub id: Uuid,
    pub name: String,
    pub amount: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date_added: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct WeekSnapshot {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub archived_at: OffsetDateTime,
    pub items: Vec<GroceryItem>,
}

pub async fn list_current(db: &PgPool) -> anyhow::Result<Vec<GroceryItem>> {
    let rows = sqlx::query_as::<_, GroceryItem>(
        r#"
        SELECT id, name, amount, date_added
        FROM grocery_items
        ORDER BY date_added ASC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Repeated names accumulate as separate rows; there is no de-duplication.
pub async fn add_item(db: &PgPool, item: &NewGroceryItem) -> anyhow::Result<GroceryItem> {
    let row = sqlx::query_as::<_, GroceryItem>(
        r#"
        INSERT INTO grocery_items (name, amount)
        VALUES ($1, $2)
        RETURNING id, name, amount, date_added
        "#,
    )
    .bind(&item.name)
    .bind(&item.amount)
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// Move the whole current list into one new history snapshot and empty it,
/// in a single transaction. The item move itself is one statement whose
/// DELETE feeds the snapshot insert, so every row present when the
/// statement runs ends up in the snapshot and nowhere else; a row inserted
/// concurrently either rides along or stays on the current list. An empty
/// current list is a no-op: the transaction rolls back and history is
/// untouched.
pub async fn archive_week(db: &PgPool) -> anyhow::Result<Option<Uuid>> {
    let mut tx = db.begin().await?;

    let week_id = Uuid::new_v4();
    sqlx::query("INSERT INTO grocery_weeks (id, archived_at) VALUES ($1, now())")
        .bind(week_id)
        .execute(&mut *tx)
        .await?;

    let moved = sqlx::query(
        r#"
        WITH moved AS (
            DELETE FROM grocery_items
            RETURNING id, name, amount, date_added
        )
        INSERT INTO grocery_week_items (id, week_id, name, amount, date_added)
        SELECT id, $1, name, amount, date_added FROM moved
        "#,
    )
    .bind(week_id)
    .execute(&mut *tx)
    .await?;

    if moved.rows_affected() == 0 {
        tx.rollback().await?;
        return Ok(None);
    }

    tx.commit().await?;
    Ok(Some(week_id))
}

#[derive(Debug, FromRow)]
struct WeekRow {
    id: Uuid,
    archived_at: OffsetDateTime,
}

#[derive(Debug, FromRow)]
struct SnapshotItemRow {
    week_id: Uuid,
    id: Uuid,
    name: String,
    amount: String,
    date_added: OffsetDateTime,
}

/// Snapshots newest-first, each carrying its full item set.
pub async fn history(db: &PgPool) -> anyhow::Result<Vec<WeekSnapshot>> {
    let weeks = sqlx::query_as::<_, WeekRow>(
        r#"
        SELECT id, archived_at
        FROM grocery_weeks
        ORDER BY archived_at DESC
        "#,
    )
    .fetch_all(db)
    .await?;

    let item_rows = sqlx::query_as::<_, SnapshotItemRow>(
        r#"
        SELECT week_id, id, name, amount, date_added
        FROM grocery_week_items
        ORDER BY date_added ASC
        "#,
    )
    .fetch_all(db)
    .await?;

    let mut by_week: HashMap<Uuid, Vec<GroceryItem>> = HashMap::new();
    for row in item_rows {
        by_week.entry(row.week_id).or_default().push(GroceryItem {
            id: row.id,
            name: row.name,
            amount: row.amount,
            date_added: row.date_added,
        });
    }

    Ok(weeks
        .into_iter()
        .map(|week| WeekSnapshot {
            id: week.id,
            archived_at: week.archived_at,
            items: by_week.remove(&week.id).unwrap_or_default(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, amount: &str) -> NewGroceryItem {
        NewGroceryItem {
            name: name.into(),
            amount: amount.into(),
        }
    }

    #[sqlx::test]
    async fn archiving_an_empty_list_is_a_noop(db: PgPool) {
        assert!(archive_week(&db).await.unwrap().is_none());
        assert!(history(&db).await.unwrap().is_empty());
        assert!(list_current(&db).await.unwrap().is_empty());
    }

    #[sqlx::test]
    async fn archiving_moves_every_item_into_one_snapshot(db: PgPool) {
        add_item(&db, &item("Milk", "1 gallon")).await.unwrap();
        add_item(&db, &item("Eggs", "1 dozen")).await.unwrap();
        // Repeated names stay separate entries.
        add_item(&db, &item("Milk", "1 gallon")).await.unwrap();

        let week_id = archive_week(&db).await.unwrap().expect("snapshot created");

        assert!(list_current(&db).await.unwrap().is_empty());

        let snapshots = history(&db).await.unwrap();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].id, week_id);
        assert_eq!(snapshots[0].items.len(), 3);

        let mut names: Vec<&str> = snapshots[0].items.iter().map(|i| i.name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["Eggs", "Milk", "Milk"]);
    }

    #[sqlx::test]
    async fn second_archive_without_new_items_adds_nothing(db: PgPool) {
        add_item(&db, &item("Rice", "5 lbs")).await.unwrap();
        assert!(archive_week(&db).await.unwrap().is_some());
        assert!(archive_week(&db).await.unwrap().is_none());
        assert_eq!(history(&db).await.unwrap().len(), 1);
    }

    #[sqlx::test]
    async fn history_is_newest_first(db: PgPool) {
        add_item(&db, &item("Salmon", "1.5 lbs")).await.unwrap();
        let first = archive_week(&db).await.unwrap().expect("first snapshot");

        add_item(&db, &item("Spinach", "2 bags")).await.unwrap();
        let second = archive_week(&db).await.unwrap().expect("second snapshot");

        let snapshots = history(&db).await.unwrap();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].id, second);
        assert_eq!(snapshots[1].id, first);
        assert_eq!(snapshots[0].items[0].name, "Spinach");
        assert_eq!(snapshots[1].items[0].name, "Salmon");
    }
}
