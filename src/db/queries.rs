use crate::models::{Item, ItemUpdate, ParserResult, Receipt, ReceiptUpdate};
use chrono::Utc;
use sqlx::{PgConnection, PgPool};

/// Stores a parsed receipt and its items in one transaction.
///
/// The stored items carry the new receipt id; the ids inside `result` are ignored.
pub async fn insert_receipt(pool: &PgPool, result: &ParserResult) -> Result<Receipt, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let receipt = sqlx::query_as::<_, Receipt>(
        r#"
        INSERT INTO receipts (name, date, total_amount, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, date, total_amount, created_at
        "#
    )
    .bind(&result.name)
    .bind(&result.date)
    .bind(&result.total_amount)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await?;

    insert_items(&mut *tx, receipt.id, &result.items).await?;
    tx.commit().await?;

    Ok(receipt)
}

/// Bulk insert of items
async fn insert_items(
    conn: &mut PgConnection,
    receipt_id: i64,
    items: &[Item],
) -> Result<(), sqlx::Error> {
    if items.is_empty() {
        return Ok(());
    }

    tracing::debug!("Inserting {} item(s) for receipt {}", items.len(), receipt_id);
    let start_time = std::time::Instant::now();

    let mut query_builder = sqlx::QueryBuilder::new(
        "INSERT INTO receipt_items (receipt_id, item_index, name, price, quantity) "
    );

    query_builder.push_values(items, |mut b, item| {
        b.push_bind(receipt_id)
            .push_bind(item.index)
            .push_bind(&item.name)
            .push_bind(item.price.clone())
            .push_bind(item.quantity);
    });

    // Timeout: 30s
    let execute_result = tokio::time::timeout(
        std::time::Duration::from_secs(30),
        query_builder.build().execute(&mut *conn)
    ).await;

    match execute_result {
        Ok(Ok(result)) => {
            tracing::info!("Inserted {} item row(s) in {:?}", result.rows_affected(), start_time.elapsed());
            Ok(())
        },
        Ok(Err(e)) => {
            tracing::error!("Item insert failed after {:?}: {:?}", start_time.elapsed(), e);
            Err(e)
        },
        Err(_) => {
            tracing::error!("Item insert timed out (>30s)");
            Err(sqlx::Error::PoolTimedOut)
        }
    }
}

/// Receipt header by id
pub async fn get_receipt(
    pool: &PgPool,
    receipt_id: i64,
) -> Result<Option<Receipt>, sqlx::Error> {
    sqlx::query_as::<_, Receipt>(
        r#"
        SELECT id, name, date, total_amount, created_at
        FROM receipts
        WHERE id = $1
        "#
    )
    .bind(receipt_id)
    .fetch_optional(pool)
    .await
}

/// All receipts, newest date first
pub async fn list_receipts(pool: &PgPool) -> Result<Vec<Receipt>, sqlx::Error> {
    sqlx::query_as::<_, Receipt>(
        r#"
        SELECT id, name, date, total_amount, created_at
        FROM receipts
        ORDER BY date DESC, id DESC
        "#
    )
    .fetch_all(pool)
    .await
}

/// Items of a receipt in receipt order
pub async fn list_items(
    pool: &PgPool,
    receipt_id: i64,
) -> Result<Vec<Item>, sqlx::Error> {
    sqlx::query_as::<_, Item>(
        r#"
        SELECT item_index, receipt_id, name, price, quantity
        FROM receipt_items
        WHERE receipt_id = $1
        ORDER BY item_index
        "#
    )
    .bind(receipt_id)
    .fetch_all(pool)
    .await
}

/// Updates the merchant name and/or date of a receipt; `None` when it does not exist
pub async fn update_receipt(
    pool: &PgPool,
    receipt_id: i64,
    update: &ReceiptUpdate,
) -> Result<Option<Receipt>, sqlx::Error> {
    sqlx::query_as::<_, Receipt>(
        r#"
        UPDATE receipts
        SET name = COALESCE($2, name),
            date = COALESCE($3, date)
        WHERE id = $1
        RETURNING id, name, date, total_amount, created_at
        "#
    )
    .bind(receipt_id)
    .bind(&update.name)
    .bind(&update.date)
    .fetch_optional(pool)
    .await
}

/// Updates the given fields of one item; `None` when the item does not exist
pub async fn update_item(
    pool: &PgPool,
    receipt_id: i64,
    index: i32,
    update: &ItemUpdate,
) -> Result<Option<Item>, sqlx::Error> {
    sqlx::query_as::<_, Item>(
        r#"
        UPDATE receipt_items
        SET name = COALESCE($3, name),
            price = COALESCE($4, price),
            quantity = COALESCE($5, quantity)
        WHERE receipt_id = $1 AND item_index = $2
        RETURNING item_index, receipt_id, name, price, quantity
        "#
    )
    .bind(receipt_id)
    .bind(index)
    .bind(&update.name)
    .bind(&update.price)
    .bind(update.quantity)
    .fetch_optional(pool)
    .await
}

/// Deletes a receipt and, by cascade, its items
pub async fn delete_receipt(pool: &PgPool, receipt_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM receipts WHERE id = $1")
        .bind(receipt_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Renders items as CSV with a header row
pub fn export_to_csv(items: &[Item]) -> Result<String, csv::Error> {
    use csv::Writer;

    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(["index", "name", "price", "quantity"])?;

    for item in items {
        writer.write_record(&[
            item.index.to_string(),
            item.name.clone(),
            item.price.to_string(),
            item.quantity.to_string(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
