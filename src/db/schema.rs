use sqlx::PgPool;

const CREATE_RECEIPTS: &str = r#"
    CREATE TABLE IF NOT EXISTS receipts (
        id           BIGSERIAL PRIMARY KEY,
        name         TEXT NOT NULL,
        date         TEXT NOT NULL,
        total_amount NUMERIC(12, 2) NOT NULL,
        created_at   TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

const CREATE_RECEIPT_ITEMS: &str = r#"
    CREATE TABLE IF NOT EXISTS receipt_items (
        receipt_id BIGINT NOT NULL REFERENCES receipts (id) ON DELETE CASCADE,
        item_index INTEGER NOT NULL,
        name       TEXT NOT NULL,
        price      NUMERIC(12, 2) NOT NULL,
        quantity   INTEGER NOT NULL DEFAULT 1,
        PRIMARY KEY (receipt_id, item_index)
    )
"#;

/// Creates the tables if they do not exist yet
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in [CREATE_RECEIPTS, CREATE_RECEIPT_ITEMS] {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::info!("Database schema ready");
    Ok(())
}
