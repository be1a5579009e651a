use anyhow::Result;

use super::schema::Database;

impl Database {
    // ========================================================================
    // User Preferences
    // ========================================================================

    /// Value stored under `key`, or `None` if it was never set.
    pub async fn get_preference(&self, key: &str) -> Result<Option<String>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM user_preferences WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(value,)| value))
    }

    /// Insert or overwrite the value stored under `key`.
    pub async fn set_preference(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_preferences (key, value, updated_at)
            VALUES (?, ?, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
        "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete every stored preference. Returns the number of keys removed.
    pub async fn clear_preferences(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM user_preferences")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
