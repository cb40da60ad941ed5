//! Postgres 分类标签存储实现
//!
//! 清理逻辑：删除 part_categories 中没有任何引用的标签。

use super::PgInventoryStore;
use crate::error::StorageError;
use crate::models::CategoryRecord;
use crate::traits::CategoryStore;
use crate::validation::ensure_non_empty;
use sqlx::Row;
use sqlx::postgres::PgRow;

fn category_from_row(row: &PgRow) -> Result<CategoryRecord, StorageError> {
    Ok(CategoryRecord {
        category_id: row.try_get("category_id")?,
        name: row.try_get("name")?,
    })
}

fn categories_from_rows(rows: Vec<PgRow>) -> Result<Vec<CategoryRecord>, StorageError> {
    let mut categories = Vec::with_capacity(rows.len());
    for row in rows {
        categories.push(category_from_row(&row)?);
    }
    Ok(categories)
}

#[async_trait::async_trait]
impl CategoryStore for PgInventoryStore {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, StorageError> {
        let rows = sqlx::query("select category_id, name from categories order by name")
            .fetch_all(&self.pool)
            .await?;
        categories_from_rows(rows)
    }

    async fn ensure_category(
        &self,
        candidate_id: &str,
        name: &str,
    ) -> Result<CategoryRecord, StorageError> {
        ensure_non_empty("name", name)?;
        sqlx::query(
            "insert into categories (category_id, name) values ($1, $2) \
             on conflict (name) do nothing",
        )
        .bind(candidate_id)
        .bind(name)
        .execute(&self.pool)
        .await?;
        let row = sqlx::query("select category_id, name from categories where name = $1")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        category_from_row(&row)
    }

    async fn assign_category(&self, part_id: &str, category_id: &str) -> Result<(), StorageError> {
        sqlx::query(
            "insert into part_categories (part_id, category_id) values ($1, $2) \
             on conflict do nothing",
        )
        .bind(part_id)
        .bind(category_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove_category(
        &self,
        part_id: &str,
        category_id: &str,
    ) -> Result<bool, StorageError> {
        let result =
            sqlx::query("delete from part_categories where part_id = $1 and category_id = $2")
                .bind(part_id)
                .bind(category_id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_part_categories(
        &self,
        part_id: &str,
    ) -> Result<Vec<CategoryRecord>, StorageError> {
        let rows = sqlx::query(
            "select c.category_id, c.name from categories c \
             join part_categories pc on pc.category_id = c.category_id \
             where pc.part_id = $1 order by c.name",
        )
        .bind(part_id)
        .fetch_all(&self.pool)
        .await?;
        categories_from_rows(rows)
    }

    async fn cleanup_orphaned_categories(&self) -> Result<u64, StorageError> {
        let result = sqlx::query(
            "delete from categories \
             where category_id not in (select distinct category_id from part_categories)",
        )
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
