//! SQLite-Implementierung des KontoRepository

use chrono::Utc;
use konto_core::{AdminStufe, KontoId};

use crate::error::DbError;
use crate::models::{KontoRecord, KontoUpdate, NeuesKonto};
use crate::repository::{DbResult, KontoRepository};
use crate::sqlite::pool::SqliteDb;

const SPALTEN: &str = "id, name, email, password_hash, admin_level, created_at";

impl KontoRepository for SqliteDb {
    async fn create(&self, data: NeuesKonto<'_>) -> DbResult<KontoId> {
        let now_str = Utc::now().to_rfc3339();

        let ergebnis = sqlx::query(
            "INSERT INTO users (name, email, password_hash, admin_level, created_at)
             VALUES (?, ?, ?, 0, ?)",
        )
        .bind(data.name)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(&now_str)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DbError::Eindeutigkeit("E-Mail bereits vergeben".into())
            }
            _ => DbError::Sqlx(e),
        })?;

        let id = KontoId(ergebnis.last_insert_rowid());
        tracing::debug!(konto_id = %id, "Konto angelegt");
        Ok(id)
    }

    async fn get_by_id(&self, id: KontoId) -> DbResult<Option<KontoRecord>> {
        let sql = format!("SELECT {SPALTEN} FROM users WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id.inner())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_konto(&r)).transpose()
    }

    async fn get_by_email(&self, email: &str) -> DbResult<Option<KontoRecord>> {
        let sql = format!("SELECT {SPALTEN} FROM users WHERE email = ?");
        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_konto(&r)).transpose()
    }

    async fn update(&self, id: KontoId, update: KontoUpdate) -> DbResult<()> {
        let query = match &update {
            KontoUpdate::Name(name) => {
                sqlx::query("UPDATE users SET name = ? WHERE id = ?").bind(name)
            }
            KontoUpdate::Passwort(hash) => {
                sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?").bind(hash)
            }
            KontoUpdate::NameUndPasswort {
                name,
                password_hash,
            } => sqlx::query("UPDATE users SET name = ?, password_hash = ? WHERE id = ?")
                .bind(name)
                .bind(password_hash),
        };

        let affected = query
            .bind(id.inner())
            .execute(&self.pool)
            .await?
            .rows_affected();
        if affected == 0 {
            return Err(DbError::nicht_gefunden(format!("Konto {id}")));
        }
        Ok(())
    }

    async fn delete(&self, id: KontoId) -> DbResult<bool> {
        let affected = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.inner())
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }
}

fn row_to_konto(row: &sqlx::sqlite::SqliteRow) -> DbResult<KontoRecord> {
    use sqlx::Row as _;

    let created_at_str: String = row.try_get("created_at")?;
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|e| DbError::intern(format!("Ungueltige created_at '{created_at_str}': {e}")))?
        .with_timezone(&Utc);

    Ok(KontoRecord {
        id: KontoId(row.try_get("id")?),
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        admin_level: AdminStufe(row.try_get("admin_level")?),
        created_at,
    })
}
