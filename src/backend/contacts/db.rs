/**
 * PostgreSQL Contact Store
 *
 * Contacts live in the `contacts` table created by `migrations/`. Text
 * filters use `position(lower(..) in lower(..))` so user input is matched
 * literally, never as a pattern.
 *
 * `save` is a single conditional `UPDATE ... WHERE revision = $n`; when no
 * row comes back a follow-up existence check tells a stale write apart from
 * a deleted record.
 */

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::contacts::store::{ContactFilter, ContactQuery, ContactSort, ContactStore};
use crate::backend::error::StoreError;
use crate::shared::contact::{Contact, ContactDocument, ContactFields};

const COLUMNS: &str = "id, name, phone, address, notes, locked_by, locked_at, created_by, revision, created_at, updated_at";

/// Filter predicate over bind parameters $1..$5
const WHERE_FILTER: &str = r#"
    WHERE ($1::text IS NULL OR position(lower($1) in lower(name)) > 0)
      AND ($2::text IS NULL OR position(lower($2) in lower(phone)) > 0)
      AND ($3::text IS NULL OR position(lower($3) in lower(address)) > 0)
      AND ($4::text IS NULL OR created_by = $4)
      AND ($5::timestamptz IS NULL OR locked_at < $5)
"#;

#[derive(Clone)]
pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl ContactStore for PgContactStore {
    async fn find(&self, query: &ContactQuery) -> Result<Vec<Contact>, StoreError> {
        let order = match query.sort {
            ContactSort::NewestFirst => "created_at DESC, id DESC",
            ContactSort::OldestFirst => "created_at ASC, id ASC",
        };
        let sql = format!(
            "SELECT {COLUMNS} FROM contacts {WHERE_FILTER} ORDER BY {order} OFFSET $6 LIMIT $7"
        );
        let filter = &query.filter;

        let rows = sqlx::query_as::<_, ContactDocument>(&sql)
            .bind(filter.name.as_deref())
            .bind(filter.phone.as_deref())
            .bind(filter.address.as_deref())
            .bind(filter.created_by.as_deref())
            .bind(filter.locked_before)
            .bind(to_i64(query.skip))
            .bind(to_i64(query.limit))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| Contact::try_from(row).map_err(StoreError::from))
            .collect()
    }

    async fn count(&self, filter: &ContactFilter) -> Result<u64, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM contacts {WHERE_FILTER}");
        let total: i64 = sqlx::query_scalar(&sql)
            .bind(filter.name.as_deref())
            .bind(filter.phone.as_deref())
            .bind(filter.address.as_deref())
            .bind(filter.created_by.as_deref())
            .bind(filter.locked_before)
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(total).unwrap_or(0))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contact>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM contacts WHERE id = $1");
        let row = sqlx::query_as::<_, ContactDocument>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Contact::try_from).transpose()?)
    }

    async fn create(
        &self,
        fields: ContactFields,
        created_by: Option<String>,
    ) -> Result<Contact, StoreError> {
        let contact = Contact::new(fields, created_by, Utc::now());
        let sql = format!(
            r#"
            INSERT INTO contacts (id, name, phone, address, notes, created_by, revision, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ContactDocument>(&sql)
            .bind(contact.id)
            .bind(&contact.name)
            .bind(&contact.phone)
            .bind(&contact.address)
            .bind(&contact.notes)
            .bind(contact.created_by.as_deref())
            .bind(contact.revision)
            .bind(contact.created_at)
            .bind(contact.updated_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(Contact::try_from(row)?)
    }

    async fn save(&self, contact: &Contact) -> Result<Contact, StoreError> {
        let sql = format!(
            r#"
            UPDATE contacts
            SET name = $2, phone = $3, address = $4, notes = $5,
                locked_by = $6, locked_at = $7,
                revision = revision + 1, updated_at = $8
            WHERE id = $1 AND revision = $9
            RETURNING {COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ContactDocument>(&sql)
            .bind(contact.id)
            .bind(&contact.name)
            .bind(&contact.phone)
            .bind(&contact.address)
            .bind(&contact.notes)
            .bind(contact.locked_by())
            .bind(contact.locked_at())
            .bind(Utc::now())
            .bind(contact.revision)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Contact::try_from(row)?),
            None => {
                let exists: bool =
                    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM contacts WHERE id = $1)")
                        .bind(contact.id)
                        .fetch_one(&self.pool)
                        .await?;
                if exists {
                    Err(StoreError::StaleRevision { id: contact.id })
                } else {
                    Err(StoreError::Missing { id: contact.id })
                }
            }
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Contact>, StoreError> {
        let sql = format!("DELETE FROM contacts WHERE id = $1 RETURNING {COLUMNS}");
        let row = sqlx::query_as::<_, ContactDocument>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Contact::try_from).transpose()?)
    }
}
