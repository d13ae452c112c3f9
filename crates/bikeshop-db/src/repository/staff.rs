//! # Staff Repository
//!
//! Database operations for staff members.
//!
//! ## Read Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  staffs s                                                               │
//! │    LEFT JOIN stores st ON st.store_id = s.store_id    → store_data     │
//! │    LEFT JOIN staffs m  ON m.staff_id  = s.manager_id  → manager_data   │
//! │                                                                         │
//! │  One query per read; the nested objects are assembled from the         │
//! │  prefixed columns in `staff_from_row`.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use bikeshop_core::{
    CreateStaff, ListRequest, Staff, StaffListResponse, StaffSummary, Store, UpdateStaff,
};

const STAFF_SELECT: &str = r#"
    SELECT
        s.staff_id, s.first_name, s.last_name, s.email, s.phone, s.active,
        s.store_id, s.manager_id, s.created_at, s.updated_at,
        st.store_name AS store_name,
        st.phone      AS store_phone,
        st.email      AS store_email,
        st.street     AS store_street,
        st.city       AS store_city,
        st.state      AS store_state,
        st.zip_code   AS store_zip_code,
        m.first_name  AS manager_first_name,
        m.last_name   AS manager_last_name,
        m.email       AS manager_email
    FROM staffs s
    LEFT JOIN stores st ON st.store_id = s.store_id
    LEFT JOIN staffs m ON m.staff_id = s.manager_id
"#;

const STAFF_SEARCH: &str = r#"
    (?1 = ''
        OR s.first_name LIKE '%' || ?1 || '%' ESCAPE '\'
        OR s.last_name  LIKE '%' || ?1 || '%' ESCAPE '\'
        OR s.email      LIKE '%' || ?1 || '%' ESCAPE '\')
"#;

/// Repository for staff database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.staff();
///
/// let id = repo.create(&new_staff).await?;
/// let staff = repo.get_by_id(id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct StaffRepository {
    pool: SqlitePool,
}

impl StaffRepository {
    /// Creates a new StaffRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StaffRepository { pool }
    }

    /// Inserts a staff member and returns the new id.
    ///
    /// ## Errors
    /// * `DbError::Rejected` - invalid fields
    /// * `DbError::UniqueViolation` - e-mail already used
    /// * `DbError::ForeignKeyViolation` - unknown store or manager
    pub async fn create(&self, staff: &CreateStaff) -> DbResult<i64> {
        staff.validate()?;

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO staffs (
                first_name, last_name, email, phone, active,
                store_id, manager_id, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
            "#,
        )
        .bind(staff.first_name.trim())
        .bind(staff.last_name.trim())
        .bind(staff.email.trim())
        .bind(&staff.phone)
        .bind(staff.active)
        .bind(staff.store_id)
        .bind(staff.manager_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(staff_id = id, store_id = staff.store_id, "Staff created");
        Ok(id)
    }

    /// Gets a staff member with store and manager resolved.
    ///
    /// ## Returns
    /// * `Ok(Some(Staff))` - found
    /// * `Ok(None)` - no such id
    pub async fn get_by_id(&self, staff_id: i64) -> DbResult<Option<Staff>> {
        let sql = format!("{STAFF_SELECT} WHERE s.staff_id = ?1");

        let row = sqlx::query(&sql)
            .bind(staff_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(staff_from_row).transpose()?)
    }

    /// Lists one page of staff, ordered by id.
    ///
    /// `count` is the number of staff matching the search, ignoring paging.
    pub async fn list(&self, req: &ListRequest) -> DbResult<StaffListResponse> {
        let search = req.search_pattern();

        let count_sql = format!("SELECT COUNT(*) FROM staffs s WHERE {STAFF_SEARCH}");
        let count: i64 = sqlx::query_scalar(&count_sql)
            .bind(search.as_str())
            .fetch_one(&self.pool)
            .await?;

        let page_sql =
            format!("{STAFF_SELECT} WHERE {STAFF_SEARCH} ORDER BY s.staff_id LIMIT ?2 OFFSET ?3");
        let rows = sqlx::query(&page_sql)
            .bind(search.as_str())
            .bind(req.limit())
            .bind(req.offset())
            .fetch_all(&self.pool)
            .await?;

        let staffs = rows
            .iter()
            .map(staff_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count, returned = staffs.len(), search = %search, "Listed staff");
        Ok(StaffListResponse { count, staffs })
    }

    /// Replaces a staff member's fields.
    ///
    /// ## Returns
    /// * `Ok(())` - updated
    /// * `Err(DbError::NotFound)` - no such id
    pub async fn update(&self, staff: &UpdateStaff) -> DbResult<()> {
        staff.validate()?;

        let result = sqlx::query(
            r#"
            UPDATE staffs SET
                first_name = ?2,
                last_name = ?3,
                email = ?4,
                phone = ?5,
                active = ?6,
                store_id = ?7,
                manager_id = ?8,
                updated_at = ?9
            WHERE staff_id = ?1
            "#,
        )
        .bind(staff.staff_id)
        .bind(staff.first_name.trim())
        .bind(staff.last_name.trim())
        .bind(staff.email.trim())
        .bind(&staff.phone)
        .bind(staff.active)
        .bind(staff.store_id)
        .bind(staff.manager_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Staff", staff.staff_id));
        }

        debug!(staff_id = staff.staff_id, "Staff updated");
        Ok(())
    }

    /// Deletes a staff member. Anyone they managed keeps their row with
    /// `manager_id` cleared.
    pub async fn delete(&self, staff_id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM staffs WHERE staff_id = ?1")
            .bind(staff_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Staff", staff_id));
        }

        debug!(staff_id, "Staff deleted");
        Ok(())
    }
}

fn staff_from_row(row: &SqliteRow) -> Result<Staff, sqlx::Error> {
    let store_id: i64 = row.try_get("store_id")?;
    let manager_id: Option<i64> = row.try_get("manager_id")?;

    let store_data = match row.try_get::<Option<String>, _>("store_name")? {
        Some(store_name) => Some(Store {
            store_id,
            store_name,
            phone: row.try_get("store_phone")?,
            email: row.try_get("store_email")?,
            street: row.try_get("store_street")?,
            city: row.try_get("store_city")?,
            state: row.try_get("store_state")?,
            zip_code: row.try_get("store_zip_code")?,
        }),
        None => None,
    };

    let manager_first_name: Option<String> = row.try_get("manager_first_name")?;
    let manager_data = match (manager_id, manager_first_name) {
        (Some(staff_id), Some(first_name)) => Some(StaffSummary {
            staff_id,
            first_name,
            last_name: row.try_get("manager_last_name")?,
            email: row.try_get("manager_email")?,
        }),
        _ => None,
    };

    Ok(Staff {
        staff_id: row.try_get("staff_id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        active: row.try_get("active")?,
        store_id,
        store_data,
        manager_id,
        manager_data,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::seeded_db;

    fn new_staff(first: &str, email: &str, manager_id: Option<i64>) -> CreateStaff {
        CreateStaff {
            first_name: first.to_string(),
            last_name: "Serrano".to_string(),
            email: email.to_string(),
            phone: Some("(831) 555-5554".to_string()),
            active: true,
            store_id: 1,
            manager_id,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_with_nested_data() {
        let db = seeded_db(1, 0).await;
        let repo = db.staff();

        let manager_id = repo
            .create(&new_staff("Fabiola", "fabiola@bikes.shop", None))
            .await
            .unwrap();
        let staff_id = repo
            .create(&new_staff("Mireya", "mireya@bikes.shop", Some(manager_id)))
            .await
            .unwrap();

        let staff = repo.get_by_id(staff_id).await.unwrap().unwrap();
        assert_eq!(staff.first_name, "Mireya");
        assert!(staff.active);
        assert_eq!(staff.store_data.as_ref().unwrap().store_name, "Store 1");

        let manager = staff.manager_data.unwrap();
        assert_eq!(manager.staff_id, manager_id);
        assert_eq!(manager.first_name, "Fabiola");

        let top = repo.get_by_id(manager_id).await.unwrap().unwrap();
        assert!(top.manager_data.is_none());
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = seeded_db(1, 0).await;
        assert!(db.staff().get_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let db = seeded_db(1, 0).await;
        let repo = db.staff();

        repo.create(&new_staff("Genna", "genna@bikes.shop", None))
            .await
            .unwrap();
        let err = repo
            .create(&new_staff("Genna", "genna@bikes.shop", None))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_unknown_store_is_foreign_key_violation() {
        let db = seeded_db(1, 0).await;
        let mut staff = new_staff("Virgie", "virgie@bikes.shop", None);
        staff.store_id = 42;

        let err = db.staff().create(&staff).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_list_paging_and_search() {
        let db = seeded_db(1, 0).await;
        let repo = db.staff();

        for n in 0..12 {
            repo.create(&new_staff(
                &format!("Kali{}", n),
                &format!("kali{}@bikes.shop", n),
                None,
            ))
            .await
            .unwrap();
        }
        repo.create(&new_staff("Layla", "layla_terrell@bikes.shop", None))
            .await
            .unwrap();

        let page = repo.list(&ListRequest::default()).await.unwrap();
        assert_eq!(page.count, 13);
        assert_eq!(page.staffs.len(), 10);

        let page = repo
            .list(&ListRequest::new(Some(10), Some(10), None))
            .await
            .unwrap();
        assert_eq!(page.staffs.len(), 3);

        let page = repo
            .list(&ListRequest::new(None, None, Some("layla".to_string())))
            .await
            .unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.staffs[0].first_name, "Layla");
    }

    #[tokio::test]
    async fn test_search_metacharacters_are_data() {
        let db = seeded_db(1, 0).await;
        let repo = db.staff();
        repo.create(&new_staff("Bernardine", "bernardine@bikes.shop", None))
            .await
            .unwrap();

        for term in ["' OR '1'='1", "%'; DROP TABLE staffs; --", "\"x\"", "%", "_", "\\"] {
            let page = repo
                .list(&ListRequest::new(None, None, Some(term.to_string())))
                .await
                .unwrap();
            assert_eq!(page.count, 0, "term {:?}", term);
        }

        // Table still intact
        let page = repo.list(&ListRequest::default()).await.unwrap();
        assert_eq!(page.count, 1);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = seeded_db(2, 0).await;
        let repo = db.staff();
        let id = repo
            .create(&new_staff("Marcelene", "marcelene@bikes.shop", None))
            .await
            .unwrap();

        let update = UpdateStaff {
            staff_id: id,
            first_name: "Marcelene".to_string(),
            last_name: "Boyer".to_string(),
            email: "marcelene.boyer@bikes.shop".to_string(),
            phone: None,
            active: false,
            store_id: 2,
            manager_id: None,
        };
        repo.update(&update).await.unwrap();

        let staff = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(staff.last_name, "Boyer");
        assert!(!staff.active);
        assert_eq!(staff.store_id, 2);
        assert!(staff.updated_at >= staff.created_at);

        let missing = UpdateStaff {
            staff_id: id + 100,
            ..update
        };
        assert!(matches!(
            repo.update(&missing).await,
            Err(DbError::NotFound { .. })
        ));

        repo.delete(id).await.unwrap();
        assert!(matches!(
            repo.delete(id).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_deleting_manager_clears_reference() {
        let db = seeded_db(1, 0).await;
        let repo = db.staff();
        let manager_id = repo
            .create(&new_staff("Jannette", "jannette@bikes.shop", None))
            .await
            .unwrap();
        let id = repo
            .create(&new_staff("Venita", "venita@bikes.shop", Some(manager_id)))
            .await
            .unwrap();

        repo.delete(manager_id).await.unwrap();

        let staff = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(staff.manager_id, None);
        assert!(staff.manager_data.is_none());
    }
}
