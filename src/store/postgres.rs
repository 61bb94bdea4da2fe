//! PostgreSQL application store.
//!
//! Maps to the `proxy_applications` table created by
//! `migrations/20260807000001_create_proxy_applications.sql`. The two
//! identity blocks are stored as JSONB columns; the compare-and-swap is a
//! conditional `UPDATE` whose `rows_affected` decides the outcome, with a
//! re-read only on the failure path to report the actual status.

use super::{ApplicationStore, StoreError, StoreResult, TerminalFields};
use crate::models::{Applicant, ProxyApplication, ProxyVoter};
use crate::state_machine::RegistrationState;
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

/// sqlx-backed store for production deployments.
#[derive(Debug, Clone)]
pub struct PostgresApplicationStore {
    pool: PgPool,
}

impl PostgresApplicationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_application(row: &PgRow) -> StoreResult<ProxyApplication> {
        let registration_id: String = row.try_get("registration_id")?;

        let status_raw: String = row.try_get("status")?;
        let status = status_raw
            .parse::<RegistrationState>()
            .map_err(|reason| StoreError::Corrupt {
                registration_id: registration_id.clone(),
                reason,
            })?;

        let applicant_value: serde_json::Value = row.try_get("applicant")?;
        let applicant: Applicant = serde_json::from_value(applicant_value)?;
        let proxy_voter_value: serde_json::Value = row.try_get("proxy_voter")?;
        let proxy_voter: ProxyVoter = serde_json::from_value(proxy_voter_value)?;

        Ok(ProxyApplication {
            registration_id,
            department: row.try_get("department")?,
            created_at: row.try_get("created_at")?,
            valid_until: row.try_get("valid_until")?,
            applicant,
            proxy_voter,
            status,
            validated_at: row.try_get("validated_at")?,
            rejection_reason: row.try_get("rejection_reason")?,
        })
    }
}

#[async_trait]
impl ApplicationStore for PostgresApplicationStore {
    async fn put(&self, record: ProxyApplication) -> StoreResult<()> {
        let applicant = serde_json::to_value(&record.applicant)?;
        let proxy_voter = serde_json::to_value(&record.proxy_voter)?;

        let result = sqlx::query(
            r#"
            INSERT INTO proxy_applications
            (registration_id, department, created_at, valid_until,
             applicant, proxy_voter, status, validated_at, rejection_reason)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&record.registration_id)
        .bind(&record.department)
        .bind(record.created_at)
        .bind(record.valid_until)
        .bind(applicant)
        .bind(proxy_voter)
        .bind(record.status.to_string())
        .bind(record.validated_at)
        .bind(&record.rejection_reason)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_error)) if db_error.is_unique_violation() => {
                Err(StoreError::Duplicate {
                    department: record.department,
                    registration_id: record.registration_id,
                })
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn get(
        &self,
        department: &str,
        registration_id: &str,
    ) -> StoreResult<Option<ProxyApplication>> {
        let row = sqlx::query(
            r#"
            SELECT registration_id, department, created_at, valid_until,
                   applicant, proxy_voter, status, validated_at, rejection_reason
            FROM proxy_applications
            WHERE department = $1 AND registration_id = $2
            "#,
        )
        .bind(department)
        .bind(registration_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_application).transpose()
    }

    async fn compare_and_swap_status(
        &self,
        department: &str,
        registration_id: &str,
        expected: RegistrationState,
        new_status: RegistrationState,
        fields: TerminalFields,
    ) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE proxy_applications
            SET status = $1,
                validated_at = COALESCE($2, validated_at),
                rejection_reason = COALESCE($3, rejection_reason)
            WHERE department = $4 AND registration_id = $5 AND status = $6
            "#,
        )
        .bind(new_status.to_string())
        .bind(fields.validated_at)
        .bind(&fields.rejection_reason)
        .bind(department)
        .bind(registration_id)
        .bind(expected.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        // Lost the race or the record is gone; re-read to classify.
        match self.get(department, registration_id).await? {
            Some(record) => Err(StoreError::StatusConflict {
                registration_id: registration_id.to_string(),
                expected,
                actual: record.status,
            }),
            None => Err(StoreError::Missing {
                department: department.to_string(),
                registration_id: registration_id.to_string(),
            }),
        }
    }
}
