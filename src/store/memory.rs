//! In-memory application store backed by a sharded concurrent map.
//!
//! The compare-and-swap runs entirely under the shard lock of the record's
//! key, which makes it atomic with respect to concurrent validation
//! attempts on the same registration while leaving other registrations
//! fully parallel.

use super::{ApplicationStore, StoreError, StoreResult, TerminalFields};
use crate::models::ProxyApplication;
use crate::state_machine::RegistrationState;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

type StoreKey = (String, String);

/// DashMap-backed store for tests and embedded deployments.
#[derive(Debug, Default)]
pub struct InMemoryApplicationStore {
    records: DashMap<StoreKey, ProxyApplication>,
}

impl InMemoryApplicationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn key(department: &str, registration_id: &str) -> StoreKey {
        (department.to_string(), registration_id.to_string())
    }
}

#[async_trait]
impl ApplicationStore for InMemoryApplicationStore {
    async fn put(&self, record: ProxyApplication) -> StoreResult<()> {
        let key = Self::key(&record.department, &record.registration_id);
        match self.records.entry(key) {
            Entry::Occupied(_) => Err(StoreError::Duplicate {
                department: record.department,
                registration_id: record.registration_id,
            }),
            Entry::Vacant(vacancy) => {
                vacancy.insert(record);
                Ok(())
            }
        }
    }

    async fn get(
        &self,
        department: &str,
        registration_id: &str,
    ) -> StoreResult<Option<ProxyApplication>> {
        let key = Self::key(department, registration_id);
        Ok(self.records.get(&key).map(|record| record.value().clone()))
    }

    async fn compare_and_swap_status(
        &self,
        department: &str,
        registration_id: &str,
        expected: RegistrationState,
        new_status: RegistrationState,
        fields: TerminalFields,
    ) -> StoreResult<()> {
        let key = Self::key(department, registration_id);
        // The RefMut holds the shard lock for the whole check-and-update.
        let mut record = self.records.get_mut(&key).ok_or_else(|| StoreError::Missing {
            department: department.to_string(),
            registration_id: registration_id.to_string(),
        })?;

        if record.status != expected {
            return Err(StoreError::StatusConflict {
                registration_id: registration_id.to_string(),
                expected,
                actual: record.status,
            });
        }

        record.status = new_status;
        if let Some(validated_at) = fields.validated_at {
            record.validated_at = Some(validated_at);
        }
        if let Some(reason) = fields.rejection_reason {
            record.rejection_reason = Some(reason);
        }

        Ok(())
    }
}
