//! In-memory status registry.
//!
//! Holds the status records and the projects that reference them, and enforces the
//! naming, uniqueness and retirement rules. Every mutation goes through here.

use crate::clock::Clock;
use crate::error::RegistryError;
use crate::model::{self, CatalogSnapshot, ProjectReference, StatusCode, StatusRecord};
use crate::validation;

pub struct StatusRegistry {
    records: Vec<StatusRecord>,
    projects: Vec<ProjectReference>,
    clock: Box<dyn Clock>,
}

impl StatusRegistry {
    pub fn new(
        records: Vec<StatusRecord>,
        projects: Vec<ProjectReference>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            records,
            projects,
            clock,
        }
    }

    /// Registry loaded with the fixed startup catalog.
    pub fn seeded(clock: Box<dyn Clock>) -> Self {
        Self::new(model::seed_statuses(), model::seed_projects(), clock)
    }

    pub fn records(&self) -> &[StatusRecord] {
        &self.records
    }

    pub fn projects(&self) -> &[ProjectReference] {
        &self.projects
    }

    pub fn active(&self) -> impl Iterator<Item = &StatusRecord> {
        self.records.iter().filter(|r| r.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn get(&self, code: &StatusCode) -> Option<&StatusRecord> {
        self.records.iter().find(|r| &r.code == code)
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            statuses: self.records.clone(),
            projects: self.projects.clone(),
        }
    }

    /// Highest numeric suffix plus one. Starts at `EST001` when no code has a numeric suffix.
    pub fn next_code(&self) -> Result<StatusCode, RegistryError> {
        let Some(last) = self.records.iter().max_by_key(|r| r.code.seq()) else {
            return Ok(StatusCode::from_seq(1));
        };
        match last.code.seq() {
            None => Ok(StatusCode::from_seq(1)),
            Some(n) => n
                .checked_add(1)
                .map(StatusCode::from_seq)
                .ok_or_else(|| RegistryError::CodeSpaceExhausted(last.code.clone())),
        }
    }

    pub fn is_referenced(&self, code: &StatusCode) -> bool {
        self.projects.iter().any(|p| &p.status_code == code)
    }

    fn name_taken(&self, name: &str, exclude: Option<&StatusCode>) -> bool {
        self.active().any(|r| r.name == name && Some(&r.code) != exclude)
    }

    fn position(&self, code: &StatusCode) -> Result<usize, RegistryError> {
        self.records
            .iter()
            .position(|r| &r.code == code)
            .ok_or_else(|| RegistryError::UnknownCode(code.clone()))
    }

    pub fn add(&mut self, name: &str) -> Result<StatusRecord, RegistryError> {
        if !validation::is_valid_new_name(name) {
            tracing::debug!(name, "add rejected: invalid name");
            return Err(RegistryError::InvalidName(name.to_string()));
        }
        if self.name_taken(name, None) {
            tracing::debug!(name, "add rejected: duplicate name");
            return Err(RegistryError::DuplicateName(name.to_string()));
        }

        let code = self.next_code().inspect_err(|e| {
            tracing::warn!(name, error = %e, "add rejected: no code available");
        })?;
        let record = StatusRecord::active(code, name);
        tracing::info!(code = %record.code, name, "status created");
        self.records.push(record.clone());
        Ok(record)
    }

    pub fn rename(
        &mut self,
        code: &StatusCode,
        new_name: &str,
    ) -> Result<StatusRecord, RegistryError> {
        let idx = self.position(code)?;
        let current = &self.records[idx];
        if !current.is_active() {
            return Err(RegistryError::AlreadyRetired(code.clone()));
        }
        if !validation::is_valid_rename(new_name) {
            tracing::debug!(%code, new_name, "rename rejected: invalid name");
            return Err(RegistryError::InvalidName(new_name.to_string()));
        }
        if current.name == new_name || self.name_taken(new_name, Some(code)) {
            tracing::debug!(%code, new_name, "rename rejected: duplicate name");
            return Err(RegistryError::DuplicateName(new_name.to_string()));
        }

        let record = &mut self.records[idx];
        tracing::info!(%code, from = %record.name, to = new_name, "status renamed");
        record.name = new_name.to_string();
        Ok(record.clone())
    }

    pub fn retire(&mut self, code: &StatusCode) -> Result<StatusRecord, RegistryError> {
        if self.is_referenced(code) {
            tracing::warn!(%code, "retire rejected: status is assigned to a project");
            return Err(RegistryError::ReferencedByProject(code.clone()));
        }
        let idx = self.position(code)?;
        if !self.records[idx].is_active() {
            return Err(RegistryError::AlreadyRetired(code.clone()));
        }

        let now = self.clock.now();
        let record = &mut self.records[idx];
        record.retired_at = Some(now);
        tracing::info!(%code, name = %record.name, "status retired");
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use rstest::rstest;
    use std::collections::HashSet;
    use time::macros::datetime;
    use time::OffsetDateTime;

    const NOW: OffsetDateTime = datetime!(2024-05-10 09:00 UTC);

    fn seeded() -> StatusRegistry {
        StatusRegistry::seeded(Box::new(FixedClock(NOW)))
    }

    fn code(s: &str) -> StatusCode {
        StatusCode::from(s)
    }

    fn assert_active_names_unique(reg: &StatusRegistry) {
        let names: Vec<&str> = reg.active().map(|r| r.name.as_str()).collect();
        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(names.len(), unique.len(), "duplicate active names: {names:?}");
    }

    #[test]
    fn next_code_follows_highest_suffix() {
        let reg = seeded();
        assert_eq!(reg.next_code(), Ok(code("EST006")));
    }

    #[test]
    fn next_code_uses_max_not_count() {
        let records = vec![
            StatusRecord::active(code("EST002"), "Creado"),
            StatusRecord::active(code("EST017"), "Iniciado"),
            StatusRecord::active(code("legacy"), "Cancelado"),
        ];
        let reg = StatusRegistry::new(records, vec![], Box::new(FixedClock(NOW)));
        assert_eq!(reg.next_code(), Ok(code("EST018")));
    }

    #[test]
    fn next_code_on_empty_registry_starts_at_one() {
        let reg = StatusRegistry::new(vec![], vec![], Box::new(FixedClock(NOW)));
        assert_eq!(reg.next_code(), Ok(code("EST001")));
    }

    #[test]
    fn next_code_widens_past_u32() {
        let records = vec![StatusRecord::active(code("EST4294967295"), "Creado")];
        let reg = StatusRegistry::new(records, vec![], Box::new(FixedClock(NOW)));
        assert_eq!(reg.next_code(), Ok(code("EST4294967296")));
    }

    #[rstest]
    #[case::max_u64("EST18446744073709551615")]
    #[case::longer_than_u64("EST99999999999999999999999")]
    fn add_fails_cleanly_when_codes_run_out(#[case] last: &str) {
        let records = vec![StatusRecord::active(code(last), "Creado")];
        let mut reg = StatusRegistry::new(records, vec![], Box::new(FixedClock(NOW)));
        let err = RegistryError::CodeSpaceExhausted(code(last));
        assert_eq!(reg.next_code(), Err(err.clone()));
        assert_eq!(reg.add("Iniciado"), Err(err));
        assert_eq!(reg.records().len(), 1);
    }

    #[test]
    fn add_allowed_name_gets_fresh_code() {
        let mut reg = seeded();
        let created = reg.add("Finalizado").unwrap();
        assert_eq!(created.code, code("EST006"));
        assert!(created.is_active());
        assert_eq!(reg.active_count(), 6);
        assert_active_names_unique(&reg);
    }

    #[test]
    fn add_creado_after_retiring_it_reuses_name() {
        let mut reg = StatusRegistry::new(
            model::seed_statuses(),
            vec![],
            Box::new(FixedClock(NOW)),
        );
        reg.retire(&code("EST001")).unwrap();

        let created = reg.add("Creado").unwrap();
        assert_eq!(created.code, code("EST006"));
        assert_eq!(reg.records().len(), 6);
        assert_active_names_unique(&reg);
    }

    #[rstest]
    #[case::not_in_vocabulary("Xyz123")]
    #[case::empty("")]
    #[case::blank("   ")]
    #[case::wrong_case("finalizado")]
    fn add_rejects_invalid_names(#[case] name: &str) {
        let mut reg = seeded();
        assert_eq!(
            reg.add(name),
            Err(RegistryError::InvalidName(name.to_string()))
        );
        assert_eq!(reg.records().len(), 5);
    }

    #[test]
    fn add_rejects_active_duplicate() {
        let mut reg = seeded();
        assert_eq!(
            reg.add("Creado"),
            Err(RegistryError::DuplicateName("Creado".into()))
        );
    }

    #[test]
    fn rename_updates_name_only() {
        let mut reg = seeded();
        let renamed = reg.rename(&code("EST004"), "En pausa").unwrap();
        assert_eq!(renamed.code, code("EST004"));
        assert_eq!(renamed.name, "En pausa");
        assert!(renamed.is_active());
        assert_eq!(reg.get(&code("EST004")).unwrap().name, "En pausa");
        assert_active_names_unique(&reg);
    }

    #[rstest]
    #[case::digit("Plan 1")]
    #[case::symbol("Pausado!")]
    #[case::blank("  ")]
    fn rename_rejects_invalid_names(#[case] name: &str) {
        let mut reg = seeded();
        assert_eq!(
            reg.rename(&code("EST004"), name),
            Err(RegistryError::InvalidName(name.to_string()))
        );
        assert_eq!(reg.get(&code("EST004")).unwrap().name, "Suspendido");
    }

    #[test]
    fn rename_to_current_name_is_duplicate() {
        let mut reg = seeded();
        assert_eq!(
            reg.rename(&code("EST004"), "Suspendido"),
            Err(RegistryError::DuplicateName("Suspendido".into()))
        );
    }

    #[test]
    fn rename_to_other_active_name_is_duplicate() {
        let mut reg = seeded();
        assert_eq!(
            reg.rename(&code("EST004"), "Cancelado"),
            Err(RegistryError::DuplicateName("Cancelado".into()))
        );
    }

    #[test]
    fn rename_to_retired_name_is_allowed() {
        let mut reg = seeded();
        reg.retire(&code("EST005")).unwrap();
        let renamed = reg.rename(&code("EST004"), "Cancelado").unwrap();
        assert_eq!(renamed.name, "Cancelado");
        assert_active_names_unique(&reg);
    }

    #[test]
    fn rename_unknown_or_retired_code_fails() {
        let mut reg = seeded();
        assert_eq!(
            reg.rename(&code("EST099"), "Pausado"),
            Err(RegistryError::UnknownCode(code("EST099")))
        );
        reg.retire(&code("EST004")).unwrap();
        assert_eq!(
            reg.rename(&code("EST004"), "Pausado"),
            Err(RegistryError::AlreadyRetired(code("EST004")))
        );
    }

    #[rstest]
    #[case("EST001")]
    #[case("EST002")]
    #[case("EST003")]
    fn retire_referenced_status_is_rejected(#[case] c: &str) {
        let mut reg = seeded();
        assert!(reg.is_referenced(&code(c)));
        assert_eq!(
            reg.retire(&code(c)),
            Err(RegistryError::ReferencedByProject(code(c)))
        );
        assert!(reg.get(&code(c)).unwrap().is_active());
    }

    #[test]
    fn retire_unreferenced_status_sets_timestamp() {
        let mut reg = seeded();
        assert!(!reg.is_referenced(&code("EST004")));
        let retired = reg.retire(&code("EST004")).unwrap();
        assert_eq!(retired.retired_at, Some(NOW));
        assert_eq!(reg.active_count(), 4);
        assert_eq!(reg.records().len(), 5);
    }

    #[test]
    fn retire_twice_keeps_first_timestamp() {
        let mut reg = seeded();
        reg.retire(&code("EST005")).unwrap();
        assert_eq!(
            reg.retire(&code("EST005")),
            Err(RegistryError::AlreadyRetired(code("EST005")))
        );
        assert_eq!(reg.get(&code("EST005")).unwrap().retired_at, Some(NOW));
    }

    #[test]
    fn mutations_never_touch_projects() {
        let mut reg = seeded();
        let before = reg.projects().to_vec();
        reg.add("Finalizado").unwrap();
        reg.rename(&code("EST002"), "Arrancado").unwrap();
        reg.retire(&code("EST004")).unwrap();
        assert_eq!(reg.projects(), before.as_slice());
    }
}
