//! File-backed snapshot slot

use super::{PersistenceError, ProgressStore, SnapshotPolicy, WizardProgress, SNAPSHOT_KEY};
use directories::ProjectDirs;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Keeps the snapshot as a JSON file
///
/// Writes go to a sibling temp file first and are renamed into place, so an
/// interrupted save leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileProgressStore {
    path: PathBuf,
    policy: SnapshotPolicy,
}

impl FileProgressStore {
    pub fn new(path: impl Into<PathBuf>, policy: SnapshotPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
        }
    }

    /// `<data dir>/quoteFormData.json`
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("br", "quote-wizard", "quote-wizard")
            .map(|dirs| dirs.data_dir().join(format!("{SNAPSHOT_KEY}.json")))
    }

    #[cfg(test)]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ProgressStore for FileProgressStore {
    fn save(&self, progress: &WizardProgress) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = progress.to_json()?;
        let temp = self.temp_path();
        fs::write(&temp, content)?;
        fs::rename(&temp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "snapshot written");
        Ok(())
    }

    fn load(&self) -> Result<Option<WizardProgress>, PersistenceError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        WizardProgress::from_json(&raw, self.policy).map(Some)
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{QuoteForm, ServiceType, Step};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileProgressStore {
        FileProgressStore::new(
            dir.path().join("nested").join("quoteFormData.json"),
            SnapshotPolicy::Reject,
        )
    }

    #[test]
    fn test_load_without_snapshot_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir).load().unwrap().is_none());
    }

    #[test]
    fn test_round_trip_with_empty_selection() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let form = QuoteForm {
            name: "Ana".to_string(),
            company: "Padaria Pão Quente".to_string(),
            ..Default::default()
        };
        let progress = WizardProgress::new(form, Step::Services);

        store.save(&progress).unwrap();
        assert_eq!(store.load().unwrap(), Some(progress));
    }

    #[test]
    fn test_round_trip_with_other_service() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut form = QuoteForm {
            service_type_other: "Integração com ERP".to_string(),
            objective: "Automatizar pedidos\ncom duas linhas".to_string(),
            gdpr_consent: true,
            ..Default::default()
        };
        form.services.toggle(ServiceType::Automation);
        form.services.toggle(ServiceType::Other);
        let progress = WizardProgress::new(form, Step::Confirmation);

        store.save(&progress).unwrap();
        assert_eq!(store.load().unwrap(), Some(progress));
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .save(&WizardProgress::new(QuoteForm::default(), Step::Contact))
            .unwrap();
        let second = WizardProgress::new(QuoteForm::default(), Step::Commercial);
        store.save(&second).unwrap();

        assert_eq!(store.load().unwrap(), Some(second));
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.clear().unwrap();
        store
            .save(&WizardProgress::new(QuoteForm::default(), Step::Contact))
            .unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = FileProgressStore::new(dir.path().join("snap.json"), SnapshotPolicy::Reject);
        fs::write(store.path(), "{\"name\": ").unwrap();
        assert!(matches!(store.load(), Err(PersistenceError::Corrupt(_))));
    }

    #[test]
    fn test_policy_applies_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snap.json");
        fs::write(&path, r#"{"name": "Ana", "lastStep": 2}"#).unwrap();

        let strict = FileProgressStore::new(&path, SnapshotPolicy::Reject);
        assert!(matches!(
            strict.load(),
            Err(PersistenceError::IncompatibleSchema { .. })
        ));

        let lenient = FileProgressStore::new(&path, SnapshotPolicy::MergeDefaults);
        let progress = lenient.load().unwrap().unwrap();
        assert_eq!(progress.form.name, "Ana");
        assert_eq!(progress.last_step, Step::Services);
    }

    #[test]
    fn test_unwritable_location_is_an_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();
        // Parent "directory" is a regular file
        let store = FileProgressStore::new(blocker.join("snap.json"), SnapshotPolicy::Reject);
        let result = store.save(&WizardProgress::new(QuoteForm::default(), Step::Contact));
        assert!(matches!(result, Err(PersistenceError::Io(_))));
    }

    #[test]
    fn test_default_path_uses_snapshot_key() {
        if let Some(path) = FileProgressStore::default_path() {
            assert!(path.ends_with("quoteFormData.json"));
        }
    }
}
