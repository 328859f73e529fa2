use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use snooze_core::{AuthToken, StoredCredential};
use snooze_engine::AtomicFileWriter;
use snooze_logging::{snooze_error, snooze_info, snooze_warn};

const SESSION_FILENAME: &str = ".snooze_session.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSession {
    username: String,
    token: String,
}

pub(crate) fn load_credential(state_dir: &Path) -> Option<StoredCredential> {
    let path = state_dir.join(SESSION_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return None;
        }
        Err(err) => {
            snooze_warn!("Failed to read saved session from {:?}: {}", path, err);
            return None;
        }
    };

    let session: PersistedSession = match ron::from_str(&content) {
        Ok(session) => session,
        Err(err) => {
            snooze_warn!("Failed to parse saved session from {:?}: {}", path, err);
            return None;
        }
    };

    snooze_info!("Loaded saved session for {} from {:?}", session.username, path);
    Some(StoredCredential {
        username: session.username,
        token: AuthToken::new(session.token),
    })
}

pub(crate) fn save_credential(state_dir: &Path, credential: &StoredCredential) {
    let session = PersistedSession {
        username: credential.username.clone(),
        token: credential.token.as_str().to_string(),
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&session, pretty) {
        Ok(text) => text,
        Err(err) => {
            snooze_error!("Failed to serialize session: {}", err);
            return;
        }
    };

    let writer = AtomicFileWriter::new(PathBuf::from(state_dir));
    if let Err(err) = writer.write(SESSION_FILENAME, &content) {
        snooze_error!("Failed to save session to {:?}: {}", state_dir, err);
    }
}

pub(crate) fn clear_credential(state_dir: &Path) {
    let writer = AtomicFileWriter::new(PathBuf::from(state_dir));
    if let Err(err) = writer.remove(SESSION_FILENAME) {
        snooze_error!("Failed to remove saved session in {:?}: {}", state_dir, err);
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn credential() -> StoredCredential {
        StoredCredential {
            username: "ada".to_string(),
            token: AuthToken::new("tok-123"),
        }
    }

    #[test]
    fn saved_credential_loads_back() {
        let temp = TempDir::new().unwrap();
        save_credential(temp.path(), &credential());

        assert_eq!(load_credential(temp.path()), Some(credential()));
    }

    #[test]
    fn missing_or_corrupt_file_loads_as_none() {
        let temp = TempDir::new().unwrap();
        assert_eq!(load_credential(temp.path()), None);

        fs::write(temp.path().join(SESSION_FILENAME), "not ron at all {").unwrap();
        assert_eq!(load_credential(temp.path()), None);
    }

    #[test]
    fn clearing_forgets_the_session() {
        let temp = TempDir::new().unwrap();
        save_credential(temp.path(), &credential());
        clear_credential(temp.path());
        clear_credential(temp.path());

        assert_eq!(load_credential(temp.path()), None);
    }
}
