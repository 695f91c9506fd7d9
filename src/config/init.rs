use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use super::{find_document, BUNDLED_QUESTIONS, BUNDLED_SUGGESTIONS, QUESTIONS_STEM, SUGGESTIONS_STEM};

/// What `write_bundled_config` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Written { questions: PathBuf, suggestions: PathBuf },
    /// A questions or suggestions document already exists and `force` was off.
    AlreadyExists { path: PathBuf },
}

/// Write the bundled questionnaire into `dir` as editable YAML.
///
/// Creates the directory if needed. Existing documents are only replaced
/// when `force` is set. Each file is written atomically.
pub fn write_bundled_config(dir: &Path, force: bool) -> Result<InitOutcome> {
    if !force {
        let existing = find_document(dir, QUESTIONS_STEM).or_else(|| find_document(dir, SUGGESTIONS_STEM));
        if let Some(path) = existing {
            return Ok(InitOutcome::AlreadyExists { path });
        }
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create config directory at {}", dir.display()))?;

    let questions = dir.join(format!("{}.yaml", QUESTIONS_STEM));
    let suggestions = dir.join(format!("{}.yaml", SUGGESTIONS_STEM));
    write_atomic(&questions, BUNDLED_QUESTIONS)?;
    write_atomic(&suggestions, BUNDLED_SUGGESTIONS)?;

    info!(dir = %dir.display(), "wrote bundled questionnaire");
    Ok(InitOutcome::Written {
        questions,
        suggestions,
    })
}

fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{bundled_config, load_from_dir};

    #[test]
    fn test_written_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("ntrp");

        let outcome = write_bundled_config(&target, false).unwrap();
        assert!(matches!(outcome, InitOutcome::Written { .. }));

        let loaded = load_from_dir(&target).unwrap();
        assert_eq!(loaded, bundled_config().unwrap());
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("questions.yaml"), "questions: []").unwrap();

        let outcome = write_bundled_config(dir.path(), false).unwrap();
        assert!(matches!(outcome, InitOutcome::AlreadyExists { .. }));
        let content = fs::read_to_string(dir.path().join("questions.yaml")).unwrap();
        assert_eq!(content, "questions: []");
    }

    #[test]
    fn test_force_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("questions.yaml"), "questions: []").unwrap();

        let outcome = write_bundled_config(dir.path(), true).unwrap();
        assert!(matches!(outcome, InitOutcome::Written { .. }));
        let content = fs::read_to_string(dir.path().join("questions.yaml")).unwrap();
        assert_eq!(content, BUNDLED_QUESTIONS);
    }
}
