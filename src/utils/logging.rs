//! Transcript logging
//!
//! Mirrors the on-screen transcript to a plain text file when the user
//! enables it via `--log` or the `/log` command.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct TranscriptLog {
    file_path: Option<PathBuf>,
    is_active: bool,
}

impl TranscriptLog {
    pub fn new(log_file: Option<String>) -> Self {
        let is_active = log_file.is_some();
        TranscriptLog {
            file_path: log_file.map(PathBuf::from),
            is_active,
        }
    }

    pub fn enable(&mut self, path: String) -> Result<String, Box<dyn std::error::Error>> {
        let path = PathBuf::from(path);
        Self::test_file_access(&path)?;

        let display = path.display().to_string();
        self.file_path = Some(path);
        self.is_active = true;
        Ok(format!("Лог включен: {}", display))
    }

    pub fn toggle(&mut self) -> Result<String, Box<dyn std::error::Error>> {
        match &self.file_path {
            Some(path) => {
                self.is_active = !self.is_active;
                if self.is_active {
                    Ok(format!("Лог снова пишется в {}", path.display()))
                } else {
                    Ok(format!("Лог на паузе (файл: {})", path.display()))
                }
            }
            None => Err("Файл лога не задан. Сначала /log <файл>.".into()),
        }
    }

    pub fn append(&self, entry: &str) -> Result<(), Box<dyn std::error::Error>> {
        let Some(path) = self.file_path.as_ref().filter(|_| self.is_active) else {
            return Ok(());
        };

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        for line in entry.lines() {
            writeln!(file, "{}", line)?;
        }
        // Blank separator between entries, matching the screen spacing.
        writeln!(file)?;
        file.flush()?;
        Ok(())
    }

    pub fn status(&self) -> String {
        match (&self.file_path, self.is_active) {
            (None, _) => "выключен".to_string(),
            (Some(path), true) => format!("активен ({})", Self::file_name(path)),
            (Some(path), false) => format!("на паузе ({})", Self::file_name(path)),
        }
    }

    fn file_name(path: &Path) -> String {
        path.file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned()
    }

    fn test_file_access(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_log_swallows_entries() {
        let log = TranscriptLog::new(None);
        assert!(log.append("hello").is_ok());
        assert_eq!(log.status(), "выключен");
    }

    #[test]
    fn enable_then_toggle_pauses_and_resumes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.log");
        let mut log = TranscriptLog::new(None);

        log.enable(path.to_string_lossy().into_owned()).unwrap();
        log.append("Ты: привет").unwrap();

        log.toggle().unwrap();
        log.append("скрыто").unwrap();
        log.toggle().unwrap();
        log.append("Луки: здарова").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Ты: привет"));
        assert!(contents.contains("Луки: здарова"));
        assert!(!contents.contains("скрыто"));
    }

    #[test]
    fn toggle_without_file_is_an_error() {
        let mut log = TranscriptLog::new(None);
        assert!(log.toggle().is_err());
    }
}
