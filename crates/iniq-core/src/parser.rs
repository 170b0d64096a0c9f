use std::fs;
use std::path::PathBuf;

use crate::error::{IniqError, Result};

/// File input/output for a settings file.
///
/// All lines are loaded eagerly at construction. Mutations rewrite the
/// whole file with `\n` terminators and reload the line buffer. When the
/// file does not exist the buffer stays unset and every operation that
/// needs it fails with [`IniqError::FileNotFound`].
#[derive(Debug)]
pub struct Parser {
    directory: String,
    file_name: String,
    lines: Option<Vec<String>>,
}

impl Parser {
    /// Open a settings file given its directory and file name. The
    /// directory is prepended verbatim, so it must carry its trailing
    /// separator (or be empty for the working directory).
    pub fn new(directory: impl Into<String>, file_name: impl Into<String>) -> Result<Self> {
        let mut parser = Self {
            directory: directory.into(),
            file_name: file_name.into(),
            lines: None,
        };
        parser.reload()?;
        Ok(parser)
    }

    /// Open a settings file given a full path, split at the last path
    /// separator (`\` is tried before `/`). A path without either
    /// separator leaves both parts empty and the parser pointing at
    /// nothing.
    pub fn from_path(full_path: &str) -> Result<Self> {
        let split_at = full_path.rfind('\\').or_else(|| full_path.rfind('/'));
        let (directory, file_name) = match split_at {
            Some(idx) => (
                full_path[..=idx].to_string(),
                full_path[idx + 1..].to_string(),
            ),
            None => (String::new(), String::new()),
        };
        Self::new(directory, file_name)
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Concatenated directory + file name, as used for every file access.
    pub fn path(&self) -> PathBuf {
        PathBuf::from(format!("{}{}", self.directory, self.file_name))
    }

    /// The raw line buffer, or `None` when the file was missing.
    pub fn lines(&self) -> Option<&[String]> {
        self.lines.as_deref()
    }

    fn reload(&mut self) -> Result<()> {
        let path = self.path();
        if !path.is_file() {
            return Ok(());
        }
        let content = fs::read_to_string(&path)?;
        self.lines = Some(content.lines().map(str::to_string).collect());
        Ok(())
    }

    fn require_lines(&self) -> Result<&[String]> {
        self.lines
            .as_deref()
            .ok_or_else(|| IniqError::FileNotFound { path: self.path() })
    }

    /// Add `name=value` under the first category header that starts with
    /// `[category`.
    ///
    /// If any line between that header and the next one starts with
    /// `name` (a prefix check, not an exact key match), nothing is
    /// written and `Ok(false)` is returned. Otherwise the new line is
    /// inserted after the first line whose text contains `category` — a
    /// substring anchor, deliberately weaker than the duplicate check —
    /// and the file is rewritten and reloaded.
    ///
    /// Returns whether a line was inserted.
    pub fn write_new_setting(&mut self, category: &str, name: &str, value: &str) -> Result<bool> {
        let lines = self.require_lines()?;
        let header = format!("[{category}");

        let mut i = 0;
        while i < lines.len() {
            if lines[i].starts_with(&header) {
                let mut j = i + 1;
                while j < lines.len() {
                    if lines[j].starts_with(name) {
                        return Ok(false);
                    }
                    if lines[j].starts_with('[') {
                        break;
                    }
                    j += 1;
                }
                i = j;
            }
            i += 1;
        }

        let mut new_lines: Vec<String> = Vec::with_capacity(lines.len() + 1);
        let mut inserted = false;
        for line in lines {
            new_lines.push(line.clone());
            if !inserted && line.contains(category) {
                new_lines.push(format!("{name}={value}"));
                inserted = true;
            }
        }

        self.write_lines(&new_lines)?;
        Ok(inserted)
    }

    /// Remove the first line starting with `name` inside the section of
    /// the first category header that starts with `[category`. Every
    /// other line is copied unchanged; the file is rewritten and
    /// reloaded even when nothing matched.
    ///
    /// Returns whether a line was removed.
    pub fn delete_setting(&mut self, category: &str, name: &str) -> Result<bool> {
        let lines = self.require_lines()?;
        let header = format!("[{category}");

        let mut new_lines: Vec<String> = Vec::with_capacity(lines.len());
        let mut removed = false;
        let mut i = 0;
        while i < lines.len() {
            new_lines.push(lines[i].clone());
            if !removed && lines[i].starts_with(&header) {
                let mut j = i + 1;
                while j < lines.len() && !lines[j].starts_with('[') {
                    if !removed && lines[j].starts_with(name) {
                        removed = true;
                    } else {
                        new_lines.push(lines[j].clone());
                    }
                    j += 1;
                }
                i = j;
                continue;
            }
            i += 1;
        }

        self.write_lines(&new_lines)?;
        Ok(removed)
    }

    fn write_lines(&mut self, lines: &[String]) -> Result<()> {
        let mut content = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
        for line in lines {
            content.push_str(line);
            content.push('\n');
        }
        fs::write(self.path(), content)?;
        self.reload()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const SAMPLE: &str = "[Display]\nWidth=800\nHeight=600\n\n[Audio]\nVolume=75\n";

    fn write_sample(dir: &Path, content: &str) -> Parser {
        let path = dir.join("settings.ini");
        fs::write(&path, content).unwrap();
        Parser::new(format!("{}/", dir.display()), "settings.ini").unwrap()
    }

    #[test]
    fn loads_all_lines_on_construction() {
        let tmp = tempfile::TempDir::new().unwrap();
        let parser = write_sample(tmp.path(), SAMPLE);

        let lines = parser.lines().unwrap();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "[Display]");
        assert_eq!(lines[3], "");
        assert_eq!(lines[5], "Volume=75");
    }

    #[test]
    fn missing_file_leaves_buffer_unset() {
        let tmp = tempfile::TempDir::new().unwrap();
        let parser = Parser::new(format!("{}/", tmp.path().display()), "absent.ini").unwrap();
        assert!(parser.lines().is_none());
    }

    #[test]
    fn from_path_splits_on_forward_slash() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("settings.ini");
        fs::write(&path, SAMPLE).unwrap();

        let parser = Parser::from_path(&path.display().to_string()).unwrap();
        assert_eq!(parser.file_name(), "settings.ini");
        assert!(parser.directory().ends_with('/'));
        assert!(parser.lines().is_some());
    }

    #[test]
    fn from_path_without_separator_points_at_nothing() {
        let parser = Parser::from_path("settings.ini").unwrap();
        assert_eq!(parser.directory(), "");
        assert_eq!(parser.file_name(), "");
        assert!(parser.lines().is_none());
    }

    #[test]
    fn write_new_setting_appends_under_category() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut parser = write_sample(tmp.path(), SAMPLE);

        assert!(parser.write_new_setting("Display", "Scale", "1.5").unwrap());

        let lines = parser.lines().unwrap();
        assert_eq!(lines[0], "[Display]");
        assert_eq!(lines[1], "Scale=1.5");
        assert_eq!(lines[2], "Width=800");
    }

    #[test]
    fn write_new_setting_is_noop_for_existing_prefix() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut parser = write_sample(tmp.path(), SAMPLE);
        let before = fs::read(tmp.path().join("settings.ini")).unwrap();

        // "Width" already exists under [Display]; the file must not be
        // touched at all.
        assert!(!parser.write_new_setting("Display", "Width", "1024").unwrap());
        // Prefix check, not exact key match: "Wid" collides with "Width".
        assert!(!parser.write_new_setting("Display", "Wid", "1").unwrap());

        let after = fs::read(tmp.path().join("settings.ini")).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn write_new_setting_matches_header_by_prefix() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut parser = write_sample(tmp.path(), "[DisplayExtra]\nDepth=32\n");

        // "[Display" prefix-matches "[DisplayExtra]", so the duplicate
        // scan runs there, and the substring anchor inserts there too.
        assert!(!parser.write_new_setting("Display", "Depth", "16").unwrap());
        assert!(parser.write_new_setting("Display", "Gamma", "2.2").unwrap());
        assert_eq!(parser.lines().unwrap()[1], "Gamma=2.2");
    }

    #[test]
    fn write_new_setting_missing_category_inserts_nothing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut parser = write_sample(tmp.path(), SAMPLE);

        assert!(!parser.write_new_setting("Network", "Proxy", "none").unwrap());
        assert_eq!(parser.lines().unwrap().len(), 6);
    }

    #[test]
    fn write_normalizes_line_terminators() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut parser = write_sample(tmp.path(), "[Display]\r\nWidth=800\r\n");

        parser.write_new_setting("Display", "Scale", "1.5").unwrap();

        let content = fs::read_to_string(tmp.path().join("settings.ini")).unwrap();
        assert_eq!(content, "[Display]\nScale=1.5\nWidth=800\n");
    }

    #[test]
    fn delete_setting_removes_first_match_in_section() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut parser = write_sample(tmp.path(), SAMPLE);

        assert!(parser.delete_setting("Display", "Width").unwrap());

        let lines = parser.lines().unwrap();
        assert_eq!(
            lines,
            &["[Display]", "Height=600", "", "[Audio]", "Volume=75"]
        );
    }

    #[test]
    fn delete_setting_in_last_category() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut parser = write_sample(tmp.path(), SAMPLE);

        assert!(parser.delete_setting("Audio", "Volume").unwrap());

        let lines = parser.lines().unwrap();
        assert_eq!(lines, &["[Display]", "Width=800", "Height=600", "", "[Audio]"]);
    }

    #[test]
    fn delete_setting_ignores_other_sections() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut parser = write_sample(tmp.path(), SAMPLE);

        // "Volume" lives under [Audio], not [Display].
        assert!(!parser.delete_setting("Display", "Volume").unwrap());
        assert_eq!(parser.lines().unwrap().len(), 6);
    }

    #[test]
    fn mutation_on_missing_file_fails() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut parser = Parser::new(format!("{}/", tmp.path().display()), "absent.ini").unwrap();

        let err = parser.write_new_setting("Display", "Scale", "1.5").unwrap_err();
        assert!(matches!(err, IniqError::FileNotFound { .. }));

        let err = parser.delete_setting("Display", "Width").unwrap_err();
        assert!(matches!(err, IniqError::FileNotFound { .. }));
    }
}
