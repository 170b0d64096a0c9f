use crate::error::{IniqError, Result};
use crate::model::{Category, Setting};
use crate::parser::Parser;

/// Query layer over a parsed settings file.
///
/// Built once from a [`Parser`]'s line buffer; holds its own copies of
/// the records, so a fresh `Information` is needed to observe on-disk
/// changes made after construction.
#[derive(Debug)]
pub struct Information {
    settings: Vec<Setting>,
    categories: Vec<Category>,
}

impl Information {
    /// Fails with [`IniqError::FileNotFound`] when the parser's file was
    /// missing and its line buffer is unset.
    pub fn new(parser: &Parser) -> Result<Self> {
        let lines = parser.lines().ok_or_else(|| IniqError::FileNotFound {
            path: parser.path(),
        })?;

        let mut info = Self {
            settings: Vec::new(),
            categories: Vec::new(),
        };
        info.build(lines)?;
        Ok(info)
    }

    fn build(&mut self, lines: &[String]) -> Result<()> {
        for (i, line) in lines.iter().enumerate() {
            if !line.is_empty() && line.starts_with('[') {
                // Literal text removal, not bracket matching: every '['
                // and ']' on the header line is stripped.
                let category = line.replace('[', "").replace(']', "");
                self.consume_settings(lines, &category, i)?;
            }
        }
        Ok(())
    }

    /// Consume setting lines following the header at `header_index`
    /// until the next header or end of input. Blank lines are skipped.
    fn consume_settings(&mut self, lines: &[String], category: &str, header_index: usize) -> Result<()> {
        let mut i = header_index + 1;
        while i < lines.len() && !lines[i].starts_with('[') {
            if !lines[i].is_empty() {
                // Split at the last '=': keys may not contain '=' past
                // the rightmost one, values may.
                let (key, value) =
                    lines[i]
                        .rsplit_once('=')
                        .ok_or_else(|| IniqError::MalformedLine {
                            line_number: i + 1,
                            line: lines[i].clone(),
                        })?;
                self.push_record(key, value, category);
            }
            i += 1;
        }
        Ok(())
    }

    /// One fresh Category record per setting line, even for a name seen
    /// before. Ids are the list lengths at insertion time.
    fn push_record(&mut self, key: &str, value: &str, category: &str) {
        let category = Category {
            id: self.categories.len(),
            name: category.to_string(),
        };
        self.categories.push(category.clone());

        self.settings.push(Setting {
            id: self.settings.len(),
            key: key.to_string(),
            value: value.to_string(),
            category,
        });
    }

    /// Value of `key` under `category`, both matched exactly. Empty
    /// string when absent.
    pub fn get_setting(&self, category: &str, key: &str) -> &str {
        self.settings
            .iter()
            .find(|s| s.category.name == category && s.key == key)
            .map(|s| s.value.as_str())
            .unwrap_or("")
    }

    /// Values of every setting whose category name contains `category`,
    /// in encounter order.
    pub fn get_settings(&self, category: &str) -> Vec<String> {
        self.settings
            .iter()
            .filter(|s| s.category.name.contains(category))
            .map(|s| s.value.clone())
            .collect()
    }

    /// Every category name in encounter order, duplicates included (one
    /// per setting line).
    pub fn get_categories(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    /// Category names containing `fragment`, in encounter order,
    /// duplicates included.
    pub fn get_categories_matching(&self, fragment: &str) -> Vec<String> {
        self.categories
            .iter()
            .filter(|c| c.name.contains(fragment))
            .map(|c| c.name.clone())
            .collect()
    }

    pub fn settings(&self) -> &[Setting] {
        &self.settings
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }
}
