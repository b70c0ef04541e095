//! File-backed mapping rules.
//!
//! Each non-pivot scheme's rules live in a `<scheme>.properties` file of
//! `key=value` lines; `#` starts a comment, blank lines are ignored, and a
//! line without a separator is kept as a bare key (global flags). The
//! mapping core only consumes the tokenized pairs, so all file handling
//! stays here.

use std::path::PathBuf;

use tracing::debug;
use v11n_map::{MapError, RulePair, RuleSource};

/// Loads `<scheme>.properties` files from one directory.
#[derive(Debug, Clone)]
pub struct FileRuleSource {
    dir: PathBuf,
}

impl FileRuleSource {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl RuleSource for FileRuleSource {
    fn rules_for(&self, scheme: &str) -> v11n_map::Result<Vec<RulePair>> {
        let path = self.dir.join(format!("{scheme}.properties"));
        let text = std::fs::read_to_string(&path).map_err(|error| {
            debug!(path = %path.display(), %error, "mapping rule file unavailable");
            MapError::NoMappingData {
                scheme: scheme.to_string(),
            }
        })?;
        Ok(parse_properties(&text))
    }
}

/// Tokenize properties-like text into ordered rule pairs.
pub fn parse_properties(text: &str) -> Vec<RulePair> {
    text.lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            // A line without a separator is a bare key, e.g. the
            // `!zerosUnmapped` flag.
            let Some((key, value)) = line.split_once('=') else {
                return Some((line.to_string(), String::new()));
            };
            Some((key.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_pairs_and_skips_noise() {
        let text = "\
# Alpha scheme against the pivot
!zerosUnmapped
Gen.1.1 = Gen.1.2

Gen.1.2-Gen.1.4=+1
?=Gen.1.9
";
        let rules = parse_properties(text);
        assert_eq!(
            rules,
            vec![
                ("!zerosUnmapped".to_string(), String::new()),
                ("Gen.1.1".to_string(), "Gen.1.2".to_string()),
                ("Gen.1.2-Gen.1.4".to_string(), "+1".to_string()),
                ("?".to_string(), "Gen.1.9".to_string()),
            ]
        );
    }

    #[test]
    fn missing_file_reports_no_mapping_data() {
        let source = FileRuleSource::new(PathBuf::from("/nonexistent/mappings"));
        let error = source.rules_for("Alpha").unwrap_err();
        assert!(matches!(error, MapError::NoMappingData { .. }));
    }
}
