//! Maps the engine's line-oriented output back to caller identities.

use std::collections::{HashMap, HashSet};
use tracing::debug;

/// One recognized region, keyed by the caller-supplied identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognized {
    pub id: String,
    pub text: String,
}

/// Parses `<path>|<text>` lines against the correlation table.
///
/// Each line is split on the first delimiter only, so recognized text may
/// itself contain the delimiter glyph. Blank lines are skipped, a path not
/// present in the table is dropped, and at most one result is produced per
/// table entry.
#[must_use]
pub fn correlate(stdout: &str, table: &HashMap<String, String>) -> Vec<Recognized> {
    let mut seen_paths = HashSet::new();
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let (path, text) = line.split_once('|')?;
            let path = path.trim();
            let Some(id) = table.get(path) else {
                debug!("dropping result for unknown path: {path}");
                return None;
            };
            if !seen_paths.insert(path.to_string()) {
                return None;
            }
            Some(Recognized {
                id: id.clone(),
                text: text.trim().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(path, id)| ((*path).to_string(), (*id).to_string()))
            .collect()
    }

    #[test]
    fn text_may_contain_the_delimiter() {
        let table = table(&[("/tmp/f1.png", "a"), ("/tmp/f2.png", "b")]);
        let results = correlate("/tmp/f1.png|ABC123\n/tmp/f2.png|XY|Z\n", &table);

        assert_eq!(
            results,
            vec![
                Recognized {
                    id: "a".into(),
                    text: "ABC123".into()
                },
                Recognized {
                    id: "b".into(),
                    text: "XY|Z".into()
                },
            ]
        );
    }

    #[test]
    fn blank_lines_and_delimiterless_lines_are_skipped() {
        let table = table(&[("/tmp/f1.png", "a")]);
        let results = correlate("\n   \n/tmp/f1.png|text\nno delimiter here\n", &table);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "text");
    }

    #[test]
    fn unknown_paths_are_dropped() {
        let table = table(&[("/tmp/f1.png", "a")]);
        let results = correlate("/tmp/other.png|text\n", &table);
        assert!(results.is_empty());
    }

    #[test]
    fn at_most_one_result_per_path() {
        let table = table(&[("/tmp/f1.png", "a")]);
        let results = correlate("/tmp/f1.png|first\n/tmp/f1.png|second\n", &table);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "first");
    }

    #[test]
    fn empty_text_is_preserved() {
        let table = table(&[("/tmp/f1.png", "a")]);
        let results = correlate("/tmp/f1.png|\n", &table);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "");
    }
}
