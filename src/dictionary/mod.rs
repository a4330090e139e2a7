//! Canonical option dictionary
//!
//! Every known SDK option keyed by its camel-case spelling. The dictionary is
//! built once, validated for key collisions, and then shared read-only (usually
//! behind an `Arc`) by every analyzer.

mod builtin;
mod types;

pub use types::{DictionaryError, DictionaryOption, OptionCategory, OptionType};

use crate::normalize::{fold, to_canonical};
use std::collections::HashMap;
use tracing::debug;

const SUGGESTION_THRESHOLD: f64 = 0.85;

#[derive(Debug, Clone)]
pub struct OptionDictionary {
    entries: Vec<DictionaryOption>,
    index: HashMap<String, usize>,
    aliases: HashMap<String, usize>,
    folded: HashMap<String, usize>,
}

impl OptionDictionary {
    pub fn new(entries: Vec<DictionaryOption>) -> Result<Self, DictionaryError> {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if index.insert(entry.key.clone(), i).is_some() {
                return Err(DictionaryError::DuplicateKey(entry.key.clone()));
            }
        }

        let mut aliases = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            for alias in &entry.aliases {
                let canonical = to_canonical(alias);
                let taken = index.get(&canonical).or_else(|| aliases.get(&canonical));
                if let Some(&existing) = taken {
                    let existing: &DictionaryOption = &entries[existing];
                    return Err(DictionaryError::AliasCollision {
                        alias: alias.clone(),
                        existing: existing.key.clone(),
                    });
                }
                aliases.insert(canonical, i);
            }
        }

        let mut folded = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            let spellings = std::iter::once(&entry.key).chain(entry.aliases.iter());
            for spelling in spellings {
                match folded.get(&fold(spelling)) {
                    Some(&other) if other != i => {
                        let existing: &DictionaryOption = &entries[other];
                        return Err(DictionaryError::AliasCollision {
                            alias: spelling.clone(),
                            existing: existing.key.clone(),
                        });
                    }
                    _ => {
                        folded.insert(fold(spelling), i);
                    }
                }
            }
        }

        debug!(options = entries.len(), aliases = aliases.len(), "built option dictionary");
        Ok(Self {
            entries,
            index,
            aliases,
            folded,
        })
    }

    /// The built-in Sentry option table
    pub fn with_defaults() -> Result<Self, DictionaryError> {
        Self::new(builtin::entries())
    }

    /// Exact lookup by canonical key
    pub fn get(&self, key: &str) -> Option<&DictionaryOption> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    /// Lookup by any spelling an SDK might use for the key.
    ///
    /// Tries the exact key, its canonical form, known aliases, and finally a
    /// case and underscore blind comparison (`SendDefaultPII`).
    pub fn resolve(&self, key: &str) -> Option<&DictionaryOption> {
        if let Some(option) = self.get(key) {
            return Some(option);
        }
        let canonical = to_canonical(key);
        self.index
            .get(&canonical)
            .or_else(|| self.aliases.get(&canonical))
            .or_else(|| self.folded.get(&fold(key)))
            .map(|&i| &self.entries[i])
    }

    /// Closest canonical key for a spelling that did not resolve
    pub fn suggest(&self, key: &str) -> Option<&DictionaryOption> {
        let wanted = fold(key);
        self.entries
            .iter()
            .map(|entry| (strsim::jaro_winkler(&wanted, &fold(&entry.key)), entry))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, entry)| entry)
    }

    pub fn by_category(&self, category: OptionCategory) -> Vec<&DictionaryOption> {
        self.entries.iter().filter(|e| e.category == category).collect()
    }

    pub fn required(&self) -> Vec<&DictionaryOption> {
        self.entries.iter().filter(|e| e.required).collect()
    }

    /// Case-insensitive substring match over key, display name and description
    pub fn search(&self, term: &str) -> Vec<&DictionaryOption> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return self.entries.iter().collect();
        }
        self.entries
            .iter()
            .filter(|e| {
                e.key.to_lowercase().contains(&term)
                    || e.display_name.to_lowercase().contains(&term)
                    || e.description.to_lowercase().contains(&term)
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DictionaryOption> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{to_pascal_case, to_snake_case};
    use crate::syntax::SyntaxId;

    fn dictionary() -> OptionDictionary {
        OptionDictionary::with_defaults().unwrap()
    }

    fn option(key: &str) -> DictionaryOption {
        DictionaryOption::new(key, key, OptionCategory::Core, OptionType::String, "")
    }

    #[test]
    fn test_builtin_table_is_consistent() {
        let dict = dictionary();
        assert!(dict.len() >= 40);
        for entry in dict.iter() {
            assert_eq!(to_canonical(&entry.key), entry.key, "{} is not canonical", entry.key);
            for related in &entry.related {
                assert!(dict.get(related).is_some(), "{} relates to unknown {}", entry.key, related);
            }
        }
    }

    #[test]
    fn test_every_key_survives_convention_round_trip() {
        let dict = dictionary();
        for key in dict.keys() {
            assert_eq!(to_canonical(&to_snake_case(key)), key);
            assert_eq!(to_canonical(&to_pascal_case(key)), key);
        }
    }

    #[test]
    fn test_required_is_dsn_only() {
        let dict = dictionary();
        let keys: Vec<&str> = dict.required().iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, vec!["dsn"]);
    }

    #[test]
    fn test_resolve_spellings() {
        let dict = dictionary();
        assert_eq!(dict.resolve("traces_sample_rate").unwrap().key, "tracesSampleRate");
        assert_eq!(dict.resolve("TracesSampleRate").unwrap().key, "tracesSampleRate");
        assert_eq!(dict.resolve("SendDefaultPII").unwrap().key, "sendDefaultPii");
        assert_eq!(dict.resolve("isDebug").unwrap().key, "debug");
        assert_eq!(dict.resolve("environment_name").unwrap().key, "environment");
        assert_eq!(dict.resolve("excluded_exceptions").unwrap().key, "ignoreErrors");
        assert!(dict.resolve("frobnicate").is_none());
    }

    #[test]
    fn test_by_category() {
        let dict = dictionary();
        let replay = dict.by_category(OptionCategory::Replay);
        assert_eq!(replay.len(), 2);
        assert!(replay.iter().all(|o| !o.applies_to(SyntaxId::Python)));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let dict = dictionary();
        let hits: Vec<&str> = dict.search("SAMPLE RATE").iter().map(|o| o.key.as_str()).collect();
        assert!(hits.contains(&"sampleRate"));
        assert!(hits.contains(&"tracesSampleRate"));
        assert!(!dict.search("proxy").is_empty());
        assert!(dict.search("zzzz").is_empty());
        assert_eq!(dict.search("  ").len(), dict.len());
    }

    #[test]
    fn test_suggest_close_keys() {
        let dict = dictionary();
        assert_eq!(dict.suggest("tracesSampleRat").unwrap().key, "tracesSampleRate");
        assert_eq!(dict.suggest("enviroment").unwrap().key, "environment");
        assert!(dict.suggest("qqq").is_none());
    }

    #[test]
    fn test_duplicate_key_fails_fast() {
        let err = OptionDictionary::new(vec![option("dsn"), option("dsn")]).unwrap_err();
        assert_eq!(err, DictionaryError::DuplicateKey("dsn".into()));
    }

    #[test]
    fn test_alias_collision_fails_fast() {
        let err = OptionDictionary::new(vec![
            option("environment"),
            option("release").alias("environment"),
        ])
        .unwrap_err();
        assert!(matches!(err, DictionaryError::AliasCollision { .. }));

        let err = OptionDictionary::new(vec![option("fooBar"), option("foobar")]).unwrap_err();
        assert!(matches!(err, DictionaryError::AliasCollision { .. }));
    }
}
