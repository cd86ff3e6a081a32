//! Site locale resolution.
//!
//! A [`LocaleContext`] is built from [`LocaleConfig`] and handed to whoever
//! needs to map a requested locale onto a published one. Resolutions are
//! memoised in the context; [`LocaleContext::invalidate`] drops the memo and
//! [`LocaleContext::reconfigure`] swaps the configuration.
//!
//! Matching order:
//!
//! 1. exact match (case-insensitive, `-` and `_` are the same)
//! 2. language match: `de-AT` → `de`, or `de` → the first `de_*`
//! 3. the configured default

use crate::config::LocaleConfig;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct LocaleContext {
    config: LocaleConfig,
    resolved: HashMap<String, String>,
}

impl LocaleContext {
    pub fn new(config: LocaleConfig) -> Self {
        Self {
            config,
            resolved: HashMap::new(),
        }
    }

    pub fn config(&self) -> &LocaleConfig {
        &self.config
    }

    pub fn default_locale(&self) -> &str {
        &self.config.default
    }

    pub fn available(&self) -> &[String] {
        &self.config.available
    }

    /// Map `requested` onto one of the available locales.
    pub fn resolve(&mut self, requested: &str) -> String {
        let normalized = normalize(requested);
        if let Some(hit) = self.resolved.get(&normalized) {
            return hit.clone();
        }
        let locale = self.lookup(&normalized);
        log::debug!("resolved locale {requested:?} to {locale:?}");
        self.resolved.insert(normalized, locale.clone());
        locale
    }

    fn lookup(&self, normalized: &str) -> String {
        if normalized.is_empty() {
            return self.config.default.clone();
        }
        let available = &self.config.available;
        let lang = language(normalized);

        available
            .iter()
            .find(|a| normalize(a) == normalized)
            .or_else(|| available.iter().find(|a| normalize(a) == lang))
            .or_else(|| available.iter().find(|a| language(&normalize(a)) == lang))
            .cloned()
            .unwrap_or_else(|| self.config.default.clone())
    }

    /// Number of memoised resolutions.
    pub fn cached(&self) -> usize {
        self.resolved.len()
    }

    /// Forget every memoised resolution.
    pub fn invalidate(&mut self) {
        self.resolved.clear();
    }

    /// Replace the configuration and forget memoised resolutions.
    pub fn reconfigure(&mut self, config: LocaleConfig) {
        self.config = config;
        self.invalidate();
    }
}

fn normalize(tag: &str) -> String {
    tag.trim().replace('-', "_").to_ascii_lowercase()
}

fn language(normalized: &str) -> &str {
    normalized.split('_').next().unwrap_or(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(default: &str, available: &[&str]) -> LocaleContext {
        LocaleContext::new(LocaleConfig {
            default: default.to_string(),
            available: available.iter().map(|s| s.to_string()).collect(),
        })
    }

    #[test]
    fn exact_match_ignores_case_and_separator() {
        let mut ctx = context("en", &["en", "de_CH"]);
        assert_eq!(ctx.resolve("de-ch"), "de_CH");
        assert_eq!(ctx.resolve("EN"), "en");
    }

    #[test]
    fn region_falls_back_to_language() {
        let mut ctx = context("en", &["en", "de"]);
        assert_eq!(ctx.resolve("de_AT"), "de");
    }

    #[test]
    fn language_picks_first_regional_variant() {
        let mut ctx = context("en", &["en", "fr_CA", "fr_FR"]);
        assert_eq!(ctx.resolve("fr"), "fr_CA");
    }

    #[test]
    fn unknown_and_empty_use_default() {
        let mut ctx = context("en", &["en", "de"]);
        assert_eq!(ctx.resolve("ja"), "en");
        assert_eq!(ctx.resolve(""), "en");
    }

    #[test]
    fn resolutions_are_memoised_until_invalidated() {
        let mut ctx = context("en", &["en", "de"]);
        ctx.resolve("de");
        ctx.resolve("DE");
        assert_eq!(ctx.cached(), 1);
        ctx.invalidate();
        assert_eq!(ctx.cached(), 0);
    }

    #[test]
    fn reconfigure_drops_stale_answers() {
        let mut ctx = context("en", &["en"]);
        assert_eq!(ctx.resolve("de"), "en");
        ctx.reconfigure(LocaleConfig {
            default: "en".to_string(),
            available: vec!["en".to_string(), "de".to_string()],
        });
        assert_eq!(ctx.resolve("de"), "de");
        assert_eq!(ctx.available().len(), 2);
    }
}
