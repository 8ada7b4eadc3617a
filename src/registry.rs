//! Category registry for the US storefront.
//!
//! Every category the scraper accepts lives in the two tables below, each
//! carrying its canonical store label and the base search phrase its
//! keyword variants are expanded from. The registry is built once at
//! startup and shared read-only behind an Arc; nothing global.

use std::collections::HashMap;

use crate::keywords;

/// Which half of the catalog a category belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Apps,
    Games,
}

/// One registered category with its precomputed keyword variants.
#[derive(Debug, Clone)]
pub struct CategoryEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub domain: Domain,
    pub base_phrase: &'static str,
    pub variants: Vec<String>,
}

// (key, canonical store label, base search phrase)
const APP_CATEGORIES: &[(&str, &str, &str)] = &[
    ("art_design", "ART_AND_DESIGN", "art and design drawing apps"),
    ("auto", "AUTO_AND_VEHICLES", "car maintenance and auto care apps"),
    ("beauty", "BEAUTY", "beauty tutorials and makeup apps"),
    ("books", "BOOKS_AND_REFERENCE", "ebook reader and book apps"),
    ("business", "BUSINESS", "small business productivity apps"),
    ("comics", "COMICS", "digital comics reader apps"),
    ("communication", "COMMUNICATION", "messaging and calling apps"),
    ("education", "EDUCATION", "education learning apps"),
    ("entertainment", "ENTERTAINMENT", "entertainment streaming apps"),
    ("events", "EVENTS", "event tickets and planner apps"),
    ("finance", "FINANCE", "personal finance budgeting apps"),
    ("food", "FOOD_AND_DRINK", "food delivery and recipe apps"),
    ("health", "HEALTH_AND_FITNESS", "health and fitness workout apps"),
    ("house", "HOUSE_AND_HOME", "home design and real estate apps"),
    ("libraries", "LIBRARIES_AND_DEMO", "demo and libraries developer apps"),
    ("lifestyle", "LIFESTYLE", "lifestyle inspiration apps"),
    ("maps", "MAPS_AND_NAVIGATION", "maps and navigation gps apps"),
    ("medical", "MEDICAL", "medical reference apps"),
    ("music", "MUSIC_AND_AUDIO", "music streaming apps"),
    ("news", "NEWS_AND_MAGAZINES", "news and magazines apps"),
    ("parenting", "PARENTING", "parenting baby tracker apps"),
    ("personalization", "PERSONALIZATION", "android launcher personalization apps"),
    ("photography", "PHOTOGRAPHY", "photo editor camera apps"),
    ("productivity", "PRODUCTIVITY", "productivity task manager apps"),
    ("shopping", "SHOPPING", "shopping deals apps"),
    ("social", "SOCIAL", "social media community apps"),
    ("sports", "SPORTS", "sports scores apps"),
    ("tools", "TOOLS", "android utility tools apps"),
    ("travel", "TRAVEL_AND_LOCAL", "travel planning and booking apps"),
    ("video", "VIDEO_PLAYERS", "video streaming and player apps"),
    ("weather", "WEATHER", "weather forecast apps"),
    ("work", "WORK_PROFILE", "work profile enterprise apps"),
];

const GAME_CATEGORIES: &[(&str, &str, &str)] = &[
    ("action", "GAME_ACTION", "action games android"),
    ("adventure", "GAME_ADVENTURE", "adventure games android"),
    ("arcade", "GAME_ARCADE", "arcade games android"),
    ("board", "GAME_BOARD", "board games android"),
    ("card", "GAME_CARD", "card games android"),
    ("casual", "GAME_CASUAL", "casual games android"),
    ("educational_game", "GAME_EDUCATIONAL", "educational games for kids"),
    ("music_game", "GAME_MUSIC", "music rhythm games android"),
    ("puzzle", "GAME_PUZZLE", "puzzle games android"),
    ("racing", "GAME_RACING", "racing games android"),
    ("role_playing", "GAME_ROLE_PLAYING", "role playing rpg games android"),
    ("simulation", "GAME_SIMULATION", "simulation games android"),
    ("sports_game", "GAME_SPORTS", "sports games android"),
    ("strategy", "GAME_STRATEGY", "strategy games android"),
    ("trivia", "GAME_TRIVIA", "trivia quiz games android"),
];

/// Read-only lookup over the bundled category tables.
///
/// Entries keep their definition order; that order drives the suggestion
/// fallback, so it is part of the contract.
pub struct CategoryRegistry {
    entries: Vec<CategoryEntry>,
    index: HashMap<&'static str, usize>,
}

impl CategoryRegistry {
    /// Build the registry from the bundled tables, expanding keyword
    /// variants for every category up front.
    pub fn bundled() -> Self {
        let mut entries = Vec::with_capacity(APP_CATEGORIES.len() + GAME_CATEGORIES.len());
        let mut index = HashMap::new();

        for (domain, table) in [(Domain::Apps, APP_CATEGORIES), (Domain::Games, GAME_CATEGORIES)] {
            for &(key, label, base_phrase) in table {
                index.insert(key, entries.len());
                entries.push(CategoryEntry {
                    key,
                    label,
                    domain,
                    base_phrase,
                    variants: keywords::expand(key, base_phrase),
                });
            }
        }

        CategoryRegistry { entries, index }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&CategoryEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    /// Canonical store label for a category key.
    pub fn resolve(&self, key: &str) -> Option<&'static str> {
        self.get(key).map(|entry| entry.label)
    }

    /// Precomputed keyword variants for a category key.
    pub fn keyword_variants(&self, key: &str) -> Option<&[String]> {
        self.get(key).map(|entry| entry.variants.as_slice())
    }

    /// Category keys in definition order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.key)
    }

    /// The first `n` keys in definition order, used as the suggestion
    /// fallback when nothing resembles the requested category.
    pub fn first_keys(&self, n: usize) -> Vec<&'static str> {
        self.keys().take(n).collect()
    }

    /// App-domain keys, sorted for display.
    pub fn app_categories(&self) -> Vec<&'static str> {
        self.domain_keys(Domain::Apps)
    }

    /// Game-domain keys, sorted for display.
    pub fn game_categories(&self) -> Vec<&'static str> {
        self.domain_keys(Domain::Games)
    }

    fn domain_keys(&self, domain: Domain) -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = self
            .entries
            .iter()
            .filter(|entry| entry.domain == domain)
            .map(|entry| entry.key)
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Keys resembling an unknown category: either they contain the first
    /// three characters of the request or they start with its first two.
    /// Capped at five, in definition order.
    pub fn suggestions_for(&self, normalized_key: &str) -> Vec<&'static str> {
        let head3: String = normalized_key.chars().take(3).collect();
        let head2: String = normalized_key.chars().take(2).collect();

        self.keys()
            .filter(|key| key.contains(&head3) || key.starts_with(&head2))
            .take(5)
            .collect()
    }
}

/// Fold a raw path segment onto the registry's key space: lowercase,
/// spaces to underscores. No other cleanup happens here.
pub fn normalize_category_key(raw: &str) -> String {
    raw.to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_covers_both_domains() {
        let registry = CategoryRegistry::bundled();
        assert_eq!(registry.len(), 47);
        assert_eq!(registry.app_categories().len(), 32);
        assert_eq!(registry.game_categories().len(), 15);
    }

    #[test]
    fn test_resolve_returns_store_labels() {
        let registry = CategoryRegistry::bundled();
        assert_eq!(registry.resolve("art_design"), Some("ART_AND_DESIGN"));
        assert_eq!(registry.resolve("puzzle"), Some("GAME_PUZZLE"));
        assert_eq!(registry.resolve("nonexistent"), None);
    }

    #[test]
    fn test_every_category_has_variants_led_by_base_phrase() {
        let registry = CategoryRegistry::bundled();
        for key in registry.keys() {
            let entry = registry.get(key).unwrap();
            assert!(!entry.variants.is_empty(), "no variants for {key}");
            assert_eq!(entry.variants[0], entry.base_phrase, "base phrase not first for {key}");
        }
    }

    #[test]
    fn test_keys_keep_definition_order() {
        let registry = CategoryRegistry::bundled();
        let keys: Vec<_> = registry.keys().collect();
        assert_eq!(keys[0], "art_design");
        assert_eq!(keys[32], "action");
        assert_eq!(registry.first_keys(3), vec!["art_design", "auto", "beauty"]);
    }

    #[test]
    fn test_domain_listings_are_sorted() {
        let registry = CategoryRegistry::bundled();
        let apps = registry.app_categories();
        let mut sorted = apps.clone();
        sorted.sort_unstable();
        assert_eq!(apps, sorted);
        assert!(apps.contains(&"weather"));
        assert!(!apps.contains(&"puzzle"));
    }

    #[test]
    fn test_suggestions_match_on_head_of_key() {
        let registry = CategoryRegistry::bundled();
        let suggestions = registry.suggestions_for("actio");
        assert!(suggestions.contains(&"action"));
        assert!(suggestions.len() <= 5);
    }

    #[test]
    fn test_suggestions_empty_for_unrelated_input() {
        let registry = CategoryRegistry::bundled();
        assert!(registry.suggestions_for("zzzzzz").is_empty());
    }

    #[test]
    fn test_normalize_category_key() {
        assert_eq!(normalize_category_key("Art Design"), "art_design");
        assert_eq!(normalize_category_key("PUZZLE"), "puzzle");
        assert_eq!(normalize_category_key("role playing"), "role_playing");
    }
}
