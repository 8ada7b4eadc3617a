//! Keyword-variant expansion for category searches.
//!
//! Each category is searched under several synthetic phrasings to widen
//! coverage beyond its base phrase. The variant list is fixed per category
//! and computed once when the registry is built.

/// Build the search-phrase variants for one category.
///
/// The list leads with the category's base phrase, followed by five
/// templated phrasings of the human-readable key (underscores become
/// spaces). Empty candidates are dropped and exact duplicates collapse
/// onto their first occurrence, so the result keeps a stable order.
pub fn expand(category_key: &str, base_phrase: &str) -> Vec<String> {
    let readable = category_key.replace('_', " ");

    let candidates = [
        base_phrase.to_string(),
        format!("{readable} apps"),
        format!("best {readable} apps"),
        format!("popular {readable} apps"),
        format!("top {readable} android apps"),
        format!("{readable} app download"),
    ];

    let mut variants: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if candidate.is_empty() {
            continue;
        }
        if !variants.contains(&candidate) {
            variants.push(candidate);
        }
    }
    variants
}
