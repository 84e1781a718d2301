//! Fixed language pool used for degradation chains.
//!
//! The order of [`LANGUAGE_POOL`] is part of the chain selection contract:
//! selection indexes into it by position, so reordering or resizing the pool
//! changes every chain ever produced.

/// A language the degradation chain may route through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Short code sent to the provider (e.g. "es")
    pub code: &'static str,
    /// Human-readable name used in prompts (e.g. "Spanish")
    pub name: &'static str,
}

const fn lang(code: &'static str, name: &'static str) -> Language {
    Language { code, name }
}

/// Pivot language every round-trip starts and ends in
pub const ENGLISH: &str = "en";

pub const LANGUAGE_POOL: [Language; 25] = [
    lang("es", "Spanish"),
    lang("fr", "French"),
    lang("de", "German"),
    lang("it", "Italian"),
    lang("pt", "Portuguese"),
    lang("nl", "Dutch"),
    lang("sv", "Swedish"),
    lang("pl", "Polish"),
    lang("tr", "Turkish"),
    lang("ja", "Japanese"),
    lang("zh", "Chinese"),
    lang("ar", "Arabic"),
    lang("hi", "Hindi"),
    lang("th", "Thai"),
    lang("vi", "Vietnamese"),
    lang("sw", "Swahili"),
    lang("am", "Amharic"),
    lang("zu", "Zulu"),
    lang("id", "Indonesian"),
    lang("uk", "Ukrainian"),
    lang("he", "Hebrew"),
    lang("ko", "Korean"),
    lang("bn", "Bengali"),
    lang("ta", "Tamil"),
    lang("te", "Telugu"),
];

/// Look up a pool entry by code
pub fn find_language(code: &str) -> Option<&'static Language> {
    LANGUAGE_POOL.iter().find(|language| language.code == code)
}

/// Resolve a language code to the name used when prompting the provider
///
/// `en` is always "English"; pool codes map to their display name; anything
/// else falls back to the uppercased code.
///
/// ```ignore
/// assert_eq!(language_name("en"), "English");
/// assert_eq!(language_name("sw"), "Swahili");
/// assert_eq!(language_name("xx"), "XX");
/// ```
pub fn language_name(code: &str) -> String {
    if code == ENGLISH {
        return "English".to_string();
    }
    find_language(code)
        .map(|language| language.name.to_string())
        .unwrap_or_else(|| code.to_uppercase())
}
