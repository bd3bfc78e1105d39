use unicode_normalization::UnicodeNormalization;

/// Normalize user input before it is matched or sent to the service
pub fn normalize_input(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    // Composed forms, so "å" typed as a + ring matches the service's spelling
    text.nfc().collect()
}

/// Normalize a word for a suggestion lookup, also dropping wrapping quotes
pub fn normalize_word(text: &str) -> String {
    normalize_input(text.trim().trim_matches(['"', '\'']))
}
