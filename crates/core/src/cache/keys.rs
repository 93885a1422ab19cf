/// Returns the cache key for a location query.
///
/// Surrounding whitespace is trimmed and every word is title-cased: the first
/// character upper-case, the rest lower-case. A word is a run of alphanumeric
/// characters, with apostrophes allowed inside it. Queries that differ only in
/// case or surrounding whitespace share a key.
///
/// # Examples
///
/// ```
/// use havo_core::cache::location_key;
///
/// assert_eq!(location_key("new york"), "New York");
/// assert_eq!(location_key("  TASHKENT "), "Tashkent");
/// assert_eq!(location_key("saint-petersburg"), "Saint-Petersburg");
/// ```
pub fn location_key(query: &str) -> String {
    let mut key = String::with_capacity(query.len());
    let mut in_word = false;

    for c in query.trim().chars() {
        if c.is_alphanumeric() || (in_word && c == '\'') {
            if in_word {
                key.extend(c.to_lowercase());
            } else {
                key.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            key.push(c);
            in_word = false;
        }
    }

    key
}
