//! Slug derivation for named entities (categories, federal states, ...).

/// Generate a URL-safe slug from a display name.
///
/// German umlauts and `ß` are transliterated (`Baden-Württemberg` becomes
/// `baden-wuerttemberg`), every other non-alphanumeric character turns into
/// a hyphen, runs of hyphens collapse, and leading/trailing hyphens are
/// trimmed.
pub fn generate_slug(name: &str) -> String {
    let mut transliterated = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        match c {
            'ä' => transliterated.push_str("ae"),
            'ö' => transliterated.push_str("oe"),
            'ü' => transliterated.push_str("ue"),
            'ß' => transliterated.push_str("ss"),
            c if c.is_ascii_alphanumeric() => transliterated.push(c),
            _ => transliterated.push('-'),
        }
    }

    let mut result = String::with_capacity(transliterated.len());
    let mut prev_hyphen = false;
    for c in transliterated.chars() {
        if c == '-' {
            if !prev_hyphen {
                result.push('-');
            }
            prev_hyphen = true;
        } else {
            result.push(c);
            prev_hyphen = false;
        }
    }

    result.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_name() {
        assert_eq!(generate_slug("Musterland"), "musterland");
    }

    #[test]
    fn umlauts_are_transliterated() {
        assert_eq!(generate_slug("Baden-Württemberg"), "baden-wuerttemberg");
        assert_eq!(generate_slug("Straße & Öffentlicher Raum"), "strasse-oeffentlicher-raum");
    }

    #[test]
    fn separators_collapse_and_trim() {
        assert_eq!(generate_slug("  Umwelt -- Klima!  "), "umwelt-klima");
    }

    #[test]
    fn blank_name_yields_empty_slug() {
        assert_eq!(generate_slug("   "), "");
    }
}
