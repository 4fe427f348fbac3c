use std::sync::LazyLock;

use regex::Regex;

// Tashkeel ranges plus the bracket characters shamela uses for editorial
// insertions; both are typographic noise for boundary matching.
static DIACRITICS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\u{0617}-\u{061A}\u{064B}-\u{0652}\[\]]").unwrap());
static LEADING_SEPARATORS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-+").unwrap());

/// Delete Arabic diacritical marks and literal brackets, trimming the result.
pub fn remove_diacritics(text: &str) -> String {
    DIACRITICS_RE.replace_all(text, "").trim().to_string()
}

/// Strip one or more leading hyphens, trimming the result. TOC entries may be
/// prefixed with list markers that never appear in in-page headings.
pub fn strip_leading_separators(text: &str) -> String {
    LEADING_SEPARATORS_RE.replace(text, "").trim().to_string()
}

/// Canonical form of a TOC title for comparison against in-page span text.
/// Span text is diacritic-stripped at extraction time, so both sides of the
/// equality see the same normalization.
pub fn normalize_title(title: &str) -> String {
    remove_diacritics(&strip_leading_separators(title))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tashkeel() {
        assert_eq!(remove_diacritics("مُقَدِّمَةٌ"), "مقدمة");
    }

    #[test]
    fn strips_brackets() {
        assert_eq!(remove_diacritics("باب [الصلاة]"), "باب الصلاة");
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(remove_diacritics("  نص  "), "نص");
    }

    #[test]
    fn idempotent() {
        let samples = ["مُقَدِّمَةٌ", "باب [الصلاة]", "plain text", ""];
        for s in samples {
            let once = remove_diacritics(s);
            assert_eq!(remove_diacritics(&once), once);
        }
    }

    #[test]
    fn leading_hyphens_removed() {
        assert_eq!(strip_leading_separators("- مقدمة"), "مقدمة");
        assert_eq!(strip_leading_separators("---باب"), "باب");
    }

    #[test]
    fn interior_hyphens_kept() {
        assert_eq!(strip_leading_separators("a-b"), "a-b");
    }

    #[test]
    fn normalize_title_combines_both() {
        assert_eq!(normalize_title("- مُقَدِّمَة"), "مقدمة");
    }
}
