//! Town name normalization.
//!
//! The same transformation builds the reference table keys and the query keys, and
//! also produces the path segment of the pollen page URL. Whitespace runs become a
//! single hyphen, so `"Le  Portel "` and `"Le-Portel"` resolve to the same town.

/// Trims the input and replaces every run of internal whitespace with one hyphen.
///
/// Case is preserved so canonical names keep their display form.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Key used to compare two town names: normalized, then case-folded.
pub fn comparison_key(raw: &str) -> String {
    normalize(raw).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_hyphenates() {
        assert_eq!(normalize("  Le Touquet  "), "Le-Touquet");
        assert_eq!(normalize("Saint\tAmand  les   Eaux"), "Saint-Amand-les-Eaux");
    }

    #[test]
    fn keeps_existing_hyphens_and_case() {
        assert_eq!(normalize("Villeneuve-d'Ascq"), "Villeneuve-d'Ascq");
        assert_eq!(normalize("LILLE"), "LILLE");
    }

    #[test]
    fn empty_and_blank_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn is_idempotent() {
        for raw in ["Lille", " Le  Portel ", "Boulogne sur Mer", "Hénin-Beaumont", ""] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn comparison_key_folds_case() {
        assert_eq!(comparison_key("Le Portel"), comparison_key("le-PORTEL"));
        assert_eq!(comparison_key("ÉTAPLES"), "étaples");
    }
}
