//! Reference data offered as suggestions on the ethnicity step.
//!
//! The list only drives autocomplete; any non-blank answer is accepted.

/// Ethnicities and communities, in display order.
pub const ETHNICITIES: &[&str] = &[
    "Afghan",
    "Arab",
    "Arain",
    "Awan",
    "Azerbaijani",
    "Baloch",
    "Bangladeshi",
    "Bengali",
    "Berber",
    "Bohra",
    "Bosniak",
    "Brahui",
    "Burmese",
    "Butt",
    "Chechen",
    "Chinese",
    "Circassian",
    "Dawoodi Bohra",
    "Egyptian",
    "Emirati",
    "Eritrean",
    "Ethiopian",
    "Filipino",
    "Gujarati",
    "Gujjar",
    "Hazara",
    "Hyderabadi",
    "Indian",
    "Indonesian",
    "Iranian",
    "Iraqi",
    "Jat",
    "Jordanian",
    "Kashmiri",
    "Kazakh",
    "Khoja",
    "Kurdish",
    "Kuwaiti",
    "Kyrgyz",
    "Lebanese",
    "Libyan",
    "Malay",
    "Maldivian",
    "Memon",
    "Mirpuri",
    "Moroccan",
    "Mughal",
    "Muhajir",
    "Nigerian",
    "Omani",
    "Pakistani",
    "Palestinian",
    "Pashtun",
    "Persian",
    "Punjabi",
    "Qatari",
    "Rajput",
    "Rohingya",
    "Saraiki",
    "Saudi",
    "Sayyid",
    "Sheikh",
    "Sindhi",
    "Somali",
    "Sri Lankan",
    "Sudanese",
    "Swahili",
    "Syrian",
    "Tajik",
    "Tatar",
    "Tunisian",
    "Turkish",
    "Turkmen",
    "Uyghur",
    "Uzbek",
    "Yemeni",
    "Yoruba",
    "Mixed",
    "Other",
];

/// Suggestions for a partially typed ethnicity.
///
/// Case-insensitive. Prefix matches come first, then other substring
/// matches, each group in list order. A blank query suggests nothing.
pub fn suggest_ethnicities(query: &str, limit: usize) -> Vec<&'static str> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() || limit == 0 {
        return Vec::new();
    }

    let (prefix, substring): (Vec<_>, Vec<_>) = ETHNICITIES
        .iter()
        .map(|e| (*e, e.to_lowercase()))
        .filter(|(_, lower)| lower.contains(&needle))
        .partition(|(_, lower)| lower.starts_with(&needle));

    prefix
        .into_iter()
        .chain(substring)
        .map(|(e, _)| e)
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_has_no_duplicates() {
        let mut seen = std::collections::HashSet::new();
        for e in ETHNICITIES {
            assert!(seen.insert(e.to_lowercase()), "duplicate: {e}");
        }
        assert!(ETHNICITIES.len() >= 75);
    }

    #[test]
    fn prefix_matches_come_first() {
        // "Bohra" contains "bo" at the start; "Dawoodi Bohra" only inside.
        let got = suggest_ethnicities("bo", 10);
        assert_eq!(got, vec!["Bohra", "Bosniak", "Dawoodi Bohra"]);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(suggest_ethnicities("PUNJ", 5), vec!["Punjabi"]);
    }

    #[test]
    fn respects_limit() {
        assert_eq!(suggest_ethnicities("a", 3).len(), 3);
        assert!(suggest_ethnicities("a", 0).is_empty());
    }

    #[test]
    fn blank_query_suggests_nothing() {
        assert!(suggest_ethnicities("   ", 10).is_empty());
    }

    #[test]
    fn unknown_query_is_empty() {
        assert!(suggest_ethnicities("zzz", 10).is_empty());
    }
}
