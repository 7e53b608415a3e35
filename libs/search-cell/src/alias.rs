use std::collections::HashMap;
use std::sync::LazyLock;

/// Lookup table from free-text search input to canonical specialization
/// terms. Keys are stored normalized (trimmed, lower-cased); values keep the
/// exact casing the backend search endpoint expects. The declared order of a
/// value list is the fan-out order, which in turn fixes merge priority.
pub struct AliasTable {
    entries: HashMap<String, Vec<String>>,
}

static STANDARD: LazyLock<AliasTable> = LazyLock::new(AliasTable::build_standard);

impl AliasTable {
    /// The process-wide table. Built on first use, immutable afterwards.
    pub fn standard() -> &'static AliasTable {
        &STANDARD
    }

    fn build_standard() -> AliasTable {
        // Specialization synonyms first, then symptom/condition names.
        // A condition may map to several specializations.
        let raw: &[(&str, &[&str])] = &[
            ("ent", &["Otolaryngology (ENT)", "Otolaryngology"]),
            ("ear", &["Otolaryngology (ENT)", "Otolaryngology"]),
            ("throat", &["Otolaryngology (ENT)", "Otolaryngology"]),
            ("skin", &["Dermatology"]),
            ("hair", &["Dermatology"]),
            ("heart", &["Cardiology"]),
            ("eye", &["Ophthalmology"]),
            ("eyes", &["Ophthalmology"]),
            ("teeth", &["Dentistry"]),
            ("tooth", &["Dentistry"]),
            ("dental", &["Dentistry"]),
            ("bones", &["Orthopedics"]),
            ("kids", &["Pediatrics"]),
            ("children", &["Pediatrics"]),
            ("women", &["Gynecology", "Obstetrics"]),
            ("pregnancy", &["Gynecology", "Obstetrics"]),
            ("stomach", &["Gastroenterology"]),
            ("kidney", &["Nephrology", "Urology"]),
            ("mental health", &["Psychiatry"]),
            // Conditions and symptoms
            ("acne", &["Dermatology"]),
            ("eczema", &["Dermatology"]),
            ("migraine", &["Neurology"]),
            ("headache", &["Neurology", "General Physician"]),
            ("chest pain", &["Cardiology", "Pulmonology"]),
            ("blood pressure", &["Cardiology", "General Physician"]),
            ("diabetes", &["Endocrinology", "General Physician"]),
            ("sugar", &["Endocrinology", "General Physician"]),
            ("fracture", &["Orthopedics"]),
            ("joint pain", &["Orthopedics", "Rheumatology"]),
            ("back pain", &["Orthopedics", "Neurology"]),
            ("asthma", &["Pulmonology"]),
            ("ulcer", &["Gastroenterology"]),
            ("depression", &["Psychiatry"]),
            ("anxiety", &["Psychiatry"]),
            ("fever", &["General Physician"]),
            ("flu", &["General Physician"]),
            ("cancer", &["Oncology"]),
        ];

        let entries = raw
            .iter()
            .map(|(key, terms)| {
                (
                    key.to_string(),
                    terms.iter().map(|t| t.to_string()).collect(),
                )
            })
            .collect();

        AliasTable { entries }
    }

    /// Resolve a raw query into the ordered list of terms to fan out.
    ///
    /// The lookup is case-insensitive and ignores surrounding whitespace. An
    /// unrecognized query falls back to a single-element list holding the
    /// input verbatim, so the backend still sees the user's own casing and
    /// punctuation. Always returns at least one term.
    pub fn resolve(&self, query: &str) -> Vec<String> {
        let normalized = query.trim().to_lowercase();
        match self.entries.get(&normalized) {
            Some(terms) if !terms.is_empty() => terms.clone(),
            _ => vec![query.to_string()],
        }
    }

    /// Distinct canonical terms, sorted. Serves the typeahead endpoint.
    pub fn canonical_terms(&self) -> Vec<String> {
        let mut terms: Vec<String> = self
            .entries
            .values()
            .flatten()
            .cloned()
            .collect();
        terms.sort();
        terms.dedup();
        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ent_resolves_to_both_otolaryngology_terms() {
        let terms = AliasTable::standard().resolve("ent");
        assert_eq!(terms, vec!["Otolaryngology (ENT)", "Otolaryngology"]);
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        let table = AliasTable::standard();
        assert_eq!(table.resolve("  ENT "), table.resolve("ent"));
        assert_eq!(table.resolve("Migraine"), vec!["Neurology"]);
        assert_eq!(table.resolve(" CHEST PAIN"), vec!["Cardiology", "Pulmonology"]);
    }

    #[test]
    fn unrecognized_query_falls_back_verbatim() {
        let table = AliasTable::standard();
        assert_eq!(
            table.resolve("unknown-disease-xyz"),
            vec!["unknown-disease-xyz"]
        );
        // Case and punctuation of the original input survive the fallback.
        assert_eq!(table.resolve("Dr. Khan"), vec!["Dr. Khan"]);
        assert_eq!(table.resolve(""), vec![""]);
    }

    #[test]
    fn conditions_can_map_to_multiple_specializations() {
        let table = AliasTable::standard();
        assert_eq!(table.resolve("diabetes").len(), 2);
        assert_eq!(table.resolve("kidney"), vec!["Nephrology", "Urology"]);
    }

    #[test]
    fn resolution_never_returns_empty() {
        let table = AliasTable::standard();
        for query in ["", "   ", "ent", "zzz", "joint pain"] {
            assert!(!table.resolve(query).is_empty());
        }
    }

    #[test]
    fn canonical_terms_are_sorted_and_distinct() {
        let terms = AliasTable::standard().canonical_terms();
        assert!(!terms.is_empty());
        let mut sorted = terms.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(terms, sorted);
        assert!(terms.iter().any(|t| t == "Dermatology"));
    }
}
