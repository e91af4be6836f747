//! The shipped subject table.

use super::{Catalog, Exercise, ExerciseCategory, Subject, generate_lettered_range, generate_range};
use crate::model::{CategoryId, ExerciseId, SubjectId};

fn category(id: &str, name: &str, description: &str, exercises: Vec<Exercise>) -> ExerciseCategory {
    ExerciseCategory {
        id: CategoryId::new(id),
        name: name.to_owned(),
        description: description.to_owned(),
        exercises,
    }
}

fn subject(id: &str, name: &str, icon: &str, color: &str, categories: Vec<ExerciseCategory>) -> Subject {
    Subject {
        id: SubjectId::new(id),
        name: name.to_owned(),
        icon: icon.to_owned(),
        color: color.to_owned(),
        categories,
    }
}

// The soustraction/multiplication series reuse the S/M number labels, so
// their ids carry an extra prefix to stay distinct from the other series.
fn with_id_prefix(exercises: Vec<Exercise>, prefix: &str) -> Vec<Exercise> {
    exercises
        .into_iter()
        .map(|e| Exercise {
            id: ExerciseId::new(format!("{prefix}{}", e.id)),
            label: e.label,
        })
        .collect()
}

pub(super) fn build() -> Catalog {
    Catalog::new(vec![
        subject(
            "francais",
            "Français",
            "📚",
            "pastel-pink",
            vec![
                category(
                    "transpositions",
                    "Transpositions",
                    "Exercices de transposition",
                    generate_range("TRANSPO-", 1, 168, Some("T")),
                ),
                category(
                    "jeux-lecture-s",
                    "Jeux de lecture S",
                    "Série S",
                    generate_range("S", 1, 35, None),
                ),
                category(
                    "jeux-lecture-l",
                    "Jeux de lecture L",
                    "Série L",
                    generate_range("L", 1, 20, None),
                ),
                category(
                    "jeux-lecture-p",
                    "Jeux de lecture P",
                    "Série P",
                    generate_range("P", 1, 20, None),
                ),
                category(
                    "lecture-verifix",
                    "Lecture VERIFIX",
                    "Exercices VERIFIX",
                    generate_range("VERIFIX-", 1, 60, Some("V")),
                ),
            ],
        ),
        subject(
            "informatique",
            "Informatique",
            "💻",
            "pastel-blue",
            vec![
                category(
                    "recherche-internet",
                    "Recherche Internet",
                    "Trouver des informations en ligne",
                    generate_range("INTERNET-", 1, 72, Some("I")),
                ),
                category(
                    "defis-word",
                    "Défis Copie WORD",
                    "Traitement de texte et mise en forme",
                    generate_range("WORD-", 1, 120, Some("W")),
                ),
                category(
                    "defis-diaporama",
                    "Défis Diaporama",
                    "Présentations et diapos",
                    generate_range("DIAPO-", 1, 120, Some("Di")),
                ),
            ],
        ),
        subject(
            "geometrie",
            "Géométrie",
            "📐",
            "pastel-purple",
            vec![
                category(
                    "reproduction-couleurs",
                    "Reproduction Couleurs",
                    "Reproduction avec couleurs",
                    generate_range("RCOU-", 1, 80, Some("RC")),
                ),
                category(
                    "reproduction-regle",
                    "Reproduction Règle",
                    "Reproduction avec la règle",
                    generate_range("RREG-", 1, 101, Some("RR")),
                ),
            ],
        ),
        subject(
            "operations",
            "Opérations",
            "➕",
            "pastel-yellow",
            vec![
                category(
                    "additions",
                    "Additions",
                    "100 additions",
                    generate_range("A", 1, 100, None),
                ),
                category(
                    "soustractions",
                    "Soustractions",
                    "100 soustractions",
                    with_id_prefix(generate_range("S", 1, 100, None), "OP-"),
                ),
                category(
                    "multiplications",
                    "Multiplications",
                    "100 multiplications",
                    with_id_prefix(generate_range("M", 1, 100, None), "OP-"),
                ),
                category(
                    "divisions",
                    "Divisions",
                    "100 divisions",
                    generate_range("D", 1, 100, None),
                ),
            ],
        ),
        subject(
            "problemes",
            "Problèmes",
            "🧩",
            "pastel-green",
            vec![category(
                "problemes-main",
                "Problèmes",
                "120 problèmes à résoudre",
                generate_range("PROB-", 1, 120, Some("Pb")),
            )],
        ),
        subject(
            "grandeurs-mesures",
            "Grandeurs et Mesures",
            "📏",
            "pastel-orange",
            vec![
                category(
                    "masses",
                    "Masses",
                    "60 numéros × 4 exercices",
                    generate_lettered_range("M", 1, 60, &["a", "b", "c", "d"], None),
                ),
                category(
                    "longueurs",
                    "Longueurs",
                    "60 numéros × 6 exercices",
                    generate_lettered_range("L", 1, 60, &["a", "b", "c", "d", "e", "f"], None),
                ),
                category(
                    "capacites",
                    "Capacités",
                    "60 numéros × 2 exercices",
                    generate_lettered_range("C", 1, 60, &["a", "b"], None),
                ),
            ],
        ),
        subject(
            "heure-duree",
            "Heure et Durée",
            "🕐",
            "pastel-cyan",
            vec![category(
                "heure-main",
                "Heure et Durée",
                "60 numéros × 2 exercices",
                generate_lettered_range("H", 1, 60, &["a", "b"], None),
            )],
        ),
        subject(
            "monnaie",
            "Monnaie",
            "💰",
            "pastel-rose",
            vec![
                category(
                    "je-rends-monnaie",
                    "Je rends la monnaie",
                    "124 exercices",
                    generate_range("J", 1, 124, None),
                ),
                category(
                    "soldes-1-etoile",
                    "Soldes ⭐",
                    "Niveau 1 étoile bleue - 92 exercices",
                    generate_range("⭐", 1, 92, None),
                ),
                category(
                    "soldes-2-etoiles",
                    "Soldes ⭐⭐",
                    "Niveau 2 étoiles orange - 92 exercices",
                    generate_range("⭐⭐", 1, 92, None),
                ),
                category(
                    "promo",
                    "Promo",
                    "224 exercices",
                    generate_range("%", 1, 224, None),
                ),
            ],
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_is_deterministic() {
        assert_eq!(Catalog::standard(), Catalog::standard());
    }

    #[test]
    fn standard_catalog_has_eight_subjects() {
        let catalog = Catalog::standard();
        let ids: Vec<&str> = catalog.subjects().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "francais",
                "informatique",
                "geometrie",
                "operations",
                "problemes",
                "grandeurs-mesures",
                "heure-duree",
                "monnaie"
            ]
        );
    }

    #[test]
    fn subject_totals_match_the_series_sizes() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.total_exercises("francais"), 168 + 35 + 20 + 20 + 60);
        assert_eq!(catalog.total_exercises("informatique"), 72 + 120 + 120);
        assert_eq!(catalog.total_exercises("geometrie"), 80 + 101);
        assert_eq!(catalog.total_exercises("operations"), 400);
        assert_eq!(catalog.total_exercises("problemes"), 120);
        assert_eq!(catalog.total_exercises("grandeurs-mesures"), 60 * 12);
        assert_eq!(catalog.total_exercises("heure-duree"), 120);
        assert_eq!(catalog.total_exercises("monnaie"), 124 + 92 + 92 + 224);
    }

    #[test]
    fn operation_series_ids_stay_distinct() {
        let catalog = Catalog::standard();
        let ids = catalog.exercise_ids("operations");
        assert!(ids.iter().any(|id| id.as_str() == "A1"));
        assert!(ids.iter().any(|id| id.as_str() == "OP-S1"));
        assert!(ids.iter().any(|id| id.as_str() == "OP-M100"));
        assert!(ids.iter().any(|id| id.as_str() == "D100"));
        let unique: std::collections::BTreeSet<&str> =
            ids.iter().map(|id| id.as_str()).collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn exercise_ids_flatten_in_category_order() {
        let catalog = Catalog::standard();
        let ids = catalog.exercise_ids("francais");
        assert_eq!(ids.len(), 303);
        assert_eq!(ids[0].as_str(), "TRANSPO-1");
        assert_eq!(ids[167].as_str(), "TRANSPO-168");
        assert_eq!(ids[168].as_str(), "S1");
        assert_eq!(ids[302].as_str(), "VERIFIX-60");
    }

    #[test]
    fn lettered_series_counts() {
        let catalog = Catalog::standard();
        let subject = catalog.subject("grandeurs-mesures").unwrap();
        assert_eq!(subject.categories[0].exercises.len(), 240);
        assert_eq!(subject.categories[1].exercises.len(), 360);
        assert_eq!(subject.categories[2].exercises.len(), 120);
        assert_eq!(subject.categories[0].exercises[0].id.as_str(), "M1a");
    }
}
