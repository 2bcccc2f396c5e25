use crate::models::{MenuItem, ScoringRules};
use crate::core::restrictions::{lookup_rule, DietaryRestriction};

/// Result of checking a menu item against a profile's dietary restrictions
#[derive(Debug, Clone, PartialEq)]
pub enum RestrictionOutcome {
    /// Every recognised restriction is met
    Satisfied {
        points: i32,
        tags: Vec<&'static str>,
    },
    /// The item fails this restriction and must be dropped
    Violated(DietaryRestriction),
}

/// Check an item against the profile's restriction labels
///
/// Restrictions are hard filters: the first unmet one excludes the item.
/// Each met restriction earns `rules.restriction_points` and its tag, in
/// profile order (a label listed twice counts twice). Unknown labels are skipped.
pub fn evaluate_restrictions(
    restrictions: &[String],
    item: &MenuItem,
    rules: &ScoringRules,
) -> RestrictionOutcome {
    let mut points = 0;
    let mut tags = Vec::new();

    for rule in restrictions.iter().filter_map(|label| lookup_rule(label)) {
        if !(rule.satisfied_by)(item) {
            return RestrictionOutcome::Violated(rule.restriction);
        }
        points += rules.restriction_points;
        tags.push(rule.tag);
    }

    RestrictionOutcome::Satisfied { points, tags }
}

/// True when the item meets every recognised restriction label
#[inline]
pub fn passes_restrictions(restrictions: &[String], item: &MenuItem) -> bool {
    restrictions
        .iter()
        .filter_map(|label| DietaryRestriction::parse(label))
        .all(|restriction| restriction.is_satisfied_by(item))
}

/// Inclusion threshold check applied after clamping
#[inline]
pub fn meets_threshold(match_score: i32, rules: &ScoringRules) -> bool {
    match_score >= rules.min_match_score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_item(is_vegan: bool, is_gluten_free: bool) -> MenuItem {
        MenuItem {
            id: "item-1".to_string(),
            restaurant_id: "rest-1".to_string(),
            name: "Bowl".to_string(),
            description: "Test bowl".to_string(),
            price: 10.0,
            calories: 500,
            protein: 30.0,
            carbs: 50.0,
            fat: 15.0,
            is_vegan,
            is_vegetarian: is_vegan,
            is_gluten_free,
            is_keto: false,
            is_dairy_free: false,
            is_nut_free: false,
            is_halal: false,
            is_kosher: false,
            image_url: None,
        }
    }

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_all_restrictions_met() {
        let item = create_test_item(true, true);
        let outcome = evaluate_restrictions(&labels(&["Vegan", "gluten-free"]), &item, &ScoringRules::default());

        assert_eq!(
            outcome,
            RestrictionOutcome::Satisfied { points: 10, tags: vec!["Vegan", "Gluten-Free"] }
        );
    }

    #[test]
    fn test_single_failure_excludes() {
        let item = create_test_item(true, false);
        let outcome = evaluate_restrictions(&labels(&["vegan", "Gluten-Free"]), &item, &ScoringRules::default());

        assert_eq!(outcome, RestrictionOutcome::Violated(DietaryRestriction::GlutenFree));
        assert!(!passes_restrictions(&labels(&["vegan", "Gluten-Free"]), &item));
    }

    #[test]
    fn test_unknown_label_is_neutral() {
        let item = create_test_item(false, false);
        let outcome = evaluate_restrictions(&labels(&["Paleo"]), &item, &ScoringRules::default());

        assert_eq!(outcome, RestrictionOutcome::Satisfied { points: 0, tags: vec![] });
        assert!(passes_restrictions(&labels(&["Paleo"]), &item));
    }

    #[test]
    fn test_duplicate_label_counts_twice() {
        let item = create_test_item(true, false);
        let outcome = evaluate_restrictions(&labels(&["Vegan", "VEGAN"]), &item, &ScoringRules::default());

        assert_eq!(
            outcome,
            RestrictionOutcome::Satisfied { points: 10, tags: vec!["Vegan", "Vegan"] }
        );
    }

    #[test]
    fn test_threshold() {
        let rules = ScoringRules::default();
        assert!(meets_threshold(30, &rules));
        assert!(!meets_threshold(29, &rules));
    }
}
