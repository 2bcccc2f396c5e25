use crate::models::MenuItem;
use std::fmt;

/// Dietary restriction a user can declare on their profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DietaryRestriction {
    Vegetarian,
    Vegan,
    GlutenFree,
    Keto,
    DairyFree,
    NutFree,
    Halal,
    Kosher,
}

/// One row of the restriction table: profile label, reason tag, item predicate
#[derive(Debug, Clone, Copy)]
pub struct RestrictionRule {
    pub restriction: DietaryRestriction,
    pub label: &'static str,
    pub tag: &'static str,
    pub satisfied_by: fn(&MenuItem) -> bool,
}

/// Every restriction the scorer understands. Labels are lower-case.
pub const RESTRICTION_RULES: [RestrictionRule; 8] = [
    RestrictionRule {
        restriction: DietaryRestriction::Vegetarian,
        label: "vegetarian",
        tag: "Vegetarian",
        satisfied_by: |item| item.is_vegetarian,
    },
    RestrictionRule {
        restriction: DietaryRestriction::Vegan,
        label: "vegan",
        tag: "Vegan",
        satisfied_by: |item| item.is_vegan,
    },
    RestrictionRule {
        restriction: DietaryRestriction::GlutenFree,
        label: "gluten-free",
        tag: "Gluten-Free",
        satisfied_by: |item| item.is_gluten_free,
    },
    RestrictionRule {
        restriction: DietaryRestriction::Keto,
        label: "keto",
        tag: "Keto",
        satisfied_by: |item| item.is_keto,
    },
    RestrictionRule {
        restriction: DietaryRestriction::DairyFree,
        label: "dairy-free",
        tag: "Dairy-Free",
        satisfied_by: |item| item.is_dairy_free,
    },
    RestrictionRule {
        restriction: DietaryRestriction::NutFree,
        label: "nut-free",
        tag: "Nut-Free",
        satisfied_by: |item| item.is_nut_free,
    },
    RestrictionRule {
        restriction: DietaryRestriction::Halal,
        label: "halal",
        tag: "Halal",
        satisfied_by: |item| item.is_halal,
    },
    RestrictionRule {
        restriction: DietaryRestriction::Kosher,
        label: "kosher",
        tag: "Kosher",
        satisfied_by: |item| item.is_kosher,
    },
];

impl DietaryRestriction {
    /// Look up a free-form profile label, ignoring case.
    ///
    /// Returns `None` for labels outside the known set (e.g. "Paleo").
    pub fn parse(label: &str) -> Option<Self> {
        lookup_rule(label).map(|rule| rule.restriction)
    }

    pub fn rule(self) -> &'static RestrictionRule {
        // The table holds one row per variant, in declaration order
        &RESTRICTION_RULES[self as usize]
    }

    /// Canonical reason tag, e.g. "Gluten-Free"
    pub fn tag(self) -> &'static str {
        self.rule().tag
    }

    #[inline]
    pub fn is_satisfied_by(self, item: &MenuItem) -> bool {
        (self.rule().satisfied_by)(item)
    }
}

impl fmt::Display for DietaryRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Find the table row for a profile label, ignoring case
pub fn lookup_rule(label: &str) -> Option<&'static RestrictionRule> {
    RESTRICTION_RULES
        .iter()
        .find(|rule| rule.label.eq_ignore_ascii_case(label))
}
