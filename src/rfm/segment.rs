//! Rule-table classification of scored customers.
//!
//! The table maps groups of `rfm_code` values to segment labels and is scanned
//! **in full, in declared order**: if a code ever appeared in more than one
//! group, the last matching group would win. The shipped groups are pairwise
//! disjoint, so the policy only matters if the table is edited;
//! `validate_rule_table` fails fast on overlapping groups to keep that hazard
//! visible.
//!
//! Codes not present in any group fall through to `Segment::Other` - that is
//! the documented default path, not an error.

use std::collections::HashMap;

use crate::domain::{ScoredCustomer, Segment, SegmentedCustomer};
use crate::error::AppError;

/// Ordered rule table. Do not reorder without sign-off: classification is
/// last-match-wins over this declaration order.
pub const RULE_TABLE: &[(&[&str], Segment)] = &[
    (&["555", "554", "545", "455"], Segment::Champions),
    (
        &["543", "444", "435", "355", "354", "345", "344", "335"],
        Segment::LoyalCustomers,
    ),
    (
        &[
            "553", "551", "552", "541", "542", "533", "532", "531", "452", "451", "442", "441",
            "431", "453", "433", "432", "423", "353", "352", "351", "342", "341", "333", "323",
        ],
        Segment::PotentialLoyalists,
    ),
    (
        &["512", "511", "422", "421", "412", "411", "311"],
        Segment::NewCustomers,
    ),
    (
        &[
            "525", "524", "523", "522", "521", "515", "514", "513", "425", "424", "413", "414",
            "415", "315", "314", "313",
        ],
        Segment::Promising,
    ),
    (
        &["331", "321", "312", "221", "213"],
        Segment::NeedingAttention,
    ),
    (
        &[
            "255", "254", "245", "244", "235", "234", "225", "224", "153", "152", "145", "143",
            "142", "134", "133", "124", "123", "155",
        ],
        Segment::AtRisk,
    ),
    (
        &["332", "322", "231", "241", "251", "215", "114", "113"],
        Segment::AboutToSleep,
    ),
    (&["135", "131", "125", "115"], Segment::CannotLoseThem),
    (&["111", "112", "211"], Segment::LostCustomers),
];

/// Map an `rfm_code` to its segment, last match winning, `Other` as fallback.
pub fn classify_code(code: &str) -> Segment {
    classify_with_table(code, RULE_TABLE)
}

fn classify_with_table(code: &str, table: &[(&[&str], Segment)]) -> Segment {
    let mut segment = Segment::Other;
    for (codes, label) in table {
        // No early exit: the last matching group in table order wins.
        if codes.iter().any(|c| *c == code) {
            segment = *label;
        }
    }
    segment
}

/// Attach the segment label to a scored customer.
pub fn classify(scored: ScoredCustomer) -> SegmentedCustomer {
    let segment = classify_code(&scored.rfm_code);
    SegmentedCustomer { scored, segment }
}

/// Verify the declared groups are pairwise disjoint.
///
/// Run once per pipeline before classification. On the shipped table this
/// always succeeds; an overlap would make classification depend on
/// declaration order, so we refuse to run rather than segment silently.
pub fn validate_rule_table() -> Result<(), AppError> {
    let mut seen: HashMap<&str, Segment> = HashMap::new();
    for (codes, label) in RULE_TABLE {
        for code in *codes {
            if let Some(prior) = seen.insert(code, *label) {
                return Err(AppError::internal(format!(
                    "Rule table groups overlap: code {code} appears under both '{}' and '{}'.",
                    prior.display_name(),
                    label.display_name()
                )));
            }
        }
    }
    Ok(())
}
