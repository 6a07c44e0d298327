//! Percentile-to-score mapping.
//!
//! Frequency and Monetary score **directly**: a higher percentile means a
//! higher score. Recency scores **inverted**: a higher recency percentile
//! means the customer has been away longer, so the score drops.
//!
//! Both formulas are quintile bucketings clipped to `[1, 5]`; scores are
//! always well-defined for percentiles in `(0, 1]`, so there are no error
//! paths here.

use crate::domain::{CustomerRfm, ScoredCustomer};

/// Direct score: `clip(floor(p * 5) + 1, 1, 5)`.
pub fn direct_score(percentile: f64) -> u8 {
    (((percentile * 5.0).floor() as i32) + 1).clamp(1, 5) as u8
}

/// Inverted score: `clip(5 - floor(p * 5), 1, 5)`.
pub fn inverted_score(percentile: f64) -> u8 {
    (5 - (percentile * 5.0).floor() as i32).clamp(1, 5) as u8
}

/// Assign R/F/M scores and the 3-digit lookup code.
pub fn score_customer(rfm: CustomerRfm) -> ScoredCustomer {
    let r_score = inverted_score(rfm.recency_percentile);
    let f_score = direct_score(rfm.frequency_percentile);
    let m_score = direct_score(rfm.monetary_percentile);
    let rfm_code = format!("{r_score}{f_score}{m_score}");

    ScoredCustomer {
        rfm,
        r_score,
        f_score,
        m_score,
        rfm_code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_score_table() {
        // (percentile, expected score)
        let cases = [
            (0.1, 1),
            (0.2, 2),
            (0.3, 2),
            (0.4, 3),
            (0.5, 3),
            (0.6, 4),
            (0.8, 5),
            (0.9, 5),
            (1.0, 5), // floor(5) + 1 = 6, clipped
        ];
        for (p, expected) in cases {
            assert_eq!(direct_score(p), expected, "p = {p}");
        }
    }

    #[test]
    fn inverted_score_table() {
        let cases = [
            (0.1, 5),
            (0.2, 4),
            (0.4, 3),
            (0.6, 2),
            (0.8, 1),
            (0.9, 1),
            (1.0, 1), // 5 - floor(5) = 0, clipped
        ];
        for (p, expected) in cases {
            assert_eq!(inverted_score(p), expected, "p = {p}");
        }
    }

    #[test]
    fn five_customer_monetary_ladder() {
        // Percentiles for strictly increasing monetary totals {10..50}.
        let scores: Vec<u8> = [0.2, 0.4, 0.6, 0.8, 1.0]
            .iter()
            .map(|&p| direct_score(p))
            .collect();
        assert_eq!(scores, vec![2, 3, 4, 5, 5]);
    }

    #[test]
    fn code_is_three_digits_one_to_five() {
        let rfm = CustomerRfm {
            customer_id: "C1".to_string(),
            recency: 1,
            frequency: 1,
            monetary: 10.0,
            recency_percentile: 1.0,
            frequency_percentile: 1.0,
            monetary_percentile: 1.0,
        };
        let scored = score_customer(rfm);
        assert_eq!(scored.rfm_code, "155");
        assert_eq!(scored.rfm_code.len(), 3);
        assert!(scored.rfm_code.chars().all(|c| ('1'..='5').contains(&c)));
    }
}
