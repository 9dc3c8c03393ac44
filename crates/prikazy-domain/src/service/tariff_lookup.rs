//! Tariff lookup by work duration
//!
//! Buckets are `[from, to)`: lower bound inclusive, upper bound exclusive.
//! The first matching bucket wins; overlapping or unsorted ladders are not
//! rejected here, `validate_buckets` reports them instead.

use serde::{Deserialize, Serialize};

use crate::model::{DurationBucket, TariffTable};

/// Find the bucket applying to `hours`
pub fn lookup<B: DurationBucket>(buckets: &[B], hours: f64) -> Option<&B> {
    buckets.iter().find(|b| b.contains(hours))
}

/// Amount of the bucket applying to `hours`, `None` when no bucket matches
pub fn allowance<B: DurationBucket>(buckets: &[B], hours: f64) -> Option<f64> {
    lookup(buckets, hours).map(|b| b.amount())
}

/// Which ladder of the tariff table a finding belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ladder {
    Meal,
    Work,
}

impl Ladder {
    pub fn label(&self) -> &'static str {
        match self {
            Ladder::Meal => "stravné",
            Ladder::Work => "náhrada",
        }
    }
}

/// Problem found in a bucket ladder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TariffFinding {
    /// `to <= from`, the bucket can never match
    EmptyRange { index: usize },
    /// Bucket starts before its predecessor
    Unsorted { index: usize },
    /// Bucket starts inside its predecessor's range
    Overlap { first: usize, second: usize },
    /// Hours in `[from, to)` match no bucket
    Gap { from: f64, to: f64 },
    /// Hours from `from` upward match no bucket
    Unbounded { from: f64 },
    /// No buckets at all
    Empty,
}

impl std::fmt::Display for TariffFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TariffFinding::EmptyRange { index } => write!(f, "bucket {} has an empty range", index + 1),
            TariffFinding::Unsorted { index } => {
                write!(f, "bucket {} starts before the previous one", index + 1)
            }
            TariffFinding::Overlap { first, second } => {
                write!(f, "buckets {} and {} overlap", first + 1, second + 1)
            }
            TariffFinding::Gap { from, to } => write!(f, "no bucket covers [{}, {})", from, to),
            TariffFinding::Unbounded { from } => {
                write!(f, "no bucket covers {} hours and more", from)
            }
            TariffFinding::Empty => write!(f, "no buckets defined"),
        }
    }
}

/// Check a ladder for empty ranges, ordering, overlaps, and gaps
pub fn validate_buckets<B: DurationBucket>(buckets: &[B]) -> Vec<TariffFinding> {
    let mut findings = Vec::new();

    let Some(first) = buckets.first() else {
        findings.push(TariffFinding::Empty);
        return findings;
    };

    if first.from_hours() > 0.0 {
        findings.push(TariffFinding::Gap {
            from: 0.0,
            to: first.from_hours(),
        });
    }

    for (index, bucket) in buckets.iter().enumerate() {
        if let Some(to) = bucket.to_hours() {
            if to <= bucket.from_hours() {
                findings.push(TariffFinding::EmptyRange { index });
            }
        }

        if index == 0 {
            continue;
        }
        let prev = &buckets[index - 1];
        if bucket.from_hours() < prev.from_hours() {
            findings.push(TariffFinding::Unsorted { index });
            continue;
        }
        match prev.to_hours() {
            None => findings.push(TariffFinding::Overlap {
                first: index - 1,
                second: index,
            }),
            Some(prev_to) if bucket.from_hours() < prev_to => {
                findings.push(TariffFinding::Overlap {
                    first: index - 1,
                    second: index,
                })
            }
            Some(prev_to) if bucket.from_hours() > prev_to => findings.push(TariffFinding::Gap {
                from: prev_to,
                to: bucket.from_hours(),
            }),
            Some(_) => {}
        }
    }

    // No open bucket: long days match nothing
    if buckets.iter().all(|b| b.to_hours().is_some()) {
        let from = buckets
            .iter()
            .filter_map(|b| b.to_hours())
            .fold(f64::NEG_INFINITY, f64::max);
        findings.push(TariffFinding::Unbounded { from });
    }

    findings
}

/// Validate both ladders of a tariff table
pub fn validate_table(table: &TariffTable) -> Vec<(Ladder, TariffFinding)> {
    validate_buckets(&table.meal_tariffs)
        .into_iter()
        .map(|f| (Ladder::Meal, f))
        .chain(
            validate_buckets(&table.work_tariffs)
                .into_iter()
                .map(|f| (Ladder::Work, f)),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WorkTariff;

    fn bucket(from: f64, to: Option<f64>, amount: f64) -> WorkTariff {
        WorkTariff { from, to, amount }
    }

    fn ladder() -> Vec<WorkTariff> {
        vec![
            bucket(0.0, Some(4.0), 100.0),
            bucket(4.0, Some(8.0), 200.0),
            bucket(8.0, None, 300.0),
        ]
    }

    #[test]
    fn test_lower_bound_inclusive() {
        assert_eq!(allowance(&ladder(), 4.0), Some(200.0));
        assert_eq!(allowance(&ladder(), 0.0), Some(100.0));
        assert_eq!(allowance(&ladder(), 8.0), Some(300.0));
    }

    #[test]
    fn test_upper_bound_exclusive() {
        assert_eq!(allowance(&ladder(), 3.999), Some(100.0));
        assert_eq!(allowance(&ladder(), 7.5), Some(200.0));
    }

    #[test]
    fn test_unbounded_last_bucket() {
        assert_eq!(allowance(&ladder(), 26.0), Some(300.0));
    }

    #[test]
    fn test_no_match() {
        let buckets = vec![bucket(5.0, Some(12.0), 140.0)];
        assert_eq!(allowance(&buckets, 2.0), None);
        assert_eq!(allowance(&buckets, 12.0), None);
        assert_eq!(allowance(&buckets, f64::NAN), None);
        assert_eq!(allowance::<WorkTariff>(&[], 5.0), None);
    }

    #[test]
    fn test_first_match_wins_on_overlap() {
        let buckets = vec![bucket(0.0, Some(6.0), 100.0), bucket(4.0, Some(8.0), 200.0)];
        assert_eq!(allowance(&buckets, 5.0), Some(100.0));
    }

    #[test]
    fn test_validate_clean_ladder() {
        assert!(validate_buckets(&ladder()).is_empty());
    }

    #[test]
    fn test_validate_reports_problems() {
        let buckets = vec![
            bucket(1.0, Some(4.0), 100.0),
            bucket(3.0, Some(6.0), 150.0),
            bucket(7.0, Some(7.0), 175.0),
            bucket(2.0, None, 300.0),
        ];
        let findings = validate_buckets(&buckets);
        assert!(findings.contains(&TariffFinding::Gap { from: 0.0, to: 1.0 }));
        assert!(findings.contains(&TariffFinding::Overlap { first: 0, second: 1 }));
        assert!(findings.contains(&TariffFinding::Gap { from: 6.0, to: 7.0 }));
        assert!(findings.contains(&TariffFinding::EmptyRange { index: 2 }));
        assert!(findings.contains(&TariffFinding::Unsorted { index: 3 }));
    }

    #[test]
    fn test_validate_closed_last_bucket() {
        let buckets = vec![bucket(0.0, Some(4.0), 100.0), bucket(4.0, Some(8.0), 200.0)];
        assert_eq!(allowance(&buckets, 9.0), None);
        assert_eq!(
            validate_buckets(&buckets),
            vec![TariffFinding::Unbounded { from: 8.0 }]
        );
    }

    #[test]
    fn test_validate_empty_ladder() {
        assert_eq!(validate_buckets::<WorkTariff>(&[]), vec![TariffFinding::Empty]);
    }

    #[test]
    fn test_validate_table_tags_ladder() {
        let table = TariffTable {
            km_rate: 6.0,
            km_rate_higher: 8.0,
            meal_tariffs: vec![],
            work_tariffs: ladder(),
        };
        assert_eq!(validate_table(&table), vec![(Ladder::Meal, TariffFinding::Empty)]);
    }
}
