//! Percentages and categorical breakdowns.
//!
//! Every division here guards a zero denominator: a share of nothing is 0,
//! never `NaN`.

use serde::{Deserialize, Serialize};

/// `part / total * 100`, or 0 when `total` is zero or not finite.
#[must_use]
pub fn percent_of(part: f64, total: f64) -> f64 {
    if total == 0.0 || !total.is_finite() || !part.is_finite() {
        return 0.0;
    }
    part / total * 100.0
}

/// `round(part / total * 100)`, rounding halves up; 0 when `total` is 0.
///
/// `part` is clamped to `total`, so the result never exceeds 100.
#[must_use]
pub fn rounded_percent(part: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let part = u128::from(part.min(total));
    let total = u128::from(total);
    let rounded = (part * 200 + total) / (total * 2);
    u8::try_from(rounded).unwrap_or(100)
}

/// A set of mutually exclusive counts shown as proportions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    counts: Vec<u64>,
}

impl Breakdown {
    #[must_use]
    pub fn new(counts: impl Into<Vec<u64>>) -> Self {
        Self {
            counts: counts.into(),
        }
    }

    /// Sum of every category.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0u64, |acc, c| acc.saturating_add(*c))
    }

    #[must_use]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Each category rounded on its own against the shared total.
    ///
    /// These can sum to 99 or 101.
    #[must_use]
    pub fn independent(&self) -> Vec<u8> {
        let total = self.total();
        self.counts
            .iter()
            .map(|c| rounded_percent(*c, total))
            .collect()
    }

    /// Display shares that sum to exactly 100 (or are all 0 for an empty
    /// breakdown).
    ///
    /// Each category first gets the floor of its exact share; the points
    /// still missing go to the categories with the largest remainders, the
    /// earlier category winning a tie. Every share is within one point of
    /// its independently rounded value.
    #[must_use]
    pub fn display(&self) -> Vec<u8> {
        let total = u128::from(self.total());
        if total == 0 {
            return vec![0; self.counts.len()];
        }

        let mut shares: Vec<u128> = Vec::with_capacity(self.counts.len());
        let mut remainders: Vec<(usize, u128)> = Vec::with_capacity(self.counts.len());
        for (i, c) in self.counts.iter().enumerate() {
            let scaled = u128::from(*c) * 100;
            shares.push(scaled / total);
            remainders.push((i, scaled % total));
        }

        let assigned: u128 = shares.iter().sum();
        let missing = usize::try_from(100u128.saturating_sub(assigned)).unwrap_or(0);

        // Stable sort keeps the earlier category first among equal remainders.
        remainders.sort_by(|a, b| b.1.cmp(&a.1));
        for (i, _) in remainders.into_iter().take(missing) {
            shares[i] += 1;
        }

        shares
            .into_iter()
            .map(|s| u8::try_from(s).unwrap_or(100))
            .collect()
    }
}

/// Positive / neutral / negative reply counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentiment {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

/// Display percentages for a [`Sentiment`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentShares {
    pub positive: u8,
    pub neutral: u8,
    pub negative: u8,
}

impl Sentiment {
    #[must_use]
    pub fn total(&self) -> u64 {
        self.positive
            .saturating_add(self.neutral)
            .saturating_add(self.negative)
    }

    /// Shares summing to 100, via [`Breakdown::display`].
    #[must_use]
    pub fn shares(&self) -> SentimentShares {
        let display = Breakdown::new([self.positive, self.neutral, self.negative]).display();
        match display.as_slice() {
            [positive, neutral, negative] => SentimentShares {
                positive: *positive,
                neutral: *neutral,
                negative: *negative,
            },
            _ => SentimentShares::default(),
        }
    }
}

impl std::ops::Add for Sentiment {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            positive: self.positive.saturating_add(rhs.positive),
            neutral: self.neutral.saturating_add(rhs.neutral),
            negative: self.negative.saturating_add(rhs.negative),
        }
    }
}

impl std::iter::Sum for Sentiment {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, s| acc + s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_of_guards_zero_total() {
        assert!((percent_of(3.0, 0.0)).abs() < f64::EPSILON);
        assert!((percent_of(1.0, 4.0) - 25.0).abs() < f64::EPSILON);
        assert!((percent_of(f64::NAN, 4.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn rounded_percent_rounds_half_up() {
        assert_eq!(rounded_percent(1, 8), 13); // 12.5
        assert_eq!(rounded_percent(1, 3), 33);
        assert_eq!(rounded_percent(2, 3), 67);
        assert_eq!(rounded_percent(5, 0), 0);
        assert_eq!(rounded_percent(9, 4), 100);
    }

    #[test]
    fn empty_breakdown_is_all_zero() {
        let b = Breakdown::new([0, 0, 0]);
        assert_eq!(b.total(), 0);
        assert_eq!(b.independent(), vec![0, 0, 0]);
        assert_eq!(b.display(), vec![0, 0, 0]);
    }

    #[test]
    fn independent_rounding_can_miss_100() {
        let b = Breakdown::new([1, 1, 1]);
        assert_eq!(b.independent(), vec![33, 33, 33]);
        assert_eq!(b.independent().iter().map(|p| u32::from(*p)).sum::<u32>(), 99);
    }

    #[test]
    fn display_shares_sum_to_100() {
        for counts in [
            vec![1, 1, 1],
            vec![2, 2, 2],
            vec![1, 2, 4],
            vec![7, 0, 0],
            vec![13, 29, 58],
            vec![1, 1, 1, 1, 1, 1, 1],
            vec![999, 1, 0],
        ] {
            let b = Breakdown::new(counts.clone());
            let display = b.display();
            let sum: u32 = display.iter().map(|p| u32::from(*p)).sum();
            assert_eq!(sum, 100, "{counts:?} -> {display:?}");
        }
    }

    #[test]
    fn display_stays_within_one_of_independent() {
        for counts in [vec![1, 1, 1], vec![1, 2, 4], vec![3, 3, 4], vec![5, 5, 1]] {
            let b = Breakdown::new(counts);
            for (d, i) in b.display().into_iter().zip(b.independent()) {
                assert!(d <= 100);
                assert!(i16::from(d).abs_diff(i16::from(i)) <= 1);
            }
        }
    }

    #[test]
    fn display_tie_goes_to_earlier_category() {
        assert_eq!(Breakdown::new([1, 1, 1]).display(), vec![34, 33, 33]);
    }

    #[test]
    fn sentiment_shares() {
        let s = Sentiment { positive: 6, neutral: 3, negative: 1 };
        assert_eq!(s.total(), 10);
        assert_eq!(
            s.shares(),
            SentimentShares { positive: 60, neutral: 30, negative: 10 }
        );
        assert_eq!(Sentiment::default().shares(), SentimentShares::default());
    }

    #[test]
    fn sentiment_sums() {
        let total: Sentiment = [
            Sentiment { positive: 1, neutral: 2, negative: 3 },
            Sentiment { positive: 4, neutral: 0, negative: 1 },
        ]
        .into_iter()
        .sum();
        assert_eq!(total, Sentiment { positive: 5, neutral: 2, negative: 4 });
    }
}
