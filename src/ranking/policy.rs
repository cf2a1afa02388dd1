/// Ranking policies
///
/// A policy decides two things: which match represents a group of matches
/// sharing a parent (and with what score), and which way the final list is
/// sorted.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::errors::RankerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingPolicy {
    /// Lowest score per parent, ascending
    Min,
    /// Highest score per parent, descending
    Max,
    /// Mean score per parent, ascending
    MeanMin,
    /// Mean score per parent, descending
    MeanMax,
}

impl RankingPolicy {
    pub const ALL: [RankingPolicy; 4] = [
        RankingPolicy::Min,
        RankingPolicy::Max,
        RankingPolicy::MeanMin,
        RankingPolicy::MeanMax,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RankingPolicy::Min => "min",
            RankingPolicy::Max => "max",
            RankingPolicy::MeanMin => "mean_min",
            RankingPolicy::MeanMax => "mean_max",
        }
    }

    /// Whether a group's score is the mean of its members.
    pub fn is_mean(&self) -> bool {
        matches!(self, RankingPolicy::MeanMin | RankingPolicy::MeanMax)
    }

    pub fn is_ascending(&self) -> bool {
        matches!(self, RankingPolicy::Min | RankingPolicy::MeanMin)
    }

    /// Order two scores so that the better one comes first.
    ///
    /// Incomparable values (NaN) compare equal, which keeps stable sorts stable.
    pub fn compare(&self, a: f64, b: f64) -> Ordering {
        let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        if self.is_ascending() {
            ord
        } else {
            ord.reverse()
        }
    }
}

impl fmt::Display for RankingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankingPolicy {
    type Err = RankerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" => Ok(RankingPolicy::Min),
            "max" => Ok(RankingPolicy::Max),
            "mean_min" => Ok(RankingPolicy::MeanMin),
            "mean_max" => Ok(RankingPolicy::MeanMax),
            other => Err(RankerError::configuration(
                "ranking",
                &format!(
                    "Unknown ranking '{}': expected one of min, max, mean_min, mean_max",
                    other
                ),
            )),
        }
    }
}
