//! Leaderboard entry entity.

/// Display name used when a ranked user is missing from the upstream mapping.
pub const UNKNOWN_USER_NAME: &str = "Unknown";

/// A user ranked by post count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub name: String,
    pub post_count: u64,
}

impl LeaderboardEntry {
    pub fn new(user_id: impl Into<String>, name: impl Into<String>, post_count: u64) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            post_count,
        }
    }

    /// Converts a sorted-set score into a post count.
    ///
    /// Returns `None` for scores that cannot be a count (negative, fractional or not finite).
    pub fn count_from_score(score: f64) -> Option<u64> {
        if score.is_finite() && score >= 0.0 && score.fract() == 0.0 {
            Some(score as u64)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_from_score() {
        assert_eq!(LeaderboardEntry::count_from_score(0.0), Some(0));
        assert_eq!(LeaderboardEntry::count_from_score(42.0), Some(42));
        assert_eq!(LeaderboardEntry::count_from_score(-1.0), None);
        assert_eq!(LeaderboardEntry::count_from_score(1.5), None);
        assert_eq!(LeaderboardEntry::count_from_score(f64::NAN), None);
    }
}
