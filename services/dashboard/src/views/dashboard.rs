//! services/dashboard/src/views/dashboard.rs
//!
//! The home dashboard view controller: welcome header, the four statistic
//! cards and the leaderboard. Thin shaping over `ApiClient::dashboard` and
//! `ApiClient::introductions`.

use crate::client::ApiClient;
use crate::error::ClientError;
use student_lms_core::domain::{Introduction, LeaderboardEntry};

const PLACEHOLDER_AVATAR: &str = "https://via.placeholder.com/64";

#[derive(Debug, Clone)]
pub struct DashboardView {
    pub welcome: String,
    pub role: String,
    pub avatar_url: String,
    pub coins: String,
    pub level: u32,
    pub ranking: String,
    pub modules: String,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub introductions: Vec<Introduction>,
}

impl DashboardView {
    pub async fn load(client: &ApiClient) -> Result<Self, ClientError> {
        let data = client.dashboard().await?;
        let introductions = client.introductions().await?;

        let student = data.student;
        let stats = data.statistics;

        let name = student.name.unwrap_or_default();
        let surname = student.surname.unwrap_or_default();
        let welcome = format!("Welcome back, {} {}!", name, surname);

        let rank = stats.current_rank.unwrap_or(1);
        let done = stats.completed_modules.unwrap_or(0);
        let total = stats.total_modules.unwrap_or(0);

        Ok(Self {
            welcome,
            role: student.role.unwrap_or_default(),
            avatar_url: student
                .img_url
                .unwrap_or_else(|| PLACEHOLDER_AVATAR.to_string()),
            coins: format_thousands(stats.total_coins.unwrap_or(0)),
            level: stats.current_level.unwrap_or(0),
            ranking: format!("{}{} place", rank, ordinal_suffix(rank)),
            modules: format!("{}/{}", done, total),
            leaderboard: data.leaderboard,
            introductions,
        })
    }
}

/// Suffix for the ranking card. Only the top three ranks get a dedicated
/// suffix; everything else, including 11-13, reads "th".
pub fn ordinal_suffix(rank: u32) -> &'static str {
    match rank {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Groups digits by thousands, e.g. 1234567 -> "1,234,567".
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_suffixes() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(4), "th");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(13), "th");
        assert_eq!(ordinal_suffix(21), "th");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
        assert_eq!(format_thousands(-12345), "-12,345");
    }
}
