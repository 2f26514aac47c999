//! services/dashboard/src/views/marks.rs
//!
//! The marks landing view: the list of groups the current student belongs
//! to, each as a card with a schedule line. The current student is resolved
//! from the students endpoint and matched against every group's roster by
//! identifier.

use crate::client::ApiClient;
use crate::error::ClientError;
use student_lms_core::domain::{Group, GroupDays};
use student_lms_core::ports::PortError;
use tracing::warn;

const DEFAULT_TIME: &str = "19:00-20:00";
const NO_DAYS: &str = "No scheduled days";

#[derive(Debug, Clone)]
pub struct GroupCard {
    pub group_id: String,
    pub title: String,
    pub schedule: String,
}

#[derive(Debug, Clone)]
pub struct MarksView {
    pub student_id: String,
    pub groups: Vec<GroupCard>,
}

impl MarksView {
    pub async fn load(client: &ApiClient) -> Result<Self, ClientError> {
        let students = client.students().await?;
        let current = students
            .first()
            .ok_or_else(|| PortError::NotFound("student record".to_string()))?;

        let groups = client.groups().await?;
        let member_of: Vec<&Group> = groups.iter().filter(|g| g.has_member(&current.id)).collect();
        if member_of.is_empty() {
            warn!("Student {} is not a member of any group", current.id);
        }

        Ok(Self {
            student_id: current.id.clone(),
            groups: member_of.iter().map(|g| group_card(g)).collect(),
        })
    }
}

fn group_card(group: &Group) -> GroupCard {
    GroupCard {
        group_id: group.id.clone(),
        title: group.display_name(),
        schedule: schedule_label(group),
    }
}

/// "19:00-20:00 | Mon, Wed" style schedule line.
pub fn schedule_label(group: &Group) -> String {
    let time = group.time.as_deref().unwrap_or(DEFAULT_TIME);
    format!("{} | {}", time, format_days(group.days.as_ref()))
}

/// Every-day schedules take precedence; otherwise odd and even day lists are
/// shown side by side.
pub fn format_days(days: Option<&GroupDays>) -> String {
    let Some(days) = days else {
        return NO_DAYS.to_string();
    };

    if !days.every_days.is_empty() {
        return days.every_days.join(", ");
    }

    let mut parts = Vec::new();
    if !days.odd_days.is_empty() {
        parts.push(format!("Odd: {}", days.odd_days.join(", ")));
    }
    if !days.even_days.is_empty() {
        parts.push(format!("Even: {}", days.even_days.join(", ")));
    }

    if parts.is_empty() {
        NO_DAYS.to_string()
    } else {
        parts.join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days(odd: &[&str], even: &[&str], every: &[&str]) -> GroupDays {
        GroupDays {
            odd_days: odd.iter().map(|s| s.to_string()).collect(),
            even_days: even.iter().map(|s| s.to_string()).collect(),
            every_days: every.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn every_days_win_over_the_split_lists() {
        let d = days(&["Mon"], &["Tue"], &["Mon", "Tue", "Wed"]);
        assert_eq!(format_days(Some(&d)), "Mon, Tue, Wed");
    }

    #[test]
    fn odd_and_even_lists_are_labelled() {
        let d = days(&["Mon", "Wed"], &["Tue"], &[]);
        assert_eq!(format_days(Some(&d)), "Odd: Mon, Wed | Even: Tue");

        let d = days(&["Mon"], &[], &[]);
        assert_eq!(format_days(Some(&d)), "Odd: Mon");
    }

    #[test]
    fn missing_or_empty_days_fall_back() {
        assert_eq!(format_days(None), NO_DAYS);
        assert_eq!(format_days(Some(&days(&[], &[], &[]))), NO_DAYS);
    }

    #[test]
    fn schedule_line_uses_the_default_time_slot() {
        let group = Group {
            id: "g1".to_string(),
            name: Some("React f-1088".to_string()),
            time: None,
            days: None,
            students: Vec::new(),
        };
        assert_eq!(schedule_label(&group), "19:00-20:00 | No scheduled days");
    }
}
