//! services/dashboard/src/views/attendance.rs
//!
//! The marks/attendance table for one group: roster join against the marks
//! rows, five mark cells per student, an overall band, and the three-month
//! pager.

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::views::marks::schedule_label;
use student_lms_core::domain::{GroupMember, StudentMarks};
use student_lms_core::ports::PortError;

pub static MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// How many mark cells every row shows, short rows are padded with "-".
const MARK_CELLS: usize = 5;

//=========================================================================================
// Month Pager
//=========================================================================================

/// A window of three months over the year, with one active selection.
#[derive(Debug, Clone, Copy)]
pub struct MonthPager {
    pub active_index: usize,
    pub start_index: usize,
}

impl Default for MonthPager {
    fn default() -> Self {
        Self {
            active_index: 0,
            start_index: 0,
        }
    }
}

impl MonthPager {
    pub fn visible(&self) -> &'static [&'static str] {
        &MONTHS[self.start_index..self.start_index + 3]
    }

    /// Advances the window by three months; clamps at December.
    pub fn next(&mut self) {
        if self.start_index + 3 < MONTHS.len() {
            self.start_index += 3;
        }
    }

    /// Moves the window back by three months; clamps at January.
    pub fn prev(&mut self) {
        if self.start_index >= 3 {
            self.start_index -= 3;
        }
    }

    pub fn select(&mut self, index: usize) {
        if index < MONTHS.len() {
            self.active_index = index;
        }
    }
}

//=========================================================================================
// Overall Banding
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverallTone {
    Positive,
    Warn,
    Negative,
    Neutral,
}

pub fn overall_tone(overall: Option<&str>) -> OverallTone {
    match overall.map(|s| s.to_lowercase()).as_deref() {
        Some("excellent") | Some("good") => OverallTone::Positive,
        Some("average") => OverallTone::Warn,
        Some("poor") => OverallTone::Negative,
        _ => OverallTone::Neutral,
    }
}

//=========================================================================================
// The View
//=========================================================================================

#[derive(Debug, Clone)]
pub struct AttendanceRow {
    pub student_name: String,
    pub cells: Vec<String>,
    pub overall: String,
    pub tone: OverallTone,
}

#[derive(Debug, Clone)]
pub struct AttendanceView {
    pub group_name: String,
    pub schedule: String,
    pub rows: Vec<AttendanceRow>,
    pub pager: MonthPager,
}

impl AttendanceView {
    /// Loads the table for the group named in the URL. A missing id is a
    /// validation error; an unknown id is not found.
    pub async fn load(client: &ApiClient, group_id: Option<&str>) -> Result<Self, ClientError> {
        let group_id = group_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| PortError::Validation("group id missing from the URL".to_string()))?;

        let groups = client.groups().await?;
        let group = groups
            .into_iter()
            .find(|g| g.id == group_id)
            .ok_or_else(|| PortError::NotFound(format!("group {}", group_id)))?;

        let marks = client.marks_attendance().await?;

        let rows = group
            .students
            .iter()
            .map(|member| attendance_row(member, &marks))
            .collect();

        Ok(Self {
            group_name: group.display_name(),
            schedule: schedule_label(&group),
            rows,
            pager: MonthPager::default(),
        })
    }

    /// The empty state ("no students in this group").
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn attendance_row(member: &GroupMember, marks: &[StudentMarks]) -> AttendanceRow {
    let student_name = match member {
        GroupMember::Student(student) => student.display_name(),
        GroupMember::Id(_) => "Unknown".to_string(),
    };

    let row = marks
        .iter()
        .find(|m| m.student_id.as_deref() == Some(member.id()));

    let (cells, overall) = match row {
        Some(row) => (mark_cells(&row.marks), row.overall.clone()),
        None => (mark_cells(&[]), None),
    };

    AttendanceRow {
        student_name,
        tone: overall_tone(overall.as_deref()),
        overall: overall.unwrap_or_else(|| "N/A".to_string()),
        cells,
    }
}

/// Truncates to five cells and pads short rows with "-".
fn mark_cells(marks: &[Option<i64>]) -> Vec<String> {
    let mut cells: Vec<String> = marks
        .iter()
        .take(MARK_CELLS)
        .map(|mark| match mark {
            Some(value) => value.to_string(),
            None => "-".to_string(),
        })
        .collect();
    while cells.len() < MARK_CELLS {
        cells.push("-".to_string());
    }
    cells
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use student_lms_core::domain::Student;

    #[test]
    fn pager_clamps_at_both_ends() {
        let mut pager = MonthPager::default();
        assert_eq!(pager.visible(), &["January", "February", "March"]);

        pager.prev();
        assert_eq!(pager.start_index, 0);

        pager.next();
        assert_eq!(pager.visible(), &["April", "May", "June"]);

        pager.next();
        pager.next();
        assert_eq!(pager.visible(), &["October", "November", "December"]);
        pager.next();
        assert_eq!(pager.start_index, 9);
    }

    #[test]
    fn pager_select_ignores_out_of_range() {
        let mut pager = MonthPager::default();
        pager.select(7);
        assert_eq!(pager.active_index, 7);
        pager.select(12);
        assert_eq!(pager.active_index, 7);
    }

    #[test]
    fn overall_banding() {
        assert_eq!(overall_tone(Some("Excellent")), OverallTone::Positive);
        assert_eq!(overall_tone(Some("good")), OverallTone::Positive);
        assert_eq!(overall_tone(Some("Average")), OverallTone::Warn);
        assert_eq!(overall_tone(Some("poor")), OverallTone::Negative);
        assert_eq!(overall_tone(Some("???")), OverallTone::Neutral);
        assert_eq!(overall_tone(None), OverallTone::Neutral);
    }

    #[test]
    fn rows_pad_and_truncate_to_five_cells() {
        assert_eq!(mark_cells(&[]), vec!["-", "-", "-", "-", "-"]);
        assert_eq!(
            mark_cells(&[Some(5), None, Some(4)]),
            vec!["5", "-", "4", "-", "-"]
        );
        assert_eq!(
            mark_cells(&[Some(1), Some(2), Some(3), Some(4), Some(5), Some(6)]),
            vec!["1", "2", "3", "4", "5"]
        );
    }

    #[test]
    fn roster_join_matches_marks_by_id() {
        let member = GroupMember::Student(Student {
            id: "s1".to_string(),
            name: Some("Aziz".to_string()),
            ..Default::default()
        });
        let marks = vec![StudentMarks {
            student_id: Some("s1".to_string()),
            marks: vec![Some(5), Some(4)],
            overall: Some("Good".to_string()),
        }];

        let row = attendance_row(&member, &marks);
        assert_eq!(row.student_name, "Aziz");
        assert_eq!(row.cells, vec!["5", "4", "-", "-", "-"]);
        assert_eq!(row.overall, "Good");
        assert_eq!(row.tone, OverallTone::Positive);
    }

    #[test]
    fn unmatched_members_get_the_default_row() {
        let member = GroupMember::Id("s9".to_string());
        let row = attendance_row(&member, &[]);
        assert_eq!(row.student_name, "Unknown");
        assert_eq!(row.overall, "N/A");
        assert_eq!(row.tone, OverallTone::Neutral);
    }
}
