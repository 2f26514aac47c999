//! services/dashboard/src/decode.rs
//!
//! Boundary normalization for the duck-typed payloads the LMS API serves.
//! The students, groups and marks endpoints variously answer with a bare
//! array, a bare object, or an `{data: ...}` wrapper, and spell their
//! identifier fields several ways. Everything is normalized into the domain
//! representation here so the views never branch on wire shapes.

use serde_json::Value;
use student_lms_core::domain::{Group, GroupDays, GroupMember, Student, StudentMarks};

//=========================================================================================
// Field Helpers
//=========================================================================================

fn string_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Record ids are spelled `id` or `_id` depending on the endpoint.
fn id_field(value: &Value) -> Option<String> {
    string_field(value, "id").or_else(|| string_field(value, "_id"))
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

//=========================================================================================
// Students
//=========================================================================================

/// Accepts a bare student object, a bare array, `{data: array}` or
/// `{data: object}`. Anything else normalizes to an empty list.
pub fn students(value: &Value) -> Vec<Student> {
    if let Some(list) = value.as_array() {
        return list.iter().filter_map(student).collect();
    }
    if let Some(one) = student(value) {
        return vec![one];
    }
    match value.get("data") {
        Some(data) if data.is_array() || data.is_object() => students(data),
        _ => Vec::new(),
    }
}

fn student(value: &Value) -> Option<Student> {
    let id = id_field(value)?;
    Some(Student {
        id,
        name: string_field(value, "name"),
        full_name: string_field(value, "fullName"),
        first_name: string_field(value, "firstName"),
        last_name: string_field(value, "lastName"),
    })
}

//=========================================================================================
// Groups
//=========================================================================================

/// Accepts a bare array or `{data: array}`.
pub fn groups(value: &Value) -> Vec<Group> {
    let list = value
        .as_array()
        .or_else(|| value.get("data").and_then(Value::as_array));
    list.map(|items| items.iter().filter_map(group).collect())
        .unwrap_or_default()
}

fn group(value: &Value) -> Option<Group> {
    let id = id_field(value)?;
    let members = value
        .get("students")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(group_member).collect())
        .unwrap_or_default();

    Some(Group {
        id,
        name: string_field(value, "name").or_else(|| string_field(value, "groupName")),
        time: string_field(value, "time").or_else(|| string_field(value, "schedule")),
        days: value.get("days").and_then(group_days),
        students: members,
    })
}

/// A roster entry is either a bare id string or an embedded student record.
fn group_member(value: &Value) -> Option<GroupMember> {
    if let Some(id) = value.as_str() {
        return Some(GroupMember::Id(id.to_string()));
    }
    student(value).map(GroupMember::Student)
}

fn group_days(value: &Value) -> Option<GroupDays> {
    if !value.is_object() {
        return None;
    }
    Some(GroupDays {
        odd_days: string_list(value.get("odd_days")),
        even_days: string_list(value.get("even_days")),
        every_days: string_list(value.get("every_days")),
    })
}

//=========================================================================================
// Marks
//=========================================================================================

/// Accepts a bare array or `{data: array}`.
pub fn marks(value: &Value) -> Vec<StudentMarks> {
    let list = value
        .as_array()
        .or_else(|| value.get("data").and_then(Value::as_array));
    list.map(|items| items.iter().map(marks_row).collect())
        .unwrap_or_default()
}

fn marks_row(value: &Value) -> StudentMarks {
    // The row's student reference appears under any of these keys.
    let student_id = string_field(value, "studentId")
        .or_else(|| string_field(value, "student_id"))
        .or_else(|| string_field(value, "id"))
        .or_else(|| string_field(value, "student"));

    let marks = value
        .get("marks")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(|v| v.as_i64()).collect())
        .unwrap_or_default();

    StudentMarks {
        student_id,
        marks,
        overall: string_field(value, "overall"),
    }
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn students_accepts_a_bare_object() {
        let parsed = students(&json!({"_id": "s1", "name": "Aziz"}));
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id, "s1");
        assert_eq!(parsed[0].display_name(), "Aziz");
    }

    #[test]
    fn students_accepts_an_array_and_a_data_wrapper() {
        let bare = students(&json!([{"id": "s1"}, {"_id": "s2"}]));
        assert_eq!(bare.len(), 2);

        let wrapped = students(&json!({"data": [{"id": "s1"}]}));
        assert_eq!(wrapped.len(), 1);

        let wrapped_object = students(&json!({"data": {"id": "s1"}}));
        assert_eq!(wrapped_object.len(), 1);
    }

    #[test]
    fn students_without_ids_are_dropped() {
        assert!(students(&json!([{"name": "no id"}])).is_empty());
        assert!(students(&json!("nonsense")).is_empty());
    }

    #[test]
    fn student_name_fallback_chain() {
        let s = students(&json!([{"id": "s1", "firstName": "A", "lastName": "B"}]));
        assert_eq!(s[0].display_name(), "A B");
        let s = students(&json!([{"id": "s1", "fullName": "Full Name"}]));
        assert_eq!(s[0].display_name(), "Full Name");
        let s = students(&json!([{"id": "s1"}]));
        assert_eq!(s[0].display_name(), "Unknown");
    }

    #[test]
    fn groups_accepts_both_shapes_and_mixed_rosters() {
        let value = json!({"data": [{
            "_id": "g1",
            "groupName": "React f-1088",
            "schedule": "19:00-20:00",
            "days": {"odd_days": ["Mon", "Wed"]},
            "students": ["s1", {"id": "s2", "name": "B"}]
        }]});
        let parsed = groups(&value);
        assert_eq!(parsed.len(), 1);

        let group = &parsed[0];
        assert_eq!(group.display_name(), "React f-1088");
        assert_eq!(group.time.as_deref(), Some("19:00-20:00"));
        assert!(group.has_member("s1"));
        assert!(group.has_member("s2"));
        assert!(!group.has_member("s3"));
        assert_eq!(
            group.days.as_ref().unwrap().odd_days,
            vec!["Mon".to_string(), "Wed".to_string()]
        );
    }

    #[test]
    fn marks_rows_match_any_student_key_spelling() {
        let value = json!([
            {"studentId": "s1", "marks": [5, null, 4], "overall": "Good"},
            {"student_id": "s2", "marks": []},
            {"id": "s3"},
            {"student": "s4"},
        ]);
        let parsed = marks(&value);
        assert_eq!(parsed.len(), 4);
        assert_eq!(parsed[0].student_id.as_deref(), Some("s1"));
        assert_eq!(parsed[0].marks, vec![Some(5), None, Some(4)]);
        assert_eq!(parsed[1].student_id.as_deref(), Some("s2"));
        assert_eq!(parsed[2].student_id.as_deref(), Some("s3"));
        assert_eq!(parsed[3].student_id.as_deref(), Some("s4"));
    }

    #[test]
    fn marks_accepts_the_data_wrapper() {
        let parsed = marks(&json!({"data": [{"studentId": "s1"}]}));
        assert_eq!(parsed.len(), 1);
        assert!(marks(&json!({"data": "nonsense"})).is_empty());
    }
}
