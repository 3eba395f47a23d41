use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use ulid::Ulid;

/// Longest task text the interactive surfaces accept, in characters.
pub const MAX_TEXT_CHARS: usize = 120;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_time: Option<String>,
}

impl Task {
    /// Build a fresh, incomplete task stamped with the current instant, at the
    /// millisecond precision it is stored with.
    pub fn new(text: impl Into<String>, due_time: Option<String>) -> Self {
        Self {
            id: Ulid::new().to_string(),
            text: text.into(),
            completed: false,
            created_at: Utc::now().trunc_subsecs(3),
            due_time,
        }
    }
}

/// Outcome of replacing a task's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextChange {
    Updated,
    Removed,
    Missing,
}

/// Completion counts behind the summary line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub total: usize,
    pub done: usize,
}

impl Tally {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        Self {
            total: tasks.len(),
            done: tasks.iter().filter(|task| task.completed).count(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.total - self.done
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn serializes_with_camel_case_and_millis() {
        let task = Task {
            id: "01HX".into(),
            text: "Buy milk".into(),
            completed: false,
            created_at: Utc.timestamp_millis_opt(1_700_000_000_123).unwrap(),
            due_time: Some("14:30".into()),
        };

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["createdAt"], 1_700_000_000_123i64);
        assert_eq!(json["dueTime"], "14:30");
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn empty_due_time_reads_as_none() {
        let raw = r#"{"id":"a","text":"x","completed":true,"createdAt":0,"dueTime":""}"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert!(task.due_time.is_none());
        assert!(task.completed);
    }

    #[test]
    fn missing_optional_fields_default() {
        let raw = r#"{"id":"a","text":"x","createdAt":5}"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert!(!task.completed);
        assert!(task.due_time.is_none());
    }

    #[test]
    fn tally_counts_remaining() {
        let mut done = Task::new("a", None);
        done.completed = true;
        let open = Task::new("b", None);
        let tally = Tally::from_tasks(&[done, open]);
        assert_eq!(tally.total, 2);
        assert_eq!(tally.done, 1);
        assert_eq!(tally.remaining(), 1);
    }
}
