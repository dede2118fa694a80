//! Record status vocabularies

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status shared by projects, complaints and maintenances.
/// Records are never physically deleted; cancellation is the terminal
/// transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Cancelled,
}

impl WorkStatus {
    pub fn all() -> [WorkStatus; 4] {
        [
            WorkStatus::Pending,
            WorkStatus::InProgress,
            WorkStatus::Completed,
            WorkStatus::Cancelled,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkStatus::Pending => "Pending",
            WorkStatus::InProgress => "In Progress",
            WorkStatus::Completed => "Completed",
            WorkStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentTerms {
    #[default]
    Cash,
    Credit,
}

impl PaymentTerms {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentTerms::Cash => "Cash",
            PaymentTerms::Credit => "Credit",
        }
    }
}

impl fmt::Display for PaymentTerms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_progress_serializes_with_space() {
        let json = serde_json::to_string(&WorkStatus::InProgress).unwrap();
        assert_eq!(json, r#""In Progress""#);
        let back: WorkStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, WorkStatus::InProgress);
    }
}
