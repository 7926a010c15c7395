//! Gantt chart AST

use serde::{Deserialize, Serialize};

use crate::core::{Outline, Outlined, Span};

/// A parsed Gantt chart
///
/// Dates and durations are kept as written; resolving them to a timeline
/// happens downstream.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttDiagram {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excludes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today_marker: Option<String>,
    pub sections: Vec<GanttSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl GanttDiagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_section(mut self, section: GanttSection) -> Self {
        self.sections.push(section);
        self
    }

    pub fn tasks(&self) -> impl Iterator<Item = &GanttTask> {
        self.sections.iter().flat_map(|section| section.tasks.iter())
    }

    /// Find a task by id across all sections
    pub fn task(&self, id: &str) -> Option<&GanttTask> {
        self.tasks().find(|task| task.id.as_deref() == Some(id))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttSection {
    pub name: String,
    pub tasks: Vec<GanttTask>,
    /// Holds tasks written before the first `section` line and has no header
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub implicit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl GanttSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tasks: Vec::new(),
            implicit: false,
            span: None,
        }
    }

    /// Unnamed section for tasks that precede every `section` line
    pub fn implicit() -> Self {
        Self {
            implicit: true,
            ..Self::new("")
        }
    }

    pub fn with_task(mut self, task: GanttTask) -> Self {
        self.tasks.push(task);
        self
    }
}

impl Outlined for GanttSection {
    fn outline(&self) -> Outline {
        Outline::node(
            "section",
            self.tasks.iter().map(|_| Outline::leaf("task")).collect(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Active,
    Done,
    Crit,
    Milestone,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Active,
        TaskStatus::Done,
        TaskStatus::Crit,
        TaskStatus::Milestone,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            TaskStatus::Active => "active",
            TaskStatus::Done => "done",
            TaskStatus::Crit => "crit",
            TaskStatus::Milestone => "milestone",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.keyword().eq_ignore_ascii_case(word))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttTask {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// A literal date or `after <ids>`, verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl GanttTask {
    pub fn new(name: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            status: None,
            start_date: None,
            duration: duration.into(),
            dependencies: Vec::new(),
            span: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the start and derive `dependencies` from an `after` start
    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        let start = start.into();
        self.dependencies = after_dependencies(&start);
        self.start_date = Some(start);
        self
    }
}

/// Task ids named by an `after a b` start, empty for literal dates
pub fn after_dependencies(start: &str) -> Vec<String> {
    crate::core::strip_keyword(start, "after")
        .map(|ids| ids.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}
