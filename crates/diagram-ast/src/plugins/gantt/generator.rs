//! Gantt chart code generator

use super::ast::{GanttDiagram, GanttTask};
use crate::core::{CodeWriter, DiagramKind, GenerateConfig, Generator};

/// Emits Gantt chart source text
#[derive(Debug, Clone, Default)]
pub struct GanttGenerator {
    config: GenerateConfig,
}

impl GanttGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GenerateConfig) -> Self {
        Self { config }
    }
}

impl Generator for GanttGenerator {
    type Input = GanttDiagram;

    fn generate(&self, diagram: &GanttDiagram) -> String {
        let mut out = CodeWriter::new(&self.config);
        out.line(DiagramKind::Gantt.canonical_keyword());
        out.nested(|out| {
            let directives = [
                ("title", &diagram.title),
                ("dateFormat", &diagram.date_format),
                ("axisFormat", &diagram.axis_format),
                ("excludes", &diagram.excludes),
                ("todayMarker", &diagram.today_marker),
            ];
            for (keyword, value) in directives {
                if let Some(value) = value {
                    out.line(format!("{} {}", keyword, value));
                }
            }

            for (index, section) in diagram.sections.iter().enumerate() {
                if index == 0 && section.implicit {
                    for task in &section.tasks {
                        out.line(task_text(task));
                    }
                    continue;
                }
                out.line(format!("section {}", section.name).trim_end());
                out.nested(|out| {
                    for task in &section.tasks {
                        out.line(task_text(task));
                    }
                });
            }
        });
        out.finish()
    }

    fn name(&self) -> &'static str {
        "gantt"
    }
}

/// `name : status, id, start, duration`; the id needs a start to be written
fn task_text(task: &GanttTask) -> String {
    let mut fields: Vec<&str> = Vec::new();
    if let Some(status) = task.status {
        fields.push(status.keyword());
    }
    if let Some(start) = &task.start_date {
        if let Some(id) = &task.id {
            fields.push(id);
        }
        fields.push(start);
    }
    fields.push(&task.duration);
    format!("{} : {}", task.name, fields.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Outline, Parser};
    use crate::plugins::gantt::{GanttParser, GanttSection, TaskStatus};

    #[test]
    fn test_generates_sections_and_tasks() {
        let diagram = GanttDiagram::new().with_title("Plan").with_section(
            GanttSection::new("Build")
                .with_task(
                    GanttTask::new("Design", "3d")
                        .with_id("a1")
                        .with_start("2024-01-01")
                        .with_status(TaskStatus::Done),
                )
                .with_task(GanttTask::new("Code", "5d").with_start("after a1")),
        );
        assert_eq!(
            GanttGenerator::new().generate(&diagram),
            "gantt\n    title Plan\n    section Build\n        Design : done, a1, 2024-01-01, 3d\n        Code : after a1, 5d\n"
        );
    }

    #[test]
    fn test_leading_unnamed_section_has_no_header() {
        let diagram = GanttDiagram::new()
            .with_section(GanttSection::implicit().with_task(GanttTask::new("Kickoff", "1d")))
            .with_section(GanttSection::new("Later"));
        assert_eq!(
            GanttGenerator::new().generate(&diagram),
            "gantt\n    Kickoff : 1d\n    section Later\n"
        );
    }

    #[test]
    fn test_empty_named_sections_keep_their_header() {
        let parser = GanttParser::new();
        let first = parser.parse("gantt\n  section\n  section B\n  T : 1d").unwrap();
        let text = GanttGenerator::new().generate(&first);
        assert_eq!(text, "gantt\n    section\n    section B\n        T : 1d\n");

        let second = parser.parse(&text).unwrap();
        assert_eq!(second.sections.len(), 2);
        assert_eq!(Outline::of_all(&first.sections), Outline::of_all(&second.sections));
    }

    #[test]
    fn test_round_trip_preserves_sections() {
        let input = "gantt\n  title Release\n  dateFormat YYYY-MM-DD\n  excludes weekends\n  Prep : 1d\n  section Build\n  Design :active, a1, 2024-01-01, 3d\n  Code : after a1, 5d\n  section Ship\n  Launch :milestone, after a1, 0d";
        let parser = GanttParser::new();
        let first = parser.parse(input).unwrap();
        let second = parser.parse(&GanttGenerator::new().generate(&first)).unwrap();
        assert_eq!(Outline::of_all(&first.sections), Outline::of_all(&second.sections));
        assert_eq!(first.title, second.title);
        assert_eq!(first.date_format, second.date_format);
        assert_eq!(first.excludes, second.excludes);
        let launch = second.tasks().last().unwrap();
        assert_eq!(launch.status, Some(TaskStatus::Milestone));
        assert_eq!(launch.dependencies, vec!["a1"]);
    }
}
