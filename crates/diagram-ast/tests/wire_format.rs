//! JSON shape of parsed programs

use anyhow::Result;
use diagram_ast::{parse, parse_with_diagnostics, Program};
use serde_json::{json, Value};

fn to_json(input: &str) -> Result<Value> {
    Ok(serde_json::to_value(parse(input)?)?)
}

#[test]
fn test_diagrams_are_tagged_by_type() -> Result<()> {
    let value = to_json(
        "flowchart LR\n  A --> B\nsequenceDiagram\n  A->>B: hi\nclassDiagram\n  A <|-- B\nerDiagram\n  A ||--o{ B : has\nstateDiagram-v2\n  [*] --> A\ngantt\n  Task : 1d",
    )?;
    let types: Vec<_> = value["body"]
        .as_array()
        .unwrap()
        .iter()
        .map(|diagram| diagram["type"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(types, ["flowchart", "sequence", "class", "er", "state", "gantt"]);
    Ok(())
}

#[test]
fn test_statements_are_tagged_by_kind() -> Result<()> {
    let value = to_json("flowchart TD\n  A[Start] --> B\n  subgraph s\n    B --> C\n  end")?;
    let body = &value["body"][0]["body"];
    assert_eq!(body[0]["kind"], "node");
    assert_eq!(body[0]["shape"], "rectangle");
    assert_eq!(body[1]["kind"], "edge");
    assert_eq!(body[1]["edgeType"], "arrow");
    assert_eq!(body[2]["kind"], "subgraph");
    assert_eq!(body[2]["body"][0]["from"], "B");
    Ok(())
}

#[test]
fn test_er_relationship_fields() -> Result<()> {
    let value = to_json("erDiagram\nA ||--o{ B : has")?;
    let relationship = &value["body"][0]["statements"][0];
    assert_eq!(relationship["kind"], "relationship");
    assert_eq!(relationship["fromCardinality"], "EXACTLY_ONE");
    assert_eq!(relationship["toCardinality"], "ZERO_OR_MORE");
    assert_eq!(relationship["label"], "has");
    Ok(())
}

#[test]
fn test_sequence_branches_use_camel_case() -> Result<()> {
    let value = to_json("sequenceDiagram\nA->>B: req\nalt ok\nB->>A: yes\nelse fail\nB->>A: no\nend")?;
    let alt = &value["body"][0]["statements"][1];
    assert_eq!(alt["kind"], "alt");
    assert_eq!(alt["statements"].as_array().map(Vec::len), Some(1));
    assert_eq!(alt["elseBlocks"][0]["label"], "fail");
    Ok(())
}

#[test]
fn test_spans_are_serialized() -> Result<()> {
    let value = to_json("gantt\n  section Build\n  Code : 2d")?;
    let task = &value["body"][0]["sections"][0]["tasks"][0];
    assert_eq!(task["span"]["start"]["line"], 3);
    assert_eq!(task["name"], "Code");
    assert_eq!(task["duration"], "2d");
    Ok(())
}

#[test]
fn test_program_deserializes_without_spans() -> Result<()> {
    let value = json!({
        "body": [
            {
                "type": "flowchart",
                "direction": "LR",
                "body": [
                    { "kind": "edge", "from": "A", "to": "B", "edgeType": "arrow" }
                ]
            },
            {
                "type": "er",
                "statements": [
                    {
                        "kind": "relationship",
                        "from": "A",
                        "to": "B",
                        "fromCardinality": "EXACTLY_ONE",
                        "toCardinality": "ONE_OR_MORE",
                        "identification": "NON_IDENTIFYING",
                        "label": "owns"
                    }
                ]
            }
        ]
    });
    let program: Program = serde_json::from_value(value)?;
    assert_eq!(
        diagram_ast::generate_code(&program),
        "flowchart LR\n    A --> B\n\nerDiagram\n    A ||..|{ B : owns\n"
    );
    Ok(())
}

#[test]
fn test_json_round_trip_preserves_program() -> Result<()> {
    let program = parse("stateDiagram-v2\n  state Busy {\n    a --> b\n  }\n  note right of Busy : hot")?;
    let text = serde_json::to_string(&program)?;
    let back: Program = serde_json::from_str(&text)?;
    assert_eq!(back, program);
    Ok(())
}

#[test]
fn test_skipped_lines_serialize() -> Result<()> {
    let output = parse_with_diagnostics("erDiagram\n  ??? noise")?;
    let value = serde_json::to_value(&output)?;
    assert_eq!(value["skipped"][0]["line"], 2);
    assert_eq!(value["skipped"][0]["text"], "??? noise");
    Ok(())
}
