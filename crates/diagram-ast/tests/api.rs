//! Integration tests for the public API

use diagram_ast::plugins::er::{ErStatement, KeyType};
use diagram_ast::plugins::flowchart::{Edge, FlowchartStatement, Node};
use diagram_ast::plugins::sequence::SequenceStatement;
use diagram_ast::plugins::state::StateStatement;
use diagram_ast::prelude::*;
use diagram_ast::{
    core::{Cardinality, EdgeType, NodeShape},
    detect_diagram_type, generate, generate_code, parse, parse_with_diagnostics,
};

fn only_diagram(input: &str) -> Diagram {
    let mut program = parse(input).unwrap();
    assert_eq!(program.body.len(), 1, "expected one diagram in {:?}", input);
    program.body.remove(0)
}

#[test]
fn test_implicit_flowchart_nodes() {
    let Diagram::Flowchart(diagram) = only_diagram("flowchart LR\n  A --> B") else {
        panic!("expected flowchart");
    };
    assert_eq!(diagram.direction, Direction::LeftRight);
    assert_eq!(diagram.body.len(), 1);
    let FlowchartStatement::Edge(edge) = &diagram.body[0] else {
        panic!("expected edge, got {:?}", diagram.body[0]);
    };
    assert_eq!((edge.from.as_str(), edge.to.as_str()), ("A", "B"));
}

#[test]
fn test_subgraph_block_balance() {
    let err = parse("flowchart TB\n  subgraph s\n    a --> b").unwrap_err();
    assert!(matches!(err, DiagramError::UnbalancedBlock { .. }));
    assert_eq!(err.dialect(), Some(DiagramKind::Flowchart));

    let Diagram::Flowchart(diagram) = only_diagram("flowchart TB\n  subgraph s\n    a --> b\n  end")
    else {
        panic!("expected flowchart");
    };
    assert_eq!(diagram.body.len(), 1);
    let FlowchartStatement::Subgraph(subgraph) = &diagram.body[0] else {
        panic!("expected subgraph");
    };
    assert_eq!(subgraph.body.len(), 1);
    assert!(matches!(subgraph.body[0], FlowchartStatement::Edge(_)));
}

#[test]
fn test_alt_with_else_branch() {
    let input = "sequenceDiagram\nA->>B: req\nalt ok\nB->>A: yes\nelse fail\nB->>A: no\nend";
    let Diagram::Sequence(diagram) = only_diagram(input) else {
        panic!("expected sequence diagram");
    };
    let alts: Vec<_> = diagram
        .statements
        .iter()
        .filter_map(|statement| match statement {
            SequenceStatement::Alt(alt) => Some(alt),
            _ => None,
        })
        .collect();
    assert_eq!(alts.len(), 1);
    assert_eq!(alts[0].label.as_deref(), Some("ok"));
    assert_eq!(alts[0].statements.len(), 1);
    assert_eq!(alts[0].else_blocks.len(), 1);
    assert_eq!(alts[0].else_blocks[0].label.as_deref(), Some("fail"));
}

#[test]
fn test_cardinality_symbols() {
    let Diagram::Er(diagram) = only_diagram("erDiagram\nA ||--o{ B : has") else {
        panic!("expected er diagram");
    };
    let relationship = diagram.relationships().next().unwrap();
    assert_eq!(relationship.from_cardinality, Cardinality::ExactlyOne);
    assert_eq!(relationship.to_cardinality, Cardinality::ZeroOrMore);
    assert_eq!(relationship.label.as_deref(), Some("has"));
}

#[test]
fn test_every_shape_parses_and_regenerates() {
    for shape in NodeShape::ALL {
        let (open, close) = shape.delimiters();
        let input = format!("flowchart TD\n  n{}label{}", open, close);
        let diagram = only_diagram(&input);
        let Diagram::Flowchart(flowchart) = &diagram else {
            panic!("expected flowchart");
        };
        match &flowchart.body[0] {
            FlowchartStatement::Node(node) => assert_eq!(node.shape, shape, "input {}", input),
            other => panic!("{} parsed to {:?}", input, other),
        }
        let text = generate(&diagram);
        assert!(
            text.contains(&format!("n{}label{}", open, close)),
            "{} regenerated as {}",
            shape,
            text
        );
    }
}

#[test]
fn test_every_edge_type_parses_and_regenerates() {
    for edge_type in EdgeType::ALL {
        let op = edge_type.operator(1);
        let input = format!("flowchart TD\n  a {} b", op);
        let diagram = only_diagram(&input);
        let Diagram::Flowchart(flowchart) = &diagram else {
            panic!("expected flowchart");
        };
        assert_eq!(flowchart.edges()[0].edge_type, edge_type, "input {}", input);
        assert!(generate(&diagram).contains(&format!("a {} b", op)));
    }
}

#[test]
fn test_state_composite_and_pseudo_states() {
    let input = "stateDiagram-v2\n  [*] --> Active\n  state Active {\n    Idle --> Busy : work\n  }\n  Active --> [*]";
    let Diagram::State(diagram) = only_diagram(input) else {
        panic!("expected state diagram");
    };
    assert_eq!(diagram.transitions().count(), 2);
    let composite = diagram
        .statements
        .iter()
        .find_map(|statement| match statement {
            StateStatement::State(state) if state.is_composite() => Some(state),
            _ => None,
        })
        .unwrap();
    assert_eq!(composite.id, "Active");
    assert_eq!(composite.composite_states.as_ref().map(Vec::len), Some(1));
}

#[test]
fn test_er_entity_attributes() {
    let input = "erDiagram\n  CUSTOMER {\n    string id PK\n    string name \"full name\"\n  }";
    let Diagram::Er(diagram) = only_diagram(input) else {
        panic!("expected er diagram");
    };
    let ErStatement::Entity(entity) = &diagram.statements[0] else {
        panic!("expected entity");
    };
    assert_eq!(entity.name, "CUSTOMER");
    assert_eq!(entity.attributes.len(), 2);
    assert_eq!(entity.attributes[0].key, Some(KeyType::Pk));
    assert_eq!(entity.attributes[1].comment.as_deref(), Some("full name"));
}

#[test]
fn test_gantt_tasks_in_sections() {
    let input = "gantt\n  title Plan\n  dateFormat YYYY-MM-DD\n  section One\n  Design :a1, 2024-01-01, 3d\n  section Two\n  Build :after a1, 5d";
    let Diagram::Gantt(diagram) = only_diagram(input) else {
        panic!("expected gantt chart");
    };
    assert_eq!(diagram.title.as_deref(), Some("Plan"));
    assert_eq!(diagram.sections.len(), 2);
    assert_eq!(diagram.task("a1").map(|task| task.duration.as_str()), Some("3d"));
    let build = diagram.tasks().nth(1).unwrap();
    assert_eq!(build.dependencies, vec!["a1"]);
}

#[test]
fn test_multiple_diagrams_in_one_document() {
    let input = "%% architecture\nflowchart LR\n  A --> B\n\nclassDiagram\n  Animal <|-- Dog\n\nstateDiagram\n  [*] --> Idle";
    let program = parse(input).unwrap();
    assert_eq!(
        program.kinds(),
        vec![DiagramKind::Flowchart, DiagramKind::Class, DiagramKind::State]
    );
    for diagram in &program.body {
        assert!(diagram.span().is_some());
    }
}

#[test]
fn test_diagnostics_report_skipped_lines() {
    let output =
        parse_with_diagnostics("preface\nflowchart LR\n  A --> B\n  ??? what\n").unwrap();
    assert_eq!(output.program.body.len(), 1);
    let lines: Vec<_> = output.skipped.iter().map(|s| (s.dialect, s.line)).collect();
    assert_eq!(
        lines,
        vec![(None, 1), (Some(DiagramKind::Flowchart), 4)]
    );
}

#[test]
fn test_header_statements_outside_flowchart_are_reported() {
    let output = parse_with_diagnostics("sequenceDiagram; A->>B: hi\n  B->>A: ok").unwrap();
    assert_eq!(output.program.body[0].statement_count(), 1);
    assert_eq!(output.skipped.len(), 1);
    assert_eq!(output.skipped[0].dialect, Some(DiagramKind::Sequence));
    assert_eq!(output.skipped[0].text, "A->>B: hi");

    let output = parse_with_diagnostics("graph TD; A-->B").unwrap();
    assert_eq!(output.program.body[0].statement_count(), 1);
    assert!(output.skipped.is_empty());
}

#[test]
fn test_detect_diagram_type() {
    assert_eq!(
        detect_diagram_type("graph TD\n  A --> B").unwrap(),
        DiagramKind::Flowchart
    );
    assert_eq!(
        detect_diagram_type("erDiagram\n  A ||--o{ B : has").unwrap(),
        DiagramKind::Er
    );
    assert!(detect_diagram_type("hello world").is_err());
}

#[test]
fn test_programs_built_in_code() {
    let diagram = FlowchartDiagram::new(Direction::TopDown)
        .with_statement(Node::new("A", NodeShape::Stadium, "Start"))
        .with_statement(Edge::new("A", "B", EdgeType::Arrow).with_label("next"));
    let program = Program::new().with_diagram(diagram);
    assert_eq!(
        generate_code(&program),
        "flowchart TB\n    A([Start])\n    A -->|next| B\n"
    );
}

#[test]
fn test_custom_dispatcher_config() {
    let mut input = String::from("flowchart TD\n");
    for i in 0..5 {
        input.push_str(&format!("subgraph s{}\n", i));
    }
    for _ in 0..5 {
        input.push_str("end\n");
    }

    assert!(parse(&input).is_ok());
    let strict = Dispatcher::default().with_config(ParseConfig::new().with_max_nesting_depth(3));
    let err = strict.parse(&input).unwrap_err();
    assert!(matches!(err, DiagramError::NestingTooDeep { limit: 3, .. }));
}
