//! Tests for fatal parse errors

use diagram_ast::{parse, DiagramError, DiagramKind};

#[test]
fn test_missing_header() {
    let err = parse("A --> B").unwrap_err();
    assert_eq!(err, DiagramError::diagram_type("A --> B"));
    assert_eq!(err.dialect(), None);
    assert_eq!(err.line(), None);

    let error_msg = format!("{}", err);
    assert!(error_msg.contains("Unknown diagram type"));
    assert!(error_msg.contains("A --> B"));
}

#[test]
fn test_empty_document() {
    assert!(matches!(
        parse("").unwrap_err(),
        DiagramError::DiagramType { .. }
    ));
    assert!(matches!(
        parse("%% only a comment\n\n").unwrap_err(),
        DiagramError::DiagramType { .. }
    ));
}

#[test]
fn test_unclosed_blocks_per_dialect() {
    let cases = [
        ("flowchart TD\n  subgraph s\n    a --> b", DiagramKind::Flowchart, 2),
        ("sequenceDiagram\n  loop every minute\n    A->>B: ping", DiagramKind::Sequence, 2),
        ("sequenceDiagram\n  alt ok\n    A->>B: yes\n  else\n    A->>B: no", DiagramKind::Sequence, 2),
        ("classDiagram\n  class Animal {\n    +name", DiagramKind::Class, 2),
        ("erDiagram\n  CUSTOMER {\n    string id", DiagramKind::Er, 2),
        ("stateDiagram-v2\n  state Busy {\n    a --> b", DiagramKind::State, 2),
    ];

    for (input, dialect, line) in cases {
        let err = parse(input).unwrap_err();
        match &err {
            DiagramError::UnbalancedBlock {
                dialect: found,
                line: found_line,
                ..
            } => {
                assert_eq!(*found, dialect, "input {:?}", input);
                assert_eq!(*found_line, line, "input {:?}", input);
            }
            other => panic!("{:?} raised {:?}", input, other),
        }
        assert!(format!("{}", err).contains("never closed"));
    }
}

#[test]
fn test_stray_terminators() {
    let cases = [
        ("flowchart TD\n  a --> b\n  end", DiagramKind::Flowchart, 3),
        ("sequenceDiagram\n  A->>B: hi\n  end", DiagramKind::Sequence, 3),
        ("classDiagram\n  }", DiagramKind::Class, 2),
        ("erDiagram\n  }", DiagramKind::Er, 2),
        ("stateDiagram\n  [*] --> A\n  }", DiagramKind::State, 3),
    ];

    for (input, dialect, line) in cases {
        let err = parse(input).unwrap_err();
        assert!(
            matches!(err, DiagramError::UnbalancedBlock { .. }),
            "{:?} raised {:?}",
            input,
            err
        );
        assert_eq!(err.dialect(), Some(dialect));
        assert_eq!(err.line(), Some(line));
    }
}

#[test]
fn test_error_in_second_block_names_its_dialect() {
    let err = parse("flowchart LR\n  A --> B\nsequenceDiagram\n  opt maybe\n    A->>B: hi").unwrap_err();
    assert_eq!(err.dialect(), Some(DiagramKind::Sequence));
    assert_eq!(err.line(), Some(4));
}

#[test]
fn test_error_messages() {
    let error = DiagramError::parse_error(DiagramKind::Class, "Invalid syntax", 5, 10);
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Parse error"));
    assert!(error_msg.contains("Invalid syntax"));
    assert!(error_msg.contains("line 5"));
    assert!(error_msg.contains("column 10"));

    let error = DiagramError::too_deep(DiagramKind::State, 64, 70);
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Nesting too deep"));
    assert!(error_msg.contains("limit is 64"));
}

#[test]
fn test_errors_convert_to_anyhow() -> anyhow::Result<()> {
    let program = parse("gantt\n  Task : 1d")?;
    assert_eq!(program.body.len(), 1);

    let err: anyhow::Error = parse("nothing here").unwrap_err().into();
    assert!(err.downcast_ref::<DiagramError>().is_some());
    Ok(())
}
