//! Parse → generate → parse over fixtures for every dialect

use diagram_ast::prelude::*;
use diagram_ast::{generate, generate_code, generate_with_config, parse};

const FIXTURES: [(&str, &str); 6] = [
    (
        "flowchart",
        "graph LR\n  A[Start] -->|go| B{Decide}\n  B -- yes --> C([Done])\n  B -.-> D\n  subgraph g [Group]\n    direction TB\n    C ==> E\n  end\n  classDef hot fill:#f96\n  class A,B hot\n  style D fill:#bbf\n  linkStyle 0 stroke:red",
    ),
    (
        "sequence",
        "sequenceDiagram\n  participant A as Alice\n  A->>B: req\n  alt ok\n    B-->>A: yes\n  else fail\n    B--xA: no\n  end\n  critical connect\n    A-)B: open\n  option timeout\n    A->>A: retry\n  end\n  opt cached\n    B-->>A: hit\n  end\n  break quota exceeded\n    B-xA: refused\n    loop backoff\n      A->>B: ping\n    end\n  end\n  Note right of B: thinking",
    ),
    (
        "class",
        "classDiagram\n  class Animal {\n    <<abstract>>\n    +String name\n    +eat(food) bool\n  }\n  Animal <|-- Dog\n  Dog \"1\" *-- \"4\" Leg : has\n  Dog : +bark() void",
    ),
    (
        "er",
        "erDiagram\n  CUSTOMER ||--o{ ORDER : places\n  ORDER ||--|{ LINE_ITEM : contains\n  CUSTOMER {\n    string id PK\n    string email UK \"login\"\n  }\n  \"DELIVERY ADDRESS\" }|..|| CUSTOMER : \"ships to\"",
    ),
    (
        "state",
        "stateDiagram-v2\n  [*] --> Still\n  Still --> Moving : push\n  state Moving {\n    [*] --> Slow\n    Slow --> Fast\n  }\n  state fork_state <<fork>>\n  Moving --> [*]\n  note left of Still : resting",
    ),
    (
        "gantt",
        "gantt\n  title Launch\n  dateFormat YYYY-MM-DD\n  section Plan\n  Scope :done, p1, 2024-01-01, 2d\n  Review :crit, after p1, 1d\n  section Build\n  Code : 5d",
    ),
];

#[test]
fn test_round_trip_preserves_structure() {
    for (name, input) in FIXTURES {
        let first = parse(input).unwrap();
        let text = generate_code(&first);
        let second = parse(&text).unwrap_or_else(|err| panic!("{} regenerated badly: {}\n{}", name, err, text));

        assert_eq!(second.kinds(), first.kinds(), "{}", name);
        assert_eq!(
            second.body[0].outline(),
            first.body[0].outline(),
            "{} changed shape:\n{}",
            name,
            text
        );
        assert_eq!(
            second.body[0].statement_count(),
            first.body[0].statement_count(),
            "{}",
            name
        );
    }
}

#[test]
fn test_opt_and_break_blocks_survive_regeneration() {
    let program = parse(FIXTURES[1].1).unwrap();
    let text = generate_code(&program);
    assert!(text.contains("    opt cached\n"), "{}", text);
    assert!(text.contains("    break quota exceeded\n"), "{}", text);

    let second = parse(&text).unwrap();
    let kinds: Vec<_> = second.body[0]
        .outline()
        .children
        .iter()
        .map(|child| child.kind)
        .collect();
    assert!(kinds.contains(&"opt"), "{:?}", kinds);
    assert!(kinds.contains(&"break"), "{:?}", kinds);
}

#[test]
fn test_regeneration_is_idempotent() {
    for (name, input) in FIXTURES {
        let first = parse(input).unwrap();
        let second = parse(&generate_code(&first)).unwrap();
        let third = parse(&generate_code(&second))
            .unwrap_or_else(|err| panic!("{} failed on second pass: {}", name, err));
        assert_eq!(third.body[0].outline(), first.body[0].outline(), "{}", name);
    }
}

#[test]
fn test_whole_document_round_trip() {
    let document = FIXTURES
        .iter()
        .map(|(_, input)| *input)
        .collect::<Vec<_>>()
        .join("\n");
    let first = parse(&document).unwrap();
    assert_eq!(first.kinds(), DiagramKind::ALL.to_vec());

    let second = parse(&generate_code(&first)).unwrap();
    let outlines = |program: &Program| program.body.iter().map(|d| d.outline()).collect::<Vec<_>>();
    assert_eq!(outlines(&second), outlines(&first));
}

#[test]
fn test_indentation_does_not_change_structure() {
    let program = parse(FIXTURES[1].1).unwrap();
    let narrow = generate_with_config(&program.body[0], &GenerateConfig::default().with_indent(1));
    let wide = generate(&program.body[0]);
    assert_ne!(narrow, wide);
    assert_eq!(
        parse(&narrow).unwrap().body[0].outline(),
        parse(&wide).unwrap().body[0].outline()
    );
}

#[test]
fn test_legacy_sequence_generation_drops_statements() {
    let input = "sequenceDiagram\n  autonumber\n  activate A\n  A->>B: hi\n  deactivate A";
    let program = parse(input).unwrap();
    let legacy = GenerateConfig::default().drop_unsupported_sequence_statements(true);

    let full = parse(&generate(&program.body[0])).unwrap();
    let dropped = parse(&generate_with_config(&program.body[0], &legacy)).unwrap();
    assert_eq!(full.body[0].statement_count(), 4);
    assert_eq!(dropped.body[0].statement_count(), 1);
}
