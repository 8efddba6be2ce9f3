use super::*;
use crate::error::MappingError;

fn bind(segment: &Segment, actual: &str) -> Bindings {
    let mut bindings = Bindings::new();
    segment.bind(&mut bindings, actual);
    bindings
}

#[test]
fn test_fixed_scores_exact_literal_only() {
    for literal in ["users", "v1", "a.b", "x-y_z", "ünïcödé"] {
        let seg = FixedSegment::new(literal).unwrap();
        assert_eq!(seg.score(literal), 1, "{literal}");
        assert_eq!(seg.score(&format!("{literal}x")), 0, "{literal}");
        assert_eq!(seg.score(""), 0);
    }
}

#[test]
fn test_fixed_rejects_empty_literal() {
    assert!(matches!(
        FixedSegment::new(""),
        Err(MappingError::InvalidTemplate { .. })
    ));
    assert!(FixedSegment::new("a/b").is_err());
}

#[test]
fn test_fixed_bind_is_noop() {
    let seg = Segment::parse("users").unwrap();
    assert!(seg.is_fixed());
    assert!(bind(&seg, "users").is_empty());
}

#[test]
fn test_variable_accepts_any_value_and_binds_it() {
    let seg = VariableSegment::new("{name}").unwrap();
    for value in ["5", "hello", "bob-5.json", "with space", "%20"] {
        assert_eq!(seg.score(value), 1, "{value}");
        let mut bindings = Bindings::new();
        seg.bind(&mut bindings, value);
        assert_eq!(bindings.get("name").map(String::as_str), Some(value));
    }
    assert_eq!(seg.score(""), 0);
    assert_eq!(seg.score("a/b"), 0);
}

#[test]
fn test_variable_bind_overwrites_previous_value() {
    let seg = VariableSegment::named("id").unwrap();
    let mut bindings = Bindings::new();
    seg.bind(&mut bindings, "1");
    seg.bind(&mut bindings, "2");
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings["id"], "2");
}

#[test]
fn test_variable_rejects_malformed_tokens() {
    for token in ["{}", "{id", "id}", "{a{b}}", "id", "{a}{b}", "{a}.json"] {
        assert!(
            matches!(
                VariableSegment::new(token),
                Err(MappingError::InvalidTemplate { .. })
            ),
            "{token} should be rejected"
        );
    }
}

#[test]
fn test_variable_name_must_be_identifier() {
    assert!(VariableSegment::named("user_id").is_ok());
    for name in ["a b", "a-b", "9lives", "x/y"] {
        assert!(
            matches!(
                VariableSegment::named(name),
                Err(MappingError::InvalidTemplate { ref reason, .. }) if reason.contains("identifier")
            ),
            "{name} should be rejected"
        );
    }
}

#[test]
fn test_parse_classifies_tokens() {
    assert!(matches!(Segment::parse("books").unwrap(), Segment::Fixed(_)));
    assert!(matches!(Segment::parse("{id}").unwrap(), Segment::Variable(_)));
    assert!(matches!(
        Segment::parse("{name}-{id}.json").unwrap(),
        Segment::Multi(_)
    ));
    assert!(matches!(Segment::parse("v{version}").unwrap(), Segment::Multi(_)));
}

#[test]
fn test_parse_rejects_bad_braces() {
    for token in ["{", "{}", "{id", "x}", "{a{b}}", "pre{}post", "{ id }", "v{a-b}.json"] {
        assert!(Segment::parse(token).is_err(), "{token}");
    }
}

#[test]
fn test_multi_sub_segments_alternate() {
    let seg = MultiSegment::new("{name}-{id}.json").unwrap();
    let rendered: Vec<String> = seg.sub_segments().iter().map(|s| s.to_string()).collect();
    assert_eq!(rendered, vec!["{name}", "-", "{id}", ".json"]);
    assert!(matches!(seg.sub_segments()[1], Segment::Fixed(_)));
    let names: Vec<&str> = seg.variable_names().collect();
    assert_eq!(names, vec!["name", "id"]);
}

#[test]
fn test_multi_leading_and_trailing_literals() {
    let seg = MultiSegment::new("v{major}.{minor}-beta").unwrap();
    let rendered: Vec<String> = seg.sub_segments().iter().map(|s| s.to_string()).collect();
    assert_eq!(rendered, vec!["v", "{major}", ".", "{minor}", "-beta"]);
}

#[test]
fn test_multi_matches_and_binds() {
    let seg = Segment::parse("{name}-{id}.json").unwrap();
    assert_eq!(seg.score("bob-5.json"), 1);
    let bindings = bind(&seg, "bob-5.json");
    assert_eq!(bindings["name"], "bob");
    assert_eq!(bindings["id"], "5");
}

#[test]
fn test_multi_date_segment() {
    let seg = Segment::parse("{year}-{month}-{day}").unwrap();
    let bindings = bind(&seg, "2024-06-01");
    assert_eq!(bindings["year"], "2024");
    assert_eq!(bindings["month"], "06");
    assert_eq!(bindings["day"], "01");
}

#[test]
fn test_multi_rejects_partial_matches() {
    let seg = Segment::parse("{name}-{id}.json").unwrap();
    assert_eq!(seg.score("bob-5.xml"), 0);
    assert_eq!(seg.score("-5.json"), 0);
    assert_eq!(seg.score("bob-.json"), 0);
    assert_eq!(seg.score("prefix/bob-5.json"), 0);
}

#[test]
fn test_multi_bind_without_match_is_noop() {
    let seg = Segment::parse("{name}-{id}.json").unwrap();
    let mut bindings = Bindings::new();
    bindings.insert("keep".into(), "me".into());
    seg.bind(&mut bindings, "nothing-here");
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings["keep"], "me");
}

#[test]
fn test_multi_adjacent_variables_leftmost_is_minimal() {
    let seg = Segment::parse("{a}{b}").unwrap();
    let bindings = bind(&seg, "xyz");
    assert_eq!(bindings["a"], "x");
    assert_eq!(bindings["b"], "yz");
}

#[test]
fn test_multi_earlier_variable_stops_at_first_literal() {
    let seg = Segment::parse("{name}-{id}.json").unwrap();
    let bindings = bind(&seg, "bob-smith-5.json");
    assert_eq!(bindings["name"], "bob");
    assert_eq!(bindings["id"], "smith-5");
}

#[test]
fn test_multi_literal_regex_metacharacters() {
    let seg = Segment::parse("{file}.(v{n})").unwrap();
    assert_eq!(seg.score("report.(v2)"), 1);
    assert_eq!(seg.score("reportX(v2)"), 0);
    let bindings = bind(&seg, "report.(v2)");
    assert_eq!(bindings["file"], "report");
    assert_eq!(bindings["n"], "2");
}

#[test]
fn test_multi_single_variable_is_legal() {
    let seg = MultiSegment::new("{only}").unwrap();
    assert_eq!(seg.sub_segments().len(), 1);
    assert_eq!(seg.score("anything"), 1);
}

#[test]
fn test_display_round_trips_template_text() {
    for token in ["users", "{id}", "{name}-{id}.json"] {
        assert_eq!(Segment::parse(token).unwrap().to_string(), token);
    }
}

#[test]
fn test_kind_names() {
    assert_eq!(Segment::parse("books").unwrap().kind(), "fixed");
    assert_eq!(Segment::parse("{id}").unwrap().kind(), "variable");
    assert_eq!(Segment::parse("{id}.json").unwrap().kind(), "multi");
}
