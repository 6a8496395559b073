use tessera_api::handler::{QuadCollector, StopAfter};
use tessera_api::parser::{RdfParser, WithLocation};
use tessera_api::prelude::Node;
use test_case::test_case;

use super::to_rdf::canonical_double;
use super::*;

fn nquads(src: &str, options: JsonLdOptions) -> (Vec<String>, Vec<String>) {
    let mut h = QuadCollector::new();
    let mut warnings: Vec<String> = vec![];
    let outcome = JsonLdParser::new_with_options(options)
        .load_with_warnings(&mut h, src.as_bytes(), &mut warnings)
        .unwrap();
    assert!(outcome.is_completed());
    let quads = h.quads.iter().map(|q| q.to_string()).collect();
    (quads, warnings)
}

fn triples(src: &str) -> Vec<String> {
    let (quads, warnings) = nquads(src, JsonLdOptions::new());
    assert!(warnings.is_empty(), "{warnings:?}");
    quads
}

#[test]
fn simple_node() {
    assert_eq!(
        triples(r#"[{"@id": "tag:foo", "tag:bar": [{"@value": "BAZ"}]}]"#),
        [r#"<tag:foo> <tag:bar> "BAZ" ."#]
    );
}

#[test]
fn load_str_uses_default_parser() {
    let mut h = QuadCollector::new();
    load_str(&mut h, r#"{"@id": "tag:foo", "@type": "tag:T"}"#).unwrap();
    assert_eq!(h.quads.len(), 1);
    assert_eq!(
        h.quads[0].to_string(),
        "<tag:foo> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <tag:T> ."
    );
}

#[test_case(r#"true"#, "\"true\"^^<http://www.w3.org/2001/XMLSchema#boolean>"; "boolean")]
#[test_case(r#"42"#, "\"42\"^^<http://www.w3.org/2001/XMLSchema#integer>"; "integer")]
#[test_case(r#"-3.0"#, "\"-3\"^^<http://www.w3.org/2001/XMLSchema#integer>"; "integral float")]
#[test_case(r#"1.5"#, "\"1.5E0\"^^<http://www.w3.org/2001/XMLSchema#double>"; "double")]
#[test_case(r#"1e21"#, "\"1.0E21\"^^<http://www.w3.org/2001/XMLSchema#double>"; "big double")]
#[test_case(r#""x", "@language": "en""#, "\"x\"@en"; "lang string")]
#[test_case(r#""x", "@type": "tag:dt""#, "\"x\"^^<tag:dt>"; "typed string")]
#[test_case(r#"7, "@type": "http://www.w3.org/2001/XMLSchema#double""#, "\"7.0E0\"^^<http://www.w3.org/2001/XMLSchema#double>"; "integer as double")]
#[test_case(r#"{"a": [1, null]}, "@type": "@json""#, "\"{\\\"a\\\":[1,null]}\"^^<http://www.w3.org/1999/02/22-rdf-syntax-ns#JSON>"; "json literal")]
fn native_values(value: &str, expected: &str) {
    let src = format!(r#"[{{"@id": "tag:s", "tag:p": [{{"@value": {value}}}]}}]"#);
    assert_eq!(triples(&src), [format!("<tag:s> <tag:p> {expected} .")]);
}

#[test_case(1.0, "1.0E0")]
#[test_case(0.5, "5.0E-1")]
#[test_case(123.456, "1.23456E2")]
#[test_case(-2e-7, "-2.0E-7")]
fn canonical_doubles(f: f64, expected: &str) {
    assert_eq!(canonical_double(f), expected);
}

#[test]
fn invalid_language_tag_is_skipped() {
    let (quads, warnings) = nquads(
        r#"[{"@id": "tag:s", "tag:p": [{"@value": "x", "@language": "not a tag"}]}]"#,
        JsonLdOptions::new(),
    );
    assert!(quads.is_empty());
    assert_eq!(warnings.len(), 1);
}

#[test]
fn lists() {
    let got = triples(
        r#"[{"@id": "tag:s", "tag:p": [{"@list": [{"@value": "a"}, {"@id": "tag:b"}]}]}]"#,
    );
    assert_eq!(
        got,
        [
            "<tag:s> <tag:p> _:b1 .",
            r#"_:b1 <http://www.w3.org/1999/02/22-rdf-syntax-ns#first> "a" ."#,
            "_:b1 <http://www.w3.org/1999/02/22-rdf-syntax-ns#rest> _:b2 .",
            "_:b2 <http://www.w3.org/1999/02/22-rdf-syntax-ns#first> <tag:b> .",
            "_:b2 <http://www.w3.org/1999/02/22-rdf-syntax-ns#rest> <http://www.w3.org/1999/02/22-rdf-syntax-ns#nil> .",
        ]
    );
}

#[test]
fn empty_list_is_nil() {
    assert_eq!(
        triples(r#"[{"@id": "tag:s", "tag:p": [{"@list": []}]}]"#),
        ["<tag:s> <tag:p> <http://www.w3.org/1999/02/22-rdf-syntax-ns#nil> ."]
    );
}

#[test]
fn named_graph() {
    let got = triples(
        r#"{"@id": "tag:g", "@graph": [{"@id": "tag:s", "tag:p": [{"@id": "tag:o"}]}]}"#,
    );
    assert_eq!(got, ["<tag:s> <tag:p> <tag:o> <tag:g> ."]);
}

#[test]
fn reverse_property() {
    let got = triples(r#"[{"@id": "tag:a", "@reverse": {"tag:knows": [{"@id": "tag:b"}]}}]"#);
    assert_eq!(got, ["<tag:b> <tag:knows> <tag:a> ."]);
}

#[test]
fn blank_nodes_are_relabelled() {
    let got = triples(r#"[{"@id": "_:alice", "tag:knows": [{"@id": "_:bob"}]}]"#);
    assert_eq!(got, ["_:b1 <tag:knows> _:b2 ."]);
}

#[test]
fn blank_predicate_is_skipped() {
    assert!(triples(r#"[{"@id": "tag:s", "_:p": [{"@value": "x"}]}]"#).is_empty());
}

#[test]
fn blank_predicate_in_generalized_rdf() {
    let options = JsonLdOptions::new().with_produce_generalized_rdf(true);
    let (quads, _) = nquads(r#"[{"@id": "tag:s", "_:p": [{"@value": "x"}]}]"#, options);
    assert_eq!(quads, [r#"<tag:s> _:b1 "x" ."#]);
}

#[test]
fn relative_iri_without_base() {
    let (quads, warnings) = nquads(
        r#"[{"@id": "foo", "tag:p": [{"@value": "x"}]}]"#,
        JsonLdOptions::new(),
    );
    assert!(quads.is_empty());
    assert_eq!(warnings.len(), 1);
}

#[test]
fn relative_iri_with_base() {
    let options = JsonLdOptions::new()
        .with_base("http://example.org/dir/")
        .unwrap();
    let (quads, warnings) = nquads(r#"[{"@id": "foo", "tag:p": [{"@id": "../bar"}]}]"#, options);
    assert!(warnings.is_empty());
    assert_eq!(
        quads,
        ["<http://example.org/dir/foo> <tag:p> <http://example.org/bar> ."]
    );
}

#[test]
fn context_is_ignored_with_warning() {
    let (quads, warnings) = nquads(
        r#"{"@context": {"name": "tag:name"}, "@id": "tag:s", "name": [{"@value": "x"}], "tag:p": [{"@value": 1}]}"#,
        JsonLdOptions::new(),
    );
    // "name" is a relative IRI, which is skipped
    assert_eq!(
        quads,
        [r#"<tag:s> <tag:p> "1"^^<http://www.w3.org/2001/XMLSchema#integer> ."#]
    );
    assert_eq!(warnings.len(), 2);
}

#[test]
fn stop_after_first_quad() {
    let src = r#"[{"@id": "tag:s", "tag:p": [{"@value": 1}, {"@value": 2}, {"@value": 3}]}]"#;
    let mut h = StopAfter::new(QuadCollector::new(), 1);
    let outcome = JsonLdParser::new().load(&mut h, src.as_bytes()).unwrap();
    assert!(!outcome.is_completed());
    assert_eq!(h.inner().quads.len(), 1);
    assert_eq!(h.end_calls(), 1);
}

#[test]
fn nodes_go_through_the_factory() {
    let mut h = QuadCollector::new();
    load_str(&mut h, r#"[{"@id": "tag:s", "tag:p": [{"@value": "x"}]}]"#).unwrap();
    assert_eq!(h.quads[0].s(), &Node::iri("tag:s"));
    assert_eq!(h.quads[0].o(), &Node::plain("x"));
}

#[test]
fn invalid_json_is_located() {
    let mut h = QuadCollector::new();
    let err = load_str(&mut h, "[\n  {\"@id\": }\n]").unwrap_err();
    assert!(matches!(err, JsonLdError::InvalidJson(_)));
    assert_eq!(err.location().line(), Some(2));
}

#[test]
fn scalar_document_is_rejected() {
    let mut h = QuadCollector::new();
    let err = load_str(&mut h, "42").unwrap_err();
    assert!(matches!(err, JsonLdError::NotExpanded(_)));
}
