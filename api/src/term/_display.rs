// this module is transparently re-exported by its parent `term`
//
// Implement the Display trait for Node, using the N-Triples syntax.

use std::fmt;

use super::*;

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Iri(iri) => write!(f, "<{}>", iri),
            Node::BlankNode(id) => write!(f, "_:{}", id.as_str()),
            Node::Literal(lit) => write!(f, "{}", lit),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        write_quoted_string(f, self.lexical_form())?;
        f.write_str("\"")?;
        match self.kind() {
            LiteralKind::Plain => Ok(()),
            LiteralKind::Lang(tag) => write!(f, "@{}", tag.as_str()),
            LiteralKind::Typed(dt) => write!(f, "^^<{}>", dt),
        }
    }
}

fn write_quoted_string(w: &mut impl fmt::Write, txt: &str) -> fmt::Result {
    let mut last = 0;
    for (pos, chr) in txt.char_indices() {
        let escaped = match chr {
            '\n' => "\\n",
            '\r' => "\\r",
            '"' => "\\\"",
            '\\' => "\\\\",
            _ => continue,
        };
        w.write_str(&txt[last..pos])?;
        w.write_str(escaped)?;
        last = pos + 1;
    }
    w.write_str(&txt[last..])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ns::xsd;
    use test_case::test_case;

    #[test_case(Node::iri("http://example.org/"), "<http://example.org/>"; "iri")]
    #[test_case(Node::from(BnodeId::new("b1").unwrap()), "_:b1"; "bnode")]
    #[test_case(Node::plain("a\"b\nc\\"), r#""a\"b\nc\\""#; "plain with escapes")]
    #[test_case(Node::lang("chat", LanguageTag::new("fr").unwrap()), r#""chat"@fr"#; "lang")]
    #[test_case(Node::typed("1", xsd::integer), r#""1"^^<http://www.w3.org/2001/XMLSchema#integer>"#; "typed")]
    fn display(node: Node, expected: &str) {
        assert_eq!(node.to_string(), expected);
    }
}
