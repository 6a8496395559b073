//! IRI checks and resolution, on top of [`oxiri`].
pub use oxiri::Iri;
use oxiri::IriParseError;
use thiserror::Error;

/// Whether `txt` is a valid absolute IRI.
pub fn is_absolute_iri(txt: &str) -> bool {
    Iri::parse(txt).is_ok()
}

/// Check that `txt` is a valid absolute IRI.
pub fn check_absolute_iri(txt: &str) -> Result<(), InvalidIri> {
    Iri::parse(txt)
        .map(|_| ())
        .map_err(|e| InvalidIri(txt.to_string(), e.to_string()))
}

/// Resolve `relative` against `base`, if any.
///
/// Without a base, `relative` is only accepted if it is already absolute.
pub fn resolve_iri(base: Option<&Iri<String>>, relative: &str) -> Result<String, InvalidIri> {
    let res = match base {
        Some(base) => base.resolve(relative).map(Iri::into_inner),
        None => Iri::parse(relative.to_string()).map(Iri::into_inner),
    };
    res.map_err(|e: IriParseError| InvalidIri(relative.to_string(), e.to_string()))
}

/// Parse a base IRI.
pub fn parse_base(base: &str) -> Result<Iri<String>, InvalidIri> {
    Iri::parse(base.to_string()).map_err(|e| InvalidIri(base.to_string(), e.to_string()))
}

/// This error is raised when a string is not a valid (absolute) IRI.
#[derive(Debug, Error)]
#[error("The given IRI '{0}' is not valid: {1}")]
pub struct InvalidIri(pub String, pub String);

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    #[test_case("http://example.org/", true)]
    #[test_case("urn:isbn:123", true)]
    #[test_case("mailto:someone@example.org", true)]
    #[test_case("foo/bar", false; "relative")]
    #[test_case("http://exa mple.org/", false; "space")]
    fn absolute(txt: &str, expected: bool) {
        assert_eq!(is_absolute_iri(txt), expected);
    }

    #[test]
    fn resolve_with_base() {
        let base = parse_base("http://example.org/a/b").unwrap();
        assert_eq!(
            resolve_iri(Some(&base), "../c").unwrap(),
            "http://example.org/c"
        );
    }

    #[test]
    fn resolve_without_base() {
        assert!(resolve_iri(None, "c").is_err());
        assert_eq!(resolve_iri(None, "http://x.org/").unwrap(), "http://x.org/");
    }
}
