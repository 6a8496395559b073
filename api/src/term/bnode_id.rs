//! Blank node labels, as accepted by every parser of this workspace.
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Borrow;
use thiserror::Error;

lazy_static! {
    /// Turtle's [`BLANK_NODE_LABEL`](https://www.w3.org/TR/turtle/#grammar-production-BLANK_NODE_LABEL)
    /// minus the `_:` prefix.
    static ref BNODE_ID: Regex = Regex::new(r"(?x)
      ^
      [A-Za-z\u{c0}-\u{d6}\u{d8}-\u{f6}\u{f8}-\u{2ff}\u{370}-\u{37D}\u{37F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}_0-9]
      (
          [A-Za-z\u{c0}-\u{d6}\u{d8}-\u{f6}\u{f8}-\u{2ff}\u{370}-\u{37D}\u{37F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}_\u{2d}0-9\u{00B7}\u{0300}-\u{036F}\u{203F}-\u{2040}]
          |
          \u{2e} [A-Za-z\u{c0}-\u{d6}\u{d8}-\u{f6}\u{f8}-\u{2ff}\u{370}-\u{37D}\u{37F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}_\u{2d}0-9\u{00B7}\u{0300}-\u{036F}\u{203F}-\u{2040}]
      )*
      $
    ").unwrap();
}

/// The identifier of a blank node, without the leading `_:`.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub struct BnodeId(Box<str>);

impl BnodeId {
    /// Checks `id` against the label grammar.
    pub fn new<T: Into<Box<str>>>(id: T) -> Result<Self, InvalidBnodeId> {
        let id = id.into();
        if BNODE_ID.is_match(&id) {
            Ok(BnodeId(id))
        } else {
            Err(InvalidBnodeId(id.into()))
        }
    }

    /// Build a new [`BnodeId`] without checking `id`.
    ///
    /// Reserved to labels produced internally (e.g. `b42`),
    /// which are known to be valid.
    pub fn new_unchecked<T: Into<Box<str>>>(id: T) -> Self {
        let id = id.into();
        debug_assert!(BNODE_ID.is_match(&id));
        BnodeId(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for BnodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for BnodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Error)]
#[error("invalid blank node label '{0}'")]
pub struct InvalidBnodeId(pub String);

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    #[test_case("x")]
    #[test_case("_"; "underscore")]
    #[test_case("foo_bar_baz")]
    #[test_case("hé_hé")]
    #[test_case("1")]
    #[test_case("abc42")]
    #[test_case("a.b"; "with dot")]
    #[test_case("a-b"; "with dash")]
    fn valid(tag: &str) {
        assert!(BnodeId::new(tag).is_ok());
    }

    #[test_case(""; "empty")]
    #[test_case(" "; "space")]
    #[test_case("a."; "trailing dot")]
    #[test_case(".b"; "leading dot")]
    #[test_case("a,b"; "with comma")]
    #[test_case("a:b"; "with colon")]
    #[test_case("a b"; "with space")]
    fn invalid(tag: &str) {
        assert!(BnodeId::new(tag).is_err());
    }
}
