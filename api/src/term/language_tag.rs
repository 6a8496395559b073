//! Language tags attached to literals.

use lazy_static::lazy_static;
use regex::Regex;
use std::cmp::Ordering;
use thiserror::Error;

/// A valid [BCP47](https://tools.ietf.org/search/bcp47) language tag.
///
/// Only the syntax is checked; subtags are not looked up in the IANA registry.
///
/// Comparison and hashing are case-insensitive.
#[derive(Clone, Debug)]
pub struct LanguageTag(Box<str>);

impl LanguageTag {
    /// Validates `tag` and wraps it.
    pub fn new<T: Into<Box<str>>>(tag: T) -> Result<Self, InvalidLanguageTag> {
        let tag = tag.into();
        if LANG_TAG.is_match(&tag) {
            Ok(LanguageTag(tag))
        } else {
            Err(InvalidLanguageTag(tag.into()))
        }
    }

    /// The tag as written in the source, with its original case.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn folded(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars().map(|c| c.to_ascii_lowercase())
    }
}

impl AsRef<str> for LanguageTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq for LanguageTag {
    fn eq(&self, other: &LanguageTag) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl PartialEq<str> for LanguageTag {
    fn eq(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl Eq for LanguageTag {}

impl PartialOrd for LanguageTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LanguageTag {
    fn cmp(&self, other: &LanguageTag) -> Ordering {
        self.folded().cmp(other.folded())
    }
}

impl std::hash::Hash for LanguageTag {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.folded().for_each(|c| c.hash(state));
    }
}

/// Returned by [`LanguageTag::new`] on a malformed tag.
#[derive(Debug, Error)]
#[error("invalid language tag '{0}'")]
pub struct InvalidLanguageTag(pub String);

lazy_static! {
    static ref LANG_TAG: Regex = Regex::new(LANG_TAG_SRC).unwrap();
}

/// Match a valid BCP47 language tag
pub static LANG_TAG_SRC: &str = r"(?xi-u)^
(
  (?:
    (?: #language
      (?:
        [A-Z]{2,3}
        (?: #extlang
          (?:
            -[A-Z]{3}
          ){0,3}
        )
      )
    |
      [A-Z]{4,8}
    )
    (?: #script
      -[A-Z]{4}
    )?
    (?: #region
      -
      (?:
        [A-Z]{2}
      |
        [0-9]{3}
      )
    )?
    (?: #variant
      -
      (?:
        [A-Z0-9]{5,8}
      |
        [0-9][A-Z0-9]{3}
      )
    )*
    (?: #extension
      -[0-9A-WY-Z]
      (?:
        -[A-Z0-9]{2,8}
      )+
    )*
    (?: #privateUse
      -X
      (?:
        -[A-Z0-9]{1,8}
      )+
    )?
  )
|
  (?: #privateUse
    X
    (?:
      -[A-Z0-9]{1,8}
    )+
  )
|
  (?: #grandfathered
    en-GB-oed|i-ami|i-bnn|i-default|i-enochian|i-hak|i-klingon|i-lux|i-mingo|i-navajo|i-pwn|i-tao|i-tay|i-tsu|sgn-BE-FR|sgn-BE-NL|sgn-CH-DE
    # NB regular grandfathered tags are not included,
    # as they will be matched by the normal case
  )
)$";
