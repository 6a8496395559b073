//! Parser for the [SPARQL Query Results JSON Format](https://www.w3.org/TR/sparql11-results-json/).
//!
//! The whole document is deserialized before anything is emitted,
//! so errors detected while converting terms carry no location.
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::ops::ControlFlow;
use std::sync::Arc;
use tessera_api::binding::ResultBinding;
use tessera_api::handler::{run_results, ParseOutcome, ResultsHandler};
use tessera_api::iri::check_absolute_iri;
use tessera_api::parser::{Location, ResultsParser};
use tessera_api::term::{BnodeId, LanguageTag, Node};
use tessera_api::warning::WarningSink;
use tessera_io::encoding::check_encoding;
use tessera_io::ReaderOptions;

use crate::error::{Error, ErrorKind};

/// SPARQL JSON results parser.
#[derive(Clone, Debug, Default)]
pub struct SparqlJsonParser {
    reader: ReaderOptions,
}

impl SparqlJsonParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how the input is buffered.
    pub fn with_reader_options(mut self, reader: ReaderOptions) -> Self {
        self.reader = reader;
        self
    }
}

impl<R: Read> ResultsParser<R> for SparqlJsonParser {
    type Error = Error;

    fn load_with_warnings<H, W>(
        &self,
        handler: &mut H,
        input: R,
        warnings: &mut W,
    ) -> Result<ParseOutcome, Error>
    where
        H: ResultsHandler + ?Sized,
        W: WarningSink + ?Sized,
    {
        run_results(handler, |handler| {
            let mut reader = self.reader.open(input)?;
            check_encoding(&mut reader, warnings)?;
            let doc: ResultsDocument = serde_json::from_reader(reader)?;
            doc.emit(handler)
        })
    }
}

tessera_api::def_mod_functions_for_read_parser!(SparqlJsonParser, ResultsParser, ResultsHandler);

#[derive(Debug, Deserialize, PartialEq)]
#[serde(untagged)]
enum ResultsDocument {
    Boolean { head: Head, boolean: bool },
    Bindings { head: Head, results: Results },
}

#[derive(Debug, Deserialize, PartialEq)]
struct Head {
    #[serde(default)]
    vars: Vec<Box<str>>,
    #[serde(default)]
    link: Vec<Box<str>>,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Results {
    bindings: Vec<HashMap<Box<str>, Term>>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Term {
    Bnode {
        value: Box<str>,
    },
    Literal(Literal),
    /// Used by some older services instead of `literal` with a `datatype`.
    #[serde(rename = "typed-literal")]
    TypedLiteral {
        value: Box<str>,
        datatype: Box<str>,
    },
    Uri {
        value: Box<str>,
    },
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(untagged)]
enum Literal {
    Datatype {
        value: Box<str>,
        datatype: Box<str>,
    },
    Lang {
        value: Box<str>,
        #[serde(rename = "xml:lang")]
        lang: Box<str>,
    },
    Simple {
        value: Box<str>,
    },
}

impl ResultsDocument {
    fn emit<H: ResultsHandler + ?Sized>(self, handler: &mut H) -> Result<ControlFlow<()>, Error> {
        match self {
            ResultsDocument::Boolean { head, boolean } => {
                head.log_links();
                handler.handle_boolean_result(boolean);
                Ok(ControlFlow::Continue(()))
            }
            ResultsDocument::Bindings { head, results } => {
                head.log_links();
                let mut variables: Vec<Box<str>> = Vec::with_capacity(head.vars.len());
                for var in head.vars {
                    if variables.contains(&var) {
                        return Err(unlocated(ErrorKind::DuplicateVariable(var.into())));
                    }
                    if !handler.handle_variable(&var) {
                        return Ok(ControlFlow::Break(()));
                    }
                    variables.push(var);
                }
                let variables: Arc<[Box<str>]> = variables.into();
                for mut row in results.bindings {
                    let mut values = Vec::with_capacity(variables.len());
                    for var in variables.iter() {
                        let value = match row.remove(var) {
                            Some(term) => Some(term.into_node(&mut *handler)?),
                            None => None,
                        };
                        values.push(value);
                    }
                    if let Some(name) = row.keys().next() {
                        return Err(unlocated(ErrorKind::SparqlJson(format!(
                            "Undeclared variable {name:?} in bindings"
                        ))));
                    }
                    if !handler.handle_result(ResultBinding::new(variables.clone(), values)) {
                        return Ok(ControlFlow::Break(()));
                    }
                }
                Ok(ControlFlow::Continue(()))
            }
        }
    }
}

impl Head {
    fn log_links(&self) {
        for href in &self.link {
            log::debug!("ignoring link {:?}", href);
        }
    }
}

impl Term {
    fn into_node<H: ResultsHandler + ?Sized>(self, factory: &mut H) -> Result<Node, Error> {
        use self::Literal::{Datatype, Lang, Simple};
        match self {
            Term::Uri { value } => {
                check_absolute_iri(&value).map_err(|e| unlocated(e.into()))?;
                Ok(factory.create_uri_node(&value))
            }
            Term::Bnode { value } => {
                let id = BnodeId::new(value).map_err(|e| unlocated(e.into()))?;
                Ok(factory.create_blank_node(id))
            }
            Term::Literal(Simple { value }) => Ok(factory.create_literal_node(&value)),
            Term::Literal(Lang { value, lang }) => {
                let tag = LanguageTag::new(lang).map_err(|e| unlocated(e.into()))?;
                Ok(factory.create_lang_literal_node(&value, tag))
            }
            Term::Literal(Datatype { value, datatype }) | Term::TypedLiteral { value, datatype } => {
                check_absolute_iri(&datatype).map_err(|e| unlocated(e.into()))?;
                Ok(factory.create_typed_literal_node(&value, &datatype))
            }
        }
    }
}

fn unlocated(kind: ErrorKind) -> Error {
    Error::new(kind, Location::Unknown)
}
