//! A JSON-LD parser, emitting quads into an [`RdfHandler`].

use std::io::Read;

use tessera_api::handler::{run_rdf, ParseOutcome, RdfHandler};
use tessera_api::parser::RdfParser;
use tessera_api::warning::WarningSink;
use tessera_io::encoding::check_encoding;

use crate::{AlreadyExpanded, Expander, JsonLdError, JsonLdOptions};

use self::bnode_gen::BNodeGen;
use self::node_map::generate_node_map;
use self::to_rdf::RdfEmitter;

pub mod bnode_gen;
pub mod node_map;
mod to_rdf;
#[cfg(test)]
mod test;

/// A JSON-LD parser.
///
/// ## Developers
///
/// * the generic parameter `E` is the type of the [`Expander`]
///   turning the parsed JSON into expanded form
#[derive(Clone, Debug)]
pub struct JsonLdParser<E = AlreadyExpanded> {
    options: JsonLdOptions,
    expander: E,
}

impl Default for JsonLdParser<AlreadyExpanded> {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonLdParser<AlreadyExpanded> {
    /// Make a new [`JsonLdParser`] with the default options
    pub fn new() -> Self {
        JsonLdParser {
            options: JsonLdOptions::default(),
            expander: AlreadyExpanded,
        }
    }

    /// Make a new [`JsonLdParser`] with the given options
    pub fn new_with_options(options: JsonLdOptions) -> Self {
        JsonLdParser {
            options,
            expander: AlreadyExpanded,
        }
    }
}

impl<E> JsonLdParser<E> {
    /// Borrow the options of this parser
    pub fn options(&self) -> &JsonLdOptions {
        &self.options
    }

    /// Change the options of this parser
    pub fn with_options(mut self, options: JsonLdOptions) -> Self {
        self.options = options;
        self
    }

    /// Change the [`Expander`] of this parser
    pub fn with_expander<E2: Expander>(self, expander: E2) -> JsonLdParser<E2> {
        JsonLdParser {
            options: self.options,
            expander,
        }
    }
}

impl<R: Read, E: Expander> RdfParser<R> for JsonLdParser<E> {
    type Error = JsonLdError;

    fn load_with_warnings<H, W>(
        &self,
        handler: &mut H,
        input: R,
        warnings: &mut W,
    ) -> Result<ParseOutcome, JsonLdError>
    where
        H: RdfHandler + ?Sized,
        W: WarningSink + ?Sized,
    {
        run_rdf(handler, |handler| {
            let mut reader = self.options.reader().open(input)?;
            check_encoding(&mut reader, warnings)?;
            let document = serde_json::from_reader(reader)?;
            let expanded = self.expander.expand(document, warnings)?;
            let mut bnodes = BNodeGen::new();
            let node_map = generate_node_map(&expanded, &mut bnodes)?;
            log::debug!(
                "JSON-LD node map has {} graph(s), {} node(s)",
                node_map.len(),
                node_map.values().map(|g| g.len()).sum::<usize>()
            );
            let mut emitter = RdfEmitter::new(&self.options, &mut bnodes, handler, warnings);
            Ok(emitter.emit(&node_map))
        })
    }
}

tessera_api::def_mod_functions_for_read_parser!(JsonLdParser, RdfParser, RdfHandler);
