//! API for parsing RDF and SPARQL results syntaxes.
//!
//! A parser is an immutable configuration value:
//! it does not hold any parsing state between two calls to `load`,
//! so the same parser can be shared by several threads parsing different inputs.
use crate::handler::{ParseOutcome, RdfHandler, ResultsHandler};
use crate::warning::{LogWarnings, WarningSink};

mod _location;
pub use _location::*;

/// A parser emitting triples or quads into an [`RdfHandler`].
pub trait RdfParser<R> {
    /// The error type returned when the input is not valid.
    type Error: std::error::Error + 'static;

    /// Parse `input` into `handler`, reporting recoverable anomalies to `warnings`.
    fn load_with_warnings<H, W>(
        &self,
        handler: &mut H,
        input: R,
        warnings: &mut W,
    ) -> Result<ParseOutcome, Self::Error>
    where
        H: RdfHandler + ?Sized,
        W: WarningSink + ?Sized;

    /// Parse `input` into `handler`, logging recoverable anomalies.
    fn load<H>(&self, handler: &mut H, input: R) -> Result<ParseOutcome, Self::Error>
    where
        H: RdfHandler + ?Sized,
    {
        self.load_with_warnings(handler, input, &mut LogWarnings)
    }
}

/// A parser emitting SPARQL results into a [`ResultsHandler`].
pub trait ResultsParser<R> {
    /// The error type returned when the input is not valid.
    type Error: std::error::Error + 'static;

    /// Parse `input` into `handler`, reporting recoverable anomalies to `warnings`.
    fn load_with_warnings<H, W>(
        &self,
        handler: &mut H,
        input: R,
        warnings: &mut W,
    ) -> Result<ParseOutcome, Self::Error>
    where
        H: ResultsHandler + ?Sized,
        W: WarningSink + ?Sized;

    /// Parse `input` into `handler`, logging recoverable anomalies.
    fn load<H>(&self, handler: &mut H, input: R) -> Result<ParseOutcome, Self::Error>
    where
        H: ResultsHandler + ?Sized,
    {
        self.load_with_warnings(handler, input, &mut LogWarnings)
    }
}

/// Define convenience module-level functions for a parser implementation
/// accepting any [`std::io::Read`] and having a [`Default`] configuration.
///
/// The first argument is the parser type,
/// the second is the parser trait (`RdfParser` or `ResultsParser`),
/// the third is the matching handler trait.
#[macro_export]
macro_rules! def_mod_functions_for_read_parser {
    ($parser_type: ident, $parser_trait: ident, $handler_trait: ident) => {
        /// Convenience function for parsing a reader with the default parser configuration.
        pub fn load_read<H, R>(
            handler: &mut H,
            input: R,
        ) -> Result<
            $crate::handler::ParseOutcome,
            <$parser_type as $crate::parser::$parser_trait<R>>::Error,
        >
        where
            H: $crate::handler::$handler_trait + ?Sized,
            R: ::std::io::Read,
        {
            $crate::parser::$parser_trait::load(&$parser_type::default(), handler, input)
        }

        /// Convenience function for parsing a str with the default parser configuration.
        pub fn load_str<'t, H>(
            handler: &mut H,
            txt: &'t str,
        ) -> Result<
            $crate::handler::ParseOutcome,
            <$parser_type as $crate::parser::$parser_trait<&'t [u8]>>::Error,
        >
        where
            H: $crate::handler::$handler_trait + ?Sized,
        {
            load_read(handler, txt.as_bytes())
        }
    };
}
