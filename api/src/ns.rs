//! Standard namespaces used by the parsers.
//!
//! Terms are plain `&'static str` constants,
//! generated by the [`namespace`] macro.

/// Create a "namespace module"
/// defining a set of IRIs within a given IRI space.
///
/// # Tests
/// This macro also creates a test module to check that all created IRIs are valid.
#[macro_export]
macro_rules! namespace {
    ($iri_prefix:literal, $($suffix:ident),*; $($r_id:ident, $r_sf:literal),*) => {
        /// Prefix used in this namespace.
        pub const PREFIX: &str = $iri_prefix;
        $(
            /// Generated term.
            #[allow(non_upper_case_globals)]
            pub const $suffix: &str = concat!($iri_prefix, stringify!($suffix));
        )*
        $(
            /// Generated term.
            #[allow(non_upper_case_globals)]
            pub const $r_id: &str = concat!($iri_prefix, $r_sf);
        )*

    };
    ($iri_prefix:literal, $($suffix:ident),*) => {
        $crate::namespace!($iri_prefix, $($suffix),*;);
    };
}

/// The standard `rdf:` namespace.
pub mod rdf {
    namespace!(
        "http://www.w3.org/1999/02/22-rdf-syntax-ns#",
        first,
        langString,
        nil,
        rest,
        JSON,
        XMLLiteral;
        type_, "type"
    );
}

/// The standard `xsd:` namespace.
pub mod xsd {
    namespace!(
        "http://www.w3.org/2001/XMLSchema#",
        boolean,
        decimal,
        double,
        integer,
        string
    );
}
