//! This crate provides the input layer shared by all tessera parsers:
//! a buffered byte source with two refill strategies,
//! suited either to sources that always return all available data (files, memory)
//! or to sources that may return partial reads without being exhausted (network, pipes).
//!
//! It also provides gzip detection and an encoding check.

pub mod encoding;
pub mod gzip;
pub mod reader;
pub mod source;

pub use reader::{ParsingReader, ReaderError, ReaderOptions, SourceKind};
pub use source::{Blocking, BlockingReader, BufferedSource, CharSource, NonBlocking, NonBlockingReader};
