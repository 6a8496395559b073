//! Parser for the [SPARQL Query Results XML Format](https://www.w3.org/TR/rdf-sparql-XMLres/).
use std::io::{BufRead, Read};
use std::ops::ControlFlow;
use std::sync::Arc;

use quick_xml::{
    events::{
        BytesStart,
        Event::{CData, Comment, Decl, Empty, End, Eof, Start, Text, PI},
    },
    name::{Namespace, QName, ResolveResult},
    NsReader,
};
use tessera_api::binding::ResultBinding;
use tessera_api::handler::{run_results, ParseOutcome, ResultsHandler};
use tessera_api::iri::check_absolute_iri;
use tessera_api::parser::{Location, ResultsParser};
use tessera_api::term::{BnodeId, LanguageTag, Node};
use tessera_api::warning::WarningSink;
use tessera_io::ReaderOptions;

use crate::error::{Error, ErrorKind};

const NS: Namespace = Namespace(b"http://www.w3.org/2005/sparql-results#");

/// SPARQL XML results parser.
#[derive(Clone, Debug, Default)]
pub struct SparqlXmlParser {
    reader: ReaderOptions,
}

impl SparqlXmlParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how the input is buffered.
    pub fn with_reader_options(mut self, reader: ReaderOptions) -> Self {
        self.reader = reader;
        self
    }
}

impl<R: Read> ResultsParser<R> for SparqlXmlParser {
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
            let reader = self.reader.open(input)?;
            XmlResultsReader::new(reader).parse(handler, warnings)
        })
    }
}

tessera_api::def_mod_functions_for_read_parser!(SparqlXmlParser, ResultsParser, ResultsHandler);

struct XmlResultsReader<R: BufRead> {
    events: NsReader<R>,
    buf: Vec<u8>,
}

/// An element of the document, with `leaf` set for `<empty/>` ones.
struct Child {
    start: BytesStart<'static>,
    leaf: bool,
}

impl<R: BufRead> XmlResultsReader<R> {
    fn new(data: R) -> Self {
        Self {
            events: NsReader::from_reader(data),
            buf: vec![],
        }
    }

    fn parse<H, W>(&mut self, handler: &mut H, warnings: &mut W) -> Result<ControlFlow<()>, Error>
    where
        H: ResultsHandler + ?Sized,
        W: WarningSink + ?Sized,
    {
        match self.expect_child("sparql", warnings)? {
            Some(root) if !root.leaf => (),
            _ => return Err(self.error("missing <sparql> root element".into())),
        }
        let Some(head) = self.expect_child("head", warnings)? else {
            return Err(self.error("missing <head>".into()));
        };
        let mut variables: Vec<Box<str>> = vec![];
        if !head.leaf {
            while let Some(child) = self.next_child(warnings)? {
                match self.sparql_name(&child.start) {
                    Some(b"variable") => {
                        let name = self.required_attr(&child.start, "name")?;
                        if variables.contains(&name) {
                            return Err(self.located(ErrorKind::DuplicateVariable(name.into())));
                        }
                        variables.push(name);
                    }
                    Some(b"link") => {
                        let href = self.required_attr(&child.start, "href")?;
                        log::debug!("ignoring <link href={:?}>", href);
                    }
                    _ => {
                        return Err(self.error(format!(
                            "unexpected element {:?} in <head>",
                            child.start.name()
                        )))
                    }
                }
                if !child.leaf {
                    self.skip_to_close(child.start.name())?;
                }
            }
        }
        for var in variables.iter() {
            if !handler.handle_variable(var) {
                return Ok(ControlFlow::Break(()));
            }
        }

        let Some(body) = self.next_child(warnings)? else {
            return Err(self.error("missing <results> or <boolean>".into()));
        };
        match self.sparql_name(&body.start) {
            Some(b"boolean") if variables.is_empty() => {
                let text = if body.leaf {
                    String::new()
                } else {
                    self.text_content()?
                };
                let value = match text.trim() {
                    "true" => true,
                    "false" => false,
                    other => {
                        return Err(self.located(ErrorKind::InvalidBoolean(other.to_string())))
                    }
                };
                handler.handle_boolean_result(value);
                Ok(ControlFlow::Continue(()))
            }
            Some(b"results") if body.leaf => Ok(ControlFlow::Continue(())),
            Some(b"results") => self.parse_rows(variables.into(), handler, warnings),
            _ => Err(self.error(format!(
                "expected <results> or <boolean>, found {:?}",
                body.start.name()
            ))),
        }
    }

    fn parse_rows<H, W>(
        &mut self,
        variables: Arc<[Box<str>]>,
        handler: &mut H,
        warnings: &mut W,
    ) -> Result<ControlFlow<()>, Error>
    where
        H: ResultsHandler + ?Sized,
        W: WarningSink + ?Sized,
    {
        while let Some(result) = self.expect_child("result", warnings)? {
            let mut values = vec![None; variables.len()];
            if !result.leaf {
                while let Some(binding) = self.expect_child("binding", warnings)? {
                    let name = self.required_attr(&binding.start, "name")?;
                    let Some(index) = variables.iter().position(|v| *v == name) else {
                        return Err(self.error(format!("undeclared variable '{name}' in <binding>")));
                    };
                    if values[index].is_some() {
                        return Err(self.error(format!("variable '{name}' bound twice in <result>")));
                    }
                    let term = match binding.leaf {
                        true => None,
                        false => self.next_child(warnings)?,
                    };
                    let Some(term) = term else {
                        return Err(self.error(format!("empty <binding name='{name}'>")));
                    };
                    values[index] = Some(self.parse_term(term, &name, &mut *handler)?);
                    self.skip_to_close(binding.start.name())?;
                }
            }
            if !handler.handle_result(ResultBinding::new(variables.clone(), values)) {
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn parse_term<H>(&mut self, term: Child, name: &str, factory: &mut H) -> Result<Node, Error>
    where
        H: ResultsHandler + ?Sized,
    {
        let kind = self.sparql_name(&term.start);
        let value = if term.leaf {
            String::new()
        } else {
            self.text_content()?
        };
        match kind {
            Some(b"uri") => {
                let iri = value.trim();
                check_absolute_iri(iri).map_err(|e| self.located(e.into()))?;
                Ok(factory.create_uri_node(iri))
            }
            Some(b"bnode") => {
                let id = BnodeId::new(value.trim()).map_err(|e| self.located(e.into()))?;
                Ok(factory.create_blank_node(id))
            }
            Some(b"literal") => {
                if let Some(lang) = self.attr(&term.start, "xml:lang")? {
                    let tag = LanguageTag::new(lang).map_err(|e| self.located(e.into()))?;
                    Ok(factory.create_lang_literal_node(&value, tag))
                } else if let Some(datatype) = self.attr(&term.start, "datatype")? {
                    check_absolute_iri(&datatype).map_err(|e| self.located(e.into()))?;
                    Ok(factory.create_typed_literal_node(&value, &datatype))
                } else {
                    Ok(factory.create_literal_node(&value))
                }
            }
            _ => Err(self.error(format!(
                "unrecognized term {:?} in <binding name='{name}'>",
                term.start.name()
            ))),
        }
    }

    /// The next child of the current element, or `None` once it is closed.
    ///
    /// Comments, processing instructions and blank text are skipped.
    fn next_child<W: WarningSink + ?Sized>(&mut self, warnings: &mut W) -> Result<Option<Child>, Error> {
        loop {
            self.buf.clear();
            match self.events.read_event_into(&mut self.buf)? {
                Start(s) => {
                    return Ok(Some(Child {
                        start: s.into_owned(),
                        leaf: false,
                    }))
                }
                Empty(s) => {
                    return Ok(Some(Child {
                        start: s.into_owned(),
                        leaf: true,
                    }))
                }
                End(_) | Eof => return Ok(None),
                Decl(decl) => {
                    if let Some(Ok(enc)) = decl.encoding() {
                        if !enc.eq_ignore_ascii_case(b"utf-8") {
                            warnings.warn(&format!(
                                "document declares encoding {:?}, but it is read as UTF-8",
                                String::from_utf8_lossy(&enc)
                            ));
                        }
                    }
                }
                Text(t) if !t.iter().all(u8::is_ascii_whitespace) => {
                    return Err(xml_error(&self.events, "unexpected text".into()))
                }
                _ => continue,
            }
        }
    }

    /// Like [`Self::next_child`], failing on any child not named `local_name`.
    fn expect_child<W: WarningSink + ?Sized>(
        &mut self,
        local_name: &str,
        warnings: &mut W,
    ) -> Result<Option<Child>, Error> {
        match self.next_child(warnings)? {
            Some(child) if self.sparql_name(&child.start) != Some(local_name.as_bytes()) => Err(
                self.error(format!("expected <{local_name}>, found {:?}", child.start.name())),
            ),
            other => Ok(other),
        }
    }

    /// Character data up to the end of the current element, unescaped and untrimmed.
    fn text_content(&mut self) -> Result<String, Error> {
        let mut text = String::new();
        loop {
            self.buf.clear();
            match self.events.read_event_into(&mut self.buf)? {
                Text(t) => text.push_str(&t.unescape()?),
                CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
                End(_) => return Ok(text),
                Start(_) | Empty(_) => {
                    return Err(xml_error(&self.events, "unexpected element in a term".into()))
                }
                Eof => return Err(xml_error(&self.events, "unexpected end of document".into())),
                _ => continue,
            }
        }
    }

    fn skip_to_close(&mut self, name: QName<'_>) -> Result<(), Error> {
        loop {
            self.buf.clear();
            match self.events.read_event_into(&mut self.buf)? {
                End(e) if e.name() == name => return Ok(()),
                Text(t) if t.iter().all(u8::is_ascii_whitespace) => continue,
                Comment(_) | PI(_) => continue,
                Eof => return Err(xml_error(&self.events, format!("unclosed element {name:?}"))),
                _ => return Err(xml_error(&self.events, format!("unexpected content in {name:?}"))),
            }
        }
    }

    fn sparql_name<'e>(&self, start: &'e BytesStart<'_>) -> Option<&'e [u8]> {
        match self.events.resolve_element(start.name()) {
            (ResolveResult::Bound(ns), local) if ns == NS => Some(local.into_inner()),
            _ => None,
        }
    }

    fn attr(&self, start: &BytesStart<'_>, key: &str) -> Result<Option<Box<str>>, Error> {
        let Some(attr) = start
            .try_get_attribute(key)
            .map_err(quick_xml::Error::from)?
        else {
            return Ok(None);
        };
        Ok(Some(attr.decode_and_unescape_value(self.events.decoder())?.into()))
    }

    fn required_attr(&self, start: &BytesStart<'_>, key: &str) -> Result<Box<str>, Error> {
        self.attr(start, key)?
            .ok_or_else(|| self.error(format!("missing attribute '{key}' on {:?}", start.name())))
    }

    fn located(&self, kind: ErrorKind) -> Error {
        Error::new(
            kind,
            Location::from_offset(self.events.buffer_position() as usize),
        )
    }

    fn error(&self, msg: String) -> Error {
        xml_error(&self.events, msg)
    }
}

fn xml_error<R>(events: &NsReader<R>, msg: String) -> Error {
    Error::new(
        ErrorKind::SparqlXml(msg),
        Location::from_offset(events.buffer_position() as usize),
    )
}
