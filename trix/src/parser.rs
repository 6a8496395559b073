//! Parser for TriX documents.
//!
//! The document is walked as a stream of XML events,
//! so a quad is handed to the handler as soon as its `</triple>` is read.
use std::collections::HashMap;
use std::io::{BufRead, Read};
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicUsize, Ordering};

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::{NsReader, Writer};
use tessera_api::handler::{keep_going, run_rdf, ParseOutcome, RdfHandler};
use tessera_api::iri::{parse_base, resolve_iri, InvalidIri, Iri};
use tessera_api::ns::rdf;
use tessera_api::parser::RdfParser;
use tessera_api::term::{BnodeId, LanguageTag, Node};
use tessera_api::triple::{Quad, Triple};
use tessera_api::warning::WarningSink;
use tessera_io::ReaderOptions;

use crate::error::{TrixError, TrixErrorKind};

/// The TriX namespace.
pub const TRIX_NS: &str = "http://www.w3.org/2004/03/trix/trix-1/";

const SNIPPET_MAX: usize = 80;

/// TriX parser.
#[derive(Clone, Debug, Default)]
pub struct TrixParser {
    /// The base IRI used by this parser to resolve relative IRI-references.
    pub base: Option<Iri<String>>,
    reader: ReaderOptions,
}

impl TrixParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base IRI used to resolve relative IRI-references.
    pub fn with_base(mut self, base: &str) -> Result<Self, InvalidIri> {
        self.base = Some(parse_base(base)?);
        Ok(self)
    }

    /// Set how the input is buffered.
    pub fn with_reader_options(mut self, reader: ReaderOptions) -> Self {
        self.reader = reader;
        self
    }
}

impl<R: Read> RdfParser<R> for TrixParser {
    type Error = TrixError;

    fn load_with_warnings<H, W>(
        &self,
        handler: &mut H,
        input: R,
        warnings: &mut W,
    ) -> Result<ParseOutcome, TrixError>
    where
        H: RdfHandler + ?Sized,
        W: WarningSink + ?Sized,
    {
        run_rdf(handler, |handler| {
            let reader = self.reader.open(input)?;
            TrixReader::new(reader, self.base.as_ref(), warnings).parse(handler)
        })
    }
}

tessera_api::def_mod_functions_for_read_parser!(TrixParser, RdfParser, RdfHandler);

/// Maps the text of `<id>` elements to blank node labels.
///
/// Labels carry a prefix unique to each parse,
/// so that nodes from different documents never share a label.
#[derive(Debug)]
struct BnodeLabels {
    prefix: String,
    labels: HashMap<String, BnodeId>,
}

static NEXT_DOCUMENT: AtomicUsize = AtomicUsize::new(0);

impl BnodeLabels {
    fn new() -> Self {
        let document = NEXT_DOCUMENT.fetch_add(1, Ordering::Relaxed);
        BnodeLabels {
            prefix: format!("t{document}b"),
            labels: HashMap::new(),
        }
    }

    fn get(&mut self, text: &str) -> BnodeId {
        let next = self.labels.len() + 1;
        let prefix = &self.prefix;
        self.labels
            .entry(text.to_string())
            .or_insert_with(|| BnodeId::new_unchecked(format!("{prefix}{next}")))
            .clone()
    }
}

/// The position of a node in a triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Segment {
    Subject,
    Predicate,
    Object,
}

impl Segment {
    fn expected(self) -> &'static str {
        match self {
            Segment::Subject => "<uri> or <id> as the subject of a triple",
            Segment::Predicate => "<uri> as the predicate of a triple",
            Segment::Object => {
                "<uri>, <id>, <plainLiteral> or <typedLiteral> as the object of a triple"
            }
        }
    }
}

/// A start (or empty) tag, with its namespace already resolved.
struct Element {
    start: BytesStart<'static>,
    local: String,
    in_ns: bool,
}

/// The XML events relevant to TriX; everything else is consumed by [`TrixReader::next_event`].
enum XmlEvent {
    Start(Element),
    Empty(Element),
    End,
    Text(String),
    Eof,
}

struct TrixReader<'a, R: BufRead, W: ?Sized> {
    events: NsReader<R>,
    buf: Vec<u8>,
    base: Option<&'a Iri<String>>,
    warnings: &'a mut W,
    snippet: String,
    bnodes: BnodeLabels,
}

impl<'a, R, W> TrixReader<'a, R, W>
where
    R: BufRead,
    W: WarningSink + ?Sized,
{
    fn new(data: R, base: Option<&'a Iri<String>>, warnings: &'a mut W) -> Self {
        TrixReader {
            events: NsReader::from_reader(data),
            buf: vec![],
            base,
            warnings,
            snippet: String::new(),
            bnodes: BnodeLabels::new(),
        }
    }

    fn parse<H: RdfHandler + ?Sized>(
        &mut self,
        handler: &mut H,
    ) -> Result<ControlFlow<()>, TrixError> {
        let (root, is_empty) = loop {
            match self.next_event()? {
                XmlEvent::Start(elt) => break (elt, false),
                XmlEvent::Empty(elt) => break (elt, true),
                XmlEvent::Text(txt) if txt.trim().is_empty() => continue,
                XmlEvent::Text(txt) => return Err(self.error(TrixErrorKind::UnexpectedText(txt))),
                XmlEvent::End => return Err(self.error(TrixErrorKind::UnexpectedEnd("<TriX>"))),
                XmlEvent::Eof => return Err(self.error(TrixErrorKind::UnexpectedEof)),
            }
        };
        self.check_root(&root)?;
        if !is_empty {
            while let Some((graph, is_empty)) = self.next_element()? {
                if self.parse_graph(graph, is_empty, handler)?.is_break() {
                    return Ok(ControlFlow::Break(()));
                }
            }
        }
        loop {
            match self.next_event()? {
                XmlEvent::Eof => return Ok(ControlFlow::Continue(())),
                XmlEvent::Text(txt) if txt.trim().is_empty() => continue,
                XmlEvent::Text(txt) => return Err(self.error(TrixErrorKind::UnexpectedText(txt))),
                XmlEvent::Start(elt) | XmlEvent::Empty(elt) => {
                    return Err(self.unexpected(elt, "the end of the document"))
                }
                XmlEvent::End => {
                    return Err(self.error(TrixErrorKind::UnexpectedEnd("the end of the document")))
                }
            }
        }
    }

    fn check_root(&mut self, root: &Element) -> Result<(), TrixError> {
        if root.local != "TriX" {
            return Err(self.error(TrixErrorKind::NotTrix(root.local.clone())));
        }
        match self.attr(root, "xmlns")? {
            None => Err(self.error(TrixErrorKind::MissingNamespace)),
            Some(ns) if ns != TRIX_NS => Err(self.error(TrixErrorKind::RootNamespace(ns))),
            Some(_) => Ok(()),
        }
    }

    fn parse_graph<H: RdfHandler + ?Sized>(
        &mut self,
        graph: Element,
        is_empty: bool,
        handler: &mut H,
    ) -> Result<ControlFlow<()>, TrixError> {
        self.check_ns(&graph)?;
        if graph.local != "graph" {
            return Err(self.unexpected(graph, "<graph>"));
        }
        if is_empty {
            return Ok(ControlFlow::Continue(()));
        }
        if let Some(asserted) = self.attr(&graph, "asserted")? {
            match asserted.trim() {
                "false" | "0" => {
                    log::debug!("skipping non-asserted TriX graph");
                    self.warnings.warn(
                        "A graph is marked as not asserted; it is skipped and its content is not preserved",
                    );
                    self.skip_to_end(&graph)?;
                    return Ok(ControlFlow::Continue(()));
                }
                "true" | "1" => {}
                other => self.warnings.warn(&format!(
                    "Invalid value {other:?} for the asserted attribute; the graph is considered asserted"
                )),
            }
        }
        let mut name: Option<Node> = None;
        let mut first = true;
        while let Some((child, is_empty)) = self.next_element()? {
            self.check_ns(&child)?;
            match child.local.as_str() {
                "uri" if first => {
                    let iri = self.text_content(is_empty)?;
                    let iri = self.resolve(iri.trim())?;
                    log::debug!("parsing TriX graph <{iri}>");
                    name = Some(handler.create_uri_node(&iri));
                }
                "id" if first => return Err(self.error(TrixErrorKind::GraphId)),
                "triple" if is_empty => {
                    return Err(self.error(TrixErrorKind::UnexpectedEnd(Segment::Subject.expected())))
                }
                "triple" => {
                    if self.parse_triple(name.as_ref(), handler)?.is_break() {
                        return Ok(ControlFlow::Break(()));
                    }
                }
                _ => return Err(self.unexpected(child, "<triple> or </graph>")),
            }
            first = false;
        }
        Ok(ControlFlow::Continue(()))
    }

    fn parse_triple<H: RdfHandler + ?Sized>(
        &mut self,
        graph: Option<&Node>,
        handler: &mut H,
    ) -> Result<ControlFlow<()>, TrixError> {
        let s = self.parse_node(Segment::Subject, handler)?;
        let p = self.parse_node(Segment::Predicate, handler)?;
        let o = self.parse_node(Segment::Object, handler)?;
        if let Some((extra, _)) = self.next_element()? {
            return Err(self.unexpected(extra, "</triple>"));
        }
        let triple = Triple::new(s, p, o).map_err(|e| self.error(e.into()))?;
        let quad = Quad::new(triple, graph.cloned()).map_err(|e| self.error(e.into()))?;
        Ok(keep_going(handler.handle_quad(quad)))
    }

    fn parse_node<H: RdfHandler + ?Sized>(
        &mut self,
        segment: Segment,
        factory: &mut H,
    ) -> Result<Node, TrixError> {
        let Some((elt, is_empty)) = self.next_element()? else {
            return Err(self.error(TrixErrorKind::UnexpectedEnd(segment.expected())));
        };
        self.check_ns(&elt)?;
        match elt.local.as_str() {
            "uri" => {
                let iri = self.text_content(is_empty)?;
                let iri = self.resolve(iri.trim())?;
                Ok(factory.create_uri_node(&iri))
            }
            "id" if segment == Segment::Predicate => Err(self.unexpected(elt, segment.expected())),
            "id" => {
                let text = self.text_content(is_empty)?;
                let id = self.bnodes.get(text.trim());
                Ok(factory.create_blank_node(id))
            }
            "plainLiteral" if segment == Segment::Subject => {
                Err(self.unexpected(elt, segment.expected()))
            }
            "plainLiteral" => {
                let lang = self.attr(&elt, "xml:lang")?;
                let lexical = self.text_content(is_empty)?;
                match lang {
                    Some(tag) if !tag.is_empty() => {
                        let tag = LanguageTag::new(tag).map_err(|e| self.error(e.into()))?;
                        Ok(factory.create_lang_literal_node(&lexical, tag))
                    }
                    _ => Ok(factory.create_literal_node(&lexical)),
                }
            }
            // accepted in any position; a literal subject is rejected when the triple is built
            "typedLiteral" => {
                let Some(datatype) = self.attr(&elt, "datatype")? else {
                    return Err(self.error(TrixErrorKind::MissingDatatype));
                };
                let datatype = self.resolve(datatype.trim())?;
                let lexical = if datatype == rdf::XMLLiteral {
                    self.inner_xml(is_empty)?
                } else {
                    self.text_content(is_empty)?
                };
                Ok(factory.create_typed_literal_node(&lexical, &datatype))
            }
            _ => Err(self.unexpected(elt, segment.expected())),
        }
    }

    /// The concatenated text and CDATA content of the current element, up to its end tag.
    fn text_content(&mut self, is_empty: bool) -> Result<String, TrixError> {
        let mut content = String::new();
        if is_empty {
            return Ok(content);
        }
        loop {
            match self.next_event()? {
                XmlEvent::Text(txt) => content.push_str(&txt),
                XmlEvent::End => return Ok(content),
                XmlEvent::Start(elt) | XmlEvent::Empty(elt) => {
                    return Err(self.unexpected(elt, "text content"))
                }
                XmlEvent::Eof => return Err(self.error(TrixErrorKind::UnexpectedEof)),
            }
        }
    }

    /// The content of the current element as written, markup included, up to its end tag.
    fn inner_xml(&mut self, is_empty: bool) -> Result<String, TrixError> {
        let mut writer = Writer::new(Vec::new());
        let mut depth = 0_usize;
        while !is_empty {
            self.buf.clear();
            let event = self
                .events
                .read_event_into(&mut self.buf)
                .map(Event::into_owned)
                .map_err(|e| self.error(e.into()))?;
            match &event {
                Event::End(_) if depth == 0 => break,
                Event::End(_) => depth -= 1,
                Event::Start(_) => depth += 1,
                Event::Eof => return Err(self.error(TrixErrorKind::UnexpectedEof)),
                _ => (),
            }
            writer
                .write_event(event)
                .map_err(|e| self.error(quick_xml::Error::from(e).into()))?;
        }
        Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
    }

    /// The next start or empty element (flagged `true` if empty),
    /// or `None` if an end tag comes first.
    ///
    /// Whitespace is skipped; any other text is an error.
    fn next_element(&mut self) -> Result<Option<(Element, bool)>, TrixError> {
        loop {
            match self.next_event()? {
                XmlEvent::Start(elt) => return Ok(Some((elt, false))),
                XmlEvent::Empty(elt) => return Ok(Some((elt, true))),
                XmlEvent::End => return Ok(None),
                XmlEvent::Text(txt) if txt.trim().is_empty() => continue,
                XmlEvent::Text(txt) => return Err(self.error(TrixErrorKind::UnexpectedText(txt))),
                XmlEvent::Eof => return Err(self.error(TrixErrorKind::UnexpectedEof)),
            }
        }
    }

    fn next_event(&mut self) -> Result<XmlEvent, TrixError> {
        loop {
            self.buf.clear();
            let event = self
                .events
                .read_event_into(&mut self.buf)
                .map(Event::into_owned)
                .map_err(|e| self.error(e.into()))?;
            match event {
                Event::Start(start) => return Ok(XmlEvent::Start(self.element(start))),
                Event::Empty(start) => return Ok(XmlEvent::Empty(self.element(start))),
                Event::End(_) => return Ok(XmlEvent::End),
                Event::Text(text) => {
                    let text = text.unescape().map_err(|e| self.error(e.into()))?;
                    return Ok(XmlEvent::Text(text.into_owned()));
                }
                Event::CData(data) => {
                    return Ok(XmlEvent::Text(String::from_utf8_lossy(&data).into_owned()))
                }
                Event::Decl(decl) => {
                    if let Some(Ok(enc)) = decl.encoding() {
                        if !enc.eq_ignore_ascii_case(b"utf-8") {
                            self.warnings.warn(&format!(
                                "Document declares encoding {:?}, but it is read as UTF-8",
                                String::from_utf8_lossy(&enc)
                            ));
                        }
                    }
                }
                Event::PI(pi) => {
                    if pi.starts_with(b"xml-stylesheet") {
                        self.warnings.warn(
                            "Stylesheets are not supported; the xml-stylesheet processing instruction is ignored",
                        );
                    }
                }
                Event::Eof => return Ok(XmlEvent::Eof),
                Event::Comment(_) | Event::DocType(_) => continue,
            }
        }
    }

    fn element(&mut self, start: BytesStart<'static>) -> Element {
        let (ns, local) = self.events.resolve_element(start.name());
        let in_ns = ns == ResolveResult::Bound(Namespace(TRIX_NS.as_bytes()));
        let local = String::from_utf8_lossy(local.as_ref()).into_owned();
        self.snippet = String::from_utf8_lossy(&start)
            .chars()
            .take(SNIPPET_MAX)
            .collect();
        self.snippet.insert(0, '<');
        self.snippet.push('>');
        Element {
            start,
            local,
            in_ns,
        }
    }

    fn skip_to_end(&mut self, elt: &Element) -> Result<(), TrixError> {
        self.buf.clear();
        match self.events.read_to_end_into(elt.start.name(), &mut self.buf) {
            Ok(_) => Ok(()),
            Err(e) => Err(self.error(e.into())),
        }
    }

    fn attr(&self, elt: &Element, key: &str) -> Result<Option<String>, TrixError> {
        for res in elt.start.attributes() {
            let attr = res.map_err(|e| self.error(quick_xml::Error::from(e).into()))?;
            if attr.key.as_ref() == key.as_bytes() {
                let value = attr
                    .decode_and_unescape_value(self.events.decoder())
                    .map_err(|e| self.error(e.into()))?;
                return Ok(Some(value.into_owned()));
            }
        }
        Ok(None)
    }

    fn check_ns(&self, elt: &Element) -> Result<(), TrixError> {
        if elt.in_ns {
            Ok(())
        } else {
            Err(self.error(TrixErrorKind::ForeignElement(elt.local.clone())))
        }
    }

    fn resolve(&self, iri: &str) -> Result<String, TrixError> {
        resolve_iri(self.base, iri).map_err(|e| self.error(e.into()))
    }

    fn unexpected(&self, elt: Element, expected: &'static str) -> TrixError {
        self.error(TrixErrorKind::UnexpectedElement {
            found: elt.local,
            expected,
        })
    }

    fn error(&self, kind: TrixErrorKind) -> TrixError {
        TrixError::new(
            kind,
            self.events.buffer_position() as usize,
            self.snippet.clone(),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tessera_api::handler::{NodeFactory, QuadCollector, StopAfter};
    use tessera_api::ns::xsd;
    use test_case::test_case;

    fn doc(graphs: &str) -> String {
        format!(
            r#"<?xml version="1.0"?>
            <TriX xmlns="http://www.w3.org/2004/03/trix/trix-1/">{graphs}</TriX>"#
        )
    }

    fn parse(src: &str) -> Result<(Vec<Quad>, Vec<String>), TrixError> {
        crate::test_setup();
        let mut collector = QuadCollector::new();
        let mut warnings: Vec<String> = vec![];
        TrixParser::new().load_with_warnings(&mut collector, src.as_bytes(), &mut warnings)?;
        Ok((collector.quads, warnings))
    }

    #[test]
    fn single_triple_in_default_graph() {
        let src = doc(
            "<graph><triple>
                <uri>http://example.org/s</uri>
                <uri>http://example.org/p</uri>
                <uri>http://example.org/o</uri>
            </triple></graph>",
        );
        let (quads, warnings) = parse(&src).unwrap();
        assert_eq!(quads.len(), 1);
        assert_eq!(quads[0].g(), None);
        assert_eq!(quads[0].s(), &Node::iri("http://example.org/s"));
        assert_eq!(quads[0].o(), &Node::iri("http://example.org/o"));
        assert!(warnings.is_empty());
    }

    #[test]
    fn named_graphs() {
        let src = doc(
            "<graph>
              <uri>http://example.org/g1</uri>
              <triple><id>x</id><uri>http://example.org/p</uri><plainLiteral xml:lang=\"en\">hello</plainLiteral></triple>
              <triple><id>x</id><uri>http://example.org/p</uri><typedLiteral datatype=\"http://www.w3.org/2001/XMLSchema#integer\">42</typedLiteral></triple>
            </graph>
            <graph>
              <uri>http://example.org/g2</uri>
              <triple><uri>http://example.org/s</uri><uri>http://example.org/p</uri><plainLiteral>bye</plainLiteral></triple>
            </graph>",
        );
        let (quads, _) = parse(&src).unwrap();
        assert_eq!(quads.len(), 3);
        let g1 = Node::iri("http://example.org/g1");
        assert_eq!(quads[0].g(), Some(&g1));
        assert_eq!(quads[1].g(), Some(&g1));
        assert_eq!(quads[2].g(), Some(&Node::iri("http://example.org/g2")));
        assert_eq!(quads[0].s(), quads[1].s());
        assert!(quads[0].s().is_blank_node());
        assert_eq!(
            quads[0].o(),
            &Node::lang("hello", LanguageTag::new("en").unwrap())
        );
        assert_eq!(quads[1].o(), &Node::typed("42", xsd::integer));
        assert_eq!(quads[2].o(), &Node::plain("bye"));
    }

    #[test_case("false")]
    #[test_case("0")]
    fn non_asserted_graph_is_skipped(asserted: &str) {
        let src = doc(&format!(
            "<graph asserted=\"{asserted}\"><triple>
                <uri>http://example.org/s</uri>
                <uri>http://example.org/p</uri>
                <uri>http://example.org/o</uri>
            </triple></graph>"
        ));
        let (quads, warnings) = parse(&src).unwrap();
        assert!(quads.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test_case("true")]
    #[test_case("1")]
    fn asserted_graph_is_parsed(asserted: &str) {
        let src = doc(&format!(
            "<graph asserted=\"{asserted}\"><triple>
                <uri>http://example.org/s</uri>
                <uri>http://example.org/p</uri>
                <uri>http://example.org/o</uri>
            </triple></graph>"
        ));
        let (quads, warnings) = parse(&src).unwrap();
        assert_eq!(quads.len(), 1);
        assert!(warnings.is_empty());
    }

    #[test]
    fn empty_graphs_are_ignored() {
        let (quads, _) = parse(&doc("<graph/><graph></graph><graph><uri>tag:g</uri></graph>")).unwrap();
        assert!(quads.is_empty());
        let (quads, _) = parse(r#"<TriX xmlns="http://www.w3.org/2004/03/trix/trix-1/"/>"#).unwrap();
        assert!(quads.is_empty());
    }

    #[test]
    fn empty_plain_literal() {
        let src = doc("<graph><triple><uri>tag:s</uri><uri>tag:p</uri><plainLiteral/></triple></graph>");
        let (quads, _) = parse(&src).unwrap();
        assert_eq!(quads[0].o(), &Node::plain(""));
    }

    #[test]
    fn literal_whitespace_and_cdata_are_kept() {
        let src = doc(
            "<graph><triple><uri>tag:s</uri><uri>tag:p</uri>\
             <typedLiteral datatype=\"tag:dt\"> a <![CDATA[<b>]]> &amp; </typedLiteral>\
             </triple></graph>",
        );
        let (quads, _) = parse(&src).unwrap();
        assert_eq!(quads[0].o(), &Node::typed(" a <b> & ", "tag:dt"));
    }

    #[test]
    fn relative_iris_are_resolved_against_base() {
        let src = doc("<graph><triple><uri>s</uri><uri>#p</uri><typedLiteral datatype=\"dt\">x</typedLiteral></triple></graph>");
        let parser = TrixParser::new().with_base("http://example.org/doc").unwrap();
        let mut collector = QuadCollector::new();
        parser.load(&mut collector, src.as_bytes()).unwrap();
        let q = &collector.quads[0];
        assert_eq!(q.s(), &Node::iri("http://example.org/s"));
        assert_eq!(q.p(), &Node::iri("http://example.org/doc#p"));
        assert_eq!(q.o(), &Node::typed("x", "http://example.org/dt"));
        // without a base, relative IRIs are rejected
        let err = parse(&src).unwrap_err();
        assert!(matches!(err.kind(), TrixErrorKind::InvalidIri(_)));
    }

    #[test]
    fn missing_xmlns() {
        let src = r#"<t:TriX xmlns:t="http://www.w3.org/2004/03/trix/trix-1/"/>"#;
        let err = parse(src).unwrap_err();
        assert!(matches!(err.kind(), TrixErrorKind::MissingNamespace));
    }

    #[test]
    fn wrong_xmlns() {
        let err = parse(r#"<TriX xmlns="http://example.org/"/>"#).unwrap_err();
        assert!(matches!(err.kind(), TrixErrorKind::RootNamespace(ns) if ns == "http://example.org/"));
    }

    #[test]
    fn wrong_root() {
        let err = parse(r#"<RDF xmlns="http://www.w3.org/2004/03/trix/trix-1/"/>"#).unwrap_err();
        assert!(matches!(err.kind(), TrixErrorKind::NotTrix(name) if name == "RDF"));
    }

    #[test]
    fn foreign_element() {
        let src = doc("<graph><triple><x:uri xmlns:x=\"tag:\">tag:s</x:uri></triple></graph>");
        let err = parse(&src).unwrap_err();
        assert!(matches!(err.kind(), TrixErrorKind::ForeignElement(_)));
    }

    #[test_case("<id>b</id><id>p</id><uri>tag:o</uri>"; "id predicate")]
    #[test_case("<plainLiteral>s</plainLiteral><uri>tag:p</uri><uri>tag:o</uri>"; "literal subject")]
    #[test_case("<uri>tag:s</uri><uri>tag:p</uri><foo/>"; "unknown element")]
    #[test_case("<uri>tag:s</uri><uri>tag:p</uri><uri>tag:o</uri><uri>tag:x</uri>"; "four nodes")]
    fn unexpected_element(nodes: &str) {
        let src = doc(&format!("<graph><triple>{nodes}</triple></graph>"));
        let err = parse(&src).unwrap_err();
        assert!(
            matches!(err.kind(), TrixErrorKind::UnexpectedElement { .. }),
            "{err}"
        );
    }

    #[test]
    fn too_few_nodes() {
        let src = doc("<graph><triple><uri>tag:s</uri><uri>tag:p</uri></triple></graph>");
        let err = parse(&src).unwrap_err();
        assert!(matches!(err.kind(), TrixErrorKind::UnexpectedEnd(_)));
    }

    #[test]
    fn typed_literal_subject_is_rejected_when_building_the_triple() {
        let src = doc(
            "<graph><triple><typedLiteral datatype=\"tag:dt\">s</typedLiteral><uri>tag:p</uri><uri>tag:o</uri></triple></graph>",
        );
        let err = parse(&src).unwrap_err();
        assert!(matches!(err.kind(), TrixErrorKind::InvalidTriple(_)));
    }

    #[test]
    fn missing_datatype() {
        let src = doc("<graph><triple><uri>tag:s</uri><uri>tag:p</uri><typedLiteral>o</typedLiteral></triple></graph>");
        let err = parse(&src).unwrap_err();
        assert!(matches!(err.kind(), TrixErrorKind::MissingDatatype));
        assert!(err.snippet().starts_with("<typedLiteral"));
        assert!(err.offset() > 0);
    }

    #[test]
    fn graph_named_by_id() {
        let src = doc("<graph><id>g</id></graph>");
        let err = parse(&src).unwrap_err();
        assert!(matches!(err.kind(), TrixErrorKind::GraphId));
    }

    #[test]
    fn stylesheet_and_encoding_warnings() {
        let src = r#"<?xml version="1.0" encoding="ISO-8859-1"?>
            <?xml-stylesheet type="text/xsl" href="extension.xsl"?>
            <TriX xmlns="http://www.w3.org/2004/03/trix/trix-1/"/>"#;
        let (_, warnings) = parse(src).unwrap();
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn stop_after_first_quad() {
        let src = doc(
            "<graph>
              <triple><uri>tag:s</uri><uri>tag:p</uri><uri>tag:o1</uri></triple>
              <triple><uri>tag:s</uri><uri>tag:p</uri><uri>tag:o2</uri></triple>
            </graph>",
        );
        let mut h = StopAfter::new(QuadCollector::new(), 1);
        let outcome = load_str(&mut h, &src).unwrap();
        assert_eq!(outcome, ParseOutcome::StoppedByHandler);
        assert_eq!(h.inner().quads.len(), 1);
        assert_eq!(h.end_calls(), 1);
    }

    #[derive(Default)]
    struct Ends(Vec<bool>);

    impl NodeFactory for Ends {}

    impl RdfHandler for Ends {
        fn end_rdf(&mut self, ok: bool) {
            self.0.push(ok);
        }

        fn handle_quad(&mut self, _quad: Quad) -> bool {
            true
        }
    }

    #[test]
    fn end_rdf_false_on_error() {
        let mut h = Ends::default();
        assert!(load_str(&mut h, "<TriX>").is_err());
        assert_eq!(h.0, [false]);
    }

    #[test_case("node 1"; "with a space")]
    #[test_case("genid:42"; "with a colon")]
    #[test_case("42"; "numeric")]
    #[test_case(""; "empty")]
    fn id_text_is_free(id: &str) {
        let src = doc(&format!(
            "<graph>
              <triple><id>{id}</id><uri>tag:p</uri><uri>tag:o1</uri></triple>
              <triple><uri>tag:s</uri><uri>tag:p</uri><id>{id}</id></triple>
              <triple><id>other</id><uri>tag:p</uri><uri>tag:o2</uri></triple>
            </graph>"
        ));
        let (quads, _) = parse(&src).unwrap();
        assert!(quads[0].s().is_blank_node());
        assert_eq!(quads[0].s(), quads[1].o());
        assert_ne!(quads[0].s(), quads[2].s());
    }

    #[test]
    fn ids_are_scoped_to_one_document() {
        let src = doc("<graph><triple><id>x</id><uri>tag:p</uri><uri>tag:o</uri></triple></graph>");
        let mut collector = QuadCollector::new();
        load_str(&mut collector, &src).unwrap();
        load_str(&mut collector, &src).unwrap();
        assert_eq!(collector.quads.len(), 2);
        assert_ne!(collector.quads[0].s(), collector.quads[1].s());
    }

    #[test]
    fn xml_literal_keeps_its_markup() {
        let src = doc(
            "<graph><triple><uri>tag:s</uri><uri>tag:p</uri>\
             <typedLiteral datatype=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#XMLLiteral\">\
             <b xmlns=\"http://www.w3.org/1999/xhtml\">bold<br/></b> &amp; more</typedLiteral>\
             </triple></graph>",
        );
        let (quads, _) = parse(&src).unwrap();
        assert_eq!(
            quads[0].o(),
            &Node::typed(
                r#"<b xmlns="http://www.w3.org/1999/xhtml">bold<br/></b> &amp; more"#,
                rdf::XMLLiteral
            )
        );
    }

    #[test]
    fn markup_in_other_typed_literals_is_rejected() {
        let src = doc(
            "<graph><triple><uri>tag:s</uri><uri>tag:p</uri>\
             <typedLiteral datatype=\"tag:dt\"><b>x</b></typedLiteral></triple></graph>",
        );
        let err = parse(&src).unwrap_err();
        assert!(matches!(err.kind(), TrixErrorKind::UnexpectedElement { .. }));
    }
}
