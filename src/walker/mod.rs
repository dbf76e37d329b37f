//! Streaming schema walker
//!
//! Consumes the token stream of one schema file and builds its
//! [`ProtoTree`]. Every start tag pushes a [`Frame`](builders::Frame) onto a
//! single context stack; constructs that accumulate state also push a builder
//! onto the stack for their kind. The matching end tag pops the frame, and
//! the frame says which builder (if any) to finalize, so closing is a
//! structural pop rather than a name comparison.
//!
//! Handlers live in [`simple`] (simple types and their facets) and
//! [`content`] (complex types, elements, attributes, groups).

mod builders;
mod content;
mod kind;
mod simple;

use crate::builtins::{self, Language};
use crate::error::{Error, ParseError, Result};
use crate::hooks::{Flow, ParseContext};
use crate::namespaces::NamespaceResolver;
use crate::proto::{self, NodeKind, ProtoTree, SchemaNode};
use crate::reader::{EndTag, SchemaReader, StartTag, Token};
use crate::resolver::{self, Scope};
use crate::session::Session;
use crate::stack::Stack;
use builders::{AttributeBuilder, ElementBuilder, Frame, SimpleTypeBuilder};
use kind::ElementKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, trace, warn};

/// How a file is being parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseMode {
    /// Resolve references across files and hand the result to the emitter
    Full,
    /// Harvest type information only: no file I/O, no emission
    Extract,
}

/// Where a nested construct goes when it closes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Owner {
    /// The innermost open builder of a wanted kind
    Open(NodeKind),
    /// A hook vetoed the container it belongs to; drop it
    Vetoed,
    /// Nothing encloses it: a top-level declaration
    Schema,
}

/// Per-file parser state. Never shared between files.
pub(crate) struct Walker<'s> {
    session: &'s mut Session,
    path: PathBuf,
    dir: PathBuf,
    mode: ParseMode,
    import_depth: usize,
    position: usize,

    namespaces: NamespaceResolver,
    tree: ProtoTree,
    /// References that fell back to their local name
    unresolved: Vec<String>,

    frames: Stack<Frame>,
    simple_types: Stack<SimpleTypeBuilder>,
    complex_types: Stack<proto::ComplexType>,
    elements: Stack<ElementBuilder>,
    attributes: Stack<AttributeBuilder>,
    groups: Stack<proto::Group>,
    attribute_groups: Stack<proto::AttributeGroup>,
}

impl<'s> Walker<'s> {
    pub(crate) fn new(
        session: &'s mut Session,
        path: &Path,
        mode: ParseMode,
        import_depth: usize,
    ) -> Self {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self {
            session,
            path: path.to_path_buf(),
            dir,
            mode,
            import_depth,
            position: 0,
            namespaces: NamespaceResolver::new(),
            tree: ProtoTree::new(),
            unresolved: Vec::new(),
            frames: Stack::new(),
            simple_types: Stack::new(),
            complex_types: Stack::new(),
            elements: Stack::new(),
            attributes: Stack::new(),
            groups: Stack::new(),
            attribute_groups: Stack::new(),
        }
    }

    /// Walk a whole document and return its prototype tree
    pub(crate) fn run(mut self, source: &[u8]) -> Result<ProtoTree> {
        debug!(file = %self.path.display(), mode = ?self.mode, "parsing schema");
        let mut reader = SchemaReader::new(source);
        while let Some(token) = reader.next_token()? {
            self.position = reader.position();
            match token {
                Token::Start(tag) => self.start(&tag)?,
                Token::End(tag) => self.end(&tag)?,
                Token::Text(text) => self.char_data(&text)?,
            }
        }
        self.finish()
    }

    fn lang(&self) -> Language {
        self.session.config().lang
    }

    fn location(&self) -> String {
        format!("{}:{}", self.path.display(), self.position)
    }

    fn start(&mut self, tag: &StartTag) -> Result<()> {
        let depth = self.frames.len() + 1;
        self.session.config().limits.check_depth(depth)?;

        let kind = ElementKind::from_local_name(tag.local_name());
        trace!(element = tag.local_name(), depth, "start");

        let ctx = ParseContext {
            file: &self.path,
            mode: self.mode,
            depth,
            tree: &self.tree,
        };
        if self.session.hook_mut().on_start_element(tag, &ctx)? == Flow::Skip {
            self.frames.push(Frame::skipped(tag.local_name(), kind, depth));
            return Ok(());
        }

        let mut frame = Frame::new(tag.local_name(), kind, depth);
        if let Some(kind) = kind {
            self.dispatch_start(kind, tag, &mut frame)?;
        }
        self.frames.push(frame);
        Ok(())
    }

    fn dispatch_start(&mut self, kind: ElementKind, tag: &StartTag, frame: &mut Frame) -> Result<()> {
        use ElementKind::*;
        match kind {
            Schema => self.on_schema(tag),
            Import => self.on_import(tag),
            Include | Redefine => self.on_include(tag),
            SimpleType => {
                frame.opened = Some(NodeKind::SimpleType);
                self.on_simple_type(tag)
            }
            ComplexType => {
                frame.opened = Some(NodeKind::ComplexType);
                self.on_complex_type(tag)
            }
            Element => {
                frame.opened = Some(NodeKind::Element);
                self.on_element(tag)
            }
            Attribute => {
                frame.opened = Some(NodeKind::Attribute);
                self.on_attribute(tag)
            }
            Group => {
                frame.opened = self.on_group(tag)?;
                Ok(())
            }
            AttributeGroup => {
                frame.opened = self.on_attribute_group(tag)?;
                Ok(())
            }
            Sequence | Choice | All => {
                frame.plural = self.on_compositor(kind, tag)?;
                Ok(())
            }
            Union => self.on_union(tag),
            List => self.on_list(tag),
            Restriction => self.on_restriction(tag),
            Extension => self.on_extension(tag),
            Enumeration => self.on_enumeration(tag),
            Any => self.on_any(tag),
            _ if kind.is_facet() => self.on_facet(kind, tag),
            _ => Ok(()),
        }
    }

    fn end(&mut self, tag: &EndTag) -> Result<()> {
        let frame = self.frames.pop().ok_or_else(|| {
            Error::Xml(format!(
                "unexpected closing tag </{}> at {}",
                tag.name,
                self.location()
            ))
        })?;
        if frame.name != tag.local_name() {
            return Err(Error::Xml(format!(
                "closing tag </{}> does not match <{}> opened at depth {} ({})",
                tag.name,
                frame.name,
                frame.depth,
                self.location()
            )));
        }

        let ctx = ParseContext {
            file: &self.path,
            mode: self.mode,
            depth: frame.depth,
            tree: &self.tree,
        };
        let flow = self.session.hook_mut().on_end_element(tag, &ctx)?;
        if frame.skipped {
            return Ok(());
        }
        if let Some(opened) = frame.opened {
            match flow {
                Flow::Continue => self.close(opened),
                Flow::Skip => self.discard(opened),
            }
        }
        Ok(())
    }

    fn close(&mut self, opened: NodeKind) {
        match opened {
            NodeKind::SimpleType => self.end_simple_type(),
            NodeKind::ComplexType => self.end_complex_type(),
            NodeKind::Element => self.end_element(),
            NodeKind::Attribute => self.end_attribute(),
            NodeKind::Group => self.end_group(),
            NodeKind::AttributeGroup => self.end_attribute_group(),
        }
    }

    /// Drop the builder of a construct whose end tag was vetoed
    fn discard(&mut self, opened: NodeKind) {
        match opened {
            NodeKind::SimpleType => drop(self.simple_types.pop()),
            NodeKind::ComplexType => drop(self.complex_types.pop()),
            NodeKind::Element => drop(self.elements.pop()),
            NodeKind::Attribute => drop(self.attributes.pop()),
            NodeKind::Group => drop(self.groups.pop()),
            NodeKind::AttributeGroup => drop(self.attribute_groups.pop()),
        }
    }

    fn char_data(&mut self, text: &str) -> Result<()> {
        let ctx = ParseContext {
            file: &self.path,
            mode: self.mode,
            depth: self.frames.len(),
            tree: &self.tree,
        };
        if self.session.hook_mut().on_char_data(text, &ctx)? == Flow::Skip {
            return Ok(());
        }

        let text = text.trim();
        if text.is_empty() || self.enclosing_kind(0) != Some(ElementKind::Documentation) {
            return Ok(());
        }
        self.set_doc(text);
        Ok(())
    }

    /// Documentation goes to an open attribute, else an open element, else
    /// the innermost type or group being built. Inline simple types never
    /// take it: they are folded into their owner.
    fn set_doc(&mut self, text: &str) {
        let open: Vec<NodeKind> = self.frames.iter_top_down().filter_map(|f| f.opened).collect();
        let target = [NodeKind::Attribute, NodeKind::Element]
            .into_iter()
            .find(|kind| open.contains(kind))
            .or_else(|| open.first().copied());
        let Some(open) = target else {
            return;
        };
        let doc = match open {
            NodeKind::SimpleType => self.simple_types.peek_mut().map(|b| &mut b.simple.doc),
            NodeKind::ComplexType => self.complex_types.peek_mut().map(|c| &mut c.doc),
            NodeKind::Element => self.elements.peek_mut().map(|b| &mut b.element.doc),
            NodeKind::Attribute => self.attributes.peek_mut().map(|b| &mut b.attribute.doc),
            NodeKind::Group => self.groups.peek_mut().map(|g| &mut g.doc),
            NodeKind::AttributeGroup => self.attribute_groups.peek_mut().map(|g| &mut g.doc),
        };
        if let Some(doc) = doc {
            *doc = text.to_string();
        }
    }

    fn on_schema(&mut self, tag: &StartTag) -> Result<()> {
        for (prefix, uri) in &tag.namespaces {
            self.namespaces.declare_prefix(prefix.as_str(), uri.as_str());
        }
        Ok(())
    }

    fn on_import(&mut self, tag: &StartTag) -> Result<()> {
        if let Some(location) = tag.attr("schemaLocation") {
            self.namespaces
                .register_import(tag.attr("namespace"), location);
        }
        Ok(())
    }

    fn on_include(&mut self, tag: &StartTag) -> Result<()> {
        if let Some(location) = tag.attr("schemaLocation") {
            self.namespaces.register_include(location);
        }
        Ok(())
    }

    fn finish(mut self) -> Result<ProtoTree> {
        if let Some(frame) = self.frames.peek() {
            return Err(Error::Xml(format!(
                "unexpected end of document inside <{}> in {}",
                frame.name,
                self.path.display()
            )));
        }
        self.fix_union_members();
        self.check_unresolved()?;
        debug!(
            file = %self.path.display(),
            mode = ?self.mode,
            nodes = self.tree.len(),
            "parsed schema"
        );
        Ok(self.tree)
    }

    /// Union members named before their definition resolved to their own
    /// name; look them up again now the whole file is known.
    fn fix_union_members(&mut self) {
        let mut fixes = Vec::new();
        for (index, node) in self.tree.iter().enumerate() {
            let SchemaNode::SimpleType(simple) = node else {
                continue;
            };
            if !simple.union {
                continue;
            }
            for (member, resolved) in &simple.member_types {
                if member != resolved || builtins::is_builtin(member) {
                    continue;
                }
                if let Some(found) = self.tree.resolve_name(member) {
                    fixes.push((index, member.clone(), found));
                }
            }
        }

        for (index, member, found) in fixes {
            if let Some(SchemaNode::SimpleType(simple)) = self.tree.get_mut(index) {
                trace!(member = %member, resolved = %found, "fixed forward union member");
                simple.member_types.insert(member, found);
            }
        }
    }

    fn check_unresolved(&self) -> Result<()> {
        if self.mode == ParseMode::Extract {
            return Ok(());
        }
        let missing: Vec<&str> = self
            .unresolved
            .iter()
            .map(String::as_str)
            .filter(|name| !self.tree.contains_name(name) && !self.session.knows_name(name))
            .collect();
        let Some(first) = missing.first() else {
            return Ok(());
        };
        if self.session.config().is_strict() {
            return Err(Error::UnresolvedType {
                name: first.to_string(),
                file: self.path.clone(),
            });
        }
        warn!(
            file = %self.path.display(),
            references = ?missing,
            "unresolved type references fall back to their local names"
        );
        Ok(())
    }

    /// Resolve a raw type reference through the resolution engine
    fn resolve(&mut self, raw: &str) -> Result<String> {
        let scope = Scope {
            dir: &self.dir,
            namespaces: &self.namespaces,
            tree: &self.tree,
            mode: self.mode,
            import_depth: self.import_depth,
        };
        let resolution = resolver::resolve_type(self.session, &scope, raw)?;
        if !resolution.is_resolved() {
            let name = resolution.name();
            debug!(reference = raw, fallback = %name, "type reference falls back to local name");
            if !self.unresolved.iter().any(|u| u == name) {
                self.unresolved.push(name.to_string());
            }
        }
        Ok(resolution.into_name())
    }

    /// Kind of the element `n` levels above the one being handled
    /// (0 = its parent). Elements whose handling a hook vetoed have none.
    fn enclosing_kind(&self, n: usize) -> Option<ElementKind> {
        self.frames
            .iter_top_down()
            .nth(n)
            .filter(|f| !f.skipped)
            .and_then(|f| f.kind)
    }

    /// The parent element's handling was vetoed by a hook
    fn parent_skipped(&self) -> bool {
        self.frames.peek().map_or(false, |f| f.skipped)
    }

    /// Where a closing construct attaches: the nearest open builder of one
    /// of the given kinds, unless a vetoed container lies in between
    fn owner(&self, kinds: &[NodeKind]) -> Owner {
        for frame in self.frames.iter_top_down() {
            if frame.skipped && frame.kind.map_or(false, ElementKind::is_container) {
                return Owner::Vetoed;
            }
            if let Some(open) = frame.opened.filter(|open| kinds.contains(open)) {
                return Owner::Open(open);
            }
        }
        Owner::Schema
    }

    /// Plurality inherited from enclosing sequences and choices, up to the
    /// nearest type, group or element boundary
    fn inherited_plural(&self) -> bool {
        for frame in self.frames.iter_top_down() {
            match frame.kind {
                Some(kind) if kind.is_compositor() => {
                    if frame.plural {
                        return true;
                    }
                }
                Some(
                    ElementKind::ComplexType
                    | ElementKind::Group
                    | ElementKind::Element
                    | ElementKind::Schema,
                ) => return false,
                _ => {}
            }
        }
        false
    }

    /// `maxOccurs` is `unbounded` or a number above one
    fn max_occurs_plural(&self, kind: ElementKind, tag: &StartTag) -> Result<bool> {
        match tag.attr("maxOccurs") {
            None => Ok(false),
            Some("unbounded") => Ok(true),
            Some(value) => self
                .parse_value::<i64>(kind, "maxOccurs", value)
                .map(|n| n > 1),
        }
    }

    /// `minOccurs` is zero
    fn min_occurs_zero(&self, kind: ElementKind, tag: &StartTag) -> Result<bool> {
        match tag.attr("minOccurs") {
            None => Ok(false),
            Some(value) => self
                .parse_value::<i64>(kind, "minOccurs", value)
                .map(|n| n == 0),
        }
    }

    fn parse_value<T: FromStr>(&self, kind: ElementKind, attribute: &str, value: &str) -> Result<T> {
        parse_value(kind, attribute, value, &self.location())
    }

    fn emit(&mut self, node: SchemaNode) {
        trace!(kind = ?node.kind(), name = node.name(), "emit node");
        self.tree.push(node);
    }
}

/// Parse a numeric attribute value; anything malformed is fatal
fn parse_value<T: FromStr>(kind: ElementKind, attribute: &str, value: &str, location: &str) -> Result<T> {
    value.trim().parse::<T>().map_err(|_| {
        Error::Parse(
            ParseError::invalid_value(kind.local_name(), attribute, value).with_location(location),
        )
    })
}
