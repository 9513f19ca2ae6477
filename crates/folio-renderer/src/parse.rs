//! Markdown to block tree parsing.
//!
//! The parser walks the source line by line:
//!
//! - unindented fenced code blocks become [`Block::Code`];
//! - `::: tabs` / `::: tab` containers become [`Block::Selector`] groups;
//! - every other `::: name` container becomes an [`Block::Admonition`]
//!   (recognized or not; unknown kinds are linted at render time);
//! - `::name` lines are dispatched to registered [`LeafDirective`]s;
//! - everything else accumulates into [`Block::Prose`].
//!
//! Directive syntax inside any code fence (indented ones included) is ignored.

use std::io;
use std::path::{Path, PathBuf};

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

use crate::directive::{
    ContainerLine, DirectiveArgs, DirectiveContext, DirectiveOutput, FenceEvent, FenceTracker,
    IncludeDirective, LeafDirective, parse_container_line, parse_leaf_line,
};
use crate::util::{slugify, strip_quotes};
use crate::{Admonition, Block, Lint, LintKind, Panel, SelectorGroup};

/// Container name for a selector group.
const GROUP_DIRECTIVE: &str = "tabs";
/// Container name for a panel inside a selector group.
const PANEL_DIRECTIVE: &str = "tab";

/// Type alias for the file reading callback function.
pub type ReadFileFn = dyn Fn(&Path) -> io::Result<String> + Send;

/// Configuration for the block parser.
pub struct ParserConfig {
    /// Base directory for resolving relative paths (e.g., for `::include`).
    pub base_dir: PathBuf,
    /// Path to the source file being parsed (if known).
    pub source_path: Option<PathBuf>,
    /// Callback to read files. Default: `std::fs::read_to_string`.
    pub read_file: Option<Box<ReadFileFn>>,
    /// Maximum include depth. Default: 10.
    pub max_include_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            source_path: None,
            read_file: None,
            max_include_depth: 10,
        }
    }

    /// Set the base directory for resolving relative paths.
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Set the source file path.
    #[must_use]
    pub fn with_source_path(mut self, source_path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(source_path.into());
        self
    }

    /// Set the file reading callback.
    #[must_use]
    pub fn with_read_file<F>(mut self, read_file: F) -> Self
    where
        F: Fn(&Path) -> io::Result<String> + Send + 'static,
    {
        self.read_file = Some(Box::new(read_file));
        self
    }

    /// Set the maximum include depth.
    #[must_use]
    pub fn with_max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }

    fn create_context(&self, line: usize, depth: usize) -> DirectiveContext<'_> {
        let read_file: &dyn Fn(&Path) -> io::Result<String> = match &self.read_file {
            Some(f) => f.as_ref(),
            None => &default_read_file,
        };
        DirectiveContext {
            source_path: self.source_path.as_deref(),
            base_dir: &self.base_dir,
            line,
            depth,
            read_file,
        }
    }
}

fn default_read_file(path: &Path) -> io::Result<String> {
    std::fs::read_to_string(path)
}

/// An open container while parsing.
struct Frame {
    name: String,
    args: DirectiveArgs,
    line: usize,
    blocks: Vec<Block>,
    /// Panels collected by a `tabs` frame.
    panels: Vec<Panel>,
}

/// A fenced code block being captured.
struct CodeCapture {
    language: Option<String>,
    source: String,
}

/// Per-call parse state.
struct ParseState {
    root: Vec<Block>,
    stack: Vec<Frame>,
    prose: String,
    fence: FenceTracker,
    code: Option<CodeCapture>,
}

impl ParseState {
    fn new() -> Self {
        Self {
            root: Vec::new(),
            stack: Vec::new(),
            prose: String::new(),
            fence: FenceTracker::new(),
            code: None,
        }
    }

    /// Block list currently receiving content.
    fn target(&mut self) -> &mut Vec<Block> {
        match self.stack.last_mut() {
            Some(frame) => &mut frame.blocks,
            None => &mut self.root,
        }
    }

    fn push_prose_line(&mut self, line: &str) {
        self.prose.push_str(line);
        self.prose.push('\n');
    }

    fn flush_prose(&mut self) {
        if self.prose.trim().is_empty() {
            self.prose.clear();
            return;
        }
        let prose = std::mem::take(&mut self.prose);
        let mut markdown = prose.as_str();
        while let Some((line, rest)) = markdown.split_once('\n')
            && line.trim().is_empty()
        {
            markdown = rest;
        }
        let markdown = markdown.to_owned();
        self.target().push(Block::Prose { markdown });
    }

    fn flush_code(&mut self) {
        if let Some(capture) = self.code.take() {
            let block = Block::Code {
                language: capture.language,
                source: capture.source,
            };
            self.target().push(block);
        }
    }
}

/// Parses authored markdown into a [`Block`] tree.
///
/// The `::include` directive is registered by default; further leaf
/// directives can be added with [`with_leaf`](Self::with_leaf).
///
/// # Example
///
/// ```
/// use folio_renderer::{Block, BlockParser};
///
/// let mut parser = BlockParser::new();
/// let blocks = parser.parse("Intro\n\n::: warning[Heads up]\nCareful.\n:::\n");
///
/// assert_eq!(blocks.len(), 2);
/// assert!(matches!(&blocks[1], Block::Admonition(a) if a.kind == "warning"));
/// assert!(parser.lints().is_empty());
/// ```
pub struct BlockParser {
    config: ParserConfig,
    leaf_handlers: Vec<Box<dyn LeafDirective>>,
    lints: Vec<Lint>,
}

impl Default for BlockParser {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockParser {
    /// Create a parser with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Create a parser with custom configuration.
    #[must_use]
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            leaf_handlers: vec![Box::new(IncludeDirective::new())],
            lints: Vec::new(),
        }
    }

    /// Register a leaf directive handler.
    ///
    /// Handlers registered later take precedence over earlier ones with the
    /// same name.
    #[must_use]
    pub fn with_leaf<D: LeafDirective + 'static>(mut self, handler: D) -> Self {
        self.leaf_handlers.insert(0, Box::new(handler));
        self
    }

    /// Parse markdown into blocks.
    pub fn parse(&mut self, input: &str) -> Vec<Block> {
        self.parse_with_depth(input, 0)
    }

    /// Lints recorded by all `parse` calls so far.
    #[must_use]
    pub fn lints(&self) -> &[Lint] {
        &self.lints
    }

    /// Drain recorded lints.
    pub fn take_lints(&mut self) -> Vec<Lint> {
        std::mem::take(&mut self.lints)
    }

    fn parse_with_depth(&mut self, input: &str, depth: usize) -> Vec<Block> {
        let mut state = ParseState::new();

        for (idx, line) in input.lines().enumerate() {
            self.parse_line(&mut state, line, idx + 1, depth);
        }

        // An unclosed fence runs to the end of the input
        state.flush_code();
        state.flush_prose();

        while let Some(frame) = state.stack.pop() {
            self.lints.push(
                Lint::new(
                    LintKind::UnclosedContainer,
                    format!("unclosed container directive :::{} (missing closing :::)", frame.name),
                )
                .at(frame.line),
            );
            self.close_frame(&mut state, frame);
        }

        state.root
    }

    fn parse_line(&mut self, state: &mut ParseState, line: &str, line_num: usize, depth: usize) {
        if state.code.is_some() {
            if state.fence.update(line) == FenceEvent::Close {
                state.flush_code();
            } else if let Some(capture) = state.code.as_mut() {
                capture.source.push_str(line);
                capture.source.push('\n');
            }
            return;
        }

        if state.fence.in_fence() {
            // Indented fence kept inside prose (e.g. in a list item)
            state.fence.update(line);
            state.push_prose_line(line);
            return;
        }

        if let FenceEvent::Open(info) = state.fence.update(line) {
            if line.starts_with(['`', '~']) {
                state.flush_prose();
                state.code = Some(CodeCapture {
                    language: fence_language(info),
                    source: String::new(),
                });
            } else {
                state.push_prose_line(line);
            }
            return;
        }

        if let Some(container) = parse_container_line(line) {
            match container {
                ContainerLine::Start { name, args } => {
                    state.flush_prose();
                    state.stack.push(Frame {
                        name,
                        args,
                        line: line_num,
                        blocks: Vec::new(),
                        panels: Vec::new(),
                    });
                }
                ContainerLine::End if state.stack.is_empty() => {
                    self.lints.push(
                        Lint::new(LintKind::StrayClose, "stray ::: with no opening directive")
                            .at(line_num),
                    );
                    state.push_prose_line(line);
                }
                ContainerLine::End => {
                    state.flush_prose();
                    if let Some(frame) = state.stack.pop() {
                        self.close_frame(state, frame);
                    }
                }
            }
            return;
        }

        if let Some((name, args)) = parse_leaf_line(line)
            && let Some(idx) = self.leaf_handlers.iter().position(|h| h.name() == name)
        {
            self.dispatch_leaf(state, idx, args, line, line_num, depth);
            return;
        }

        state.push_prose_line(line);
    }

    fn dispatch_leaf(
        &mut self,
        state: &mut ParseState,
        idx: usize,
        args: DirectiveArgs,
        line: &str,
        line_num: usize,
        depth: usize,
    ) {
        let ctx = self.config.create_context(line_num, depth);
        let output = self.leaf_handlers[idx].process(args, &ctx);

        match output {
            Ok(DirectiveOutput::Markdown(markdown)) => {
                if depth >= self.config.max_include_depth {
                    self.lints.push(
                        Lint::new(
                            LintKind::IncludeDepth,
                            format!(
                                "maximum include depth ({}) exceeded",
                                self.config.max_include_depth
                            ),
                        )
                        .at(line_num),
                    );
                    state.push_prose_line(line);
                    return;
                }
                state.flush_prose();
                let blocks = self.parse_with_depth(&markdown, depth + 1);
                state.target().extend(blocks);
            }
            Ok(DirectiveOutput::Blocks(blocks)) => {
                state.flush_prose();
                state.target().extend(blocks);
            }
            Ok(DirectiveOutput::Skip) => state.push_prose_line(line),
            Err(lint) => {
                self.lints.push(lint.at(line_num));
                state.push_prose_line(line);
            }
        }
    }

    fn close_frame(&mut self, state: &mut ParseState, frame: Frame) {
        match frame.name.as_str() {
            GROUP_DIRECTIVE => {
                let blocks = self.build_group(frame);
                state.target().extend(blocks);
            }
            PANEL_DIRECTIVE => match state.stack.last_mut() {
                Some(parent) if parent.name == GROUP_DIRECTIVE => {
                    let panel = build_panel(frame, parent.panels.len());
                    parent.panels.push(panel);
                }
                _ => {
                    self.lints.push(
                        Lint::new(
                            LintKind::OrphanPanel,
                            "::: tab outside a ::: tabs group; content rendered plainly",
                        )
                        .at(frame.line),
                    );
                    state.target().extend(frame.blocks);
                }
            },
            _ => {
                let label = (!frame.args.content.is_empty())
                    .then(|| strip_quotes(&frame.args.content).to_owned());
                state.target().push(Block::Admonition(Admonition {
                    kind: frame.name,
                    label,
                    content: frame.blocks,
                }));
            }
        }
    }

    /// Build the selector group block, followed by any loose content.
    fn build_group(&mut self, frame: Frame) -> Vec<Block> {
        let mut group = SelectorGroup {
            key: frame
                .args
                .get_any(&["group", "groupId"])
                .map(str::to_owned),
            default_panel: frame
                .args
                .get_any(&["default", "defaultValue"])
                .map(str::to_owned),
            panels: frame.panels,
        };

        for id in group.dedupe_panels() {
            self.lints.push(
                Lint::new(
                    LintKind::DuplicatePanel,
                    format!("duplicate panel id '{id}' in selector group; later panel dropped"),
                )
                .at(frame.line),
            );
        }

        let mut blocks = vec![Block::Selector(group)];
        if !frame.blocks.is_empty() {
            self.lints.push(
                Lint::new(
                    LintKind::LooseContent,
                    "content inside ::: tabs but outside every ::: tab; rendered after the group",
                )
                .at(frame.line),
            );
            blocks.extend(frame.blocks);
        }
        blocks
    }
}

/// Build a panel from a closed `tab` frame.
///
/// The id comes from `{#id}`, `{value=...}` or `{id=...}`, else the label's slug,
/// else the panel position.
fn build_panel(frame: Frame, position: usize) -> Panel {
    let label = strip_quotes(&frame.args.content).to_owned();
    let explicit_id = frame
        .args
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .or_else(|| frame.args.get_any(&["value", "id"]));

    let id = match explicit_id {
        Some(id) => id.to_owned(),
        None => {
            let slug = slugify(&label);
            if slug.is_empty() {
                format!("tab-{position}")
            } else {
                slug
            }
        }
    };

    let label = if label.is_empty() {
        explicit_id.map_or_else(|| "Tab".to_owned(), str::to_owned)
    } else {
        label
    };

    Panel {
        id,
        label,
        content: frame.blocks,
    }
}

/// Language token from a fence info string.
fn fence_language(info: &str) -> Option<String> {
    let token = info
        .split(|c: char| c.is_whitespace() || c == '{' || c == ',')
        .next()
        .unwrap_or_default();
    (!token.is_empty()).then(|| token.to_owned())
}

/// Text of the first top-level `# H1` heading in the page's prose blocks.
///
/// ```
/// use folio_renderer::{Block, extract_title};
///
/// let blocks = vec![Block::prose("# Sign in with *OAuth*\n\nBody")];
/// assert_eq!(extract_title(&blocks).as_deref(), Some("Sign in with OAuth"));
/// ```
#[must_use]
pub fn extract_title(blocks: &[Block]) -> Option<String> {
    blocks.iter().find_map(|block| match block {
        Block::Prose { markdown } => first_h1(markdown),
        _ => None,
    })
}

fn first_h1(markdown: &str) -> Option<String> {
    let mut title: Option<String> = None;
    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => title = Some(String::new()),
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                if let Some(text) = title.take() {
                    let text = text.trim().to_owned();
                    if !text.is_empty() {
                        return Some(text);
                    }
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(buf) = title.as_mut() {
                    buf.push_str(&text);
                }
            }
            _ => {}
        }
    }
    None
}
