use std::borrow::Borrow;

pub const SOLIDITY_VERSION: &str = "^0.8.22";

#[derive(Debug, Clone)]
enum Block {
    Contract(String),
    Interface(String),
    Function(String),
}

impl std::fmt::Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Block::Contract(name) => write!(f, "contract {name}"),
            Block::Interface(name) => write!(f, "interface {name}"),
            Block::Function(name) => write!(f, "function {name}"),
        }
    }
}

#[derive(Default, PartialEq, Eq)]
enum LineState {
    /// Nothing was written yet, or the last line opened a block.
    #[default]
    Start,
    Code,
    Blank,
}

/// A Solidity source writer.
///
/// Tracks open blocks so that unbalanced output is caught during generation, and collapses
/// redundant blank lines so conditionally emitted sections always read cleanly.
#[derive(Default)]
pub struct Writer {
    code: String,
    stack: Vec<Block>,
    state: LineState,
}

impl Writer {
    const INDENT: usize = 4;

    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the [Writer] and returns the generated code.
    ///
    /// Panics:
    /// - If there are unclosed blocks.
    pub fn into_code(self) -> String {
        assert!(
            self.stack.is_empty(),
            "Unclosed blocks: {}",
            self.stack
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
        self.code
    }

    fn indent(&mut self) {
        self.code.push_str(&" ".repeat(self.stack.len() * Self::INDENT));
    }

    /// Writes a single line at the current indentation. An empty line is written as a blank line.
    pub fn line(&mut self, text: impl Borrow<str>) {
        let text = text.borrow();
        if text.is_empty() {
            self.blank();
            return;
        }
        self.indent();
        self.code.push_str(text);
        self.code.push('\n');
        self.state = LineState::Code;
    }

    pub fn lines<S: AsRef<str>>(&mut self, lines: &[S]) {
        for line in lines {
            self.line(line.as_ref());
        }
    }

    /// Separates two sections. Has no effect at the start of a block or after another blank.
    pub fn blank(&mut self) {
        if self.state == LineState::Code {
            self.code.push('\n');
            self.state = LineState::Blank;
        }
    }

    pub fn comment(&mut self, comment: impl Borrow<str>) {
        self.line(format!("// {}", comment.borrow()));
    }

    /// Writes a `/** ... */` documentation block.
    ///
    /// Multi-line entries are split so every line keeps its ` * ` prefix, and `*/` inside an
    /// entry is escaped so it cannot close the block.
    pub fn natspec<S: AsRef<str>>(&mut self, lines: &[S]) {
        self.line("/**");
        for line in lines.iter().flat_map(|line| line.as_ref().split('\n')) {
            let line = line.trim_end().replace("*/", "*\\/");
            if line.is_empty() {
                self.line(" *");
            } else {
                self.line(format!(" * {line}"));
            }
        }
        self.line(" */");
    }

    // FILE LEVEL
    // -------------------------------------------------------------------------------------------

    /// Writes the license identifier and the pragma.
    pub fn header(&mut self, license: &str) {
        assert!(self.code.is_empty(), "The header must be the first item of a file");
        self.comment(format!("SPDX-License-Identifier: {license}"));
        self.line(format!("pragma solidity {SOLIDITY_VERSION};"));
        self.blank();
    }

    pub fn import(&mut self, path: &str) {
        self.line(format!("import \"{path}\";"));
    }

    // BLOCKS
    // -------------------------------------------------------------------------------------------

    fn open(&mut self, block: Block, head: String) {
        self.line(format!("{head} {{"));
        self.stack.push(block);
        self.state = LineState::Start;
    }

    /// Starts a contract. `head` is the declaration without the opening brace.
    pub fn open_contract(&mut self, name: &str, head: String) {
        assert!(self.stack.is_empty(), "Can not nest contract {name}");
        self.open(Block::Contract(name.to_string()), head);
    }

    pub fn open_interface(&mut self, name: &str) {
        assert!(self.stack.is_empty(), "Can not nest interface {name}");
        self.open(Block::Interface(name.to_string()), format!("interface {name}"));
    }

    pub fn open_function(&mut self, name: &str, head: String) {
        assert!(!self.stack.is_empty(), "Function {name} must be inside a contract");
        self.open(Block::Function(name.to_string()), head);
    }

    /// Ends the innermost open block.
    pub fn end(&mut self) {
        assert!(!self.stack.is_empty(), "No block to end");
        if self.state == LineState::Blank {
            self.code.pop();
        }
        self.stack.pop();
        self.line("}");
    }

    // FUNCTIONS
    // -------------------------------------------------------------------------------------------

    /// Writes a complete function. An empty body is written on the declaration line.
    pub fn function(&mut self, decl: &FunctionDecl, body: &[String]) {
        self.blank();
        if body.is_empty() {
            self.line(format!("{} {{}}", decl.head()));
        } else {
            self.open_function(&decl.name, decl.head());
            self.lines(body);
            self.end();
        }
    }

    /// Writes a constructor. Modifiers, if any, are written one per line.
    pub fn constructor(&mut self, params: &[String], modifiers: &[String], body: &[String]) {
        let head = format!("constructor({})", params.join(", "));
        if modifiers.is_empty() {
            if body.is_empty() {
                self.line(format!("{head} {{}}"));
                return;
            }
            self.open_function("constructor", head);
        } else {
            self.line(head);
            let indent = " ".repeat(Self::INDENT);
            for modifier in modifiers {
                self.line(format!("{indent}{modifier}"));
            }
            if body.is_empty() {
                self.line("{}");
                return;
            }
            self.line("{");
            self.stack.push(Block::Function("constructor".to_string()));
            self.state = LineState::Start;
        }
        self.lines(body);
        self.end();
    }
}

// FUNCTION DECLARATIONS
// ================================================================================================

/// The calling convention of an overridable function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub params: &'static str,
    /// The parameter names, comma separated, as forwarded to `super`.
    pub args: &'static str,
    pub visibility: &'static str,
    pub mutability: Option<&'static str>,
    pub returns: Option<&'static str>,
}

impl Signature {
    pub const fn new(params: &'static str, args: &'static str, visibility: &'static str) -> Self {
        Self {
            params,
            args,
            visibility,
            mutability: None,
            returns: None,
        }
    }

    pub const fn view(mut self) -> Self {
        self.mutability = Some("view");
        self
    }

    pub const fn pure(mut self) -> Self {
        self.mutability = Some("pure");
        self
    }

    pub const fn returns(mut self, ty: &'static str) -> Self {
        self.returns = Some(ty);
        self
    }

    /// A body that forwards to the next base in the linearization.
    pub fn super_call(&self, name: &str) -> String {
        let call = format!("super.{name}({});", self.args);
        match self.returns {
            Some(_) => format!("return {call}"),
            None => call,
        }
    }

    pub fn declare(&self, name: &str) -> FunctionDecl {
        FunctionDecl {
            name: name.to_string(),
            params: self.params.to_string(),
            visibility: self.visibility,
            mutability: self.mutability,
            overrides: None,
            modifiers: Vec::new(),
            returns: self.returns.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: String,
    pub visibility: &'static str,
    pub mutability: Option<&'static str>,
    pub overrides: Option<String>,
    pub modifiers: Vec<String>,
    pub returns: Option<String>,
}

impl FunctionDecl {
    pub fn new(name: &str, params: &str, visibility: &'static str) -> Self {
        Signature::new("", "", visibility).declare(name).with_params(params)
    }

    fn with_params(mut self, params: &str) -> Self {
        self.params = params.to_string();
        self
    }

    pub fn overriding(mut self, clause: String) -> Self {
        self.overrides = Some(clause);
        self
    }

    pub fn modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifiers.push(modifier.into());
        self
    }

    pub fn returning(mut self, ty: impl Into<String>) -> Self {
        self.returns = Some(ty.into());
        self
    }

    pub fn with_mutability(mut self, mutability: &'static str) -> Self {
        self.mutability = Some(mutability);
        self
    }

    pub fn head(&self) -> String {
        let mut head = format!("function {}({}) {}", self.name, self.params, self.visibility);
        if let Some(mutability) = self.mutability {
            head.push(' ');
            head.push_str(mutability);
        }
        if let Some(overrides) = &self.overrides {
            head.push(' ');
            head.push_str(overrides);
        }
        for modifier in &self.modifiers {
            head.push(' ');
            head.push_str(modifier);
        }
        if let Some(returns) = &self.returns {
            head.push_str(&format!(" returns ({returns})"));
        }
        head
    }
}
