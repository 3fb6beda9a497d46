// Declaration records
// Immutable values produced by the front-end and consumed by the analyzer

/// Source position information for declarations (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::new(span.start.into(), span.len())
    }
}

/// One parameter or result slot of a callable.
///
/// `type_text` is the canonical rendering of the type, pointer marker
/// included (`*Widget`, `[]string`, `...int`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    pub name: Option<String>,
    pub type_text: String,
    pub span: Span,
}

impl ParamDecl {
    pub fn named(name: impl Into<String>, type_text: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            type_text: type_text.into(),
            span: Span::default(),
        }
    }

    pub fn anonymous(type_text: impl Into<String>) -> Self {
        Self {
            name: None,
            type_text: type_text.into(),
            span: Span::default(),
        }
    }
}

/// Parameter and result lists of a callable, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignatureDecl {
    pub params: Vec<ParamDecl>,
    pub results: Vec<ParamDecl>,
}

impl SignatureDecl {
    pub fn new(params: Vec<ParamDecl>, results: Vec<ParamDecl>) -> Self {
        Self { params, results }
    }
}

/// A method requirement listed inside an interface body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSpecDecl {
    pub name: String,
    pub signature: SignatureDecl,
    pub span: Span,
}

/// Shape of the underlying type of a `type` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    /// `struct { ... }`: a concrete type that can own methods
    Struct,
    /// `interface { ... }` with its method specs and embedded elements
    Interface {
        methods: Vec<MethodSpecDecl>,
        embedded: Vec<String>,
    },
    /// Anything else (`type Celsius float64`, `type Handler func()`, ...)
    Other { underlying: String },
}

impl TypeShape {
    /// Short human name of the shape, used in diagnostics
    pub fn describe(&self) -> &'static str {
        match self {
            TypeShape::Struct => "struct",
            TypeShape::Interface { .. } => "interface",
            TypeShape::Other { .. } => "non-struct, non-interface type",
        }
    }
}

/// A `type Name ...` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    pub shape: TypeShape,
    pub is_alias: bool,
    pub is_generic: bool,
    pub span: Span,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>, shape: TypeShape) -> Self {
        Self {
            name: name.into(),
            shape,
            is_alias: false,
            is_generic: false,
            span: Span::default(),
        }
    }
}

/// Receiver type of a method declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiverExpr {
    /// `func (s Store) ...`
    Named(String),
    /// `func (s *Store) ...`
    Pointer(String),
    /// Any receiver type that is not a plain or pointer-to-named type,
    /// e.g. a generic receiver `*Box[T]`. Carries the rendered type text.
    Unsupported(String),
}

impl ReceiverExpr {
    /// Classify a rendered receiver type
    pub fn from_type_text(text: &str) -> Self {
        let (is_pointer, base) = match text.strip_prefix('*') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let is_plain_name = !base.is_empty()
            && base
                .chars()
                .next()
                .is_some_and(|c| c.is_alphabetic() || c == '_')
            && base.chars().all(|c| c.is_alphanumeric() || c == '_');

        match (is_plain_name, is_pointer) {
            (true, true) => ReceiverExpr::Pointer(base.to_string()),
            (true, false) => ReceiverExpr::Named(base.to_string()),
            (false, _) => ReceiverExpr::Unsupported(text.to_string()),
        }
    }

    /// Receiver type name with the pointer marker stripped, if resolvable
    pub fn base_name(&self) -> Option<&str> {
        match self {
            ReceiverExpr::Named(name) | ReceiverExpr::Pointer(name) => Some(name),
            ReceiverExpr::Unsupported(_) => None,
        }
    }

    /// The receiver as it appeared in source
    pub fn raw_text(&self) -> String {
        match self {
            ReceiverExpr::Named(name) => name.clone(),
            ReceiverExpr::Pointer(name) => format!("*{name}"),
            ReceiverExpr::Unsupported(text) => text.clone(),
        }
    }
}

/// A `func` declaration, with or without receiver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallableDecl {
    pub name: String,
    pub receiver: Option<ReceiverExpr>,
    pub signature: SignatureDecl,
    pub has_body: bool,
    pub span: Span,
}

impl CallableDecl {
    pub fn function(name: impl Into<String>, signature: SignatureDecl) -> Self {
        Self {
            name: name.into(),
            receiver: None,
            signature,
            has_body: true,
            span: Span::default(),
        }
    }

    pub fn method(
        receiver: ReceiverExpr,
        name: impl Into<String>,
        signature: SignatureDecl,
    ) -> Self {
        Self {
            receiver: Some(receiver),
            ..Self::function(name, signature)
        }
    }

    pub fn is_method(&self) -> bool {
        self.receiver.is_some()
    }
}

/// An `import` spec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    pub alias: Option<String>,
    pub path: String,
}

/// Declarations of a single parsed source file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceFile {
    pub package_name: String,
    pub imports: Vec<ImportDecl>,
    pub types: Vec<TypeDecl>,
    pub callables: Vec<CallableDecl>,
    pub source_file: Option<String>,
}

/// Ordered declarations of a whole package, the analyzer's input
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeclarationSet {
    pub package_name: String,
    pub types: Vec<TypeDecl>,
    pub callables: Vec<CallableDecl>,
}

impl DeclarationSet {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            types: Vec::new(),
            callables: Vec::new(),
        }
    }

    /// Append a file's declarations, preserving their order
    pub fn add_file(&mut self, file: SourceFile) {
        if self.package_name.is_empty() {
            self.package_name = file.package_name;
        }
        self.types.extend(file.types);
        self.callables.extend(file.callables);
    }

    pub fn add_type(&mut self, decl: TypeDecl) {
        self.types.push(decl);
    }

    pub fn add_callable(&mut self, decl: CallableDecl) {
        self.callables.push(decl);
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.callables.is_empty()
    }
}
