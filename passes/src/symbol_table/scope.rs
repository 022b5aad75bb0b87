use felangkit_ast::FeType;
use felangkit_span::SourcePosition;
use indexmap::IndexMap;

/// Identifies a scope within a `SymbolTable`'s arena. Index `0` is always
/// the global scope.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ScopeId(pub(crate) usize);

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SymbolKind {
    Variable,
    Constant,
    Parameter,
    Function,
    Procedure,
}

#[derive(Clone, Debug)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub ty: FeType,
    pub position: SourcePosition,
    pub used: bool,
    pub initialized: bool,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, ty: FeType, position: SourcePosition) -> Self {
        // Parameters and function/procedure bindings are considered
        // initialized the moment they're declared; plain variables are not,
        // until an initializer or assignment sets them ("use before
        // initialization").
        let initialized = !matches!(kind, SymbolKind::Variable);
        Self { name: name.into(), kind, ty, position, used: false, initialized }
    }
}

/// One node of the scope tree. Holds its own bindings and a link to its
/// parent for the chained scope lookup.
pub(crate) struct Scope {
    pub parent: Option<ScopeId>,
    pub symbols: IndexMap<String, Symbol>,
}

impl Scope {
    pub fn root() -> Self {
        Self { parent: None, symbols: IndexMap::new() }
    }

    pub fn child(parent: ScopeId) -> Self {
        Self { parent: Some(parent), symbols: IndexMap::new() }
    }
}
