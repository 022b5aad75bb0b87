use thiserror::Error;

/// The closed set of errors the pipeline can report. Grouped the way the
/// taxonomy is grouped: lexical, syntactic, then semantic by sub-area,
/// then meta.
#[derive(Error, Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    // --- lexical ---
    #[error("invalid character '{0}'")]
    InvalidCharacter(char),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("malformed number literal '{0}'")]
    MalformedNumber(String),

    // --- syntactic ---
    #[error("expected {expected}, found {got}")]
    UnexpectedToken { expected: String, got: String },
    #[error("expected an identifier")]
    ExpectedIdentifier,
    #[error("expression nesting exceeds the configured limit")]
    NestingTooDeep,
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    // --- semantic: declarations ---
    #[error("variable '{0}' is already declared in this scope")]
    VariableAlreadyDeclared(String),
    #[error("function '{0}' is already declared in this scope")]
    FunctionAlreadyDeclared(String),
    #[error("undeclared variable '{0}'")]
    UndeclaredVariable(String),
    #[error("undeclared function '{0}'")]
    UndeclaredFunction(String),
    #[error("unknown type '{0}'")]
    UnknownType(String),
    #[error("record '{record}' has no field '{field}'")]
    UndeclaredField { field: String, record: String },

    // --- semantic: typing ---
    #[error("expected type {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },
    #[error("incompatible types {left} and {right} for operation '{operation}'")]
    IncompatibleTypes { left: String, right: String, operation: String },
    #[error("array index must be of type {expected}, found {actual}")]
    ArrayIndexTypeMismatch { expected: String, actual: String },
    #[error("value is not indexable")]
    InvalidArrayAccess,
    #[error("value is not a record")]
    InvalidFieldAccess,
    #[error("cannot convert from {from} to {to}")]
    InvalidTypeConversion { from: String, to: String },
    #[error("cyclic dependency: {0}")]
    CyclicDependency(String),

    // --- semantic: calls ---
    #[error("function '{function}' expects {expected} argument(s), found {actual}")]
    IncorrectArgumentCount { function: String, expected: usize, actual: usize },
    #[error("function '{function}' argument {param_index} expects {expected}, found {actual}")]
    ArgumentTypeMismatch { function: String, param_index: usize, expected: String, actual: String },

    // --- semantic: control flow ---
    #[error("'break' used outside of a loop")]
    BreakOutsideLoop,
    #[error("'return' used outside of a function or procedure")]
    ReturnOutsideFunction,
    #[error("function '{function}' expects return type {expected}, found {actual}")]
    ReturnTypeMismatch { function: String, expected: String, actual: String },
    #[error("function '{0}' does not return a value on all paths")]
    MissingReturnStatement(String),
    #[error("procedure '{0}' does not return a value")]
    VoidFunctionReturnsValue(String),
    #[error("unreachable code")]
    UnreachableCode,
    #[error("cannot reassign constant '{0}'")]
    ConstantReassignment(String),
    #[error("variable '{0}' is used before it is initialized")]
    VariableNotInitialized(String),

    // --- meta ---
    #[error("too many errors ({0}); stopping analysis")]
    TooManyErrors(usize),
}

/// Warnings never cause `isSuccessful` to become `false`.
#[derive(Error, Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum WarningKind {
    #[error("unused variable '{0}'")]
    UnusedVariable(String),
    #[error("unused function '{0}'")]
    UnusedFunction(String),
}
