use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The closed set of reserved words in the FE pseudo-language. Each variant
/// has both an English and a Japanese spelling; `KEYWORDS` maps both forms
/// to the same `Keyword`, so downstream consumers never need to know which
/// script a program was written in.
///
/// Spec gives explicit English/Japanese pairs for `variable`/`定数`/`整数型`
/// and the `配列 の T` array-type syntax; the remaining pairs are this
/// crate's own choice of standard pedagogical translations (see
/// `DESIGN.md`).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Keyword {
    IntegerType,
    RealType,
    CharacterType,
    StringType,
    BooleanType,
    RecordType,
    ArrayType,
    If,
    While,
    For,
    Return,
    Break,
    And,
    Or,
    Not,
    True,
    False,
    VariableDecl,
    ConstantDecl,
    Then,
    Do,
    End,
    Else,
    Step,
    To,
    In,
    Function,
    Procedure,
    Of,
}

const TABLE: &[(&str, Keyword)] = &[
    ("integer", Keyword::IntegerType),
    ("整数型", Keyword::IntegerType),
    ("real", Keyword::RealType),
    ("実数型", Keyword::RealType),
    ("character", Keyword::CharacterType),
    ("文字型", Keyword::CharacterType),
    ("string", Keyword::StringType),
    ("文字列型", Keyword::StringType),
    ("boolean", Keyword::BooleanType),
    ("論理型", Keyword::BooleanType),
    ("record", Keyword::RecordType),
    ("レコード", Keyword::RecordType),
    ("array", Keyword::ArrayType),
    ("配列", Keyword::ArrayType),
    ("if", Keyword::If),
    ("もし", Keyword::If),
    ("while", Keyword::While),
    ("間", Keyword::While),
    ("for", Keyword::For),
    ("繰り返し", Keyword::For),
    ("return", Keyword::Return),
    ("戻る", Keyword::Return),
    ("break", Keyword::Break),
    ("中断", Keyword::Break),
    ("and", Keyword::And),
    ("かつ", Keyword::And),
    ("or", Keyword::Or),
    ("または", Keyword::Or),
    ("not", Keyword::Not),
    ("ではない", Keyword::Not),
    ("true", Keyword::True),
    ("真", Keyword::True),
    ("false", Keyword::False),
    ("偽", Keyword::False),
    ("variable", Keyword::VariableDecl),
    ("変数", Keyword::VariableDecl),
    ("constant", Keyword::ConstantDecl),
    ("定数", Keyword::ConstantDecl),
    ("then", Keyword::Then),
    ("ならば", Keyword::Then),
    ("do", Keyword::Do),
    ("実行", Keyword::Do),
    ("end", Keyword::End),
    ("終わり", Keyword::End),
    ("else", Keyword::Else),
    ("それ以外", Keyword::Else),
    ("step", Keyword::Step),
    ("刻み", Keyword::Step),
    ("to", Keyword::To),
    ("まで", Keyword::To),
    ("in", Keyword::In),
    ("の中", Keyword::In),
    ("function", Keyword::Function),
    ("関数", Keyword::Function),
    ("procedure", Keyword::Procedure),
    ("手続き", Keyword::Procedure),
    ("of", Keyword::Of),
    ("の", Keyword::Of),
];

static KEYWORDS: Lazy<HashMap<&'static str, Keyword>> = Lazy::new(|| TABLE.iter().copied().collect());

/// O(1) amortized keyword lookup, shared by the tokenizer's
/// identifier-or-keyword scanning for both English and Japanese spellings.
pub fn lookup_keyword(lexeme: &str) -> Option<Keyword> {
    KEYWORDS.get(lexeme).copied()
}
