//! Tree node definitions.
//!
//! Nodes are immutable once deserialized; the converter only borrows them.
//! Every statement and expression is an internally tagged object on the wire
//! (`{"kind": "Assign", ...}`).

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Names and modifiers
// =============================================================================

/// A (possibly qualified) name such as `Foo`, `App\Foo` or `\App\Foo`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Name {
    pub parts: Vec<String>,
    /// Written with a leading separator (`\App\Foo`).
    #[serde(default)]
    pub fully_qualified: bool,
}

impl Name {
    /// Parse `App\Foo` or `\App\Foo`.
    pub fn new(name: &str) -> Self {
        let fully_qualified = name.starts_with('\\');
        let parts = name
            .trim_start_matches('\\')
            .split('\\')
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            parts,
            fully_qualified,
        }
    }

    /// Parts joined by `\`, without the leading separator.
    pub fn joined(&self) -> String {
        self.parts.join("\\")
    }

    /// Last segment (`Foo` for `App\Foo`).
    pub fn last(&self) -> &str {
        self.parts.last().map(String::as_str).unwrap_or_default()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fully_qualified {
            f.write_str("\\")?;
        }
        f.write_str(&self.joined())
    }
}

bitflags! {
    /// Member and class modifiers.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Modifiers: u8 {
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
        const ABSTRACT = 1 << 3;
        const STATIC = 1 << 4;
        const FINAL = 1 << 5;
    }
}

/// Native type declaration on a parameter or return value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TypeHint {
    /// Built-in simple type: `int`, `string`, `array`, `mixed`, `void`, ...
    Identifier { name: String },
    /// Class or interface reference.
    Name { name: Name },
    /// `?T`
    Nullable { inner: Box<TypeHint> },
    /// `A|B`
    Union { types: Vec<TypeHint> },
}

impl TypeHint {
    pub fn identifier(name: &str) -> Self {
        Self::Identifier {
            name: name.to_string(),
        }
    }

    pub fn class(name: &str) -> Self {
        Self::Name {
            name: Name::new(name),
        }
    }

    pub fn nullable(inner: TypeHint) -> Self {
        Self::Nullable {
            inner: Box::new(inner),
        }
    }
}

// =============================================================================
// Files and declarations
// =============================================================================

/// One parsed source file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    #[serde(default)]
    pub path: Option<String>,
    pub namespace: Option<Name>,
    #[serde(default)]
    pub uses: Vec<UseItem>,
    #[serde(default)]
    pub classes: Vec<ClassLike>,
}

/// `use App\Foo as Bar;`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseItem {
    pub name: Name,
    pub alias: Option<String>,
}

impl UseItem {
    pub fn new(name: &str) -> Self {
        Self {
            name: Name::new(name),
            alias: None,
        }
    }

    /// Name the import is visible under in the file.
    pub fn local_name(&self) -> &str {
        self.alias.as_deref().unwrap_or_else(|| self.name.last())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Trait,
}

/// Class, interface or trait declaration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassLike {
    #[serde(default)]
    pub kind: ClassKind,
    pub name: String,
    #[serde(default)]
    pub flags: Modifiers,
    #[serde(default)]
    pub extends: Vec<Name>,
    #[serde(default)]
    pub implements: Vec<Name>,
    #[serde(default)]
    pub members: Vec<ClassMember>,
    pub doc: Option<String>,
}

impl ClassLike {
    pub fn new(kind: ClassKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            flags: Modifiers::empty(),
            extends: Vec::new(),
            implements: Vec::new(),
            members: Vec::new(),
            doc: None,
        }
    }

    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.members.iter().filter_map(|member| match member {
            ClassMember::Method(method) => Some(method),
            _ => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ClassMember {
    Method(Method),
    Property(Property),
    Constant(ClassConst),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    #[serde(default)]
    pub flags: Modifiers,
    #[serde(default)]
    pub by_ref: bool,
    #[serde(default)]
    pub params: Vec<Param>,
    pub return_type: Option<TypeHint>,
    /// `None` for abstract and interface methods.
    pub body: Option<Vec<Stmt>>,
    pub doc: Option<String>,
}

impl Method {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            flags: Modifiers::PUBLIC,
            by_ref: false,
            params: Vec::new(),
            return_type: None,
            body: Some(Vec::new()),
            doc: None,
        }
    }

    pub fn with_params(mut self, params: Vec<Param>) -> Self {
        self.params = params;
        self
    }

    pub fn with_body(mut self, body: Vec<Stmt>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn without_body(mut self) -> Self {
        self.body = None;
        self
    }

    pub fn with_doc(mut self, doc: &str) -> Self {
        self.doc = Some(doc.to_string());
        self
    }

    pub fn with_return_type(mut self, hint: TypeHint) -> Self {
        self.return_type = Some(hint);
        self
    }

    pub fn with_flags(mut self, flags: Modifiers) -> Self {
        self.flags = flags;
        self
    }

    pub fn is_constructor(&self) -> bool {
        self.name.trim().eq_ignore_ascii_case("__construct")
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub type_hint: Option<TypeHint>,
    pub default: Option<Expr>,
    #[serde(default)]
    pub by_ref: bool,
    #[serde(default)]
    pub variadic: bool,
}

impl Param {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            type_hint: None,
            default: None,
            by_ref: false,
            variadic: false,
        }
    }

    pub fn with_type(mut self, hint: TypeHint) -> Self {
        self.type_hint = Some(hint);
        self
    }

    pub fn with_default(mut self, default: Expr) -> Self {
        self.default = Some(default);
        self
    }

    pub fn by_ref(mut self) -> Self {
        self.by_ref = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(default)]
    pub flags: Modifiers,
    pub default: Option<Expr>,
    pub doc: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassConst {
    pub name: String,
    pub value: Expr,
}

// =============================================================================
// Statements
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Stmt {
    Expression {
        expr: Expr,
    },
    Return {
        expr: Option<Expr>,
    },
    If {
        cond: Expr,
        then: Vec<Stmt>,
        #[serde(default)]
        elseifs: Vec<ElseIf>,
        otherwise: Option<Vec<Stmt>>,
    },
    While {
        cond: Expr,
        body: Vec<Stmt>,
    },
    DoWhile {
        body: Vec<Stmt>,
        cond: Expr,
    },
    For {
        #[serde(default)]
        init: Vec<Expr>,
        #[serde(default)]
        cond: Vec<Expr>,
        #[serde(default)]
        step: Vec<Expr>,
        body: Vec<Stmt>,
    },
    Foreach {
        expr: Expr,
        key: Option<Expr>,
        value: Expr,
        #[serde(default)]
        by_ref: bool,
        body: Vec<Stmt>,
    },
    Switch {
        subject: Expr,
        cases: Vec<Case>,
    },
    Static {
        vars: Vec<StaticVar>,
    },
    TryCatch {
        body: Vec<Stmt>,
        #[serde(default)]
        catches: Vec<Catch>,
        finally: Option<Vec<Stmt>>,
    },
    Throw {
        expr: Expr,
    },
    Break,
    Continue,
    Echo {
        exprs: Vec<Expr>,
    },
    Unset {
        vars: Vec<Expr>,
    },
    Goto {
        label: String,
    },
    Label {
        name: String,
    },
    InlineHtml {
        value: String,
    },
    Nop,
}

impl Stmt {
    pub fn expr(expr: Expr) -> Self {
        Self::Expression { expr }
    }

    pub fn ret(expr: Option<Expr>) -> Self {
        Self::Return { expr }
    }

    pub fn if_then(cond: Expr, then: Vec<Stmt>) -> Self {
        Self::If {
            cond,
            then,
            elseifs: Vec::new(),
            otherwise: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElseIf {
    pub cond: Expr,
    pub body: Vec<Stmt>,
}

/// `case <test>:` or `default:` when `test` is absent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub test: Option<Expr>,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Catch {
    pub types: Vec<Name>,
    /// Bound variable; absent for `catch (Foo)` without a variable.
    pub var: Option<String>,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaticVar {
    pub name: String,
    pub default: Option<Expr>,
}

// =============================================================================
// Expressions
// =============================================================================

/// Name of a variable: literal (`$a`) or computed (`$$a`, `${'a'}`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VarName {
    Literal(String),
    Dynamic(Box<Expr>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Concat,
    BitAnd,
    BitOr,
    BitXor,
    ShiftLeft,
    ShiftRight,
    BooleanAnd,
    BooleanOr,
    LogicalXor,
    Equal,
    NotEqual,
    Identical,
    NotIdentical,
    Greater,
    GreaterOrEqual,
    Smaller,
    SmallerOrEqual,
    Coalesce,
}

impl BinaryOperator {
    /// Zephir spelling of the operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "**",
            Self::Concat => ".",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::BooleanAnd => "&&",
            Self::BooleanOr => "||",
            Self::LogicalXor => "^",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Identical => "===",
            Self::NotIdentical => "!==",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
            Self::Smaller => "<",
            Self::SmallerOrEqual => "<=",
            Self::Coalesce => "??",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperator {
    Not,
    Minus,
    Plus,
    BitNot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncDecOperator {
    PreInc,
    PreDec,
    PostInc,
    PostDec,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastType {
    Int,
    Float,
    String,
    Bool,
    Array,
    Object,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Expr {
    Variable {
        name: VarName,
    },
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
        #[serde(default)]
        by_ref: bool,
    },
    AssignOp {
        op: BinaryOperator,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    IncDec {
        op: IncDecOperator,
        target: Box<Expr>,
    },
    PropertyFetch {
        object: Box<Expr>,
        property: String,
    },
    StaticPropertyFetch {
        class: Name,
        property: String,
    },
    ArrayDimFetch {
        base: Box<Expr>,
        dim: Option<Box<Expr>>,
    },
    /// Destructuring target: `[$a, , $b]` / `list($a, $b)`.
    List {
        items: Vec<Option<ArrayItem>>,
    },
    Array {
        items: Vec<ArrayItem>,
    },
    FuncCall {
        name: Name,
        #[serde(default)]
        args: Vec<Arg>,
    },
    MethodCall {
        object: Box<Expr>,
        method: String,
        #[serde(default)]
        args: Vec<Arg>,
    },
    StaticCall {
        class: Name,
        method: String,
        #[serde(default)]
        args: Vec<Arg>,
    },
    New {
        class: Name,
        #[serde(default)]
        args: Vec<Arg>,
    },
    ClassConstFetch {
        class: Name,
        constant: String,
    },
    ConstFetch {
        name: Name,
    },
    String {
        value: String,
    },
    Int {
        value: i64,
    },
    Float {
        value: f64,
    },
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
    Ternary {
        cond: Box<Expr>,
        /// Absent for the short form `a ?: b`.
        then: Option<Box<Expr>>,
        otherwise: Box<Expr>,
    },
    Isset {
        vars: Vec<Expr>,
    },
    Empty {
        expr: Box<Expr>,
    },
    Instanceof {
        expr: Box<Expr>,
        class: Name,
    },
    Cast {
        to: CastType,
        expr: Box<Expr>,
    },
    Eval {
        expr: Box<Expr>,
    },
    ShellExec {
        parts: Vec<Expr>,
    },
}

impl Expr {
    pub fn var(name: &str) -> Self {
        Self::Variable {
            name: VarName::Literal(name.to_string()),
        }
    }

    pub fn string(value: &str) -> Self {
        Self::String {
            value: value.to_string(),
        }
    }

    pub fn int(value: i64) -> Self {
        Self::Int { value }
    }

    pub fn constant(name: &str) -> Self {
        Self::ConstFetch {
            name: Name::new(name),
        }
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Self::Assign {
            target: Box::new(target),
            value: Box::new(value),
            by_ref: false,
        }
    }

    pub fn prop(object: Expr, property: &str) -> Self {
        Self::PropertyFetch {
            object: Box::new(object),
            property: property.to_string(),
        }
    }

    pub fn dim(base: Expr, dim: Option<Expr>) -> Self {
        Self::ArrayDimFetch {
            base: Box::new(base),
            dim: dim.map(Box::new),
        }
    }

    pub fn call(name: &str, args: Vec<Expr>) -> Self {
        Self::FuncCall {
            name: Name::new(name),
            args: args.into_iter().map(Arg::new).collect(),
        }
    }

    pub fn method_call(object: Expr, method: &str, args: Vec<Expr>) -> Self {
        Self::MethodCall {
            object: Box::new(object),
            method: method.to_string(),
            args: args.into_iter().map(Arg::new).collect(),
        }
    }

    pub fn array(values: Vec<Expr>) -> Self {
        Self::Array {
            items: values.into_iter().map(ArrayItem::new).collect(),
        }
    }

    pub fn list(slots: Vec<Option<Expr>>) -> Self {
        Self::List {
            items: slots.into_iter().map(|slot| slot.map(ArrayItem::new)).collect(),
        }
    }

    pub fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Self {
        Self::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Literal name of a plain variable (`$a` -> `a`).
    pub fn literal_var_name(&self) -> Option<&str> {
        match self {
            Self::Variable {
                name: VarName::Literal(name),
            } => Some(name),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arg {
    pub value: Expr,
    #[serde(default)]
    pub by_ref: bool,
    #[serde(default)]
    pub unpack: bool,
}

impl Arg {
    pub fn new(value: Expr) -> Self {
        Self {
            value,
            by_ref: false,
            unpack: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrayItem {
    pub key: Option<Expr>,
    pub value: Expr,
    #[serde(default)]
    pub by_ref: bool,
    #[serde(default)]
    pub unpack: bool,
}

impl ArrayItem {
    pub fn new(value: Expr) -> Self {
        Self {
            key: None,
            value,
            by_ref: false,
            unpack: false,
        }
    }

    pub fn keyed(key: Expr, value: Expr) -> Self {
        Self {
            key: Some(key),
            value,
            by_ref: false,
            unpack: false,
        }
    }
}
