//! Structural node kinds.
//!
//! `NodeKind` is the finite tag the converter dispatches on and the walker
//! records in ancestor chains. It mirrors the variants of `Stmt` and `Expr`
//! plus the auxiliary nodes that own children (`Arg`, `ArrayItem`, ...).

use crate::node::{ClassMember, Expr, Stmt};
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum NodeKind {
    // Declarations
    Class,
    Method,
    Property,
    ClassConst,
    Param,

    // Statements
    ExpressionStmt,
    Return,
    If,
    ElseIf,
    While,
    DoWhile,
    For,
    Foreach,
    Switch,
    Case,
    Static,
    StaticVar,
    TryCatch,
    Catch,
    Throw,
    Break,
    Continue,
    Echo,
    Unset,
    Goto,
    Label,
    InlineHtml,
    Nop,

    // Expressions
    Variable,
    Assign,
    AssignOp,
    IncDec,
    PropertyFetch,
    StaticPropertyFetch,
    ArrayDimFetch,
    List,
    Array,
    ArrayItem,
    FuncCall,
    MethodCall,
    StaticCall,
    New,
    Arg,
    ClassConstFetch,
    ConstFetch,
    String,
    Int,
    Float,
    BinaryOp,
    UnaryOp,
    Ternary,
    Isset,
    Empty,
    Instanceof,
    Cast,
    Eval,
    ShellExec,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Class => "Class",
            Self::Method => "Method",
            Self::Property => "Property",
            Self::ClassConst => "ClassConst",
            Self::Param => "Param",
            Self::ExpressionStmt => "Expression",
            Self::Return => "Return",
            Self::If => "If",
            Self::ElseIf => "ElseIf",
            Self::While => "While",
            Self::DoWhile => "DoWhile",
            Self::For => "For",
            Self::Foreach => "Foreach",
            Self::Switch => "Switch",
            Self::Case => "Case",
            Self::Static => "Static",
            Self::StaticVar => "StaticVar",
            Self::TryCatch => "TryCatch",
            Self::Catch => "Catch",
            Self::Throw => "Throw",
            Self::Break => "Break",
            Self::Continue => "Continue",
            Self::Echo => "Echo",
            Self::Unset => "Unset",
            Self::Goto => "Goto",
            Self::Label => "Label",
            Self::InlineHtml => "InlineHtml",
            Self::Nop => "Nop",
            Self::Variable => "Variable",
            Self::Assign => "Assign",
            Self::AssignOp => "AssignOp",
            Self::IncDec => "IncDec",
            Self::PropertyFetch => "PropertyFetch",
            Self::StaticPropertyFetch => "StaticPropertyFetch",
            Self::ArrayDimFetch => "ArrayDimFetch",
            Self::List => "List",
            Self::Array => "Array",
            Self::ArrayItem => "ArrayItem",
            Self::FuncCall => "FuncCall",
            Self::MethodCall => "MethodCall",
            Self::StaticCall => "StaticCall",
            Self::New => "New",
            Self::Arg => "Arg",
            Self::ClassConstFetch => "ClassConstFetch",
            Self::ConstFetch => "ConstFetch",
            Self::String => "String",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::BinaryOp => "BinaryOp",
            Self::UnaryOp => "UnaryOp",
            Self::Ternary => "Ternary",
            Self::Isset => "Isset",
            Self::Empty => "Empty",
            Self::Instanceof => "Instanceof",
            Self::Cast => "Cast",
            Self::Eval => "Eval",
            Self::ShellExec => "ShellExec",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Stmt {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Expression { .. } => NodeKind::ExpressionStmt,
            Self::Return { .. } => NodeKind::Return,
            Self::If { .. } => NodeKind::If,
            Self::While { .. } => NodeKind::While,
            Self::DoWhile { .. } => NodeKind::DoWhile,
            Self::For { .. } => NodeKind::For,
            Self::Foreach { .. } => NodeKind::Foreach,
            Self::Switch { .. } => NodeKind::Switch,
            Self::Static { .. } => NodeKind::Static,
            Self::TryCatch { .. } => NodeKind::TryCatch,
            Self::Throw { .. } => NodeKind::Throw,
            Self::Break => NodeKind::Break,
            Self::Continue => NodeKind::Continue,
            Self::Echo { .. } => NodeKind::Echo,
            Self::Unset { .. } => NodeKind::Unset,
            Self::Goto { .. } => NodeKind::Goto,
            Self::Label { .. } => NodeKind::Label,
            Self::InlineHtml { .. } => NodeKind::InlineHtml,
            Self::Nop => NodeKind::Nop,
        }
    }
}

impl Expr {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Variable { .. } => NodeKind::Variable,
            Self::Assign { .. } => NodeKind::Assign,
            Self::AssignOp { .. } => NodeKind::AssignOp,
            Self::IncDec { .. } => NodeKind::IncDec,
            Self::PropertyFetch { .. } => NodeKind::PropertyFetch,
            Self::StaticPropertyFetch { .. } => NodeKind::StaticPropertyFetch,
            Self::ArrayDimFetch { .. } => NodeKind::ArrayDimFetch,
            Self::List { .. } => NodeKind::List,
            Self::Array { .. } => NodeKind::Array,
            Self::FuncCall { .. } => NodeKind::FuncCall,
            Self::MethodCall { .. } => NodeKind::MethodCall,
            Self::StaticCall { .. } => NodeKind::StaticCall,
            Self::New { .. } => NodeKind::New,
            Self::ClassConstFetch { .. } => NodeKind::ClassConstFetch,
            Self::ConstFetch { .. } => NodeKind::ConstFetch,
            Self::String { .. } => NodeKind::String,
            Self::Int { .. } => NodeKind::Int,
            Self::Float { .. } => NodeKind::Float,
            Self::BinaryOp { .. } => NodeKind::BinaryOp,
            Self::UnaryOp { .. } => NodeKind::UnaryOp,
            Self::Ternary { .. } => NodeKind::Ternary,
            Self::Isset { .. } => NodeKind::Isset,
            Self::Empty { .. } => NodeKind::Empty,
            Self::Instanceof { .. } => NodeKind::Instanceof,
            Self::Cast { .. } => NodeKind::Cast,
            Self::Eval { .. } => NodeKind::Eval,
            Self::ShellExec { .. } => NodeKind::ShellExec,
        }
    }
}

impl ClassMember {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Method(_) => NodeKind::Method,
            Self::Property(_) => NodeKind::Property,
            Self::Constant(_) => NodeKind::ClassConst,
        }
    }
}
