//! Generic tree walker.
//!
//! Yields every node of a subtree depth-first (pre-order, children in source
//! order) together with the kinds of its ancestors, outermost first. The
//! walk starts below the roots' own ancestors: a root has an empty chain.

use crate::kind::NodeKind;
use crate::node::{Arg, ArrayItem, Case, Catch, ElseIf, Expr, StaticVar, Stmt, VarName};
use smallvec::SmallVec;

pub type AncestorChain = SmallVec<[NodeKind; 8]>;

/// Borrowed reference to any node that can own children.
#[derive(Clone, Copy, Debug)]
pub enum NodeRef<'a> {
    Stmt(&'a Stmt),
    Expr(&'a Expr),
    Arg(&'a Arg),
    ArrayItem(&'a ArrayItem),
    ElseIf(&'a ElseIf),
    Case(&'a Case),
    Catch(&'a Catch),
    StaticVar(&'a StaticVar),
}

impl<'a> From<&'a Stmt> for NodeRef<'a> {
    fn from(stmt: &'a Stmt) -> Self {
        Self::Stmt(stmt)
    }
}

impl<'a> From<&'a Expr> for NodeRef<'a> {
    fn from(expr: &'a Expr) -> Self {
        Self::Expr(expr)
    }
}

impl<'a> NodeRef<'a> {
    pub fn kind(self) -> NodeKind {
        match self {
            Self::Stmt(stmt) => stmt.kind(),
            Self::Expr(expr) => expr.kind(),
            Self::Arg(_) => NodeKind::Arg,
            Self::ArrayItem(_) => NodeKind::ArrayItem,
            Self::ElseIf(_) => NodeKind::ElseIf,
            Self::Case(_) => NodeKind::Case,
            Self::Catch(_) => NodeKind::Catch,
            Self::StaticVar(_) => NodeKind::StaticVar,
        }
    }

    /// Direct children in source order.
    pub fn children(self) -> SmallVec<[NodeRef<'a>; 4]> {
        let mut out = SmallVec::new();
        match self {
            Self::Stmt(stmt) => stmt_children(stmt, &mut out),
            Self::Expr(expr) => expr_children(expr, &mut out),
            Self::Arg(arg) => out.push(Self::Expr(&arg.value)),
            Self::ArrayItem(item) => {
                if let Some(key) = &item.key {
                    out.push(Self::Expr(key));
                }
                out.push(Self::Expr(&item.value));
            }
            Self::ElseIf(elseif) => {
                out.push(Self::Expr(&elseif.cond));
                out.extend(elseif.body.iter().map(Self::Stmt));
            }
            Self::Case(case) => {
                if let Some(test) = &case.test {
                    out.push(Self::Expr(test));
                }
                out.extend(case.body.iter().map(Self::Stmt));
            }
            Self::Catch(catch) => out.extend(catch.body.iter().map(Self::Stmt)),
            Self::StaticVar(var) => {
                if let Some(default) = &var.default {
                    out.push(Self::Expr(default));
                }
            }
        }
        out
    }
}

fn stmt_children<'a>(stmt: &'a Stmt, out: &mut SmallVec<[NodeRef<'a>; 4]>) {
    let stmts = |body: &'a [Stmt]| body.iter().map(NodeRef::Stmt);
    match stmt {
        Stmt::Expression { expr } | Stmt::Throw { expr } => out.push(NodeRef::Expr(expr)),
        Stmt::Return { expr } => {
            if let Some(expr) = expr {
                out.push(NodeRef::Expr(expr));
            }
        }
        Stmt::If {
            cond,
            then,
            elseifs,
            otherwise,
        } => {
            out.push(NodeRef::Expr(cond));
            out.extend(stmts(then));
            out.extend(elseifs.iter().map(NodeRef::ElseIf));
            if let Some(otherwise) = otherwise {
                out.extend(stmts(otherwise));
            }
        }
        Stmt::While { cond, body } => {
            out.push(NodeRef::Expr(cond));
            out.extend(stmts(body));
        }
        Stmt::DoWhile { body, cond } => {
            out.extend(stmts(body));
            out.push(NodeRef::Expr(cond));
        }
        Stmt::For {
            init,
            cond,
            step,
            body,
        } => {
            out.extend(init.iter().map(NodeRef::Expr));
            out.extend(cond.iter().map(NodeRef::Expr));
            out.extend(step.iter().map(NodeRef::Expr));
            out.extend(stmts(body));
        }
        Stmt::Foreach {
            expr,
            key,
            value,
            body,
            ..
        } => {
            out.push(NodeRef::Expr(expr));
            if let Some(key) = key {
                out.push(NodeRef::Expr(key));
            }
            out.push(NodeRef::Expr(value));
            out.extend(stmts(body));
        }
        Stmt::Switch { subject, cases } => {
            out.push(NodeRef::Expr(subject));
            out.extend(cases.iter().map(NodeRef::Case));
        }
        Stmt::Static { vars } => out.extend(vars.iter().map(NodeRef::StaticVar)),
        Stmt::TryCatch {
            body,
            catches,
            finally,
        } => {
            out.extend(stmts(body));
            out.extend(catches.iter().map(NodeRef::Catch));
            if let Some(finally) = finally {
                out.extend(stmts(finally));
            }
        }
        Stmt::Echo { exprs } => out.extend(exprs.iter().map(NodeRef::Expr)),
        Stmt::Unset { vars } => out.extend(vars.iter().map(NodeRef::Expr)),
        Stmt::Break
        | Stmt::Continue
        | Stmt::Goto { .. }
        | Stmt::Label { .. }
        | Stmt::InlineHtml { .. }
        | Stmt::Nop => {}
    }
}

fn expr_children<'a>(expr: &'a Expr, out: &mut SmallVec<[NodeRef<'a>; 4]>) {
    let args = |args: &'a [Arg]| args.iter().map(NodeRef::Arg);
    match expr {
        Expr::Variable { name } => {
            if let VarName::Dynamic(inner) = name {
                out.push(NodeRef::Expr(inner));
            }
        }
        Expr::Assign { target, value, .. } | Expr::AssignOp { target, value, .. } => {
            out.push(NodeRef::Expr(target));
            out.push(NodeRef::Expr(value));
        }
        Expr::IncDec { target, .. } => out.push(NodeRef::Expr(target)),
        Expr::PropertyFetch { object, .. } => out.push(NodeRef::Expr(object)),
        Expr::ArrayDimFetch { base, dim } => {
            out.push(NodeRef::Expr(base));
            if let Some(dim) = dim {
                out.push(NodeRef::Expr(dim));
            }
        }
        Expr::List { items } => out.extend(items.iter().flatten().map(NodeRef::ArrayItem)),
        Expr::Array { items } => out.extend(items.iter().map(NodeRef::ArrayItem)),
        Expr::FuncCall { args: a, .. }
        | Expr::StaticCall { args: a, .. }
        | Expr::New { args: a, .. } => out.extend(args(a)),
        Expr::MethodCall {
            object, args: a, ..
        } => {
            out.push(NodeRef::Expr(object));
            out.extend(args(a));
        }
        Expr::BinaryOp { left, right, .. } => {
            out.push(NodeRef::Expr(left));
            out.push(NodeRef::Expr(right));
        }
        Expr::UnaryOp { operand, .. } => out.push(NodeRef::Expr(operand)),
        Expr::Ternary {
            cond,
            then,
            otherwise,
        } => {
            out.push(NodeRef::Expr(cond));
            if let Some(then) = then {
                out.push(NodeRef::Expr(then));
            }
            out.push(NodeRef::Expr(otherwise));
        }
        Expr::Isset { vars } => out.extend(vars.iter().map(NodeRef::Expr)),
        Expr::Empty { expr }
        | Expr::Instanceof { expr, .. }
        | Expr::Cast { expr, .. }
        | Expr::Eval { expr } => out.push(NodeRef::Expr(expr)),
        Expr::ShellExec { parts } => out.extend(parts.iter().map(NodeRef::Expr)),
        Expr::StaticPropertyFetch { .. }
        | Expr::ClassConstFetch { .. }
        | Expr::ConstFetch { .. }
        | Expr::String { .. }
        | Expr::Int { .. }
        | Expr::Float { .. } => {}
    }
}

/// A node reached by the walker.
#[derive(Clone, Debug)]
pub struct Visit<'a> {
    pub node: NodeRef<'a>,
    /// Kinds of the enclosing nodes, outermost first.
    pub ancestors: AncestorChain,
}

impl Visit<'_> {
    pub fn has_ancestor(&self, kind: NodeKind) -> bool {
        self.ancestors.contains(&kind)
    }
}

/// Depth-first pre-order iterator; see [`descendants`].
pub struct Descendants<'a> {
    stack: Vec<Visit<'a>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let visit = self.stack.pop()?;
        let children = visit.node.children();
        if !children.is_empty() {
            let mut chain = visit.ancestors.clone();
            chain.push(visit.node.kind());
            self.stack.extend(children.into_iter().rev().map(|node| Visit {
                node,
                ancestors: chain.clone(),
            }));
        }
        Some(visit)
    }
}

/// Walk every node under `roots` (roots included).
pub fn descendants<'a, I>(roots: I) -> Descendants<'a>
where
    I: IntoIterator,
    I::Item: Into<NodeRef<'a>>,
    I::IntoIter: DoubleEndedIterator,
{
    Descendants {
        stack: roots
            .into_iter()
            .rev()
            .map(|node| Visit {
                node: node.into(),
                ancestors: AncestorChain::new(),
            })
            .collect(),
    }
}

/// Whether any node under `roots` has the given kind.
pub fn contains_kind<'a, I>(roots: I, kind: NodeKind) -> bool
where
    I: IntoIterator,
    I::Item: Into<NodeRef<'a>>,
    I::IntoIter: DoubleEndedIterator,
{
    descendants(roots).any(|visit| visit.node.kind() == kind)
}
