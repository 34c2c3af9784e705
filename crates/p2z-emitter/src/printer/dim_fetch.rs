//! Indexed fetches.
//!
//! Zephir only indexes variables and properties. Any other base (a call
//! result, `new`, a constant, a literal) is first stored in a `tmpDim<N>`
//! temporary:
//!
//! ```text
//! $x = foo()[0];        let tmpDim1 = foo();
//!                       let x = tmpDim1[0];
//! ```
//!
//! The variable collector runs the same conversion in probe mode to learn
//! which temporaries a method body will need before any of it is printed.

use p2z_ast::Expr;
use p2z_common::limits::TMP_DIM_PREFIX;

use super::Printer;
use crate::error::ConvertError;

impl<'p> Printer<'p> {
    pub(crate) fn convert_dim_fetch(
        &mut self,
        base: &Expr,
        dim: Option<&Expr>,
    ) -> Result<String, ConvertError> {
        let base = if is_indexable(base) {
            self.convert_expr(base)?
        } else {
            let value = self.convert_expr(base)?;
            let temp = self.next_dim_temp();
            self.hoist(format!("let {temp} = {value};"));
            temp
        };
        let dim = match dim {
            Some(dim) => self.convert_expr(dim)?,
            None => String::new(),
        };
        Ok(format!("{base}[{dim}]"))
    }

    fn next_dim_temp(&mut self) -> String {
        self.ctx.dim_counter += 1;
        let name = format!("{TMP_DIM_PREFIX}{}", self.ctx.dim_counter);
        self.ctx.created_temps.push(name.clone());
        name
    }

    /// Temporaries converting `expr` would create. Nothing is emitted and no
    /// diagnostic is recorded; the counter keeps advancing until the caller
    /// resets it.
    pub(crate) fn probe_dim_fetch(&mut self, expr: &Expr) -> Vec<String> {
        let before = self.ctx.created_temps.len();
        self.sandboxed(|printer| {
            if let Err(err) = printer.convert_expr(expr) {
                tracing::trace!(%err, "probe failed");
            }
        });
        self.ctx.created_temps.split_off(before)
    }
}

fn is_indexable(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Variable { .. }
            | Expr::PropertyFetch { .. }
            | Expr::StaticPropertyFetch { .. }
            | Expr::ArrayDimFetch { .. }
    )
}
