//! Mutable state threaded through the conversion of one method.
//!
//! A fresh context is created for every method, so nothing here survives
//! from one method to the next.

#[derive(Debug, Default)]
pub struct ConvertContext {
    /// Name of the method being converted; `None` while printing class-level
    /// members (constants, property defaults).
    pub current_method: Option<String>,
    /// Counter behind `tmpDim<N>` names.
    pub(crate) dim_counter: usize,
    /// Lines hoisted out of the statement being converted, emitted right
    /// before it.
    pub(crate) prelude: Vec<String>,
    /// `tmpDim` names handed out since the last reset.
    pub(crate) created_temps: Vec<String>,
    /// Set while converting an `if` condition: literal arrays are hoisted.
    pub(crate) hoist_array_literals: bool,
    /// One entry per enclosing loop, innermost last: the lines a `continue`
    /// must run before jumping (a lowered `for` step, a hoisted condition).
    pub(crate) loop_continues: Vec<Vec<String>>,
}

impl ConvertContext {
    pub fn for_method(name: &str) -> Self {
        Self {
            current_method: Some(name.to_string()),
            ..Self::default()
        }
    }

    /// Forget every temporary handed out so far.
    pub(crate) fn reset_temporaries(&mut self) {
        self.dim_counter = 0;
        self.created_temps.clear();
    }
}
