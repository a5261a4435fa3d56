//! Built-in functions, grouped by the categories of spec.md §4.4/§4.7/§4.8.

pub mod arithmetic;
pub mod bignum;
pub mod comparison;
pub mod control;
pub mod io;
pub mod lists;

use crate::env::Environment;
use std::rc::Rc;

/// Registers every builtin in the global environment. Order doesn't matter
/// semantically — bindings are independent — but matches the grouping above.
pub fn register_all(env: &Rc<Environment>) {
    arithmetic::register(env);
    bignum::register(env);
    comparison::register(env);
    control::register(env);
    lists::register(env);
    io::register(env);
}
