// ABOUTME: Lexical environments: symbol -> value bindings with a parent chain

use crate::error::EvalError;
use crate::value::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// A lexical scope. Bindings are a linear, insertion-ordered vector rather
/// than a hash map — this mirrors the original source's parallel `syms`/
/// `vals` arrays exactly, and gives `printenv` (§4.3) stable order for free.
///
/// `parent` is interior-mutable because application (§4.5) re-parents a
/// lambda's captured environment to the caller's environment at call time.
pub struct Environment {
    bindings: RefCell<Vec<(String, Value)>>,
    parent: RefCell<Option<Rc<Environment>>>,
}

impl Environment {
    /// Creates a new global environment with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(Vec::new()),
            parent: RefCell::new(None),
        })
    }

    /// Creates a new environment with the given parent.
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(Vec::new()),
            parent: RefCell::new(Some(parent)),
        })
    }

    /// Re-parents this environment. Used by the applier (§4.5) to link a
    /// lambda's captured environment to the caller's environment only at
    /// the moment of application.
    pub fn set_parent(&self, parent: Rc<Environment>) {
        *self.parent.borrow_mut() = Some(parent);
    }

    pub fn parent(&self) -> Option<Rc<Environment>> {
        self.parent.borrow().clone()
    }

    /// Local define (`put`, spec.md §4.3): replaces an existing binding in
    /// this scope or appends a new one. Never walks the parent chain.
    pub fn put(&self, name: &str, value: Value) {
        let mut bindings = self.bindings.borrow_mut();
        if let Some(slot) = bindings.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value;
        } else {
            bindings.push((name.to_string(), value));
        }
    }

    /// Global define (`def`, spec.md §4.3): ascends to the root environment
    /// and defines there.
    pub fn def(&self, name: &str, value: Value) {
        let mut current = self.parent();
        if current.is_none() {
            self.put(name, value);
            return;
        }
        while let Some(env) = current {
            match env.parent() {
                Some(next) => current = Some(next),
                None => {
                    env.put(name, value);
                    return;
                }
            }
        }
    }

    /// Walks the parent chain looking up `name`; a deep copy of the bound
    /// value is returned (Rust's `Clone` gives this for free).
    pub fn get(&self, name: &str) -> Result<Value, EvalError> {
        if let Some((_, value)) = self.bindings.borrow().iter().find(|(n, _)| n == name) {
            return Ok(value.clone());
        }
        if let Some(parent) = self.parent() {
            return parent.get(name);
        }
        Err(EvalError::UnboundSymbol(name.to_string()))
    }

    /// Deep-copies the bindings of this environment into a fresh one that
    /// shares the same parent pointer (spec.md §4.3 `copy`).
    pub fn copy(&self) -> Rc<Environment> {
        Rc::new(Environment {
            bindings: RefCell::new(self.bindings.borrow().clone()),
            parent: RefCell::new(self.parent()),
        })
    }

    /// Bindings in stable insertion order, for the `printenv` builtin.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.bindings.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_and_get() {
        let env = Environment::new();
        env.put("x", Value::IntNum(42));
        match env.get("x") {
            Ok(Value::IntNum(n)) => assert_eq!(n, 42),
            other => panic!("expected IntNum(42), got {:?}", other.map(|v| v.to_string())),
        }
    }

    #[test]
    fn unbound_symbol_errors() {
        let env = Environment::new();
        assert!(matches!(env.get("undefined"), Err(EvalError::UnboundSymbol(_))));
    }

    #[test]
    fn shadowing_in_child_does_not_affect_parent() {
        let parent = Environment::new();
        parent.put("x", Value::IntNum(1));

        let child = Environment::with_parent(parent.clone());
        child.put("x", Value::IntNum(2));

        assert!(matches!(child.get("x"), Ok(Value::IntNum(2))));
        assert!(matches!(parent.get("x"), Ok(Value::IntNum(1))));
    }

    #[test]
    fn parent_lookup_through_multiple_levels() {
        let grandparent = Environment::new();
        grandparent.put("a", Value::IntNum(1));
        let parent = Environment::with_parent(grandparent);
        parent.put("b", Value::IntNum(2));
        let child = Environment::with_parent(parent);
        child.put("c", Value::IntNum(3));

        assert!(matches!(child.get("a"), Ok(Value::IntNum(1))));
        assert!(matches!(child.get("b"), Ok(Value::IntNum(2))));
        assert!(matches!(child.get("c"), Ok(Value::IntNum(3))));
    }

    #[test]
    fn def_installs_in_root_regardless_of_call_site() {
        let root = Environment::new();
        let child = Environment::with_parent(root.clone());
        let grandchild = Environment::with_parent(child.clone());

        grandchild.def("g", Value::IntNum(99));

        assert!(matches!(root.get("g"), Ok(Value::IntNum(99))));
        assert!(child.entries().is_empty());
        assert!(grandchild.entries().is_empty());
    }

    #[test]
    fn entries_preserve_insertion_order() {
        let env = Environment::new();
        env.put("z", Value::IntNum(1));
        env.put("a", Value::IntNum(2));
        env.put("m", Value::IntNum(3));
        let names: Vec<_> = env.entries().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn set_parent_reparents_after_construction() {
        let a = Environment::new();
        a.put("x", Value::IntNum(1));
        let b = Environment::new();
        b.set_parent(a);
        assert!(matches!(b.get("x"), Ok(Value::IntNum(1))));
    }
}
