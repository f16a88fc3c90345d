//! Callable values used for function properties and accessors.

use std::fmt;
use std::rc::Rc;

use crate::Value;

type NativeCall = dyn Fn(&[Value]) -> Value;

/// A named host function. Getters are called with no arguments, setters with
/// the assigned value as the only argument.
#[derive(Clone)]
pub struct NativeFn {
    name: Rc<str>,
    func: Rc<NativeCall>,
}

impl NativeFn {
    pub fn new(name: impl Into<String>, func: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Self {
            name: Rc::from(name.into()),
            func: Rc::new(func),
        }
    }

    /// A getter that always returns `value`.
    pub fn constant(name: impl Into<String>, value: Value) -> Self {
        Self::new(name, move |_| value.clone())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.func)(args)
    }

    /// Identity comparison; two clones of one function are the same function.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::as_ptr(&self.func).cast::<()>() == Rc::as_ptr(&other.func).cast::<()>()
    }
}

impl PartialEq for NativeFn {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Function: {}]", self.name)
    }
}
