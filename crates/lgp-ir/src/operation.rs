//! Operation registry.

use lgp_core::{Error, Num, Result, MAX_ARITY};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

/// Evaluation function of an operation: `(registers, resolved_args) -> value`
pub type OpFn = dyn Fn(&[Num], &[Num]) -> Num + Send + Sync;

/// A named operation with a fixed arity.
///
/// The function must be total over its arguments. Anything that could fault
/// (division by zero and the like) has to return a fallback value instead.
#[derive(Clone)]
pub struct Operation {
    name: String,
    arity: usize,
    infix: Option<String>,
    func: Arc<OpFn>,
}

impl Operation {
    pub fn new<F>(name: impl Into<String>, arity: usize, func: F) -> Self
    where
        F: Fn(&[Num], &[Num]) -> Num + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arity,
            infix: None,
            func: Arc::new(func),
        }
    }

    /// Attach the symbol used when printing the operation between its arguments
    pub fn with_infix(mut self, symbol: impl Into<String>) -> Self {
        self.infix = Some(symbol.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn infix(&self) -> Option<&str> {
        self.infix.as_deref()
    }

    #[inline]
    pub fn eval(&self, registers: &[Num], args: &[Num]) -> Num {
        (self.func)(registers, args)
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("infix", &self.infix)
            .finish_non_exhaustive()
    }
}

/// Slot of an operation in its registry. Two statements use the same
/// operation iff their ids are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpId(pub u32);

impl OpId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Append-only catalog of operations
#[derive(Debug, Clone, Default)]
pub struct OperationSet {
    ops: Vec<Operation>,
}

impl OperationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_operations(ops: impl IntoIterator<Item = Operation>) -> Self {
        Self {
            ops: ops.into_iter().collect(),
        }
    }

    /// Register an operation and return its slot
    pub fn add(&mut self, op: Operation) -> OpId {
        if self.find(&op.name).is_some() {
            tracing::warn!("Operation '{}' registered twice, find() returns the first", op.name);
        }
        self.ops.push(op);
        OpId((self.ops.len() - 1) as u32)
    }

    pub fn get(&self, id: OpId) -> Option<&Operation> {
        self.ops.get(id.index())
    }

    /// Find an operation by name
    pub fn find(&self, name: &str) -> Option<OpId> {
        self.ops
            .iter()
            .position(|op| op.name == name)
            .map(|idx| OpId(idx as u32))
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OpId, &Operation)> {
        self.ops
            .iter()
            .enumerate()
            .map(|(idx, op)| (OpId(idx as u32), op))
    }

    /// Pick an operation uniformly
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> OpId {
        OpId(rng.gen_range(0..self.ops.len()) as u32)
    }

    /// Check the registry is usable for building programs
    pub fn validate(&self) -> Result<()> {
        if self.ops.is_empty() {
            return Err(Error::MissingComponent(
                "no operations registered".to_string(),
            ));
        }

        for op in &self.ops {
            if op.arity == 0 || op.arity > MAX_ARITY {
                return Err(Error::Validation(format!(
                    "operation '{}' has arity {}, expected 1 to {}",
                    op.name, op.arity, MAX_ARITY
                )));
            }
        }

        Ok(())
    }
}

impl Index<OpId> for OperationSet {
    type Output = Operation;

    fn index(&self, id: OpId) -> &Operation {
        &self.ops[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops;

    #[test]
    fn test_registry_slots() {
        let mut set = OperationSet::new();
        assert!(set.is_empty());

        let add = set.add(ops::add());
        let mul = set.add(ops::mul());

        assert_eq!(add, OpId(0));
        assert_eq!(mul, OpId(1));
        assert_eq!(set.len(), 2);
        assert_eq!(set[mul].name(), "mul");
        assert_eq!(set.find("add"), Some(add));
        assert_eq!(set.find("pow"), None);
        assert!(set.get(OpId(7)).is_none());
    }

    #[test]
    fn test_custom_operation() {
        let op = Operation::new("first_reg", 1, |registers, args| registers[0] + args[0])
            .with_infix("@");
        assert_eq!(op.arity(), 1);
        assert_eq!(op.infix(), Some("@"));
        assert_eq!(op.eval(&[2.0, 0.0], &[3.0]), 5.0);
    }

    #[test]
    fn test_validate_registry() {
        assert!(matches!(
            OperationSet::new().validate(),
            Err(Error::MissingComponent(_))
        ));

        let set = OperationSet::with_operations(vec![
            ops::add(),
            Operation::new("ternary", 3, |_, args| args[0]),
        ]);
        assert!(matches!(set.validate(), Err(Error::Validation(_))));

        let set = OperationSet::with_operations(vec![
            ops::add(),
            Operation::new("nullary", 0, |_, _| 1.0),
        ]);
        assert!(set.validate().is_err());

        let set = OperationSet::with_operations(ops::arithmetic());
        assert!(set.validate().is_ok());
    }
}
