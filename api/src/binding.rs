//! A [`ResultBinding`] is one row of a SPARQL result set.
use crate::term::Node;
use std::fmt;
use std::sync::Arc;

/// A mapping from the variables of a result set to (optional) values.
///
/// The variables are those declared in the header of the result set, in header order;
/// they are shared by all the bindings of the same result set.
/// A variable with no value in this row is *unbound*.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultBinding {
    variables: Arc<[Box<str>]>,
    values: Vec<Option<Node>>,
}

impl ResultBinding {
    /// Build a binding.
    ///
    /// # Panics
    /// if `values` does not have exactly one entry per variable.
    pub fn new(variables: Arc<[Box<str>]>, values: Vec<Option<Node>>) -> Self {
        assert_eq!(variables.len(), values.len());
        ResultBinding { variables, values }
    }

    /// The declared variables, in header order.
    pub fn variables(&self) -> &[Box<str>] {
        &self.variables
    }

    /// The value of variable `name`, or `None` if it is unbound or not declared.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.variables
            .iter()
            .position(|v| &**v == name)
            .and_then(|i| self.values[i].as_ref())
    }

    /// Iterate over all declared variables (in header order) with their value, if any.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Node>)> {
        self.variables
            .iter()
            .map(|v| &**v)
            .zip(self.values.iter().map(Option::as_ref))
    }

    /// The number of declared variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// The number of bound variables.
    pub fn bound_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn into_values(self) -> Vec<Option<Node>> {
        self.values
    }
}

impl fmt::Display for ResultBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (var, val) in self.iter() {
            if let Some(val) = val {
                if !first {
                    f.write_str(" ")?;
                }
                write!(f, "?{}={}", var, val)?;
                first = false;
            }
        }
        Ok(())
    }
}
