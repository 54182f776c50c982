//! Static parameter descriptors, one per constructor.
use super::value::ArgValue;

/// A single declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: &'static str,
    /// `None` marks a required parameter.
    pub default: Option<ArgValue>,
    /// Collects all remaining positional arguments. Only valid as the last parameter.
    pub variadic: bool,
}

impl Param {
    pub fn required(name: &'static str) -> Self {
        Self { name, default: None, variadic: false }
    }

    pub fn optional(name: &'static str, default: impl Into<ArgValue>) -> Self {
        Self { name, default: Some(default.into()), variadic: false }
    }

    pub fn variadic(name: &'static str) -> Self {
        Self { name, default: None, variadic: true }
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none() && !self.variadic
    }
}

/// The ordered parameter list of a constructor, excluding the receiver.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub op_name: &'static str,
    pub params: Vec<Param>,
}

impl Signature {
    /// Builds a signature. A variadic parameter anywhere but last is a
    /// programming error in the table and is rejected at construction.
    pub fn new(op_name: &'static str, params: Vec<Param>) -> Self {
        let last = params.len().saturating_sub(1);
        assert!(
            params.iter().enumerate().all(|(i, p)| !p.variadic || i == last),
            "variadic parameter must be last in signature of {}",
            op_name
        );
        Self { op_name, params }
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name == name)
    }

    pub fn variadic_tail(&self) -> Option<&Param> {
        self.params.last().filter(|p| p.variadic)
    }

    /// Number of parameters that can be filled by a single positional argument.
    pub fn fixed_len(&self) -> usize {
        self.params.len() - usize::from(self.variadic_tail().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_len_excludes_variadic_tail() {
        let sig = Signature::new("Slice", vec![Param::variadic("slices")]);
        assert_eq!(sig.fixed_len(), 0);
        let sig = Signature::new("PadEnd", vec![Param::required("pad_shape"), Param::optional("pad_value", ArgValue::Absent)]);
        assert_eq!(sig.fixed_len(), 2);
        assert!(sig.variadic_tail().is_none());
    }

    #[test]
    #[should_panic(expected = "variadic parameter must be last")]
    fn test_variadic_must_be_last() {
        Signature::new("Bad", vec![Param::variadic("xs"), Param::required("y")]);
    }
}
