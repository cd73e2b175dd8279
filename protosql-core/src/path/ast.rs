//! Path AST types.

use std::fmt;

/// One step of a compiled path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// `.name`
    Field(String),

    /// `[i]`, negative counts from the end
    Index(i64),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Field(name) => write!(f, ".{name}"),
            Step::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// Accessor applied to an enum value.
///
/// The parser has no schema, so `.name` and `.number` are plain field steps
/// until evaluation reaches an enum-valued node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumAccessor {
    Name,
    Number,
}

impl EnumAccessor {
    pub fn from_field(name: &str) -> Option<Self> {
        match name {
            "name" => Some(EnumAccessor::Name),
            "number" => Some(EnumAccessor::Number),
            _ => None,
        }
    }
}

/// A compiled path: the root `$` followed by steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    steps: Vec<Step>,
}

impl Path {
    /// The root path `$`.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    /// Append a field step.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.steps.push(Step::Field(name.into()));
        self
    }

    /// Append an index step.
    pub fn index(mut self, index: i64) -> Self {
        self.steps.push(Step::Index(index));
        self
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for step in &self.steps {
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let path = Path::root().field("phones").index(-1).field("type").field("name");
        assert_eq!(path.to_string(), "$.phones[-1].type.name");
        assert_eq!(Path::root().to_string(), "$");
    }

    #[test]
    fn test_enum_accessor() {
        assert_eq!(EnumAccessor::from_field("name"), Some(EnumAccessor::Name));
        assert_eq!(EnumAccessor::from_field("number"), Some(EnumAccessor::Number));
        assert_eq!(EnumAccessor::from_field("Name"), None);
    }
}
