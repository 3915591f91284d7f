use std::fmt;

/// A property value as written in source.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text between quotes, verbatim.
    String(String),
    /// Numeric literal kept as its original text.
    Number(String),
    /// `$name`, resolved against labeled elements at generation time.
    Variable(String),
    /// `[a, b, ...]` of strings, numbers and variable references.
    Array(Vec<Value>),
    /// Raw text of a `{ ... }` block.
    CodeBlock(String),
}

impl Value {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Variable(_) => "variable reference",
            Value::Array(_) => "array",
            Value::CodeBlock(_) => "code block",
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Variable(name) => write!(f, "${}", name),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::CodeBlock(content) => write!(f, "{{ {} }}", content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_echoes_source() {
        let array = Value::Array(vec![
            Value::String("a b".into()),
            Value::Number("1.5".into()),
            Value::Variable("x".into()),
        ]);
        assert_eq!(array.to_string(), "[\"a b\", 1.5, $x]");
        assert_eq!(Value::CodeBlock("f()".into()).to_string(), "{ f() }");
    }

    #[test]
    fn kinds() {
        assert_eq!(Value::Variable("x".into()).kind_name(), "variable reference");
        assert_eq!(Value::Array(Vec::new()).as_array(), Some(&[][..]));
        assert_eq!(Value::String("s".into()).as_array(), None);
    }
}
