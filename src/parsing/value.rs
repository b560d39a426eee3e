//! Values produced by a successful parse

use std::fmt;

/// The result tree assembled by parsers. Matchers produce `Text`, the
/// collecting combinators produce `List`, and `map()` is free to turn
/// either into a `Number` or anything else.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    List(Vec<Value>),
}

impl Value {
    pub fn list<I>(values: I) -> Value
    where
        I: IntoIterator<Item = Value>,
    {
        Value::List(
            values
                .into_iter()
                .collect(),
        )
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(values) => Some(values),
            _ => None,
        }
    }

    /// Take the elements of a list, or wrap a scalar in a list of one.
    pub fn into_list(self) -> Vec<Value> {
        match self {
            Value::List(values) => values,
            other => vec![other],
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Number of elements if this is a list; scalars count as one.
    pub fn len(&self) -> usize {
        match self {
            Value::List(values) => values.len(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::List(values) if values.is_empty())
    }

    /// Collapse a list holding exactly one element down to that element.
    /// Anything else is returned as is.
    pub fn unwrap_singleton(self) -> Value {
        match self {
            Value::List(mut values) if values.len() == 1 => values.remove(0),
            other => other,
        }
    }

    /// Render this value with nested lists bracketed and elements joined by
    /// the given separator.
    pub fn join(&self, separator: &str) -> String {
        match self {
            Value::Text(text) => text.clone(),
            Value::Number(number) => number.to_string(),
            Value::List(values) => {
                let inner: Vec<String> = values
                    .iter()
                    .map(|value| value.join(separator))
                    .collect();
                format!("[{}]", inner.join(separator))
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.join(" "))
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Value::Number(number)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::List(values)
    }
}
