//! [`JsonValue`] and its accessors.

use miniserde::json::{Array, Number, Object, Value};

/// A JSON document, either parsed from a request body or built for a
/// response.
///
/// Readers never fail: asking for a missing key or the wrong type yields
/// null or `None`, so handlers decide what absence means.
///
/// ```
/// use trivia_api::json;
///
/// let body = json::try_parse(br#"{"previous_questions":[3,7],"quiz_category":{"id":2}}"#).unwrap();
/// assert_eq!(body.get("quiz_category").get("id").int(), Some(2));
/// assert_eq!(body.get("previous_questions").items().map(|v| v.len()), Some(2));
/// assert!(body.get("missing").is_null());
/// ```
#[derive(Clone)]
pub struct JsonValue(Value);

impl JsonValue {
    pub(crate) const fn new(value: Value) -> Self {
        Self(value)
    }

    pub(crate) const fn null() -> Self {
        Self(Value::Null)
    }

    pub(crate) fn object() -> Self {
        Self(Value::Object(Object::new()))
    }

    pub(crate) fn array() -> Self {
        Self(Value::Array(Array::new()))
    }

    /// Object member (null if missing or not an object).
    #[must_use]
    pub fn get(&self, key: &str) -> Self {
        match &self.0 {
            Value::Object(obj) => obj.get(key).cloned().map_or_else(Self::null, Self),
            _ => Self::null(),
        }
    }

    /// Whether this is an object holding `key`, even with a null value.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        matches!(&self.0, Value::Object(obj) if obj.contains_key(key))
    }

    /// Array element (null if out of bounds or not an array).
    #[must_use]
    pub fn at(&self, index: usize) -> Self {
        match &self.0 {
            Value::Array(arr) => arr.get(index).cloned().map_or_else(Self::null, Self),
            _ => Self::null(),
        }
    }

    /// Array elements, `None` if not an array.
    #[must_use]
    pub fn items(&self) -> Option<Vec<Self>> {
        match &self.0 {
            Value::Array(arr) => Some(arr.iter().cloned().map(Self).collect()),
            _ => None,
        }
    }

    /// Object keys in sorted order (empty if not an object).
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        match &self.0 {
            Value::Object(obj) => obj.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// Array or object length.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match &self.0 {
            Value::Array(arr) => Some(arr.len()),
            Value::Object(obj) => Some(obj.len()),
            _ => None,
        }
    }

    /// Whether this is an empty array or object.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// String contents, `None` if not a string.
    #[must_use]
    pub fn str(&self) -> Option<String> {
        match &self.0 {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Integer value, `None` if not a number or not integral.
    ///
    /// Floats are accepted when they hold a whole number within 2^53.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // range and fraction checked first
    pub fn int(&self) -> Option<i64> {
        const MAX_SAFE_INT: f64 = 9_007_199_254_740_992.0;
        match &self.0 {
            Value::Number(Number::I64(i)) => Some(*i),
            Value::Number(Number::U64(u)) => i64::try_from(*u).ok(),
            Value::Number(Number::F64(f))
                if f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INT =>
            {
                Some(*f as i64)
            },
            _ => None,
        }
    }

    /// Boolean value, `None` if not a boolean.
    #[must_use]
    pub const fn bool(&self) -> Option<bool> {
        match &self.0 {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Whether this is null (including a missing member).
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self.0, Value::Null)
    }

    /// Whether this is an object.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self.0, Value::Object(_))
    }

    /// Set an object member, turning a non-object into an object first.
    #[must_use]
    pub fn set(mut self, key: &str, value: Self) -> Self {
        if let Value::Object(obj) = &mut self.0 {
            obj.insert(key.to_string(), value.0);
            return self;
        }
        let mut obj = Object::new();
        obj.insert(key.to_string(), value.0);
        Self(Value::Object(obj))
    }

    /// Append to an array, turning a non-array into an array first.
    #[must_use]
    pub fn push(mut self, value: Self) -> Self {
        if let Value::Array(arr) = &mut self.0 {
            arr.push(value.0);
            return self;
        }
        let mut arr = Array::new();
        arr.push(value.0);
        Self(Value::Array(arr))
    }

    /// Serialized bytes.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> Self {
        Self(Value::String(s))
    }
}

impl From<i64> for JsonValue {
    fn from(n: i64) -> Self {
        Self(Value::Number(Number::I64(n)))
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        Self(Value::Bool(b))
    }
}

impl std::fmt::Display for JsonValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&miniserde::json::to_string(&self.0))
    }
}

impl std::fmt::Debug for JsonValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}
