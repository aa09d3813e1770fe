//! [`ToJson`] for primitives and trivia records.

use super::builder::{arr, bool, int, null, obj, str};
use super::value::JsonValue;
use trivia_core::{Category, CategoryId, Difficulty, Question, QuestionId};

/// Conversion into a [`JsonValue`].
///
/// Trivia records serialize with the field names the frontend reads:
///
/// ```
/// use trivia_api::json::ToJson;
/// use trivia_core::{CategoryId, Difficulty, Question, QuestionId};
///
/// let question = Question {
///     id: QuestionId(5),
///     question: "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?".into(),
///     answer: "Maya Angelou".into(),
///     category: CategoryId(4),
///     difficulty: Difficulty::new(2).unwrap(),
/// };
/// let json = question.to_json();
/// assert_eq!(json.get("id").int(), Some(5));
/// assert_eq!(json.get("category").int(), Some(4));
/// assert_eq!(json.get("difficulty").int(), Some(2));
/// ```
pub trait ToJson {
    /// Convert this value to JSON.
    fn to_json(&self) -> JsonValue;
}

impl ToJson for JsonValue {
    #[inline]
    fn to_json(&self) -> JsonValue {
        self.clone()
    }
}

impl ToJson for String {
    fn to_json(&self) -> JsonValue {
        str(self)
    }
}

impl ToJson for &str {
    fn to_json(&self) -> JsonValue {
        str(*self)
    }
}

impl ToJson for bool {
    fn to_json(&self) -> JsonValue {
        bool(*self)
    }
}

macro_rules! lossless_int_to_json {
    ($($ty:ty),*) => {
        $(
            impl ToJson for $ty {
                fn to_json(&self) -> JsonValue {
                    int(i64::from(*self))
                }
            }
        )*
    };
}

lossless_int_to_json!(i64, u16, u32);

/// Saturates at `i64::MAX`.
impl ToJson for usize {
    fn to_json(&self) -> JsonValue {
        int(i64::try_from(*self).unwrap_or(i64::MAX))
    }
}

impl<T: ToJson> ToJson for Option<T> {
    fn to_json(&self) -> JsonValue {
        self.as_ref().map_or_else(null, ToJson::to_json)
    }
}

impl<T: ToJson> ToJson for [T] {
    fn to_json(&self) -> JsonValue {
        self.iter().fold(arr(), |acc, item| acc.push(item.to_json()))
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    #[inline]
    fn to_json(&self) -> JsonValue {
        self.as_slice().to_json()
    }
}

// === Trivia records ===

impl ToJson for QuestionId {
    #[inline]
    fn to_json(&self) -> JsonValue {
        int(self.get())
    }
}

impl ToJson for CategoryId {
    #[inline]
    fn to_json(&self) -> JsonValue {
        int(self.get())
    }
}

impl ToJson for Difficulty {
    #[inline]
    fn to_json(&self) -> JsonValue {
        int(i64::from(self.get()))
    }
}

impl ToJson for Question {
    fn to_json(&self) -> JsonValue {
        obj()
            .set("id", self.id.to_json())
            .set("question", self.question.to_json())
            .set("answer", self.answer.to_json())
            .set("category", self.category.to_json())
            .set("difficulty", self.difficulty.to_json())
    }
}

/// `{"id": n, "type": name}`, the shape of `current_category`.
impl ToJson for Category {
    fn to_json(&self) -> JsonValue {
        obj()
            .set("id", self.id.to_json())
            .set("type", self.kind.to_json())
    }
}
