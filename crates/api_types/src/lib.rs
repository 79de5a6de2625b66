mod amount;

pub use amount::{Amount, AmountError};

pub mod expense {
    use std::fmt;

    use serde::{Deserialize, Deserializer, Serialize, de};

    use super::*;

    /// Fixed classification tag of an expense.
    ///
    /// Serialized by name (`"Food"`, `"Transport"`, ...). Names the client
    /// does not know fold into [`Category::Other`].
    #[derive(
        Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    )]
    pub enum Category {
        #[default]
        Food,
        Transport,
        Utilities,
        Entertainment,
        #[serde(other)]
        Other,
    }

    impl Category {
        pub const ALL: [Category; 5] = [
            Self::Food,
            Self::Transport,
            Self::Utilities,
            Self::Entertainment,
            Self::Other,
        ];

        pub fn label(self) -> &'static str {
            match self {
                Self::Food => "Food",
                Self::Transport => "Transport",
                Self::Utilities => "Utilities",
                Self::Entertainment => "Entertainment",
                Self::Other => "Other",
            }
        }

        /// First letter of the label, used as a list badge.
        pub fn initial(self) -> char {
            self.label().chars().next().unwrap_or('?')
        }

        pub fn next(self) -> Self {
            let idx = self.index();
            Self::ALL[(idx + 1) % Self::ALL.len()]
        }

        pub fn prev(self) -> Self {
            let idx = self.index();
            Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
        }

        fn index(self) -> usize {
            Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
        }
    }

    impl fmt::Display for Category {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.label())
        }
    }

    /// Opaque expense identifier.
    ///
    /// The server decides the format: the reference backend hands out UUID
    /// strings, other deployments use integers. Both are kept as text.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
    #[serde(transparent)]
    pub struct ExpenseId(String);

    impl ExpenseId {
        pub fn new(id: impl Into<String>) -> Self {
            Self(id.into())
        }

        pub fn as_str(&self) -> &str {
            &self.0
        }
    }

    impl fmt::Display for ExpenseId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    struct ExpenseIdVisitor;

    impl de::Visitor<'_> for ExpenseIdVisitor {
        type Value = ExpenseId;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or integer identifier")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<ExpenseId, E> {
            Ok(ExpenseId(v.to_string()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<ExpenseId, E> {
            Ok(ExpenseId(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<ExpenseId, E> {
            Ok(ExpenseId(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<ExpenseId, E> {
            Ok(ExpenseId(v.to_string()))
        }
    }

    impl<'de> Deserialize<'de> for ExpenseId {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(ExpenseIdVisitor)
        }
    }

    /// One expense record as returned by `GET /api/expenses`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Expense {
        pub id: ExpenseId,
        #[serde(default)]
        pub description: String,
        /// Missing or `null` on the wire reads as zero.
        #[serde(default)]
        pub amount: Amount,
        pub category: Category,
    }

    /// Request body for `POST /api/expenses`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub description: String,
        pub amount: Amount,
        pub category: Category,
    }
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
