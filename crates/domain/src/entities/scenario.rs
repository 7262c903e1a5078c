//! Financial decision scenarios served by the decisions game.
//!
//! A scenario always carries exactly three options and one consequence per
//! option. The wire form keys consequences by the option index as a string
//! (`"0"`, `"1"`, `"2"`), which is what the browser client and the LLM
//! prompt schema both use.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DomainError;

/// Number of options every scenario presents.
pub const OPTION_COUNT: usize = 3;

/// Wire keys for the consequence mapping, in option order.
pub const CONSEQUENCE_KEYS: [&str; OPTION_COUNT] = ["0", "1", "2"];

/// The narrative outcome tied to one option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consequence {
    pub short_term: String,
    /// Empty when the source omitted it.
    #[serde(default)]
    pub long_term: String,
}

impl Consequence {
    pub fn new(short_term: impl Into<String>, long_term: impl Into<String>) -> Self {
        Self {
            short_term: short_term.into(),
            long_term: long_term.into(),
        }
    }

    /// Lift a bare consequence string into object form.
    pub fn from_text(short_term: impl Into<String>) -> Self {
        Self::new(short_term, String::new())
    }

    /// Text used when classifying a choice: the short-term outcome, or the
    /// long-term one when the short-term text is empty.
    pub fn text(&self) -> &str {
        if self.short_term.is_empty() {
            &self.long_term
        } else {
            &self.short_term
        }
    }
}

/// Index of the option a player picked (validated newtype, 0..=2).
///
/// # Examples
///
/// ```
/// use fincoach_domain::ChoiceIndex;
///
/// let idx = ChoiceIndex::new(2).unwrap();
/// assert_eq!(idx.value(), 2);
/// assert_eq!(idx.key(), "2");
///
/// assert!(ChoiceIndex::new(3).is_err());
/// assert!(ChoiceIndex::new(-1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ChoiceIndex(usize);

impl ChoiceIndex {
    pub fn new(index: i64) -> Result<Self, DomainError> {
        usize::try_from(index)
            .ok()
            .filter(|i| *i < OPTION_COUNT)
            .map(Self)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "choiceIndex must be between 0 and {}, got {}",
                    OPTION_COUNT - 1,
                    index
                ))
            })
    }

    pub fn value(&self) -> usize {
        self.0
    }

    /// The consequence-map key for this index.
    pub fn key(&self) -> &'static str {
        CONSEQUENCE_KEYS[self.0]
    }
}

impl TryFrom<i64> for ChoiceIndex {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChoiceIndex> for i64 {
    fn from(value: ChoiceIndex) -> Self {
        value.0 as i64
    }
}

impl fmt::Display for ChoiceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single generated decision prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub title: String,
    pub description: String,
    pub options: [String; OPTION_COUNT],
    #[serde(with = "consequence_map")]
    pub consequences: [Consequence; OPTION_COUNT],
    pub learning_tip: String,
}

impl Scenario {
    pub fn option(&self, index: ChoiceIndex) -> &str {
        &self.options[index.value()]
    }

    pub fn consequence(&self, index: ChoiceIndex) -> &Consequence {
        &self.consequences[index.value()]
    }
}

/// Serializes the consequence array as `{"0": .., "1": .., "2": ..}`.
mod consequence_map {
    use super::{Consequence, OPTION_COUNT};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Keyed<T> {
        #[serde(rename = "0")]
        first: T,
        #[serde(rename = "1")]
        second: T,
        #[serde(rename = "2")]
        third: T,
    }

    pub fn serialize<S>(value: &[Consequence; OPTION_COUNT], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let [first, second, third] = value;
        Keyed {
            first,
            second,
            third,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[Consequence; OPTION_COUNT], D::Error>
    where
        D: Deserializer<'de>,
    {
        let keyed = Keyed::<Consequence>::deserialize(deserializer)?;
        Ok([keyed.first, keyed.second, keyed.third])
    }
}
