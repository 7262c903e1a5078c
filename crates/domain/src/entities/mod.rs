//! Domain entities - Core business objects

mod scenario;
mod transaction;

pub use scenario::{ChoiceIndex, Consequence, Scenario, CONSEQUENCE_KEYS, OPTION_COUNT};
pub use transaction::{Transaction, TransactionStatus};
