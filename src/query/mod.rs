//! Query resolution engine behind the `list` command.
//!
//! Terse argument tokens ("-n +420 731", "jana") are classified into search
//! modes, turned into parameterised filters, run exact-then-fuzzy against the
//! store, enriched across tables and reported as typed outcomes.

pub mod classifier;
pub mod enrich;
pub mod error;
pub mod executor;
pub mod filter;
pub mod outcome;
pub mod registry;
pub mod resolvers;

pub use classifier::{Engine, Mode};
pub use error::QueryError;
pub use executor::{execute, select, Matched, QuerySource};
pub use filter::{Combinator, DateParts, Filter, FilterValue, MatchMode, Predicate};
pub use outcome::{ContactNumbers, Outcome, OutcomeKind, RowSet};
pub use registry::Table;
