//! Faceted listing search.
//!
//! A [`FilterSession`] holds the panel state and drives a [`FilterEngine`],
//! which runs the store query (Phase A, [`ListingQuery`]) and then the
//! attribute predicates of the active [`FacetSchema`] (Phase B,
//! [`PredicateSet`]).

mod debounce;
mod engine;
mod facet;
mod history;
mod outcome;
mod predicate;
mod query;
mod schema;
mod session;
mod state;
mod toggle;

pub use debounce::{Debouncer, Ticket};
pub use engine::{ActiveCategory, FilterEngine, FilterRequest};
pub use facet::{FacetKey, FacetValue, Lookup, Predicate, Source};
pub use history::SearchHistoryEntry;
pub use outcome::SearchOutcome;
pub use predicate::{CompiledPredicate, PredicateSet, ReferenceNames};
pub use query::ListingQuery;
pub use schema::FacetSchema;
pub use session::{CategoryCallback, FilterSession, PanelState};
pub use state::FilterState;
pub use toggle::{ListingTypeToggle, ToggleMode};
