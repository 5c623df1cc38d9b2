//! Graft: Deterministic Change Reconciliation
//!
//! Converts an ordered list of per-path version-control change records into
//! a minimal, internally consistent, deterministically ordered sequence of
//! filesystem patch operations, delegating content retrieval and physical
//! application to injected collaborators.

pub mod apply;
pub mod change;
pub mod config;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod patch;
pub mod reconcile;
pub mod trie;
pub mod view;
