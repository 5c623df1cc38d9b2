//! Integration tests for the Graft change-reconciliation engine

mod lenient_mode;
mod reconcile_scenarios;
