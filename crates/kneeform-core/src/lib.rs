//! kneeform-core
//!
//! Pure domain types for knee-questionnaire submissions: answer records,
//! form kinds, stored entries with their history, and patient rows.
//! No scoring lives here; this is the shared vocabulary of the workspace.

pub mod error;
pub mod models;
pub mod timestamp;
