pub mod answer;
pub mod entry;
pub mod form;
pub mod patient;
