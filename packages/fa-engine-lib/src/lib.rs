pub mod automaton;
pub mod config;
pub mod format;
pub mod validation;
