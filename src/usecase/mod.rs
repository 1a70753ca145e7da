//! Usecase layer: the editing session, action scripts and their events.

pub mod action;
pub mod event;
pub mod run;
pub mod session;
pub mod stats;
pub mod summary;
