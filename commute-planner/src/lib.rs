//! Commute planner.
//!
//! A command-line tool that answers: "when is my next bus or train
//! home (or to work), and is it even worth taking one?"

pub mod config;
pub mod directions;
pub mod domain;
pub mod location;
pub mod pipeline;
pub mod planner;
pub mod report;
pub mod trip;
pub mod walkable;
