//! Personal life planner for the terminal. Keeps a weekly schedule, a mood log, gym and diet
//! plans, hobby and project progress, and daily notes as plain json files in a local directory.
//!

pub mod cli;
pub mod storage;
pub mod trackers;
pub mod utils;
