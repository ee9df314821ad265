#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_wrap,  // grid sizes are tiny
)]
pub mod pit;
pub mod referee;
pub mod strategies;
