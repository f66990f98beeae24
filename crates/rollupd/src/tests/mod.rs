//! Test suites for the rollup runtime.

mod behaviour;
mod support;
