//! End-to-end binding scenarios against the bundled stores

mod common;

mod observation;
mod persistence;
mod value_types;
