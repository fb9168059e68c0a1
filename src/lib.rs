//! Library part of `dlt`: delta alignment reading, chain selection and
//! difference classification.

pub mod libs;

pub use crate::libs::io::*;
