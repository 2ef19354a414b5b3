//! Digital signature schemes.
//!
//! Each submodule corresponds to a specific signature scheme and is
//! responsible for its own key types, signing logic, and verification
//! rules. The implementations are explicit and self-contained, with
//! minimal indirection between the algorithm and its standard.

pub mod sm2;
