//! Journal vault filesystem access.

pub mod walker;
