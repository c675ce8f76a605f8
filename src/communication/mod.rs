//! Control link communication

pub mod transport;
