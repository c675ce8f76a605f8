//! Shared libraries

pub mod srv_channel;

pub use srv_channel::RcActuators;
