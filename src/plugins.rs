//! Plugins for enhancing the default implementation can be defined in this
//! module.

pub mod latex;
#[cfg(feature = "syntect")]
pub mod syntect;
