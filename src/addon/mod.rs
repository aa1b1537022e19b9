mod client;
mod domain;

pub use client::{AddonClient, AddonError};
pub use domain::{AddonApp, AddonPush};
