//! Scripts for declaring, deploying & administering the Pragma oracle
//! contracts on Starknet.
//!
//! Every script records what it put on-chain in per-network manifests under
//! `deployments/<network>/`, so reruns skip work that is already done.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod calldata;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod drivers;
pub mod errors;
pub mod manifest;
pub mod types;
