//! # Chain Access
//!
//! Talking to a node: a narrow [`Transport`] trait that moves bytes, and a
//! [`Blockchain`] client that knows the routes and the node's error
//! dialects. No retries, no pooling of our own, no node discovery. Point it
//! at a node and it asks that node.

pub mod client;
pub mod entities;
pub mod transport;

pub use client::Blockchain;
pub use entities::{Balance, BalanceDetail, Block, SposConsensus};
pub use transport::{HttpMethod, HttpTransport, Transport};
