//! suggestd - ranked suggestions from a periodically reloaded dataset
//!
//! The served index is rebuilt wholesale from the dataset on a fixed period
//! and swapped in atomically; requests read whichever generation is
//! installed and are answered under a per-request deadline.

pub mod cli;
pub mod guard;
pub mod http_server;
pub mod index;
pub mod observability;
pub mod reload;
