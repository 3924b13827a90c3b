//! In-process client

mod client;

pub use client::NativeClient;
