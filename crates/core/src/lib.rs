//! Palaver Core Library
//!
//! Dependency-light domain logic shared by the Palaver relay service: the
//! lexicon-based sentiment analyzer and the fixed-window rate limiter. Both
//! are deliberately free of I/O so they can be unit tested in isolation from
//! the web service that drives them.

pub mod ratelimit;
pub mod sentiment;
