//! HTTP front end for the explorer caches.

pub mod api;
