//! Outbound adapters: implementations of domain ports against external
//! systems. PostgreSQL is the only external system this service talks to.

pub mod persistence;
