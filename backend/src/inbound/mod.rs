//! Inbound adapters exposing the domain over transports. REST is the only
//! transport this service speaks.

pub mod http;
