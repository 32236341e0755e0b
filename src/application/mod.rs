//! Application layer - Use cases over the domain, talking to the outside world
//! only through ports

pub mod dto;
pub mod ports;
pub mod services;
