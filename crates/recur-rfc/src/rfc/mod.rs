//! Recurrence rule handling modeled on the RFC 5545 `RRULE` property.

pub mod rrule;
