//! The `acpi-table` crate provides an interface for reading ACPI system description table
//! headers.
//!
//! # Capabilities
//!
//! ## Works in `no_std` environments
//!
//! This crate does not allocate or use any `std` features, so it can be used in `no_std`
//! contexts as well as by host tools operating on extracted firmware blobs.
//!
//! ## Zero-Alloc Parsing
//!
//! [`AcpiTableHeader`] is a view over the underlying bytes. Fields are decoded lazily when the
//! corresponding accessor is called.
//!
//! ## No validation
//!
//! Only the size of the header is checked. Table checksums and lengths are reported as stored.
//!
//! ## Uses no unsafe code
//!
//! This crate contains zero unsafe blocks of code.

#![no_std]

pub mod header;
pub mod signature;

pub use header::{AcpiTableHeader, ParseAcpiTableHeaderError};
pub use signature::Signature;
