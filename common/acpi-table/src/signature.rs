//! Definitions for ACPI table signatures.

use core::fmt;

/// The 4-byte identifier stored at the start of every ACPI table.
#[repr(transparent)]
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Signature(pub [u8; 4]);

impl Signature {
    /// Differentiated System Description Table.
    pub const DSDT: Self = Self(*b"DSDT");
    /// Secondary System Description Table.
    pub const SSDT: Self = Self(*b"SSDT");
    /// Fixed ACPI Description Table.
    pub const FACP: Self = Self(*b"FACP");
    /// Firmware ACPI Control Structure.
    pub const FACS: Self = Self(*b"FACS");
    /// Multiple APIC Description Table.
    pub const APIC: Self = Self(*b"APIC");
    /// Root System Description Table.
    pub const RSDT: Self = Self(*b"RSDT");
    /// Extended System Description Table.
    pub const XSDT: Self = Self(*b"XSDT");
    /// High Precision Event Timer Table.
    pub const HPET: Self = Self(*b"HPET");
    /// PCI Express Memory-mapped Configuration Table.
    pub const MCFG: Self = Self(*b"MCFG");
    /// Boot Graphics Resource Table.
    pub const BGRT: Self = Self(*b"BGRT");

    /// Returns the raw bytes of this [`Signature`].
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Returns `true` if every byte of this [`Signature`] is printable ASCII.
    pub fn is_printable(&self) -> bool {
        self.0.iter().all(|byte| byte.is_ascii_graphic() || *byte == b' ')
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature(\"{self}\")")
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            if byte.is_ascii_graphic() || byte == b' ' {
                write!(f, "{}", char::from(byte))?;
            } else {
                write!(f, "\\x{byte:02x}")?;
            }
        }

        Ok(())
    }
}
