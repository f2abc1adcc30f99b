//! Definitions for the ACPI system description table header.

use core::{error, fmt, mem};

use crate::signature::Signature;

/// The size, in bytes, of the ACPI system description table header.
const HEADER_SIZE: usize = mem::size_of::<DefAcpiTableHeader>();

/// View of an ACPI system description table header.
///
/// Every ACPI table except the FACS begins with this 36-byte header, which identifies the table
/// and the OEM that produced it.
#[derive(Clone, Copy, Hash, PartialEq, Eq)]
pub struct AcpiTableHeader<'slice> {
    /// The underlying bytes of the ACPI table header.
    pub(crate) bytes: &'slice [u8; HEADER_SIZE],
}

impl<'slice> AcpiTableHeader<'slice> {
    /// The size, in bytes, of an [`AcpiTableHeader`].
    pub const SIZE: usize = HEADER_SIZE;

    /// Creates a new [`AcpiTableHeader`] from the start of the given `slice`.
    ///
    /// Bytes past [`AcpiTableHeader::SIZE`] are ignored.
    ///
    /// # Errors
    ///
    /// - [`ParseAcpiTableHeaderError::TooSmall`]: Returned if the given `slice` is too small to
    ///     contain an [`AcpiTableHeader`].
    pub const fn new(slice: &'slice [u8]) -> Result<Self, ParseAcpiTableHeaderError> {
        match slice.first_chunk() {
            Some(bytes) => Ok(Self { bytes }),
            None => Err(ParseAcpiTableHeaderError::TooSmall { size: slice.len() }),
        }
    }

    /// Returns the [`Signature`] that identifies the type of this table.
    pub const fn signature(&self) -> Signature {
        Signature(self.array_at(mem::offset_of!(DefAcpiTableHeader, signature)))
    }

    /// Returns the length of the table, including this header, in bytes.
    pub const fn length(&self) -> u32 {
        u32::from_le_bytes(self.array_at(mem::offset_of!(DefAcpiTableHeader, length)))
    }

    /// Returns the revision of the table's structure.
    pub const fn revision(&self) -> u8 {
        self.bytes[mem::offset_of!(DefAcpiTableHeader, revision)]
    }

    /// Returns the stored checksum byte.
    ///
    /// The checksum is not verified.
    pub const fn checksum(&self) -> u8 {
        self.bytes[mem::offset_of!(DefAcpiTableHeader, checksum)]
    }

    /// Returns the raw OEM-supplied identification string.
    pub const fn oem_id(&self) -> [u8; 6] {
        self.array_at(mem::offset_of!(DefAcpiTableHeader, oem_id))
    }

    /// Returns the raw OEM-supplied table identification string.
    pub const fn oem_table_id(&self) -> [u8; 8] {
        self.array_at(mem::offset_of!(DefAcpiTableHeader, oem_table_id))
    }

    /// Returns the OEM-supplied revision number.
    pub const fn oem_revision(&self) -> u32 {
        u32::from_le_bytes(self.array_at(mem::offset_of!(DefAcpiTableHeader, oem_revision)))
    }

    /// Returns the vendor ID of the utility that created the table.
    pub const fn creator_id(&self) -> [u8; 4] {
        self.array_at(mem::offset_of!(DefAcpiTableHeader, creator_id))
    }

    /// Returns the revision of the utility that created the table.
    pub const fn creator_revision(&self) -> u32 {
        u32::from_le_bytes(self.array_at(mem::offset_of!(DefAcpiTableHeader, creator_revision)))
    }

    /// Returns the `N` bytes located at `offset` bytes from the start of the header.
    const fn array_at<const N: usize>(&self, offset: usize) -> [u8; N] {
        let (_, tail) = self.bytes.split_at(offset);
        match tail.first_chunk() {
            Some(bytes) => *bytes,
            None => unreachable!(),
        }
    }
}

impl fmt::Debug for AcpiTableHeader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug_struct = f.debug_struct("AcpiTableHeader");

        debug_struct.field("signature", &self.signature());
        debug_struct.field("length", &self.length());
        debug_struct.field("revision", &self.revision());
        debug_struct.field("checksum", &self.checksum());
        debug_struct.field("oem_id", &self.oem_id());
        debug_struct.field("oem_table_id", &self.oem_table_id());
        debug_struct.field("oem_revision", &self.oem_revision());
        debug_struct.field("creator_id", &self.creator_id());
        debug_struct.field("creator_revision", &self.creator_revision());

        debug_struct.finish()
    }
}

/// Various errors that can occur while parsing an [`AcpiTableHeader`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum ParseAcpiTableHeaderError {
    /// The given slice is too small to contain an [`AcpiTableHeader`].
    TooSmall {
        /// The size of the given slice.
        size: usize,
    },
}

impl fmt::Display for ParseAcpiTableHeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooSmall { size } => write!(
                f,
                "{size} bytes is too small for an ACPI table header ({} bytes)",
                AcpiTableHeader::SIZE
            ),
        }
    }
}

impl error::Error for ParseAcpiTableHeaderError {}

/// Layout of the ACPI system description table header, used to compute field offsets without
/// decoding the structure in place.
#[repr(C)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub(crate) struct DefAcpiTableHeader {
    /// ASCII identifier of the table type.
    pub signature: [u8; 4],
    /// Length of the entire table, including the header.
    pub length: u32,
    /// Revision of the table structure.
    pub revision: u8,
    /// Byte that makes the entire table sum to zero.
    pub checksum: u8,
    /// OEM identification string.
    pub oem_id: [u8; 6],
    /// OEM table identification string.
    pub oem_table_id: [u8; 8],
    /// OEM revision of the table.
    pub oem_revision: u32,
    /// Vendor ID of the utility that created the table.
    pub creator_id: [u8; 4],
    /// Revision of the utility that created the table.
    pub creator_revision: u32,
}

const _: () = assert!(HEADER_SIZE == 36);
