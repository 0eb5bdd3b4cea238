//! PDF encryption summary.
//!
//! The checker never encrypts or decrypts anything. It reads the encryption
//! dictionary (ISO 32000-1:2008, Section 7.6) far enough to know which
//! security handler is in use and which user access permissions are granted,
//! so the accessibility extraction policy can be enforced.
//!
//! # References
//!
//! - PDF Spec Section 7.6.1: General
//! - PDF Spec Section 7.6.3.2: Standard Encryption Dictionary (Table 22)

use crate::error::{Error, Result};
use crate::object::Object;
use bitflags::bitflags;

bitflags! {
    /// PDF encryption permissions (P field).
    ///
    /// PDF Spec: Table 22 - User access permissions
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Permissions: u32 {
        /// Bit 3: Print the document
        const PRINT = 1 << 2;
        /// Bit 4: Modify the contents
        const MODIFY = 1 << 3;
        /// Bit 5: Copy or extract text and graphics
        const COPY = 1 << 4;
        /// Bit 6: Add or modify annotations, fill form fields
        const ANNOTATE = 1 << 5;
        /// Bit 9: Fill in existing form fields (R>=3)
        const FILL_FORMS = 1 << 8;
        /// Bit 10: Extract text and graphics for accessibility (R>=3)
        const EXTRACT_ACCESSIBILITY = 1 << 9;
        /// Bit 11: Assemble the document (R>=3)
        const ASSEMBLE = 1 << 10;
        /// Bit 12: Print in high quality (R>=3)
        const PRINT_HIGH_QUALITY = 1 << 11;
    }
}

impl Permissions {
    /// Create permissions from the P field value. Reserved bits are kept.
    pub fn from_p(p: i32) -> Self {
        Self::from_bits_retain(p as u32)
    }

    /// Every permission granted, reserved bits set as the standard requires.
    pub fn allow_all() -> Self {
        Self::from_p(-4)
    }

    /// Check if content extraction for accessibility is allowed (R>=3).
    pub fn can_extract_accessibility(&self) -> bool {
        self.contains(Self::EXTRACT_ACCESSIBILITY)
    }

    /// Check if copying text/graphics is allowed.
    pub fn can_copy(&self) -> bool {
        self.contains(Self::COPY)
    }
}

/// Summary of an encryption dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionInfo {
    /// Filter name ("Standard" for the standard security handler)
    pub filter: String,
    /// Algorithm version (V)
    pub version: u32,
    /// Revision number (R)
    pub revision: u32,
    /// User permissions (P)
    pub permissions: Permissions,
}

impl EncryptionInfo {
    /// Standard security handler with the given revision and permissions.
    pub fn standard(revision: u32, permissions: Permissions) -> Self {
        let version = match revision {
            2 => 1,
            3 => 2,
            4 => 4,
            _ => 5,
        };
        Self {
            filter: "Standard".to_string(),
            version,
            revision,
            permissions,
        }
    }

    /// Parse an encryption dictionary from a PDF object.
    ///
    /// PDF Spec: Section 7.6.1 - General
    pub fn from_object(obj: &Object) -> Result<Self> {
        let dict = obj
            .as_dict()
            .ok_or_else(|| Error::InvalidPdf("Encrypt entry is not a dictionary".to_string()))?;

        let filter = dict
            .get("Filter")
            .and_then(|o| o.as_name())
            .ok_or_else(|| Error::InvalidPdf("Encrypt dictionary missing /Filter".to_string()))?
            .to_string();

        let version = dict
            .get("V")
            .and_then(Object::as_integer)
            .ok_or_else(|| Error::InvalidPdf("Encrypt dictionary missing /V".to_string()))?;
        let version = u32::try_from(version)
            .map_err(|_| Error::InvalidPdf(format!("Encrypt /V out of range: {}", version)))?;

        // R and P are only required by the standard handler
        let revision = dict.get("R").and_then(Object::as_integer).unwrap_or(0);
        let revision = u32::try_from(revision)
            .map_err(|_| Error::InvalidPdf(format!("Encrypt /R out of range: {}", revision)))?;
        let permissions = match dict.get("P").and_then(Object::as_integer) {
            Some(p) => Permissions::from_p(permission_bits(p)?),
            None if filter == "Standard" => {
                return Err(Error::InvalidPdf("Encrypt dictionary missing /P".to_string()));
            },
            None => Permissions::allow_all(),
        };

        Ok(EncryptionInfo {
            filter,
            version,
            revision,
            permissions,
        })
    }

    /// Whether the standard security handler is in use.
    pub fn is_standard(&self) -> bool {
        self.filter == "Standard"
    }

    /// Whether assistive technology may extract content.
    ///
    /// Revision 2 has no dedicated accessibility bit; the copy bit governs.
    pub fn allows_accessibility(&self) -> bool {
        if self.revision >= 3 {
            self.permissions.can_extract_accessibility()
        } else {
            self.permissions.can_copy()
        }
    }
}

/// The 32 permission bits of `/P`.
///
/// Producers write it either signed or as the unsigned bit pattern.
fn permission_bits(p: i64) -> Result<i32> {
    i32::try_from(p)
        .or_else(|_| u32::try_from(p).map(|bits| i32::from_ne_bytes(bits.to_ne_bytes())))
        .map_err(|_| Error::InvalidPdf(format!("Encrypt /P out of range: {}", p)))
}
