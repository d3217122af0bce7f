use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Address out of range: {width} byte(s) at {address:#06x} exceed blob length {len:#x}")]
    AddressOutOfRange {
        address: usize,
        width: usize,
        len: usize,
    },

    #[error("Value {value:#x} does not fit in {width} byte(s)")]
    ValueOutOfRange { value: u64, width: usize },

    #[error("Invalid field width: {0} (expected 1-4)")]
    InvalidWidth(usize),

    #[error("No known field at address {0:#06x}")]
    UnknownField(usize),

    #[error("Bag slot out of range: {0}")]
    SlotOutOfRange(usize),

    #[error("Party member out of range: {0}")]
    MemberOutOfRange(usize),

    #[error("No save loaded")]
    NotLoaded,

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }

    /// Check if this error came from an address outside the loaded blob
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Error::AddressOutOfRange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::Io(io_err);
        assert!(err.is_not_found());

        let other_io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err2 = Error::Io(other_io_err);
        assert!(!err2.is_not_found());
    }

    #[test]
    fn test_address_out_of_range_message() {
        let err = Error::AddressOutOfRange {
            address: 0x14,
            width: 4,
            len: 0x10,
        };
        assert!(err.is_out_of_range());
        assert_eq!(
            err.to_string(),
            "Address out of range: 4 byte(s) at 0x0014 exceed blob length 0x10"
        );
    }
}
