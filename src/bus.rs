//! Access to Linux i2c character devices.

use std::{
    fs::File,
    io::{self, Read as _, Write as _},
    path::PathBuf,
};

use embedded_hal::blocking::i2c;
use i2c_linux::I2c;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum OpenError {
    #[error("could not open file `/dev/i2c-{bus}' or `/dev/i2c/{bus}': no such file or directory")]
    NotFound { bus: u32 },

    #[error("could not open file `{}': {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
}

impl OpenError {
    pub fn is_permission_denied(&self) -> bool {
        matches!(
            self,
            OpenError::Open { source, .. } if source.kind() == io::ErrorKind::PermissionDenied
        )
    }
}

enum OpenFailure {
    AllMissing,
    Failed(PathBuf, io::Error),
}

/// An open i2c bus device node. Transfers use the SMBus byte-data protocol
/// with the slave address applied per transaction.
pub struct I2cBus {
    inner: I2c<File>,
}

impl I2cBus {
    /// Opens the device node for the given bus index.
    pub fn open(bus: u32) -> Result<Self, OpenError> {
        match open_any(&candidate_paths(bus)) {
            Ok((inner, path)) => {
                debug!("opened i2c device {}", path.display());
                Ok(I2cBus { inner })
            }
            Err(OpenFailure::AllMissing) => Err(OpenError::NotFound { bus }),
            Err(OpenFailure::Failed(path, source)) => Err(OpenError::Open { path, source }),
        }
    }
}

/// Device node conventions for a bus index, in the order they are tried.
fn candidate_paths(bus: u32) -> [PathBuf; 2] {
    [
        PathBuf::from(format!("/dev/i2c/{bus}")),
        PathBuf::from(format!("/dev/i2c-{bus}")),
    ]
}

// A missing node falls through to the next candidate; any other failure
// stops the chain.
fn open_any(candidates: &[PathBuf]) -> Result<(I2c<File>, PathBuf), OpenFailure> {
    for path in candidates {
        match I2c::from_path(path) {
            Ok(inner) => return Ok((inner, path.clone())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
            Err(err) => return Err(OpenFailure::Failed(path.clone(), err)),
        }
    }

    Err(OpenFailure::AllMissing)
}

impl i2c::Write for I2cBus {
    type Error = io::Error;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), io::Error> {
        self.inner.smbus_set_slave_address(u16::from(address), false)?;
        match *bytes {
            [register, value] => self.inner.smbus_write_byte_data(register, value),
            _ => self.inner.write_all(bytes),
        }
    }
}

impl i2c::WriteRead for I2cBus {
    type Error = io::Error;

    fn write_read(
        &mut self,
        address: u8,
        bytes: &[u8],
        buffer: &mut [u8],
    ) -> Result<(), io::Error> {
        self.inner.smbus_set_slave_address(u16::from(address), false)?;
        match (bytes, &mut *buffer) {
            (&[register], [out]) => {
                *out = self.inner.smbus_read_byte_data(register)?;
                Ok(())
            }
            _ => {
                self.inner.write_all(bytes)?;
                self.inner.read_exact(buffer)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use super::{candidate_paths, open_any, OpenError, OpenFailure};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gsensor-{}-{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn directory_convention_is_tried_first() {
        let paths = candidate_paths(3);
        assert_eq!(paths[0], PathBuf::from("/dev/i2c/3"));
        assert_eq!(paths[1], PathBuf::from("/dev/i2c-3"));
    }

    #[test]
    fn missing_first_candidate_falls_through_to_second() {
        let dir = scratch_dir("fallback");
        let first = dir.join("i2c").join("5");
        let second = dir.join("i2c-5");
        std::fs::write(&second, []).unwrap();

        let (_, opened) = open_any(&[first, second.clone()]).ok().unwrap();
        assert_eq!(opened, second);
    }

    #[test]
    fn all_candidates_missing_is_reported_as_such() {
        let dir = scratch_dir("missing");
        let res = open_any(&[dir.join("i2c").join("9"), dir.join("i2c-9")]);
        assert!(matches!(res, Err(OpenFailure::AllMissing)));
    }

    #[test]
    fn not_found_names_both_conventions() {
        let msg = OpenError::NotFound { bus: 9 }.to_string();
        assert!(msg.contains("/dev/i2c-9"));
        assert!(msg.contains("/dev/i2c/9"));
    }

    #[test]
    fn permission_denied_is_distinguished() {
        let err = OpenError::Open {
            path: PathBuf::from("/dev/i2c-0"),
            source: std::io::ErrorKind::PermissionDenied.into(),
        };
        assert!(err.is_permission_denied());

        let err = OpenError::Open {
            path: PathBuf::from("/dev/i2c-0"),
            source: std::io::ErrorKind::Other.into(),
        };
        assert!(!err.is_permission_denied());
    }
}
