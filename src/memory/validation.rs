/*!
 * Input Validation
 * Untrusted caller input is checked here before any state is touched
 */

use crate::core::errors::{TrackerError, TrackerResult};
use crate::core::types::{Address, Pid, RawPid, RawSize, Size};

/// Validate a caller-supplied PID
pub fn validate_pid(raw: RawPid) -> TrackerResult<Pid> {
    if raw <= 0 {
        return Err(TrackerError::invalid_argument(format!("invalid PID {}", raw)));
    }
    Pid::try_from(raw)
        .map_err(|_| TrackerError::invalid_argument(format!("PID {} out of range", raw)))
}

/// Validate a caller-supplied allocation address
///
/// Addresses are opaque keys: only the empty string is rejected and the
/// caller's text is kept exactly.
pub fn validate_address(raw: &str) -> TrackerResult<Address> {
    if raw.is_empty() {
        return Err(TrackerError::invalid_argument("empty address"));
    }
    Ok(Address::from(raw))
}

/// Validate a caller-supplied allocation size
pub fn validate_size(raw: RawSize) -> TrackerResult<Size> {
    if raw <= 0 {
        return Err(TrackerError::invalid_argument(format!("invalid size {}", raw)));
    }
    Size::try_from(raw)
        .map_err(|_| TrackerError::invalid_argument(format!("size {} out of range", raw)))
}
