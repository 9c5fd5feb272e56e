/// String-message error type used on validation paths.
pub mod custom_error;

/// Signed byte counter newtype shared by the peer records and the UDP codec.
pub mod number_of_bytes;
