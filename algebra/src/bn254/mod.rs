/// The number of bytes for a scalar value over BN254.
pub const BN254_SCALAR_LEN: usize = 32;

mod fr;
pub use fr::*;

mod group;
pub use group::*;

mod pairing;
pub use pairing::*;
