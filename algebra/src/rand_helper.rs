use rand_chacha::{
    rand_core::{CryptoRng, RngCore, SeedableRng},
    ChaChaRng,
};

/// The seed used whenever tests ask for reproducible randomness.
pub const TEST_RNG_SEED: u64 = 0x1e6e_4d00_00bd_0254;

/// Return a ChaCha stream with a fixed seed.
pub fn deterministic_rng() -> ChaChaRng {
    ChaChaRng::seed_from_u64(TEST_RNG_SEED)
}

/// Should be used only for tests, not for any real world usage.
/// Setting `DETERMINISTIC_TEST_RNG=1` makes every call return the same stream.
#[cfg(feature = "std")]
pub fn test_rng() -> impl RngCore + CryptoRng {
    let is_deterministic =
        std::env::vars().any(|(key, val)| key == "DETERMINISTIC_TEST_RNG" && val == "1");
    if is_deterministic {
        deterministic_rng()
    } else {
        ChaChaRng::from_entropy()
    }
}

/// Should be used only for tests, not for any real world usage.
#[cfg(not(feature = "std"))]
pub fn test_rng() -> impl RngCore + CryptoRng {
    deterministic_rng()
}

#[cfg(all(test, feature = "std"))]
mod test {
    use ark_std::UniformRand;

    #[test]
    fn deterministic_rng_repeats() {
        let a = u128::rand(&mut super::deterministic_rng());
        let b = u128::rand(&mut super::deterministic_rng());
        assert_eq!(a, b);
    }

    #[test]
    fn entropy_rng_differs() {
        if std::env::var("DETERMINISTIC_TEST_RNG").as_deref() == Ok("1") {
            return;
        }
        let a = u128::rand(&mut super::test_rng());
        let b = u128::rand(&mut super::test_rng());
        assert_ne!(a, b);
    }
}
