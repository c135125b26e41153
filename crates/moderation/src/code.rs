use rand::Rng;

/// Four digit code, uniform over 1000..=9999, so it never has a leading zero.
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.gen_range(1000..=9999u16).to_string()
}
