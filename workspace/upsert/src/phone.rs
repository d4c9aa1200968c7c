use rand::Rng;

/// Supplies the `pos_client.mobile` value for new clients.
///
/// The member export carries no phone number, so the stored value is a
/// placeholder until the point-of-sale application collects a real one.
pub trait PhoneSource: Send + Sync {
    fn placeholder_phone(&self) -> String;
}

/// Uniformly random ten-digit numbers without a leading zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPhone;

impl PhoneSource for RandomPhone {
    fn placeholder_phone(&self) -> String {
        rand::thread_rng()
            .gen_range(1_000_000_000u64..=9_999_999_999)
            .to_string()
    }
}
