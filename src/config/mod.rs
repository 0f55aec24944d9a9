mod otp;
mod smtp;

pub use otp::*;
pub use smtp::*;

/// Eventgate configuration
#[derive(Default, Serialize, Deserialize, Clone)]
pub struct Config {
    /// One-time code policy
    pub otp: OtpConfig,

    /// Management session policy
    pub sessions: SessionConfig,
}
