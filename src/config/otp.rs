/// One-time code policy
#[derive(Serialize, Deserialize, Clone)]
pub struct OtpConfig {
    /// Number of decimal digits in a generated code
    pub length: usize,

    /// How long codes stay valid (in seconds)
    pub expire_after: i64,
}

impl Default for OtpConfig {
    fn default() -> OtpConfig {
        OtpConfig {
            length: 6,
            expire_after: 30 * 60,
        }
    }
}

/// Management session policy
#[derive(Serialize, Deserialize, Clone)]
pub struct SessionConfig {
    /// How long a session authorises mutations after verification (in seconds)
    pub expire_after: i64,
}

impl Default for SessionConfig {
    fn default() -> SessionConfig {
        SessionConfig {
            expire_after: 30 * 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{OtpConfig, SessionConfig};

    #[test]
    fn it_defaults_to_six_digits_and_thirty_minutes() {
        let otp = OtpConfig::default();
        assert_eq!(otp.length, 6);
        assert_eq!(otp.expire_after, 1800);

        let sessions = SessionConfig::default();
        assert_eq!(sessions.expire_after, 1800);
    }
}
