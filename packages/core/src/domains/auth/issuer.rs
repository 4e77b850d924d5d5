use rand::Rng;

use super::models::otp_code::{OTP_MAX, OTP_MIN};
use super::models::OtpCode;
use crate::kernel::BaseOtpIssuer;

/// Seconds before a code may be re-sent
pub const RESEND_COOLDOWN_SECS: u32 = 60;

/// Uniformly random codes in `[100000, 999999]`.
///
/// There is no delivery channel; the code is shown to the user as a notice.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomOtpIssuer;

impl BaseOtpIssuer for RandomOtpIssuer {
    fn issue(&self) -> OtpCode {
        let value = rand::thread_rng().gen_range(OTP_MIN..=OTP_MAX);
        // Range above matches OtpCode's accepted range
        OtpCode::from_number(value).unwrap_or_else(|| unreachable!("code {value} out of range"))
    }
}
