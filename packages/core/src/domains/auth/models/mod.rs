pub mod otp_code;
pub mod phone_number;
pub mod profile;
pub mod user_record;

pub use otp_code::{validate_code_input, OtpCode, OTP_CODE_LEN};
pub use phone_number::PhoneNumber;
pub use profile::ProfileForm;
pub use user_record::UserRecord;
