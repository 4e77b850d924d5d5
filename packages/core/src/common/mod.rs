pub mod errors;
pub mod id;
pub mod notice;

pub use errors::{FlowError, FlowResult, ValidationError, ValidationErrors};
pub use id::generate_user_id;
pub use notice::{Notice, NoticeKind};
