pub mod dispatch;
pub mod status;

pub use dispatch::{dispatch, open_store};
