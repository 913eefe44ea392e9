pub mod dispatch;
pub mod framing;
pub mod host;
pub mod protocol;
