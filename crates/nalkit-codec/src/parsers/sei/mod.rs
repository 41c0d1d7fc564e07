//! SEI (Supplemental Enhancement Information) 解析器.
//!
//! - 防竞争字节 (emulation prevention) 的移除与插入
//! - 单字节类型/长度形式的 SEI 消息编解码
//! - user_data_unregistered (类型 5) 载荷视图

pub mod escape;
pub mod message;

pub use escape::{escape, unescape};
pub use message::{Sei, SeiHeader, SeiPayloadType, SeiUserData};
