//! # nalkit-core
//!
//! nalkit 核心库, 提供错误类型与字节/比特级读写工具.
//!
//! 所有读取操作在访问 `K..K+N` 之前都会先检查边界, 不足时返回
//! [`NalError::TruncatedInput`], 绝不 panic.

pub mod bitreader;
pub mod bitwriter;
pub mod bytereader;
pub mod error;

// 重导出常用类型
pub use bitreader::BitReader;
pub use bitwriter::BitWriter;
pub use bytereader::ByteReader;
pub use error::{NalError, NalResult};
