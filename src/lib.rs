//! # nalkit
//!
//! 纯 Rust 实现的 H.264/AVC 与 H.265/HEVC 码流结构编解码库.
//!
//! 面向 FLV / MP4 中的长度前缀格式:
//! - **NAL 单元**: 头部位域与类型识别
//! - **配置记录**: `avcC` / `hvcC` (FLV 序列头)
//! - **样本**: 长度前缀的访问单元
//! - **SEI**: 防竞争字节处理与 user_data_unregistered 载荷
//!
//! # 快速开始
//!
//! ```rust
//! use nalkit::codec::parsers::hevc::{HevcNaluHeader, HevcNaluType};
//!
//! let header = HevcNaluHeader::decode(&[0x40, 0x01]).unwrap();
//! assert_eq!(header.nalu_type, HevcNaluType::VpsNut);
//! println!("{header}");
//! ```
//!
//! # Crate 结构
//!
//! | Crate | 功能 |
//! |-------|------|
//! | `nalkit-core` | 错误类型与字节/位读写工具 |
//! | `nalkit-codec` | NAL, 配置记录, 样本与 SEI 编解码 |

/// 错误类型与字节/位读写工具
pub use nalkit_core as core;

/// NAL, 配置记录, 样本与 SEI 编解码
pub use nalkit_codec as codec;

pub mod logging;

/// 获取 nalkit 版本号
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
