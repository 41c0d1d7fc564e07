//! H.264/AVC 码流解析器.
//!
//! 提供:
//! - NAL 单元头部解析与类型识别 (1 字节 NAL 头)
//! - AVCDecoderConfigurationRecord (FLV 序列头 / MP4 `avcC`) 编解码
//! - 长度前缀样本 [`AvcSample`]
//!
//! # AVC NAL 头部 (1 字节)
//! ```text
//! ┌──────────────────────────────────────┐
//! │ forbidden(1) | nal_ref_idc(2) | type(5) │
//! └──────────────────────────────────────┘
//! ```

pub mod nal;
pub mod record;

pub use nal::{AvcNalUnit, AvcNaluHeader, AvcNaluType};
pub use record::{AvcDecoderConfigurationRecord, AvcLevel, AvcProfile};

use crate::parsers::sample::Sample;

/// H.264 样本 (AVCC 格式访问单元)
pub type AvcSample = Sample<AvcNalUnit>;
