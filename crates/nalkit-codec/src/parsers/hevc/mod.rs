//! H.265/HEVC 码流解析器.
//!
//! 提供:
//! - NAL 单元头部解析与类型识别 (2 字节 NAL 头)
//! - HEVCDecoderConfigurationRecord (FLV 序列头 / MP4 `hvcC`) 编解码
//! - 长度前缀样本 [`HevcSample`]
//!
//! # HEVC NAL 头部 (2 字节)
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ forbidden(1) | type(6) | layer_id(6) | tid(3) │
//! └──────────────────────────────────────────────┘
//! ```

pub mod nal;
pub mod record;

pub use nal::{HevcNalUnit, HevcNaluHeader, HevcNaluType};
pub use record::HevcDecoderConfigurationRecord;

use crate::parsers::sample::Sample;

/// H.265 样本 (HVCC 格式访问单元)
pub type HevcSample = Sample<HevcNalUnit>;
