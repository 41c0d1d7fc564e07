//! AVC/HEVC 码流结构解析器.
//!
//! - [`avc`]: H.264 NAL 单元与 AVCDecoderConfigurationRecord
//! - [`hevc`]: H.265 NAL 单元与 HEVCDecoderConfigurationRecord
//! - [`sei`]: SEI 防竞争字节处理与消息编解码
//! - [`sample`]: 长度前缀格式的访问单元 (AVCC/HVCC 样本)

pub mod avc;
pub mod hevc;
pub mod nal;
pub mod sample;
pub mod sei;

pub use nal::NalUnitCodec;
pub use sample::Sample;
