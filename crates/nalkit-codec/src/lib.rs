//! # nalkit-codec
//!
//! AVC/HEVC 码流结构编解码库, 面向 FLV / MP4 (ISO BMFF) 中的长度前缀格式.
//!
//! - NAL 单元头部与类型
//! - 解码器配置记录 (`avcC` / `hvcC`, 即 FLV 序列头)
//! - 长度前缀样本
//! - SEI 消息与 user_data_unregistered 载荷
//!
//! ## 使用示例
//!
//! ```rust
//! use nalkit_codec::{ElementaryStream, VideoCodecId};
//!
//! let avcc = [
//!     0x01, 0x64, 0x00, 0x1F, 0xFF, 0xE1, 0x00, 0x05, 0x67, 0x64, 0x00, 0x1F, 0xAC,
//!     0x01, 0x00, 0x04, 0x68, 0xEE, 0x3C, 0xB0,
//! ];
//! let mut stream = ElementaryStream::new(VideoCodecId::Avc);
//! stream.push_sequence_header(avcc.to_vec()).unwrap();
//!
//! let sample = stream.parse_sample(vec![0x00, 0x00, 0x00, 0x02, 0x65, 0x88]).unwrap();
//! assert!(sample.is_keyframe());
//! ```

pub mod codec_id;
pub mod parsers;
pub mod stream;

// 重导出常用类型
pub use codec_id::VideoCodecId;
pub use parsers::avc::{AvcDecoderConfigurationRecord, AvcNalUnit, AvcSample};
pub use parsers::hevc::{HevcDecoderConfigurationRecord, HevcNalUnit, HevcSample};
pub use parsers::sei::{Sei, SeiUserData};
pub use parsers::{NalUnitCodec, Sample};
pub use stream::{ElementaryStream, ParsedSample, SequenceHeader};
