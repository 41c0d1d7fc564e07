//! 单路视频基本流的序列头/样本分派.
//!
//! 解复用器先交付序列头 (配置记录), 之后的样本按序列头中的
//! lengthSizeMinusOne 拆分 NAL 单元. [`ElementaryStream`] 保存最近一次的
//! 序列头并按编码类型选择解析器, 本身不做任何 I/O.

use std::fmt;

use bytes::Bytes;
use log::debug;
use nalkit_core::{NalError, NalResult};

use crate::codec_id::VideoCodecId;
use crate::parsers::avc::{AvcDecoderConfigurationRecord, AvcNaluType, AvcSample};
use crate::parsers::hevc::{HevcDecoderConfigurationRecord, HevcNaluType, HevcSample};
use crate::parsers::sei::Sei;

/// 已解析的序列头
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceHeader {
    /// `avcC`
    Avc(AvcDecoderConfigurationRecord),
    /// `hvcC`
    Hevc(HevcDecoderConfigurationRecord),
}

impl SequenceHeader {
    /// 编码类型
    pub fn codec_id(&self) -> VideoCodecId {
        match self {
            Self::Avc(_) => VideoCodecId::Avc,
            Self::Hevc(_) => VideoCodecId::Hevc,
        }
    }

    /// NAL 长度前缀宽度 (字节)
    pub fn length_size(&self) -> usize {
        match self {
            Self::Avc(record) => record.length_size(),
            Self::Hevc(record) => record.length_size(),
        }
    }
}

/// 已解析的样本
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedSample {
    /// H.264 样本
    Avc(AvcSample),
    /// H.265 样本
    Hevc(HevcSample),
}

impl ParsedSample {
    /// NAL 单元个数
    pub fn len(&self) -> usize {
        match self {
            Self::Avc(sample) => sample.nal_units.len(),
            Self::Hevc(sample) => sample.nal_units.len(),
        }
    }

    /// 是否不含 NAL 单元
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 是否为关键帧 (含 IDR, HEVC 下含任意 IRAP)
    pub fn is_keyframe(&self) -> bool {
        match self {
            Self::Avc(sample) => sample.nal_units.iter().any(|n| n.nalu_type().is_idr()),
            Self::Hevc(sample) => sample.nal_units.iter().any(|n| n.nalu_type().is_irap()),
        }
    }

    /// 解析样本中每个 SEI NAL 的首条消息
    pub fn sei_messages(&self) -> NalResult<Vec<Sei>> {
        match self {
            Self::Avc(sample) => sample
                .nal_units
                .iter()
                .filter(|n| n.nalu_type() == AvcNaluType::Sei)
                .map(|n| Sei::decode(&n.data))
                .collect(),
            Self::Hevc(sample) => sample
                .nal_units
                .iter()
                .filter(|n| {
                    matches!(
                        n.nalu_type(),
                        HevcNaluType::PrefixSeiNut | HevcNaluType::SuffixSeiNut
                    )
                })
                .map(|n| Sei::decode(&n.data))
                .collect(),
        }
    }

    /// 转换为 Annex B 格式
    pub fn to_annex_b(&self) -> Vec<u8> {
        match self {
            Self::Avc(sample) => sample.to_annex_b(),
            Self::Hevc(sample) => sample.to_annex_b(),
        }
    }
}

/// 单路视频基本流
#[derive(Debug, Clone)]
pub struct ElementaryStream {
    codec_id: VideoCodecId,
    sequence_header: Option<SequenceHeader>,
}

impl ElementaryStream {
    /// 创建, 尚无序列头
    pub fn new(codec_id: VideoCodecId) -> Self {
        Self {
            codec_id,
            sequence_header: None,
        }
    }

    /// 编码类型
    pub fn codec_id(&self) -> VideoCodecId {
        self.codec_id
    }

    /// 最近一次成功解析的序列头
    pub fn sequence_header(&self) -> Option<&SequenceHeader> {
        self.sequence_header.as_ref()
    }

    /// 当前 NAL 长度前缀宽度
    pub fn length_size(&self) -> Option<usize> {
        self.sequence_header.as_ref().map(SequenceHeader::length_size)
    }

    /// 解析序列头并替换当前序列头
    ///
    /// 解析失败时保留之前的序列头.
    pub fn push_sequence_header(&mut self, data: impl Into<Bytes>) -> NalResult<&SequenceHeader> {
        let data = data.into();
        let header = match self.codec_id {
            VideoCodecId::Avc => {
                SequenceHeader::Avc(AvcDecoderConfigurationRecord::decode_bytes(data)?)
            }
            VideoCodecId::Hevc => {
                SequenceHeader::Hevc(HevcDecoderConfigurationRecord::decode_bytes(data)?)
            }
        };
        debug!(
            "{}: 更新序列头, length_size={}",
            self.codec_id,
            header.length_size()
        );
        Ok(self.sequence_header.insert(header))
    }

    /// 按当前序列头解析样本, 尚无序列头时返回 [`NalError::MissingSequenceHeader`]
    pub fn parse_sample(&self, data: impl Into<Bytes>) -> NalResult<ParsedSample> {
        let length_size = self.length_size().ok_or(NalError::MissingSequenceHeader)?;
        let data = data.into();
        Ok(match self.codec_id {
            VideoCodecId::Avc => ParsedSample::Avc(AvcSample::decode_bytes(data, length_size)?),
            VideoCodecId::Hevc => ParsedSample::Hevc(HevcSample::decode_bytes(data, length_size)?),
        })
    }

    /// 丢弃序列头 (如码流切换)
    pub fn reset(&mut self) {
        self.sequence_header = None;
    }
}

impl fmt::Display for ElementaryStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.length_size() {
            Some(n) => write!(f, "{}, length_size={}", self.codec_id, n),
            None => write!(f, "{}, 无序列头", self.codec_id),
        }
    }
}
