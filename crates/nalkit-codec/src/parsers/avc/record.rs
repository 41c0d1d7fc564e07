//! AVCDecoderConfigurationRecord (ISO/IEC 14496-15 5.3.3.1) 编解码.
//!
//! 即 FLV 序列头 / MP4 `avcC` box 的内容:
//! ```text
//! configurationVersion(8) profile(8) compatibility(8) level(8)
//! reserved(6)=1 lengthSizeMinusOne(2)
//! reserved(3)=1 numOfSequenceParameterSets(5)
//!     { sequenceParameterSetLength(16) sequenceParameterSetNALUnit } ...
//! numOfPictureParameterSets(8)
//!     { pictureParameterSetLength(16) pictureParameterSetNALUnit } ...
//! ```

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};
use log::debug;
use nalkit_core::{ByteReader, NalError, NalResult};

use super::nal::AvcNalUnit;
use crate::parsers::nal::{parameter_sets_size, read_parameter_sets, write_parameter_sets};
use crate::parsers::sample::Sample;

/// H.264 profile_idc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvcProfile {
    /// Baseline (66)
    Baseline,
    /// Main (77)
    Main,
    /// Extended (88)
    Extended,
    /// High (100)
    High,
    /// High 10 (110)
    High10,
    /// High 4:2:2 (122)
    High422,
    /// High 4:4:4 Predictive (244)
    High444,
    /// 其他 profile_idc
    Other(u8),
}

impl AvcProfile {
    /// 从 profile_idc 创建
    pub fn from_idc(idc: u8) -> Self {
        match idc {
            66 => Self::Baseline,
            77 => Self::Main,
            88 => Self::Extended,
            100 => Self::High,
            110 => Self::High10,
            122 => Self::High422,
            244 => Self::High444,
            other => Self::Other(other),
        }
    }

    /// 获取 profile_idc
    pub fn idc(&self) -> u8 {
        match self {
            Self::Baseline => 66,
            Self::Main => 77,
            Self::Extended => 88,
            Self::High => 100,
            Self::High10 => 110,
            Self::High422 => 122,
            Self::High444 => 244,
            Self::Other(idc) => *idc,
        }
    }
}

impl fmt::Display for AvcProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Baseline => write!(f, "Baseline"),
            Self::Main => write!(f, "Main"),
            Self::Extended => write!(f, "Extended"),
            Self::High => write!(f, "High"),
            Self::High10 => write!(f, "High10"),
            Self::High422 => write!(f, "High(422)"),
            Self::High444 => write!(f, "High(444)"),
            Self::Other(idc) => write!(f, "Profile/{idc}"),
        }
    }
}

/// H.264 level_idc (数值为 level × 10, 9 表示 1b)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AvcLevel(pub u8);

impl AvcLevel {
    /// Level 1b
    pub const LEVEL_1B: Self = Self(9);
    /// Level 3.1
    pub const LEVEL_3_1: Self = Self(31);
    /// Level 4.0
    pub const LEVEL_4: Self = Self(40);
    /// Level 5.1
    pub const LEVEL_5_1: Self = Self(51);
}

impl fmt::Display for AvcLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            9 => write!(f, "1b"),
            v if v % 10 == 0 => write!(f, "{}", v / 10),
            v => write!(f, "{}.{}", v / 10, v % 10),
        }
    }
}

/// H.264 序列头
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvcDecoderConfigurationRecord {
    /// configurationVersion, 恒为 1
    pub configuration_version: u8,
    /// AVCProfileIndication
    pub profile_indication: AvcProfile,
    /// profile_compatibility
    pub profile_compatibility: u8,
    /// AVCLevelIndication
    pub level_indication: AvcLevel,
    /// lengthSizeMinusOne (2 位), 样本中 NAL 长度前缀宽度减一
    pub length_size_minus_one: u8,
    /// SPS 列表, 按参数集 ID 升序 (生产者约定, 解析不校验)
    pub sequence_parameter_sets: Vec<AvcNalUnit>,
    /// PPS 列表
    pub picture_parameter_sets: Vec<AvcNalUnit>,
}

impl AvcDecoderConfigurationRecord {
    /// 参数集数组之前的固定头部长度
    pub const PREFIX_SIZE: usize = 5;
    /// SPS 个数字段只有 5 位
    pub const MAX_SPS_COUNT: usize = 0x1F;

    /// 创建空记录 (configurationVersion = 1)
    pub fn new() -> Self {
        Self {
            configuration_version: 1,
            profile_indication: AvcProfile::Other(0),
            profile_compatibility: 0,
            level_indication: AvcLevel::default(),
            length_size_minus_one: 0,
            sequence_parameter_sets: Vec::new(),
            picture_parameter_sets: Vec::new(),
        }
    }

    /// NAL 长度前缀宽度 (字节)
    pub fn length_size(&self) -> usize {
        usize::from(self.length_size_minus_one) + 1
    }

    /// 解析 (拷贝输入)
    pub fn decode(data: &[u8]) -> NalResult<Self> {
        Self::decode_bytes(Bytes::copy_from_slice(data))
    }

    /// 解析, 参数集载荷与输入共享缓冲区
    pub fn decode_bytes(data: Bytes) -> NalResult<Self> {
        let mut r = ByteReader::new(data);
        r.ensure(Self::PREFIX_SIZE, "avcC 固定头部")?;

        let configuration_version = r.read_u8("configurationVersion")?;
        let profile_indication = AvcProfile::from_idc(r.read_u8("AVCProfileIndication")?);
        let profile_compatibility = r.read_u8("profile_compatibility")?;
        let level_indication = AvcLevel(r.read_u8("AVCLevelIndication")?);
        let length_size_minus_one = r.read_u8("lengthSizeMinusOne")? & 0x03;

        let num_sps = usize::from(r.read_u8("numOfSequenceParameterSets")? & 0x1F);
        let mut sequence_parameter_sets: Vec<AvcNalUnit> = Vec::new();
        read_parameter_sets(&mut r, num_sps, &mut sequence_parameter_sets, "avcC SPS")?;

        let num_pps = usize::from(r.read_u8("numOfPictureParameterSets")?);
        let mut picture_parameter_sets: Vec<AvcNalUnit> = Vec::new();
        read_parameter_sets(&mut r, num_pps, &mut picture_parameter_sets, "avcC PPS")?;

        if !r.is_empty() {
            // High profile 的 chroma_format 等扩展字段不在解析范围内
            debug!("avcC: 忽略尾部 {} 字节", r.remaining());
        }

        let record = Self {
            configuration_version,
            profile_indication,
            profile_compatibility,
            level_indication,
            length_size_minus_one,
            sequence_parameter_sets,
            picture_parameter_sets,
        };
        debug!(
            "avcC: profile={}, level={}, length_size={}, sps={}, pps={}",
            record.profile_indication,
            record.level_indication,
            record.length_size(),
            record.sequence_parameter_sets.len(),
            record.picture_parameter_sets.len(),
        );
        Ok(record)
    }

    /// 编码后的字节数
    pub fn size(&self) -> usize {
        Self::PREFIX_SIZE
            + 1
            + parameter_sets_size(&self.sequence_parameter_sets)
            + 1
            + parameter_sets_size(&self.picture_parameter_sets)
    }

    /// 编码, SPS 在前 PPS 在后
    pub fn encode(&self) -> NalResult<Vec<u8>> {
        let num_sps = self.sequence_parameter_sets.len();
        if num_sps > Self::MAX_SPS_COUNT {
            return Err(NalError::InvalidSize(format!(
                "avcC: SPS 个数 {num_sps} 超过 {}",
                Self::MAX_SPS_COUNT
            )));
        }
        let num_pps = u8::try_from(self.picture_parameter_sets.len()).map_err(|_| {
            NalError::InvalidSize(format!(
                "avcC: PPS 个数 {} 超过 255",
                self.picture_parameter_sets.len()
            ))
        })?;

        let mut out = BytesMut::with_capacity(self.size());
        out.put_u8(self.configuration_version);
        out.put_u8(self.profile_indication.idc());
        out.put_u8(self.profile_compatibility);
        out.put_u8(self.level_indication.0);
        out.put_u8(0xFC | (self.length_size_minus_one & 0x03));

        out.put_u8(0xE0 | num_sps as u8);
        write_parameter_sets(&mut out, &self.sequence_parameter_sets, "avcC SPS")?;

        out.put_u8(num_pps);
        write_parameter_sets(&mut out, &self.picture_parameter_sets, "avcC PPS")?;

        Ok(out.to_vec())
    }
}

impl Sample<AvcNalUnit> {
    /// 按记录的 lengthSizeMinusOne 创建空样本
    pub fn from_record(record: &AvcDecoderConfigurationRecord) -> Self {
        Self::new(record.length_size())
    }
}

impl Default for AvcDecoderConfigurationRecord {
    fn default() -> Self {
        Self::new()
    }
}
