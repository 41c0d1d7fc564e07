//! H.264 NAL (Network Abstraction Layer) 单元编解码.
//!
//! # NAL 头部 (1 字节)
//! ```text
//! ┌─────────────────────────────────────┐
//! │ forbidden(1) | ref_idc(2) | type(5) │
//! └─────────────────────────────────────┘
//! ```
//!
//! 头部之后的全部字节为载荷 (EBSP), 可以为空.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};
use nalkit_core::{NalError, NalResult};

use crate::parsers::nal::NalUnitCodec;
use crate::parsers::sei;

/// NAL 单元类型 (ISO/IEC 14496-10 表 7-1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvcNaluType {
    /// 非 IDR 图像切片
    NonIdr,
    /// 数据分区 A
    DataPartitionA,
    /// 数据分区 B
    DataPartitionB,
    /// 数据分区 C
    DataPartitionC,
    /// IDR 图像切片 (关键帧)
    Idr,
    /// 增补增强信息 (SEI)
    Sei,
    /// 序列参数集 (SPS)
    Sps,
    /// 图像参数集 (PPS)
    Pps,
    /// 访问单元分隔符
    AccessUnitDelimiter,
    /// 序列结束
    EndOfSequence,
    /// 流结束
    EndOfStream,
    /// 填充数据
    FillerData,
    /// SPS 扩展
    SpsExt,
    /// 前缀 NAL 单元 (SVC/MVC)
    PrefixNalu,
    /// 子集 SPS
    SubsetSps,
    /// 辅助编码图像切片
    LayerWithoutPartition,
    /// 切片扩展 (SVC/MVC)
    CodedSliceExt,
    /// 保留类型: 16-18, 21-23 (仅由 from_type_id 构造, 其他编号无法往返)
    Reserved(u8),
    /// 未指定类型: 0, 24-31 (仅由 from_type_id 构造, 其他编号无法往返)
    Unspecified(u8),
}

impl AvcNaluType {
    /// 从类型编号创建 (只使用低 5 位)
    pub fn from_type_id(type_id: u8) -> Self {
        match type_id & 0x1F {
            1 => Self::NonIdr,
            2 => Self::DataPartitionA,
            3 => Self::DataPartitionB,
            4 => Self::DataPartitionC,
            5 => Self::Idr,
            6 => Self::Sei,
            7 => Self::Sps,
            8 => Self::Pps,
            9 => Self::AccessUnitDelimiter,
            10 => Self::EndOfSequence,
            11 => Self::EndOfStream,
            12 => Self::FillerData,
            13 => Self::SpsExt,
            14 => Self::PrefixNalu,
            15 => Self::SubsetSps,
            19 => Self::LayerWithoutPartition,
            20 => Self::CodedSliceExt,
            id @ (16..=18 | 21..=23) => Self::Reserved(id),
            id => Self::Unspecified(id),
        }
    }

    /// 获取类型编号
    pub fn type_id(&self) -> u8 {
        match self {
            Self::NonIdr => 1,
            Self::DataPartitionA => 2,
            Self::DataPartitionB => 3,
            Self::DataPartitionC => 4,
            Self::Idr => 5,
            Self::Sei => 6,
            Self::Sps => 7,
            Self::Pps => 8,
            Self::AccessUnitDelimiter => 9,
            Self::EndOfSequence => 10,
            Self::EndOfStream => 11,
            Self::FillerData => 12,
            Self::SpsExt => 13,
            Self::PrefixNalu => 14,
            Self::SubsetSps => 15,
            Self::LayerWithoutPartition => 19,
            Self::CodedSliceExt => 20,
            Self::Reserved(id) | Self::Unspecified(id) => *id,
        }
    }

    /// 显示名称, 保留与未指定区间多对一映射
    pub fn name(&self) -> &'static str {
        match self {
            Self::NonIdr => "NonIDR",
            Self::DataPartitionA => "DataPartitionA",
            Self::DataPartitionB => "DataPartitionB",
            Self::DataPartitionC => "DataPartitionC",
            Self::Idr => "IDR",
            Self::Sei => "SEI",
            Self::Sps => "SPS",
            Self::Pps => "PPS",
            Self::AccessUnitDelimiter => "AccessUnitDelimiter",
            Self::EndOfSequence => "EOSequence",
            Self::EndOfStream => "EOStream",
            Self::FillerData => "FilterData",
            Self::SpsExt => "SPSExt",
            Self::PrefixNalu => "PrefixNALU",
            Self::SubsetSps => "SubsetSPS",
            Self::LayerWithoutPartition => "LayerWithoutPartition",
            Self::CodedSliceExt => "CodedSliceExt",
            Self::Reserved(_) => "Reserved",
            Self::Unspecified(_) => "Unspecified",
        }
    }

    /// 是否为 VCL (Video Coding Layer) NAL
    pub fn is_vcl(&self) -> bool {
        matches!(
            self,
            Self::NonIdr
                | Self::DataPartitionA
                | Self::DataPartitionB
                | Self::DataPartitionC
                | Self::Idr
        )
    }

    /// 是否为关键帧 (IDR)
    pub fn is_idr(&self) -> bool {
        matches!(self, Self::Idr)
    }
}

impl fmt::Display for AvcNaluType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// H.264 NAL 头部
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvcNaluHeader {
    /// forbidden_zero_bit, 合法码流中恒为 false
    pub forbidden_zero_bit: bool,
    /// nal_ref_idc (参考重要性, 0-3)
    pub ref_idc: u8,
    /// nal_unit_type
    pub nalu_type: AvcNaluType,
}

impl AvcNaluHeader {
    /// 头部长度 (字节)
    pub const SIZE: usize = 1;

    /// 创建头部 (forbidden_zero_bit = 0)
    pub fn new(ref_idc: u8, nalu_type: AvcNaluType) -> Self {
        Self {
            forbidden_zero_bit: false,
            ref_idc,
            nalu_type,
        }
    }

    /// 从首字节解析
    pub fn decode(data: &[u8]) -> NalResult<Self> {
        let Some(&b) = data.first() else {
            return Err(NalError::truncated("AVC NAL 头部", Self::SIZE, 0));
        };
        Ok(Self {
            forbidden_zero_bit: (b >> 7) & 0x01 != 0,
            ref_idc: (b >> 5) & 0x03,
            nalu_type: AvcNaluType::from_type_id(b & 0x1F),
        })
    }

    /// 打包为 1 字节
    pub fn encode(&self) -> [u8; Self::SIZE] {
        [u8::from(self.forbidden_zero_bit) << 7
            | (self.ref_idc & 0x03) << 5
            | (self.nalu_type.type_id() & 0x1F)]
    }
}

impl fmt::Display for AvcNaluHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, NRI={}", self.nalu_type, self.ref_idc)
    }
}

/// H.264 NAL 单元
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvcNalUnit {
    /// NAL 头部
    pub header: AvcNaluHeader,
    /// 载荷 (不含 1 字节 NAL 头)
    pub data: Bytes,
}

impl AvcNalUnit {
    /// 由头部和载荷创建
    pub fn new(header: AvcNaluHeader, data: impl Into<Bytes>) -> Self {
        Self {
            header,
            data: data.into(),
        }
    }

    /// NAL 类型
    pub fn nalu_type(&self) -> AvcNaluType {
        self.header.nalu_type
    }

    /// nal_ref_idc
    pub fn ref_idc(&self) -> u8 {
        self.header.ref_idc
    }

    /// 获取 RBSP 数据 (移除 emulation prevention 字节)
    pub fn rbsp(&self) -> Vec<u8> {
        sei::unescape(&self.data)
    }
}

impl NalUnitCodec for AvcNalUnit {
    const HEADER_SIZE: usize = AvcNaluHeader::SIZE;

    fn decode_bytes(data: Bytes) -> NalResult<Self> {
        let header = AvcNaluHeader::decode(&data)?;
        Ok(Self {
            header,
            data: data.slice(Self::HEADER_SIZE..),
        })
    }

    fn encode_into(&self, out: &mut BytesMut) {
        out.put_slice(&self.header.encode());
        out.put_slice(&self.data);
    }

    fn size(&self) -> usize {
        Self::HEADER_SIZE + self.data.len()
    }
}

impl fmt::Display for AvcNalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, size={}B", self.header, self.data.len())
    }
}
