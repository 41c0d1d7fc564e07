//! H.265/HEVC NAL (Network Abstraction Layer) 单元编解码.
//!
//! HEVC NAL 头部为 2 字节 (比 H.264 多一字节):
//! ```text
//! byte0: forbidden(1) | nal_unit_type(6) | nuh_layer_id 高 1 位
//! byte1: nuh_layer_id 低 5 位 | nuh_temporal_id_plus1(3)
//! ```

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};
use nalkit_core::{NalError, NalResult};

use crate::parsers::nal::NalUnitCodec;
use crate::parsers::sei;

/// HEVC NAL 单元类型 (H.265 表 7-1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HevcNaluType {
    /// TRAIL_N (非参考尾随图像)
    TrailN,
    /// TRAIL_R (参考尾随图像)
    TrailR,
    /// TSA_N
    TsaN,
    /// TSA_R
    TsaR,
    /// STSA_N
    StsaN,
    /// STSA_R
    StsaR,
    /// RADL_N
    RadlN,
    /// RADL_R
    RadlR,
    /// RASL_N
    RaslN,
    /// RASL_R
    RaslR,
    /// RSV_VCL_N10
    RsvVclN10,
    /// RSV_VCL_R11
    RsvVclR11,
    /// RSV_VCL_N12
    RsvVclN12,
    /// RSV_VCL_R13
    RsvVclR13,
    /// RSV_VCL_N14
    RsvVclN14,
    /// RSV_VCL_R15
    RsvVclR15,
    /// BLA_W_LP (Broken Link Access)
    BlaWLp,
    /// BLA_W_RADL
    BlaWRadl,
    /// BLA_N_LP
    BlaNLp,
    /// IDR_W_RADL (Instantaneous Decoding Refresh)
    IdrWRadl,
    /// IDR_N_LP
    IdrNLp,
    /// CRA_NUT (Clean Random Access)
    CraNut,
    /// 保留 IRAP 类型: 22-23 (仅由 from_type_id 构造, 其他编号无法往返)
    RsvIrapVcl(u8),
    /// 保留非 IRAP VCL 类型: 24-31 (仅由 from_type_id 构造, 其他编号无法往返)
    RsvVcl(u8),
    /// VPS (Video Parameter Set)
    VpsNut,
    /// SPS (Sequence Parameter Set)
    SpsNut,
    /// PPS (Picture Parameter Set)
    PpsNut,
    /// AUD (Access Unit Delimiter)
    AudNut,
    /// EOS (End of Sequence)
    EosNut,
    /// EOB (End of Bitstream)
    EobNut,
    /// FD (Filler Data)
    FdNut,
    /// PREFIX_SEI
    PrefixSeiNut,
    /// SUFFIX_SEI
    SuffixSeiNut,
    /// 保留非 VCL 类型: 41-47 (仅由 from_type_id 构造, 其他编号无法往返)
    RsvNvcl(u8),
    /// 未指定类型: 48-63 (仅由 from_type_id 构造, 其他编号无法往返)
    Unspec(u8),
    /// 超出 6 位范围的编号 (只可能来自 [`HevcNaluType::from_type_id`])
    Unknown(u8),
}

impl HevcNaluType {
    /// 从类型编号创建
    pub fn from_type_id(id: u8) -> Self {
        match id {
            0 => Self::TrailN,
            1 => Self::TrailR,
            2 => Self::TsaN,
            3 => Self::TsaR,
            4 => Self::StsaN,
            5 => Self::StsaR,
            6 => Self::RadlN,
            7 => Self::RadlR,
            8 => Self::RaslN,
            9 => Self::RaslR,
            10 => Self::RsvVclN10,
            11 => Self::RsvVclR11,
            12 => Self::RsvVclN12,
            13 => Self::RsvVclR13,
            14 => Self::RsvVclN14,
            15 => Self::RsvVclR15,
            16 => Self::BlaWLp,
            17 => Self::BlaWRadl,
            18 => Self::BlaNLp,
            19 => Self::IdrWRadl,
            20 => Self::IdrNLp,
            21 => Self::CraNut,
            22..=23 => Self::RsvIrapVcl(id),
            24..=31 => Self::RsvVcl(id),
            32 => Self::VpsNut,
            33 => Self::SpsNut,
            34 => Self::PpsNut,
            35 => Self::AudNut,
            36 => Self::EosNut,
            37 => Self::EobNut,
            38 => Self::FdNut,
            39 => Self::PrefixSeiNut,
            40 => Self::SuffixSeiNut,
            41..=47 => Self::RsvNvcl(id),
            48..=63 => Self::Unspec(id),
            _ => Self::Unknown(id),
        }
    }

    /// 获取类型编号
    pub fn type_id(&self) -> u8 {
        match self {
            Self::TrailN => 0,
            Self::TrailR => 1,
            Self::TsaN => 2,
            Self::TsaR => 3,
            Self::StsaN => 4,
            Self::StsaR => 5,
            Self::RadlN => 6,
            Self::RadlR => 7,
            Self::RaslN => 8,
            Self::RaslR => 9,
            Self::RsvVclN10 => 10,
            Self::RsvVclR11 => 11,
            Self::RsvVclN12 => 12,
            Self::RsvVclR13 => 13,
            Self::RsvVclN14 => 14,
            Self::RsvVclR15 => 15,
            Self::BlaWLp => 16,
            Self::BlaWRadl => 17,
            Self::BlaNLp => 18,
            Self::IdrWRadl => 19,
            Self::IdrNLp => 20,
            Self::CraNut => 21,
            Self::VpsNut => 32,
            Self::SpsNut => 33,
            Self::PpsNut => 34,
            Self::AudNut => 35,
            Self::EosNut => 36,
            Self::EobNut => 37,
            Self::FdNut => 38,
            Self::PrefixSeiNut => 39,
            Self::SuffixSeiNut => 40,
            Self::RsvIrapVcl(id)
            | Self::RsvVcl(id)
            | Self::RsvNvcl(id)
            | Self::Unspec(id)
            | Self::Unknown(id) => *id,
        }
    }

    /// 显示名称
    ///
    /// 保留与未指定区间按标准分组, 多个编号共用一个名称.
    /// [`HevcNaluType::Unknown`] 返回 `"NALU"`, 完整形式见 `Display`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TrailN => "TRAIL_N",
            Self::TrailR => "TRAIL_R",
            Self::TsaN => "TSA_N",
            Self::TsaR => "TSA_R",
            Self::StsaN => "STSA_N",
            Self::StsaR => "STSA_R",
            Self::RadlN => "RADL_N",
            Self::RadlR => "RADL_R",
            Self::RaslN => "RASL_N",
            Self::RaslR => "RASL_R",
            Self::RsvVclN10 => "RSV_VCL_N10",
            Self::RsvVclR11 => "RSV_VCL_R11",
            Self::RsvVclN12 => "RSV_VCL_N12",
            Self::RsvVclR13 => "RSV_VCL_R13",
            Self::RsvVclN14 => "RSV_VCL_N14",
            Self::RsvVclR15 => "RSV_VCL_R15",
            Self::BlaWLp => "BLA_W_LP",
            Self::BlaWRadl => "BLA_W_RADL",
            Self::BlaNLp => "BLA_N_LP",
            Self::IdrWRadl => "IDR_W_RADL",
            Self::IdrNLp => "IDR_N_LP",
            Self::CraNut => "CRA_NUT",
            Self::RsvIrapVcl(_) => "RSV_IRAP_VCL",
            Self::RsvVcl(_) => "RSV_VCL",
            Self::VpsNut => "VPS_NUT",
            Self::SpsNut => "SPS_NUT",
            Self::PpsNut => "PPS_NUT",
            Self::AudNut => "AUD_NUT",
            Self::EosNut => "EOS_NUT",
            Self::EobNut => "EOB_NUT",
            Self::FdNut => "FD_NUT",
            Self::PrefixSeiNut => "PREFIX_SEI_NUT",
            Self::SuffixSeiNut => "SUFFIX_SEI_NUT",
            Self::RsvNvcl(_) => "RSV_NVCL",
            Self::Unspec(_) => "UNSPEC",
            Self::Unknown(_) => "NALU",
        }
    }

    /// 是否为 VCL (Video Coding Layer) NAL
    pub fn is_vcl(&self) -> bool {
        self.type_id() < 32
    }

    /// 是否为 IRAP (Intra Random Access Point) NAL
    pub fn is_irap(&self) -> bool {
        matches!(self.type_id(), 16..=23)
    }

    /// 是否为 IDR NAL
    pub fn is_idr(&self) -> bool {
        matches!(self, Self::IdrWRadl | Self::IdrNLp)
    }

    /// 是否为参数集 (VPS/SPS/PPS)
    pub fn is_parameter_set(&self) -> bool {
        matches!(self, Self::VpsNut | Self::SpsNut | Self::PpsNut)
    }
}

impl fmt::Display for HevcNaluType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(id) => write!(f, "NALU/{id}"),
            other => f.write_str(other.name()),
        }
    }
}

/// H.265 NAL 头部
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HevcNaluHeader {
    /// forbidden_zero_bit, 合法码流中恒为 false
    pub forbidden_zero_bit: bool,
    /// nal_unit_type (6 位)
    pub nalu_type: HevcNaluType,
    /// nuh_layer_id (6 位)
    pub layer_id: u8,
    /// nuh_temporal_id_plus1 (3 位)
    pub temporal_id_plus1: u8,
}

impl HevcNaluHeader {
    /// 头部长度 (字节)
    pub const SIZE: usize = 2;

    /// 创建基础层头部 (layer_id = 0, temporal_id_plus1 = 1)
    pub fn new(nalu_type: HevcNaluType) -> Self {
        Self {
            forbidden_zero_bit: false,
            nalu_type,
            layer_id: 0,
            temporal_id_plus1: 1,
        }
    }

    /// 从前 2 字节解析
    pub fn decode(data: &[u8]) -> NalResult<Self> {
        let [b0, b1, ..] = *data else {
            return Err(NalError::truncated("HEVC NAL 头部", Self::SIZE, data.len()));
        };
        Ok(Self {
            forbidden_zero_bit: (b0 >> 7) & 0x01 != 0,
            nalu_type: HevcNaluType::from_type_id((b0 >> 1) & 0x3F),
            layer_id: ((b0 & 0x01) << 5) | ((b1 >> 3) & 0x1F),
            temporal_id_plus1: b1 & 0x07,
        })
    }

    /// 打包为 2 字节
    pub fn encode(&self) -> [u8; Self::SIZE] {
        [
            u8::from(self.forbidden_zero_bit) << 7
                | (self.nalu_type.type_id() & 0x3F) << 1
                | (self.layer_id >> 5) & 0x01,
            (self.layer_id & 0x1F) << 3 | (self.temporal_id_plus1 & 0x07),
        ]
    }
}

impl fmt::Display for HevcNaluHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, LayerID={}, TemporalIDPlus1={}",
            self.nalu_type, self.layer_id, self.temporal_id_plus1
        )
    }
}

/// H.265 NAL 单元
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HevcNalUnit {
    /// NAL 头部
    pub header: HevcNaluHeader,
    /// 载荷 (不含 2 字节 NAL 头)
    pub data: Bytes,
}

impl HevcNalUnit {
    /// 由头部和载荷创建
    pub fn new(header: HevcNaluHeader, data: impl Into<Bytes>) -> Self {
        Self {
            header,
            data: data.into(),
        }
    }

    /// NAL 类型
    pub fn nalu_type(&self) -> HevcNaluType {
        self.header.nalu_type
    }

    /// nuh_layer_id
    pub fn layer_id(&self) -> u8 {
        self.header.layer_id
    }

    /// nuh_temporal_id_plus1
    pub fn temporal_id_plus1(&self) -> u8 {
        self.header.temporal_id_plus1
    }

    /// 获取 RBSP 数据 (移除 emulation prevention 字节)
    pub fn rbsp(&self) -> Vec<u8> {
        sei::unescape(&self.data)
    }
}

impl NalUnitCodec for HevcNalUnit {
    const HEADER_SIZE: usize = HevcNaluHeader::SIZE;

    fn decode_bytes(data: Bytes) -> NalResult<Self> {
        let header = HevcNaluHeader::decode(&data)?;
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

impl fmt::Display for HevcNalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, size={}B", self.header, self.data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hevc_nalu_type_type_id() {
        for id in 0..=u8::MAX {
            assert_eq!(HevcNaluType::from_type_id(id).type_id(), id);
        }
    }

    #[test]
    fn test_hevc_nalu_type_every_id_roundtrips() {
        for id in 0..=63u8 {
            let kind = HevcNaluType::from_type_id(id);
            assert_eq!(kind.type_id(), id, "id={id}");
            let header = HevcNaluHeader::new(kind);
            assert_eq!(
                HevcNaluHeader::decode(&header.encode()).unwrap().nalu_type,
                kind,
                "id={id}"
            );
        }
    }

    #[test]
    fn test_hevc_nalu_type_name() {
        assert_eq!(HevcNaluType::from_type_id(19).name(), "IDR_W_RADL");
        assert_eq!(HevcNaluType::from_type_id(32).to_string(), "VPS_NUT");
        assert_eq!(HevcNaluType::from_type_id(39).to_string(), "PREFIX_SEI_NUT");
        assert_eq!(HevcNaluType::from_type_id(12).name(), "RSV_VCL_N12");
        assert_eq!(HevcNaluType::from_type_id(64).to_string(), "NALU/64");
    }

    #[test]
    fn test_hevc_nalu_type_reserved_ranges_share_name() {
        let groups: [(std::ops::RangeInclusive<u8>, &str); 4] = [
            (22..=23, "RSV_IRAP_VCL"),
            (24..=31, "RSV_VCL"),
            (41..=47, "RSV_NVCL"),
            (48..=63, "UNSPEC"),
        ];
        for (range, name) in groups {
            for id in range {
                assert_eq!(HevcNaluType::from_type_id(id).name(), name, "id={id}");
            }
        }
    }

    #[test]
    fn test_hevc_nalu_type_property() {
        assert!(HevcNaluType::IdrWRadl.is_idr());
        assert!(HevcNaluType::IdrWRadl.is_irap());
        assert!(HevcNaluType::CraNut.is_irap());
        assert!(!HevcNaluType::TrailR.is_irap());
        assert!(HevcNaluType::TrailR.is_vcl());
        assert!(!HevcNaluType::VpsNut.is_vcl());
        assert!(HevcNaluType::PpsNut.is_parameter_set());
        assert!(!HevcNaluType::AudNut.is_parameter_set());
    }

    #[test]
    fn test_hevc_header_vps() {
        let header = HevcNaluHeader::decode(&[0x40, 0x01]).unwrap();
        assert!(!header.forbidden_zero_bit);
        assert_eq!(header.nalu_type, HevcNaluType::VpsNut);
        assert_eq!(header.layer_id, 0);
        assert_eq!(header.temporal_id_plus1, 1);
        assert_eq!(header.to_string(), "VPS_NUT, LayerID=0, TemporalIDPlus1=1");
    }

    #[test]
    fn test_hevc_header_layer_id_spans_bytes() {
        // type=1, layer_id=0b100001 (最高位在 byte0 bit0), tid+1=2
        let header = HevcNaluHeader {
            forbidden_zero_bit: false,
            nalu_type: HevcNaluType::TrailR,
            layer_id: 0b10_0001,
            temporal_id_plus1: 2,
        };
        let bytes = header.encode();
        assert_eq!(bytes, [0b0000_0011, 0b0000_1010]);
        assert_eq!(HevcNaluHeader::decode(&bytes).unwrap(), header);
    }

    #[test]
    fn test_hevc_header_all_fields_set() {
        let header = HevcNaluHeader::decode(&[0xFF, 0xFF]).unwrap();
        assert!(header.forbidden_zero_bit);
        assert_eq!(header.nalu_type.type_id(), 63);
        assert_eq!(header.layer_id, 63);
        assert_eq!(header.temporal_id_plus1, 7);
        assert_eq!(header.encode(), [0xFF, 0xFF]);
    }

    #[test]
    fn test_hevc_nal_unit_decode() {
        // NAL 头: type=33 (SPS), layer_id=0, temporal_id=1
        let nalu = HevcNalUnit::decode(&[0x42, 0x01, 0xAA, 0xBB]).unwrap();
        assert_eq!(nalu.nalu_type(), HevcNaluType::SpsNut);
        assert_eq!(nalu.layer_id(), 0);
        assert_eq!(nalu.temporal_id_plus1(), 1);
        assert_eq!(&nalu.data[..], &[0xAA, 0xBB]);
        assert_eq!(nalu.to_string(), "SPS_NUT, LayerID=0, TemporalIDPlus1=1, size=2B");
    }

    #[test]
    fn test_hevc_nal_unit_short_input() {
        assert_eq!(
            HevcNalUnit::decode(&[0x40]).unwrap_err(),
            NalError::truncated("HEVC NAL 头部", 2, 1)
        );
        assert!(HevcNalUnit::decode(&[]).unwrap_err().is_truncated());
    }

    #[test]
    fn test_hevc_nal_unit_header_only() {
        let nalu = HevcNalUnit::decode(&[0x46, 0x01]).unwrap();
        assert_eq!(nalu.nalu_type(), HevcNaluType::AudNut);
        assert!(nalu.data.is_empty());
        assert_eq!(nalu.encode(), vec![0x46, 0x01]);
    }

    #[test]
    fn test_hevc_nal_unit_roundtrip() {
        let nalu = HevcNalUnit::new(
            HevcNaluHeader::new(HevcNaluType::IdrWRadl),
            vec![0xAF, 0x00, 0x00, 0x03, 0x01],
        );
        let encoded = nalu.encode();
        assert_eq!(&encoded[..2], &[0x26, 0x01]);
        assert_eq!(HevcNalUnit::decode(&encoded).unwrap(), nalu);
        assert_eq!(nalu.rbsp(), vec![0xAF, 0x00, 0x00, 0x01]);
    }
}
