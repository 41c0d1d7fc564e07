//! HEVCDecoderConfigurationRecord (ISO/IEC 14496-15 8.3.3.1) 编解码.
//!
//! 固定 23 字节头部之后是参数集数组:
//! ```text
//! array_completeness(1) reserved(1) NAL_unit_type(6)
//! numNalus(16) { nalUnitLength(16) nalUnit } ...
//! ```

use bytes::{BufMut, Bytes, BytesMut};
use log::{debug, warn};
use nalkit_core::{BitReader, BitWriter, ByteReader, NalError, NalResult};

use super::nal::{HevcNalUnit, HevcNaluType};
use crate::parsers::nal::{parameter_sets_size, read_parameter_sets, write_parameter_sets};
use crate::parsers::sample::Sample;

/// H.265 序列头
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HevcDecoderConfigurationRecord {
    /// configurationVersion, 恒为 1
    pub configuration_version: u8,
    /// general_profile_space (2 位)
    pub general_profile_space: u8,
    /// general_tier_flag (1 位)
    pub general_tier_flag: u8,
    /// general_profile_idc (5 位)
    pub general_profile_idc: u8,
    /// general_profile_compatibility_flags
    pub general_profile_compatibility_flags: u32,
    /// general_constraint_indicator_flags (48 位)
    pub general_constraint_indicator_flags: u64,
    /// general_level_idc
    pub general_level_idc: u8,
    /// min_spatial_segmentation_idc (12 位)
    pub min_spatial_segmentation_idc: u16,
    /// parallelismType (2 位)
    pub parallelism_type: u8,
    /// chromaFormat (2 位)
    pub chroma_format: u8,
    /// bitDepthLumaMinus8 (3 位)
    pub bit_depth_luma_minus8: u8,
    /// bitDepthChromaMinus8 (3 位)
    pub bit_depth_chroma_minus8: u8,
    /// avgFrameRate, 单位 帧/256 秒
    pub avg_frame_rate: u16,
    /// constantFrameRate (2 位)
    pub constant_frame_rate: u8,
    /// numTemporalLayers (3 位)
    pub num_temporal_layers: u8,
    /// temporalIdNested (1 位)
    pub temporal_id_nested: u8,
    /// lengthSizeMinusOne (2 位)
    pub length_size_minus_one: u8,
    /// VPS 列表
    pub video_parameter_sets: Vec<HevcNalUnit>,
    /// SPS 列表
    pub sequence_parameter_sets: Vec<HevcNalUnit>,
    /// PPS 列表
    pub picture_parameter_sets: Vec<HevcNalUnit>,

    // 各字段前的保留位, 原样保存以便逐字节重编码
    reserved_min_spatial: u8,
    reserved_parallelism: u8,
    reserved_chroma_format: u8,
    reserved_bit_depth_luma: u8,
    reserved_bit_depth_chroma: u8,
}

impl HevcDecoderConfigurationRecord {
    /// 参数集数组之前的固定头部长度 (含 numOfArrays)
    pub const PREFIX_SIZE: usize = 23;
    /// array_completeness 位
    const ARRAY_COMPLETENESS: u8 = 0x80;

    /// 创建空记录 (configurationVersion = 1, 保留位全 1)
    pub fn new() -> Self {
        Self {
            configuration_version: 1,
            general_profile_space: 0,
            general_tier_flag: 0,
            general_profile_idc: 0,
            general_profile_compatibility_flags: 0,
            general_constraint_indicator_flags: 0,
            general_level_idc: 0,
            min_spatial_segmentation_idc: 0,
            parallelism_type: 0,
            chroma_format: 0,
            bit_depth_luma_minus8: 0,
            bit_depth_chroma_minus8: 0,
            avg_frame_rate: 0,
            constant_frame_rate: 0,
            num_temporal_layers: 0,
            temporal_id_nested: 0,
            length_size_minus_one: 0,
            video_parameter_sets: Vec::new(),
            sequence_parameter_sets: Vec::new(),
            picture_parameter_sets: Vec::new(),
            reserved_min_spatial: 0x0F,
            reserved_parallelism: 0x3F,
            reserved_chroma_format: 0x3F,
            reserved_bit_depth_luma: 0x1F,
            reserved_bit_depth_chroma: 0x1F,
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
        if data.len() < Self::PREFIX_SIZE {
            return Err(NalError::truncated(
                "hvcC 固定头部",
                Self::PREFIX_SIZE,
                data.len(),
            ));
        }

        let mut record = Self::new();
        let mut br = BitReader::new(&data[..Self::PREFIX_SIZE]);
        record.configuration_version = br.read_bits_u8(8, "configurationVersion")?;
        record.general_profile_space = br.read_bits_u8(2, "general_profile_space")?;
        record.general_tier_flag = br.read_bits_u8(1, "general_tier_flag")?;
        record.general_profile_idc = br.read_bits_u8(5, "general_profile_idc")?;
        record.general_profile_compatibility_flags =
            br.read_bits(32, "general_profile_compatibility_flags")?;
        record.general_constraint_indicator_flags =
            br.read_bits_u64(48, "general_constraint_indicator_flags")?;
        record.general_level_idc = br.read_bits_u8(8, "general_level_idc")?;
        record.reserved_min_spatial = br.read_bits_u8(4, "reserved")?;
        record.min_spatial_segmentation_idc =
            br.read_bits(12, "min_spatial_segmentation_idc")? as u16;
        record.reserved_parallelism = br.read_bits_u8(6, "reserved")?;
        record.parallelism_type = br.read_bits_u8(2, "parallelismType")?;
        record.reserved_chroma_format = br.read_bits_u8(6, "reserved")?;
        record.chroma_format = br.read_bits_u8(2, "chromaFormat")?;
        record.reserved_bit_depth_luma = br.read_bits_u8(5, "reserved")?;
        record.bit_depth_luma_minus8 = br.read_bits_u8(3, "bitDepthLumaMinus8")?;
        record.reserved_bit_depth_chroma = br.read_bits_u8(5, "reserved")?;
        record.bit_depth_chroma_minus8 = br.read_bits_u8(3, "bitDepthChromaMinus8")?;
        record.avg_frame_rate = br.read_bits(16, "avgFrameRate")? as u16;
        record.constant_frame_rate = br.read_bits_u8(2, "constantFrameRate")?;
        record.num_temporal_layers = br.read_bits_u8(3, "numTemporalLayers")?;
        record.temporal_id_nested = br.read_bits_u8(1, "temporalIdNested")?;
        record.length_size_minus_one = br.read_bits_u8(2, "lengthSizeMinusOne")?;
        let num_arrays = br.read_bits_u8(8, "numOfArrays")?;

        let mut r = ByteReader::new(data);
        r.skip(Self::PREFIX_SIZE, "hvcC 固定头部")?;

        // 以剩余字节驱动循环, numOfArrays 仅用于一致性检查
        let mut found_arrays = 0usize;
        while !r.is_empty() {
            let nalu_type = HevcNaluType::from_type_id(r.read_u8("hvcC 数组类型")? & 0x3F);
            let target = match nalu_type {
                HevcNaluType::VpsNut => &mut record.video_parameter_sets,
                HevcNaluType::SpsNut => &mut record.sequence_parameter_sets,
                HevcNaluType::PpsNut => &mut record.picture_parameter_sets,
                other => return Err(NalError::UnsupportedArrayType(other.type_id())),
            };
            let num_nalus = usize::from(r.read_u16_be("hvcC numNalus")?);
            read_parameter_sets(&mut r, num_nalus, target, "hvcC 参数集")?;
            found_arrays += 1;
        }
        if found_arrays != usize::from(num_arrays) {
            warn!("hvcC: numOfArrays={num_arrays}, 实际解析到 {found_arrays} 个数组");
        }

        debug!(
            "hvcC: profile_idc={}, level_idc={}, length_size={}, vps={}, sps={}, pps={}",
            record.general_profile_idc,
            record.general_level_idc,
            record.length_size(),
            record.video_parameter_sets.len(),
            record.sequence_parameter_sets.len(),
            record.picture_parameter_sets.len(),
        );
        Ok(record)
    }

    /// 非空参数集数组, 按 VPS, SPS, PPS 顺序
    fn arrays(&self) -> impl Iterator<Item = (HevcNaluType, &[HevcNalUnit])> {
        [
            (HevcNaluType::VpsNut, self.video_parameter_sets.as_slice()),
            (HevcNaluType::SpsNut, self.sequence_parameter_sets.as_slice()),
            (HevcNaluType::PpsNut, self.picture_parameter_sets.as_slice()),
        ]
        .into_iter()
        .filter(|(_, units)| !units.is_empty())
    }

    /// 编码后的字节数
    pub fn size(&self) -> usize {
        Self::PREFIX_SIZE
            + self
                .arrays()
                .map(|(_, units)| 3 + parameter_sets_size(units))
                .sum::<usize>()
    }

    /// 编码
    pub fn encode(&self) -> NalResult<Vec<u8>> {
        let num_arrays = self.arrays().count();

        let mut bw = BitWriter::with_capacity(Self::PREFIX_SIZE);
        bw.write_bits(u32::from(self.configuration_version), 8);
        bw.write_bits(u32::from(self.general_profile_space), 2);
        bw.write_bits(u32::from(self.general_tier_flag), 1);
        bw.write_bits(u32::from(self.general_profile_idc), 5);
        bw.write_bits(self.general_profile_compatibility_flags, 32);
        bw.write_bits_u64(self.general_constraint_indicator_flags, 48);
        bw.write_bits(u32::from(self.general_level_idc), 8);
        bw.write_bits(u32::from(self.reserved_min_spatial), 4);
        bw.write_bits(u32::from(self.min_spatial_segmentation_idc), 12);
        bw.write_bits(u32::from(self.reserved_parallelism), 6);
        bw.write_bits(u32::from(self.parallelism_type), 2);
        bw.write_bits(u32::from(self.reserved_chroma_format), 6);
        bw.write_bits(u32::from(self.chroma_format), 2);
        bw.write_bits(u32::from(self.reserved_bit_depth_luma), 5);
        bw.write_bits(u32::from(self.bit_depth_luma_minus8), 3);
        bw.write_bits(u32::from(self.reserved_bit_depth_chroma), 5);
        bw.write_bits(u32::from(self.bit_depth_chroma_minus8), 3);
        bw.write_bits(u32::from(self.avg_frame_rate), 16);
        bw.write_bits(u32::from(self.constant_frame_rate), 2);
        bw.write_bits(u32::from(self.num_temporal_layers), 3);
        bw.write_bits(u32::from(self.temporal_id_nested), 1);
        bw.write_bits(u32::from(self.length_size_minus_one), 2);
        bw.write_bits(num_arrays as u32, 8);

        let mut out = BytesMut::with_capacity(self.size());
        out.put_slice(&bw.finish());
        for (nalu_type, units) in self.arrays() {
            let count = u16::try_from(units.len()).map_err(|_| {
                NalError::InvalidSize(format!(
                    "hvcC: {nalu_type} 个数 {} 超过 16 位计数上限",
                    units.len()
                ))
            })?;
            out.put_u8(Self::ARRAY_COMPLETENESS | nalu_type.type_id());
            out.put_u16(count);
            write_parameter_sets(&mut out, units, "hvcC 参数集")?;
        }
        Ok(out.to_vec())
    }
}

impl Sample<HevcNalUnit> {
    /// 按记录的 lengthSizeMinusOne 创建空样本
    pub fn from_record(record: &HevcDecoderConfigurationRecord) -> Self {
        Self::new(record.length_size())
    }
}

impl Default for HevcDecoderConfigurationRecord {
    fn default() -> Self {
        Self::new()
    }
}
