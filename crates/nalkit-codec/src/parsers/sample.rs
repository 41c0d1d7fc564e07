//! 长度前缀格式的样本 (ISO/IEC 14496-15 5.3.4.2 / 8.3.4.2).
//!
//! 一个样本即一个访问单元, 由若干 `length(N 字节, 大端) + NAL 单元` 组成,
//! N 来自配置记录的 lengthSizeMinusOne + 1.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};
use log::trace;
use nalkit_core::{ByteReader, NalError, NalResult};

use crate::parsers::nal::NalUnitCodec;

/// Annex B 4 字节起始码
pub const ANNEX_B_START_CODE: [u8; 4] = [0x00, 0x00, 0x00, 0x01];

/// 长度前缀样本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample<N> {
    /// NAL 长度前缀宽度 (字节), 合法值 1..=4
    pub length_size: usize,
    /// NAL 单元, 按码流顺序
    pub nal_units: Vec<N>,
}

impl<N: NalUnitCodec> Sample<N> {
    /// 创建空样本, 不校验 `length_size`
    pub fn new(length_size: usize) -> Self {
        Self {
            length_size,
            nal_units: Vec::new(),
        }
    }

    /// 由 NAL 单元列表创建
    pub fn with_nal_units(length_size: usize, nal_units: Vec<N>) -> Self {
        Self {
            length_size,
            nal_units,
        }
    }

    fn check_length_size(length_size: usize) -> NalResult<()> {
        if (1..=4).contains(&length_size) {
            Ok(())
        } else {
            Err(NalError::InvalidLengthSize(length_size))
        }
    }

    /// 解析 (拷贝输入)
    pub fn decode(data: &[u8], length_size: usize) -> NalResult<Self> {
        Self::decode_bytes(Bytes::copy_from_slice(data), length_size)
    }

    /// 解析, NAL 载荷与输入共享缓冲区
    ///
    /// 空输入得到空样本.
    pub fn decode_bytes(data: Bytes, length_size: usize) -> NalResult<Self> {
        Self::check_length_size(length_size)?;

        let mut r = ByteReader::new(data);
        let mut nal_units = Vec::new();
        while !r.is_empty() {
            let len = r.read_uint_be(length_size, "样本 NAL 长度")? as usize;
            let body = r.read_bytes(len, "样本 NAL 数据")?;
            let nalu = N::decode_bytes(body)?;
            trace!("样本 NAL #{}: {}", nal_units.len(), nalu);
            nal_units.push(nalu);
        }

        Ok(Self {
            length_size,
            nal_units,
        })
    }

    /// 编码后的字节数
    pub fn size(&self) -> usize {
        self.nal_units
            .iter()
            .map(|n| self.length_size + n.size())
            .sum()
    }

    /// 编码为长度前缀格式
    pub fn encode(&self) -> NalResult<Vec<u8>> {
        Self::check_length_size(self.length_size)?;
        let max_len = (1u64 << (8 * self.length_size)) - 1;

        let mut out = BytesMut::with_capacity(self.size());
        for nalu in &self.nal_units {
            let len = nalu.size() as u64;
            if len > max_len {
                return Err(NalError::InvalidSize(format!(
                    "NAL 长度 {len} 超过 {} 字节长度前缀上限 {max_len}",
                    self.length_size
                )));
            }
            out.put_uint(len, self.length_size);
            nalu.encode_into(&mut out);
        }
        Ok(out.to_vec())
    }

    /// 转换为 Annex B 格式 (每个 NAL 前加 4 字节起始码)
    pub fn to_annex_b(&self) -> Vec<u8> {
        let mut out = BytesMut::with_capacity(
            self.nal_units
                .iter()
                .map(|n| ANNEX_B_START_CODE.len() + n.size())
                .sum(),
        );
        for nalu in &self.nal_units {
            out.put_slice(&ANNEX_B_START_CODE);
            nalu.encode_into(&mut out);
        }
        out.to_vec()
    }
}

impl<N: NalUnitCodec> fmt::Display for Sample<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "length_size={}, nalus={}",
            self.length_size,
            self.nal_units.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::avc::{AvcNalUnit, AvcNaluHeader, AvcNaluType, AvcSample};
    use crate::parsers::hevc::{HevcNaluType, HevcSample};

    #[test]
    fn test_decode_avc_single_nalu() {
        let sample = AvcSample::decode(&[0x00, 0x00, 0x00, 0x02, 0x09, 0xF0], 4).unwrap();
        assert_eq!(sample.nal_units.len(), 1);
        let nalu = &sample.nal_units[0];
        assert_eq!(nalu.size(), 2);
        assert_eq!(nalu.header.encode(), [0x09]);
        assert_eq!(nalu.nalu_type(), AvcNaluType::AccessUnitDelimiter);
        assert_eq!(&nalu.data[..], &[0xF0]);
    }

    #[test]
    fn test_decode_multiple_nalus_in_order() {
        let data = [
            0x00, 0x02, 0x09, 0xF0, // AUD
            0x00, 0x03, 0x06, 0x05, 0x00, // SEI
            0x00, 0x02, 0x65, 0x88, // IDR
        ];
        let sample = AvcSample::decode(&data, 2).unwrap();
        let types: Vec<_> = sample.nal_units.iter().map(|n| n.nalu_type()).collect();
        assert_eq!(
            types,
            vec![AvcNaluType::AccessUnitDelimiter, AvcNaluType::Sei, AvcNaluType::Idr]
        );
        assert_eq!(sample.encode().unwrap(), data);
    }

    #[test]
    fn test_decode_empty_input() {
        let sample = AvcSample::decode(&[], 4).unwrap();
        assert!(sample.nal_units.is_empty());
        assert!(sample.encode().unwrap().is_empty());
    }

    #[test]
    fn test_decode_every_length_size() {
        for length_size in 1..=4 {
            let mut data = vec![0u8; length_size - 1];
            data.extend_from_slice(&[0x02, 0x41, 0x9A]);
            let sample = AvcSample::decode(&data, length_size).unwrap();
            assert_eq!(sample.nal_units.len(), 1, "length_size={length_size}");
            assert_eq!(sample.encode().unwrap(), data);
        }
    }

    #[test]
    fn test_decode_invalid_length_size() {
        for length_size in [0, 5, 8] {
            assert_eq!(
                AvcSample::decode(&[0x00, 0x01, 0x09], length_size).unwrap_err(),
                NalError::InvalidLengthSize(length_size)
            );
        }
        let sample = AvcSample::new(0);
        assert_eq!(sample.encode().unwrap_err(), NalError::InvalidLengthSize(0));
    }

    #[test]
    fn test_decode_truncated_length_field() {
        let err = AvcSample::decode(&[0x00, 0x00, 0x02], 4).unwrap_err();
        assert!(err.is_truncated(), "{err}");
    }

    #[test]
    fn test_decode_truncated_body() {
        let err = AvcSample::decode(&[0x00, 0x00, 0x00, 0x05, 0x09, 0xF0], 4).unwrap_err();
        assert_eq!(err, NalError::truncated("样本 NAL 数据", 5, 2));
    }

    #[test]
    fn test_decode_zero_length_nalu() {
        let err = AvcSample::decode(&[0x00, 0x00], 2).unwrap_err();
        assert!(err.is_truncated());
    }

    #[test]
    fn test_decode_hevc_sample() {
        let data = [0x00, 0x00, 0x00, 0x03, 0x26, 0x01, 0xAF];
        let sample = HevcSample::decode(&data, 4).unwrap();
        assert_eq!(sample.nal_units[0].nalu_type(), HevcNaluType::IdrWRadl);
        assert_eq!(sample.encode().unwrap(), data);
    }

    #[test]
    fn test_encode_length_overflow() {
        let nalu = AvcNalUnit::new(AvcNaluHeader::new(3, AvcNaluType::Idr), vec![0u8; 255]);
        let sample = AvcSample::with_nal_units(1, vec![nalu.clone()]);
        assert!(matches!(sample.encode(), Err(NalError::InvalidSize(_))));

        let sample = AvcSample::with_nal_units(2, vec![nalu]);
        let encoded = sample.encode().unwrap();
        assert_eq!(&encoded[..2], &[0x01, 0x00]);
    }

    #[test]
    fn test_to_annex_b() {
        let data = [0x00, 0x02, 0x09, 0xF0, 0x00, 0x02, 0x65, 0x88];
        let sample = AvcSample::decode(&data, 2).unwrap();
        assert_eq!(
            sample.to_annex_b(),
            vec![0x00, 0x00, 0x00, 0x01, 0x09, 0xF0, 0x00, 0x00, 0x00, 0x01, 0x65, 0x88]
        );
    }

    #[test]
    fn test_decode_shares_input_buffer() {
        let data = Bytes::from_static(&[0x00, 0x03, 0x67, 0x42, 0x00]);
        let sample = AvcSample::decode_bytes(data.clone(), 2).unwrap();
        assert_eq!(sample.nal_units[0].data.as_ptr(), data[3..].as_ptr());
    }
}
