//! AVC/HEVC NAL 单元的公共抽象.
//!
//! 两种编码的 NAL 单元只在头部长度与位布局上不同, 样本与参数集数组的
//! 长度前缀框架通过 [`NalUnitCodec`] 统一实现一次.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};
use nalkit_core::{ByteReader, NalError, NalResult};

/// 可独立编解码的 NAL 单元
pub trait NalUnitCodec: Sized + Clone + fmt::Debug + fmt::Display + PartialEq {
    /// NAL 头部长度 (字节)
    const HEADER_SIZE: usize;

    /// 从含头部的 NAL 数据解析, 载荷与输入共享缓冲区
    fn decode_bytes(data: Bytes) -> NalResult<Self>;

    /// 追加编码结果 (头部 + 载荷)
    fn encode_into(&self, out: &mut BytesMut);

    /// 编码后的总长度 (头部 + 载荷)
    fn size(&self) -> usize;

    /// 从含头部的 NAL 数据解析 (拷贝输入)
    fn decode(data: &[u8]) -> NalResult<Self> {
        Self::decode_bytes(Bytes::copy_from_slice(data))
    }

    /// 编码为字节
    fn encode(&self) -> Vec<u8> {
        let mut out = BytesMut::with_capacity(self.size());
        self.encode_into(&mut out);
        out.to_vec()
    }
}

/// 读取 `count` 个 16 位长度前缀的参数集 NAL 单元, 按顺序追加到 `out`
pub(crate) fn read_parameter_sets<N: NalUnitCodec>(
    r: &mut ByteReader,
    count: usize,
    out: &mut Vec<N>,
    context: &'static str,
) -> NalResult<()> {
    out.reserve(count.min(r.remaining() / 2));
    for _ in 0..count {
        let len = r.read_u16_be(context)? as usize;
        let body = r.read_bytes(len, context)?;
        out.push(N::decode_bytes(body)?);
    }
    Ok(())
}

/// 写出 16 位长度前缀的参数集 NAL 单元
pub(crate) fn write_parameter_sets<N: NalUnitCodec>(
    out: &mut BytesMut,
    units: &[N],
    context: &'static str,
) -> NalResult<()> {
    for unit in units {
        let size = unit.size();
        let len = u16::try_from(size).map_err(|_| {
            NalError::InvalidSize(format!("{context} 长度 {size} 超过 16 位长度字段上限"))
        })?;
        out.put_u16(len);
        unit.encode_into(out);
    }
    Ok(())
}

/// 16 位长度前缀参数集数组编码后的字节数
pub(crate) fn parameter_sets_size<N: NalUnitCodec>(units: &[N]) -> usize {
    units.iter().map(|u| 2 + u.size()).sum()
}
