//! 字节读取游标.
//!
//! 在 [`Bytes`] 上按字节读取大端整数和子切片. 子切片与输入共享底层缓冲区,
//! 不做拷贝.

use bytes::Bytes;

use crate::{NalError, NalResult};

/// 字节读取游标
///
/// # 示例
/// ```
/// use bytes::Bytes;
/// use nalkit_core::ByteReader;
///
/// let mut r = ByteReader::new(Bytes::from_static(&[0x00, 0x02, 0xAA, 0xBB]));
/// let len = r.read_u16_be("长度").unwrap() as usize;
/// assert_eq!(&r.read_bytes(len, "数据").unwrap()[..], &[0xAA, 0xBB]);
/// assert!(r.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ByteReader {
    data: Bytes,
    pos: usize,
}

impl ByteReader {
    /// 创建读取游标
    pub fn new(data: Bytes) -> Self {
        Self { data, pos: 0 }
    }

    /// 从切片创建 (拷贝一次)
    pub fn from_slice(data: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(data))
    }

    /// 当前读取位置
    pub fn position(&self) -> usize {
        self.pos
    }

    /// 剩余字节数
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// 是否已读完
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// 确认至少还有 `n` 字节可读
    pub fn ensure(&self, n: usize, context: &'static str) -> NalResult<()> {
        if n > self.remaining() {
            return Err(NalError::truncated(context, n, self.remaining()));
        }
        Ok(())
    }

    /// 读取 1 字节
    pub fn read_u8(&mut self, context: &'static str) -> NalResult<u8> {
        self.ensure(1, context)?;
        let v = self.data[self.pos];
        self.pos += 1;
        Ok(v)
    }

    /// 读取 2 字节大端整数
    pub fn read_u16_be(&mut self, context: &'static str) -> NalResult<u16> {
        self.read_uint_be(2, context).map(|v| v as u16)
    }

    /// 读取 4 字节大端整数
    pub fn read_u32_be(&mut self, context: &'static str) -> NalResult<u32> {
        self.read_uint_be(4, context).map(|v| v as u32)
    }

    /// 读取 `width` 字节大端无符号整数 (`width` ≤ 8)
    pub fn read_uint_be(&mut self, width: usize, context: &'static str) -> NalResult<u64> {
        debug_assert!(width <= 8, "read_uint_be: width={} 超过 8 字节", width);
        self.ensure(width, context)?;
        let v = self.data[self.pos..self.pos + width]
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
        self.pos += width;
        Ok(v)
    }

    /// 读取 `n` 字节子切片 (零拷贝)
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> NalResult<Bytes> {
        self.ensure(n, context)?;
        let out = self.data.slice(self.pos..self.pos + n);
        self.pos += n;
        Ok(out)
    }

    /// 跳过 `n` 字节
    pub fn skip(&mut self, n: usize, context: &'static str) -> NalResult<()> {
        self.ensure(n, context)?;
        self.pos += n;
        Ok(())
    }

    /// 剩余未读数据 (零拷贝)
    pub fn rest(&self) -> Bytes {
        self.data.slice(self.pos..)
    }
}
