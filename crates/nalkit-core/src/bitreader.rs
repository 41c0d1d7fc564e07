//! 比特流读取器.
//!
//! 按大端位序 (MSB first) 从字节缓冲区读取位字段, 用于拆解配置记录中
//! 跨越字节边界的子字节字段.

use crate::{NalError, NalResult};

/// 比特流读取器
///
/// # 示例
/// ```
/// use nalkit_core::bitreader::BitReader;
///
/// let data = [0b10110001, 0b01010101];
/// let mut br = BitReader::new(&data);
/// assert_eq!(br.read_bits(4, "a").unwrap(), 0b1011);
/// assert_eq!(br.read_bits(4, "b").unwrap(), 0b0001);
/// assert_eq!(br.read_bits(8, "c").unwrap(), 0b01010101);
/// ```
pub struct BitReader<'a> {
    /// 源数据
    data: &'a [u8],
    /// 当前字节索引
    byte_pos: usize,
    /// 当前字节中的位位置 (0-7, 0 表示最高位)
    bit_pos: u8,
}

impl<'a> BitReader<'a> {
    /// 创建新的比特流读取器
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte_pos: 0,
            bit_pos: 0,
        }
    }

    /// 获取剩余可读位数
    pub fn bits_left(&self) -> usize {
        if self.byte_pos >= self.data.len() {
            return 0;
        }
        (self.data.len() - self.byte_pos) * 8 - self.bit_pos as usize
    }

    /// 是否已到达末尾
    pub fn is_eof(&self) -> bool {
        self.bits_left() == 0
    }

    /// 获取当前字节位置
    pub fn byte_position(&self) -> usize {
        self.byte_pos
    }

    /// 读取 N 个位 (最多 32 位)
    ///
    /// 剩余位数不足时返回 [`NalError::TruncatedInput`], 字节数向上取整.
    pub fn read_bits(&mut self, n: u32, context: &'static str) -> NalResult<u32> {
        debug_assert!(n <= 32, "read_bits: n={} 超过 32 位", n);
        if n == 0 {
            return Ok(0);
        }
        if (n as usize) > self.bits_left() {
            return Err(NalError::truncated(
                context,
                (n as usize).div_ceil(8),
                self.bits_left() / 8,
            ));
        }

        let mut result: u32 = 0;
        let mut remaining = n;

        while remaining > 0 {
            let available = 8 - self.bit_pos as u32;
            let to_read = remaining.min(available);

            // 从当前字节中提取位
            let shift = available - to_read;
            let mask = ((1u32 << to_read) - 1) as u8;
            let bits = (self.data[self.byte_pos] >> shift) & mask;

            result = (result << to_read) | u32::from(bits);

            self.bit_pos += to_read as u8;
            if self.bit_pos >= 8 {
                self.bit_pos = 0;
                self.byte_pos += 1;
            }
            remaining -= to_read;
        }

        Ok(result)
    }

    /// 读取 N 个位 (最多 64 位)
    pub fn read_bits_u64(&mut self, n: u32, context: &'static str) -> NalResult<u64> {
        if n <= 32 {
            return self.read_bits(n, context).map(u64::from);
        }
        debug_assert!(n <= 64, "read_bits_u64: n={} 超过 64 位", n);

        if (n as usize) > self.bits_left() {
            return Err(NalError::truncated(
                context,
                (n as usize).div_ceil(8),
                self.bits_left() / 8,
            ));
        }
        let high = u64::from(self.read_bits(n - 32, context)?);
        let low = u64::from(self.read_bits(32, context)?);
        Ok((high << 32) | low)
    }

    /// 读取不超过 8 位的字段并转换为 u8
    pub fn read_bits_u8(&mut self, n: u32, context: &'static str) -> NalResult<u8> {
        debug_assert!(n <= 8);
        self.read_bits(n, context).map(|v| v as u8)
    }
}
