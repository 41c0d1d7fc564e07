//! 比特流写入器.
//!
//! 按大端位序写入 (MSB first), 与 [`BitReader`](crate::BitReader) 对应,
//! 用于重新打包配置记录中的子字节字段.

/// 比特流写入器
///
/// # 示例
/// ```
/// use nalkit_core::bitwriter::BitWriter;
///
/// let mut bw = BitWriter::new();
/// bw.write_bits(0b1011, 4);
/// bw.write_bits(0b0001, 4);
/// bw.write_bits(0b01010101, 8);
/// let data = bw.finish();
/// assert_eq!(data, vec![0b10110001, 0b01010101]);
/// ```
pub struct BitWriter {
    /// 输出缓冲区
    data: Vec<u8>,
    /// 当前字节 (正在填充)
    current_byte: u8,
    /// 当前字节中已填充的位数 (0-7)
    bit_count: u8,
}

impl BitWriter {
    /// 创建新的比特流写入器
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// 以指定容量创建比特流写入器
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            current_byte: 0,
            bit_count: 0,
        }
    }

    /// 获取已写入的总位数
    pub fn bits_written(&self) -> usize {
        self.data.len() * 8 + self.bit_count as usize
    }

    /// 写入 N 个位 (最多 32 位)
    ///
    /// 值的低 N 位被写入, 高位在前; 超出 N 位的部分被截掉.
    pub fn write_bits(&mut self, value: u32, n: u32) {
        debug_assert!(n <= 32, "write_bits: n={} 超过 32 位", n);

        let mut remaining = n;
        while remaining > 0 {
            let available = 8 - self.bit_count as u32;
            let to_write = remaining.min(available);

            // 提取要写入的位
            let shift = remaining - to_write;
            let mask = if to_write >= 32 {
                u32::MAX
            } else {
                (1u32 << to_write) - 1
            };
            let bits = ((value >> shift) & mask) as u8;

            if to_write >= 8 {
                // 整字节写入 (bit_count 必定为 0)
                self.current_byte = bits;
            } else {
                self.current_byte = (self.current_byte << to_write) | bits;
            }
            self.bit_count += to_write as u8;

            if self.bit_count >= 8 {
                self.data.push(self.current_byte);
                self.current_byte = 0;
                self.bit_count = 0;
            }

            remaining -= to_write;
        }
    }

    /// 写入 N 个位 (最多 64 位)
    pub fn write_bits_u64(&mut self, value: u64, n: u32) {
        if n <= 32 {
            self.write_bits(value as u32, n);
        } else {
            self.write_bits((value >> 32) as u32, n - 32);
            self.write_bits(value as u32, 32);
        }
    }

    /// 写入完整字节
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        if self.bit_count == 0 {
            // 快速路径: 已对齐
            self.data.extend_from_slice(bytes);
        } else {
            for &b in bytes {
                self.write_bits(u32::from(b), 8);
            }
        }
    }

    /// 对齐到字节边界 (用 0 填充)
    pub fn align_to_byte(&mut self) {
        if self.bit_count > 0 {
            let pad = 8 - self.bit_count;
            self.current_byte <<= pad;
            self.data.push(self.current_byte);
            self.current_byte = 0;
            self.bit_count = 0;
        }
    }

    /// 完成写入, 返回字节数据
    ///
    /// 如果当前不在字节边界, 自动用 0 填充.
    pub fn finish(mut self) -> Vec<u8> {
        self.align_to_byte();
        self.data
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}
