//! 防竞争字节 (emulation prevention, `00 00 03`) 处理.

/// 防竞争字节
const EMULATION_PREVENTION_BYTE: u8 = 0x03;

/// 移除防竞争字节, 得到 RBSP
///
/// 每个 `00 00 03` 序列中的 `03` 被丢弃 (包括位于末尾的), 单遍扫描;
/// 丢弃后零计数清零, 所以 `00 00 03 03` 只移除第一个 `03`.
pub fn unescape(data: &[u8]) -> Vec<u8> {
    let mut rbsp = Vec::with_capacity(data.len());
    let mut zeros = 0usize;

    for &byte in data {
        if zeros >= 2 && byte == EMULATION_PREVENTION_BYTE {
            zeros = 0;
            continue;
        }
        zeros = if byte == 0x00 { zeros + 1 } else { 0 };
        rbsp.push(byte);
    }

    rbsp
}

/// 插入防竞争字节, [`unescape`] 的逆操作
///
/// 连续两个 `00` 之后若紧跟 `00`..=`03`, 先插入 `03`.
pub fn escape(rbsp: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(rbsp.len() + rbsp.len() / 2);
    let mut zeros = 0usize;

    for &byte in rbsp {
        if zeros >= 2 && byte <= EMULATION_PREVENTION_BYTE {
            out.push(EMULATION_PREVENTION_BYTE);
            zeros = 0;
        }
        zeros = if byte == 0x00 { zeros + 1 } else { 0 };
        out.push(byte);
    }

    out
}
