//! 统一错误类型定义.
//!
//! 所有 nalkit crate 共用的错误类型. 解析失败时只报告遇到的第一个错误,
//! 不返回部分解析结果, 也不做任何重同步.

use thiserror::Error;

/// nalkit 统一错误类型
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NalError {
    /// 可用字节数少于固定字段或声明长度所需
    #[error("数据截断: {context} 需要 {needed} 字节, 仅剩 {available} 字节")]
    TruncatedInput {
        /// 正在读取的字段
        context: &'static str,
        /// 所需字节数
        needed: usize,
        /// 实际剩余字节数
        available: usize,
    },

    /// HEVC 配置记录中的数组类型不是 VPS/SPS/PPS
    #[error("不支持的 NAL 数组类型: {0}")]
    UnsupportedArrayType(u8),

    /// SEI 类型与期望不符
    #[error("SEI 类型不匹配: 期望 {expected}, 实际 {found}")]
    WrongType {
        /// 期望的类型
        expected: u8,
        /// 实际的类型
        found: u8,
    },

    /// 头部字段本身非法, 或数值超出字段宽度
    #[error("无效大小: {0}")]
    InvalidSize(String),

    /// NAL 长度前缀宽度不在 1-4 字节范围内
    #[error("无效的 NAL 长度前缀宽度: {0} 字节, 合法范围 1-4")]
    InvalidLengthSize(usize),

    /// 在收到解码器配置记录之前收到了样本
    #[error("尚未收到序列头 (解码器配置记录)")]
    MissingSequenceHeader,
}

impl NalError {
    /// 构造截断错误
    pub fn truncated(context: &'static str, needed: usize, available: usize) -> Self {
        Self::TruncatedInput {
            context,
            needed,
            available,
        }
    }

    /// 是否为截断错误
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::TruncatedInput { .. })
    }
}

/// nalkit 统一 Result 类型
pub type NalResult<T> = Result<T, NalError>;
