//! 视频编码标识符.
//!
//! 由上层解复用器 (FLV / MP4) 提供, 决定序列头与样本按哪种格式解析.

use std::fmt;

/// 视频编码标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoCodecId {
    /// H.264 / AVC / MPEG-4 Part 10
    Avc,
    /// H.265 / HEVC / MPEG-H Part 2
    Hevc,
}

impl VideoCodecId {
    /// FLV VideoTagHeader 中的 CodecID 字段 (H.264 = 7, H.265 = 12)
    pub const fn from_flv_codec_id(id: u8) -> Option<Self> {
        match id {
            7 => Some(Self::Avc),
            12 => Some(Self::Hevc),
            _ => None,
        }
    }

    /// 对应的 FLV CodecID
    pub const fn flv_codec_id(&self) -> u8 {
        match self {
            Self::Avc => 7,
            Self::Hevc => 12,
        }
    }

    /// MP4 样本描述中的配置 box 类型
    pub const fn config_box(&self) -> &'static str {
        match self {
            Self::Avc => "avcC",
            Self::Hevc => "hvcC",
        }
    }

    /// 获取人类可读名称
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Avc => "h264",
            Self::Hevc => "hevc",
        }
    }
}

impl fmt::Display for VideoCodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
