//! SEI 消息编解码.
//!
//! 仅支持单字节类型/长度形式:
//! ```text
//! payloadType(8) payloadSize(8) payload(payloadSize 字节)
//! ```
//! 值 ≥ 255 的扩展形式 (`0xFF` 前缀累加) 不做解释, 首字节直接作为类型/长度.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};
use log::debug;
use nalkit_core::{ByteReader, NalError, NalResult};

use super::escape::{escape, unescape};

/// SEI 载荷类型 (H.264 附录 D / G)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeiPayloadType {
    /// 0: 缓冲周期
    BufferingPeriod,
    /// 1: 图像定时
    PicTiming,
    /// 2: 全景扫描矩形
    PanScanRect,
    /// 3: 填充载荷
    Filler,
    /// 4: 已注册用户数据 (ITU-T T.35)
    UserDataRegistered,
    /// 5: 未注册用户数据 (UUID + 自定义字节)
    UserDataUnregistered,
    /// 6: 恢复点
    RecoveryPoint,
    /// 7: 参考图像标记重复
    DecRefPicMarkingRepetition,
    /// 8: 备用图像
    SparePic,
    /// 9: 场景信息
    SceneInfo,
    /// 10: 子序列信息
    SubSeqInfo,
    /// 11: 子序列层特性
    SubSeqLayerCharacteristics,
    /// 12: 子序列特性
    SubSeqCharacteristics,
    /// 13: 全帧冻结
    FullFrameFreeze,
    /// 14: 全帧冻结解除
    FullFrameFreezeRelease,
    /// 15: 全帧快照
    FullFrameSnapshot,
    /// 16: 渐进细化段开始
    ProgressiveRefinementSegmentStart,
    /// 17: 渐进细化段结束
    ProgressiveRefinementSegmentEnd,
    /// 18: 运动受限切片组集合
    MotionConstrainedSliceGroupSet,
    /// 19: 胶片颗粒特性
    FilmGrainCharacteristics,
    /// 20: 去块滤波显示偏好
    DeblockingFilterDisplayPreference,
    /// 21: 立体视频信息
    StereoVideoInfo,
    /// 22: 后置滤波提示
    PostFilterHint,
    /// 23: 色调映射信息
    ToneMappingInfo,
    /// 24: 可伸缩性信息 (SVC)
    ScalabilityInfo,
    /// 25: 子图像可伸缩层 (SVC)
    SubPicScalableLayer,
    /// 26: 非必需层表示 (SVC)
    NonRequiredLayerRep,
    /// 27: 优先级层信息 (SVC)
    PriorityLayerInfo,
    /// 28: 缺失层 (SVC)
    LayersNotPresent,
    /// 29: 层依赖变更 (SVC)
    LayerDependencyChange,
    /// 30: 可伸缩嵌套 (SVC)
    ScalableNesting,
    /// 31: 基础层时域 HRD (SVC)
    BaseLayerTemporalHrd,
    /// 32: 质量层完整性校验 (SVC)
    QualityLayerIntegrityCheck,
    /// 33: 冗余图像属性 (SVC)
    RedundantPicProperty,
    /// 34: 时域层切换点 (SVC)
    TemporalLayerSwitchingPoint,
    /// 35 及以上
    Other(u8),
}

impl SeiPayloadType {
    /// 从类型编号创建
    pub fn from_type_id(id: u8) -> Self {
        match id {
            0 => Self::BufferingPeriod,
            1 => Self::PicTiming,
            2 => Self::PanScanRect,
            3 => Self::Filler,
            4 => Self::UserDataRegistered,
            5 => Self::UserDataUnregistered,
            6 => Self::RecoveryPoint,
            7 => Self::DecRefPicMarkingRepetition,
            8 => Self::SparePic,
            9 => Self::SceneInfo,
            10 => Self::SubSeqInfo,
            11 => Self::SubSeqLayerCharacteristics,
            12 => Self::SubSeqCharacteristics,
            13 => Self::FullFrameFreeze,
            14 => Self::FullFrameFreezeRelease,
            15 => Self::FullFrameSnapshot,
            16 => Self::ProgressiveRefinementSegmentStart,
            17 => Self::ProgressiveRefinementSegmentEnd,
            18 => Self::MotionConstrainedSliceGroupSet,
            19 => Self::FilmGrainCharacteristics,
            20 => Self::DeblockingFilterDisplayPreference,
            21 => Self::StereoVideoInfo,
            22 => Self::PostFilterHint,
            23 => Self::ToneMappingInfo,
            24 => Self::ScalabilityInfo,
            25 => Self::SubPicScalableLayer,
            26 => Self::NonRequiredLayerRep,
            27 => Self::PriorityLayerInfo,
            28 => Self::LayersNotPresent,
            29 => Self::LayerDependencyChange,
            30 => Self::ScalableNesting,
            31 => Self::BaseLayerTemporalHrd,
            32 => Self::QualityLayerIntegrityCheck,
            33 => Self::RedundantPicProperty,
            34 => Self::TemporalLayerSwitchingPoint,
            id => Self::Other(id),
        }
    }

    /// 获取类型编号
    pub fn type_id(&self) -> u8 {
        match self {
            Self::BufferingPeriod => 0,
            Self::PicTiming => 1,
            Self::PanScanRect => 2,
            Self::Filler => 3,
            Self::UserDataRegistered => 4,
            Self::UserDataUnregistered => 5,
            Self::RecoveryPoint => 6,
            Self::DecRefPicMarkingRepetition => 7,
            Self::SparePic => 8,
            Self::SceneInfo => 9,
            Self::SubSeqInfo => 10,
            Self::SubSeqLayerCharacteristics => 11,
            Self::SubSeqCharacteristics => 12,
            Self::FullFrameFreeze => 13,
            Self::FullFrameFreezeRelease => 14,
            Self::FullFrameSnapshot => 15,
            Self::ProgressiveRefinementSegmentStart => 16,
            Self::ProgressiveRefinementSegmentEnd => 17,
            Self::MotionConstrainedSliceGroupSet => 18,
            Self::FilmGrainCharacteristics => 19,
            Self::DeblockingFilterDisplayPreference => 20,
            Self::StereoVideoInfo => 21,
            Self::PostFilterHint => 22,
            Self::ToneMappingInfo => 23,
            Self::ScalabilityInfo => 24,
            Self::SubPicScalableLayer => 25,
            Self::NonRequiredLayerRep => 26,
            Self::PriorityLayerInfo => 27,
            Self::LayersNotPresent => 28,
            Self::LayerDependencyChange => 29,
            Self::ScalableNesting => 30,
            Self::BaseLayerTemporalHrd => 31,
            Self::QualityLayerIntegrityCheck => 32,
            Self::RedundantPicProperty => 33,
            Self::TemporalLayerSwitchingPoint => 34,
            Self::Other(id) => *id,
        }
    }

    /// 显示名称, [`SeiPayloadType::Other`] 返回 `"Unknown"`
    pub fn name(&self) -> &'static str {
        match self {
            Self::BufferingPeriod => "BufferingPeriod",
            Self::PicTiming => "PicTiming",
            Self::PanScanRect => "PanScanRect",
            Self::Filler => "Filler",
            Self::UserDataRegistered => "UserDataRegistered",
            Self::UserDataUnregistered => "UserDataUnregistered",
            Self::RecoveryPoint => "RecoveryPoint",
            Self::DecRefPicMarkingRepetition => "DecRefPicMarkingRepetition",
            Self::SparePic => "SparePic",
            Self::SceneInfo => "SceneInfo",
            Self::SubSeqInfo => "SubSeqInfo",
            Self::SubSeqLayerCharacteristics => "SubSeqLayerCharacteristics",
            Self::SubSeqCharacteristics => "SubSeqCharacteristics",
            Self::FullFrameFreeze => "FullFrameFreeze",
            Self::FullFrameFreezeRelease => "FullFrameFreezeRelease",
            Self::FullFrameSnapshot => "FullFrameSnapshot",
            Self::ProgressiveRefinementSegmentStart => "ProgressiveRefinementSegmentStart",
            Self::ProgressiveRefinementSegmentEnd => "ProgressiveRefinementSegmentEnd",
            Self::MotionConstrainedSliceGroupSet => "MotionConstrainedSliceGroupSet",
            Self::FilmGrainCharacteristics => "FilmGrainCharacteristics",
            Self::DeblockingFilterDisplayPreference => "DeblockingFilterDisplayPreference",
            Self::StereoVideoInfo => "StereoVideoInfo",
            Self::PostFilterHint => "PostFilterHint",
            Self::ToneMappingInfo => "ToneMappingInfo",
            Self::ScalabilityInfo => "ScalabilityInfo",
            Self::SubPicScalableLayer => "SubPicScalableLayer",
            Self::NonRequiredLayerRep => "NonRequiredLayerRep",
            Self::PriorityLayerInfo => "PriorityLayerInfo",
            Self::LayersNotPresent => "LayersNotPresent",
            Self::LayerDependencyChange => "LayerDependencyChange",
            Self::ScalableNesting => "ScalableNesting",
            Self::BaseLayerTemporalHrd => "BaseLayerTemporalHrd",
            Self::QualityLayerIntegrityCheck => "QualityLayerIntegrityCheck",
            Self::RedundantPicProperty => "RedundantPicProperty",
            Self::TemporalLayerSwitchingPoint => "TemporalLayerSwitchingPoint",
            Self::Other(_) => "Unknown",
        }
    }
}

impl fmt::Display for SeiPayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(id) => write!(f, "SEI/{id}"),
            known => f.write_str(known.name()),
        }
    }
}

/// SEI 消息头 (单字节形式)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeiHeader {
    /// payloadType
    pub payload_type: u8,
    /// payloadSize (字节)
    pub payload_size: u8,
}

impl SeiHeader {
    /// 头部长度 (字节)
    pub const SIZE: usize = 2;

    /// 从前 2 字节解析, 不足 2 字节返回 [`NalError::InvalidSize`]
    pub fn decode(data: &[u8]) -> NalResult<Self> {
        let [payload_type, payload_size, ..] = *data else {
            return Err(NalError::InvalidSize(format!(
                "SEI 头部需要 {} 字节, 仅有 {} 字节",
                Self::SIZE,
                data.len()
            )));
        };
        Ok(Self {
            payload_type,
            payload_size,
        })
    }

    /// 打包为 2 字节
    pub fn encode(&self) -> [u8; Self::SIZE] {
        [self.payload_type, self.payload_size]
    }

    /// 载荷类型
    pub fn kind(&self) -> SeiPayloadType {
        SeiPayloadType::from_type_id(self.payload_type)
    }
}

impl fmt::Display for SeiHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sei type={}({}), size={}",
            self.kind(),
            self.payload_type,
            self.payload_size
        )
    }
}

/// SEI 消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sei {
    /// 消息头
    pub header: SeiHeader,
    /// 已移除防竞争字节的载荷, 长度等于 `header.payload_size`
    pub payload: Bytes,
}

impl Sei {
    /// 由类型和载荷创建, 载荷超过 255 字节返回 [`NalError::InvalidSize`]
    pub fn new(payload_type: SeiPayloadType, payload: impl Into<Bytes>) -> NalResult<Self> {
        let payload = payload.into();
        let payload_size = u8::try_from(payload.len()).map_err(|_| {
            NalError::InvalidSize(format!(
                "SEI 载荷 {} 字节超过单字节长度上限 255",
                payload.len()
            ))
        })?;
        Ok(Self {
            header: SeiHeader {
                payload_type: payload_type.type_id(),
                payload_size,
            },
            payload,
        })
    }

    /// 只解析消息头 (不处理防竞争字节)
    pub fn decode_header(data: &[u8]) -> NalResult<SeiHeader> {
        SeiHeader::decode(data)
    }

    /// 解析一条 SEI 消息 (不含 NAL 头)
    ///
    /// 整个输入先移除防竞争字节, 再从 RBSP 中取出头部和恰好
    /// `payload_size` 字节的载荷; 之后的字节 (如 rbsp_trailing_bits) 被丢弃.
    pub fn decode(data: &[u8]) -> NalResult<Self> {
        if data.len() < SeiHeader::SIZE {
            return Err(NalError::InvalidSize(format!(
                "SEI 消息至少 {} 字节, 仅有 {} 字节",
                SeiHeader::SIZE,
                data.len()
            )));
        }

        let rbsp = Bytes::from(unescape(data));
        let header = SeiHeader::decode(&rbsp)?;
        let available = rbsp.len() - SeiHeader::SIZE;
        let size = usize::from(header.payload_size);
        if available < size {
            return Err(NalError::InvalidSize(format!(
                "SEI 声明载荷 {size} 字节, 仅剩 {available} 字节"
            )));
        }

        let payload = rbsp.slice(SeiHeader::SIZE..SeiHeader::SIZE + size);
        if available > size {
            debug!("SEI: {header}, 丢弃尾部 {} 字节", available - size);
        }
        Ok(Self { header, payload })
    }

    /// 编码 (插入防竞争字节)
    pub fn encode(&self) -> NalResult<Vec<u8>> {
        let size = u8::try_from(self.payload.len()).map_err(|_| {
            NalError::InvalidSize(format!(
                "SEI 载荷 {} 字节超过单字节长度上限 255",
                self.payload.len()
            ))
        })?;
        let mut rbsp = BytesMut::with_capacity(SeiHeader::SIZE + self.payload.len());
        let header = SeiHeader {
            payload_type: self.header.payload_type,
            payload_size: size,
        };
        rbsp.put_slice(&header.encode());
        rbsp.put_slice(&self.payload);
        Ok(escape(&rbsp))
    }

    /// 载荷类型
    pub fn payload_type(&self) -> SeiPayloadType {
        self.header.kind()
    }

    /// 将载荷解析为 user_data_unregistered 视图
    pub fn decode_unregistered_user_data(&self) -> NalResult<SeiUserData> {
        let expected = SeiPayloadType::UserDataUnregistered.type_id();
        if self.header.payload_type != expected {
            return Err(NalError::WrongType {
                expected,
                found: self.header.payload_type,
            });
        }
        SeiUserData::decode(self.payload.clone())
    }
}

impl fmt::Display for Sei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.header, f)
    }
}

/// user_data_unregistered 载荷 (推流端私有格式)
///
/// ```text
/// uuid(16) slice_id(32) tags_num(16) source_id(32) unix_timestamp(32)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeiUserData {
    /// uuid_iso_iec_11578
    pub uuid: [u8; 16],
    /// 切片 ID
    pub slice_id: u32,
    /// 标签数
    pub tags_num: u16,
    /// 来源 ID
    pub source_id: u32,
    /// Unix 时间戳 (秒)
    pub unix_timestamp: u32,
}

impl SeiUserData {
    /// 载荷长度 (字节)
    pub const SIZE: usize = 30;

    fn decode(payload: Bytes) -> NalResult<Self> {
        let mut r = ByteReader::new(payload);
        r.ensure(Self::SIZE, "SEI user_data_unregistered")?;

        let mut uuid = [0u8; 16];
        uuid.copy_from_slice(&r.read_bytes(16, "uuid")?);
        Ok(Self {
            uuid,
            slice_id: r.read_u32_be("slice_id")?,
            tags_num: r.read_u16_be("tags_num")?,
            source_id: r.read_u32_be("source_id")?,
            unix_timestamp: r.read_u32_be("unix_timestamp")?,
        })
    }

    /// 打包为 30 字节载荷
    pub fn encode(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        let mut buf = &mut out[..];
        buf.put_slice(&self.uuid);
        buf.put_u32(self.slice_id);
        buf.put_u16(self.tags_num);
        buf.put_u32(self.source_id);
        buf.put_u32(self.unix_timestamp);
        out
    }

    /// 构造类型 5 的 SEI 消息
    pub fn to_sei(&self) -> Sei {
        Sei {
            header: SeiHeader {
                payload_type: SeiPayloadType::UserDataUnregistered.type_id(),
                payload_size: Self::SIZE as u8,
            },
            payload: Bytes::copy_from_slice(&self.encode()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_data_payload() -> Vec<u8> {
        let mut p: Vec<u8> = (0x10..0x20).collect();
        p.extend_from_slice(&[0x00, 0x00, 0x01, 0x02]); // slice_id
        p.extend_from_slice(&[0x00, 0x03]); // tags_num
        p.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]); // source_id
        p.extend_from_slice(&[0x65, 0x4F, 0xA1, 0x00]); // unix_timestamp
        p
    }

    #[test]
    fn test_payload_type_name() {
        assert_eq!(SeiPayloadType::from_type_id(0).name(), "BufferingPeriod");
        assert_eq!(SeiPayloadType::from_type_id(5).name(), "UserDataUnregistered");
        assert_eq!(
            SeiPayloadType::from_type_id(34).name(),
            "TemporalLayerSwitchingPoint"
        );
        assert_eq!(SeiPayloadType::from_type_id(35), SeiPayloadType::Other(35));
        assert_eq!(SeiPayloadType::from_type_id(200).to_string(), "SEI/200");
    }

    #[test]
    fn test_payload_type_type_id() {
        for id in 0..=u8::MAX {
            assert_eq!(SeiPayloadType::from_type_id(id).type_id(), id);
        }
    }

    #[test]
    fn test_payload_type_explicit_ids() {
        assert_eq!(SeiPayloadType::BufferingPeriod.type_id(), 0);
        assert_eq!(SeiPayloadType::UserDataUnregistered.type_id(), 5);
        assert_eq!(SeiPayloadType::ScalableNesting.type_id(), 30);
        assert_eq!(SeiPayloadType::TemporalLayerSwitchingPoint.type_id(), 34);
        assert_eq!(SeiPayloadType::from_type_id(35), SeiPayloadType::Other(35));
        assert_eq!(SeiPayloadType::Other(255).type_id(), 255);
    }

    #[test]
    fn test_decode_header() {
        let header = Sei::decode_header(&[0x05, 0x10, 0xFF]).unwrap();
        assert_eq!(header.payload_type, 5);
        assert_eq!(header.payload_size, 16);
        assert_eq!(header.kind(), SeiPayloadType::UserDataUnregistered);
        assert_eq!(header.to_string(), "sei type=UserDataUnregistered(5), size=16");
    }

    #[test]
    fn test_decode_header_too_short() {
        assert!(matches!(
            Sei::decode_header(&[0x05]),
            Err(NalError::InvalidSize(_))
        ));
    }

    #[test]
    fn test_decode_escaped_message() {
        let sei = Sei::decode(&[0x05, 0x02, 0xAA, 0x00, 0x00, 0x03]).unwrap();
        assert_eq!(sei.header.payload_type, 5);
        assert_eq!(sei.header.payload_size, 2);
        assert_eq!(&sei.payload[..], &[0xAA, 0x00]);
    }

    #[test]
    fn test_decode_drops_trailing_bits() {
        let sei = Sei::decode(&[0x06, 0x01, 0x84, 0x80]).unwrap();
        assert_eq!(sei.payload_type(), SeiPayloadType::RecoveryPoint);
        assert_eq!(&sei.payload[..], &[0x84]);
    }

    /// 收集 "SEI:" 开头的日志
    struct SeiLogCapture;

    static SEI_LOGS: std::sync::Mutex<Vec<String>> = std::sync::Mutex::new(Vec::new());
    static SEI_LOGGER: SeiLogCapture = SeiLogCapture;

    impl log::Log for SeiLogCapture {
        fn enabled(&self, _: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            let msg = record.args().to_string();
            if msg.starts_with("SEI:") {
                SEI_LOGS.lock().unwrap().push(msg);
            }
        }

        fn flush(&self) {}
    }

    #[test]
    fn test_decode_logs_only_when_bytes_dropped() {
        let _ = log::set_logger(&SEI_LOGGER);
        log::set_max_level(log::LevelFilter::Trace);
        // 类型 200 仅在本测试中使用, 避免与并行测试的日志混淆
        let count = || {
            SEI_LOGS
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.contains("(200)"))
                .count()
        };

        let sei = Sei::decode(&[200, 0x01, 0xAA]).unwrap();
        assert_eq!(&sei.payload[..], &[0xAA]);
        assert_eq!(count(), 0, "没有丢弃字节时不应输出日志");

        Sei::decode(&[200, 0x01, 0xAA, 0x80]).unwrap();
        assert_eq!(count(), 1, "丢弃尾部字节时应输出一条日志");
    }

    #[test]
    fn test_decode_declared_size_too_large() {
        assert!(matches!(
            Sei::decode(&[0x05, 0x04, 0xAA, 0xBB]),
            Err(NalError::InvalidSize(_))
        ));
        // 移除防竞争字节后长度不足
        assert!(matches!(
            Sei::decode(&[0x05, 0x03, 0x00, 0x00, 0x03]),
            Err(NalError::InvalidSize(_))
        ));
    }

    #[test]
    fn test_decode_too_short() {
        for data in [&[][..], &[0x05][..]] {
            assert!(matches!(Sei::decode(data), Err(NalError::InvalidSize(_))));
        }
    }

    #[test]
    fn test_decode_zero_size() {
        let sei = Sei::decode(&[0x03, 0x00]).unwrap();
        assert_eq!(sei.payload_type(), SeiPayloadType::Filler);
        assert!(sei.payload.is_empty());
    }

    #[test]
    fn test_encode_escapes_payload() {
        let sei = Sei::new(SeiPayloadType::UserDataRegistered, vec![0x00, 0x00, 0x01]).unwrap();
        let encoded = sei.encode().unwrap();
        assert_eq!(encoded, vec![0x04, 0x03, 0x00, 0x00, 0x03, 0x01]);
        assert_eq!(Sei::decode(&encoded).unwrap(), sei);
    }

    #[test]
    fn test_new_payload_too_large() {
        assert!(matches!(
            Sei::new(SeiPayloadType::Filler, vec![0xFF; 256]),
            Err(NalError::InvalidSize(_))
        ));
        assert!(Sei::new(SeiPayloadType::Filler, vec![0xFF; 255]).is_ok());
    }

    #[test]
    fn test_unregistered_user_data() {
        let mut data = vec![0x05, 30];
        data.extend_from_slice(&user_data_payload());
        let sei = Sei::decode(&data).unwrap();
        let ud = sei.decode_unregistered_user_data().unwrap();

        let uuid: Vec<u8> = (0x10..0x20).collect();
        assert_eq!(&ud.uuid[..], &uuid[..]);
        assert_eq!(ud.slice_id, 0x0102);
        assert_eq!(ud.tags_num, 3);
        assert_eq!(ud.source_id, 0xDEAD_BEEF);
        assert_eq!(ud.unix_timestamp, 0x654F_A100);
        assert_eq!(ud.encode().to_vec(), user_data_payload());
    }

    #[test]
    fn test_unregistered_user_data_escaped_input() {
        // slice_id = 0x00000001 在码流中被转义为 00 00 03 00 01
        let mut payload = user_data_payload();
        payload[16..20].copy_from_slice(&[0x00, 0x00, 0x00, 0x01]);
        let sei = SeiUserData {
            slice_id: 1,
            ..SeiUserData::decode(Bytes::from(payload)).unwrap()
        }
        .to_sei();

        let encoded = sei.encode().unwrap();
        assert!(encoded.len() > SeiHeader::SIZE + SeiUserData::SIZE);
        let decoded = Sei::decode(&encoded).unwrap();
        assert_eq!(decoded.decode_unregistered_user_data().unwrap().slice_id, 1);
    }

    #[test]
    fn test_unregistered_user_data_wrong_type() {
        let sei = Sei::new(SeiPayloadType::PicTiming, user_data_payload()).unwrap();
        assert_eq!(
            sei.decode_unregistered_user_data().unwrap_err(),
            NalError::WrongType {
                expected: 5,
                found: 1
            }
        );
    }

    #[test]
    fn test_unregistered_user_data_short_payload() {
        let sei = Sei::new(SeiPayloadType::UserDataUnregistered, vec![0u8; 29]).unwrap();
        assert_eq!(
            sei.decode_unregistered_user_data().unwrap_err(),
            NalError::truncated("SEI user_data_unregistered", 30, 29)
        );
    }

    #[test]
    fn test_user_data_to_sei_roundtrip() {
        let ud = SeiUserData {
            uuid: [0xAB; 16],
            slice_id: 7,
            tags_num: 2,
            source_id: 42,
            unix_timestamp: 1_700_000_000,
        };
        let sei = ud.to_sei();
        assert_eq!(sei.payload_type(), SeiPayloadType::UserDataUnregistered);
        assert_eq!(sei.header.payload_size, 30);
        let decoded = Sei::decode(&sei.encode().unwrap()).unwrap();
        assert_eq!(decoded.decode_unregistered_user_data().unwrap(), ud);
    }
}
