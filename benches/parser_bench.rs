//! nalkit 解析性能基准测试.
//!
//! 覆盖序列头解析, 样本拆分与重编码, SEI 防竞争字节处理.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use nalkit::codec::parsers::avc::{AvcDecoderConfigurationRecord, AvcSample};
use nalkit::codec::parsers::hevc::HevcDecoderConfigurationRecord;
use nalkit::codec::parsers::sei::{escape, unescape};

fn make_avcc() -> Vec<u8> {
    vec![
        0x01, 0x64, 0x00, 0x1F, 0xFF, 0xE1, 0x00, 0x0A, 0x67, 0x64, 0x00, 0x1F, 0xAC, 0xD9, 0x40,
        0x50, 0x05, 0xBB, 0x01, 0x00, 0x04, 0x68, 0xEB, 0xE3, 0xCB,
    ]
}

fn make_hvcc() -> Vec<u8> {
    let mut data = vec![
        0x01, 0x01, 0x60, 0x00, 0x00, 0x00, 0x90, 0x00, 0x00, 0x00, 0x00, 0x00, 0x7B, 0xF0, 0x00,
        0xFC, 0xFD, 0xF8, 0xF8, 0x00, 0x00, 0x0F, 0x03,
    ];
    data.extend_from_slice(&[0xA0, 0x00, 0x01, 0x00, 0x04, 0x40, 0x01, 0x0C, 0x01]);
    data.extend_from_slice(&[0xA1, 0x00, 0x01, 0x00, 0x04, 0x42, 0x01, 0x01, 0x01]);
    data.extend_from_slice(&[0xA2, 0x00, 0x01, 0x00, 0x03, 0x44, 0x01, 0xC1]);
    data
}

/// 一个 IDR + 若干 P 切片组成的样本, 每个 NAL 约 `nal_size` 字节
fn make_avc_sample(nal_count: usize, nal_size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(nal_count * (nal_size + 4));
    for i in 0..nal_count {
        let header = if i == 0 { 0x65 } else { 0x41 };
        data.extend_from_slice(&(nal_size as u32).to_be_bytes());
        data.push(header);
        data.extend((1..nal_size).map(|j| (j % 251) as u8 | 0x04));
    }
    data
}

/// 含大量零字节的 RBSP, 触发防竞争字节插入
fn make_zero_heavy_rbsp(len: usize) -> Vec<u8> {
    (0..len).map(|i| if i % 4 == 3 { 0x01 } else { 0x00 }).collect()
}

fn bench_record_decode(c: &mut Criterion) {
    let avcc = make_avcc();
    c.bench_function("avcc_decode", |b| {
        b.iter(|| AvcDecoderConfigurationRecord::decode(black_box(&avcc)).unwrap());
    });

    let hvcc = make_hvcc();
    c.bench_function("hvcc_decode", |b| {
        b.iter(|| HevcDecoderConfigurationRecord::decode(black_box(&hvcc)).unwrap());
    });
}

fn bench_sample(c: &mut Criterion) {
    let data = make_avc_sample(16, 4096);
    c.bench_function("avc_sample_decode_16x4k", |b| {
        b.iter(|| AvcSample::decode(black_box(&data), 4).unwrap());
    });

    let sample = AvcSample::decode(&data, 4).unwrap();
    c.bench_function("avc_sample_encode_16x4k", |b| {
        b.iter(|| black_box(&sample).encode().unwrap());
    });
}

fn bench_emulation_prevention(c: &mut Criterion) {
    let rbsp = make_zero_heavy_rbsp(64 * 1024);
    c.bench_function("escape_64k", |b| {
        b.iter(|| escape(black_box(&rbsp)));
    });

    let escaped = escape(&rbsp);
    c.bench_function("unescape_64k", |b| {
        b.iter(|| unescape(black_box(&escaped)));
    });
}

criterion_group!(
    benches,
    bench_record_decode,
    bench_sample,
    bench_emulation_prevention
);
criterion_main!(benches);
