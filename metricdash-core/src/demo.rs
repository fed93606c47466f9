//! Demo Mode 占位数据：后端不可达时用随机值填充卡片与图表。

use crate::models::MetricsReading;
use rand::Rng;
use std::ops::Range;

/// CPU 随机范围 (%)
pub const DEMO_CPU_RANGE: Range<f64> = 0.0..100.0;
/// 内存随机范围（沿用 "MB" 量级的演示值）
pub const DEMO_MEMORY_RANGE: Range<f64> = 2000.0..5000.0;
/// 固定的演示总内存
pub const DEMO_TOTAL_MEMORY: f64 = 8192.0;

/// 生成一组演示值
pub fn synthetic_reading<R: Rng + ?Sized>(rng: &mut R) -> MetricsReading {
    MetricsReading {
        cpu: Some(rng.gen_range(DEMO_CPU_RANGE)),
        memory: Some(rng.gen_range(DEMO_MEMORY_RANGE)),
        total_memory: Some(DEMO_TOTAL_MEMORY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn values_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let reading = synthetic_reading(&mut rng);
            let cpu = reading.cpu.unwrap();
            let memory = reading.memory.unwrap();
            assert!(DEMO_CPU_RANGE.contains(&cpu), "cpu {cpu}");
            assert!(DEMO_MEMORY_RANGE.contains(&memory), "memory {memory}");
            assert_eq!(reading.total_memory, Some(DEMO_TOTAL_MEMORY));
        }
    }
}
