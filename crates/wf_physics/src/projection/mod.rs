// crates/wf_physics/src/projection/mod.rs

//! 单元场的零均值投影
//!
//! 不可压缩流的压力场带有可加常数不定性，每个压力修正步需将
//! 体积加权均值从场中扣除。朴素的顺序求和在大规模网格上舍入
//! 误差随 n 线性增长，本模块采用分块级联求和
//! （"l3superblock60"，Castaldo-Whaley-Chronopoulos, SIAM J. Sci.
//! Comput. 31(2), 2008）：
//!
//! 1. 单元按索引划分为 32 元块，块按 floor(sqrt(块数)) 分为超块
//! 2. 块内求和 → 超块内累加 → 全局累加（逐级部分和量级均衡，
//!    误差增长近 O(log n)）
//! 3. 尾部不足一块的单元直接累入全局累加器
//! 4. 全局均值 = 累加和 / 总体积，随后逐单元改写
//!    v[i] ← v[i]/vol[i] - 均值（输入为体积积分量，输出为零均值的
//!    单元平均值）
//!
//! # 并行与确定性
//!
//! 超块求和经 rayon 并行，结果按超块索引收集后串行合并，
//! 归约与逐元素改写之间只有一个同步点。分块划分只依赖单元
//! 索引，不依赖线程调度，因此任意线程数下结果与串行路径
//! 逐位一致（可复现性是正确性要求，不是风格偏好）。

use glam::DVec3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 级联求和的块大小（单元数）
pub const BLOCK_SIZE: usize = 32;

// ============================================================
// 错误
// ============================================================

/// 投影错误
///
/// 维度错误表明上游装配代码存在缺陷，属不可恢复的配置错误。
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// 不支持的场维度
    #[error("不支持的场维度: {dim}（仅支持标量 1 或矢量 3）")]
    UnsupportedDimension {
        /// 传入的维度
        dim: usize,
    },
}

// ============================================================
// 配置
// ============================================================

/// 投影计算配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// 是否启用并行计算
    pub parallel: bool,
    /// 并行阈值（单元数超过此值时使用并行）
    pub parallel_threshold: usize,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 1000,
        }
    }
}

impl ProjectionConfig {
    /// 创建串行配置
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Default::default()
        }
    }
}

// ============================================================
// 分块划分
// ============================================================

/// 级联求和的确定性分块划分（只依赖单元索引）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BlockPartition {
    /// 超块数 floor(sqrt(块数))
    n_sblks: usize,
    /// 每超块的块数
    blks_per_sblk: usize,
    /// 尾部单元的起始索引
    remainder_start: usize,
}

impl BlockPartition {
    fn new(n_cells: usize) -> Self {
        let n_blks = n_cells / BLOCK_SIZE;
        let n_sblks = (n_blks as f64).sqrt() as usize;
        let blks_per_sblk = if n_sblks > 0 { n_blks / n_sblks } else { 0 };
        Self {
            n_sblks,
            blks_per_sblk,
            remainder_start: BLOCK_SIZE * n_sblks * blks_per_sblk,
        }
    }
}

// ============================================================
// 投影器
// ============================================================

/// 零均值投影器
///
/// 每个压力修正步对整个单元场调用一次 [`project`](Self::project)。
#[derive(Debug, Clone, Default)]
pub struct ZeroMeanProjector {
    config: ProjectionConfig,
}

impl ZeroMeanProjector {
    /// 创建投影器（默认配置）
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用指定配置创建
    pub fn with_config(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// 获取配置
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// 原位投影：使场的体积加权均值为零
    ///
    /// # 参数
    /// - `values`: 单元场（体积积分量），维度 3 时按单元交错存储，
    ///   改写后为扣除全局均值的单元平均值
    /// - `dim`: 场维度，必须为 1 或 3
    /// - `cell_volumes`: 逐单元体积 [m³]
    /// - `total_volume`: 计算域总体积 [m³]
    ///
    /// # 错误
    /// 维度非 1/3 返回 [`ProjectionError::UnsupportedDimension`]。
    pub fn project(
        &self,
        values: &mut [f64],
        dim: usize,
        cell_volumes: &[f64],
        total_volume: f64,
    ) -> Result<(), ProjectionError> {
        let n_cells = cell_volumes.len();
        assert_eq!(values.len(), dim * n_cells, "场长度应等于 dim × 单元数");

        let use_parallel = self.config.parallel && n_cells >= self.config.parallel_threshold;

        match dim {
            1 => self.project_dim1(values, cell_volumes, total_volume, use_parallel),
            3 => self.project_dim3(values, cell_volumes, total_volume, use_parallel),
            _ => return Err(ProjectionError::UnsupportedDimension { dim }),
        }
        Ok(())
    }

    /// 标量场投影的便捷入口
    pub fn project_scalar(
        &self,
        values: &mut [f64],
        cell_volumes: &[f64],
        total_volume: f64,
    ) -> Result<(), ProjectionError> {
        self.project(values, 1, cell_volumes, total_volume)
    }

    /// 三分量矢量场投影的便捷入口
    pub fn project_vector3(
        &self,
        values: &mut [f64],
        cell_volumes: &[f64],
        total_volume: f64,
    ) -> Result<(), ProjectionError> {
        self.project(values, 3, cell_volumes, total_volume)
    }

    // ========================================================
    // 标量场
    // ========================================================

    fn project_dim1(
        &self,
        values: &mut [f64],
        cell_volumes: &[f64],
        total_volume: f64,
        use_parallel: bool,
    ) {
        let n_cells = cell_volumes.len();
        let part = BlockPartition::new(n_cells);

        // 归约：超块部分和按索引序收集后串行合并，保证与串行路径
        // 逐位一致
        let mut integral = if use_parallel {
            let sblk_sums: Vec<f64> = (0..part.n_sblks)
                .into_par_iter()
                .map(|sid| superblock_sum_scalar(values, sid, part.blks_per_sblk))
                .collect();
            sblk_sums.iter().sum()
        } else {
            let mut sum = 0.0;
            for sid in 0..part.n_sblks {
                sum += superblock_sum_scalar(values, sid, part.blks_per_sblk);
            }
            sum
        };

        // 尾部单元
        for &v in &values[part.remainder_start..] {
            integral += v;
        }

        // 同步点：归约完成后做逐单元改写
        let g_avg = integral / total_volume;

        if use_parallel {
            values
                .par_iter_mut()
                .zip(cell_volumes.par_iter())
                .for_each(|(v, &vol)| {
                    *v = *v / vol - g_avg;
                });
        } else {
            for (v, &vol) in values.iter_mut().zip(cell_volumes.iter()) {
                *v = *v / vol - g_avg;
            }
        }
    }

    // ========================================================
    // 矢量场（交错存储）
    // ========================================================

    fn project_dim3(
        &self,
        values: &mut [f64],
        cell_volumes: &[f64],
        total_volume: f64,
        use_parallel: bool,
    ) {
        let n_cells = cell_volumes.len();
        let part = BlockPartition::new(n_cells);

        let mut integral = if use_parallel {
            let sblk_sums: Vec<DVec3> = (0..part.n_sblks)
                .into_par_iter()
                .map(|sid| superblock_sum_vec3(values, sid, part.blks_per_sblk))
                .collect();
            sblk_sums.iter().fold(DVec3::ZERO, |acc, &s| acc + s)
        } else {
            let mut sum = DVec3::ZERO;
            for sid in 0..part.n_sblks {
                sum += superblock_sum_vec3(values, sid, part.blks_per_sblk);
            }
            sum
        };

        for c in part.remainder_start..n_cells {
            integral += DVec3::new(values[3 * c], values[3 * c + 1], values[3 * c + 2]);
        }

        let g_avg = integral / total_volume;

        if use_parallel {
            values
                .par_chunks_exact_mut(3)
                .zip(cell_volumes.par_iter())
                .for_each(|(v, &vol)| {
                    let inv_vol = 1.0 / vol;
                    v[0] = v[0] * inv_vol - g_avg.x;
                    v[1] = v[1] * inv_vol - g_avg.y;
                    v[2] = v[2] * inv_vol - g_avg.z;
                });
        } else {
            for (v, &vol) in values.chunks_exact_mut(3).zip(cell_volumes.iter()) {
                let inv_vol = 1.0 / vol;
                v[0] = v[0] * inv_vol - g_avg.x;
                v[1] = v[1] * inv_vol - g_avg.y;
                v[2] = v[2] * inv_vol - g_avg.z;
            }
        }
    }
}

// ============================================================
// 级联求和核心
// ============================================================

/// 单个超块的标量部分和：块内求和后累入超块累加器
fn superblock_sum_scalar(values: &[f64], sid: usize, blks_per_sblk: usize) -> f64 {
    let mut slc_sum = 0.0;
    for bid in 0..blks_per_sblk {
        let start = BLOCK_SIZE * (blks_per_sblk * sid + bid);
        let mut blk_sum = 0.0;
        for v in &values[start..start + BLOCK_SIZE] {
            blk_sum += v;
        }
        slc_sum += blk_sum;
    }
    slc_sum
}

/// 单个超块的三分量部分和（交错存储）
fn superblock_sum_vec3(values: &[f64], sid: usize, blks_per_sblk: usize) -> DVec3 {
    let mut slc_sum = DVec3::ZERO;
    for bid in 0..blks_per_sblk {
        let start = BLOCK_SIZE * (blks_per_sblk * sid + bid);
        let mut blk_sum = DVec3::ZERO;
        for c in start..start + BLOCK_SIZE {
            blk_sum += DVec3::new(values[3 * c], values[3 * c + 1], values[3 * c + 2]);
        }
        slc_sum += blk_sum;
    }
    slc_sum
}

// ============================================================
// 测试
// ============================================================
