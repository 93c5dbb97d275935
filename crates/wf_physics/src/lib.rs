// crates/wf_physics/src/lib.rs

//! 物理求解核心模块
//!
//! 提供不可压缩有限体积求解器近壁区与压力修正步所需的数值核心：
//! - 核心常数定义 (types) - 湍流闭合常数
//! - 壁面函数 (wall) - 摩擦速度闭合、标量交换系数修正
//! - 零均值投影 (projection) - 压力场可加常数的分块级联消除
//!
//! # 模块分工
//!
//! - [`wall::descriptor`]: 壁面函数模型选择与配置（显式不可变配置值）
//! - [`wall::velocity`]: 六种摩擦速度闭合的逐面分发器
//! - [`wall::exchange`]: 两/三子层相似模型的换热系数修正
//! - [`projection`]: 体积加权分块级联求和的零均值投影
//!
//! # 并发模型
//!
//! 逐面求值为纯函数，可跨面任意并行；扫掠级计数器通过
//! [`wall::SweepCounters::merge`] 做归约合并。投影为一次
//! 并行归约加一次并行逐元素改写，两段之间只有一个同步点。

pub mod projection;
pub mod types;
pub mod wall;

// 重导出常用类型
pub use types::TurbulenceConstants;
pub use wall::{
    evaluate, evaluate_raw, exchange_coefficient, ExchangeCorrection, SweepCounters,
    WallFaceInputs, WallFunctionConfig, WallLawResult, WallModel,
};

pub use projection::{ProjectionConfig, ProjectionError, ZeroMeanProjector, BLOCK_SIZE};
