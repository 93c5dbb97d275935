// crates/wf_physics/src/wall/mod.rs

//! 壁面函数模块
//!
//! 提供近壁湍流闭合的三个组成部分：
//! - descriptor: 模型选择与配置（显式不可变配置值，替代全局描述符）
//! - velocity: 摩擦速度闭合的逐面分发器（六种模型）
//! - exchange: 标量（热/质）交换系数的两/三子层修正
//!
//! # 使用示例
//!
//! ```
//! use wf_physics::wall::{evaluate, SweepCounters, WallFaceInputs, WallFunctionConfig, WallModel};
//!
//! let config = WallFunctionConfig::for_model(WallModel::TwoScaleLog);
//! let mut counters = SweepCounters::default();
//!
//! let inputs = WallFaceInputs {
//!     l_visc: 1e-6,
//!     t_visc: 1e-4,
//!     vel: 1.0,
//!     y: 0.01,
//!     rnnb: 0.0,
//!     kinetic_en: 1e-3,
//! };
//! let result = evaluate(&config, &inputs, &mut counters);
//! assert!(result.yplus >= 0.0);
//! assert_eq!(counters.total(), 1);
//! ```

pub mod descriptor;
pub mod exchange;
pub mod velocity;

pub use descriptor::{WallFunctionConfig, WallModel};
pub use exchange::{exchange_coefficient, ExchangeCorrection};
pub use velocity::{evaluate, evaluate_raw, SweepCounters, WallFaceInputs, WallLawResult};
