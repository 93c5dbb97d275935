// crates/wf_physics/src/types.rs

//! 湍流闭合常数定义
//!
//! 集中管理壁面律与近壁闭合使用的经验常数，全部可由配置文件覆盖。
//!
//! # 默认值
//!
//! | 常数 | 值 | 来源 |
//! |------|-----|------|
//! | κ (von Kármán) | 0.42 | 对数律 |
//! | B (对数律截距) | 5.2 | 光滑壁 |
//! | A (幂律系数) | 8.3 | Werner-Wengle |
//! | b (幂律指数) | 1/7 | Werner-Wengle |
//! | C_μ | 0.09 | Launder-Spalding |
//! | C₁ (Rotta) | 1.8 | 雷诺应力压力-应变 |
//! | C₂ (快速项) | 0.6 | 雷诺应力压力-应变 |
//! | A⁺ (van Driest) | 26.0 | 混合长阻尼 |

use serde::{Deserialize, Serialize};

/// 湍流壁面闭合常数
///
/// 一次构造后在整个扫掠期间只读，按引用传入逐面求值。
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TurbulenceConstants {
    /// von Kármán 常数 κ
    pub kappa: f64,
    /// 对数律截距 B（光滑壁）
    pub cstlog: f64,
    /// 幂律系数 A（u⁺ = A·(y⁺)^b）
    pub apow: f64,
    /// 幂律指数 b
    pub bpow: f64,
    /// k-ε 模型常数 C_μ
    pub cmu: f64,
    /// Rotta 回归项常数 C₁
    pub crij1: f64,
    /// 压力-应变快速项常数 C₂
    pub crij2: f64,
    /// van Driest 阻尼常数 A⁺
    pub van_driest: f64,
}

impl Default for TurbulenceConstants {
    fn default() -> Self {
        Self {
            kappa: 0.42,
            cstlog: 5.2,
            apow: 8.3,
            bpow: 1.0 / 7.0,
            cmu: 0.09,
            crij1: 1.8,
            crij2: 0.6,
            van_driest: 26.0,
        }
    }
}

impl TurbulenceConstants {
    /// 幂律反解指数 d = 1/(1+b)
    ///
    /// 由 u⁺ = A·(y⁺)^b 反解摩擦速度时的指数。
    #[inline]
    pub fn dpow(&self) -> f64 {
        1.0 / (1.0 + self.bpow)
    }

    /// C_μ^{1/4}，两尺度闭合的湍流速度尺度系数
    #[inline]
    pub fn cmu025(&self) -> f64 {
        self.cmu.powf(0.25)
    }

    /// 粘性底层与对数层分界 y⁺ 的非可缩放默认值 1/κ
    #[inline]
    pub fn y_plus_limit_log(&self) -> f64 {
        1.0 / self.kappa
    }
}

// ========================================================================
// 测试
// ========================================================================
