// crates/wf_physics/src/wall/descriptor.rs

//! 壁面函数模型选择与配置
//!
//! 原始设计中壁面函数描述符是进程级可变全局量；此处改为显式的
//! 不可变配置值，求解器装配阶段构造一次，之后按引用传入每次
//! 逐面求值，扫掠期间只读，天然支持并发访问。
//!
//! # 模型编号
//!
//! 沿用传统整数编号（用于配置文件和旧接口兼容）：
//! - 0: 不使用壁面函数
//! - 1: 单摩擦速度尺度（幂律）
//! - 2: 单摩擦速度尺度（对数律）
//! - 3: 双摩擦速度尺度（对数律）
//! - 4: 双摩擦速度尺度（可缩放对数律）
//! - 5: 双摩擦速度尺度（van Driest 混合长）

use crate::types::TurbulenceConstants;
use serde::{Deserialize, Serialize};
use wf_foundation::{WfError, WfResult};

// ============================================================
// 模型枚举
// ============================================================

/// 壁面函数模型
///
/// 使用 `repr(u8)` 保留传统整数编号，便于配置文件读取与旧接口兼容。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum WallModel {
    /// 不使用壁面函数（全域按粘性底层处理）
    Disabled = 0,

    /// 单摩擦速度尺度，Werner-Wengle 幂律 u⁺ = A·(y⁺)^b
    OneScalePower = 1,

    /// 单摩擦速度尺度，对数律 u⁺ = ln(y⁺)/κ + B（迭代求解）
    OneScaleLog = 2,

    /// 双摩擦速度尺度，对数律（湍动能提供第二尺度）
    #[default]
    TwoScaleLog = 3,

    /// 双摩擦速度尺度，可缩放对数律
    ///
    /// 唯一允许非零壁面平移 dplus 的模型：y⁺ 低于阈值时整体
    /// 平移到对数层，避免网格加密时壁面律退化。
    TwoScaleScalableLog = 4,

    /// 双摩擦速度尺度，基于 van Driest 混合长阻尼的连续壁面律
    TwoScaleVanDriest = 5,
}

impl WallModel {
    /// 从整数编号转换（配置文件和旧接口读取）
    ///
    /// 未识别的编号返回 `None`，由调用方决定回退行为。
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Disabled),
            1 => Some(Self::OneScalePower),
            2 => Some(Self::OneScaleLog),
            3 => Some(Self::TwoScaleLog),
            4 => Some(Self::TwoScaleScalableLog),
            5 => Some(Self::TwoScaleVanDriest),
            _ => None,
        }
    }

    /// 转换为整数编号
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// 是否使用两个摩擦速度尺度（ustar 与 uk 可能不同）
    #[inline]
    pub fn has_two_scales(self) -> bool {
        matches!(
            self,
            Self::TwoScaleLog | Self::TwoScaleScalableLog | Self::TwoScaleVanDriest
        )
    }

    /// 是否为可缩放模型（允许非零 dplus）
    #[inline]
    pub fn is_scalable(self) -> bool {
        matches!(self, Self::TwoScaleScalableLog)
    }
}

// ============================================================
// 配置
// ============================================================

/// 壁面函数配置
///
/// 求解器装配阶段构造一次，扫掠期间只读。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallFunctionConfig {
    /// 选用的闭合模型
    pub model: WallModel,
    /// 是否启用标量交换系数修正（[`super::exchange`]）
    pub exchange_correlation: bool,
    /// 粘性底层与对数层的 y⁺ 分界
    ///
    /// 模型相关默认值：可缩放模型取 10.88，其余取 1/κ ≈ 2.38。
    pub y_plus_limit: f64,
    /// 湍流闭合常数
    pub constants: TurbulenceConstants,
}

/// 可缩放壁面函数的 y⁺ 分界默认值
const Y_PLUS_LIMIT_SCALABLE: f64 = 10.88;

impl Default for WallFunctionConfig {
    fn default() -> Self {
        Self::for_model(WallModel::default())
    }
}

impl WallFunctionConfig {
    /// 按模型构造配置（使用模型相关的 y⁺ 分界默认值）
    pub fn for_model(model: WallModel) -> Self {
        Self::with_constants(model, TurbulenceConstants::default())
    }

    /// 按模型与指定闭合常数构造配置
    pub fn with_constants(model: WallModel, constants: TurbulenceConstants) -> Self {
        let y_plus_limit = if model.is_scalable() {
            Y_PLUS_LIMIT_SCALABLE
        } else {
            constants.y_plus_limit_log()
        };
        Self {
            model,
            exchange_correlation: false,
            y_plus_limit,
            constants,
        }
    }

    /// 启用标量交换系数修正
    pub fn with_exchange_correlation(mut self, enabled: bool) -> Self {
        self.exchange_correlation = enabled;
        self
    }

    /// 校验配置的有效性
    ///
    /// y⁺ 分界和 von Kármán 常数必须为正。
    pub fn validate(&self) -> WfResult<()> {
        if !(self.y_plus_limit > 0.0) {
            return Err(WfError::out_of_range(
                "y_plus_limit",
                self.y_plus_limit,
                f64::MIN_POSITIVE,
                f64::MAX,
            ));
        }
        if !(self.constants.kappa > 0.0) {
            return Err(WfError::out_of_range(
                "kappa",
                self.constants.kappa,
                f64::MIN_POSITIVE,
                f64::MAX,
            ));
        }
        Ok(())
    }
}

// ============================================================
// 测试
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_u8_roundtrip() {
        for code in 0u8..=5 {
            let model = WallModel::from_u8(code).expect("0..=5 均为有效编号");
            assert_eq!(model.code(), code);
        }
        assert_eq!(WallModel::from_u8(6), None);
        assert_eq!(WallModel::from_u8(255), None);
    }

    #[test]
    fn test_default_y_plus_limit_per_model() {
        let scalable = WallFunctionConfig::for_model(WallModel::TwoScaleScalableLog);
        assert!((scalable.y_plus_limit - 10.88).abs() < 1e-12, "可缩放模型默认 10.88");

        let log = WallFunctionConfig::for_model(WallModel::TwoScaleLog);
        assert!((log.y_plus_limit - 1.0 / 0.42).abs() < 1e-12, "其余模型默认 1/κ");
    }

    #[test]
    fn test_two_scale_classification() {
        assert!(!WallModel::Disabled.has_two_scales());
        assert!(!WallModel::OneScalePower.has_two_scales());
        assert!(WallModel::TwoScaleLog.has_two_scales());
        assert!(WallModel::TwoScaleScalableLog.is_scalable());
        assert!(!WallModel::TwoScaleLog.is_scalable());
    }

    #[test]
    fn test_validate() {
        let mut config = WallFunctionConfig::default();
        assert!(config.validate().is_ok());

        config.y_plus_limit = 0.0;
        assert!(config.validate().is_err(), "y⁺ 分界必须为正");

        config.y_plus_limit = 2.38;
        config.constants.kappa = -0.42;
        assert!(config.validate().is_err(), "κ 必须为正");
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = WallFunctionConfig::for_model(WallModel::TwoScaleScalableLog)
            .with_exchange_correlation(true);
        let json = serde_json::to_string(&config).unwrap();
        let back: WallFunctionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.model, WallModel::TwoScaleScalableLog);
        assert!(back.exchange_correlation);
        assert!((back.y_plus_limit - config.y_plus_limit).abs() < 1e-15);
    }
}
