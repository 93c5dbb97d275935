// crates/wf_physics/src/wall/exchange.rs

//! 标量交换系数的壁面修正
//!
//! 计算湍流流动中流体与壁面间换热（换质）系数的修正因子
//! h_tur = Pr·y⁺/T⁺，基于动力粘性子层与热子层的相似模型：
//!
//! - 层流 Prandtl 数 ≤ 0.1（液态金属类）：双子层 Prandtl-Taylor 模型
//! - 层流 Prandtl 数 > 0.1（液体与气体）：三子层 Arpaci-Larsen 模型
//!
//! 最终换热系数由调用方组装：h = λ/d · h_tur。
//!
//! # 前置条件
//!
//! `prl` 与 `ckarm` 必须为正（物理量纲保证），本模块不做校验；
//! 违反前置条件的输入产生未定义的数值结果。

use wf_foundation::float::EPZERO;

/// 低 Prandtl 数分界（双子层/三子层模型切换阈值）
const PRANDTL_SWITCH: f64 = 0.1;

/// 交换系数修正结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeCorrection {
    /// 修正后的无量纲交换系数 h_tur
    pub htur: f64,
    /// 热子层分界 y⁺
    pub yplim: f64,
}

/// 计算交换系数修正
///
/// # 参数
/// - `prl`: 层流 Prandtl 数（必须为正，见模块文档）
/// - `prt`: 湍流 Prandtl 数
/// - `ckarm`: von Kármán 常数（必须为正）
/// - `yplus`: 无量纲壁面距离
/// - `dplus`: 可缩放壁面函数的无量纲壁面平移
///
/// # 返回
/// 修正系数与热子层分界，对全部实数输入均为全函数（无错误路径）。
pub fn exchange_coefficient(
    prl: f64,
    prt: f64,
    ckarm: f64,
    yplus: f64,
    dplus: f64,
) -> ExchangeCorrection {
    // 基准值，近零 y⁺ 的除零保护
    let mut htur = (yplus - dplus).max(EPZERO) / yplus.max(EPZERO);
    let yplim;

    if prl <= PRANDTL_SWITCH {
        // 双子层 Prandtl-Taylor 模型
        yplim = prt / (prl * ckarm);
        if yplus > yplim {
            let tplus = prl * yplim + prt / ckarm * (yplus / yplim).ln();
            htur = prl * (yplus - dplus) / tplus;
        }
    } else {
        // 三子层 Arpaci-Larsen 模型
        let yp2 = (ckarm * 1000.0 / prt).sqrt();
        yplim = (1000.0 / prl).powf(1.0 / 3.0);

        let a2 = 15.0 * prl.powf(2.0 / 3.0);
        let beta2 = a2 - 500.0 / (yp2 * yp2);

        if yplus >= yplim && yplus < yp2 {
            let tplus = a2 - 500.0 / (yplus * yplus);
            htur = prl * (yplus - dplus) / tplus;
        } else if yplus >= yp2 {
            let tplus = beta2 + prt / ckarm * (yplus / yp2).ln();
            htur = prl * (yplus - dplus) / tplus;
        }
    }

    ExchangeCorrection { htur, yplim }
}

// ============================================================
// 测试
// ============================================================
