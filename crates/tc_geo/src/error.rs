// terracoord\crates\tc_geo\src/error.rs
//! 坐标转换与大地测量错误类型
//!
//! 所有失败都以类型化错误报告给调用方，不允许 panic 或静默吞掉。
//!
//! # 错误分类
//!
//! - **范围错误**：纬度/经度超出合法区间
//! - **解析错误**：任意格式的输入文本畸形
//! - **网格错误**：MGRS 字母不在有效字母表内、带字母缺少最小北向查表项
//! - **计算错误**：迭代求解超过上限、算法未实现
//! - **配置错误**：地球模型选择器无法识别

use thiserror::Error;

/// 核心库统一结果类型
pub type GeoResult<T> = Result<T, GeoError>;

/// 坐标转换错误
#[derive(Error, Debug)]
pub enum GeoError {
    /// 坐标超出合法范围
    #[error("{axis} 超出范围: {value:.6} (允许范围: {min} 到 {max})")]
    OutOfRange {
        /// 坐标轴（如"纬度"、"经度"、"UTM带号"）
        axis: &'static str,
        /// 实际值
        value: f64,
        /// 最小允许值
        min: f64,
        /// 最大允许值
        max: f64,
    },

    /// 输入文本解析失败
    #[error("解析失败 \"{input}\": {reason}")]
    Parse {
        /// 原始输入文本
        input: String,
        /// 失败原因
        reason: String,
    },

    /// MGRS 网格引用无效
    #[error("无效的网格引用 \"{reference}\": {reason}")]
    InvalidGridReference {
        /// 出错的网格引用文本
        reference: String,
        /// 失败原因
        reason: String,
    },

    /// 迭代求解不收敛
    #[error("{operation} 在 {iterations} 次迭代后不收敛: {message}")]
    ConvergenceFailure {
        /// 操作名称（如"Vincenty反解"）
        operation: &'static str,
        /// 达到的迭代次数
        iterations: usize,
        /// 出错的输入描述
        message: String,
    },

    /// 操作未实现
    #[error("{operation} 未实现")]
    NotImplemented {
        /// 操作名称
        operation: &'static str,
    },

    /// 不支持的地球模型
    #[error("不支持的地球模型: \"{name}\" (支持: sphere, wgs84)")]
    UnsupportedEarthModel {
        /// 请求的模型名称
        name: String,
    },
}

// ============================================================================
// 便捷构造函数
// ============================================================================

impl GeoError {
    /// 创建坐标越界错误
    #[inline]
    pub fn out_of_range(axis: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            axis,
            value,
            min,
            max,
        }
    }

    /// 创建解析错误
    #[inline]
    pub fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// 创建无效网格引用错误
    #[inline]
    pub fn invalid_grid_reference(
        reference: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidGridReference {
            reference: reference.into(),
            reason: reason.into(),
        }
    }

    /// 创建迭代不收敛错误
    #[inline]
    pub fn convergence_failure(
        operation: &'static str,
        iterations: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::ConvergenceFailure {
            operation,
            iterations,
            message: message.into(),
        }
    }

    /// 创建未实现错误
    #[inline]
    pub fn not_implemented(operation: &'static str) -> Self {
        Self::NotImplemented { operation }
    }

    /// 创建不支持的地球模型错误
    #[inline]
    pub fn unsupported_earth_model(name: impl Into<String>) -> Self {
        Self::UnsupportedEarthModel { name: name.into() }
    }

    /// 验证坐标范围
    #[inline]
    pub fn check_coordinate(
        axis: &'static str,
        value: f64,
        min: f64,
        max: f64,
    ) -> Result<(), Self> {
        if !(min..=max).contains(&value) || !value.is_finite() {
            Err(Self::out_of_range(axis, value, min, max))
        } else {
            Ok(())
        }
    }

    /// 验证 UTM 带号
    #[inline]
    pub fn check_utm_zone(zone: u8) -> Result<(), Self> {
        if !(1..=60).contains(&zone) {
            Err(Self::out_of_range("UTM带号", f64::from(zone), 1.0, 60.0))
        } else {
            Ok(())
        }
    }
}
