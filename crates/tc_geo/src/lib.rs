// terracoord\crates\tc_geo\src/lib.rs
//! TerraCoord 坐标转换核心库
//!
//! 提供多种坐标文本/数值编码之间的互转，以及两种地球模型下的
//! 大地测量计算。
//!
//! # 模块
//!
//! - `coordinate`: 规范坐标（十进制度经纬度对），所有转换的枢纽
//! - `format`: DD / DMM / DMS 文本格式与转换契约
//! - `projection`: 横轴墨卡托级数、UTM、MGRS
//! - `geodesic`: Haversine / 大圆（球体）与 Vincenty（WGS84）求解器
//! - `ellipsoid`: 地球模型常量
//! - `error`: 统一错误类型
//!
//! # 示例
//!
//! ```
//! use tc_geo::prelude::*;
//!
//! // 解析 DD 文本，转为 MGRS
//! let dd: Dd = "40.7128, -74.0060".parse().unwrap();
//! let mgrs: Mgrs = dd.convert().unwrap();
//! assert_eq!(format!("{mgrs}"), "18T WL 83959 07350");
//!
//! // WGS84 下的距离
//! let la = Coordinate::new(34.0522, -118.2437).unwrap();
//! let d = dd.coordinate().distance_to(&la).unwrap();
//! assert!((d - 3_944_422.2).abs() < 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod coordinate;
pub mod ellipsoid;
pub mod error;
pub mod format;
pub mod geodesic;
pub mod projection;

/// 预导入模块
pub mod prelude {
    pub use crate::coordinate::Coordinate;
    pub use crate::ellipsoid::{EarthModel, Ellipsoid};
    pub use crate::error::{GeoError, GeoResult};
    pub use crate::format::{CoordinateFormat, Dd, Dmm, Dms};
    pub use crate::projection::{Mgrs, Utm};
}

// 重导出常用类型
pub use coordinate::Coordinate;
pub use ellipsoid::{EarthModel, Ellipsoid};
pub use error::{GeoError, GeoResult};
pub use format::{CoordinateFormat, Dd, Dmm, Dms};
pub use projection::{Mgrs, Utm};
