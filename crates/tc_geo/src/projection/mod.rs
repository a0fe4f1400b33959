// terracoord\crates\tc_geo\src\projection/mod.rs
//! 投影坐标格式
//!
//! - [`transverse_mercator`]: 经典横轴墨卡托级数（正向/逆向）
//! - [`Utm`]: 60 带平面投影坐标，带纬度带字母
//! - [`Mgrs`]: UTM 之上的 100 km 方格双字母码
//!
//! UTM/MGRS 都是派生视图：不存储经纬度，规范坐标在每次
//! `to_canonical` 时通过逆向投影重算。

pub mod mgrs;
pub mod transverse_mercator;
pub mod utm;

pub use mgrs::Mgrs;
pub use transverse_mercator::TransverseMercatorParams;
pub use utm::Utm;
