//! Regulated-area designations used to pre-fill `is_regulated` flags.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionCategory {
    Speculation,
    Overheated,
    Regulated,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionInfo {
    pub name: String,
    pub regulated: bool,
    pub category: RegionCategory,
}

pub const SEOUL_DISTRICTS: [&str; 25] = [
    "강남구", "서초구", "송파구", "강동구", "용산구",
    "성동구", "광진구", "동대문구", "중랑구", "성북구",
    "강북구", "도봉구", "노원구", "은평구", "서대문구",
    "마포구", "양천구", "강서구", "구로구", "금천구",
    "영등포구", "동작구", "관악구", "종로구", "중구",
];

pub const REGULATED_GYEONGGI: [&str; 4] = ["과천시", "성남시 분당구", "하남시", "광명시"];

/// Every designated area, Seoul districts first.
pub fn regulated_regions() -> Vec<RegionInfo> {
    let seoul = SEOUL_DISTRICTS.iter().map(|d| RegionInfo {
        name: format!("서울 {d}"),
        regulated: true,
        category: RegionCategory::Overheated,
    });
    let gyeonggi = REGULATED_GYEONGGI.iter().map(|d| RegionInfo {
        name: format!("경기 {d}"),
        regulated: true,
        category: RegionCategory::Regulated,
    });
    seoul.chain(gyeonggi).collect()
}

/// Designation for a full region name such as `"서울 강남구"`.
pub fn find_region(name: &str) -> Option<RegionInfo> {
    regulated_regions().into_iter().find(|r| r.name == name.trim())
}
