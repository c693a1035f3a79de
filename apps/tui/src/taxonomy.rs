//! Station classification reference data.
//!
//! Three levels: observation domain, station category, subcategory. The
//! category names double as the first key of the station dataset.

use crate::domain::{ClassificationNode, Decal, NodeStyle, Observations, Rgb};

const TEMP_HUMIDITY: &str = "溫度、濕度";
const TEMP_HUMIDITY_PRESSURE: &str = "溫度、濕度、氣壓";
const RAINFALL: &str = "雨量";

const WEATHER_TYPES: Observations = Observations::Types(&[TEMP_HUMIDITY, TEMP_HUMIDITY_PRESSURE]);
const RAIN_TYPES: Observations = Observations::Types(&[RAINFALL]);

const fn category(
    name: &'static str,
    rule: &'static str,
    system: &'static str,
    agency: &'static str,
    frequency: &'static str,
    observations: Observations,
    note: Option<&'static str>,
    style: NodeStyle,
) -> ClassificationNode {
    ClassificationNode {
        name,
        rule: Some(rule),
        system: Some(system),
        agency: Some(agency),
        frequency: Some(frequency),
        observations,
        note,
        style,
        is_exception: false,
        children: &[],
    }
}

const fn exception(node: ClassificationNode) -> ClassificationNode {
    ClassificationNode {
        is_exception: true,
        ..node
    }
}

static SURFACE_CATEGORIES: [ClassificationNode; 7] = [
    category(
        "署屬氣象站",
        "專用觀測站碼為 '46' 開頭，且 COWORK 資料庫中 METRO_STATION 資料表其 CODE 欄位為 'C' 者，皆為署屬有人站，以正面表列方式列出",
        "ACOS",
        "測政管理科",
        "秒資料（ACOS）、分鐘資料（ASOS）",
        WEATHER_TYPES,
        Some("玉山屬於 ASOS 系統，阿里山新站資料不對外公開，不列入分類；成功站歸類於署屬無人站"),
        NodeStyle::plain(Rgb(0x5a, 0xa8, 0xd4)),
    ),
    category(
        "署屬無人站",
        "COWORK 資料庫中 METRO_STATION 資料表其 CODE 欄位為 'C' 且除梧棲站外專用觀測站碼為 '46' 開頭者，共 4 站，以正面表列方式列出",
        "ACOS、資料中繼接收機制",
        "測政管理科",
        "秒資料（ACOS）、分鐘資料（資料中繼接收機制）",
        WEATHER_TYPES,
        Some("除了成功站外，站外無駐點辦公人員；梧棲站專用站碼開頭為 'C0'"),
        NodeStyle::plain(Rgb(0x79, 0xc4, 0xed)),
    ),
    category(
        "農業氣象站",
        "COWORK 資料庫中 METRO_STATION 資料表其 CODE 欄位為 'F' 者",
        "資料中繼接收機制",
        "綜合規劃組-跨域發展科（原農業科）、自動觀測科",
        "分鐘資料",
        WEATHER_TYPES,
        Some("專用觀測站碼為 'C2' 開頭者為自動觀測科建置"),
        NodeStyle::plain(Rgb(0x98, 0xdf, 0xff)),
    ),
    category(
        "學校合作站",
        "COWORK 資料庫中 METRO_STATION 資料表其 CODE 欄位為 'E' 者",
        "資料中繼接收機制",
        "資料品管科、中央大學、文化大學",
        "分鐘資料",
        WEATHER_TYPES,
        Some("雪見這個站歸類於署屬合作站"),
        NodeStyle::plain(Rgb(0x4b, 0x9c, 0xc9)),
    ),
    exception(category(
        "國道合作站",
        "COWORK 資料庫中 METRO_STATION 資料表其 CODE 欄位為 'G' 且中文站名開頭為 '國' 者",
        "資料中繼接收機制",
        "自動觀測科、高速公路局",
        "分鐘資料",
        WEATHER_TYPES,
        None,
        NodeStyle::decal(Rgb(0xf0, 0x80, 0x80), Decal::Triangle),
    )),
    exception(category(
        "公路合作站",
        "COWORK 資料庫中 METRO_STATION 資料表其 CODE 欄位為 'G' 且中文站名開頭不為 '國' 者",
        "資料中繼接收機制",
        "自動觀測科、公路局",
        "分鐘資料",
        WEATHER_TYPES,
        Some("目前僅有西濱快速道路"),
        NodeStyle::decal(Rgb(0xf4, 0xa2, 0x61), Decal::Rect),
    )),
    exception(category(
        "署屬合作站",
        "在 COWORK 資料庫中 METRO_STATION 資料表中且不屬於「署屬氣象站」、「署屬無人站」、「農業氣象站」、「學校合作站」、「國道合作站」、「公路合作站」者",
        "ASOS、資料中繼接收機制",
        "資料品管科、各合作單位",
        "分鐘資料",
        WEATHER_TYPES,
        Some("雪見屬於本項次分類"),
        NodeStyle::decal(Rgb(0xff, 0xb7, 0x4d), Decal::Star),
    )),
];

static TELEMETRY_CATEGORIES: [ClassificationNode; 3] = [
    category(
        "自動氣象站",
        "COWORK 資料庫中 WEB_STATION 資料表中其專用站站碼開頭為 'C0' 者",
        "ARMTS",
        "自動觀測科",
        "10分鐘資料、事件回傳（雨量）",
        WEATHER_TYPES,
        None,
        NodeStyle::plain(Rgb(0x7c, 0xc4, 0x7f)),
    ),
    category(
        "自動雨量站",
        "COWORK 資料庫中 WEB_STATION 資料表中其專用站站碼開頭為 'C1' 者",
        "ARMTS",
        "自動觀測科",
        "事件回傳（雨量）",
        RAIN_TYPES,
        None,
        NodeStyle::plain(Rgb(0xa0, 0xd9, 0xa2)),
    ),
    category(
        "臨時自動氣象站",
        "COWORK 資料庫中 WEB_STATION 資料表中其專用站站碼開頭為 'CM' 者",
        "ARMTS",
        "自動觀測科",
        "10分鐘資料、事件回傳（雨量）",
        WEATHER_TYPES,
        None,
        NodeStyle::plain(Rgb(0xc5, 0xed, 0xc7)),
    ),
];

static PARTNER_CATEGORIES: [ClassificationNode; 1] = [category(
    "外單位合作雨量測站",
    "依照 COWORK 資料庫中 WEB_STATIONOUT 資料表中 OWNER 欄位進行分類",
    "Extranet 資料交換機制、外部 webAPI",
    "水利署/水保署/林業署/北市府等",
    "10分鐘資料",
    RAIN_TYPES,
    Some("可分為經濟部水利署、經濟部水利署第十河川分署、農村水保署、林業保育署、石門水庫、翡翠水庫、臺北市政府工務局水利工程處、臺北市政府工務局大地工程處"),
    NodeStyle::plain(Rgb(0xff, 0xb7, 0x4d)),
)];

/// The full taxonomy, one entry per observation domain.
pub static TAXONOMY: [ClassificationNode; 3] = [
    ClassificationNode {
        name: "地面系統測站",
        rule: Some("以固網或行動網路方式傳輸資料的地面常規測站。"),
        system: Some("ACOS、ASOS、農業氣象站、合作氣象站資料中繼接收機制"),
        agency: Some("中央氣象署"),
        frequency: Some("多樣 (視 L2 分類)"),
        observations: Observations::Varies,
        note: None,
        style: NodeStyle::plain(Rgb(0x3a, 0x8f, 0xb7)),
        is_exception: false,
        children: &SURFACE_CATEGORIES,
    },
    ClassificationNode {
        name: "遙測系統測站",
        rule: Some("以無線電中繼經區域站回傳或是透過行動網路、固網回傳資料者"),
        system: Some("ARMTS"),
        agency: Some("自動觀測科"),
        frequency: Some("10分鐘資料、事件回傳（雨量）"),
        observations: Observations::Varies,
        note: None,
        style: NodeStyle::plain(Rgb(0x4c, 0xaf, 0x50)),
        is_exception: false,
        children: &TELEMETRY_CATEGORIES,
    },
    ClassificationNode {
        name: "外部合作單位測站",
        rule: Some("主要由非氣象署之單位維運，資料交換共享。"),
        system: Some("Extranet 資料交換機制、外部 webAPI"),
        agency: Some("外部單位"),
        frequency: Some("10分鐘資料"),
        observations: RAIN_TYPES,
        note: None,
        style: NodeStyle::plain(Rgb(0xff, 0x98, 0x00)),
        is_exception: false,
        children: &PARTNER_CATEGORIES,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{find_by_name, walk};

    #[test]
    fn taxonomy_has_three_domains_and_eleven_categories() {
        assert_eq!(TAXONOMY.len(), 3);
        let leaves = walk(&TAXONOMY).iter().filter(|(_, n)| n.is_leaf()).count();
        assert_eq!(leaves, 11);
        assert!(TAXONOMY.iter().all(|root| root.depth() == 2));
    }

    #[test]
    fn only_roots_use_the_varies_sentinel() {
        for (path, node) in walk(&TAXONOMY) {
            if node.observations.is_varies() {
                assert_eq!(path.level(), 0, "{} should list concrete types", node.name);
            }
            if node.is_leaf() {
                assert!(!node.observations.types().is_empty());
            }
        }
    }

    #[test]
    fn exception_categories_carry_a_decal() {
        let exceptions: Vec<_> = walk(&TAXONOMY)
            .into_iter()
            .filter(|(_, n)| n.is_exception)
            .map(|(_, n)| (n.name, n.style.decal))
            .collect();
        assert_eq!(
            exceptions,
            vec![
                ("國道合作站", Some(Decal::Triangle)),
                ("公路合作站", Some(Decal::Rect)),
                ("署屬合作站", Some(Decal::Star)),
            ]
        );
    }

    #[test]
    fn rain_gauge_category_is_rain_only() {
        let (_, node) = find_by_name(&TAXONOMY, "自動雨量站").unwrap_or_else(|| panic!("missing"));
        assert_eq!(node.observations.types(), &[RAINFALL]);
    }
}
