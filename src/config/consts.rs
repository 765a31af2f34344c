// src/config/consts.rs

// Search site
pub const SEARCH_URL: &str = "http://www.juso.go.kr/support/AddressMainSearch2.do";

// Search form controls
pub const SEL_SEARCH_INPUT: &str = "form input[name='searchKeyword']";
pub const SEL_SEARCH_BUTTON: &str = "form input[type='button']";

// Result page
pub const SEL_RESULT_COUNT: &str = "div.result p";
pub const SEL_RESULT_SECTION: &str = "section.section-search";
pub const SEL_ZIPCODE: &str = "span.zipcode";
pub const SEL_MAP_LINK: &str = "a.map.mobileMap";
pub const MAP_LINK_ATTR: &str = "onclick";
pub const SEL_ENG_ROWS: &str = "li.row.eng_info";
pub const SEL_KOR_ROWS: &str = "li.row.kor_info";
pub const SEL_ROAD_NAME: &str = "div.cell.st.roadName";
pub const SEL_LAND_LOT: &str = "div.cell.num.landLot";

// WebDriver
pub const WEBDRIVER_URL: &str = "http://localhost:4444";
pub const KEY_ENTER: &str = "\u{E007}";

// Waits
pub const WAIT_TIMEOUT_MS: u64 = 10_000;
pub const POLL_MS: u64 = 200;
pub const SETTLE_MS: u64 = 250;

// Output
pub const DEFAULT_JSON_FILE: &str = "results.json";
pub const LINE_JOIN: &str = " / ";
