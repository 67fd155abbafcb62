use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// localStorage 中 Access Token 的键名
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// localStorage 中 Refresh Token 的键名
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
/// localStorage 中购物车内容的键名
pub const CART_KEY: &str = "agromod_cart";

pub const AUTH_HEADER: &str = "Authorization";
pub const AUTH_SCHEME: &str = "Bearer";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 账号角色。服务端在登录/注册响应中返回的角色为准，
/// 客户端选择器只是注册时的输入。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Farmer,
    Vendor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Farmer => "farmer",
            Role::Vendor => "vendor",
        }
    }

    pub fn is_vendor(&self) -> bool {
        matches!(self, Role::Vendor)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Farmer
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FarmerProfile {
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub preferred_crops: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VendorProfile {
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub contact_phone: String,
}

/// 当前登录身份。`/api/auth/me/` 与登录/注册响应中的 `user` 字段共用此结构。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farmer_profile: Option<FarmerProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_profile: Option<VendorProfile>,
}

impl User {
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }
}

// =========================================================
// 集市 (Marketplace)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

/// 商品。价格由服务端 DecimalField 序列化为字符串（如 "12.50"）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<u64>,
    #[serde(default)]
    pub category_name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// 数值化的单价，无法解析时按 0 处理
    pub fn price_value(&self) -> f64 {
        self.price.parse().unwrap_or(0.0)
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub product_id: Option<u64>,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total: String,
    #[serde(default)]
    pub shipping_address: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// 客户端侧购物车条目（持久化于 localStorage，不属于服务端契约）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    pub product_id: u64,
    pub product_name: String,
    pub price: String,
    pub quantity: u32,
}

impl CartEntry {
    pub fn line_total(&self) -> f64 {
        self.price.parse::<f64>().unwrap_or(0.0) * f64::from(self.quantity)
    }
}

// =========================================================
// 种植规划 (Planner)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropPlan {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub crop: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanActivity {
    pub id: u64,
    pub plan: u64,
    pub name: String,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub reminder_days_before: u32,
    #[serde(default)]
    pub notes: String,
}

// =========================================================
// 天气 (Weather)
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherNow {
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub precipitation: Option<f64>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherAlert {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub alert_type: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPreferences {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub location_name: String,
    #[serde(default = "default_true")]
    pub email_alerts: bool,
    #[serde(default = "default_true")]
    pub alert_frost: bool,
    #[serde(default = "default_true")]
    pub alert_heavy_rain: bool,
    #[serde(default = "default_true")]
    pub alert_heat: bool,
}

impl Default for WeatherPreferences {
    fn default() -> Self {
        Self {
            latitude: None,
            longitude: None,
            location_name: String::new(),
            email_alerts: true,
            alert_frost: true,
            alert_heavy_rain: true,
            alert_heat: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

// =========================================================
// 行情 (Prices)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MandiPrice {
    #[serde(default)]
    pub commodity: String,
    #[serde(default)]
    pub market: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub month: String,
    #[serde(default)]
    pub avg_price: f64,
}

// =========================================================
// 政府补贴 (Schemes)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheme {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub eligibility_criteria: String,
    #[serde(default)]
    pub documents_required: String,
    #[serde(default)]
    pub application_process: String,
    #[serde(default)]
    pub official_link: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// 资格核查问卷。字段均为自由文本，由服务端规则引擎解释。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EligibilityForm {
    #[serde(default)]
    pub land_holding: String,
    #[serde(default)]
    pub crop: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub income: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub land_ownership: String,
    #[serde(default)]
    pub has_bank_account: String,
    #[serde(default)]
    pub pending_loan: String,
    #[serde(default)]
    pub has_id_proof: String,
    #[serde(default)]
    pub has_aadhaar: String,
    #[serde(default)]
    pub is_govt_employee: String,
    #[serde(default)]
    pub pays_income_tax: String,
    #[serde(default)]
    pub family_members: String,
    #[serde(default)]
    pub crop_season: String,
    #[serde(default)]
    pub has_land_records: String,
}

impl EligibilityForm {
    /// 问卷字段清单：`(字段键, 表单标签)`。UI 据此生成输入项。
    pub const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("land_holding", "Land holding (acres)"),
        ("crop", "Primary crop"),
        ("state", "State"),
        ("income", "Annual income"),
        ("age", "Age"),
        ("land_ownership", "Land ownership (owned/leased)"),
        ("has_bank_account", "Has bank account (yes/no)"),
        ("pending_loan", "Pending loan (yes/no)"),
        ("has_id_proof", "Has ID proof (yes/no)"),
        ("has_aadhaar", "Has Aadhaar (yes/no)"),
        ("is_govt_employee", "Government employee (yes/no)"),
        ("pays_income_tax", "Pays income tax (yes/no)"),
        ("family_members", "Family members"),
        ("crop_season", "Crop season"),
        ("has_land_records", "Has land records (yes/no)"),
    ];

    pub fn get(&self, key: &str) -> &str {
        match key {
            "land_holding" => &self.land_holding,
            "crop" => &self.crop,
            "state" => &self.state,
            "income" => &self.income,
            "age" => &self.age,
            "land_ownership" => &self.land_ownership,
            "has_bank_account" => &self.has_bank_account,
            "pending_loan" => &self.pending_loan,
            "has_id_proof" => &self.has_id_proof,
            "has_aadhaar" => &self.has_aadhaar,
            "is_govt_employee" => &self.is_govt_employee,
            "pays_income_tax" => &self.pays_income_tax,
            "family_members" => &self.family_members,
            "crop_season" => &self.crop_season,
            "has_land_records" => &self.has_land_records,
            _ => "",
        }
    }

    pub fn set(&mut self, key: &str, value: String) {
        match key {
            "land_holding" => self.land_holding = value,
            "crop" => self.crop = value,
            "state" => self.state = value,
            "income" => self.income = value,
            "age" => self.age = value,
            "land_ownership" => self.land_ownership = value,
            "has_bank_account" => self.has_bank_account = value,
            "pending_loan" => self.pending_loan = value,
            "has_id_proof" => self.has_id_proof = value,
            "has_aadhaar" => self.has_aadhaar = value,
            "is_govt_employee" => self.is_govt_employee = value,
            "pays_income_tax" => self.pays_income_tax = value,
            "family_members" => self.family_members = value,
            "crop_season" => self.crop_season = value,
            "has_land_records" => self.has_land_records = value,
            _ => {}
        }
    }
}

// =========================================================
// 分页兼容 (DRF Listing)
// =========================================================

/// 列表端点的两种返回形态：裸数组或 DRF 分页包装 `{results: [...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Paginated {
        results: Vec<T>,
        #[serde(default)]
        count: Option<u64>,
    },
    Plain(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Paginated { results, .. } => results,
            Listing::Plain(items) => items,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Listing::Paginated { results, .. } => results.len(),
            Listing::Plain(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Listing::Plain(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_uses_snake_case_wire_form() {
        assert_eq!(serde_json::to_string(&Role::Vendor).unwrap(), "\"vendor\"");
        let role: Role = serde_json::from_str("\"farmer\"").unwrap();
        assert_eq!(role, Role::Farmer);
    }

    #[test]
    fn user_without_profiles_deserializes() {
        let user: User = serde_json::from_str(
            r#"{"id":7,"email":"a@x.com","first_name":"A","last_name":"B","phone":"","role":"farmer"}"#,
        )
        .unwrap();
        assert_eq!(user.role, Role::Farmer);
        assert!(user.farmer_profile.is_none());
        assert_eq!(user.display_name(), "A B");
    }

    #[test]
    fn listing_accepts_both_shapes() {
        let plain: Listing<Category> = serde_json::from_str(r#"[{"id":1,"name":"Seeds"}]"#).unwrap();
        assert_eq!(plain.into_vec().len(), 1);

        let paged: Listing<Category> =
            serde_json::from_str(r#"{"count":1,"results":[{"id":1,"name":"Seeds"}]}"#).unwrap();
        assert_eq!(paged.into_vec()[0].name, "Seeds");
    }

    #[test]
    fn decimal_price_is_wire_string() {
        let product: Product = serde_json::from_str(
            r#"{"id":1,"name":"Urea","price":"266.50","unit":"bag","stock":10}"#,
        )
        .unwrap();
        assert!((product.price_value() - 266.5).abs() < f64::EPSILON);
        assert!(product.is_active);
    }
}
