use crate::{
    Category, CropPlan, EligibilityForm, GeocodeResult, Listing, MandiPrice, Order, PlanActivity,
    PricePoint, Product, Role, Scheme, User, WeatherAlert, WeatherNow, WeatherPreferences,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// GET/DELETE requests carry no JSON body on this API.
    pub fn has_body(&self) -> bool {
        !matches!(self, HttpMethod::Get | HttpMethod::Delete)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize + DeserializeOwned {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path (or suffix).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// Effective path for this instance. Override for endpoints with
    /// path parameters or query strings.
    fn path(&self) -> String {
        Self::PATH.to_string()
    }
}

/// Minimal percent-encoding for query string values.
pub fn encode_query(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            b' ' => out.push_str("%20"),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

// =========================================================
// Auth
// =========================================================

/// Tokens plus identity, returned by both login and register.
/// The server-side `role` is authoritative; `user.role` always matches it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access: String,
    pub refresh: String,
    pub user: User,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = AuthResponse;
    const PATH: &'static str = "/api/auth/login/";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farmer_profile: Option<crate::FarmerProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_profile: Option<crate::VendorProfile>,
}

impl ApiRequest for RegisterRequest {
    type Response = AuthResponse;
    const PATH: &'static str = "/api/auth/register/";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

impl ApiRequest for RefreshRequest {
    type Response = RefreshResponse;
    const PATH: &'static str = "/api/auth/refresh/";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Identity lookup (`who am I`), bearer token only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeRequest;

impl ApiRequest for MeRequest {
    type Response = User;
    const PATH: &'static str = "/api/auth/me/";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordResponse {
    #[serde(default)]
    pub message: String,
    /// Development convenience: some deployments echo the reset token back.
    #[serde(default)]
    pub reset_token: Option<String>,
}

impl ApiRequest for ForgotPasswordRequest {
    type Response = ForgotPasswordResponse;
    const PATH: &'static str = "/api/auth/forgot-password/";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub token: String,
    pub new_password: String,
}

/// The server answers `{}` on success.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResetPasswordResponse {}

impl ApiRequest for ResetPasswordRequest {
    type Response = ResetPasswordResponse;
    const PATH: &'static str = "/api/auth/reset-password/";
    const METHOD: HttpMethod = HttpMethod::Post;
}

// =========================================================
// Weather
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeatherRequest;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentWeatherResponse {
    #[serde(default)]
    pub location_name: String,
    #[serde(default)]
    pub current: WeatherNow,
}

impl ApiRequest for CurrentWeatherRequest {
    type Response = CurrentWeatherResponse;
    const PATH: &'static str = "/api/weather/current/";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherAlertsRequest;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherAlertsResponse {
    #[serde(default)]
    pub alerts: Vec<WeatherAlert>,
    /// Live alerts computed from the current forecast, not yet persisted.
    #[serde(default)]
    pub live: Vec<WeatherAlert>,
}

impl ApiRequest for WeatherAlertsRequest {
    type Response = WeatherAlertsResponse;
    const PATH: &'static str = "/api/weather/alerts/";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkAlertsReadRequest {
    pub mark_read: Vec<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkAlertsReadResponse {
    #[serde(default)]
    pub updated: Option<u64>,
}

impl ApiRequest for MarkAlertsReadRequest {
    type Response = MarkAlertsReadResponse;
    const PATH: &'static str = "/api/weather/alerts/";
    const METHOD: HttpMethod = HttpMethod::Patch;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetWeatherPreferencesRequest;

impl ApiRequest for GetWeatherPreferencesRequest {
    type Response = WeatherPreferences;
    const PATH: &'static str = "/api/weather/preferences/";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaveWeatherPreferencesRequest(pub WeatherPreferences);

impl ApiRequest for SaveWeatherPreferencesRequest {
    type Response = WeatherPreferences;
    const PATH: &'static str = "/api/weather/preferences/";
    const METHOD: HttpMethod = HttpMethod::Put;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeRequest {
    pub q: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

impl ApiRequest for GeocodeRequest {
    type Response = GeocodeResponse;
    const PATH: &'static str = "/api/weather/geocode/";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{}?q={}", Self::PATH, encode_query(&self.q))
    }
}

// =========================================================
// Prices
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MandiPricesRequest {
    pub commodity: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MandiPricesResponse {
    #[serde(default)]
    pub prices: Vec<MandiPrice>,
}

impl ApiRequest for MandiPricesRequest {
    type Response = MandiPricesResponse;
    const PATH: &'static str = "/api/prices/mandi/";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{}?commodity={}", Self::PATH, encode_query(&self.commodity))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceHistoryRequest {
    pub commodity: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceHistoryResponse {
    #[serde(default)]
    pub history: Vec<PricePoint>,
}

impl ApiRequest for PriceHistoryRequest {
    type Response = PriceHistoryResponse;
    const PATH: &'static str = "/api/prices/history/";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{}?commodity={}", Self::PATH, encode_query(&self.commodity))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePredictRequest {
    pub commodity: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricePredictResponse {
    #[serde(default)]
    pub prediction: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl PricePredictResponse {
    pub fn text(&self) -> String {
        self.prediction
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_default()
    }
}

impl ApiRequest for PricePredictRequest {
    type Response = PricePredictResponse;
    const PATH: &'static str = "/api/prices/predict/";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{}?commodity={}", Self::PATH, encode_query(&self.commodity))
    }
}

// =========================================================
// Yield
// =========================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YieldPredictRequest {
    pub crop: String,
    pub region: String,
    pub season: String,
    #[serde(default)]
    pub area: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YieldPredictResponse {
    #[serde(default)]
    pub prediction: String,
}

impl ApiRequest for YieldPredictRequest {
    type Response = YieldPredictResponse;
    const PATH: &'static str = "/api/yield/predict/";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CropSuggestionsRequest {
    pub region: String,
    pub season: String,
    #[serde(default)]
    pub current_crop: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CropSuggestionsResponse {
    #[serde(default)]
    pub suggestions: String,
}

impl ApiRequest for CropSuggestionsRequest {
    type Response = CropSuggestionsResponse;
    const PATH: &'static str = "/api/yield/suggestions/";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!(
            "{}?region={}&season={}&current_crop={}",
            Self::PATH,
            encode_query(&self.region),
            encode_query(&self.season),
            encode_query(&self.current_crop),
        )
    }
}

// =========================================================
// Disease
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseAnalyzeRequest {
    /// Base64-encoded crop/leaf image.
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiseaseAnalyzeResponse {
    #[serde(default)]
    pub disease: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub treatment: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ApiRequest for DiseaseAnalyzeRequest {
    type Response = DiseaseAnalyzeResponse;
    const PATH: &'static str = "/api/disease/analyze/";
    const METHOD: HttpMethod = HttpMethod::Post;
}

// =========================================================
// Planner
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPlansRequest;

impl ApiRequest for ListPlansRequest {
    type Response = Listing<CropPlan>;
    const PATH: &'static str = "/api/planner/plans/";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlanRequest {
    pub name: String,
    pub crop: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

impl ApiRequest for CreatePlanRequest {
    type Response = CropPlan;
    const PATH: &'static str = "/api/planner/plans/";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListActivitiesRequest {
    #[serde(default)]
    pub plan: Option<u64>,
}

impl ApiRequest for ListActivitiesRequest {
    type Response = Listing<PlanActivity>;
    const PATH: &'static str = "/api/planner/activities/";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        match self.plan {
            Some(id) => format!("{}?plan={}", Self::PATH, id),
            None => Self::PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateActivityRequest {
    pub plan: u64,
    pub name: String,
    pub due_date: NaiveDate,
    pub reminder_days_before: u32,
    #[serde(default)]
    pub notes: String,
}

impl ApiRequest for CreateActivityRequest {
    type Response = PlanActivity;
    const PATH: &'static str = "/api/planner/activities/";
    const METHOD: HttpMethod = HttpMethod::Post;
}

// =========================================================
// Marketplace
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListProductsRequest;

impl ApiRequest for ListProductsRequest {
    type Response = Listing<Product>;
    const PATH: &'static str = "/api/products/";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListCategoriesRequest;

impl ApiRequest for ListCategoriesRequest {
    type Response = Listing<Category>;
    const PATH: &'static str = "/api/categories/";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListOrdersRequest;

impl ApiRequest for ListOrdersRequest {
    type Response = Listing<Order>;
    const PATH: &'static str = "/api/orders/";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub product_id: u64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub shipping_address: String,
    pub items: Vec<OrderItemInput>,
}

impl ApiRequest for CreateOrderRequest {
    type Response = Order;
    const PATH: &'static str = "/api/orders/";
    const METHOD: HttpMethod = HttpMethod::Post;
}

// =========================================================
// Schemes
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSchemesRequest;

impl ApiRequest for ListSchemesRequest {
    type Response = Listing<Scheme>;
    const PATH: &'static str = "/api/schemes/";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckEligibilityRequest {
    /// Path parameter, never serialized into the body.
    #[serde(skip)]
    pub slug: String,
    #[serde(flatten)]
    pub answers: EligibilityForm,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckEligibilityResponse {
    #[serde(default)]
    pub result: String,
}

impl ApiRequest for CheckEligibilityRequest {
    type Response = CheckEligibilityResponse;
    const PATH: &'static str = "/api/schemes/";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("{}{}/check_eligibility/", Self::PATH, self.slug)
    }
}

// =========================================================
// Vendor
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListVendorProductsRequest;

impl ApiRequest for ListVendorProductsRequest {
    type Response = Listing<Product>;
    const PATH: &'static str = "/api/vendor/products/";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateVendorProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub unit: String,
    pub stock: u32,
    #[serde(default)]
    pub category: Option<u64>,
    pub is_active: bool,
}

impl ApiRequest for CreateVendorProductRequest {
    type Response = Product;
    const PATH: &'static str = "/api/vendor/products/";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Partial update; only the provided fields reach the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VendorProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Option<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateVendorProductRequest {
    #[serde(skip)]
    pub id: u64,
    #[serde(flatten)]
    pub patch: VendorProductPatch,
}

impl ApiRequest for UpdateVendorProductRequest {
    type Response = Product;
    const PATH: &'static str = "/api/vendor/products/";
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        format!("{}{}/", Self::PATH, self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListVendorOrdersRequest;

impl ApiRequest for ListVendorOrdersRequest {
    type Response = Listing<Order>;
    const PATH: &'static str = "/api/vendor/orders/";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateVendorOrderRequest {
    #[serde(skip)]
    pub id: u64,
    pub status: String,
}

impl ApiRequest for UpdateVendorOrderRequest {
    type Response = Order;
    const PATH: &'static str = "/api/vendor/orders/";
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        format!("{}{}/", Self::PATH, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_paths_are_encoded() {
        let req = MandiPricesRequest {
            commodity: "Basmati Rice".into(),
        };
        assert_eq!(req.path(), "/api/prices/mandi/?commodity=Basmati%20Rice");
    }

    #[test]
    fn path_parameters_stay_out_of_the_body() {
        let req = UpdateVendorOrderRequest {
            id: 12,
            status: "shipped".into(),
        };
        assert_eq!(req.path(), "/api/vendor/orders/12/");
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"status":"shipped"}"#
        );
    }

    #[test]
    fn product_patch_serializes_only_given_fields() {
        let req = UpdateVendorProductRequest {
            id: 3,
            patch: VendorProductPatch {
                stock: Some(40),
                ..Default::default()
            },
        };
        assert_eq!(serde_json::to_string(&req).unwrap(), r#"{"stock":40}"#);
    }

    #[test]
    fn eligibility_slug_is_path_only() {
        let mut answers = EligibilityForm::default();
        answers.set("age", "34".into());
        let req = CheckEligibilityRequest {
            slug: "pm-kisan".into(),
            answers,
        };
        assert_eq!(req.path(), "/api/schemes/pm-kisan/check_eligibility/");
        let body = serde_json::to_string(&req).unwrap();
        assert!(body.contains(r#""age":"34""#));
        assert!(!body.contains("pm-kisan"));
    }

    #[test]
    fn auth_response_tolerates_missing_role_echo() {
        let json = r#"{"access":"T1","refresh":"R1","user":{"id":1,"email":"a@x.com","role":"farmer"}}"#;
        let resp: AuthResponse = serde_json::from_str(json).unwrap();
        assert!(resp.role.is_none());
        assert_eq!(resp.user.role, Role::Farmer);
    }
}
