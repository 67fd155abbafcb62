//! 功能端点门面
//!
//! 页面组件不直接接触 `SessionClient`，而是通过这里的强类型方法
//! 调用后端。令牌附加与 401 刷新由底层通道统一处理。

use std::sync::Arc;

use crate::auth::AppClient;
use crate::session::ApiResult;
use agromod_shared::protocol::*;
use agromod_shared::{
    Category, CropPlan, Listing, Order, PlanActivity, Product, Scheme, WeatherPreferences,
};

#[derive(Clone)]
pub struct AgromodApi {
    client: Arc<AppClient>,
}

impl AgromodApi {
    pub fn new(client: Arc<AppClient>) -> Self {
        Self { client }
    }

    // =========================================================
    // 天气
    // =========================================================

    pub async fn current_weather(&self) -> ApiResult<CurrentWeatherResponse> {
        self.client.send(&CurrentWeatherRequest).await
    }

    pub async fn weather_alerts(&self) -> ApiResult<WeatherAlertsResponse> {
        self.client.send(&WeatherAlertsRequest).await
    }

    pub async fn mark_alerts_read(&self, ids: Vec<u64>) -> ApiResult<MarkAlertsReadResponse> {
        self.client.send(&MarkAlertsReadRequest { mark_read: ids }).await
    }

    pub async fn weather_preferences(&self) -> ApiResult<WeatherPreferences> {
        self.client.send(&GetWeatherPreferencesRequest).await
    }

    pub async fn save_weather_preferences(
        &self,
        prefs: WeatherPreferences,
    ) -> ApiResult<WeatherPreferences> {
        self.client.send(&SaveWeatherPreferencesRequest(prefs)).await
    }

    pub async fn geocode(&self, query: &str) -> ApiResult<GeocodeResponse> {
        self.client.send(&GeocodeRequest { q: query.to_string() }).await
    }

    // =========================================================
    // 价格
    // =========================================================

    pub async fn mandi_prices(&self, commodity: &str) -> ApiResult<MandiPricesResponse> {
        self.client
            .send(&MandiPricesRequest {
                commodity: commodity.to_string(),
            })
            .await
    }

    pub async fn price_history(&self, commodity: &str) -> ApiResult<PriceHistoryResponse> {
        self.client
            .send(&PriceHistoryRequest {
                commodity: commodity.to_string(),
            })
            .await
    }

    pub async fn price_predict(&self, commodity: &str) -> ApiResult<PricePredictResponse> {
        self.client
            .send(&PricePredictRequest {
                commodity: commodity.to_string(),
            })
            .await
    }

    // =========================================================
    // 产量与病害
    // =========================================================

    pub async fn yield_predict(&self, request: &YieldPredictRequest) -> ApiResult<YieldPredictResponse> {
        self.client.send(request).await
    }

    pub async fn crop_suggestions(
        &self,
        request: &CropSuggestionsRequest,
    ) -> ApiResult<CropSuggestionsResponse> {
        self.client.send(request).await
    }

    pub async fn analyze_disease(
        &self,
        request: &DiseaseAnalyzeRequest,
    ) -> ApiResult<DiseaseAnalyzeResponse> {
        self.client.send(request).await
    }

    // =========================================================
    // 种植计划
    // =========================================================

    pub async fn plans(&self) -> ApiResult<Listing<CropPlan>> {
        self.client.send(&ListPlansRequest).await
    }

    pub async fn create_plan(&self, request: &CreatePlanRequest) -> ApiResult<CropPlan> {
        self.client.send(request).await
    }

    pub async fn activities(&self, plan: Option<u64>) -> ApiResult<Listing<PlanActivity>> {
        self.client.send(&ListActivitiesRequest { plan }).await
    }

    pub async fn create_activity(&self, request: &CreateActivityRequest) -> ApiResult<PlanActivity> {
        self.client.send(request).await
    }

    // =========================================================
    // 集市
    // =========================================================

    pub async fn products(&self) -> ApiResult<Listing<Product>> {
        self.client.send(&ListProductsRequest).await
    }

    pub async fn categories(&self) -> ApiResult<Listing<Category>> {
        self.client.send(&ListCategoriesRequest).await
    }

    pub async fn orders(&self) -> ApiResult<Listing<Order>> {
        self.client.send(&ListOrdersRequest).await
    }

    pub async fn create_order(&self, request: &CreateOrderRequest) -> ApiResult<Order> {
        self.client.send(request).await
    }

    // =========================================================
    // 政府计划
    // =========================================================

    pub async fn schemes(&self) -> ApiResult<Listing<Scheme>> {
        self.client.send(&ListSchemesRequest).await
    }

    pub async fn check_eligibility(
        &self,
        request: &CheckEligibilityRequest,
    ) -> ApiResult<CheckEligibilityResponse> {
        self.client.send(request).await
    }

    // =========================================================
    // 商户
    // =========================================================

    pub async fn vendor_products(&self) -> ApiResult<Listing<Product>> {
        self.client.send(&ListVendorProductsRequest).await
    }

    pub async fn create_vendor_product(
        &self,
        request: &CreateVendorProductRequest,
    ) -> ApiResult<Product> {
        self.client.send(request).await
    }

    pub async fn update_vendor_product(
        &self,
        request: &UpdateVendorProductRequest,
    ) -> ApiResult<Product> {
        self.client.send(request).await
    }

    pub async fn vendor_orders(&self) -> ApiResult<Listing<Order>> {
        self.client.send(&ListVendorOrdersRequest).await
    }

    pub async fn update_vendor_order(&self, id: u64, status: &str) -> ApiResult<Order> {
        self.client
            .send(&UpdateVendorOrderRequest {
                id,
                status: status.to_string(),
            })
            .await
    }
}

/// 从 Context 获取 API 门面
pub fn use_api() -> AgromodApi {
    use leptos::prelude::use_context;
    use_context::<AgromodApi>().expect("AgromodApi should be provided")
}
