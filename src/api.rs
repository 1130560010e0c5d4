//! API 客户端模块
//!
//! 所有经过认证的请求的唯一通道：统一注入 Bearer 头、统一归一化
//! 成功/失败形状、统一处理会话过期（401 清会话，路由守卫随即重定向）。
//! 视图层拿到的永远是 `ApiResult<T>`，不需要自己看状态码。

use serde::Serialize;
use serde::de::DeserializeOwned;
use stockdeck_shared::{
    AuthResponse, Category, CategoryInput, ErrorBody, LoginRequest, NewOrderRequest, Order,
    Product, ProductInput, ReceiptRequest, RegisterRequest, ReserveRequest, StatusUpdate,
    StockItem, Supplier, SupplierInput, UserProfile, WriteOffRequest,
};

use crate::session::SessionContext;
use crate::web::{HttpClient, HttpMethod};

/// 客户端错误分级
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 本地没有令牌，请求根本没有发出
    Unauthenticated,
    /// 服务端返回 401：会话已被清除、重定向已被触发
    SessionExpired,
    /// 服务端拒绝了操作（非 2xx）。携带响应体里的 error 字段，
    /// 响应体为空或无法解析时为 None
    Server(Option<String>),
    /// 传输层失败：网络不可达、响应体损坏。
    /// 临时的网络故障不是会话失效的证据，不清除会话
    Transport(String),
}

impl ApiError {
    /// 面向用户的消息：服务端给了结构化错误就原样展示，
    /// 否则用调用方提供的按操作定制的兜底文案。
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server(Some(msg)) => msg.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ApiError::Unauthenticated => write!(f, "未认证"),
            ApiError::SessionExpired => write!(f, "会话已过期"),
            ApiError::Server(Some(msg)) => write!(f, "服务端拒绝: {}", msg),
            ApiError::Server(None) => write!(f, "服务端拒绝"),
            ApiError::Transport(msg) => write!(f, "传输失败: {}", msg),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// 从 Context 获取 API 客户端
pub fn use_api() -> ApiClient {
    leptos::prelude::use_context::<ApiClient>().expect("ApiClient should be provided")
}

// =========================================================
// 响应归一化（纯函数，可在宿主机上测试）
// =========================================================

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// 从失败响应体里抠出 `{"error": "..."}` 的消息
fn extract_error(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.error)
        .filter(|msg| !msg.is_empty())
}

/// 把 (状态码, 响应体) 归一化为类型化结果
fn decode<T: DeserializeOwned>(status: u16, body: &str) -> ApiResult<T> {
    if !is_success(status) {
        return Err(ApiError::Server(extract_error(body)));
    }
    serde_json::from_str(body).map_err(|e| ApiError::Transport(format!("响应解析失败: {}", e)))
}

/// 无意义响应体的版本：2xx 即成功，响应体内容（包括空）一概容忍
fn decode_unit(status: u16, body: &str) -> ApiResult<()> {
    if is_success(status) {
        Ok(())
    } else {
        Err(ApiError::Server(extract_error(body)))
    }
}

/// 认证请求的先决条件：本地必须有令牌，
/// 否则立刻以 `Unauthenticated` 失败，不接触网络
fn require_token(session: &SessionContext) -> ApiResult<String> {
    session.token().ok_or(ApiError::Unauthenticated)
}

/// 认证响应的会话裁决。401 在这里统一消化：
/// 清会话（路由守卫随即重定向）并归一化为 `SessionExpired`；
/// 其余状态码原样放行，交给 `decode` 处理，会话不受影响。
fn settle(status: u16, body: String, session: &SessionContext) -> ApiResult<(u16, String)> {
    if status == 401 {
        #[cfg(target_arch = "wasm32")]
        web_sys::console::warn_1(&"[api] 服务端拒绝会话，强制登出".into());
        session.logout();
        return Err(ApiError::SessionExpired);
    }
    Ok((status, body))
}

// =========================================================
// 客户端
// =========================================================

/// API 客户端
///
/// 持有注入的会话上下文；`SessionContext` 是 `Copy`，
/// 客户端本身可以廉价克隆进 `spawn_local`。
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    session: SessionContext,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: SessionContext) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, session }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 认证请求的公共管道：`require_token` 前置、`settle` 收尾。
    async fn send_authed(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
    ) -> ApiResult<(u16, String)> {
        let token = require_token(&self.session)?;

        let mut req = HttpClient::request(method, &self.url(path))
            .header("Authorization", &format!("Bearer {}", token));
        if let Some(body) = body {
            req = req
                .header("Content-Type", "application/json")
                .raw_body(body);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status();
        // 响应体读不出来按空处理，归一化时再判定
        let text = resp.text().await.unwrap_or_default();

        settle(status, text, &self.session)
    }

    /// 未认证管道：登录/注册专用。不注入令牌，
    /// 401 只代表凭据错误，不清除会话。
    async fn send_public(&self, path: &str, body: String) -> ApiResult<(u16, String)> {
        let resp = HttpClient::post(&self.url(path))
            .header("Content-Type", "application/json")
            .raw_body(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        Ok((status, text))
    }

    fn serialize<B: Serialize>(body: &B) -> ApiResult<String> {
        serde_json::to_string(body)
            .map_err(|e| ApiError::Transport(format!("请求序列化失败: {}", e)))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let (status, text) = self.send_authed(HttpMethod::Get, path, None).await?;
        decode(status, &text)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        let raw = Self::serialize(body)?;
        let (status, text) = self.send_authed(HttpMethod::Post, path, Some(raw)).await?;
        decode(status, &text)
    }

    async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        let raw = Self::serialize(body)?;
        let (status, text) = self.send_authed(HttpMethod::Put, path, Some(raw)).await?;
        decode(status, &text)
    }

    async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<()> {
        let raw = Self::serialize(body)?;
        let (status, text) = self.send_authed(HttpMethod::Post, path, Some(raw)).await?;
        decode_unit(status, &text)
    }

    async fn delete_unit(&self, path: &str) -> ApiResult<()> {
        let (status, text) = self.send_authed(HttpMethod::Delete, path, None).await?;
        decode_unit(status, &text)
    }

    async fn post_public<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let raw = Self::serialize(body)?;
        let (status, text) = self.send_public(path, raw).await?;
        decode(status, &text)
    }

    // =====================================================
    // 认证
    // =====================================================

    pub async fn login(&self, req: &LoginRequest) -> ApiResult<AuthResponse> {
        self.post_public("/auth/login", req).await
    }

    pub async fn register(&self, req: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.post_public("/auth/register", req).await
    }

    /// 当前用户资料
    pub async fn me(&self) -> ApiResult<UserProfile> {
        self.get("/auth/me").await
    }

    // =====================================================
    // 商品
    // =====================================================

    pub async fn products(&self) -> ApiResult<Vec<Product>> {
        self.get("/products").await
    }

    pub async fn product(&self, id: &str) -> ApiResult<Product> {
        self.get(&format!("/products/{}", id)).await
    }

    pub async fn create_product(&self, input: &ProductInput) -> ApiResult<Product> {
        self.post("/products", input).await
    }

    pub async fn update_product(&self, id: &str, input: &ProductInput) -> ApiResult<Product> {
        self.put(&format!("/products/{}", id), input).await
    }

    pub async fn delete_product(&self, id: &str) -> ApiResult<()> {
        self.delete_unit(&format!("/products/{}", id)).await
    }

    // =====================================================
    // 分类 / 供应商
    // =====================================================

    pub async fn categories(&self) -> ApiResult<Vec<Category>> {
        self.get("/categories").await
    }

    pub async fn create_category(&self, input: &CategoryInput) -> ApiResult<Category> {
        self.post("/categories", input).await
    }

    pub async fn suppliers(&self) -> ApiResult<Vec<Supplier>> {
        self.get("/suppliers").await
    }

    pub async fn create_supplier(&self, input: &SupplierInput) -> ApiResult<Supplier> {
        self.post("/suppliers", input).await
    }

    // =====================================================
    // 订单
    // =====================================================

    pub async fn orders(&self) -> ApiResult<Vec<Order>> {
        self.get("/orders").await
    }

    pub async fn order(&self, id: &str) -> ApiResult<Order> {
        self.get(&format!("/orders/{}", id)).await
    }

    pub async fn create_order(&self, req: &NewOrderRequest) -> ApiResult<Order> {
        self.post("/orders", req).await
    }

    /// 状态流转走专用接口，不走通用更新
    pub async fn set_order_status(&self, id: &str, update: &StatusUpdate) -> ApiResult<Order> {
        self.put(&format!("/orders/{}/status", id), update).await
    }

    // =====================================================
    // 仓库
    // =====================================================

    pub async fn receipt(&self, req: &ReceiptRequest) -> ApiResult<()> {
        self.post_unit("/warehouse/receipt", req).await
    }

    pub async fn write_off(&self, req: &WriteOffRequest) -> ApiResult<()> {
        self.post_unit("/warehouse/write-off", req).await
    }

    pub async fn reserve(&self, req: &ReserveRequest) -> ApiResult<()> {
        self.post_unit("/warehouse/reserve", req).await
    }

    pub async fn inventory(&self) -> ApiResult<Vec<StockItem>> {
        self.get("/warehouse/inventory").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::prelude::GetUntracked;

    #[test]
    fn success_with_parseable_body_decodes() {
        let items: Vec<StockItem> =
            decode(200, r#"[{"product_id":"p-1","quantity":3.0}]"#).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 3.0);
    }

    #[test]
    fn success_with_malformed_body_is_transport_error() {
        let res: ApiResult<Vec<StockItem>> = decode(200, "<html>oops</html>");
        assert!(matches!(res, Err(ApiError::Transport(_))));
    }

    #[test]
    fn rejection_carries_server_message_verbatim() {
        let res: ApiResult<Vec<StockItem>> = decode(409, r#"{"error":"insufficient stock"}"#);
        assert_eq!(
            res.unwrap_err(),
            ApiError::Server(Some("insufficient stock".to_string()))
        );
    }

    #[test]
    fn rejection_without_parseable_body_is_absent_message() {
        // 非 2xx + 无法解析的响应体：消息缺失而不是 panic
        let res: ApiResult<Vec<StockItem>> = decode(500, "");
        assert_eq!(res.unwrap_err(), ApiError::Server(None));

        let res: ApiResult<Vec<StockItem>> = decode(500, "Internal Server Error");
        assert_eq!(res.unwrap_err(), ApiError::Server(None));
    }

    #[test]
    fn empty_error_field_counts_as_absent() {
        assert_eq!(extract_error(r#"{"error":""}"#), None);
        assert_eq!(extract_error(r#"{"other":"x"}"#), None);
        assert_eq!(
            extract_error(r#"{"error":"expired"}"#),
            Some("expired".to_string())
        );
    }

    #[test]
    fn unit_decode_tolerates_any_success_body() {
        assert!(decode_unit(200, "").is_ok());
        assert!(decode_unit(204, "").is_ok());
        assert!(decode_unit(201, r#"{"id":"m-1"}"#).is_ok());
        assert!(decode_unit(400, r#"{"error":"quantity must be positive"}"#).is_err());
    }

    #[test]
    fn status_class_boundaries() {
        assert!(!is_success(199));
        assert!(is_success(200));
        assert!(is_success(299));
        assert!(!is_success(300));
        assert!(!is_success(401));
    }

    #[test]
    fn missing_token_fails_before_any_network_contact() {
        // 空会话：请求管道在构建请求之前就以 Unauthenticated 终止
        let session = SessionContext::new();
        assert_eq!(require_token(&session).unwrap_err(), ApiError::Unauthenticated);
    }

    #[test]
    fn present_token_passes_precondition() {
        let session = SessionContext::new();
        session.login("t-1".to_string(), None);
        assert_eq!(require_token(&session).unwrap(), "t-1");
    }

    #[test]
    fn rejected_session_is_cleared_and_reported() {
        let session = SessionContext::new();
        session.login("t-stale".to_string(), None);
        assert!(session.is_authenticated_signal().get_untracked());

        let res = settle(401, String::new(), &session);
        assert_eq!(res.unwrap_err(), ApiError::SessionExpired);
        // 会话已清空，路由守卫的认证信号同步翻转
        assert_eq!(session.token(), None);
        assert!(!session.is_authenticated_signal().get_untracked());
    }

    #[test]
    fn non_401_rejections_keep_the_session() {
        let session = SessionContext::new();
        session.login("t-1".to_string(), None);

        // 服务端拒绝操作与传输故障都不是会话失效的证据
        let (status, body) = settle(500, r#"{"error":"boom"}"#.to_string(), &session).unwrap();
        assert_eq!(status, 500);
        assert_eq!(body, r#"{"error":"boom"}"#);
        assert_eq!(session.token(), Some("t-1".to_string()));

        let (status, _) = settle(200, String::new(), &session).unwrap();
        assert_eq!(status, 200);
        assert!(session.is_authenticated_signal().get_untracked());
    }

    #[test]
    fn user_message_prefers_server_text() {
        let server = ApiError::Server(Some("insufficient stock".to_string()));
        assert_eq!(server.user_message("兜底文案"), "insufficient stock");

        assert_eq!(ApiError::Server(None).user_message("兜底文案"), "兜底文案");
        assert_eq!(
            ApiError::Transport("dns".to_string()).user_message("兜底文案"),
            "兜底文案"
        );
        assert_eq!(ApiError::Unauthenticated.user_message("兜底文案"), "兜底文案");
    }
}
