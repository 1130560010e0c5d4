use serde::{Deserialize, Serialize};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 后端 API 根路径（同源部署）
pub const API_BASE: &str = "/api";

/// LocalStorage 中保存会话令牌的键
pub const STORAGE_TOKEN_KEY: &str = "stockdeck_token";
/// LocalStorage 中保存用户资料的键（与令牌同生共死）
pub const STORAGE_USER_KEY: &str = "stockdeck_user";

/// 默认计量单位
pub const DEFAULT_UNIT: &str = "pcs";

fn default_unit() -> String {
    DEFAULT_UNIT.to_string()
}

// =========================================================
// 认证协议 (Auth Protocol)
// =========================================================

/// 服务端返回的用户资料。
///
/// 服务端还会附带 created_at / updated_at 等字段，客户端不关心，
/// serde 默认忽略未知字段。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
}

/// 登录请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 注册请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: String,
}

/// 登录/注册成功时的响应。
///
/// token 缺失视为服务端响应不完整，由调用方拒绝。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 商品。外键 category_id / supplier_id 以空字符串表示"未选择"，
/// 与服务端的序列化约定一致。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: String,
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub supplier_id: String,
    #[serde(default = "default_unit")]
    pub unit: String,
}

/// 创建/更新商品的请求体（id 由服务端分配，不在其中）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInput {
    pub sku: String,
    pub name: String,
    pub description: String,
    pub category_id: String,
    pub supplier_id: String,
    pub unit: String,
}

/// 商品分类
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_id: String,
}

/// 创建分类的请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    #[serde(default)]
    pub parent_id: String,
}

/// 供应商
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

/// 创建供应商的请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierInput {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

// =========================================================
// 订单 (Orders)
// =========================================================

/// 订单中的一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: f64,
    #[serde(default)]
    pub price: f64,
}

/// 订单。status 由服务端管理，客户端当作不透明字符串展示。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub id: String,
    pub customer: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// 创建订单的请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderRequest {
    pub customer: String,
    pub items: Vec<OrderItem>,
}

/// 订单状态流转请求体（专用接口 PUT /orders/:id/status）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

// =========================================================
// 仓库 (Warehouse)
// =========================================================

/// 某商品当前在库余量，服务端为唯一权威来源。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub product_id: String,
    pub quantity: f64,
}

/// 入库请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptRequest {
    pub product_id: String,
    pub supplier_id: String,
    pub quantity: f64,
    pub price: f64,
    /// RFC3339，可为空字符串
    pub expiry_date: String,
}

/// 报废/出库请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteOffRequest {
    pub product_id: String,
    pub quantity: f64,
}

/// 为订单预留库存的请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveRequest {
    pub product_id: String,
    pub order_id: String,
    pub quantity: f64,
}

// =========================================================
// 错误协议 (Error Protocol)
// =========================================================

/// 服务端错误响应统一形状：`{"error": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_tolerates_server_extras_and_fills_defaults() {
        // 服务端会附带时间戳字段，supplier_id 可能整个缺失
        let json = r#"{
            "id": "p-1",
            "sku": "SKU-001",
            "name": "M8 bolts",
            "category_id": "c-1",
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-02T00:00:00Z"
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, "p-1");
        assert_eq!(p.supplier_id, "");
        assert_eq!(p.description, "");
        assert_eq!(p.unit, DEFAULT_UNIT);
    }

    #[test]
    fn auth_response_without_user_or_token() {
        let full: AuthResponse =
            serde_json::from_str(r#"{"token":"t1","user":{"email":"a@b.com","role":"manager"}}"#)
                .unwrap();
        assert_eq!(full.token.as_deref(), Some("t1"));
        assert_eq!(full.user.unwrap().role, "manager");

        // 注册接口可能只返回用户对象（没有 token 字段）
        let bare: AuthResponse = serde_json::from_str(r#"{"user":{"email":"a@b.com"}}"#).unwrap();
        assert!(bare.token.is_none());
        assert_eq!(bare.user.unwrap().role, "");
    }

    #[test]
    fn order_items_default_price() {
        let o: Order = serde_json::from_str(
            r#"{"id":"o-1","customer":"Acme Ltd","status":"new",
                "items":[{"product_id":"p-1","quantity":2.5}]}"#,
        )
        .unwrap();
        assert_eq!(o.items.len(), 1);
        assert_eq!(o.items[0].price, 0.0);
    }

    #[test]
    fn stock_items_round_trip() {
        let listed: Vec<StockItem> =
            serde_json::from_str(r#"[{"product_id":"p-1","quantity":10.0}]"#).unwrap();
        let again: Vec<StockItem> =
            serde_json::from_str(&serde_json::to_string(&listed).unwrap()).unwrap();
        assert_eq!(listed, again);
    }

    #[test]
    fn receipt_request_wire_shape() {
        let dto = ReceiptRequest {
            product_id: "p-1".into(),
            supplier_id: "s-1".into(),
            quantity: 5.0,
            price: 12.5,
            expiry_date: "2027-01-01T00:00:00Z".into(),
        };
        let json = serde_json::to_string(&dto).unwrap();
        assert!(json.contains(r#""product_id":"p-1""#));
        assert!(json.contains(r#""expiry_date":"2027-01-01T00:00:00Z""#));
    }

    #[test]
    fn error_body_parses() {
        let e: ErrorBody = serde_json::from_str(r#"{"error":"insufficient stock"}"#).unwrap();
        assert_eq!(e.error, "insufficient stock");
    }
}
