//! 仓库操作表单状态
//!
//! 将零散的 signal 整合为表单结构体：数据持有、重置、
//! 以及"表单输入 -> 请求对象"的转换。转换即校验：
//! 数量解析失败或非正数时根本不会产出请求对象，
//! 网络层一次都不会被触碰。

use leptos::prelude::*;
use stockdeck_shared::{ReceiptRequest, ReserveRequest, WriteOffRequest};

/// 解析数量：必须是有限正数
pub fn parse_quantity(raw: &str) -> Result<f64, String> {
    match raw.trim().parse::<f64>() {
        Ok(q) if q.is_finite() && q > 0.0 => Ok(q),
        _ => Err("数量必须是正数".to_string()),
    }
}

/// 解析价格：解析不出来按 0 处理，负数同样拒绝为 0
pub fn parse_price(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
        .unwrap_or(0.0)
}

fn required(raw: &str, message: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(message.to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

/// 入库表单
#[derive(Clone, Copy)]
pub struct ReceiptForm {
    pub product_id: RwSignal<String>,
    pub supplier_id: RwSignal<String>,
    pub quantity: RwSignal<String>,
    pub price: RwSignal<String>,
    pub expiry_date: RwSignal<String>,
}

impl ReceiptForm {
    pub fn new() -> Self {
        Self {
            product_id: RwSignal::new(String::new()),
            supplier_id: RwSignal::new(String::new()),
            quantity: RwSignal::new(String::new()),
            price: RwSignal::new(String::new()),
            expiry_date: RwSignal::new(String::new()),
        }
    }

    pub fn reset(&self) {
        self.product_id.set(String::new());
        self.supplier_id.set(String::new());
        self.quantity.set(String::new());
        self.price.set(String::new());
        self.expiry_date.set(String::new());
    }

    pub fn to_request(&self) -> Result<ReceiptRequest, String> {
        Ok(ReceiptRequest {
            product_id: required(&self.product_id.get_untracked(), "请输入商品 ID")?,
            supplier_id: required(&self.supplier_id.get_untracked(), "请输入供应商 ID")?,
            quantity: parse_quantity(&self.quantity.get_untracked())?,
            price: parse_price(&self.price.get_untracked()),
            expiry_date: self.expiry_date.get_untracked().trim().to_string(),
        })
    }
}

/// 报废表单
#[derive(Clone, Copy)]
pub struct WriteOffForm {
    pub product_id: RwSignal<String>,
    pub quantity: RwSignal<String>,
}

impl WriteOffForm {
    pub fn new() -> Self {
        Self {
            product_id: RwSignal::new(String::new()),
            quantity: RwSignal::new(String::new()),
        }
    }

    pub fn reset(&self) {
        self.product_id.set(String::new());
        self.quantity.set(String::new());
    }

    pub fn to_request(&self) -> Result<WriteOffRequest, String> {
        Ok(WriteOffRequest {
            product_id: required(&self.product_id.get_untracked(), "请输入商品 ID")?,
            quantity: parse_quantity(&self.quantity.get_untracked())?,
        })
    }
}

/// 预留表单
#[derive(Clone, Copy)]
pub struct ReserveForm {
    pub product_id: RwSignal<String>,
    pub order_id: RwSignal<String>,
    pub quantity: RwSignal<String>,
}

impl ReserveForm {
    pub fn new() -> Self {
        Self {
            product_id: RwSignal::new(String::new()),
            order_id: RwSignal::new(String::new()),
            quantity: RwSignal::new(String::new()),
        }
    }

    pub fn reset(&self) {
        self.product_id.set(String::new());
        self.order_id.set(String::new());
        self.quantity.set(String::new());
    }

    pub fn to_request(&self) -> Result<ReserveRequest, String> {
        Ok(ReserveRequest {
            product_id: required(&self.product_id.get_untracked(), "请输入商品 ID")?,
            order_id: required(&self.order_id.get_untracked(), "请输入订单 ID")?,
            quantity: parse_quantity(&self.quantity.get_untracked())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_rejects_non_numeric_and_non_positive() {
        assert!(parse_quantity("abc").is_err());
        assert!(parse_quantity("").is_err());
        assert!(parse_quantity("0").is_err());
        assert!(parse_quantity("-2").is_err());
        assert!(parse_quantity("NaN").is_err());
        assert!(parse_quantity("inf").is_err());
    }

    #[test]
    fn quantity_accepts_positive_numbers() {
        assert_eq!(parse_quantity("5").unwrap(), 5.0);
        assert_eq!(parse_quantity(" 2.5 ").unwrap(), 2.5);
        assert_eq!(parse_quantity("0.001").unwrap(), 0.001);
    }

    #[test]
    fn price_falls_back_to_zero() {
        assert_eq!(parse_price("abc"), 0.0);
        assert_eq!(parse_price(""), 0.0);
        assert_eq!(parse_price("-3"), 0.0);
        assert_eq!(parse_price("12.5"), 12.5);
    }

    #[test]
    fn receipt_form_validates_before_building_request() {
        let form = ReceiptForm::new();
        form.product_id.set("p-1".to_string());
        form.supplier_id.set("s-1".to_string());
        form.quantity.set("abc".to_string());
        // 非法数量：不会产出请求对象
        assert!(form.to_request().is_err());

        form.quantity.set("5".to_string());
        form.price.set("not-a-price".to_string());
        let dto = form.to_request().unwrap();
        assert_eq!(dto.quantity, 5.0);
        assert_eq!(dto.price, 0.0);
        assert_eq!(dto.expiry_date, "");
    }

    #[test]
    fn write_off_requires_product_id() {
        let form = WriteOffForm::new();
        form.quantity.set("3".to_string());
        assert!(form.to_request().is_err());

        form.product_id.set("  p-1  ".to_string());
        let dto = form.to_request().unwrap();
        assert_eq!(dto.product_id, "p-1");
        assert_eq!(dto.quantity, 3.0);
    }

    #[test]
    fn reserve_requires_order_id() {
        let form = ReserveForm::new();
        form.product_id.set("p-1".to_string());
        form.quantity.set("1".to_string());
        assert!(form.to_request().is_err());

        form.order_id.set("o-1".to_string());
        assert!(form.to_request().is_ok());
    }

    #[test]
    fn reset_clears_everything() {
        let form = ReceiptForm::new();
        form.product_id.set("p-1".to_string());
        form.quantity.set("5".to_string());
        form.reset();
        assert_eq!(form.product_id.get_untracked(), "");
        assert_eq!(form.quantity.get_untracked(), "");
    }
}
