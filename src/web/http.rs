//! HTTP 请求封装模块
//!
//! 对 `web_sys::fetch` 的轻量封装，替代 `gloo-net` 以减小 WASM 体积。
//! 只实现本应用用到的动词与 JSON 请求体。

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// HTTP 请求方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// HTTP 层错误
#[derive(Debug)]
pub enum HttpError {
    /// 请求构建失败（Headers/Request 创建、JSON 序列化）
    Build(String),
    /// fetch 本身失败：网络不可达、跨域被拒等，没有任何响应
    Network(String),
    /// 拿到了响应但响应体读取失败
    Body(String),
}

impl core::fmt::Display for HttpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HttpError::Build(msg) => write!(f, "请求构建失败: {}", msg),
            HttpError::Network(msg) => write!(f, "网络错误: {}", msg),
            HttpError::Body(msg) => write!(f, "响应体读取失败: {}", msg),
        }
    }
}

/// HTTP 响应封装
pub struct HttpResponse {
    inner: Response,
}

impl HttpResponse {
    /// HTTP 状态码
    pub fn status(&self) -> u16 {
        self.inner.status()
    }

    /// 读取响应体文本。空响应体返回空字符串。
    pub async fn text(self) -> Result<String, HttpError> {
        let promise = self
            .inner
            .text()
            .map_err(|e| HttpError::Body(format!("{:?}", e)))?;

        let value = JsFuture::from(promise)
            .await
            .map_err(|e| HttpError::Body(format!("{:?}", e)))?;

        Ok(value.as_string().unwrap_or_default())
    }
}

/// HTTP 请求构建器
pub struct HttpRequestBuilder {
    url: String,
    method: HttpMethod,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl HttpRequestBuilder {
    fn new(url: String, method: HttpMethod) -> Self {
        Self {
            url,
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    /// 添加请求头。后设置的同名头覆盖先设置的。
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// 设置已序列化好的请求体
    pub fn raw_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    /// 发送请求
    pub async fn send(self) -> Result<HttpResponse, HttpError> {
        let headers =
            Headers::new().map_err(|e| HttpError::Build(format!("创建 Headers 失败: {:?}", e)))?;

        for (key, value) in &self.headers {
            headers
                .set(key, value)
                .map_err(|e| HttpError::Build(format!("设置 Header 失败: {:?}", e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(self.method.as_str());
        opts.set_headers(&headers.into());

        if let Some(body) = &self.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(&self.url, &opts)
            .map_err(|e| HttpError::Build(format!("{:?}", e)))?;

        let window = web_sys::window()
            .ok_or_else(|| HttpError::Network("无法获取 window 对象".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| HttpError::Network(format!("{:?}", e)))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| HttpError::Body(format!("Response 类型转换失败: {:?}", e)))?;

        Ok(HttpResponse { inner: response })
    }
}

/// 轻量级 HTTP 客户端
pub struct HttpClient;

impl HttpClient {
    /// 以任意方法创建请求
    pub fn request(method: HttpMethod, url: &str) -> HttpRequestBuilder {
        HttpRequestBuilder::new(url.to_string(), method)
    }

    /// 创建 POST 请求
    pub fn post(url: &str) -> HttpRequestBuilder {
        Self::request(HttpMethod::Post, url)
    }
}
