//! StockDeck 前端应用
//!
//! 仓库管理系统的浏览器端，Context-Driven 架构：
//! - `web::route` / `web::router`: 路由定义与带认证守卫的路由服务
//! - `session`: 注入式会话上下文（令牌 + 用户资料的唯一归属地）
//! - `api`: 认证请求的唯一通道，统一错误归一化与 401 处理
//! - `components`: UI 组件层

mod api;
mod session;

mod components {
    pub mod dashboard;
    pub mod layout;
    pub mod login;
    pub mod orders;
    pub mod products;
    pub mod register;
    pub mod warehouse;
}

// 原生 Web API 封装模块
// 对浏览器原生 API 的轻量封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::{HttpClient, HttpMethod};
    pub use storage::LocalStorage;
}

use leptos::prelude::*;
use stockdeck_shared::API_BASE;

use crate::api::ApiClient;
use crate::components::dashboard::DashboardPage;
use crate::components::login::LoginPage;
use crate::components::orders::OrdersPage;
use crate::components::products::ProductsPage;
use crate::components::register::RegisterPage;
use crate::components::warehouse::WarehousePage;
use crate::session::{SessionContext, init_session};
use crate::web::route::AppRoute;
use crate::web::router::{Router, RouterOutlet};

/// 路由匹配函数：根据 AppRoute 返回对应视图
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Products => view! { <ProductsPage /> }.into_any(),
        AppRoute::Orders => view! { <OrdersPage /> }.into_any(),
        AppRoute::Warehouse => view! { <WarehousePage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"页面未找到"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建会话上下文并从 LocalStorage 恢复上次会话。
    //    这一步是同步的，发生在任何异步操作之前。
    let session = SessionContext::new();
    init_session(&session);
    provide_context(session);

    // 2. API 客户端持有注入的会话上下文
    provide_context(ApiClient::new(API_BASE, session));

    // 3. 认证信号注入路由服务，实现守卫与会话解耦
    let is_authenticated = session.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
