//! 总览面板
//!
//! 四个集合的计数并发拉取、各自独立落地：每个指标有自己的信号，
//! 某一个集合失败只影响它自己的占位符，绝不拖垮其余三个。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::layout::AppNavbar;
use crate::session::use_session;
use crate::web::route::AppRoute;

/// 单个指标的生命周期
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Loading,
    Count(usize),
    /// 对应集合拉取失败，显示占位符
    Unavailable,
}

impl Metric {
    pub fn text(&self) -> String {
        match self {
            Metric::Loading => "...".to_string(),
            Metric::Count(n) => n.to_string(),
            Metric::Unavailable => "—".to_string(),
        }
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session();
    let api = use_api();

    let products_metric = RwSignal::new(Metric::Loading);
    let categories_metric = RwSignal::new(Metric::Loading);
    let suppliers_metric = RwSignal::new(Metric::Loading);
    let orders_metric = RwSignal::new(Metric::Loading);
    let (me_error, set_me_error) = signal(Option::<String>::None);

    // 四个拉取并发进行，任何一个结束立刻渲染自己的计数
    {
        let api_products = api.clone();
        spawn_local(async move {
            let metric = match api_products.products().await {
                Ok(list) => Metric::Count(list.len()),
                Err(_) => Metric::Unavailable,
            };
            products_metric.set(metric);
        });

        let api_categories = api.clone();
        spawn_local(async move {
            let metric = match api_categories.categories().await {
                Ok(list) => Metric::Count(list.len()),
                Err(_) => Metric::Unavailable,
            };
            categories_metric.set(metric);
        });

        let api_suppliers = api.clone();
        spawn_local(async move {
            let metric = match api_suppliers.suppliers().await {
                Ok(list) => Metric::Count(list.len()),
                Err(_) => Metric::Unavailable,
            };
            suppliers_metric.set(metric);
        });

        let api_orders = api.clone();
        spawn_local(async move {
            let metric = match api_orders.orders().await {
                Ok(list) => Metric::Count(list.len()),
                Err(_) => Metric::Unavailable,
            };
            orders_metric.set(metric);
        });

        // 顺带刷新缓存的用户资料
        let api_me = api.clone();
        spawn_local(async move {
            match api_me.me().await {
                Ok(profile) => session.set_user(profile),
                Err(e) => set_me_error.set(Some(e.user_message("无法获取用户信息"))),
            }
        });
    }

    let stat = |title: &'static str, metric: RwSignal<Metric>| {
        view! {
            <div class="stat">
                <div class="stat-title">{title}</div>
                <div class="stat-value text-primary">{move || metric.get().text()}</div>
            </div>
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <AppNavbar active=AppRoute::Dashboard />

                <Show when=move || me_error.get().is_some()>
                    <div role="alert" class="alert alert-warning text-sm py-2">
                        <span>{move || me_error.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    {stat("商品", products_metric)}
                    {stat("分类", categories_metric)}
                    {stat("供应商", suppliers_metric)}
                    {stat("订单", orders_metric)}
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_text_variants() {
        assert_eq!(Metric::Loading.text(), "...");
        assert_eq!(Metric::Count(0).text(), "0");
        assert_eq!(Metric::Count(3).text(), "3");
        assert_eq!(Metric::Unavailable.text(), "—");
    }
}
