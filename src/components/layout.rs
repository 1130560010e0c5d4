//! 受保护页面共用的顶栏
//!
//! 导航按钮、当前用户信息与登出。登出只清会话，
//! 重定向由路由守卫自动完成。

use leptos::prelude::*;

use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn AppNavbar(
    /// 当前页面，用于高亮导航按钮
    active: AppRoute,
) -> impl IntoView {
    let session = use_session();
    let router = use_router();

    let user_label = move || {
        session
            .user_signal()
            .get()
            .map(|u| {
                if u.role.is_empty() {
                    u.email
                } else {
                    format!("{} ({})", u.email, u.role)
                }
            })
            .unwrap_or_default()
    };

    let on_logout = move |_| {
        session.logout();
    };

    view! {
        <div class="navbar bg-base-100 rounded-box shadow-xl">
            <div class="flex-1 gap-2">
                <span class="btn btn-ghost text-xl">"StockDeck"</span>
                {AppRoute::nav_routes()
                    .into_iter()
                    .map(|route| {
                        let class = if route == active {
                            "btn btn-sm btn-primary"
                        } else {
                            "btn btn-sm btn-ghost"
                        };
                        view! {
                            <button class=class on:click=move |_| router.navigate(route.to_path())>
                                {route.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            <div class="flex-none gap-2">
                <span class="text-sm opacity-70 hidden md:inline">{user_label}</span>
                <button on:click=on_logout class="btn btn-outline btn-error btn-sm">
                    "退出"
                </button>
            </div>
        </div>
    }
}
