//! 路由服务模块 - 核心引擎
//!
//! 封装 History API，所有对 window.history 的操作集中于此。
//! 导航流程："请求 -> 守卫校验 -> 写入历史 -> 更新视图"。
//! 认证检查通过注入的信号完成，与会话模块解耦；
//! 401 强制登出正是经由该信号的变化触发自动重定向。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// replaceState 版本，用于重定向，避免污染历史栈
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 通过 Signal 驱动界面更新；认证信号由外部注入。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    /// 当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), true);
    }

    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let is_auth = self.is_authenticated.get_untracked();

        // 目标需要会话但当前没有：直接去未认证入口，
        // 受保护页面不会被挂载，自然也不会发出任何请求
        if target_route.requires_auth() && !is_auth {
            web_sys::console::log_1(&"[router] 未认证访问受保护页面，重定向到登录".into());
            let redirect = AppRoute::auth_failure_redirect();
            if use_push {
                push_history_state(redirect.to_path());
            } else {
                replace_history_state(redirect.to_path());
            }
            self.set_route.set(redirect);
            return;
        }

        // 已认证用户访问登录/注册页，转到面板
        if target_route.should_redirect_when_authenticated() && is_auth {
            let redirect = AppRoute::auth_success_redirect();
            if use_push {
                push_history_state(redirect.to_path());
            } else {
                replace_history_state(redirect.to_path());
            }
            self.set_route.set(redirect);
            return;
        }

        // 校验通过，写入历史并更新视图
        if use_push {
            push_history_state(target_route.to_path());
        } else {
            replace_history_state(target_route.to_path());
        }
        self.set_route.set(target_route);
    }

    /// 监听浏览器前进/后退，popstate 时同样走守卫
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            let is_auth = is_authenticated.get_untracked();

            if target_route.requires_auth() && !is_auth {
                let redirect = AppRoute::auth_failure_redirect();
                replace_history_state(redirect.to_path());
                set_route.set(redirect);
            } else {
                set_route.set(target_route);
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 会话丢失时的自动重定向。
    ///
    /// 登出（含 401 清会话）后把受保护页面换成登录页，
    /// 组件自身无需处理重定向。登录后的跳转由登录/注册页
    /// 自己延迟触发，以便确认消息有机会展示。
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let route = current_route.get_untracked();

            if !is_auth && route.requires_auth() {
                web_sys::console::log_1(&"[router] 会话已失效，重定向到登录".into());
                let redirect = AppRoute::auth_failure_redirect();
                push_history_state(redirect.to_path());
                set_route.set(redirect);
            }
        });
    }

    /// 首次加载时同步校验当前 URL。
    ///
    /// 未认证直开受保护页面在任何异步操作开始之前就被换到登录页，
    /// 受保护组件一次都不会挂载。
    fn validate_initial_route(&self) {
        let initial = AppRoute::from_path(&current_path());
        self.navigate_to_route(initial, false);
    }
}

fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    router.validate_initial_route();
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件，应在 App 根部使用
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// 路由出口组件，根据当前路由渲染对应视图
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}
